use mongodb::bson::Document;

use primitives::{Filter, OwnerId, Tag, TagId};

use super::{Store, StoreError};

pub async fn find_tag(
    store: &Store,
    tag_id: &TagId,
    owner: &OwnerId,
) -> Result<Option<Tag>, StoreError> {
    let filter = Filter::new()
        .equals("tag_id", tag_id.as_str())
        .equals("owner", owner.as_str());

    store.tags().find_one(Document::from(&filter), None).await
}

pub async fn insert_tag(store: &Store, tag: &Tag) -> Result<(), StoreError> {
    store.tags().insert_one(tag, None).await?;

    Ok(())
}
