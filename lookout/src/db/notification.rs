use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
};

use primitives::{Filter, Notification};

use super::{Store, StoreError};

fn find_options(limit: Option<i64>) -> FindOptions {
    let mut options = FindOptions::default();
    options.sort = Some(doc! { "timestamp": 1 });
    options.limit = limit;

    options
}

/// Finds notifications matching the filter, ordered by `timestamp`
/// ascending.
///
/// List endpoints cap the result with a limit; the visit tally passes
/// `None` because it folds over the complete window and a truncated
/// slice would skew the counts.
pub async fn find_notifications(
    store: &Store,
    filter: &Filter,
    limit: Option<i64>,
) -> Result<Vec<Notification>, StoreError> {
    let cursor = store
        .notifications()
        .find(Document::from(filter), find_options(limit))
        .await?;

    cursor.try_collect().await
}

pub async fn insert_notification(
    store: &Store,
    notification: &Notification,
) -> Result<(), StoreError> {
    store.notifications().insert_one(notification, None).await?;

    Ok(())
}

/// Deletes all notifications matching the filter and returns how many
/// were removed.
pub async fn delete_notifications(store: &Store, filter: &Filter) -> Result<u64, StoreError> {
    let result = store
        .notifications()
        .delete_many(Document::from(filter), None)
        .await?;

    Ok(result.deleted_count)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn find_options_always_sort_and_only_cap_on_request() {
        let capped = find_options(Some(200));
        assert_eq!(Some(doc! { "timestamp": 1 }), capped.sort);
        assert_eq!(Some(200), capped.limit);

        let unbounded = find_options(None);
        assert_eq!(Some(doc! { "timestamp": 1 }), unbounded.sort);
        assert_eq!(None, unbounded.limit);
    }
}
