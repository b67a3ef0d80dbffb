use async_trait::async_trait;
use mongodb::{bson::doc, Collection, Database};
use serde::{Deserialize, Serialize};

use primitives::OwnerId;

use crate::{Authenticator, Error, Session};

/// A client backed by the `tokens` collection of the application
/// database.
#[derive(Debug, Clone)]
pub struct Mongo {
    tokens: Collection<TokenDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenDocument {
    pub token: String,
    pub owner: OwnerId,
}

impl Mongo {
    pub fn new(database: &Database) -> Self {
        Self {
            tokens: database.collection("tokens"),
        }
    }
}

#[async_trait]
impl Authenticator for Mongo {
    async fn session_from_token(&self, token: &str) -> Result<Session, Error> {
        let found = self.tokens.find_one(doc! { "token": token }, None).await?;

        match found {
            Some(document) => Ok(Session {
                owner: document.owner,
            }),
            None => Err(Error::authentication(format!("invalid token: {}", token))),
        }
    }
}
