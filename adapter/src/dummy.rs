use std::collections::HashMap;

use async_trait::async_trait;

use primitives::OwnerId;

use crate::{Authenticator, Error, Session};

/// A client with a fixed token table, for development and tests.
#[derive(Debug, Clone)]
pub struct Dummy {
    auth_tokens: HashMap<String, OwnerId>,
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Accepted bearer tokens and the owner each one authenticates as.
    pub auth_tokens: HashMap<String, OwnerId>,
}

impl Dummy {
    pub fn init(opts: Options) -> Self {
        Self {
            auth_tokens: opts.auth_tokens,
        }
    }
}

#[async_trait]
impl Authenticator for Dummy {
    async fn session_from_token(&self, token: &str) -> Result<Session, Error> {
        match self.auth_tokens.get(token) {
            Some(owner) => Ok(Session {
                owner: owner.clone(),
            }),
            None => Err(Error::authentication(format!(
                "invalid token: {}",
                token
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use primitives::test_util::{DUMMY_AUTH, OWNER};

    #[tokio::test]
    async fn resolves_known_token_and_rejects_unknown() {
        let dummy = Dummy::init(Options {
            auth_tokens: DUMMY_AUTH.clone(),
        });

        let session = dummy
            .session_from_token("AUTH_acme")
            .await
            .expect("Should resolve the session");
        assert_eq!(
            Session {
                owner: OWNER.clone()
            },
            session
        );

        let error = dummy
            .session_from_token("AUTH_unknown")
            .await
            .expect_err("Should reject an unknown token");
        assert!(matches!(error, Error::Authentication(_)));
    }
}
