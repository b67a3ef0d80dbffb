#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

//! Authentication clients for the `lookout` API.
//!
//! A client resolves a bearer token into the [`Session`] of the tenant
//! the token belongs to. Two clients exist: [`Dummy`](dummy::Dummy)
//! with a fixed token table for development and tests, and
//! [`Mongo`](mongo::Mongo) backed by the `tokens` collection.

use async_trait::async_trait;

use primitives::OwnerId;

pub mod dummy;
pub mod error;
pub mod mongo;

pub use self::dummy::Dummy;
pub use self::error::Error;
pub use self::mongo::Mongo;

/// The resolved identity of an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub owner: OwnerId,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolves a bearer token into a [`Session`].
    ///
    /// An unknown token is an [`Error::Authentication`].
    async fn session_from_token(&self, token: &str) -> Result<Session, Error>;
}
