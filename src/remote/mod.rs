//! Remote font catalog access.
//!
//! [`RemoteCatalog`] is the seam between the cache layer and the network, so
//! tests can swap the real webfonts client for a fake.

mod client;
mod models;

pub use client::{WebfontsClient, DEFAULT_ENDPOINT};

use crate::catalog::Font;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from fetching the remote catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, TLS, ...).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The endpoint answered with a non-success status.
    #[error("Catalog endpoint returned status {status}")]
    Http { status: u16 },

    /// The request exceeded its per-request timeout.
    #[error("Catalog request timed out")]
    Timeout,

    /// The body was not a parseable catalog payload.
    #[error("Malformed catalog payload: {0}")]
    Malformed(String),

    /// A syntactically valid response that carried no usable fonts.
    #[error("Catalog response contained no usable fonts")]
    EmptyCatalog,
}

/// A source of the full font catalog.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Fetch the complete catalog. Implementations must never return an
    /// empty list; an empty payload is [`FetchError::EmptyCatalog`].
    async fn fetch(&self) -> Result<Vec<Font>, FetchError>;
}

#[cfg(feature = "mock")]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub RemoteCatalog {}

        #[async_trait]
        impl RemoteCatalog for RemoteCatalog {
            async fn fetch(&self) -> Result<Vec<Font>, FetchError>;
        }
    }
}
