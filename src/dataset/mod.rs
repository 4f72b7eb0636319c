//! Sources of the transaction dataset.
//!
//! The reports are computed from a full snapshot of the dataset. A
//! [DatasetSource] hands out that snapshot, either by fetching it from the
//! upstream URL on every call ([HttpDatasetSource]) or by reusing a recent
//! snapshot ([CachedDatasetSource]).

mod cache;
mod http;

use async_trait::async_trait;

use crate::{Error, transaction::Transaction};

pub use cache::CachedDatasetSource;
pub use http::HttpDatasetSource;

/// Provides the full list of transactions.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Get every transaction in the dataset, in the order the source lists them.
    ///
    /// # Errors
    /// Returns [Error::UpstreamFetch] if the dataset could not be retrieved or
    /// did not match the transaction schema.
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error>;
}
