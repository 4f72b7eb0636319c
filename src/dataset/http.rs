//! Fetches the dataset from a remote JSON endpoint.

use async_trait::async_trait;
use reqwest::Client;

use crate::{Error, dataset::DatasetSource, transaction::Transaction};

/// Fetches the transaction dataset from a URL that returns a JSON array of
/// transactions.
///
/// Every call makes a new request, nothing is cached and failed requests are
/// not retried.
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    client: Client,
    url: String,
}

impl HttpDatasetSource {
    /// Create a source that fetches from `url` with a default HTTP client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create a source that fetches from `url` using `client`.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The URL the dataset is fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error> {
        tracing::debug!("Fetching transactions from {}", self.url);

        let transactions: Vec<Transaction> = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!("Fetched {} transactions", transactions.len());

        Ok(transactions)
    }
}
