use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    Error,
    dataset::DatasetSource,
    transaction::{DateOfSale, Price, Transaction, TransactionId},
};

#[track_caller]
pub(crate) fn create_test_transaction(
    id: TransactionId,
    title: &str,
    price: f64,
    sold: bool,
    date_of_sale: &str,
) -> Transaction {
    Transaction {
        id,
        title: title.to_owned(),
        price: Price::from_f64(price).expect("Invalid test price"),
        description: format!("A {} for testing", title.to_lowercase()),
        category: "testing".to_owned(),
        image: format!("https://example.com/{id}.jpg"),
        sold,
        date_of_sale: DateOfSale::parse(date_of_sale).expect("Invalid test date of sale"),
    }
}

/// A sold shirt for 150 and an unsold mug for 650, both sold in March 2024.
pub(crate) fn shirt_and_mug_dataset() -> Vec<Transaction> {
    vec![
        create_test_transaction(1, "Shirt", 150.0, true, "2024-03-05"),
        create_test_transaction(2, "Mug", 650.0, false, "2024-03-10"),
    ]
}

/// Serves a fixed dataset, or always fails.
#[derive(Debug, Clone)]
pub(crate) struct StaticDataset(pub Result<Vec<Transaction>, Error>);

impl StaticDataset {
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        Self(Ok(transactions))
    }

    pub(crate) fn failing() -> Self {
        Self(Err(Error::UpstreamFetch("connection refused".to_owned())))
    }
}

#[async_trait]
impl DatasetSource for StaticDataset {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error> {
        self.0.clone()
    }
}

/// Serves a fixed result and counts how many times it was fetched.
#[derive(Debug, Clone)]
pub(crate) struct CountingDataset {
    result: Result<Vec<Transaction>, Error>,
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl CountingDataset {
    pub(crate) fn new(result: Result<Vec<Transaction>, Error>) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Wait for `delay` before answering each fetch.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for CountingDataset {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.result.clone()
    }
}
