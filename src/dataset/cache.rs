//! An optional, time-bounded cache in front of another dataset source.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{
    sync::{Mutex, OnceCell},
    time::Instant,
};

use crate::{Error, dataset::DatasetSource, transaction::Transaction};

/// One fetch from the inner source, shared by every request that arrives
/// while it is running.
#[derive(Default)]
struct Fetch {
    outcome: OnceCell<Outcome>,
}

struct Outcome {
    fetched_at: Instant,
    result: Result<Vec<Transaction>, Error>,
}

impl Fetch {
    /// Whether a new request may join this fetch: it is still running, or it
    /// succeeded less than `ttl` ago.
    fn is_reusable(&self, ttl: Duration) -> bool {
        match self.outcome.get() {
            None => true,
            Some(outcome) => outcome.result.is_ok() && outcome.fetched_at.elapsed() < ttl,
        }
    }
}

/// Reuses the last snapshot fetched from `inner` until it is `ttl` old.
///
/// Requests that miss while a fetch is running wait for that fetch and get
/// its result, success or failure. Failed fetches are never cached, the next
/// request after a failure tries `inner` again.
pub struct CachedDatasetSource<S> {
    inner: S,
    ttl: Duration,
    current: Mutex<Option<Arc<Fetch>>>,
}

impl<S> CachedDatasetSource<S> {
    /// Wrap `inner` so that each snapshot is served for up to `ttl`.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<S: DatasetSource> DatasetSource for CachedDatasetSource<S> {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error> {
        // Only held to pick the fetch, never across the fetch itself.
        let fetch = {
            let mut current = self.current.lock().await;
            let reusable = current
                .as_ref()
                .filter(|fetch| fetch.is_reusable(self.ttl))
                .cloned();

            match reusable {
                Some(fetch) => fetch,
                None => {
                    let fetch = Arc::new(Fetch::default());
                    *current = Some(Arc::clone(&fetch));
                    fetch
                }
            }
        };

        let outcome = fetch
            .outcome
            .get_or_init(|| async {
                tracing::debug!("Refreshing the cached dataset");
                let result = self.inner.fetch_transactions().await;

                Outcome {
                    fetched_at: Instant::now(),
                    result,
                }
            })
            .await;

        if let Ok(transactions) = &outcome.result {
            tracing::debug!("Serving {} cached transactions", transactions.len());
        }

        outcome.result.clone()
    }
}
