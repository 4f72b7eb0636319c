//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{dataset::DatasetSource, pagination::PaginationConfig};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// Where the transaction dataset is fetched from on each request.
    pub dataset: Arc<dyn DatasetSource>,

    /// The config that controls how to page transaction listings.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] that serves reports computed from `dataset`.
    pub fn new(dataset: Arc<dyn DatasetSource>, pagination_config: PaginationConfig) -> Self {
        Self {
            dataset,
            pagination_config,
        }
    }
}
