//! Product Reports is a small reporting backend for a product sales dashboard.
//!
//! The server fetches a fixed JSON dataset of product transactions from a
//! remote source and serves aggregates derived from it: a price range
//! histogram, sold/unsold statistics, and searchable, paginated listings.
//!
//! Nothing is stored locally. Each request fetches the dataset, computes its
//! view in memory and discards the snapshot once the response is produced.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod dataset;
mod endpoints;
mod logging;
mod month;
mod not_found;
mod pagination;
mod price_range;
mod report;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dataset::{CachedDatasetSource, DatasetSource, HttpDatasetSource};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{month_index, resolve_month};
pub use pagination::{PageRequest, PaginationConfig};
pub use price_range::{PriceHistogram, PriceRange};
pub use report::{
    MonthlyTransactionPage, SaleStatistics, TransactionPage, price_histogram, sale_statistics,
    search_transactions, search_transactions_in_month,
};
pub use routing::build_router;
pub use transaction::{DateOfSale, Price, Transaction, TransactionId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// A query parameter that the requested report cannot be computed without
    /// was absent or empty.
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// The month name did not match any of the twelve calendar months.
    ///
    /// Month names are matched case-insensitively against the full English
    /// name, e.g. "march" or "March", but not "Mar" or "3".
    #[error("invalid month value \"{0}\"")]
    InvalidMonth(String),

    /// A numeric query parameter could not be parsed as a positive integer.
    #[error("invalid value \"{value}\" for {name}, expected a positive integer")]
    InvalidParameter {
        /// The name of the query parameter.
        name: &'static str,
        /// The raw value as it appeared in the query string.
        value: String,
    },

    /// The transaction dataset could not be fetched from the upstream source.
    ///
    /// This covers network errors, non-2xx responses and bodies that do not
    /// match the transaction schema. The error string should only be logged
    /// on the server, the client only sees a generic internal server error.
    #[error("could not fetch the transaction dataset: {0}")]
    UpstreamFetch(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::UpstreamFetch(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::MissingParameter(_)
            | Error::InvalidMonth(_)
            | Error::InvalidParameter { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            // Upstream details are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
