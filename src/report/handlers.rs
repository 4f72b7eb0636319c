//! Route handlers for the report endpoints.
//!
//! Each handler validates the query string, fetches a fresh snapshot of the
//! dataset and returns the computed view as JSON. Required parameters are
//! checked before the dataset is fetched so bad requests never reach the
//! upstream source.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State},
};

use crate::{
    AppState, Error,
    dataset::DatasetSource,
    pagination::PaginationConfig,
    price_range::PriceHistogram,
    report::{
        aggregation::{
            MonthlyTransactionPage, SaleStatistics, TransactionPage, price_histogram,
            required_month, sale_statistics, search_transactions, search_transactions_in_month,
        },
        query::ReportQuery,
    },
};

/// The state needed for the report endpoints.
#[derive(Clone)]
pub struct ReportState {
    /// Where the transactions are fetched from.
    pub dataset: Arc<dyn DatasetSource>,
    /// The config that controls default page sizes.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            dataset: state.dataset.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Get the number of transactions in each price range for a month.
pub async fn get_price_histogram(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PriceHistogram>, Error> {
    required_month(query.month.as_deref())?;

    let transactions = state.dataset.fetch_transactions().await?;

    price_histogram(&transactions, query.month.as_deref()).map(Json)
}

/// Get the sold and unsold totals for a month.
pub async fn get_sale_statistics(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SaleStatistics>, Error> {
    required_month(query.month.as_deref())?;

    let transactions = state.dataset.fetch_transactions().await?;

    sale_statistics(&transactions, query.month.as_deref()).map(Json)
}

/// Search every transaction and get one page of the results.
pub async fn get_all_transactions(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<TransactionPage>, Error> {
    let page_request = query.page_request(&state.pagination_config)?;

    let transactions = state.dataset.fetch_transactions().await?;

    Ok(Json(search_transactions(
        &transactions,
        query.search.as_deref().unwrap_or_default(),
        page_request,
    )))
}

/// Search the transactions in a month and get one page of the results.
pub async fn get_monthly_transactions(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<MonthlyTransactionPage>, Error> {
    let page_request = query.page_request(&state.pagination_config)?;

    let transactions = state.dataset.fetch_transactions().await?;

    Ok(Json(search_transactions_in_month(
        &transactions,
        query.search.as_deref(),
        query.month.as_deref(),
        page_request,
    )))
}
