//! The reports served to the dashboard: a price histogram, sale statistics
//! and searchable transaction listings.

mod aggregation;
mod handlers;
mod query;

pub use aggregation::{
    MonthlyTransactionPage, SaleStatistics, TransactionPage, price_histogram, sale_statistics,
    search_transactions, search_transactions_in_month,
};
pub use handlers::{
    get_all_transactions, get_monthly_transactions, get_price_histogram, get_sale_statistics,
};
