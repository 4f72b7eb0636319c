//! The API endpoints URIs.
//!
//! The paths match what the dashboard requests, hence the mix of naming styles.

/// The route for the number of transactions in each price range for a month.
pub const BAR_CHART: &str = "/barchart";
/// The route for the sold and unsold totals for a month.
pub const STATISTICS: &str = "/statistics";
/// The route for searching every transaction.
pub const ALL_TRANSACTIONS: &str = "/allTransactions";
/// The route for searching the transactions in a month.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for checking the server is up.
pub const HEALTH: &str = "/health";
