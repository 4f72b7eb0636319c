//! Aggregates the transaction dataset into the views shown on the dashboard.
//!
//! Every function here is a pure function of the dataset snapshot and the
//! request parameters. Filtering keeps the relative order of the dataset.

use serde::Serialize;
use time::Month;

use crate::{
    Error, month::resolve_month, pagination::PageRequest, price_range::PriceHistogram,
    transaction::Transaction,
};

/// Sold and unsold totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The month name exactly as the client supplied it.
    pub month: String,
    /// The sum of the prices of the sold transactions.
    pub total_sale_amount: f64,
    /// The number of sold transactions.
    pub total_sold_items: u64,
    /// The number of transactions that did not sell.
    pub total_not_sold_items: u64,
}

/// One page of search results across the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of transactions on a page.
    pub per_page: u64,
    /// The number of transactions that matched the search, across all pages.
    pub total: u64,
    /// The number of pages needed to show every match.
    pub total_pages: u64,
    /// The matching transactions on this page.
    pub data: Vec<Transaction>,
}

/// One page of search results within a single month.
///
/// Unlike [TransactionPage] this does not report the number of pages, the
/// dashboard's monthly table works it out from `total` and `per_page`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTransactionPage {
    /// The matching transactions on this page.
    pub data: Vec<Transaction>,
    /// The number of transactions that matched, across all pages.
    pub total: u64,
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of transactions on a page.
    pub per_page: u64,
}

/// Resolve a month parameter that a report cannot be computed without.
///
/// # Errors
/// Returns [Error::MissingParameter] if `month` is absent or empty, or
/// [Error::InvalidMonth] if it is not the name of a month.
pub(crate) fn required_month(month: Option<&str>) -> Result<Month, Error> {
    let name = month
        .filter(|name| !name.is_empty())
        .ok_or(Error::MissingParameter("month"))?;

    resolve_month(name).ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

fn sold_in(month: Month) -> impl Fn(&&Transaction) -> bool {
    move |transaction: &&Transaction| transaction.month_of_sale() == month
}

/// Count the transactions sold in `month` by price range.
///
/// Every price range is present in the result, including those with no
/// transactions. The year of the sale is ignored.
///
/// # Errors
/// Returns [Error::MissingParameter] or [Error::InvalidMonth] if `month` does
/// not name a month.
pub fn price_histogram(
    transactions: &[Transaction],
    month: Option<&str>,
) -> Result<PriceHistogram, Error> {
    let month = required_month(month)?;
    let mut histogram = PriceHistogram::new();

    for transaction in transactions.iter().filter(sold_in(month)) {
        histogram.add(transaction.price.as_f64());
    }

    Ok(histogram)
}

/// Total the sold and unsold transactions in `month`.
///
/// # Errors
/// Returns [Error::MissingParameter] or [Error::InvalidMonth] if `month` does
/// not name a month.
pub fn sale_statistics(
    transactions: &[Transaction],
    month: Option<&str>,
) -> Result<SaleStatistics, Error> {
    let resolved_month = required_month(month)?;
    let mut statistics = SaleStatistics {
        month: month.unwrap_or_default().to_owned(),
        total_sale_amount: 0.0,
        total_sold_items: 0,
        total_not_sold_items: 0,
    };

    for transaction in transactions.iter().filter(sold_in(resolved_month)) {
        if transaction.sold {
            statistics.total_sale_amount += transaction.price.as_f64();
            statistics.total_sold_items += 1;
        } else {
            statistics.total_not_sold_items += 1;
        }
    }

    Ok(statistics)
}

/// Search the whole dataset and return one page of the matches.
///
/// A transaction matches if its title, description or price contains
/// `search`, ignoring case. An empty `search` matches every transaction.
pub fn search_transactions(
    transactions: &[Transaction],
    search: &str,
    page: PageRequest,
) -> TransactionPage {
    let needle = search.to_lowercase();
    let matches: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.contains_text(&needle))
        .collect();

    TransactionPage {
        page: page.page(),
        per_page: page.per_page(),
        total: matches.len() as u64,
        total_pages: page.page_count(matches.len()),
        data: page.window(&matches).iter().map(|&t| t.clone()).collect(),
    }
}

/// Search the transactions sold in `month` and return one page of the matches.
///
/// An absent or unrecognised `month` matches no transactions rather than
/// failing. The search is only applied when `search` is non-empty and
/// matches the same way as [search_transactions].
pub fn search_transactions_in_month(
    transactions: &[Transaction],
    search: Option<&str>,
    month: Option<&str>,
    page: PageRequest,
) -> MonthlyTransactionPage {
    let month = month.and_then(resolve_month);
    let needle = search
        .filter(|search| !search.is_empty())
        .map(str::to_lowercase);

    let matches: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| month.is_some_and(|month| transaction.month_of_sale() == month))
        .filter(|transaction| {
            needle
                .as_deref()
                .is_none_or(|needle| transaction.contains_text(needle))
        })
        .collect();

    MonthlyTransactionPage {
        data: page.window(&matches).iter().map(|&t| t.clone()).collect(),
        total: matches.len() as u64,
        page: page.page(),
        per_page: page.per_page(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        pagination::PageRequest,
        price_range::PriceRange,
        test_utils::{create_test_transaction, shirt_and_mug_dataset},
        transaction::Transaction,
    };

    use super::{
        price_histogram, sale_statistics, search_transactions, search_transactions_in_month,
    };

    fn mixed_year_dataset() -> Vec<Transaction> {
        vec![
            create_test_transaction(1, "Backpack", 109.95, false, "2021-11-27T20:29:54+05:30"),
            create_test_transaction(2, "Shirt", 22.3, true, "2022-03-05T10:00:00+00:00"),
            create_test_transaction(3, "Jacket", 55.99, true, "2021-03-27T20:29:54+05:30"),
            create_test_transaction(4, "Ring", 999.99, true, "2022-03-01"),
            create_test_transaction(5, "Monitor", 599.0, false, "2021-03-14"),
            create_test_transaction(6, "Drive", 64.0, true, "2021-07-04"),
            create_test_transaction(7, "Slim Shirt", 100.0, false, "2022-03-20"),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<i64> {
        transactions.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn histogram_counts_month_by_price_range() {
        let histogram = price_histogram(&shirt_and_mug_dataset(), Some("March")).unwrap();

        assert_eq!(histogram.count(PriceRange::UpTo200), 1);
        assert_eq!(histogram.count(PriceRange::UpTo700), 1);
        assert_eq!(histogram.total(), 2);
        for (range, count) in histogram.iter() {
            if range != PriceRange::UpTo200 && range != PriceRange::UpTo700 {
                assert_eq!(count, 0, "{}", range.label());
            }
        }
    }

    #[test]
    fn histogram_ignores_year_and_other_months() {
        let histogram = price_histogram(&mixed_year_dataset(), Some("march")).unwrap();

        assert_eq!(histogram.total(), 5);
        assert_eq!(histogram.count(PriceRange::UpTo100), 3);
        assert_eq!(histogram.count(PriceRange::UpTo600), 1);
        assert_eq!(histogram.count(PriceRange::Above900), 1);
    }

    #[test]
    fn histogram_for_month_without_sales_is_all_zero() {
        let histogram = price_histogram(&shirt_and_mug_dataset(), Some("December")).unwrap();

        assert_eq!(histogram.iter().count(), 10);
        assert_eq!(histogram.total(), 0);
    }

    #[test]
    fn histogram_requires_valid_month() {
        assert_eq!(
            price_histogram(&shirt_and_mug_dataset(), Some("Foo")),
            Err(Error::InvalidMonth("Foo".to_owned()))
        );
        assert_eq!(
            price_histogram(&shirt_and_mug_dataset(), None),
            Err(Error::MissingParameter("month"))
        );
        assert_eq!(
            price_histogram(&shirt_and_mug_dataset(), Some("")),
            Err(Error::MissingParameter("month"))
        );
    }

    #[test]
    fn statistics_for_shirt_and_mug() {
        let statistics = sale_statistics(&shirt_and_mug_dataset(), Some("March")).unwrap();

        assert_eq!(statistics.month, "March");
        assert_eq!(statistics.total_sale_amount, 150.0);
        assert_eq!(statistics.total_sold_items, 1);
        assert_eq!(statistics.total_not_sold_items, 1);
    }

    #[test]
    fn statistics_echo_month_as_supplied() {
        let statistics = sale_statistics(&shirt_and_mug_dataset(), Some("mArCh")).unwrap();

        assert_eq!(statistics.month, "mArCh");
    }

    #[test]
    fn statistics_partition_month_into_sold_and_unsold() {
        let dataset = mixed_year_dataset();

        let statistics = sale_statistics(&dataset, Some("March")).unwrap();

        let in_march = dataset
            .iter()
            .filter(|transaction| transaction.month_of_sale() == time::Month::March)
            .count() as u64;
        assert_eq!(
            statistics.total_sold_items + statistics.total_not_sold_items,
            in_march
        );
        assert_eq!(statistics.total_sold_items, 3);
        assert!((statistics.total_sale_amount - (22.3 + 55.99 + 999.99)).abs() < 1e-9);
    }

    #[test]
    fn statistics_require_valid_month() {
        assert_eq!(
            sale_statistics(&shirt_and_mug_dataset(), Some("Marchember")),
            Err(Error::InvalidMonth("Marchember".to_owned()))
        );
        assert_eq!(
            sale_statistics(&shirt_and_mug_dataset(), None),
            Err(Error::MissingParameter("month"))
        );
    }

    #[test]
    fn search_matches_title_ignoring_case() {
        let page = search_transactions(
            &shirt_and_mug_dataset(),
            "shirt",
            PageRequest::new(1, 10).unwrap(),
        );

        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(ids(&page.data), [1]);
    }

    #[test]
    fn search_matches_description_and_price() {
        let dataset = mixed_year_dataset();
        let page_request = PageRequest::new(1, 10).unwrap();

        let by_description = search_transactions(&dataset, "A RING FOR", page_request);
        let by_price = search_transactions(&dataset, "99", page_request);

        assert_eq!(ids(&by_description.data), [4]);
        assert_eq!(ids(&by_price.data), [3, 4, 5]);
    }

    #[test]
    fn empty_search_matches_everything() {
        let dataset = mixed_year_dataset();

        let page = search_transactions(&dataset, "", PageRequest::new(1, 10).unwrap());

        assert_eq!(page.total, 7);
        assert_eq!(ids(&page.data), ids(&dataset));
    }

    #[test]
    fn search_without_matches() {
        let page = search_transactions(
            &shirt_and_mug_dataset(),
            "teapot",
            PageRequest::new(1, 10).unwrap(),
        );

        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn search_pages_reconstruct_matches() {
        let dataset = mixed_year_dataset();
        let per_page = 3;
        let first = search_transactions(&dataset, "", PageRequest::new(1, per_page).unwrap());

        let all_pages: Vec<i64> = (1..=first.total_pages)
            .flat_map(|page| {
                let page = search_transactions(
                    &dataset,
                    "",
                    PageRequest::new(page, per_page).unwrap(),
                );
                ids(&page.data)
            })
            .collect();

        assert_eq!(first.total_pages, 3);
        assert_eq!(all_pages, ids(&dataset));
    }

    #[test]
    fn search_page_past_end_is_empty() {
        let page = search_transactions(
            &shirt_and_mug_dataset(),
            "",
            PageRequest::new(5, 10).unwrap(),
        );

        assert_eq!(page.page, 5);
        assert_eq!(page.total, 2);
        assert!(page.data.is_empty());
    }

    #[test]
    fn month_search_filters_by_month_then_text() {
        let dataset = mixed_year_dataset();
        let page_request = PageRequest::new(1, 10).unwrap();

        let all_march = search_transactions_in_month(&dataset, None, Some("March"), page_request);
        let march_shirts =
            search_transactions_in_month(&dataset, Some("SHIRT"), Some("March"), page_request);

        assert_eq!(ids(&all_march.data), [2, 3, 4, 5, 7]);
        assert_eq!(all_march.total, 5);
        assert_eq!(ids(&march_shirts.data), [2, 7]);
        assert_eq!(march_shirts.total, 2);
    }

    #[test]
    fn month_search_with_empty_search_passes_month_through() {
        let dataset = mixed_year_dataset();

        let page = search_transactions_in_month(
            &dataset,
            Some(""),
            Some("november"),
            PageRequest::new(1, 10).unwrap(),
        );

        assert_eq!(ids(&page.data), [1]);
    }

    #[test]
    fn month_search_with_unknown_or_missing_month_is_empty() {
        let dataset = mixed_year_dataset();
        let page_request = PageRequest::new(1, 10).unwrap();

        let unknown =
            search_transactions_in_month(&dataset, Some("shirt"), Some("Foo"), page_request);
        let missing = search_transactions_in_month(&dataset, None, None, page_request);

        assert_eq!(unknown.total, 0);
        assert!(unknown.data.is_empty());
        assert_eq!(missing.total, 0);
    }

    #[test]
    fn month_search_paginates() {
        let dataset = mixed_year_dataset();

        let page = search_transactions_in_month(
            &dataset,
            None,
            Some("March"),
            PageRequest::new(2, 2).unwrap(),
        );

        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.total, 5);
        assert_eq!(ids(&page.data), [4, 5]);
    }

    #[test]
    fn month_page_serializes_without_page_count() {
        let page = search_transactions_in_month(
            &shirt_and_mug_dataset(),
            None,
            Some("March"),
            PageRequest::new(1, 10).unwrap(),
        );

        let json = serde_json::to_value(&page).unwrap();

        assert!(json.get("totalPages").is_none());
        assert_eq!(json["perPage"], 10);
        assert_eq!(json["total"], 2);
    }
}
