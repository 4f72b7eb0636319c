//! Resolves month names from query strings.

use time::Month;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Get the calendar month with the full English name `name`, ignoring case.
///
/// Abbreviations ("Mar") and numbers ("3") are not accepted.
/// Returns `None` if `name` is not the name of a month.
pub fn resolve_month(name: &str) -> Option<Month> {
    MONTHS
        .into_iter()
        .find(|month| month.to_string().eq_ignore_ascii_case(name))
}

/// The zero-based index of `month`, i.e. January is 0 and December is 11.
pub fn month_index(month: Month) -> u8 {
    month as u8 - 1
}
