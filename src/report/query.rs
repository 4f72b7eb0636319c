//! Query string parameters shared by the report endpoints.

use serde::Deserialize;

use crate::{
    Error,
    pagination::{PageRequest, PaginationConfig},
};

/// The raw query parameters of a report request.
///
/// Every parameter arrives as an optional string, numeric parameters are
/// parsed and validated by [ReportQuery::page_request].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Text to search titles, descriptions and prices for.
    pub search: Option<String>,
    /// The full name of a month, e.g. "March".
    pub month: Option<String>,
    /// The 1-based page number.
    pub page: Option<String>,
    /// The maximum number of transactions per page.
    pub per_page: Option<String>,
}

impl ReportQuery {
    /// Get the requested page, falling back to the defaults in `config` for
    /// absent or empty parameters.
    ///
    /// # Errors
    /// Returns [Error::InvalidParameter] if `page` or `perPage` is not a
    /// positive integer.
    pub(crate) fn page_request(&self, config: &PaginationConfig) -> Result<PageRequest, Error> {
        let page = parse_or_default("page", self.page.as_deref(), config.default_page)?;
        let per_page = parse_or_default(
            "perPage",
            self.per_page.as_deref(),
            config.default_page_size,
        )?;

        PageRequest::new(page, per_page)
    }
}

/// Parse a positive integer, reporting `value` as it was sent if it is not one.
fn parse_or_default(name: &'static str, value: Option<&str>, default: u64) -> Result<u64, Error> {
    match value {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .ok()
            .filter(|&parsed: &u64| parsed > 0)
            .ok_or_else(|| Error::InvalidParameter {
                name,
                value: value.to_owned(),
            }),
    }
}
