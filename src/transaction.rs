//! The product transaction record served by the upstream dataset.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use time::{
    Date, Month, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

/// The ID of a transaction in the upstream dataset.
pub type TransactionId = i64;

/// A product listing and whether it sold.
///
/// Transactions are read-only snapshots of the upstream dataset. The field
/// names follow the camelCase names used by the dataset so a transaction
/// round-trips unchanged through the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// The listed price of the product.
    pub price: Price,
    /// Free text describing the product.
    pub description: String,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to an image of the product.
    pub image: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the product was sold (or listed, if it did not sell).
    pub date_of_sale: DateOfSale,
}

impl Transaction {
    /// The calendar month the transaction falls in, regardless of year.
    pub fn month_of_sale(&self) -> Month {
        self.date_of_sale.date().month()
    }

    /// Whether the title, description or price contains `needle`.
    ///
    /// `needle` must already be lowercase. The title and description are
    /// compared case-insensitively, the price is compared in its shortest
    /// decimal form, e.g. "150" or "329.85".
    pub(crate) fn contains_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.price.as_f64().to_string().contains(needle)
    }
}

/// A price as it appears in the dataset.
///
/// The number is kept in its original form, so `150` is not echoed back as
/// `150.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    number: Number,
    value: f64,
}

impl Price {
    /// Create a price from a float. Whole numbers are stored as integers.
    ///
    /// Returns `None` if `value` is infinite or NaN.
    pub fn from_f64(value: f64) -> Option<Self> {
        let number = if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Number::from(value as i64)
        } else {
            Number::from_f64(value)?
        };

        Some(Self { number, value })
    }

    /// The price as a float, for bucketing, sums and search.
    pub fn as_f64(&self) -> f64 {
        self.value
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = Number::deserialize(deserializer)?;
        let value = number
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price {number}")))?;

        Ok(Self { number, value })
    }
}

/// The timestamp of a sale as it appears in the dataset.
///
/// Only the calendar date is interpreted, the original string is kept so it
/// can be echoed back to clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOfSale {
    raw: String,
    date: Date,
}

impl DateOfSale {
    /// Parse an RFC 3339 timestamp, e.g. "2021-11-27T20:29:54+05:30", or a
    /// plain date, e.g. "2021-11-27".
    ///
    /// The date of a timestamp is taken in the timestamp's own UTC offset.
    ///
    /// # Errors
    /// Returns an error if `raw` is neither an RFC 3339 timestamp nor a date.
    pub fn parse(raw: &str) -> Result<Self, time::error::Parse> {
        let date = match OffsetDateTime::parse(raw, &Rfc3339) {
            Ok(date_time) => date_time.date(),
            Err(_) => Date::parse(raw, format_description!("[year]-[month]-[day]"))?,
        };

        Ok(Self {
            raw: raw.to_owned(),
            date,
        })
    }

    /// The calendar date of the sale.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The timestamp exactly as it appeared in the dataset.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Serialize for DateOfSale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DateOfSale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        DateOfSale::parse(&raw).map_err(serde::de::Error::custom)
    }
}
