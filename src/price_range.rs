//! Price ranges used for the price histogram.

use serde::{Serialize, Serializer, ser::SerializeMap};

/// One of the fixed price intervals reported in the histogram.
///
/// Upper bounds are inclusive, so a price of exactly 100 is in
/// [PriceRange::UpTo100] rather than [PriceRange::UpTo200].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceRange {
    /// 0 to 100.
    UpTo100,
    /// 101 to 200.
    UpTo200,
    /// 201 to 300.
    UpTo300,
    /// 301 to 400.
    UpTo400,
    /// 401 to 500.
    UpTo500,
    /// 501 to 600.
    UpTo600,
    /// 601 to 700.
    UpTo700,
    /// 701 to 800.
    UpTo800,
    /// 801 to 900.
    UpTo900,
    /// Anything over 900.
    Above900,
}

impl PriceRange {
    /// Every price range in ascending order.
    pub const ALL: [PriceRange; 10] = [
        PriceRange::UpTo100,
        PriceRange::UpTo200,
        PriceRange::UpTo300,
        PriceRange::UpTo400,
        PriceRange::UpTo500,
        PriceRange::UpTo600,
        PriceRange::UpTo700,
        PriceRange::UpTo800,
        PriceRange::UpTo900,
        PriceRange::Above900,
    ];

    /// Get the price range that `price` falls in.
    pub fn from_price(price: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|range| range.upper_bound().is_some_and(|bound| price <= bound))
            .unwrap_or(PriceRange::Above900)
    }

    /// The inclusive upper bound of the range, `None` for the open-ended range.
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            PriceRange::UpTo100 => Some(100.0),
            PriceRange::UpTo200 => Some(200.0),
            PriceRange::UpTo300 => Some(300.0),
            PriceRange::UpTo400 => Some(400.0),
            PriceRange::UpTo500 => Some(500.0),
            PriceRange::UpTo600 => Some(600.0),
            PriceRange::UpTo700 => Some(700.0),
            PriceRange::UpTo800 => Some(800.0),
            PriceRange::UpTo900 => Some(900.0),
            PriceRange::Above900 => None,
        }
    }

    /// The label shown on the dashboard's bar chart.
    pub fn label(self) -> &'static str {
        match self {
            PriceRange::UpTo100 => "0-100",
            PriceRange::UpTo200 => "101-200",
            PriceRange::UpTo300 => "201-300",
            PriceRange::UpTo400 => "301-400",
            PriceRange::UpTo500 => "401-500",
            PriceRange::UpTo600 => "501-600",
            PriceRange::UpTo700 => "601-700",
            PriceRange::UpTo800 => "701-800",
            PriceRange::UpTo900 => "801-900",
            PriceRange::Above900 => "901-above",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

/// The number of transactions in each price range.
///
/// Serializes as a JSON object with every label in ascending order, including
/// ranges with a count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceHistogram {
    counts: [u64; PriceRange::ALL.len()],
}

impl PriceHistogram {
    /// Create a histogram with every count set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more transaction with `price`.
    pub fn add(&mut self, price: f64) {
        self.counts[PriceRange::from_price(price).position()] += 1;
    }

    /// The number of transactions counted in `range`.
    pub fn count(&self, range: PriceRange) -> u64 {
        self.counts[range.position()]
    }

    /// The number of transactions counted across all ranges.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterate over each range and its count in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (PriceRange, u64)> + '_ {
        PriceRange::ALL
            .into_iter()
            .map(|range| (range, self.count(range)))
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PriceRange::ALL.len()))?;

        for (range, count) in self.iter() {
            map.serialize_entry(range.label(), &count)?;
        }

        map.end()
    }
}
