//! Row extractors turning the first sheet of a document into records.
//!
//! Both scans are bounded by [`ScanLimits::max_row`] in addition to their
//! blank-row termination rules, so a corrupt document can never keep a scan
//! running forever.

pub mod price;
pub mod stock;

pub use price::extract_prices;
pub use stock::extract_stock;

/// Last row either extractor will ever read.
pub const DEFAULT_MAX_ROW: u32 = 200_000;

/// Hard bounds applied to every scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Highest 1-based row inspected; rows beyond it are never read.
    pub max_row: u32,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_row: DEFAULT_MAX_ROW,
        }
    }
}
