use tracing::{debug, info, warn};

use crate::extract::ScanLimits;
use crate::model::PriceRecord;
use crate::numeric::normalize_cell;
use crate::sheet::{Column, Sheet};

/// Consecutive empty rows that end a price scan.
pub const BLANK_RUN_LIMIT: u32 = 5;

const CODE: Column = Column::A;
const PRICE: Column = Column::B;

/// Vertical distance between a code in column A and its price in column B.
///
/// Starts undetermined and is fixed by the first row whose price resolves;
/// from then on it never changes for the rest of the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOffset(Option<u32>);

impl ParseOffset {
    const CANDIDATES: [u32; 2] = [0, 1];

    pub fn get(self) -> Option<u32> {
        self.0
    }

    /// Price for the code at `row`, fixing the offset on the first hit.
    fn resolve(&mut self, sheet: &Sheet, row: u32) -> Option<f64> {
        if let Some(offset) = self.0 {
            return normalize_cell(sheet.get(PRICE, row.saturating_add(offset)));
        }
        for candidate in Self::CANDIDATES {
            if let Some(price) = normalize_cell(sheet.get(PRICE, row.saturating_add(candidate))) {
                debug!(offset = candidate, row, "price offset detected");
                self.0 = Some(candidate);
                return Some(price);
            }
        }
        None
    }
}

/// Reads `(code, price)` pairs with codes in column A and prices in column B,
/// either on the same row or one row further down.
///
/// A row counts when it has a code or a resolvable price; five consecutive
/// rows with neither end the scan.
pub fn extract_prices(sheet: &Sheet, limits: ScanLimits) -> Vec<PriceRecord> {
    let mut offset = ParseOffset::default();
    let mut records = Vec::new();
    let mut blank_run = 0;

    for row in 1..=limits.max_row {
        let code = sheet.text_at(CODE, row);
        let price = offset.resolve(sheet, row);

        if code.is_empty() && price.is_none() {
            blank_run += 1;
            if blank_run >= BLANK_RUN_LIMIT {
                info!(
                    records = records.len(),
                    offset = ?offset.get(),
                    last_row = row - BLANK_RUN_LIMIT,
                    "price scan finished"
                );
                return records;
            }
            continue;
        }

        blank_run = 0;
        records.push(PriceRecord { code, price });
    }

    warn!(
        records = records.len(),
        max_row = limits.max_row,
        "price scan stopped at row cap without a blank run"
    );
    records
}
