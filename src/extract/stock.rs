use tracing::{info, warn};

use crate::extract::ScanLimits;
use crate::model::StockRecord;
use crate::sheet::{Column, Sheet};

/// First data row of a stock sheet; rows above it hold the report header.
pub const STOCK_START_ROW: u32 = 10;

const CODE: Column = Column::A;
const DESCRIPTION: Column = Column::C;
const CATEGORY: Column = Column::F;
const STOCK: Column = Column::H;

/// Reads inventory lines from the fixed A/C/F/H layout starting at row 10.
///
/// The scan ends at the first row whose four cells are all empty; that row is
/// not part of the output.
pub fn extract_stock(sheet: &Sheet, limits: ScanLimits) -> Vec<StockRecord> {
    let mut records = Vec::new();

    for row in STOCK_START_ROW..=limits.max_row {
        let record = StockRecord {
            code: sheet.text_at(CODE, row),
            description: sheet.text_at(DESCRIPTION, row),
            category: sheet.text_at(CATEGORY, row),
            stock: sheet.text_at(STOCK, row),
        };
        if record.is_blank() {
            info!(records = records.len(), last_row = row - 1, "stock scan finished");
            return records;
        }
        records.push(record);
    }

    if limits.max_row >= STOCK_START_ROW {
        warn!(
            records = records.len(),
            max_row = limits.max_row,
            "stock scan stopped at row cap without a blank row"
        );
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Cell;

    fn stock_row(sheet: Sheet, row: u32, code: &str, stock: Cell) -> Sheet {
        sheet
            .with(&format!("A{row}"), Cell::text(code))
            .and_then(|s| s.with(&format!("C{row}"), Cell::text(format!(" item {code} "))))
            .and_then(|s| s.with(&format!("F{row}"), Cell::text("Cubiertas")))
            .and_then(|s| s.with(&format!("H{row}"), stock))
            .expect("valid addresses")
    }

    #[test]
    fn reads_rows_until_first_blank_row() {
        let mut sheet = Sheet::new()
            .with("A1", Cell::text("Listado de stock"))
            .expect("address");
        sheet = stock_row(sheet, 10, "P-100", Cell::number(12.0));
        sheet = stock_row(sheet, 11, "P-101", Cell::text(" 3 (2 reservados) "));
        sheet = stock_row(sheet, 12, "P-100", Cell::number(0.5));
        sheet = stock_row(sheet, 14, "P-200", Cell::number(1.0));

        let records = extract_stock(&sheet, ScanLimits::default());

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            StockRecord {
                code: "P-100".into(),
                description: "item P-100".into(),
                category: "Cubiertas".into(),
                stock: "12".into(),
            }
        );
        assert_eq!(records[1].stock, "3 (2 reservados)");
        assert_eq!(records[2].code, "P-100");
        assert_eq!(records[2].stock, "0.5");
    }

    #[test]
    fn partially_filled_row_does_not_terminate() {
        let sheet = Sheet::new()
            .with("A10", Cell::text("X1"))
            .and_then(|s| s.with("H11", Cell::number(4.0)))
            .and_then(|s| s.with("A12", Cell::text("   ")))
            .expect("addresses");

        let records = extract_stock(&sheet, ScanLimits::default());

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].code, "");
        assert_eq!(records[1].stock, "4");
    }

    #[test]
    fn empty_sheet_yields_nothing() {
        assert!(extract_stock(&Sheet::new(), ScanLimits::default()).is_empty());
    }

    #[test]
    fn cap_below_start_row_reads_nothing() {
        let sheet = stock_row(Sheet::new(), STOCK_START_ROW, "P-1", Cell::number(1.0));

        assert!(extract_stock(&sheet, ScanLimits { max_row: 5 }).is_empty());
    }

    #[test]
    fn stops_at_row_cap() {
        let mut sheet = Sheet::new();
        for row in STOCK_START_ROW..60 {
            sheet = stock_row(sheet, row, &format!("C{row}"), Cell::number(1.0));
        }

        let records = extract_stock(&sheet, ScanLimits { max_row: 25 });

        assert_eq!(records.len(), 16);
        assert_eq!(records.last().map(|r| r.code.as_str()), Some("C25"));
    }
}
