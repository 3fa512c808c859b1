use std::io::Cursor;

use calamine::{DataType, Reader, open_workbook_auto_from_rs};
use tracing::{debug, warn};

use crate::sheet::{Cell, CellAddress, CellValue, Column, Sheet};

/// Reads the first worksheet of an `.xlsx`/`.xls`/`.ods` document held in
/// memory.
///
/// Documents that cannot be opened, or that have no first sheet, yield an
/// empty sheet: extraction over it produces no records.
pub fn read_first_sheet(bytes: &[u8]) -> Sheet {
    let mut workbook = match open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(workbook) => workbook,
        Err(error) => {
            warn!(%error, size = bytes.len(), "document could not be opened");
            return Sheet::new();
        }
    };

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(error)) => {
            warn!(%error, "first sheet could not be read");
            return Sheet::new();
        }
        None => {
            warn!("document has no sheets");
            return Sheet::new();
        }
    };

    let sheet = sheet_from_range(&range);
    debug!(cells = sheet.len(), "first sheet loaded");
    sheet
}

/// Copies the non-empty cells of a calamine range into a [`Sheet`].
pub fn sheet_from_range(range: &calamine::Range<DataType>) -> Sheet {
    let mut sheet = Sheet::new();
    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };

    for (row, col, data) in range.cells() {
        let Some(cell) = to_cell(data) else {
            continue;
        };
        let (Ok(row), Ok(col)) = (u32::try_from(row), u32::try_from(col)) else {
            continue;
        };
        let address = CellAddress::new(
            Column::from_index(start_col.saturating_add(col)),
            start_row.saturating_add(row).saturating_add(1),
        );
        sheet.insert(address, cell);
    }

    sheet
}

fn to_cell(data: &DataType) -> Option<Cell> {
    let (value, text) = match data {
        DataType::Empty => return None,
        DataType::Int(value) => (Some(CellValue::Number(*value as f64)), None),
        DataType::Float(value) | DataType::DateTime(value) => {
            (Some(CellValue::Number(*value)), None)
        }
        DataType::String(value) => (Some(CellValue::Text(value.clone())), None),
        DataType::Bool(value) => (Some(CellValue::Bool(*value)), None),
        DataType::Error(error) => (None, Some(error.to_string())),
        other => (None, Some(other.to_string())),
    };
    Some(Cell { value, text })
}
