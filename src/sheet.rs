//! In-memory view of a single worksheet.
//!
//! Cells are addressed the way spreadsheet users address them: a column
//! letter sequence (`A`, `B`, ..., `AA`) and a 1-based row number. Only cells
//! that were actually written are stored, so lookups far outside the used
//! area are cheap and simply report absence.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ToolError};

/// Native value resident in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// A written cell. Either part may be missing; a cell holding
/// `Text(String::new())` is still a written cell, unlike an absent one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// Raw value as stored in the document.
    pub value: Option<CellValue>,
    /// Display text, used when no raw value is available.
    pub text: Option<String>,
}

impl Cell {
    pub fn number(value: f64) -> Self {
        Self {
            value: Some(CellValue::Number(value)),
            text: None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(CellValue::Text(value.into())),
            text: None,
        }
    }

    /// Raw value rendered as text, falling back to the display text.
    pub fn as_text(&self) -> String {
        match (&self.value, &self.text) {
            (Some(value), _) => value.to_string(),
            (None, Some(text)) => text.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Zero-based column index, written and parsed as spreadsheet letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column(u32);

impl Column {
    pub const A: Column = Column(0);
    pub const B: Column = Column(1);
    pub const C: Column = Column(2);
    pub const F: Column = Column(5);
    pub const H: Column = Column(7);

    pub const fn from_index(index: u32) -> Self {
        Column(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl FromStr for Column {
    type Err = ToolError;

    fn from_str(letters: &str) -> Result<Self> {
        if letters.is_empty() {
            return Err(ToolError::InvalidAddress(letters.to_string()));
        }
        let mut acc = 0u32;
        for byte in letters.bytes() {
            if !byte.is_ascii_alphabetic() {
                return Err(ToolError::InvalidAddress(letters.to_string()));
            }
            let digit = u32::from(byte.to_ascii_uppercase() - b'A') + 1;
            acc = acc
                .checked_mul(26)
                .and_then(|acc| acc.checked_add(digit))
                .ok_or_else(|| ToolError::InvalidAddress(letters.to_string()))?;
        }
        Ok(Column(acc - 1))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = u64::from(self.0) + 1;
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            letters.push(char::from(b'A' + rem));
            n = (n - 1) / 26;
        }
        letters.iter().rev().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Column plus 1-based row, e.g. `H10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub column: Column,
    pub row: u32,
}

impl CellAddress {
    pub const fn new(column: Column, row: u32) -> Self {
        Self { column, row }
    }
}

impl FromStr for CellAddress {
    type Err = ToolError;

    fn from_str(name: &str) -> Result<Self> {
        let split = name
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| ToolError::InvalidAddress(name.to_string()))?;
        let (letters, digits) = name.split_at(split);
        let column = letters
            .parse::<Column>()
            .map_err(|_| ToolError::InvalidAddress(name.to_string()))?;
        let row = digits
            .parse::<u32>()
            .ok()
            .filter(|row| *row >= 1)
            .ok_or_else(|| ToolError::InvalidAddress(name.to_string()))?;
        Ok(Self { column, row })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Sparse, read-only-after-construction worksheet.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    cells: HashMap<CellAddress, Cell>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cell, replacing any previous content at that address.
    pub fn insert(&mut self, address: CellAddress, cell: Cell) {
        self.cells.insert(address, cell);
    }

    /// Builder form of [`Sheet::insert`] taking an A1-style address, as in
    /// `sheet.with("A1", cell)`.
    pub fn with(mut self, address: &str, cell: Cell) -> Result<Self> {
        self.insert(address.parse()?, cell);
        Ok(self)
    }

    /// Looks up a cell. Never-written addresses, including rows far beyond
    /// the used area, yield `None`.
    pub fn get(&self, column: Column, row: u32) -> Option<&Cell> {
        self.cells.get(&CellAddress::new(column, row))
    }

    /// Trimmed text of a cell, empty when the cell is absent.
    pub fn text_at(&self, column: Column, row: u32) -> String {
        self.get(column, row)
            .map(|cell| cell.as_text().trim().to_string())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
