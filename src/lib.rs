//! Core library for the sheet-ingest command line application.
//!
//! Spreadsheet documents exported by regional stock and price systems are
//! turned into ordered record sequences. The modules keep responsibilities
//! narrow: the worksheet model and cell lookup live in [`sheet`], separator
//! disambiguation in [`numeric`], the two row layouts under [`extract`], edit
//! coercion in [`coerce`], IO adapters under [`io`], and the ingestion and
//! edit orchestration in [`service`].

pub mod coerce;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod io;
pub mod model;
pub mod numeric;
pub mod service;
pub mod sheet;

pub use error::{Result, ToolError};
