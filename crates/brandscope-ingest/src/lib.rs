//! Workbook ingestion: turns survey spreadsheets into [`Dataset`]s.
//!
//! [`Dataset`]: brandscope_core::dataset::Dataset

pub mod cell;
pub mod error;
pub mod loader;
pub mod sheet;
pub mod workbook;

pub use cell::Cell;
pub use error::IngestError;
pub use loader::{load_workbook, load_workbooks};
pub use sheet::{parse_sheet, SheetGrid, SkipReason};
pub use workbook::{assemble, parse_workbook, ParsedWorkbook, SkippedSheet};
