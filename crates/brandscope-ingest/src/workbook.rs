use std::io::Cursor;

use brandscope_core::brands::BrandResolver;
use brandscope_core::dataset::{Dataset, DatasetBuilder};
use calamine::{open_workbook_auto_from_rs, Reader};

use crate::error::IngestError;
use crate::sheet::{parse_sheet, SheetGrid, SkipReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSheet {
    pub sheet: String,
    pub reason: SkipReason,
}

/// A parsed dataset plus the sheets that were dropped on the way.
#[derive(Debug, Clone)]
pub struct ParsedWorkbook {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedSheet>,
}

/// Parse raw workbook bytes (xlsx, xls or ods).
///
/// # Errors
///
/// Returns [`IngestError::Workbook`] if the bytes are not a readable
/// workbook, or [`IngestError::InvalidFormat`] if no sheet is usable.
pub fn parse_workbook(
    bytes: &[u8],
    file_name: &str,
    resolver: &BrandResolver,
) -> Result<ParsedWorkbook, IngestError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Workbook {
            file_name: file_name.to_string(),
            source: e,
        })?;

    let sheets: Vec<(String, Result<SheetGrid, String>)> = workbook
        .sheet_names()
        .into_iter()
        .map(|name| {
            let grid = workbook
                .worksheet_range(&name)
                .map(|range| SheetGrid::from(&range))
                .map_err(|e| e.to_string());
            (name, grid)
        })
        .collect();

    assemble(file_name, sheets, resolver)
}

/// Build a dataset from already-loaded sheet grids, in sheet order.
///
/// # Errors
///
/// Returns [`IngestError::InvalidFormat`] when every sheet is skipped.
pub fn assemble<I>(
    file_name: &str,
    sheets: I,
    resolver: &BrandResolver,
) -> Result<ParsedWorkbook, IngestError>
where
    I: IntoIterator<Item = (String, Result<SheetGrid, String>)>,
{
    let mut builder = DatasetBuilder::new(file_name);
    let mut skipped = Vec::new();

    for (name, grid) in sheets {
        let parsed = grid
            .map_err(SkipReason::Unreadable)
            .and_then(|grid| parse_sheet(&name, &grid, resolver));

        match parsed {
            Ok(sheet) => {
                builder.segment(name.clone());
                for row in sheet.rows {
                    builder.brand(&name, row.brand, row.record, row.images);
                }
            }
            Err(reason) => {
                tracing::warn!(file = %file_name, sheet = %name, reason = %reason, "skipping sheet");
                skipped.push(SkippedSheet {
                    sheet: name,
                    reason,
                });
            }
        }
    }

    if builder.is_empty() {
        return Err(IngestError::InvalidFormat);
    }

    Ok(ParsedWorkbook {
        dataset: builder.build(),
        skipped,
    })
}
