//! Single-sheet parsing over an in-memory cell grid.
//!
//! Layout: row 0 holds coarse categories, row 1 the item names that mark
//! brand-image columns, row 2 the canonical metric headers, and rows from 3
//! on hold one brand each with its label in column D.

use std::collections::HashMap;

use brandscope_core::archetype::derive_profile;
use brandscope_core::brands::BrandResolver;
use brandscope_core::dataset::{BrandImageMap, BrandRecord};
use brandscope_core::labels::{is_blocklisted_item, metric_for_header, BRAND_IMAGE_KEYWORD};
use brandscope_core::metrics::{MetricFamily, MetricKey};

use crate::cell::Cell;

pub const ITEM_ROW: usize = 1;
pub const HEADER_ROW: usize = 2;
pub const DATA_START_ROW: usize = 3;
pub const BRAND_COLUMN: usize = 3;
pub const MIN_ROWS: usize = 4;

static EMPTY: Cell = Cell::Empty;

/// Rectangular-ish grid of cells addressed by absolute sheet coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    #[must_use]
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row(&self, idx: usize) -> &[Cell] {
        self.rows.get(idx).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.row(row).get(col).unwrap_or(&EMPTY)
    }
}

impl From<&calamine::Range<calamine::Data>> for SheetGrid {
    /// Pads leading rows and columns so a range that does not start at A1
    /// keeps its absolute coordinates.
    fn from(range: &calamine::Range<calamine::Data>) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return Self::default();
        };

        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; start_col as usize];
            cells.extend(row.iter().map(Cell::from));
            rows.push(cells);
        }
        Self { rows }
    }
}

/// Why a sheet contributed nothing to the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewRows { rows: usize },
    NoFunnelHeader,
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewRows { rows } => {
                write!(f, "only {rows} rows, need at least {MIN_ROWS}")
            }
            SkipReason::NoFunnelHeader => write!(f, "no funnel header on row 3"),
            SkipReason::Unreadable(reason) => write!(f, "unreadable: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub brand: String,
    pub record: BrandRecord,
    pub images: BrandImageMap,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    pub rows: Vec<ParsedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ImageColumn {
    name: String,
    column: usize,
}

/// Parse one sheet into brand rows.
///
/// # Errors
///
/// Returns a [`SkipReason`] when the sheet has too few rows or carries no
/// funnel header. Missing non-funnel columns and malformed values never fail.
pub fn parse_sheet(
    name: &str,
    grid: &SheetGrid,
    resolver: &BrandResolver,
) -> Result<ParsedSheet, SkipReason> {
    if grid.row_count() < MIN_ROWS {
        return Err(SkipReason::TooFewRows {
            rows: grid.row_count(),
        });
    }

    let metric_columns = metric_columns(grid.row(HEADER_ROW));
    if !metric_columns
        .keys()
        .any(|key| key.family() == MetricFamily::Funnel)
    {
        return Err(SkipReason::NoFunnelHeader);
    }

    let image_columns = image_columns(grid.row(ITEM_ROW), grid.row(HEADER_ROW));
    if image_columns.is_empty() {
        tracing::warn!(sheet = %name, "no brand image columns found");
    }

    let mut rows = Vec::new();
    for row_idx in DATA_START_ROW..grid.row_count() {
        let Some(raw_brand) = grid.cell(row_idx, BRAND_COLUMN).trimmed_text() else {
            continue;
        };
        let brand = resolver.canonicalize(raw_brand);

        let mut record = BrandRecord::default();
        for (&key, &column) in &metric_columns {
            record
                .metrics
                .set(key, grid.cell(row_idx, column).to_number());
        }

        let images: BrandImageMap = image_columns
            .iter()
            .map(|c| (c.name.clone(), grid.cell(row_idx, c.column).to_number()))
            .collect();
        record.archetypes = Some(derive_profile(&images));

        rows.push(ParsedRow {
            brand,
            record,
            images,
        });
    }

    tracing::debug!(
        sheet = %name,
        brands = rows.len(),
        metrics = metric_columns.len(),
        images = image_columns.len(),
        "parsed sheet"
    );

    Ok(ParsedSheet { rows })
}

/// Header text with surrounding whitespace and line breaks removed.
fn header_text(cell: &Cell) -> Option<String> {
    cell.as_text()
        .map(|s| s.trim().replace("\r\n", "").replace('\n', ""))
}

/// Metric key -> column. A label appearing twice maps to its last column.
fn metric_columns(header_row: &[Cell]) -> HashMap<MetricKey, usize> {
    let mut columns = HashMap::new();
    for (idx, cell) in header_row.iter().enumerate() {
        if let Some(key) = header_text(cell).as_deref().and_then(metric_for_header) {
            columns.insert(key, idx);
        }
    }
    columns
}

fn image_columns(item_row: &[Cell], header_row: &[Cell]) -> Vec<ImageColumn> {
    let mut columns = Vec::new();
    for (idx, cell) in item_row.iter().enumerate() {
        let Some(item_text) = cell.trimmed_text() else {
            continue;
        };
        if !item_text.contains(BRAND_IMAGE_KEYWORD) || is_blocklisted_item(item_text) {
            continue;
        }

        let name = header_row
            .get(idx)
            .and_then(Cell::trimmed_text)
            .unwrap_or(item_text);
        if is_blocklisted_item(name) {
            continue;
        }

        columns.push(ImageColumn {
            name: name.to_string(),
            column: idx,
        });
    }
    columns
}

#[cfg(test)]
#[path = "sheet_test.rs"]
mod tests;
