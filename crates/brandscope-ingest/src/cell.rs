//! Workbook cells reduced to the handful of shapes the parser cares about.

use std::sync::LazyLock;

use regex::Regex;

/// Longest numeric prefix a lenient float parse accepts.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid numeric prefix regex")
});

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Text content, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text content after trimming; `None` for non-text or blank cells.
    #[must_use]
    pub fn trimmed_text(&self) -> Option<&str> {
        self.as_text().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Numeric value of a metric cell. `-`, blanks and anything that does
    /// not start with a number read as `0.0`.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Cell::Number(n) if n.is_finite() => *n,
            Cell::Text(s) => parse_lenient(s),
            _ => 0.0,
        }
    }
}

impl From<&calamine::Data> for Cell {
    #[allow(clippy::cast_precision_loss)]
    fn from(data: &calamine::Data) -> Self {
        match data {
            calamine::Data::Int(i) => Cell::Number(*i as f64),
            calamine::Data::Float(f) => Cell::Number(*f),
            calamine::Data::String(s) => Cell::Text(s.clone()),
            calamine::Data::Bool(b) => Cell::Bool(*b),
            _ => Cell::Empty,
        }
    }
}

/// Parse the leading number of `text`, ignoring any trailing characters.
/// `"12.5%"` reads as `12.5`; text without a numeric prefix reads as `0.0`.
#[must_use]
pub fn parse_lenient(text: &str) -> f64 {
    let trimmed = text.trim_start();
    NUMERIC_PREFIX
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
