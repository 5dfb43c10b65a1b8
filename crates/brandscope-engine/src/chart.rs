use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One category on the chart's X axis with a value per series.
///
/// Serializes flat: `{"name": "...", "<series>": 1.0, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    #[serde(flatten)]
    pub values: IndexMap<String, f64>,
}

impl ChartDataPoint {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
        }
    }

    /// Sets a series value. A later value for the same series label wins.
    pub fn set(&mut self, series: impl Into<String>, value: f64) {
        self.values.insert(series.into(), value);
    }

    #[must_use]
    pub fn get(&self, series: &str) -> Option<f64> {
        self.values.get(series).copied()
    }
}

/// Default rendering hint for a mode. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
            ChartKind::Radar => write!(f, "radar"),
        }
    }
}
