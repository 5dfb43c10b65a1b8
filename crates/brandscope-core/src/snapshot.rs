//! Snapshots: independently ingested datasets compared side by side in the
//! historical modes.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::dataset::Dataset;

/// Longest display name a snapshot may carry, in characters.
pub const MAX_NAME_CHARS: usize = 20;

pub const DEFAULT_MAX_SNAPSHOTS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot collection is full (max {max})")]
    Full { max: usize },
    #[error("snapshot not found: {0}")]
    NotFound(Uuid),
    #[error("snapshot name must contain at least one character")]
    EmptyName,
    #[error("at least one snapshot must stay active")]
    LastActive,
}

/// One dataset in a [`SnapshotCollection`].
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub name: String,
    #[serde(skip)]
    pub dataset: Arc<Dataset>,
    pub active: bool,
}

/// Ordered, bounded list of snapshots. Order is insertion order and is the
/// series order of every historical chart.
#[derive(Debug, Clone)]
pub struct SnapshotCollection {
    snapshots: Vec<Snapshot>,
    max: usize,
}

impl Default for SnapshotCollection {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SNAPSHOTS)
    }
}

impl SnapshotCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(max: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            max,
        }
    }

    /// Add a dataset named after its origin file. A name already in the
    /// collection gets a `(2)`, `(3)`, ... suffix so every series label stays
    /// distinct.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Full`] when the collection is at capacity.
    pub fn add(&mut self, dataset: impl Into<Arc<Dataset>>) -> Result<Uuid, SnapshotError> {
        let dataset = dataset.into();
        let name = snapshot_name_from_file(&dataset.provenance().file_name, self.len() + 1);
        let name = self.unique_name(name);
        self.add_named(dataset, name)
    }

    fn unique_name(&self, base: String) -> String {
        if self.find_by_name(&base).is_none() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}({n})");
            if self.find_by_name(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Add a dataset under an explicit display name. New snapshots start
    /// active.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Full`] when the collection is at capacity.
    pub fn add_named(
        &mut self,
        dataset: impl Into<Arc<Dataset>>,
        name: impl Into<String>,
    ) -> Result<Uuid, SnapshotError> {
        if self.snapshots.len() >= self.max {
            return Err(SnapshotError::Full { max: self.max });
        }
        let id = Uuid::new_v4();
        self.snapshots.push(Snapshot {
            id,
            name: name.into(),
            dataset: dataset.into(),
            active: true,
        });
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`SnapshotError::NotFound`] for an unknown id.
    pub fn remove(&mut self, id: Uuid) -> Result<Snapshot, SnapshotError> {
        let pos = self.position(id)?;
        Ok(self.snapshots.remove(pos))
    }

    /// Rename a snapshot. The name is trimmed and cut to
    /// [`MAX_NAME_CHARS`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::EmptyName`] if nothing is left after trimming,
    /// or [`SnapshotError::NotFound`] for an unknown id.
    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<(), SnapshotError> {
        let name: String = name.trim().chars().take(MAX_NAME_CHARS).collect();
        if name.is_empty() {
            return Err(SnapshotError::EmptyName);
        }
        let pos = self.position(id)?;
        self.snapshots[pos].name = name;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`SnapshotError::LastActive`] when deactivating the only
    /// active snapshot, or [`SnapshotError::NotFound`] for an unknown id.
    pub fn set_active(&mut self, id: Uuid, active: bool) -> Result<(), SnapshotError> {
        let pos = self.position(id)?;
        if !active && self.snapshots[pos].active && self.active_count() <= 1 {
            return Err(SnapshotError::LastActive);
        }
        self.snapshots[pos].active = active;
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`SnapshotCollection::set_active`].
    pub fn toggle_active(&mut self, id: Uuid) -> Result<bool, SnapshotError> {
        let pos = self.position(id)?;
        let next = !self.snapshots[pos].active;
        self.set_active(id, next)?;
        Ok(next)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().filter(|s| s.active)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max
    }

    fn position(&self, id: Uuid) -> Result<usize, SnapshotError> {
        self.snapshots
            .iter()
            .position(|s| s.id == id)
            .ok_or(SnapshotError::NotFound(id))
    }
}

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(xlsx|xls|csv)$").expect("valid extension regex"));
static QUARTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]{4})[_-]?Q([1-4])").expect("valid quarter regex"));
static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[_-]?([0-9]{4})")
        .expect("valid month-name regex")
});
static FULL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})[_-]([0-9]{2})[_-]([0-9]{2})").expect("valid date regex")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Derive a period name such as `2024年3月` from a workbook file name.
///
/// Rules are tried in order: `YYYY_M`, `YYYY_Q1`, `Mar2024`, `YYYY_MM_DD`,
/// then `YYYYMM`. A name matching none of them becomes `データ{fallback_index}`.
#[must_use]
pub fn snapshot_name_from_file(file_name: &str, fallback_index: usize) -> String {
    let stripped = EXTENSION.replace(file_name, "");
    let stem: &str = &stripped;

    if let Some((year, month)) = year_dash_month(stem) {
        return format!("{year}年{month}月");
    }

    if let Some(caps) = QUARTER.captures(stem) {
        return format!("{}年Q{}", &caps[1], &caps[2]);
    }

    if let Some(caps) = MONTH_NAME.captures(stem) {
        let lower = caps[1].to_ascii_lowercase();
        if let Some(idx) = MONTHS.iter().position(|m| *m == lower) {
            return format!("{}年{}月", &caps[2], idx + 1);
        }
    }

    if let Some(caps) = FULL_DATE.captures(stem) {
        return format!(
            "{}年{}月{}日",
            &caps[1],
            parse_component(&caps[2]),
            parse_component(&caps[3])
        );
    }

    if let Some((year, month)) = compact_year_month(stem) {
        return format!("{year}年{month}月");
    }

    format!("データ{fallback_index}")
}

fn parse_component(digits: &str) -> u32 {
    digits.parse().unwrap_or(0)
}

fn is_digit_at(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx).is_some_and(u8::is_ascii_digit)
}

fn all_digits(bytes: &[u8], start: usize, len: usize) -> bool {
    (start..start + len).all(|i| is_digit_at(bytes, i))
}

/// `YYYY[_-]M{1,2}` where the month is not followed by an optional
/// separator and another digit.
fn year_dash_month(stem: &str) -> Option<(&str, u32)> {
    let bytes = stem.as_bytes();
    for start in 0..bytes.len() {
        if !all_digits(bytes, start, 4) || !matches!(bytes.get(start + 4), Some(b'_' | b'-')) {
            continue;
        }
        let month_start = start + 5;
        if !is_digit_at(bytes, month_start) {
            continue;
        }
        let month_len = if is_digit_at(bytes, month_start + 1) { 2 } else { 1 };
        let end = month_start + month_len;
        let blocked = is_digit_at(bytes, end)
            || (matches!(bytes.get(end), Some(b'_' | b'-')) && is_digit_at(bytes, end + 1));
        if blocked {
            continue;
        }
        let month = parse_component(&stem[month_start..end]);
        return Some((&stem[start..start + 4], month));
    }
    None
}

/// `YYYYMM` not followed by another digit.
fn compact_year_month(stem: &str) -> Option<(&str, u32)> {
    let bytes = stem.as_bytes();
    (0..bytes.len())
        .find(|&start| all_digits(bytes, start, 6) && !is_digit_at(bytes, start + 6))
        .map(|start| (&stem[start..start + 4], parse_component(&stem[start + 4..start + 6])))
}
