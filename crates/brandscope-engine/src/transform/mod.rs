//! Reshapes a dataset, or a set of snapshots, into chart rows.
//!
//! The path taken depends only on the descriptor's shape: a mode with a
//! SERIES dimension pivots one dataset, a mode without one treats the
//! active snapshots as its series.

mod historical;
mod pivot;
pub mod top_k;

use brandscope_core::archetype::Archetype;
use brandscope_core::dataset::Dataset;
use brandscope_core::labels::ItemFamily;
use brandscope_core::metrics::MetricKey;
use brandscope_core::snapshot::SnapshotCollection;

use crate::chart::ChartDataPoint;
use crate::display::DisplayNames;
use crate::error::TransformError;
use crate::registry::{DimensionKind, ModeDescriptor, ModeId};
use crate::selection::Selection;

/// What a transform reads from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Dataset(&'a Dataset),
    Snapshots(&'a SnapshotCollection),
}

impl<'a> From<&'a Dataset> for Source<'a> {
    fn from(dataset: &'a Dataset) -> Self {
        Source::Dataset(dataset)
    }
}

impl<'a> From<&'a SnapshotCollection> for Source<'a> {
    fn from(snapshots: &'a SnapshotCollection) -> Self {
        Source::Snapshots(snapshots)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    names: DisplayNames,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_display_names(names: DisplayNames) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn display_names(&self) -> &DisplayNames {
        &self.names
    }

    /// Build chart rows for `descriptor`.
    ///
    /// Returns `Ok(None)` when the selection lacks a value the mode needs,
    /// or when no snapshot is active. Lookup misses never fail: single
    /// dataset modes omit the field, snapshot modes record `0`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidDescriptor`] if the descriptor breaks
    /// the role invariant, or [`TransformError::SourceMismatch`] if the
    /// source kind does not fit the mode.
    pub fn transform(
        &self,
        descriptor: &ModeDescriptor,
        source: Source<'_>,
        selection: &Selection,
    ) -> Result<Option<Vec<ChartDataPoint>>, TransformError> {
        descriptor.validate()?;

        let points = match (descriptor.is_historical(), source) {
            (false, Source::Dataset(dataset)) => {
                pivot::transform(descriptor, dataset, selection, &self.names)
            }
            (true, Source::Snapshots(snapshots)) => {
                historical::transform(descriptor, snapshots, selection, &self.names)
            }
            (false, Source::Snapshots(_)) => {
                return Err(TransformError::SourceMismatch {
                    mode: descriptor.id,
                    expected: "a single dataset",
                })
            }
            (true, Source::Dataset(_)) => {
                return Err(TransformError::SourceMismatch {
                    mode: descriptor.id,
                    expected: "a snapshot collection",
                })
            }
        };

        match &points {
            Some(points) => {
                tracing::debug!(mode = %descriptor.id, points = points.len(), "chart transformed");
            }
            None => tracing::debug!(mode = %descriptor.id, "selection incomplete, nothing to render"),
        }
        Ok(points)
    }

    /// [`Engine::transform`] by mode id.
    ///
    /// # Errors
    ///
    /// As [`Engine::transform`], plus [`TransformError::UnknownMode`] for an
    /// id missing from the registry.
    pub fn transform_mode(
        &self,
        id: ModeId,
        source: Source<'_>,
        selection: &Selection,
    ) -> Result<Option<Vec<ChartDataPoint>>, TransformError> {
        let descriptor = id
            .descriptor()
            .ok_or_else(|| TransformError::UnknownMode(id.to_string()))?;
        self.transform(descriptor, source, selection)
    }
}

/// One (item, segment, brand) address in the data cube.
#[derive(Debug, Clone, Copy, Default)]
struct Coordinates<'a> {
    item: &'a str,
    segment: &'a str,
    brand: &'a str,
}

impl<'a> Coordinates<'a> {
    fn set(&mut self, kind: DimensionKind, value: &'a str) {
        match kind {
            DimensionKind::Item => self.item = value,
            DimensionKind::Segment => self.segment = value,
            DimensionKind::Brand => self.brand = value,
        }
    }

    fn with(mut self, kind: DimensionKind, value: &'a str) -> Self {
        self.set(kind, value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lookup {
    Value(f64),
    /// The brand exists but carries no value for the item.
    MissingItem,
    /// No such segment or brand.
    MissingRecord,
}

/// Read one value with exact segment and brand keys. Archetype items come
/// from the cached profile, brand-image items from the open map.
fn read_value(dataset: &Dataset, family: ItemFamily, at: Coordinates<'_>) -> Lookup {
    if family == ItemFamily::BrandImage {
        return match dataset.brand_images(at.segment, at.brand) {
            Some(images) => images.get(at.item).map_or(Lookup::MissingItem, Lookup::Value),
            None => Lookup::MissingRecord,
        };
    }

    let Some(record) = dataset.record(at.segment, at.brand) else {
        return Lookup::MissingRecord;
    };

    let value = if family == ItemFamily::Archetype {
        Archetype::from_key(at.item).and_then(|a| record.archetype(a))
    } else {
        MetricKey::from_code(at.item).map(|key| record.metric(key))
    };
    value.map_or(Lookup::MissingItem, Lookup::Value)
}

/// Category keys for a fixed item axis. The brand-image family falls back
/// to every item the dataset has seen.
fn item_keys(family: ItemFamily, dataset: &Dataset) -> Vec<String> {
    match family.fixed_keys() {
        Some(keys) => keys.into_iter().map(str::to_string).collect(),
        None => dataset
            .brand_image_items()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod fixtures;

#[cfg(test)]
#[path = "pivot_test.rs"]
mod pivot_tests;

#[cfg(test)]
#[path = "historical_test.rs"]
mod historical_tests;
