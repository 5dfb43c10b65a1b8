use brandscope_core::brands::find_match;
use brandscope_core::dataset::Dataset;
use brandscope_core::labels::ItemFamily;
use brandscope_core::snapshot::{Snapshot, SnapshotCollection};

use super::top_k::top_items;
use super::{item_keys, read_value, Coordinates, Lookup};
use crate::chart::ChartDataPoint;
use crate::display::DisplayNames;
use crate::registry::{DimensionKind, ModeDescriptor, Role};
use crate::selection::Selection;

/// Multi-snapshot comparison. Series are the active snapshots, keyed by
/// snapshot name; anything missing in a snapshot reads as `0`.
pub(crate) fn transform(
    descriptor: &ModeDescriptor,
    snapshots: &SnapshotCollection,
    selection: &Selection,
    names: &DisplayNames,
) -> Option<Vec<ChartDataPoint>> {
    let active: Vec<&Snapshot> = snapshots.active().collect();
    let Some(reference) = active.first() else {
        tracing::debug!(mode = %descriptor.id, "no active snapshots");
        return None;
    };

    let x_kind = descriptor.kind_with(Role::XAxis)?;
    let mut base = Coordinates::default();
    for kind in descriptor.kinds_with(Role::Filter) {
        base.set(kind, selection.single(kind)?);
    }

    let family = descriptor.item.family;
    let categories = match (x_kind, descriptor.auto_select_count()) {
        (DimensionKind::Item, Some(count)) => {
            let Some(brand) = matched_brand(&reference.dataset, base.segment, base.brand) else {
                tracing::debug!(
                    snapshot = %reference.name,
                    segment = %base.segment,
                    brand = %base.brand,
                    "ranking reference not found"
                );
                return None;
            };
            let items = reference
                .dataset
                .brand_images(base.segment, brand)
                .map(|images| top_items(images, count))
                .unwrap_or_default();
            if items.is_empty() {
                return None;
            }
            items
        }
        (DimensionKind::Item, None) => item_keys(family, &reference.dataset),
        (kind, _) => {
            let chosen = selection.multiple(kind);
            if chosen.is_empty() {
                return None;
            }
            chosen.into_iter().map(str::to_string).collect()
        }
    };

    let points = categories
        .iter()
        .map(|category| {
            let label = if x_kind == DimensionKind::Brand {
                brand_label(&active, base.segment, category, names)
            } else {
                names.label(x_kind, category)
            };
            let mut point = ChartDataPoint::new(label);
            let at = base.with(x_kind, category);
            for snapshot in &active {
                point.set(snapshot.name.clone(), value_in(snapshot, family, at));
            }
            point
        })
        .collect();

    Some(points)
}

/// The brand key in `segment` that refers to the same brand as `brand`.
fn matched_brand<'d>(dataset: &'d Dataset, segment: &str, brand: &str) -> Option<&'d str> {
    find_match(brand, dataset.segment(segment)?.brand_keys())
}

/// Display name for a brand category, looked up under the key it matches
/// in the first active snapshot that has it.
fn brand_label(active: &[&Snapshot], segment: &str, brand: &str, names: &DisplayNames) -> String {
    let key = active
        .iter()
        .find_map(|&snapshot| matched_brand(&snapshot.dataset, segment, brand))
        .unwrap_or(brand);
    names.brand(key)
}

fn value_in(snapshot: &Snapshot, family: ItemFamily, at: Coordinates<'_>) -> f64 {
    let Some(brand) = matched_brand(&snapshot.dataset, at.segment, at.brand) else {
        tracing::debug!(
            snapshot = %snapshot.name,
            segment = %at.segment,
            brand = %at.brand,
            "brand not in snapshot, using 0"
        );
        return 0.0;
    };

    match read_value(&snapshot.dataset, family, at.with(DimensionKind::Brand, brand)) {
        Lookup::Value(value) => value,
        Lookup::MissingItem | Lookup::MissingRecord => 0.0,
    }
}
