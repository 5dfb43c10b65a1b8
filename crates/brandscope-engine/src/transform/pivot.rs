use brandscope_core::dataset::Dataset;

use super::top_k::top_items;
use super::{item_keys, read_value, Coordinates, Lookup};
use crate::chart::ChartDataPoint;
use crate::display::DisplayNames;
use crate::registry::{DimensionKind, ModeDescriptor, Role};
use crate::selection::Selection;

/// Single-dataset pivot. A missing segment, brand or value leaves the
/// series field off the point.
pub(crate) fn transform(
    descriptor: &ModeDescriptor,
    dataset: &Dataset,
    selection: &Selection,
    names: &DisplayNames,
) -> Option<Vec<ChartDataPoint>> {
    let x_kind = descriptor.kind_with(Role::XAxis)?;
    let series_kind = descriptor.kind_with(Role::Series)?;
    let filter_kind = descriptor.kind_with(Role::Filter)?;

    let filter = selection.single(filter_kind)?;
    let series = selection.multiple(series_kind);
    if series.is_empty() {
        return None;
    }

    let base = Coordinates::default().with(filter_kind, filter);
    let auto_select = descriptor.auto_select_count();

    let categories = match (x_kind, auto_select) {
        (DimensionKind::Item, Some(count)) => {
            // The first series member is the ranking reference.
            let reference = base.with(series_kind, series[0]);
            dataset
                .brand_images(reference.segment, reference.brand)
                .map(|images| top_items(images, count))
                .unwrap_or_default()
        }
        (DimensionKind::Item, None) => item_keys(descriptor.item.family, dataset),
        (DimensionKind::Segment, _) => {
            let chosen = selection.multiple(DimensionKind::Segment);
            if chosen.is_empty() {
                dataset.segment_labels().map(str::to_string).collect()
            } else {
                chosen.into_iter().map(str::to_string).collect()
            }
        }
        (DimensionKind::Brand, _) => {
            let chosen = selection.multiple(DimensionKind::Brand);
            if chosen.is_empty() {
                return None;
            }
            chosen.into_iter().map(str::to_string).collect::<Vec<_>>()
        }
    };

    let family = descriptor.item.family;
    let points = categories
        .iter()
        .map(|category| {
            let mut point = ChartDataPoint::new(names.label(x_kind, category));
            for member in &series {
                let at = base.with(x_kind, category).with(series_kind, member);
                let value = match read_value(dataset, family, at) {
                    Lookup::Value(v) => Some(v),
                    Lookup::MissingItem if auto_select.is_some() => Some(0.0),
                    Lookup::MissingItem | Lookup::MissingRecord => None,
                };
                if let Some(value) = value {
                    point.set(names.label(series_kind, member), value);
                }
            }
            point
        })
        .collect();

    Some(points)
}
