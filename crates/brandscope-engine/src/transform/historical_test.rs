use brandscope_core::dataset::Dataset;
use brandscope_core::metrics::MetricKey;
use brandscope_core::snapshot::SnapshotCollection;

use super::fixtures::{survey, Fixture};
use super::{Engine, Source};
use crate::chart::ChartDataPoint;
use crate::display::DisplayNames;
use crate::error::TransformError;
use crate::registry::ModeId;
use crate::selection::Selection;

fn first_period() -> Dataset {
    Fixture::new("2024-03_survey.xlsx")
        .brand(
            "Overall",
            "Acme",
            &[(MetricKey::Ft, 40.0), (MetricKey::Bp2, 4.0)],
            &[("楽しい", 12.0), ("あてはまるものはない", 99.0), ("誠実な", 8.0)],
        )
        .brand("Overall", "T-Fal(ティファール)", &[(MetricKey::Ft, 20.0)], &[])
        .build()
}

/// No "Overall" segment at all.
fn second_period() -> Dataset {
    Fixture::new("2024-09_survey.xlsx")
        .brand("Female", "Acme", &[(MetricKey::Ft, 50.0)], &[("楽しい", 2.0)])
        .build()
}

/// Acme spelled with a reading in brackets.
fn third_period() -> Dataset {
    Fixture::new("2025-03_survey.xlsx")
        .brand(
            "Overall",
            "Acme（アクメ）",
            &[(MetricKey::Ft, 45.0)],
            &[("楽しい", 10.0)],
        )
        .build()
}

fn collection(datasets: Vec<Dataset>) -> SnapshotCollection {
    let mut snapshots = SnapshotCollection::new();
    for (idx, dataset) in datasets.into_iter().enumerate() {
        snapshots
            .add_named(dataset, format!("Snapshot{}", idx + 1))
            .unwrap();
    }
    snapshots
}

fn run(
    snapshots: &SnapshotCollection,
    id: ModeId,
    selection: &Selection,
) -> Option<Vec<ChartDataPoint>> {
    Engine::new()
        .transform_mode(id, Source::Snapshots(snapshots), selection)
        .expect("transform should not fail")
}

fn overall_acme() -> Selection {
    Selection::new().with_segment("Overall").with_brand("Acme")
}

#[test]
fn missing_segment_in_a_snapshot_reads_as_zero() {
    let snapshots = collection(vec![first_period(), second_period()]);
    let points = run(&snapshots, ModeId::HistoricalFunnel1SegmentBrand, &overall_acme()).unwrap();

    assert_eq!(points.len(), 6);
    assert_eq!(points[0].name, "認知あり(TOP2)");
    assert_eq!(points[0].get("Snapshot1"), Some(40.0));
    assert_eq!(points[0].get("Snapshot2"), Some(0.0));
    let keys: Vec<_> = points[0].values.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Snapshot1", "Snapshot2"]);
}

#[test]
fn brand_is_matched_fuzzily_per_snapshot() {
    let snapshots = collection(vec![first_period(), second_period(), third_period()]);
    let points = run(&snapshots, ModeId::HistoricalFunnel1SegmentBrand, &overall_acme()).unwrap();
    assert_eq!(points[0].get("Snapshot3"), Some(45.0));
}

#[test]
fn inactive_snapshots_are_not_series() {
    let mut snapshots = collection(vec![first_period(), second_period()]);
    let second = snapshots.iter().nth(1).unwrap().id;
    snapshots.set_active(second, false).unwrap();

    let points = run(&snapshots, ModeId::HistoricalFunnel1SegmentBrand, &overall_acme()).unwrap();
    assert_eq!(points[0].values.len(), 1);
    assert_eq!(points[0].get("Snapshot2"), None);
}

#[test]
fn no_snapshots_is_none() {
    let snapshots = SnapshotCollection::new();
    assert_eq!(
        run(&snapshots, ModeId::HistoricalFunnel1SegmentBrand, &overall_acme()),
        None
    );
}

#[test]
fn missing_filter_is_none() {
    let snapshots = collection(vec![first_period()]);
    let selection = Selection::new().with_segment("Overall");
    assert_eq!(
        run(&snapshots, ModeId::HistoricalFunnel1SegmentBrand, &selection),
        None
    );
}

#[test]
fn brand_power_reads_every_key_of_the_family() {
    let snapshots = collection(vec![first_period(), third_period()]);
    let points = run(&snapshots, ModeId::HistoricalBrandPowerSegmentBrand, &overall_acme()).unwrap();

    let names: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["詳細認知", "知覚品質", "ロイヤリティ", "話題性"]);
    assert_eq!(points[1].get("Snapshot1"), Some(4.0));
    assert_eq!(points[1].get("Snapshot2"), Some(0.0));
}

#[test]
fn archetypes_compare_across_snapshots() {
    let snapshots = collection(vec![first_period(), third_period()]);
    let points = run(&snapshots, ModeId::HistoricalArchetypeSegmentBrand, &overall_acme()).unwrap();

    assert_eq!(points.len(), 12);
    let jester = points.iter().find(|p| p.name == "道化師").unwrap();
    assert_eq!(jester.get("Snapshot1"), Some(12.0));
    assert_eq!(jester.get("Snapshot2"), Some(10.0));
}

#[test]
fn brands_comparison_puts_brands_on_x() {
    let snapshots = collection(vec![first_period(), second_period()]);
    let selection = Selection::new()
        .with_segment("Overall")
        .with_item("FT")
        .with_brands(["Acme", "T-Fal（ティファール）", "Gamma"]);
    let points = run(&snapshots, ModeId::HistoricalFunnel1BrandsComparison, &selection).unwrap();

    let names: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Acme", "T-Fal（ティファール）", "Gamma"]);
    assert_eq!(points[0].get("Snapshot1"), Some(40.0));
    assert_eq!(points[1].get("Snapshot1"), Some(20.0));
    assert_eq!(points[2].get("Snapshot1"), Some(0.0));
    assert!(points.iter().all(|p| p.get("Snapshot2") == Some(0.0)));
}

#[test]
fn brands_comparison_anonymizes_fuzzy_spellings() {
    let snapshots = collection(vec![first_period(), third_period()]);
    let names = DisplayNames::anonymized(["Acme", "T-Fal(ティファール)"]);
    let selection = Selection::new()
        .with_segment("Overall")
        .with_item("FT")
        .with_brands(["Acme（アクメ）", "T-Fal（ティファール）", "Gamma"]);

    let points = Engine::with_display_names(names)
        .transform_mode(
            ModeId::HistoricalFunnel1BrandsComparison,
            Source::Snapshots(&snapshots),
            &selection,
        )
        .unwrap()
        .unwrap();

    let labels: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(labels, ["ブランド1", "ブランド2", "Gamma"]);
    assert_eq!(points[0].get("Snapshot1"), Some(40.0));
    assert_eq!(points[0].get("Snapshot2"), Some(45.0));
}

#[test]
fn brands_comparison_needs_item_and_brands() {
    let snapshots = collection(vec![first_period()]);
    let no_item = Selection::new()
        .with_segment("Overall")
        .with_brands(["Acme"]);
    assert_eq!(
        run(&snapshots, ModeId::HistoricalFunnel1BrandsComparison, &no_item),
        None
    );
    let no_brands = Selection::new().with_segment("Overall").with_item("FT");
    assert_eq!(
        run(&snapshots, ModeId::HistoricalFunnel1BrandsComparison, &no_brands),
        None
    );
}

#[test]
fn brand_image_ranks_against_first_active_snapshot() {
    let snapshots = collection(vec![first_period(), second_period(), third_period()]);
    let points = run(&snapshots, ModeId::HistoricalBrandImageSegmentBrand, &overall_acme()).unwrap();

    let names: Vec<_> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["楽しい", "誠実な"]);
    assert_eq!(points[0].get("Snapshot1"), Some(12.0));
    assert_eq!(points[0].get("Snapshot2"), Some(0.0));
    assert_eq!(points[0].get("Snapshot3"), Some(10.0));
    assert_eq!(points[1].get("Snapshot3"), Some(0.0));
}

#[test]
fn brand_image_without_reference_brand_is_none() {
    let snapshots = collection(vec![second_period(), first_period()]);
    assert_eq!(
        run(&snapshots, ModeId::HistoricalBrandImageSegmentBrand, &overall_acme()),
        None
    );
}

#[test]
fn brand_image_brands_comparison_reads_the_chosen_item() {
    let snapshots = collection(vec![first_period(), third_period()]);
    let selection = Selection::new()
        .with_segment("Overall")
        .with_item("楽しい")
        .with_brands(["Acme"]);
    let points = run(&snapshots, ModeId::HistoricalBrandImageBrandsComparison, &selection).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].get("Snapshot1"), Some(12.0));
    assert_eq!(points[0].get("Snapshot2"), Some(10.0));
}

#[test]
fn snapshot_names_derive_from_file_names() {
    let mut snapshots = SnapshotCollection::new();
    snapshots.add(first_period()).unwrap();
    snapshots.add(third_period()).unwrap();
    let points = run(&snapshots, ModeId::HistoricalFunnel1SegmentBrand, &overall_acme()).unwrap();
    let keys: Vec<_> = points[0].values.keys().map(String::as_str).collect();
    assert_eq!(keys, ["2024年3月", "2025年3月"]);
}

#[test]
fn single_dataset_is_rejected_for_historical_modes() {
    let dataset = survey();
    let err = Engine::new()
        .transform_mode(
            ModeId::HistoricalFunnel1SegmentBrand,
            Source::Dataset(&dataset),
            &overall_acme(),
        )
        .unwrap_err();
    assert_eq!(
        err,
        TransformError::SourceMismatch {
            mode: ModeId::HistoricalFunnel1SegmentBrand,
            expected: "a snapshot collection",
        }
    );
}
