//! Integration tests for workbook ingestion over real xlsx bytes.

mod common;

use brandscope_core::archetype::Archetype;
use brandscope_core::brands::BrandResolver;
use brandscope_core::metrics::MetricKey;
use brandscope_ingest::error::INVALID_FORMAT_MESSAGE;
use brandscope_ingest::{load_workbook, load_workbooks, parse_workbook, IngestError, SkipReason};
use common::{overall_sheet, workbook_bytes, workbook_with_notes, BrandRow, SurveySheet};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn overall_sheet_parses_funnel_values() {
    let bytes = workbook_bytes(&[overall_sheet()]);
    let parsed = parse_workbook(&bytes, "survey.xlsx", &BrandResolver::new())
        .expect("workbook should parse");

    let dataset = &parsed.dataset;
    assert_eq!(dataset.segment_labels().collect::<Vec<_>>(), ["Overall"]);
    let brands: Vec<_> = dataset.segment("Overall").unwrap().brand_keys().collect();
    assert_eq!(brands, ["Acme", "Beta"]);

    let acme = dataset.record("Overall", "Acme").unwrap();
    let beta = dataset.record("Overall", "Beta").unwrap();
    assert!(approx(acme.metric(MetricKey::Ft), 40.0));
    assert!(approx(beta.metric(MetricKey::Ft), 55.0));
    assert!(approx(beta.metric(MetricKey::Bp3), 7.5));
    // No column for this metric, so it stays at zero.
    assert!(approx(acme.metric(MetricKey::Gl), 0.0));
    assert!(parsed.skipped.is_empty());
}

#[test]
fn brand_image_columns_skip_blocklisted_items() {
    let bytes = workbook_bytes(&[overall_sheet()]);
    let parsed = parse_workbook(&bytes, "survey.xlsx", &BrandResolver::new()).unwrap();

    let images = parsed.dataset.brand_images("Overall", "Acme").unwrap();
    let items: Vec<_> = images.item_names().collect();
    assert_eq!(items, ["楽しい", "誠実な"]);
    assert_eq!(images.get("楽しい"), Some(12.0));
    assert_eq!(images.get("あてはまるものはない"), None);
}

#[test]
fn archetypes_are_cached_on_each_record() {
    let bytes = workbook_bytes(&[overall_sheet()]);
    let parsed = parse_workbook(&bytes, "survey.xlsx", &BrandResolver::new()).unwrap();

    let acme = parsed.dataset.record("Overall", "Acme").unwrap();
    // Innocent draws on 誠実な only, the other configured items are absent.
    assert_eq!(acme.archetype(Archetype::Innocent), Some(8.0));
}

#[test]
fn parsing_same_bytes_twice_yields_equal_datasets() {
    let bytes = workbook_bytes(&[overall_sheet()]);
    let resolver = BrandResolver::new();
    let first = parse_workbook(&bytes, "survey.xlsx", &resolver).unwrap();
    let second = parse_workbook(&bytes, "survey.xlsx", &resolver).unwrap();
    assert!(first.dataset.same_content(&second.dataset));
}

#[test]
fn brand_labels_are_canonicalized_through_aliases() {
    let sheet = SurveySheet {
        name: "Overall",
        metric_headers: vec!["認知あり(TOP2)"],
        image_items: vec![],
        rows: vec![BrandRow {
            brand: "T-fal（ティファール）",
            metrics: vec![33.0],
            images: vec![],
        }],
    };
    let bytes = workbook_bytes(&[sheet]);
    let parsed = parse_workbook(&bytes, "survey.xlsx", &BrandResolver::new()).unwrap();
    let brands: Vec<_> = parsed.dataset.segment("Overall").unwrap().brand_keys().collect();
    assert_eq!(brands, ["T-Fal（ティファール）"]);
}

fn power_only_sheet() -> SurveySheet<'static> {
    SurveySheet {
        name: "Power only",
        metric_headers: vec!["ロイヤリティ"],
        image_items: vec![],
        rows: vec![BrandRow {
            brand: "Acme",
            metrics: vec![1.0],
            images: vec![],
        }],
    }
}

#[test]
fn unusable_sheets_are_reported_but_do_not_fail_the_workbook() {
    let bytes = workbook_with_notes(&["Notes"], &[overall_sheet(), power_only_sheet()]);
    let parsed = parse_workbook(&bytes, "survey.xlsx", &BrandResolver::new()).unwrap();

    assert_eq!(parsed.dataset.segment_labels().collect::<Vec<_>>(), ["Overall"]);
    assert_eq!(parsed.skipped.len(), 2);
    assert_eq!(parsed.skipped[0].sheet, "Notes");
    assert_eq!(parsed.skipped[0].reason, SkipReason::TooFewRows { rows: 2 });
    assert_eq!(parsed.skipped[1].sheet, "Power only");
    assert_eq!(parsed.skipped[1].reason, SkipReason::NoFunnelHeader);
}

#[test]
fn workbook_without_usable_sheets_is_invalid_format() {
    let bytes = workbook_with_notes(&["Notes"], &[power_only_sheet()]);
    let err = parse_workbook(&bytes, "notes.xlsx", &BrandResolver::new()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidFormat));
    assert_eq!(err.to_string(), INVALID_FORMAT_MESSAGE);
}

#[test]
fn garbage_bytes_are_a_workbook_error() {
    let err = parse_workbook(b"not a workbook", "junk.xlsx", &BrandResolver::new()).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
}

#[tokio::test]
async fn load_workbook_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2024-03_survey.xlsx");
    std::fs::write(&path, workbook_bytes(&[overall_sheet()])).unwrap();

    let parsed = load_workbook(&path, &BrandResolver::new())
        .await
        .expect("file should load");
    assert_eq!(parsed.dataset.provenance().file_name, "2024-03_survey.xlsx");
    assert_eq!(parsed.dataset.segment_count(), 1);
}

#[tokio::test]
async fn load_workbook_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_workbook(dir.path().join("absent.xlsx"), &BrandResolver::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[tokio::test]
async fn load_workbooks_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.xlsx");
    let second = dir.path().join("second.xlsx");
    let missing = dir.path().join("missing.xlsx");
    std::fs::write(&first, workbook_bytes(&[overall_sheet()])).unwrap();
    std::fs::write(&second, workbook_bytes(&[overall_sheet()])).unwrap();

    let results = load_workbooks(&[&second, &missing, &first], &BrandResolver::new(), 2).await;
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap().dataset.provenance().file_name,
        "second.xlsx"
    );
    assert!(results[1].is_err());
    assert_eq!(
        results[2].as_ref().unwrap().dataset.provenance().file_name,
        "first.xlsx"
    );
}
