use std::collections::HashSet;

use super::*;

fn all_modes() -> impl Iterator<Item = &'static ModeDescriptor> {
    DETAILED_MODES.iter().chain(HISTORICAL_MODES.iter())
}

#[test]
fn every_descriptor_satisfies_the_role_invariant() {
    for mode in all_modes() {
        assert_eq!(mode.validate(), Ok(()), "{}", mode.id);
    }
}

#[test]
fn detailed_modes_have_one_series_and_one_filter() {
    for mode in &DETAILED_MODES {
        assert!(!mode.is_historical(), "{}", mode.id);
        assert_eq!(mode.kinds_with(Role::XAxis).count(), 1, "{}", mode.id);
        assert_eq!(mode.kinds_with(Role::Series).count(), 1, "{}", mode.id);
        assert_eq!(mode.kinds_with(Role::Filter).count(), 1, "{}", mode.id);
    }
}

#[test]
fn historical_modes_filter_both_non_axis_dimensions() {
    for mode in &HISTORICAL_MODES {
        assert!(mode.is_historical(), "{}", mode.id);
        assert_eq!(mode.kinds_with(Role::Filter).count(), 2, "{}", mode.id);
        assert!(mode.id.as_str().starts_with("historical_"));
    }
}

#[test]
fn catalogue_sizes_and_ids_are_unique() {
    assert_eq!(DETAILED_MODES.len(), 18);
    assert_eq!(HISTORICAL_MODES.len(), 9);
    let ids: HashSet<_> = all_modes().map(|m| m.id).collect();
    assert_eq!(ids.len(), ModeId::ALL.len());
}

#[test]
fn every_id_has_a_descriptor() {
    for id in ModeId::ALL {
        let descriptor = id.descriptor().expect("descriptor registered");
        assert_eq!(descriptor.id, *id);
    }
}

#[test]
fn mode_id_parses_from_its_string_form() {
    for id in ModeId::ALL {
        assert_eq!(id.as_str().parse::<ModeId>(), Ok(*id));
        assert_eq!(id.to_string(), id.as_str());
    }
    assert_eq!(
        "funnel_segment_brands".parse::<ModeId>(),
        Ok(ModeId::FunnelSegmentBrands)
    );
}

#[test]
fn unknown_mode_id_is_rejected() {
    let err = "funnel_everything".parse::<ModeId>().unwrap_err();
    assert_eq!(err, TransformError::UnknownMode("funnel_everything".to_string()));
}

#[test]
fn mode_id_serializes_as_snake_case_id() {
    let json = serde_json::to_string(&ModeId::HistoricalFunnel1SegmentBrand).unwrap();
    assert_eq!(json, r#""historical_funnel1_segment_brand""#);
}

#[test]
fn only_brand_image_item_axes_auto_select() {
    let auto: Vec<_> = all_modes()
        .filter(|m| m.auto_select_count().is_some())
        .map(|m| m.id)
        .collect();
    assert_eq!(
        auto,
        [
            ModeId::BrandImageSegmentBrands,
            ModeId::BrandImageBrandSegments,
            ModeId::HistoricalBrandImageSegmentBrand,
        ]
    );
    for mode in all_modes() {
        if let Some(count) = mode.auto_select_count() {
            assert_eq!(count, AUTO_SELECT_COUNT);
        }
    }
}

#[test]
fn item_segments_brands_puts_brands_on_the_axis() {
    let mode = ModeId::FunnelItemSegmentsBrands.descriptor().unwrap();
    assert_eq!(mode.kind_with(Role::XAxis), Some(DimensionKind::Brand));
    assert_eq!(mode.kind_with(Role::Series), Some(DimensionKind::Segment));
    assert_eq!(mode.kind_with(Role::Filter), Some(DimensionKind::Item));
    assert!(mode.allows_multiple(DimensionKind::Brand));
    assert!(!mode.allows_multiple(DimensionKind::Item));
}

#[test]
fn chart_hints_follow_the_family() {
    let radar: Vec<_> = all_modes()
        .filter(|m| m.chart == ChartKind::Radar)
        .map(|m| m.id)
        .collect();
    assert!(radar.contains(&ModeId::BrandPowerSegmentBrands));
    assert!(radar.contains(&ModeId::ArchetypeItemSegmentsBrands));
    assert!(radar.contains(&ModeId::HistoricalArchetypeSegmentBrand));
    assert!(!radar.contains(&ModeId::BrandPowerItemSegmentsBrands));
    assert!(!radar.contains(&ModeId::FunnelSegmentBrands));
}

#[test]
fn validate_rejects_two_x_axes() {
    let mut broken = DETAILED_MODES[0];
    broken.brand.role = Role::XAxis;
    let err = broken.validate().unwrap_err();
    assert!(err.to_string().contains("one X axis"), "{err}");
}

#[test]
fn validate_rejects_two_series() {
    let mut broken = DETAILED_MODES[0];
    broken.segment = Dimension {
        role: Role::Series,
        allow_multiple: true,
    };
    assert!(matches!(
        broken.validate(),
        Err(TransformError::InvalidDescriptor { .. })
    ));
}

#[test]
fn validate_rejects_multi_value_filter() {
    let mut broken = DETAILED_MODES[0];
    broken.segment.allow_multiple = true;
    let err = broken.validate().unwrap_err();
    assert!(err.to_string().contains("filter dimension segment"), "{err}");
}

#[test]
fn validate_rejects_auto_select_outside_brand_image() {
    let mut broken = DETAILED_MODES[0];
    broken.item.auto_select = Some(AUTO_SELECT_COUNT);
    let err = broken.validate().unwrap_err();
    assert!(err.to_string().contains("brand image"), "{err}");
}
