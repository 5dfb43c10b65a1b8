//! Static catalogue of analysis modes.
//!
//! Every mode assigns one of three roles to each dimension kind. The
//! transform engine reads only that shape, so a new mode is a new table row
//! and nothing else.

use std::str::FromStr;

use brandscope_core::labels::ItemFamily;
use serde::Serialize;

use crate::chart::ChartKind;
use crate::error::TransformError;

/// Number of brand-image items picked for an auto-selected item axis.
pub const AUTO_SELECT_COUNT: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Item,
    Segment,
    Brand,
}

impl DimensionKind {
    pub const ALL: [DimensionKind; 3] = [
        DimensionKind::Item,
        DimensionKind::Segment,
        DimensionKind::Brand,
    ];
}

impl std::fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimensionKind::Item => write!(f, "item"),
            DimensionKind::Segment => write!(f, "segment"),
            DimensionKind::Brand => write!(f, "brand"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    XAxis,
    Series,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub role: Role,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemDimension {
    pub role: Role,
    pub allow_multiple: bool,
    pub family: ItemFamily,
    /// Pick this many items from the data instead of a fixed key list.
    pub auto_select: Option<usize>,
}

/// Closed set of analysis mode identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeId {
    FunnelSegmentBrands,
    FunnelBrandSegments,
    FunnelItemSegmentsBrands,
    TimelineSegmentBrands,
    TimelineBrandSegments,
    TimelineItemSegmentsBrands,
    BrandImageSegmentBrands,
    BrandImageBrandSegments,
    BrandImageItemSegmentsBrands,
    BrandPowerSegmentBrands,
    BrandPowerBrandSegments,
    BrandPowerItemSegmentsBrands,
    FuturePowerSegmentBrands,
    FuturePowerBrandSegments,
    FuturePowerItemSegmentsBrands,
    ArchetypeSegmentBrands,
    ArchetypeBrandSegments,
    ArchetypeItemSegmentsBrands,
    HistoricalFunnel1SegmentBrand,
    HistoricalFunnel1BrandsComparison,
    HistoricalFunnel2SegmentBrand,
    HistoricalFunnel2BrandsComparison,
    HistoricalBrandImageSegmentBrand,
    HistoricalBrandImageBrandsComparison,
    HistoricalBrandPowerSegmentBrand,
    HistoricalFuturePowerSegmentBrand,
    HistoricalArchetypeSegmentBrand,
}

impl ModeId {
    pub const ALL: &'static [ModeId] = &[
        ModeId::FunnelSegmentBrands,
        ModeId::FunnelBrandSegments,
        ModeId::FunnelItemSegmentsBrands,
        ModeId::TimelineSegmentBrands,
        ModeId::TimelineBrandSegments,
        ModeId::TimelineItemSegmentsBrands,
        ModeId::BrandImageSegmentBrands,
        ModeId::BrandImageBrandSegments,
        ModeId::BrandImageItemSegmentsBrands,
        ModeId::BrandPowerSegmentBrands,
        ModeId::BrandPowerBrandSegments,
        ModeId::BrandPowerItemSegmentsBrands,
        ModeId::FuturePowerSegmentBrands,
        ModeId::FuturePowerBrandSegments,
        ModeId::FuturePowerItemSegmentsBrands,
        ModeId::ArchetypeSegmentBrands,
        ModeId::ArchetypeBrandSegments,
        ModeId::ArchetypeItemSegmentsBrands,
        ModeId::HistoricalFunnel1SegmentBrand,
        ModeId::HistoricalFunnel1BrandsComparison,
        ModeId::HistoricalFunnel2SegmentBrand,
        ModeId::HistoricalFunnel2BrandsComparison,
        ModeId::HistoricalBrandImageSegmentBrand,
        ModeId::HistoricalBrandImageBrandsComparison,
        ModeId::HistoricalBrandPowerSegmentBrand,
        ModeId::HistoricalFuturePowerSegmentBrand,
        ModeId::HistoricalArchetypeSegmentBrand,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModeId::FunnelSegmentBrands => "funnel_segment_brands",
            ModeId::FunnelBrandSegments => "funnel_brand_segments",
            ModeId::FunnelItemSegmentsBrands => "funnel_item_segments_brands",
            ModeId::TimelineSegmentBrands => "timeline_segment_brands",
            ModeId::TimelineBrandSegments => "timeline_brand_segments",
            ModeId::TimelineItemSegmentsBrands => "timeline_item_segments_brands",
            ModeId::BrandImageSegmentBrands => "brand_image_segment_brands",
            ModeId::BrandImageBrandSegments => "brand_image_brand_segments",
            ModeId::BrandImageItemSegmentsBrands => "brand_image_item_segments_brands",
            ModeId::BrandPowerSegmentBrands => "brand_power_segment_brands",
            ModeId::BrandPowerBrandSegments => "brand_power_brand_segments",
            ModeId::BrandPowerItemSegmentsBrands => "brand_power_item_segments_brands",
            ModeId::FuturePowerSegmentBrands => "future_power_segment_brands",
            ModeId::FuturePowerBrandSegments => "future_power_brand_segments",
            ModeId::FuturePowerItemSegmentsBrands => "future_power_item_segments_brands",
            ModeId::ArchetypeSegmentBrands => "archetype_segment_brands",
            ModeId::ArchetypeBrandSegments => "archetype_brand_segments",
            ModeId::ArchetypeItemSegmentsBrands => "archetype_item_segments_brands",
            ModeId::HistoricalFunnel1SegmentBrand => "historical_funnel1_segment_brand",
            ModeId::HistoricalFunnel1BrandsComparison => "historical_funnel1_brands_comparison",
            ModeId::HistoricalFunnel2SegmentBrand => "historical_funnel2_segment_brand",
            ModeId::HistoricalFunnel2BrandsComparison => "historical_funnel2_brands_comparison",
            ModeId::HistoricalBrandImageSegmentBrand => "historical_brand_image_segment_brand",
            ModeId::HistoricalBrandImageBrandsComparison => "historical_brand_image_brands_comparison",
            ModeId::HistoricalBrandPowerSegmentBrand => "historical_brand_power_segment_brand",
            ModeId::HistoricalFuturePowerSegmentBrand => "historical_future_power_segment_brand",
            ModeId::HistoricalArchetypeSegmentBrand => "historical_archetype_segment_brand",
        }
    }

    /// The registry entry for this id.
    #[must_use]
    pub fn descriptor(self) -> Option<&'static ModeDescriptor> {
        DETAILED_MODES
            .iter()
            .chain(HISTORICAL_MODES.iter())
            .find(|d| d.id == self)
    }
}

impl FromStr for ModeId {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModeId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| TransformError::UnknownMode(s.to_string()))
    }
}

impl std::fmt::Display for ModeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analysis mode: a role for each dimension kind plus display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeDescriptor {
    pub id: ModeId,
    pub name: &'static str,
    pub description: &'static str,
    pub chart: ChartKind,
    pub item: ItemDimension,
    pub segment: Dimension,
    pub brand: Dimension,
}

impl ModeDescriptor {
    #[must_use]
    pub fn role(&self, kind: DimensionKind) -> Role {
        match kind {
            DimensionKind::Item => self.item.role,
            DimensionKind::Segment => self.segment.role,
            DimensionKind::Brand => self.brand.role,
        }
    }

    #[must_use]
    pub fn allows_multiple(&self, kind: DimensionKind) -> bool {
        match kind {
            DimensionKind::Item => self.item.allow_multiple,
            DimensionKind::Segment => self.segment.allow_multiple,
            DimensionKind::Brand => self.brand.allow_multiple,
        }
    }

    pub fn kinds_with(&self, role: Role) -> impl Iterator<Item = DimensionKind> + '_ {
        DimensionKind::ALL
            .into_iter()
            .filter(move |kind| self.role(*kind) == role)
    }

    /// The first dimension kind holding `role`.
    #[must_use]
    pub fn kind_with(&self, role: Role) -> Option<DimensionKind> {
        self.kinds_with(role).next()
    }

    /// Multi-snapshot modes have no SERIES dimension: the snapshots are the
    /// series.
    #[must_use]
    pub fn is_historical(&self) -> bool {
        self.kind_with(Role::Series).is_none()
    }

    /// Item count to pick when the item axis is chosen from the data.
    #[must_use]
    pub fn auto_select_count(&self) -> Option<usize> {
        match self.item.role {
            Role::XAxis => self.item.auto_select,
            Role::Series | Role::Filter => None,
        }
    }

    /// Check the role invariant: exactly one X axis; then either one SERIES
    /// and one FILTER, or two FILTERs for multi-snapshot modes.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidDescriptor`] naming the broken rule.
    pub fn validate(&self) -> Result<(), TransformError> {
        let invalid = |reason: String| TransformError::InvalidDescriptor {
            mode: self.id,
            reason,
        };

        let x_axes = self.kinds_with(Role::XAxis).count();
        if x_axes != 1 {
            return Err(invalid(format!("expected one X axis, found {x_axes}")));
        }

        let series = self.kinds_with(Role::Series).count();
        let filters = self.kinds_with(Role::Filter).count();
        match (series, filters) {
            (1, 1) | (0, 2) => {}
            _ => {
                return Err(invalid(format!(
                    "expected one series and one filter or two filters, found {series} series and {filters} filters"
                )))
            }
        }

        if let Some(kind) = self
            .kinds_with(Role::Filter)
            .find(|kind| self.allows_multiple(*kind))
        {
            return Err(invalid(format!("filter dimension {kind} allows multiple values")));
        }

        if self.item.auto_select.is_some() {
            if self.item.role != Role::XAxis {
                return Err(invalid("auto-select needs the item dimension on the X axis".to_string()));
            }
            if self.item.family != ItemFamily::BrandImage {
                return Err(invalid(format!(
                    "auto-select applies to brand image items, not {}",
                    self.item.family
                )));
            }
        }

        Ok(())
    }
}

const fn dimension(role: Role) -> Dimension {
    Dimension {
        role,
        allow_multiple: !matches!(role, Role::Filter),
    }
}

const fn item(role: Role, family: ItemFamily) -> ItemDimension {
    let auto_select = if matches!(role, Role::XAxis) && matches!(family, ItemFamily::BrandImage) {
        Some(AUTO_SELECT_COUNT)
    } else {
        None
    };
    ItemDimension {
        role,
        allow_multiple: false,
        family,
        auto_select,
    }
}

/// X = items, FILTER = segment, SERIES = brands.
const fn segment_brands(
    id: ModeId,
    name: &'static str,
    description: &'static str,
    family: ItemFamily,
    chart: ChartKind,
) -> ModeDescriptor {
    ModeDescriptor {
        id,
        name,
        description,
        chart,
        item: item(Role::XAxis, family),
        segment: dimension(Role::Filter),
        brand: dimension(Role::Series),
    }
}

/// X = items, SERIES = segments, FILTER = brand.
const fn brand_segments(
    id: ModeId,
    name: &'static str,
    description: &'static str,
    family: ItemFamily,
    chart: ChartKind,
) -> ModeDescriptor {
    ModeDescriptor {
        id,
        name,
        description,
        chart,
        item: item(Role::XAxis, family),
        segment: dimension(Role::Series),
        brand: dimension(Role::Filter),
    }
}

/// FILTER = item, SERIES = segments, X = brands.
const fn item_segments_brands(
    id: ModeId,
    name: &'static str,
    description: &'static str,
    family: ItemFamily,
    chart: ChartKind,
) -> ModeDescriptor {
    ModeDescriptor {
        id,
        name,
        description,
        chart,
        item: item(Role::Filter, family),
        segment: dimension(Role::Series),
        brand: dimension(Role::XAxis),
    }
}

/// X = items, FILTER = segment and brand, series = snapshots.
const fn historical_segment_brand(
    id: ModeId,
    name: &'static str,
    description: &'static str,
    family: ItemFamily,
    chart: ChartKind,
) -> ModeDescriptor {
    ModeDescriptor {
        id,
        name,
        description,
        chart,
        item: item(Role::XAxis, family),
        segment: dimension(Role::Filter),
        brand: dimension(Role::Filter),
    }
}

/// X = brands, FILTER = segment and item, series = snapshots.
const fn historical_brands_comparison(
    id: ModeId,
    name: &'static str,
    description: &'static str,
    family: ItemFamily,
    chart: ChartKind,
) -> ModeDescriptor {
    ModeDescriptor {
        id,
        name,
        description,
        chart,
        item: item(Role::Filter, family),
        segment: dimension(Role::Filter),
        brand: dimension(Role::XAxis),
    }
}

/// Single-dataset modes in menu order.
pub static DETAILED_MODES: [ModeDescriptor; 18] = [
    segment_brands(
        ModeId::FunnelSegmentBrands,
        "ファネル分析①（セグメント: X=ファネル①×ブランド）",
        "単一セグメントにおける複数ブランドのファネル指標を比較",
        ItemFamily::Funnel,
        ChartKind::Bar,
    ),
    brand_segments(
        ModeId::FunnelBrandSegments,
        "ファネル分析①（ブランド: X=ファネル①×セグメント）",
        "単一ブランドにおける複数セグメントのファネル指標を比較",
        ItemFamily::Funnel,
        ChartKind::Bar,
    ),
    item_segments_brands(
        ModeId::FunnelItemSegmentsBrands,
        "ファネル分析①（ファネル①: X=ブランド×セグメント）",
        "単一分析項目における複数ブランド・セグメントの比較",
        ItemFamily::Funnel,
        ChartKind::Bar,
    ),
    segment_brands(
        ModeId::TimelineSegmentBrands,
        "ファネル分析②（セグメント: X=ファネル②×ブランド）",
        "単一セグメントにおける複数ブランドの時系列指標を比較",
        ItemFamily::Timeline,
        ChartKind::Bar,
    ),
    brand_segments(
        ModeId::TimelineBrandSegments,
        "ファネル分析②（ブランド: X=ファネル②×セグメント）",
        "単一ブランドにおける複数セグメントの時系列指標を比較",
        ItemFamily::Timeline,
        ChartKind::Bar,
    ),
    item_segments_brands(
        ModeId::TimelineItemSegmentsBrands,
        "ファネル分析②（ファネル②: X=ブランド×セグメント）",
        "単一分析項目における複数ブランド・セグメントの比較（時系列）",
        ItemFamily::Timeline,
        ChartKind::Bar,
    ),
    segment_brands(
        ModeId::BrandImageSegmentBrands,
        "ブランドイメージ分析（セグメント: X=ブランドイメージ×ブランド）",
        "単一セグメントにおける複数ブランドのブランドイメージ指標を比較",
        ItemFamily::BrandImage,
        ChartKind::Bar,
    ),
    brand_segments(
        ModeId::BrandImageBrandSegments,
        "ブランドイメージ分析（ブランド: X=ブランドイメージ×セグメント）",
        "単一ブランドにおける複数セグメントのブランドイメージ指標を比較",
        ItemFamily::BrandImage,
        ChartKind::Bar,
    ),
    item_segments_brands(
        ModeId::BrandImageItemSegmentsBrands,
        "ブランドイメージ分析（ブランドイメージ: X=ブランド×セグメント）",
        "単一ブランドイメージ項目における複数ブランド・セグメントの比較",
        ItemFamily::BrandImage,
        ChartKind::Bar,
    ),
    segment_brands(
        ModeId::BrandPowerSegmentBrands,
        "ブランドパワー分析①（セグメント: X=現在パワー×ブランド）",
        "単一セグメントにおける複数ブランドのブランドパワー指標を比較",
        ItemFamily::BrandPower,
        ChartKind::Radar,
    ),
    brand_segments(
        ModeId::BrandPowerBrandSegments,
        "ブランドパワー分析①（ブランド: X=現在パワー×セグメント）",
        "単一ブランドにおける複数セグメントのブランドパワー指標を比較",
        ItemFamily::BrandPower,
        ChartKind::Radar,
    ),
    item_segments_brands(
        ModeId::BrandPowerItemSegmentsBrands,
        "ブランドパワー分析①（現在パワー: X=ブランド×セグメント）",
        "単一現在パワー項目における複数ブランド・セグメントの比較",
        ItemFamily::BrandPower,
        ChartKind::Bar,
    ),
    segment_brands(
        ModeId::FuturePowerSegmentBrands,
        "ブランドパワー分析②（セグメント: X=将来性パワー×ブランド）",
        "単一セグメントにおける複数ブランドの将来性パワー指標を比較",
        ItemFamily::FuturePower,
        ChartKind::Radar,
    ),
    brand_segments(
        ModeId::FuturePowerBrandSegments,
        "ブランドパワー分析②（ブランド: X=将来性パワー×セグメント）",
        "単一ブランドにおける複数セグメントの将来性パワー指標を比較",
        ItemFamily::FuturePower,
        ChartKind::Radar,
    ),
    item_segments_brands(
        ModeId::FuturePowerItemSegmentsBrands,
        "ブランドパワー分析②（将来性パワー: X=ブランド×セグメント）",
        "単一将来性パワー項目における複数ブランド・セグメントの比較",
        ItemFamily::FuturePower,
        ChartKind::Bar,
    ),
    segment_brands(
        ModeId::ArchetypeSegmentBrands,
        "アーキタイプ分析（セグメント: X=アーキタイプ×ブランド）",
        "単一セグメントにおける複数ブランドのアーキタイプ指標を比較",
        ItemFamily::Archetype,
        ChartKind::Radar,
    ),
    brand_segments(
        ModeId::ArchetypeBrandSegments,
        "アーキタイプ分析（ブランド: X=アーキタイプ×セグメント）",
        "単一ブランドにおける複数セグメントのアーキタイプ指標を比較",
        ItemFamily::Archetype,
        ChartKind::Radar,
    ),
    item_segments_brands(
        ModeId::ArchetypeItemSegmentsBrands,
        "アーキタイプ分析（アーキタイプ: X=ブランド×セグメント）",
        "単一アーキタイプ項目における複数ブランド・セグメントの比較",
        ItemFamily::Archetype,
        ChartKind::Radar,
    ),
];

/// Multi-snapshot modes in menu order.
pub static HISTORICAL_MODES: [ModeDescriptor; 9] = [
    historical_segment_brand(
        ModeId::HistoricalFunnel1SegmentBrand,
        "ファネル分析①（セグメント、ブランド: X=ファネル①×過去比較）",
        "単一セグメント・単一ブランドにおける過去データとの比較",
        ItemFamily::Funnel,
        ChartKind::Bar,
    ),
    historical_brands_comparison(
        ModeId::HistoricalFunnel1BrandsComparison,
        "ファネル分析①（セグメント、ファネル①: X=ブランド×過去比較）",
        "単一セグメント・単一ファネル項目における複数ブランドの過去データとの比較",
        ItemFamily::Funnel,
        ChartKind::Bar,
    ),
    historical_segment_brand(
        ModeId::HistoricalFunnel2SegmentBrand,
        "ファネル分析②（セグメント、ブランド: X=ファネル②×過去比較）",
        "単一セグメント・単一ブランドにおける過去データとの比較（タイムライン項目）",
        ItemFamily::Timeline,
        ChartKind::Bar,
    ),
    historical_brands_comparison(
        ModeId::HistoricalFunnel2BrandsComparison,
        "ファネル分析②（セグメント、ファネル②: X=ブランド×過去比較）",
        "単一セグメント・単一タイムライン項目における複数ブランドの過去データとの比較",
        ItemFamily::Timeline,
        ChartKind::Bar,
    ),
    historical_segment_brand(
        ModeId::HistoricalBrandImageSegmentBrand,
        "ブランドイメージ分析（セグメント、ブランド: X=ブランドイメージ×過去比較）",
        "単一セグメント・単一ブランドにおける過去データとの比較（ブランドイメージ項目）",
        ItemFamily::BrandImage,
        ChartKind::Bar,
    ),
    historical_brands_comparison(
        ModeId::HistoricalBrandImageBrandsComparison,
        "ブランドイメージ分析（セグメント、ブランドイメージ: X=ブランド×過去比較）",
        "単一セグメント・単一ブランドイメージ項目における複数ブランドの過去データとの比較",
        ItemFamily::BrandImage,
        ChartKind::Bar,
    ),
    historical_segment_brand(
        ModeId::HistoricalBrandPowerSegmentBrand,
        "ブランドパワー分析①（セグメント、ブランド: X=現在パワー×過去比較）",
        "単一セグメント・単一ブランドにおける過去データとの比較（ブランドパワー）",
        ItemFamily::BrandPower,
        ChartKind::Radar,
    ),
    historical_segment_brand(
        ModeId::HistoricalFuturePowerSegmentBrand,
        "ブランドパワー分析②（セグメント、ブランド: X=将来性パワー×過去比較）",
        "単一セグメント・単一ブランドにおける過去データとの比較（将来性パワー）",
        ItemFamily::FuturePower,
        ChartKind::Radar,
    ),
    historical_segment_brand(
        ModeId::HistoricalArchetypeSegmentBrand,
        "アーキタイプ分析（セグメント、ブランド: X=アーキタイプ×過去比較）",
        "単一セグメント・単一ブランドにおける過去データとの比較（アーキタイプ）",
        ItemFamily::Archetype,
        ChartKind::Radar,
    ),
];

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
