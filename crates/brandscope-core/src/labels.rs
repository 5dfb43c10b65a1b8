//! Display labels for segments and chart items, plus the header-text index
//! used to locate metric columns.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::metrics::{MetricFamily, MetricKey};

/// Row-1 keyword marking a brand-image column.
pub const BRAND_IMAGE_KEYWORD: &str = "ブランドイメージ";

/// Brand-image items containing any of these are never charted.
pub const BRAND_IMAGE_BLOCKLIST: &[&str] = &["あてはまるものはない"];

static SEGMENT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[（(]BFDシート[_＿]?値?[）)]?.*?St\d+").expect("valid segment suffix regex")
});

/// Header text -> metric key, built once from the labels of every family.
static HEADER_INDEX: LazyLock<HashMap<&'static str, MetricKey>> =
    LazyLock::new(|| MetricKey::all().map(|key| (key.label(), key)).collect());

/// Item key -> display label across every fixed item family.
static ITEM_LABELS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    MetricKey::all()
        .map(|key| (key.code(), key.label()))
        .chain(Archetype::ALL.iter().map(|a| (a.key(), a.label())))
        .collect()
});

/// Strip the decorative sheet suffix from a segment label.
///
/// `全体(BFDシート_値)St4` becomes `全体`. Labels without the suffix are
/// returned trimmed.
#[must_use]
pub fn segment_display_name(label: &str) -> String {
    SEGMENT_SUFFIX.replace_all(label, "").trim().to_string()
}

#[must_use]
pub fn is_blocklisted_item(text: &str) -> bool {
    BRAND_IMAGE_BLOCKLIST.iter().any(|word| text.contains(word))
}

/// Metric key whose display label equals a header cell's text.
#[must_use]
pub fn metric_for_header(text: &str) -> Option<MetricKey> {
    HEADER_INDEX.get(text).copied()
}

/// Display label for an item key. Brand-image items and unknown keys are
/// their own label.
#[must_use]
pub fn item_label(key: &str) -> &str {
    ITEM_LABELS.get(key).copied().unwrap_or(key)
}

/// The set of items a mode's item dimension draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemFamily {
    Funnel,
    Timeline,
    BrandPower,
    FuturePower,
    Archetype,
    /// Open set discovered per workbook.
    BrandImage,
}

impl ItemFamily {
    /// Ordered item keys for closed families; `None` for brand image.
    #[must_use]
    pub fn fixed_keys(self) -> Option<Vec<&'static str>> {
        let metric_family = match self {
            ItemFamily::Funnel => MetricFamily::Funnel,
            ItemFamily::Timeline => MetricFamily::Timeline,
            ItemFamily::BrandPower => MetricFamily::BrandPower,
            ItemFamily::FuturePower => MetricFamily::FuturePower,
            ItemFamily::Archetype => return Some(Archetype::ALL.iter().map(|a| a.key()).collect()),
            ItemFamily::BrandImage => return None,
        };
        Some(metric_family.keys().iter().map(|k| k.code()).collect())
    }

    /// Whether `key` belongs to this family. Any key is accepted for brand
    /// image.
    #[must_use]
    pub fn contains(self, key: &str) -> bool {
        match self.fixed_keys() {
            Some(keys) => keys.contains(&key),
            None => true,
        }
    }
}

impl std::fmt::Display for ItemFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemFamily::Funnel => write!(f, "funnel"),
            ItemFamily::Timeline => write!(f, "timeline"),
            ItemFamily::BrandPower => write!(f, "brand_power"),
            ItemFamily::FuturePower => write!(f, "future_power"),
            ItemFamily::Archetype => write!(f, "archetype"),
            ItemFamily::BrandImage => write!(f, "brand_image"),
        }
    }
}
