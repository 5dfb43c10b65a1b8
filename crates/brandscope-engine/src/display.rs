//! Human-readable labels for chart categories and series.

use std::collections::HashMap;

use brandscope_core::dataset::Dataset;
use brandscope_core::labels::{item_label, segment_display_name};
use indexmap::IndexSet;

use crate::registry::DimensionKind;

/// Turns raw segment labels, brand keys and item keys into display text.
///
/// Segments lose their decorative sheet suffix, items map to their family
/// label, and brands pass through unless an anonymisation map is installed.
#[derive(Debug, Clone, Default)]
pub struct DisplayNames {
    brands: HashMap<String, String>,
}

impl DisplayNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace each brand with `ブランド{n}`, numbered in the order given.
    #[must_use]
    pub fn anonymized<'a, I>(brands: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let brands = brands
            .into_iter()
            .collect::<IndexSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(idx, brand)| (brand.to_string(), format!("ブランド{}", idx + 1)))
            .collect();
        Self { brands }
    }

    /// Display override for one brand key.
    #[must_use]
    pub fn with_brand(mut self, key: impl Into<String>, display: impl Into<String>) -> Self {
        self.brands.insert(key.into(), display.into());
        self
    }

    #[must_use]
    pub fn is_anonymized(&self) -> bool {
        !self.brands.is_empty()
    }

    #[must_use]
    pub fn segment(&self, label: &str) -> String {
        segment_display_name(label)
    }

    /// Brands without an override keep their key.
    #[must_use]
    pub fn brand(&self, key: &str) -> String {
        self.brands
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    #[must_use]
    pub fn item(&self, key: &str) -> String {
        item_label(key).to_string()
    }

    #[must_use]
    pub fn label(&self, kind: DimensionKind, key: &str) -> String {
        match kind {
            DimensionKind::Item => self.item(key),
            DimensionKind::Segment => self.segment(key),
            DimensionKind::Brand => self.brand(key),
        }
    }
}

/// Every brand key across `datasets`, first-seen order.
#[must_use]
pub fn unique_brands<'a, I>(datasets: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Dataset>,
{
    let mut seen = IndexSet::new();
    for dataset in datasets {
        for (_, segment) in dataset.segments() {
            seen.extend(segment.brand_keys());
        }
    }
    seen.into_iter().collect()
}
