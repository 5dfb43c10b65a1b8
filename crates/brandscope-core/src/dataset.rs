//! In-memory data model produced by one workbook parse.
//!
//! A [`Dataset`] is immutable once built: the ingestion parser assembles it
//! through [`DatasetBuilder`] and hands it out by value. Re-parsing a workbook
//! produces a brand-new dataset rather than patching an existing one.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::archetype::{Archetype, ArchetypeProfile};
use crate::metrics::{MetricBag, MetricKey};

/// Open-ended brand-image scores for one (segment, brand) pair.
///
/// Iteration order is column discovery order, which the top-K ranking relies
/// on for tie breaking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandImageMap(IndexMap<String, f64>);

impl BrandImageMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a score. A repeated item name keeps its first position.
    pub fn insert(&mut self, item: impl Into<String>, score: f64) {
        self.0.insert(item.into(), score);
    }

    #[must_use]
    pub fn get(&self, item: &str) -> Option<f64> {
        self.0.get(item).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for BrandImageMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Every closed metric for one (segment, brand) pair plus its cached
/// archetype profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub metrics: MetricBag,
    /// Computed once at ingestion from the brand-image scores.
    pub archetypes: Option<ArchetypeProfile>,
}

impl BrandRecord {
    #[must_use]
    pub fn metric(&self, key: MetricKey) -> f64 {
        self.metrics.get(key)
    }

    #[must_use]
    pub fn archetype(&self, archetype: Archetype) -> Option<f64> {
        self.archetypes.as_ref().map(|p| p.get(archetype))
    }
}

/// One respondent slice: brand key -> record, in workbook row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    brands: IndexMap<String, BrandRecord>,
}

impl Segment {
    #[must_use]
    pub fn brand(&self, key: &str) -> Option<&BrandRecord> {
        self.brands.get(key)
    }

    pub fn brand_keys(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }

    pub fn brands(&self) -> impl Iterator<Item = (&str, &BrandRecord)> {
        self.brands.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

/// Where a dataset came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub file_name: String,
    pub ingested_at: DateTime<Utc>,
}

/// The parse result of one workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    provenance: Provenance,
    segments: IndexMap<String, Segment>,
    brand_images: IndexMap<String, IndexMap<String, BrandImageMap>>,
}

impl Dataset {
    #[must_use]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    #[must_use]
    pub fn segment(&self, label: &str) -> Option<&Segment> {
        self.segments.get(label)
    }

    /// Segment labels (lookup keys, suffixes intact) in sheet order.
    pub fn segment_labels(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    pub fn segments(&self) -> impl Iterator<Item = (&str, &Segment)> {
        self.segments.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn record(&self, segment: &str, brand: &str) -> Option<&BrandRecord> {
        self.segment(segment)?.brand(brand)
    }

    /// Brand-image maps for one segment, keyed by brand.
    #[must_use]
    pub fn segment_images(&self, segment: &str) -> Option<&IndexMap<String, BrandImageMap>> {
        self.brand_images.get(segment)
    }

    #[must_use]
    pub fn brand_images(&self, segment: &str, brand: &str) -> Option<&BrandImageMap> {
        self.brand_images.get(segment)?.get(brand)
    }

    /// Every distinct brand-image item name, in first-seen order.
    #[must_use]
    pub fn brand_image_items(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for brands in self.brand_images.values() {
            for images in brands.values() {
                for name in images.item_names() {
                    seen.insert(name);
                }
            }
        }
        seen.into_iter().collect()
    }

    /// Compares everything except provenance.
    #[must_use]
    pub fn same_content(&self, other: &Dataset) -> bool {
        self.segments == other.segments && self.brand_images == other.brand_images
    }
}

/// Incrementally assembles a [`Dataset`]; consumed by [`DatasetBuilder::build`].
#[derive(Debug)]
pub struct DatasetBuilder {
    provenance: Provenance,
    segments: IndexMap<String, Segment>,
    brand_images: IndexMap<String, IndexMap<String, BrandImageMap>>,
}

impl DatasetBuilder {
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self::with_ingested_at(file_name, Utc::now())
    }

    #[must_use]
    pub fn with_ingested_at(file_name: impl Into<String>, ingested_at: DateTime<Utc>) -> Self {
        Self {
            provenance: Provenance {
                file_name: file_name.into(),
                ingested_at,
            },
            segments: IndexMap::new(),
            brand_images: IndexMap::new(),
        }
    }

    /// Registers a segment with no brands yet. Re-registering a label keeps
    /// existing content.
    pub fn segment(&mut self, label: impl Into<String>) -> &mut Self {
        let label = label.into();
        self.brand_images.entry(label.clone()).or_default();
        self.segments.entry(label).or_default();
        self
    }

    /// Stores a brand under `segment`, replacing any earlier row with the
    /// same key.
    pub fn brand(
        &mut self,
        segment: &str,
        brand: impl Into<String>,
        record: BrandRecord,
        images: BrandImageMap,
    ) -> &mut Self {
        let brand = brand.into();
        self.brand_images
            .entry(segment.to_string())
            .or_default()
            .insert(brand.clone(), images);
        self.segments
            .entry(segment.to_string())
            .or_default()
            .brands
            .insert(brand, record);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Dataset {
        Dataset {
            provenance: self.provenance,
            segments: self.segments,
            brand_images: self.brand_images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_ft(ft: f64) -> BrandRecord {
        let mut record = BrandRecord::default();
        record.metrics.set(MetricKey::Ft, ft);
        record
    }

    #[test]
    fn builder_preserves_segment_and_brand_order() {
        let mut builder = DatasetBuilder::new("survey.xlsx");
        builder
            .brand("Overall", "Beta", record_with_ft(1.0), BrandImageMap::new())
            .brand("Male 20s", "Acme", record_with_ft(2.0), BrandImageMap::new())
            .brand("Overall", "Acme", record_with_ft(3.0), BrandImageMap::new());
        let dataset = builder.build();

        let labels: Vec<_> = dataset.segment_labels().collect();
        assert_eq!(labels, ["Overall", "Male 20s"]);
        let brands: Vec<_> = dataset.segment("Overall").unwrap().brand_keys().collect();
        assert_eq!(brands, ["Beta", "Acme"]);
    }

    #[test]
    fn later_row_with_same_brand_replaces_earlier() {
        let mut builder = DatasetBuilder::new("survey.xlsx");
        builder
            .brand("Overall", "Acme", record_with_ft(1.0), BrandImageMap::new())
            .brand("Overall", "Acme", record_with_ft(9.0), BrandImageMap::new());
        let dataset = builder.build();
        let ft = dataset.record("Overall", "Acme").unwrap().metric(MetricKey::Ft);
        assert!((ft - 9.0).abs() < f64::EPSILON);
        assert_eq!(dataset.segment("Overall").unwrap().len(), 1);
    }

    #[test]
    fn same_content_ignores_ingestion_time() {
        let build = |at| {
            let mut b = DatasetBuilder::with_ingested_at("a.xlsx", at);
            b.brand("Overall", "Acme", record_with_ft(1.0), BrandImageMap::new());
            b.build()
        };
        let first = build(DateTime::<Utc>::UNIX_EPOCH);
        let second = build(Utc::now());
        assert!(first.same_content(&second));
    }

    #[test]
    fn image_map_keeps_first_position_on_repeat() {
        let mut images = BrandImageMap::new();
        images.insert("A", 1.0);
        images.insert("B", 2.0);
        images.insert("A", 3.0);
        let order: Vec<_> = images.iter().collect();
        assert_eq!(order, [("A", 3.0), ("B", 2.0)]);
    }

    #[test]
    fn brand_image_items_are_deduplicated_across_brands() {
        let mut builder = DatasetBuilder::new("survey.xlsx");
        let a: BrandImageMap = [("楽しい".to_string(), 1.0), ("誠実な".to_string(), 2.0)]
            .into_iter()
            .collect();
        let b: BrandImageMap = [("誠実な".to_string(), 1.0), ("大胆な".to_string(), 2.0)]
            .into_iter()
            .collect();
        builder
            .brand("Overall", "Acme", BrandRecord::default(), a)
            .brand("Overall", "Beta", BrandRecord::default(), b);
        let dataset = builder.build();
        assert_eq!(dataset.brand_image_items(), ["楽しい", "誠実な", "大胆な"]);
    }
}
