//! Hand-built datasets shared by the transform tests.

use brandscope_core::archetype::derive_profile;
use brandscope_core::dataset::{BrandImageMap, BrandRecord, Dataset, DatasetBuilder};
use brandscope_core::metrics::MetricKey;

pub(super) const MALE_20S: &str = "男性20代(BFDシート_値)St5";

pub(super) struct Fixture {
    builder: DatasetBuilder,
}

impl Fixture {
    pub(super) fn new(file_name: &str) -> Self {
        Self {
            builder: DatasetBuilder::new(file_name),
        }
    }

    pub(super) fn segment(mut self, label: &str) -> Self {
        self.builder.segment(label);
        self
    }

    pub(super) fn brand(
        mut self,
        segment: &str,
        brand: &str,
        metrics: &[(MetricKey, f64)],
        images: &[(&str, f64)],
    ) -> Self {
        let images: BrandImageMap = images
            .iter()
            .map(|(name, score)| ((*name).to_string(), *score))
            .collect();
        let mut record = BrandRecord::default();
        for (key, value) in metrics {
            record.metrics.set(*key, *value);
        }
        record.archetypes = Some(derive_profile(&images));
        self.builder.brand(segment, brand, record, images);
        self
    }

    pub(super) fn build(self) -> Dataset {
        self.builder.build()
    }
}

/// Overall with Acme and Beta, a male segment with Acme only.
pub(super) fn survey() -> Dataset {
    Fixture::new("survey.xlsx")
        .brand(
            "Overall",
            "Acme",
            &[(MetricKey::Ft, 40.0), (MetricKey::Fw, 20.0), (MetricKey::Bp1, 3.5)],
            &[("楽しい", 12.0), ("誠実な", 8.0), ("大胆な", 8.0)],
        )
        .brand(
            "Overall",
            "Beta",
            &[(MetricKey::Ft, 55.0), (MetricKey::Fw, 25.0)],
            &[("楽しい", 3.0), ("誠実な", 9.0), ("大胆な", 1.0)],
        )
        .brand(MALE_20S, "Acme", &[(MetricKey::Ft, 30.0)], &[("楽しい", 6.0)])
        .build()
}
