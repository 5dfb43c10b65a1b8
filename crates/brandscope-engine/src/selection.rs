use serde::{Deserialize, Serialize};

use crate::registry::DimensionKind;

/// Caller choices for one transform. Single-valued roles read the singular
/// field, multi-valued roles the plural one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub segment: Option<String>,
    pub segments: Vec<String>,
    pub brand: Option<String>,
    pub brands: Vec<String>,
    pub item: Option<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    #[must_use]
    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = segments.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// The single chosen value for `kind`. Blank strings count as unset.
    #[must_use]
    pub fn single(&self, kind: DimensionKind) -> Option<&str> {
        let value = match kind {
            DimensionKind::Item => self.item.as_deref(),
            DimensionKind::Segment => self.segment.as_deref(),
            DimensionKind::Brand => self.brand.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// The chosen list for `kind`, in caller order. The item dimension has
    /// no list form and yields its single value, if any.
    #[must_use]
    pub fn multiple(&self, kind: DimensionKind) -> Vec<&str> {
        let values: Vec<&str> = match kind {
            DimensionKind::Item => self.item.as_deref().into_iter().collect(),
            DimensionKind::Segment => self.segments.iter().map(String::as_str).collect(),
            DimensionKind::Brand => self.brands.iter().map(String::as_str).collect(),
        };
        values.into_iter().filter(|v| !v.trim().is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_single_values_are_unset() {
        let selection = Selection::new().with_segment("  ").with_brand("Acme");
        assert_eq!(selection.single(DimensionKind::Segment), None);
        assert_eq!(selection.single(DimensionKind::Brand), Some("Acme"));
        assert_eq!(selection.single(DimensionKind::Item), None);
    }

    #[test]
    fn multiple_keeps_caller_order_and_drops_blanks() {
        let selection = Selection::new().with_brands(["Beta", "", "Acme"]);
        assert_eq!(selection.multiple(DimensionKind::Brand), ["Beta", "Acme"]);
        assert!(selection.multiple(DimensionKind::Segment).is_empty());
    }

    #[test]
    fn item_list_is_the_single_item() {
        let selection = Selection::new().with_item("FT");
        assert_eq!(selection.multiple(DimensionKind::Item), ["FT"]);
    }

    #[test]
    fn missing_json_fields_default() {
        let selection: Selection = serde_json::from_str(r#"{"segment":"Overall"}"#).unwrap();
        assert_eq!(selection.segment.as_deref(), Some("Overall"));
        assert!(selection.brands.is_empty());
    }
}
