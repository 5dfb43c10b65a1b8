use brandscope_core::dataset::BrandImageMap;
use brandscope_core::labels::is_blocklisted_item;

/// The `count` highest-scoring brand-image items, best first.
///
/// Blocklisted items never appear. Ties keep column discovery order.
#[must_use]
pub fn top_items(images: &BrandImageMap, count: usize) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = images
        .iter()
        .filter(|(name, _)| !is_blocklisted_item(name))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(count)
        .map(|(name, _)| name.to_string())
        .collect()
}
