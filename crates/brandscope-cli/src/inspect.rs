use std::path::Path;

use brandscope_core::brands::BrandResolver;
use brandscope_core::labels::segment_display_name;

pub(crate) async fn run_inspect(file: &Path, resolver: &BrandResolver) -> anyhow::Result<()> {
    let parsed = brandscope_ingest::load_workbook(file, resolver).await?;
    let dataset = &parsed.dataset;

    println!("file: {}", dataset.provenance().file_name);
    println!();
    println!("{:<40} {:<24} {:>6}", "LABEL", "DISPLAY", "BRANDS");
    println!("{}", "-".repeat(72));
    for (label, segment) in dataset.segments() {
        println!(
            "{:<40} {:<24} {:>6}",
            label,
            segment_display_name(label),
            segment.len()
        );
    }

    let items = dataset.brand_image_items();
    println!();
    if items.is_empty() {
        println!("brand image items: none");
    } else {
        println!("brand image items ({}): {}", items.len(), items.join(", "));
    }

    if !parsed.skipped.is_empty() {
        println!();
        println!("skipped sheets:");
        for skipped in &parsed.skipped {
            println!("  {:<38} {}", skipped.sheet, skipped.reason);
        }
    }

    Ok(())
}
