use std::path::Path;

use anyhow::bail;
use brandscope_core::brands::BrandResolver;
use brandscope_core::labels::segment_display_name;
use brandscope_engine::{
    unique_brands, ChartDataPoint, DisplayNames, Engine, ModeId, Selection, Source,
};
use clap::Args;

/// Dimension values shared by `chart` and `history`.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct SelectionArgs {
    /// Segment (sheet label or display name) for a single-valued segment dimension
    #[arg(long)]
    pub(crate) segment: Option<String>,
    /// Segments for a multi-valued segment dimension
    #[arg(long, value_delimiter = ',')]
    pub(crate) segments: Vec<String>,
    /// Brand for a single-valued brand dimension
    #[arg(long)]
    pub(crate) brand: Option<String>,
    /// Brands for a multi-valued brand dimension
    #[arg(long, value_delimiter = ',')]
    pub(crate) brands: Vec<String>,
    /// Item key, e.g. FT or a brand image item
    #[arg(long)]
    pub(crate) item: Option<String>,
}

impl From<SelectionArgs> for Selection {
    fn from(args: SelectionArgs) -> Self {
        Selection {
            segment: args.segment,
            segments: args.segments,
            brand: args.brand,
            brands: args.brands,
            item: args.item,
        }
    }
}

/// Replace segment display names, as `inspect` prints them, with the sheet
/// label they belong to. Exact labels and unknown names are kept.
pub(crate) fn resolve_segment_names<'a, I>(selection: &Selection, labels: I) -> Selection
where
    I: IntoIterator<Item = &'a str>,
{
    let labels: Vec<&str> = labels.into_iter().collect();
    let resolve = |name: &str| -> String {
        if labels.iter().any(|label| *label == name) {
            return name.to_string();
        }
        labels
            .iter()
            .find(|label| segment_display_name(label) == name.trim())
            .map_or_else(|| name.to_string(), |label| (*label).to_string())
    };

    let mut resolved = selection.clone();
    resolved.segment = selection.segment.as_deref().map(resolve);
    resolved.segments = selection.segments.iter().map(|s| resolve(s)).collect();
    resolved
}

/// Load one workbook and build chart rows for a single-dataset mode.
pub(crate) async fn render_chart(
    file: &Path,
    mode: &str,
    selection: &Selection,
    anonymize: bool,
    resolver: &BrandResolver,
) -> anyhow::Result<Option<Vec<ChartDataPoint>>> {
    let id: ModeId = mode.parse()?;
    let Some(descriptor) = id.descriptor() else {
        bail!("mode {id} has no registry entry");
    };
    if descriptor.is_historical() {
        bail!("mode {id} compares snapshots; use `history` instead");
    }

    let parsed = brandscope_ingest::load_workbook(file, resolver).await?;
    for skipped in &parsed.skipped {
        tracing::warn!(sheet = %skipped.sheet, reason = %skipped.reason, "sheet skipped");
    }

    let engine = if anonymize {
        Engine::with_display_names(DisplayNames::anonymized(unique_brands([&parsed.dataset])))
    } else {
        Engine::new()
    };

    let selection = resolve_segment_names(selection, parsed.dataset.segment_labels());
    Ok(engine.transform(descriptor, Source::Dataset(&parsed.dataset), &selection)?)
}

pub(crate) async fn run_chart(
    file: &Path,
    mode: &str,
    selection: &Selection,
    anonymize: bool,
    resolver: &BrandResolver,
) -> anyhow::Result<()> {
    let points = render_chart(file, mode, selection, anonymize, resolver).await?;
    print_points(points.as_deref())
}

/// Print chart rows as pretty JSON, or a note when the selection was
/// incomplete.
pub(crate) fn print_points(points: Option<&[ChartDataPoint]>) -> anyhow::Result<()> {
    match points {
        Some(points) => println!("{}", serde_json::to_string_pretty(points)?),
        None => eprintln!("nothing to render: the selection is missing a value this mode needs"),
    }
    Ok(())
}
