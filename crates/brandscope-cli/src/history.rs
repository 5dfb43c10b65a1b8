use std::path::PathBuf;

use anyhow::{bail, Context};
use brandscope_core::brands::BrandResolver;
use brandscope_core::snapshot::SnapshotCollection;
use brandscope_core::AppConfig;
use brandscope_engine::{
    unique_brands, ChartDataPoint, DisplayNames, Engine, ModeId, Selection, Source,
};

use crate::chart::{print_points, resolve_segment_names};

/// Load every workbook as a snapshot and build chart rows for a historical
/// mode. Snapshots named in `inactive` are left out of the series.
pub(crate) async fn render_history(
    files: &[PathBuf],
    mode: &str,
    inactive: &[String],
    selection: &Selection,
    anonymize: bool,
    config: &AppConfig,
    resolver: &BrandResolver,
) -> anyhow::Result<Option<Vec<ChartDataPoint>>> {
    let id: ModeId = mode.parse()?;
    let Some(descriptor) = id.descriptor() else {
        bail!("mode {id} has no registry entry");
    };
    if !descriptor.is_historical() {
        bail!("mode {id} reads a single workbook; use `chart` instead");
    }

    if files.len() > config.max_snapshots {
        bail!(
            "{} workbooks given but at most {} snapshots are compared",
            files.len(),
            config.max_snapshots
        );
    }

    let mut snapshots = SnapshotCollection::with_capacity(config.max_snapshots);
    let results = brandscope_ingest::load_workbooks(files, resolver, config.max_snapshots).await;
    for (path, result) in files.iter().zip(results) {
        let parsed = result.with_context(|| format!("loading {}", path.display()))?;
        for skipped in &parsed.skipped {
            tracing::warn!(
                file = %path.display(),
                sheet = %skipped.sheet,
                reason = %skipped.reason,
                "sheet skipped"
            );
        }
        snapshots.add(parsed.dataset)?;
    }

    for name in inactive {
        let Some(snapshot) = snapshots.find_by_name(name) else {
            bail!("no snapshot named '{name}'");
        };
        let id = snapshot.id;
        snapshots.set_active(id, false)?;
    }

    let engine = if anonymize {
        let names = DisplayNames::anonymized(unique_brands(
            snapshots.iter().map(|s| s.dataset.as_ref()),
        ));
        Engine::with_display_names(names)
    } else {
        Engine::new()
    };

    let selection = resolve_segment_names(
        selection,
        snapshots.iter().flat_map(|s| s.dataset.segment_labels()),
    );
    Ok(engine.transform(descriptor, Source::Snapshots(&snapshots), &selection)?)
}

pub(crate) async fn run_history(
    files: &[PathBuf],
    mode: &str,
    inactive: &[String],
    selection: &Selection,
    anonymize: bool,
    config: &AppConfig,
    resolver: &BrandResolver,
) -> anyhow::Result<()> {
    let points =
        render_history(files, mode, inactive, selection, anonymize, config, resolver).await?;
    print_points(points.as_deref())
}
