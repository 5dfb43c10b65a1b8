use std::path::Path;

use brandscope_core::brands::BrandResolver;
use futures::stream::{self, StreamExt};

use crate::error::IngestError;
use crate::workbook::{parse_workbook, ParsedWorkbook};

/// Read a workbook from disk and parse it. The file read is the only await
/// point; parsing runs synchronously on the current task.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read, otherwise any
/// error from [`parse_workbook`].
pub async fn load_workbook(
    path: impl AsRef<Path>,
    resolver: &BrandResolver,
) -> Result<ParsedWorkbook, IngestError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let parsed = parse_workbook(&bytes, &file_name, resolver)?;
    tracing::info!(
        file = %file_name,
        segments = parsed.dataset.segment_count(),
        skipped = parsed.skipped.len(),
        "workbook ingested"
    );
    Ok(parsed)
}

/// Load several workbooks with at most `max_concurrent` reads in flight.
/// Results come back in input order regardless of completion order.
pub async fn load_workbooks<P>(
    paths: &[P],
    resolver: &BrandResolver,
    max_concurrent: usize,
) -> Vec<Result<ParsedWorkbook, IngestError>>
where
    P: AsRef<Path>,
{
    stream::iter(paths)
        .map(|path| load_workbook(path, resolver))
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}
