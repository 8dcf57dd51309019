use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// A row that can be written to CSV as ordered `(field, value)` pairs.
pub trait CsvRecord {
    fn fields(&self) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data to export")]
    NoData,

    #[error("cannot write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render `records` as comma-separated text.
///
/// The header comes from the first record's field names. Values are not
/// quoted. Returns `None` for an empty slice.
pub fn to_csv<R: CsvRecord>(records: &[R]) -> Option<String> {
    let first  = records.first()?;
    let header = first
        .fields()
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header);
    lines.extend(records.iter().map(|r| {
        r.fields()
            .into_iter()
            .map(|(_, value)| value)
            .collect::<Vec<_>>()
            .join(",")
    }));

    Some(lines.join("\n"))
}

/// Write `records` as CSV to `dir/filename`, creating `dir` if needed.
///
/// Nothing is written for an empty slice; [`ExportError::NoData`] is returned
/// so the caller can tell the user.
pub fn export_csv<R: CsvRecord>(
    records: &[R],
    dir: impl AsRef<Path>,
    filename: &str,
) -> Result<PathBuf, ExportError> {
    let Some(body) = to_csv(records) else {
        debug!(filename, "export skipped: empty series");
        return Err(ExportError::NoData);
    };

    let dir  = dir.as_ref();
    let path = dir.join(filename);

    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, body).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Exported {} rows to {}", records.len(), path.display());
    Ok(path)
}
