use clustory_core::{DashboardState, MetricKind};
use clustory_history::{export_csv, format_series, ExportError, RangeSelection};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name for one metric's export, e.g. `cpu-5m.csv`.
pub fn export_filename(kind: MetricKind, range: RangeSelection) -> String {
    format!("{}-{}.csv", kind.id(), range.as_str())
}

/// Write the chart series of `kind` over `range` to `dir`.
///
/// Exactly what the history chart shows is exported: the filtered samples run
/// through the chart formatter.
pub fn export_metric(
    state: &DashboardState,
    kind: MetricKind,
    range: RangeSelection,
    period: Duration,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let samples = state.history(kind).filter(range, period);
    let points  = format_series(&samples);
    export_csv(&points, dir, &export_filename(kind, range))
}
