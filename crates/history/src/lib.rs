//! Bounded per-metric history with range-filtered chart and CSV views.

pub mod buffer;
pub mod chart;
pub mod export;
pub mod range;

pub use buffer::{HistoryBuffer, DEFAULT_CAPACITY};
pub use chart::{format_series, ChartPoint};
pub use export::{export_csv, to_csv, CsvRecord, ExportError};
pub use range::{ParseRangeError, RangeSelection};
