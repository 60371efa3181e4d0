//! Export sinks
//!
//! A sink receives the two finished datasets, videos and comments, and writes
//! them as two sheets. The pipeline does not care about the file format:
//! [`sink_for_path`] picks an Excel workbook ([`XlsxWorkbookSink`]) unless
//! the output path ends in `.csv` ([`CsvWorkbookSink`]).

use std::path::Path;

use crate::{Comment, Video};

pub mod csv;
pub mod path;
pub mod xlsx;

pub use self::csv::CsvWorkbookSink;
pub use path::{sheet_path, Sheet};
pub use xlsx::XlsxWorkbookSink;

/// Timestamp layout for `published_at` cells (naive UTC)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Workbook write error
    #[error("XLSX error: {0}")]
    XlsxError(String),

    /// Buffer flush error
    #[error("flush error: {0}")]
    FlushError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a harvest's two datasets
pub trait ExportSink {
    /// Write videos and comments, each as one sheet, in the given order
    fn export(&mut self, videos: &[Video], comments: &[Comment]) -> OutputResult<()>;
}

/// Export sink matching the extension of `output`
///
/// `.csv` (any case) selects [`CsvWorkbookSink`]; everything else, including
/// the default `youtube_data.xlsx`, selects [`XlsxWorkbookSink`].
pub fn sink_for_path(output: &Path) -> Box<dyn ExportSink> {
    match output.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Box::new(CsvWorkbookSink::new(output)),
        _ => Box::new(XlsxWorkbookSink::new(output)),
    }
}

/// Sink that keeps the records in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Exported videos
    pub videos: Vec<Video>,
    /// Exported comments
    pub comments: Vec<Comment>,
    /// Number of export calls
    pub exports: usize,
}

impl ExportSink for MemorySink {
    fn export(&mut self, videos: &[Video], comments: &[Comment]) -> OutputResult<()> {
        self.videos = videos.to_vec();
        self.comments = comments.to_vec();
        self.exports += 1;
        Ok(())
    }
}
