//! CSV sheet writer
//!
//! Writes the "Video Data" and "Comments Data" sheets as two CSV files named
//! after the output path. Both files always carry a header row, even when
//! there are no records.

use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::path::{sheet_path, Sheet};
use super::{ExportSink, OutputError, OutputResult, TIMESTAMP_FORMAT};
use crate::{Comment, Video};

const DEFAULT_BUFFER_SIZE: usize = 8192; // 8KB buffer
/// CSV row for a video
#[derive(Debug, Serialize)]
struct VideoRecord<'a> {
    video_id: &'a str,
    title: &'a str,
    description: &'a str,
    published_at: String,
    view_count: u64,
    like_count: u64,
    comment_count: u64,
    duration: &'a str,
    thumbnail_url: &'a str,
}

impl<'a> From<&'a Video> for VideoRecord<'a> {
    fn from(video: &'a Video) -> Self {
        Self {
            video_id: &video.video_id,
            title: &video.title,
            description: &video.description,
            published_at: video.published_at.format(TIMESTAMP_FORMAT).to_string(),
            view_count: video.view_count,
            like_count: video.like_count,
            comment_count: video.comment_count,
            duration: &video.duration,
            thumbnail_url: &video.thumbnail_url,
        }
    }
}

/// CSV row for a comment; `parent_id` is an empty cell for top-level comments
#[derive(Debug, Serialize)]
struct CommentRecord<'a> {
    video_id: &'a str,
    comment_id: &'a str,
    text: &'a str,
    author: &'a str,
    published_at: String,
    like_count: u64,
    parent_id: &'a str,
}

impl<'a> From<&'a Comment> for CommentRecord<'a> {
    fn from(comment: &'a Comment) -> Self {
        Self {
            video_id: &comment.video_id,
            comment_id: &comment.comment_id,
            text: &comment.text,
            author: &comment.author,
            published_at: comment.published_at.format(TIMESTAMP_FORMAT).to_string(),
            like_count: comment.like_count,
            parent_id: comment.parent_id.as_deref().unwrap_or(""),
        }
    }
}

/// Export sink writing one CSV file per sheet
///
/// Chosen for a `.csv` output path; see [`super::sink_for_path`].
pub struct CsvWorkbookSink {
    output: PathBuf,
}

impl CsvWorkbookSink {
    /// Create a sink for the workbook path `output`
    ///
    /// Nothing is written until [`ExportSink::export`] is called.
    pub fn new<P: AsRef<Path>>(output: P) -> Self {
        Self {
            output: output.as_ref().to_path_buf(),
        }
    }

    /// Paths of the video and comment sheet files
    pub fn sheet_paths(&self) -> (PathBuf, PathBuf) {
        (
            sheet_path(&self.output, Sheet::VideoData),
            sheet_path(&self.output, Sheet::CommentsData),
        )
    }

    fn open_sheet(&self, sheet: Sheet) -> OutputResult<SheetWriter> {
        let path = sheet_path(&self.output, sheet);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    OutputError::IoError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        let file = File::create(&path).map_err(|e| {
            OutputError::IoError(format!("Failed to create {}: {}", path.display(), e))
        })?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);

        // Header row is written by hand so that empty sheets still get one
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(buf_writer);
        writer
            .write_record(sheet.headers())
            .map_err(|e| OutputError::CsvError(format!("Failed to write header: {}", e)))?;

        debug!("Opened sheet '{}' at {}", sheet, path.display());
        Ok(SheetWriter {
            sheet,
            path,
            writer,
            rows_written: 0,
        })
    }
}

/// One open sheet file
struct SheetWriter {
    sheet: Sheet,
    path: PathBuf,
    writer: Writer<BufWriter<File>>,
    rows_written: u64,
}

impl SheetWriter {
    fn write<R: Serialize>(&mut self, record: &R) -> OutputResult<()> {
        self.writer.serialize(record).map_err(|e| {
            OutputError::CsvError(format!("Failed to write row to '{}': {}", self.sheet, e))
        })?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush, sync to disk and return the number of rows written
    fn close(mut self) -> OutputResult<u64> {
        self.writer
            .flush()
            .map_err(|e| OutputError::FlushError(format!("Failed to flush: {}", e)))?;

        let buf_writer = self
            .writer
            .into_inner()
            .map_err(|e| OutputError::IoError(format!("Failed to get inner writer: {}", e)))?;
        let file = buf_writer
            .into_inner()
            .map_err(|e| OutputError::IoError(format!("Failed to get file handle: {}", e)))?;
        file.sync_all()
            .map_err(|e| OutputError::IoError(format!("Failed to sync file: {}", e)))?;

        info!(
            "Wrote {} row(s) to sheet '{}' ({})",
            self.rows_written,
            self.sheet,
            self.path.display()
        );
        Ok(self.rows_written)
    }
}

impl ExportSink for CsvWorkbookSink {
    fn export(&mut self, videos: &[Video], comments: &[Comment]) -> OutputResult<()> {
        let mut video_sheet = self.open_sheet(Sheet::VideoData)?;
        for video in videos {
            video_sheet.write(&VideoRecord::from(video))?;
        }
        video_sheet.close()?;

        let mut comment_sheet = self.open_sheet(Sheet::CommentsData)?;
        for comment in comments {
            comment_sheet.write(&CommentRecord::from(comment))?;
        }
        comment_sheet.close()?;

        Ok(())
    }
}
