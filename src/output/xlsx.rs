//! Excel workbook writer
//!
//! One `.xlsx` file with a "Video Data" worksheet and a "Comments Data"
//! worksheet. Header rows are bold and always present. Counts are numeric
//! cells; timestamps are text in [`TIMESTAMP_FORMAT`]; a top-level comment's
//! `parent_id` cell is left blank.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::path::Sheet;
use super::{ExportSink, OutputError, OutputResult, TIMESTAMP_FORMAT};
use crate::{Comment, Video};

fn xlsx_error(sheet: Sheet, e: XlsxError) -> OutputError {
    OutputError::XlsxError(format!("Failed to write sheet '{}': {}", sheet, e))
}

/// Export sink writing a single two-sheet workbook
pub struct XlsxWorkbookSink {
    output: PathBuf,
}

impl XlsxWorkbookSink {
    /// Create a sink for the workbook at `output`
    ///
    /// Nothing is written until [`ExportSink::export`] is called. An existing
    /// file is replaced.
    pub fn new<P: AsRef<Path>>(output: P) -> Self {
        Self {
            output: output.as_ref().to_path_buf(),
        }
    }

    /// Workbook path
    pub fn path(&self) -> &Path {
        &self.output
    }
}

/// Add a named worksheet with its bold header row
fn add_sheet<'a>(
    workbook: &'a mut Workbook,
    sheet: Sheet,
    header_format: &Format,
) -> OutputResult<&'a mut Worksheet> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet.name())
        .map_err(|e| xlsx_error(sheet, e))?;
    for (col, header) in sheet.headers().iter().enumerate() {
        worksheet
            .write_string_with_format(0, column(col), *header, header_format)
            .map_err(|e| xlsx_error(sheet, e))?;
    }
    Ok(worksheet)
}

/// Sheet row for the `index`-th record (row 0 holds the headers)
fn data_row(sheet: Sheet, index: usize) -> OutputResult<u32> {
    u32::try_from(index + 1).map_err(|_| {
        OutputError::XlsxError(format!("Too many rows for sheet '{}': {}", sheet, index + 1))
    })
}

fn column(col: usize) -> u16 {
    // Sheets have fewer than ten columns
    col as u16
}

fn write_video(worksheet: &mut Worksheet, row: u32, video: &Video) -> Result<(), XlsxError> {
    worksheet.write_string(row, 0, video.video_id.as_str())?;
    worksheet.write_string(row, 1, video.title.as_str())?;
    worksheet.write_string(row, 2, video.description.as_str())?;
    worksheet.write_string(
        row,
        3,
        video.published_at.format(TIMESTAMP_FORMAT).to_string(),
    )?;
    worksheet.write_number(row, 4, video.view_count as f64)?;
    worksheet.write_number(row, 5, video.like_count as f64)?;
    worksheet.write_number(row, 6, video.comment_count as f64)?;
    worksheet.write_string(row, 7, video.duration.as_str())?;
    worksheet.write_string(row, 8, video.thumbnail_url.as_str())?;
    Ok(())
}

fn write_comment(worksheet: &mut Worksheet, row: u32, comment: &Comment) -> Result<(), XlsxError> {
    worksheet.write_string(row, 0, comment.video_id.as_str())?;
    worksheet.write_string(row, 1, comment.comment_id.as_str())?;
    worksheet.write_string(row, 2, comment.text.as_str())?;
    worksheet.write_string(row, 3, comment.author.as_str())?;
    worksheet.write_string(
        row,
        4,
        comment.published_at.format(TIMESTAMP_FORMAT).to_string(),
    )?;
    worksheet.write_number(row, 5, comment.like_count as f64)?;
    if let Some(parent_id) = &comment.parent_id {
        worksheet.write_string(row, 6, parent_id.as_str())?;
    }
    Ok(())
}

impl ExportSink for XlsxWorkbookSink {
    fn export(&mut self, videos: &[Video], comments: &[Comment]) -> OutputResult<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = add_sheet(&mut workbook, Sheet::VideoData, &header_format)?;
        for (index, video) in videos.iter().enumerate() {
            let row = data_row(Sheet::VideoData, index)?;
            write_video(worksheet, row, video).map_err(|e| xlsx_error(Sheet::VideoData, e))?;
        }
        debug!("Filled sheet '{}' with {} row(s)", Sheet::VideoData, videos.len());

        let worksheet = add_sheet(&mut workbook, Sheet::CommentsData, &header_format)?;
        for (index, comment) in comments.iter().enumerate() {
            let row = data_row(Sheet::CommentsData, index)?;
            write_comment(worksheet, row, comment)
                .map_err(|e| xlsx_error(Sheet::CommentsData, e))?;
        }
        debug!(
            "Filled sheet '{}' with {} row(s)",
            Sheet::CommentsData,
            comments.len()
        );

        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    OutputError::IoError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        workbook.save(&self.output).map_err(|e| {
            OutputError::XlsxError(format!("Failed to save {}: {}", self.output.display(), e))
        })?;

        info!(
            "Wrote workbook {} ({} videos, {} comments)",
            self.output.display(),
            videos.len(),
            comments.len()
        );
        Ok(())
    }
}
