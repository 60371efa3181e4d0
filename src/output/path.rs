//! Sheet layout and file naming
//!
//! Both sinks share the sheet names and column order defined here. The CSV
//! sink also derives one file per sheet from the output path:
//! `<stem>_video_data.csv` and `<stem>_comments_data.csv`.

use std::fmt;
use std::path::{Path, PathBuf};

/// Stem used when the output path has no file name
const FALLBACK_STEM: &str = "youtube_data";

const VIDEO_HEADERS: &[&str] = &[
    "video_id",
    "title",
    "description",
    "published_at",
    "view_count",
    "like_count",
    "comment_count",
    "duration",
    "thumbnail_url",
];

const COMMENT_HEADERS: &[&str] = &[
    "video_id",
    "comment_id",
    "text",
    "author",
    "published_at",
    "like_count",
    "parent_id",
];

/// The two sheets of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    /// One row per video
    VideoData,
    /// One row per comment or reply
    CommentsData,
}

impl Sheet {
    /// Human-readable sheet name
    pub fn name(&self) -> &'static str {
        match self {
            Sheet::VideoData => "Video Data",
            Sheet::CommentsData => "Comments Data",
        }
    }

    /// Column headers, in output order
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Sheet::VideoData => VIDEO_HEADERS,
            Sheet::CommentsData => COMMENT_HEADERS,
        }
    }

    /// File name suffix for this sheet
    pub fn slug(&self) -> &'static str {
        match self {
            Sheet::VideoData => "video_data",
            Sheet::CommentsData => "comments_data",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// File path of `sheet` for the workbook at `output`
pub fn sheet_path(output: &Path, sheet: Sheet) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_STEM);
    let file_name = format!("{}_{}.csv", stem, sheet.slug());

    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
