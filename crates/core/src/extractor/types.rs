//! Types for the extractor module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::ExtractorError;

/// Per-video file name pattern, expanded by the extractor.
pub const OUTPUT_NAME_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Which rendition of a video to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Highest quality available as a single file.
    #[default]
    Best,
    /// Lowest quality available as a single file.
    Worst,
}

impl Quality {
    /// Maps a "prefer highest quality" flag to a quality.
    pub fn from_prefer_highest(prefer_highest: bool) -> Self {
        if prefer_highest {
            Self::Best
        } else {
            Self::Worst
        }
    }

    /// Returns the format selector understood by the extractor.
    pub fn format_selector(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Worst => "worst",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_selector())
    }
}

/// Options for a single extractor call.
///
/// Built through [`ExtractOptions::metadata_only`] or
/// [`ExtractOptions::for_download`]; fields are read-only afterward so an
/// options value is always one of those two validated shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    output_dir: Option<PathBuf>,
    quality: Quality,
    no_playlist: bool,
    write_subtitles: bool,
    write_auto_subtitles: bool,
    ignore_errors: bool,
    quiet: bool,
    no_warnings: bool,
}

impl ExtractOptions {
    /// Quiet, metadata-only options used for probing.
    pub fn metadata_only() -> Self {
        Self {
            output_dir: None,
            quality: Quality::Best,
            no_playlist: true,
            write_subtitles: false,
            write_auto_subtitles: false,
            ignore_errors: false,
            quiet: true,
            no_warnings: true,
        }
    }

    /// Options for downloading a single video into `output_dir`.
    ///
    /// Playlists are not expanded, no subtitle tracks are written, and
    /// per-entry errors are tolerated. `output_dir` must be an existing
    /// directory.
    pub fn for_download(output_dir: &Path, quality: Quality) -> Result<Self, ExtractorError> {
        if !output_dir.is_dir() {
            return Err(ExtractorError::invalid_options(format!(
                "output directory does not exist: {}",
                output_dir.display()
            )));
        }

        Ok(Self {
            output_dir: Some(output_dir.to_path_buf()),
            quality,
            no_playlist: true,
            write_subtitles: false,
            write_auto_subtitles: false,
            ignore_errors: true,
            quiet: false,
            no_warnings: false,
        })
    }

    /// Directory downloads are written to, if these are download options.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Full output path template (`<dir>/%(title)s.%(ext)s`).
    pub fn output_template(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(|d| d.join(OUTPUT_NAME_TEMPLATE))
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn no_playlist(&self) -> bool {
        self.no_playlist
    }

    pub fn write_subtitles(&self) -> bool {
        self.write_subtitles
    }

    pub fn write_auto_subtitles(&self) -> bool {
        self.write_auto_subtitles
    }

    pub fn ignore_errors(&self) -> bool {
        self.ignore_errors
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn no_warnings(&self) -> bool {
        self.no_warnings
    }
}

/// Metadata resolved for a video. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub title: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
}

impl VideoMetadata {
    pub fn title_or_unknown(&self) -> String {
        or_unknown(self.title.as_ref())
    }

    pub fn duration_or_unknown(&self) -> String {
        or_unknown(self.duration.as_ref())
    }

    pub fn uploader_or_unknown(&self) -> String {
        or_unknown(self.uploader.as_ref())
    }

    pub fn view_count_or_unknown(&self) -> String {
        or_unknown(self.view_count.as_ref())
    }
}

fn or_unknown<T: fmt::Display>(value: Option<&T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
