//! Extractor module: the seam to the external video extraction tool.
//!
//! Everything hard about talking to a video platform (scraping, format
//! negotiation, throttling, muxing) happens behind the [`Extractor`] trait.
//! This crate only tells the extractor *what* to fetch and *where* to put it.
//!
//! # Example
//!
//! ```ignore
//! use tubecheck_core::extractor::{ExtractOptions, Extractor, Quality, YtDlpExtractor};
//!
//! let extractor = YtDlpExtractor::with_defaults();
//! let version = extractor.validate().await?;
//!
//! let info = extractor
//!     .extract_info("https://www.youtube.com/watch?v=jNQXAC9IVRw", &ExtractOptions::metadata_only())
//!     .await?;
//! println!("{}", info.title_or_unknown());
//!
//! let options = ExtractOptions::for_download(workspace.path(), Quality::Best)?;
//! extractor.download("https://www.youtube.com/watch?v=jNQXAC9IVRw", &options).await?;
//! ```

mod config;
mod error;
mod traits;
mod types;
mod ytdlp;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use traits::Extractor;
pub use types::{ExtractOptions, Quality, VideoMetadata, OUTPUT_NAME_TEMPLATE};
pub use ytdlp::YtDlpExtractor;
