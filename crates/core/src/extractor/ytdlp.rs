//! yt-dlp based extractor implementation.

use async_trait::async_trait;
use regex_lite::Regex;
use std::process::{Output, Stdio};
use std::sync::OnceLock;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use super::config::ExtractorConfig;
use super::error::ExtractorError;
use super::traits::Extractor;
use super::types::{ExtractOptions, VideoMetadata};

static ERROR_LINE: OnceLock<Regex> = OnceLock::new();

fn error_line() -> &'static Regex {
    ERROR_LINE.get_or_init(|| {
        Regex::new(r"(?m)^ERROR: (.+)$").expect("ERROR line pattern is valid")
    })
}

/// Extractor backed by the `yt-dlp` command line tool.
pub struct YtDlpExtractor {
    config: ExtractorConfig,
}

impl YtDlpExtractor {
    /// Creates a new yt-dlp extractor with the given configuration.
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Creates an extractor with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ExtractorConfig::default())
    }

    /// Builds yt-dlp arguments for a metadata-only request.
    fn build_info_args(&self, url: &str, options: &ExtractOptions) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
        ];

        if options.no_playlist() {
            args.push("--no-playlist".to_string());
        }

        Self::push_verbosity_args(&mut args, options);
        args.extend(self.config.extra_args.iter().cloned());

        args.push("--".to_string());
        args.push(url.to_string());

        args
    }

    /// Builds yt-dlp arguments for a download.
    fn build_download_args(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<Vec<String>, ExtractorError> {
        let template = options.output_template().ok_or_else(|| {
            ExtractorError::invalid_options("download requires an output directory")
        })?;

        let mut args = vec![
            "--output".to_string(),
            template.to_string_lossy().to_string(),
            "--format".to_string(),
            options.quality().format_selector().to_string(),
        ];

        if options.no_playlist() {
            args.push("--no-playlist".to_string());
        }

        // Subtitles
        args.push(if options.write_subtitles() {
            "--write-subs".to_string()
        } else {
            "--no-write-subs".to_string()
        });
        args.push(if options.write_auto_subtitles() {
            "--write-auto-subs".to_string()
        } else {
            "--no-write-auto-subs".to_string()
        });

        if options.ignore_errors() {
            args.push("--ignore-errors".to_string());
        }

        args.push("--no-progress".to_string());
        Self::push_verbosity_args(&mut args, options);
        args.extend(self.config.extra_args.iter().cloned());

        args.push("--".to_string());
        args.push(url.to_string());

        Ok(args)
    }

    fn push_verbosity_args(args: &mut Vec<String>, options: &ExtractOptions) {
        if options.quiet() {
            args.push("--quiet".to_string());
        }
        if options.no_warnings() {
            args.push("--no-warnings".to_string());
        }
    }

    /// Parses yt-dlp's `--dump-single-json` output into VideoMetadata.
    fn parse_info_output(output: &str) -> Result<VideoMetadata, ExtractorError> {
        serde_json::from_str(output).map_err(|e| ExtractorError::ParseError {
            reason: format!("Failed to parse yt-dlp output: {}", e),
        })
    }

    /// Picks the first `ERROR:` line out of yt-dlp's stderr.
    fn error_reason(stderr: &str) -> Option<String> {
        error_line()
            .captures(stderr)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// Lines of yt-dlp's stdout that say where the download went.
    fn destination_lines(stdout: &str) -> impl Iterator<Item = &str> {
        stdout.lines().map(str::trim).filter(|line| {
            line.starts_with("[download] Destination:")
                || line.starts_with("[Merger]")
                || line.ends_with("has already been downloaded")
        })
    }

    /// yt-dlp's own `WARNING:` lines.
    fn warning_lines(stderr: &str) -> impl Iterator<Item = &str> {
        stderr
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("WARNING:"))
    }

    fn log_download_output(output: &Output) {
        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in Self::destination_lines(&stdout) {
            info!("yt-dlp: {}", line);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in Self::warning_lines(&stderr) {
            warn!("yt-dlp: {}", line);
        }
    }

    /// Runs yt-dlp to completion, bounded by the configured timeout.
    async fn run(&self, args: &[String]) -> Result<Output, ExtractorError> {
        debug!("Running {:?} {:?}", self.config.binary_path, args);

        let child = Command::new(&self.config.binary_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the future (timeout or interruption) must not leave yt-dlp running
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractorError::NotFound {
                        path: self.config.binary_path.clone(),
                    }
                } else {
                    ExtractorError::Io(e)
                }
            })?;

        match timeout(
            Duration::from_secs(self.config.timeout_secs),
            child.wait_with_output(),
        )
        .await
        {
            Ok(result) => Ok(result?),
            Err(_) => Err(ExtractorError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }),
        }
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn validate(&self) -> Result<String, ExtractorError> {
        let output = self.run(&["--version".to_string()]).await?;

        if !output.status.success() {
            return Err(ExtractorError::extraction_failed(
                format!("yt-dlp --version exited with code: {:?}", output.status.code()),
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<VideoMetadata, ExtractorError> {
        let args = self.build_info_args(url, options);
        let output = self.run(&args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let reason = Self::error_reason(&stderr).unwrap_or_else(|| {
                format!("yt-dlp exited with code: {:?}", output.status.code())
            });
            return Err(ExtractorError::extraction_failed(reason, Some(stderr)));
        }

        Self::parse_info_output(&String::from_utf8_lossy(&output.stdout))
    }

    async fn download(&self, url: &str, options: &ExtractOptions) -> Result<(), ExtractorError> {
        let args = self.build_download_args(url, options)?;
        let output = self.run(&args).await?;
        Self::log_download_output(&output);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let reason = Self::error_reason(&stderr).unwrap_or_else(|| {
                format!("yt-dlp exited with code: {:?}", output.status.code())
            });

            if options.ignore_errors() {
                warn!(
                    "yt-dlp reported an error for {}, continuing without a file: {}",
                    url, reason
                );
                return Ok(());
            }
            return Err(ExtractorError::download_failed(reason, Some(stderr)));
        }

        Ok(())
    }
}
