//! Per-target processing pipeline.
//!
//! A [`BuildRun`] owns the options and resolved build root for exactly one
//! invocation. Targets are processed strictly sequentially so that progress
//! output stays deterministic; every filesystem touch is awaited one at a
//! time. One bad target never aborts the batch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use path_clean::PathClean;
use tracing::{debug, warn};

use crate::config::{CssMilaOptions, Target};
use crate::error::TargetError;
use crate::minify::minify_css;
use crate::report;
use crate::rewrite::rewrite_imports;

/// Sizes recorded for one successfully processed target
///
/// Created by the target processor, consumed by the report printer. Sizes are
/// zero when minification is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// Destination path, relative to the output directory
    pub file: String,

    /// Source size in bytes, as reported by the minifier
    pub src_size: u64,

    /// Minified size in bytes
    pub dest_size: u64,
}

/// Resolve a root-relative path, stripping a redundant leading slash.
pub fn resolve_under(root: &Path, relative: &str) -> PathBuf {
    root.join(relative.trim_start_matches('/')).clean()
}

/// One build invocation: options plus the resolved build root.
///
/// State that the original plugin kept in module globals is threaded through
/// this struct instead, so reusing a plugin instance across builds cannot
/// leak a previous run's context.
#[derive(Debug)]
pub struct BuildRun {
    options: CssMilaOptions,
    root: PathBuf,
    base: PathBuf,
}

impl BuildRun {
    /// Create a run over `root` with already-normalized options.
    ///
    /// Import URLs are rewritten relative to the process working directory.
    pub fn new(options: CssMilaOptions, root: PathBuf) -> Self {
        let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            options,
            root,
            base,
        }
    }

    /// Override the directory import URLs are rewritten relative to.
    pub fn with_rewrite_base(mut self, base: PathBuf) -> Self {
        self.base = base;
        self
    }

    /// Process every configured target in order.
    ///
    /// Per-target failures are logged (a FAIL line plus a `warn` event) and
    /// skipped; the returned results cover the successful targets in
    /// encounter order.
    pub async fn execute(&self) -> Vec<ProcessResult> {
        let total = self.options.targets.len() as u64;
        let progress = self.progress_bar(total);

        let mut results = Vec::with_capacity(self.options.targets.len());
        for target in &self.options.targets {
            if let Some(bar) = &progress {
                bar.inc(1);
                bar.set_message(target.dest.clone());
            }

            match self.process_target(target).await {
                Ok(result) => {
                    debug!(
                        "processed {} ({} -> {} bytes)",
                        result.file, result.src_size, result.dest_size
                    );
                    results.push(result);
                }
                Err(err) => {
                    warn!("skipping {}: {err}", target.dest);
                    if let Some(bar) = &progress {
                        bar.suspend(|| report::print_fail(&self.options.out_dir, &target.dest));
                    } else {
                        report::print_fail(&self.options.out_dir, &target.dest);
                    }
                }
            }
        }

        if let Some(bar) = progress {
            bar.finish_and_clear();
        }
        results
    }

    /// Run one target through the pipeline: resolve paths, ensure the
    /// destination directory, read, rewrite imports, minify, write.
    async fn process_target(&self, target: &Target) -> Result<ProcessResult, TargetError> {
        let src = resolve_under(&self.root, &target.src);
        let dest = resolve_under(
            &self.root,
            &format!("{}{}", self.options.out_dir, target.dest),
        );

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| TargetError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let css = tokio::fs::read_to_string(&src)
            .await
            .map_err(|source| TargetError::Read {
                path: src.clone(),
                source,
            })?;

        let css = rewrite_imports(&css, &src, &self.base);

        let (css, src_size, dest_size) = if self.options.minify {
            let output = minify_css(&css, &target.dest, &self.options.minify_options)?;
            (
                output.styles,
                output.stats.original_size,
                output.stats.minified_size,
            )
        } else {
            (css, 0, 0)
        };

        tokio::fs::write(&dest, &css)
            .await
            .map_err(|source| TargetError::Write {
                path: dest.clone(),
                source,
            })?;

        Ok(ProcessResult {
            file: target.dest.clone(),
            src_size,
            dest_size,
        })
    }

    /// Overwritten `index/total filename` progress line, only when output is
    /// attended and the plugin is verbose.
    fn progress_bar(&self, total: u64) -> Option<ProgressBar> {
        if !self.options.verbose || !console::user_attended() {
            return None;
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{pos}/{len} {msg}")
                .expect("valid template"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_under_joins_relative_paths() {
        assert_eq!(
            resolve_under(Path::new("/project"), "src/index.css"),
            PathBuf::from("/project/src/index.css")
        );
    }

    #[test]
    fn resolve_under_strips_leading_slash() {
        assert_eq!(
            resolve_under(Path::new("/project"), "/dist/index.css"),
            PathBuf::from("/project/dist/index.css")
        );
    }

    #[test]
    fn resolve_under_normalizes_components() {
        assert_eq!(
            resolve_under(Path::new("/project"), "src/../dist/a.css"),
            PathBuf::from("/project/dist/a.css")
        );
    }
}
