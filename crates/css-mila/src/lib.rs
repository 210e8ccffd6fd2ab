//! Build-tool plugin that copies CSS files into an output directory.
//!
//! For every configured target the plugin resolves source and destination
//! paths, rewrites relative `@import` URLs so they stay valid after the file
//! moves, optionally minifies through lightningcss, writes the result, and
//! prints an aligned size report.
//!
//! The host bundler hands the plugin its resolved configuration once via
//! [`CssMilaPlugin::config_resolved`]; the whole pipeline then runs once per
//! build in [`CssMilaPlugin::close_bundle`]. That call never propagates an
//! error to the host: configuration problems and per-target failures are
//! logged and the plugin returns control.
//!
//! # Example
//!
//! ```rust,no_run
//! use css_mila::{CssMilaOptions, CssMilaPlugin, ResolvedConfig, Target};
//! use std::path::PathBuf;
//!
//! # async fn example() {
//! let options = CssMilaOptions::new()
//!     .with_out_dir("dist")
//!     .with_target(Target::new("index.css", "index.css"));
//!
//! let plugin = CssMilaPlugin::new(options);
//! plugin.config_resolved(ResolvedConfig {
//!     root: PathBuf::from("/project"),
//! });
//! plugin.close_bundle().await;
//! # }
//! ```

use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Instant;

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use tracing::error;

mod config;
mod error;
mod minify;
mod pipeline;
mod report;
mod rewrite;

pub use config::{CssMilaOptions, Target};
pub use error::{ConfigError, TargetError};
pub use minify::{minify_css, MinifyError, MinifyOptions, MinifyOutput, MinifyStats};
pub use pipeline::{resolve_under, BuildRun, ProcessResult};
pub use report::{format_kb, print_report};
pub use rewrite::rewrite_imports;

/// The host bundler's resolved build configuration.
///
/// Delivered once, before the main processing hook.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory target sources are resolved against
    pub root: PathBuf,
}

/// CSS copy/rewrite/minify plugin.
///
/// Options are normalized at construction; the resolved host configuration
/// arrives later through [`config_resolved`](Self::config_resolved).
#[derive(Debug)]
pub struct CssMilaPlugin {
    options: CssMilaOptions,
    config: Mutex<Option<ResolvedConfig>>,
}

impl CssMilaPlugin {
    /// Create the plugin with the given options, normalizing them once.
    pub fn new(options: CssMilaOptions) -> Self {
        Self {
            options: options.normalize(),
            config: Mutex::new(None),
        }
    }

    /// Plugin name for the host's debugging and logging.
    pub fn name(&self) -> Cow<'static, str> {
        "css-mila".into()
    }

    /// The normalized options this plugin runs with.
    pub fn options(&self) -> &CssMilaOptions {
        &self.options
    }

    /// "Configuration resolved" notification from the host.
    pub fn config_resolved(&self, config: ResolvedConfig) {
        *self.config.lock() = Some(config);
    }

    /// "Close bundle" hook: run the whole pipeline once.
    ///
    /// Validates options, iterates targets sequentially, and prints the
    /// report when verbose. Never returns an error to the host; a bad
    /// configuration logs a single validation error and processes nothing.
    pub async fn close_bundle(&self) {
        if let Err(err) = self.options.validate() {
            eprintln!("{}", format!("css-mila: {err}").red());
            return;
        }

        let Some(root) = self.config.lock().as_ref().map(|c| c.root.clone()) else {
            error!("css-mila: close_bundle called before config_resolved");
            return;
        };

        let start = Instant::now();
        if self.options.verbose {
            eprintln!("{}", "\ncss-mila working...".green());
        }

        let run = BuildRun::new(self.options.clone(), root);
        let results = run.execute().await;

        if self.options.verbose {
            report::print_report(&results, &self.options.out_dir, start.elapsed());
        }
    }
}
