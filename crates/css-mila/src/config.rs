//! Configuration types for the css-mila plugin.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::minify::MinifyOptions;

fn default_true() -> bool {
    true
}

/// One configured source/destination pair.
///
/// `src` is resolved relative to the build root, `dest` relative to the
/// configured output directory. Entries with an empty `src` or `dest` are
/// dropped during option normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Source file path, relative to the build root
    pub src: String,

    /// Destination file path, relative to the output directory
    pub dest: String,
}

impl Target {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

/// Options for the css-mila plugin
///
/// Defaults match the original plugin: minification on, verbose on, no
/// targets. Use the `with_*` builders or deserialize from a config file.
///
/// # Example
///
/// ```rust
/// use css_mila::{CssMilaOptions, Target};
///
/// let options = CssMilaOptions::new()
///     .with_out_dir("dist")
///     .with_target(Target::new("index.css", "index.css"))
///     .with_minify(true);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CssMilaOptions {
    /// Output directory, relative to the build root
    ///
    /// Normalized to always end with `/`; a redundant leading slash is
    /// stripped.
    #[serde(default)]
    pub out_dir: String,

    /// Enable the minification step
    #[serde(default = "default_true")]
    pub minify: bool,

    /// Options forwarded to the minifier
    #[serde(default)]
    pub minify_options: MinifyOptions,

    /// Ordered list of source/destination pairs to process
    #[serde(default)]
    pub targets: Vec<Target>,

    /// Toggle console progress and report output
    #[serde(default = "default_true")]
    pub verbose: bool,
}

impl Default for CssMilaOptions {
    fn default() -> Self {
        Self {
            out_dir: String::new(),
            minify: true,
            minify_options: MinifyOptions::default(),
            targets: Vec::new(),
            verbose: true,
        }
    }
}

impl CssMilaOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_out_dir(mut self, out_dir: impl Into<String>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Enable or disable minification
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Set the minifier options
    pub fn with_minify_options(mut self, options: MinifyOptions) -> Self {
        self.minify_options = options;
        self
    }

    /// Add one target
    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Replace the target list
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    /// Enable or disable console output
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Normalize options once at plugin construction.
    ///
    /// Strips a redundant leading slash from `out_dir`, appends the trailing
    /// slash, and drops targets with an empty `src` or `dest`.
    pub fn normalize(mut self) -> Self {
        let mut out_dir = self.out_dir.trim_start_matches('/').to_string();
        if !out_dir.ends_with('/') {
            out_dir.push('/');
        }
        self.out_dir = out_dir;
        self.targets.retain(|t| !t.src.is_empty() && !t.dest.is_empty());
        self
    }

    /// Validate normalized options.
    ///
    /// A degenerate `out_dir` (empty input normalizes to `"/"`) or an empty
    /// target list rejects the whole run before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.out_dir.len() <= 1 {
            return Err(ConfigError::OutDirInvalid(self.out_dir.clone()));
        }
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        Ok(())
    }
}
