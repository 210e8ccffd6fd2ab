//! Minifier adapter around lightningcss.
//!
//! Parses, minifies, and re-prints a stylesheet, reporting original and
//! minified byte sizes. Minifier failures are propagated to the caller so
//! they can be handled as a per-target failure rather than silently
//! producing empty output.

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions as StylesheetMinifyOptions, ParserOptions, StyleSheet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options forwarded to the minifier
///
/// Only the knobs the adapter can meaningfully pass on to lightningcss are
/// recognized here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinifyOptions {
    /// Skip over unrecognized rules and declarations instead of failing
    #[serde(default)]
    pub error_recovery: bool,
}

/// Original and minified byte sizes of one minification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyStats {
    pub original_size: u64,
    pub minified_size: u64,
}

/// Minified stylesheet text plus its size stats
#[derive(Debug, Clone)]
pub struct MinifyOutput {
    pub styles: String,
    pub stats: MinifyStats,
}

/// Errors from the minification pipeline
///
/// lightningcss errors borrow the source text, so they are stringified at
/// the boundary.
#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("failed to parse CSS from {filename}: {message}")]
    Parse { filename: String, message: String },

    #[error("failed to minify CSS from {filename}: {message}")]
    Minify { filename: String, message: String },

    #[error("failed to print CSS from {filename}: {message}")]
    Print { filename: String, message: String },
}

/// Minify CSS text through lightningcss.
///
/// # Arguments
///
/// * `source` - CSS source text
/// * `filename` - Name used in error messages
/// * `options` - Recognized minifier options
pub fn minify_css(
    source: &str,
    filename: &str,
    options: &MinifyOptions,
) -> Result<MinifyOutput, MinifyError> {
    let mut stylesheet = StyleSheet::parse(
        source,
        ParserOptions {
            filename: filename.to_string(),
            error_recovery: options.error_recovery,
            ..Default::default()
        },
    )
    .map_err(|e| MinifyError::Parse {
        filename: filename.to_string(),
        message: format!("{e:?}"),
    })?;

    stylesheet
        .minify(StylesheetMinifyOptions::default())
        .map_err(|e| MinifyError::Minify {
            filename: filename.to_string(),
            message: format!("{e:?}"),
        })?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| MinifyError::Print {
            filename: filename.to_string(),
            message: format!("{e:?}"),
        })?;

    let stats = MinifyStats {
        original_size: source.len() as u64,
        minified_size: result.code.len() as u64,
    };

    Ok(MinifyOutput {
        styles: result.code,
        stats,
    })
}
