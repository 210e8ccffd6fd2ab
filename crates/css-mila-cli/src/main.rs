//! css-mila CLI - run the CSS copy pipeline outside a host bundler.
//!
//! Loads plugin options from a TOML config file, hands the plugin a resolved
//! build root the way a host bundler would, and runs one build.
//!
//! # Config file
//!
//! ```toml
//! out_dir = "dist"
//! minify = true
//!
//! [[targets]]
//! src = "index.css"
//! dest = "index.css"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use css_mila::{CssMilaOptions, CssMilaPlugin, ResolvedConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Copy CSS files, rewrite relative @import URLs, and minify the result
#[derive(Parser, Debug)]
#[command(name = "css-mila", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "css-mila.toml")]
    config: PathBuf,

    /// Build root against which target sources are resolved
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Initialize the tracing subscriber.
///
/// `--verbose` wins over `RUST_LOG`; `--quiet` drops everything below error.
fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("css_mila=debug,css_mila_cli=debug")
    } else if quiet {
        EnvFilter::new("css_mila=error,css_mila_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("css_mila=info,css_mila_cli=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).without_time())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose, args.quiet);

    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file {}", args.config.display()))?;
    let mut options: CssMilaOptions = toml::from_str(&raw)
        .with_context(|| format!("invalid config file {}", args.config.display()))?;
    if args.quiet {
        options.verbose = false;
    }
    tracing::debug!(
        "loaded {} target(s) from {}",
        options.targets.len(),
        args.config.display()
    );

    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("build root {} does not exist", args.root.display()))?;

    let plugin = CssMilaPlugin::new(options);
    plugin.config_resolved(ResolvedConfig { root });
    plugin.close_bundle().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["css-mila"]);
        assert_eq!(cli.config, PathBuf::from("css-mila.toml"));
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn cli_rejects_verbose_with_quiet() {
        let result = Cli::try_parse_from(["css-mila", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_file_round_trips_into_options() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("css-mila.toml");
        std::fs::write(
            &path,
            r#"
            out_dir = "dist"
            minify = false

            [[targets]]
            src = "index.css"
            dest = "index.css"
            "#,
        )
        .expect("write config");

        let raw = std::fs::read_to_string(&path).expect("read config");
        let options: CssMilaOptions = toml::from_str(&raw).expect("parse config");
        assert_eq!(options.out_dir, "dist");
        assert!(!options.minify);
        assert_eq!(options.targets.len(), 1);
    }
}
