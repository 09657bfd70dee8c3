//! Conversion run and logging setup.

use crate::Args;
use crate::errors::AppError;
use splat_data::{ConvertOptions, convert_dir, convert_file};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
    /// Ignore `RUST_LOG` and always use `level`.
    pub ignore_env: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ignore_env: false,
        }
    }
}

impl LoggingConfig {
    /// Only warnings and errors; hides progress lines. Takes precedence over `RUST_LOG`.
    pub fn quiet() -> Self {
        Self {
            level: "warn".to_string(),
            ignore_env: true,
        }
    }

    fn for_args(args: &Args) -> Self {
        if args.quiet {
            Self::quiet()
        } else {
            Self::default()
        }
    }
}

/// `RUST_LOG` overrides the configured level unless the config ignores it.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    if config.ignore_env {
        return EnvFilter::new(&config.level);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber.
pub fn init_logging(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .init();
}

fn options_for_args(args: &Args) -> ConvertOptions {
    let mut options = ConvertOptions::default().with_precision(args.precision);
    if args.quiet {
        options = options.with_progress_interval(0);
    }
    if args.fallback_gray {
        options = options.with_gray_fallback();
    }
    options
}

/// Initialize logging and run the conversion described by `args`.
pub fn run(args: &Args) -> Result<(), AppError> {
    init_logging(&LoggingConfig::for_args(args));
    execute(args)
}

fn execute(args: &Args) -> Result<(), AppError> {
    let options = options_for_args(args);

    if args.input.is_dir() {
        let summary = convert_dir(&args.input, args.output.as_deref(), &options)?;
        if !summary.is_success() {
            for failure in &summary.failed {
                error!("Failed: {}", failure);
            }
            return Err(AppError::BatchFailed {
                failed: summary.failed_count(),
                total: summary.total(),
            });
        }
        info!("Converted {} files", summary.succeeded());
        Ok(())
    } else if args.input.is_file() {
        let report = convert_file(&args.input, args.output.as_deref(), &options)?;
        info!("Wrote {} points to {}", report.points, report.output.display());
        Ok(())
    } else {
        Err(AppError::InputNotFound(args.input.clone()))
    }
}
