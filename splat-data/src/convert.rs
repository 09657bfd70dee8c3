//! Single-file and directory conversion from splat PLY to XYZ.

use crate::color::FALLBACK_GRAY;
use crate::error::ConvertError;
use crate::ply::load_vertices_from_ply;
use crate::types::XyzPoint;
use crate::xyz::{DEFAULT_PRECISION, XyzWriter};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Input extension picked up by directory conversion.
pub const PLY_EXTENSION: &str = "ply";

/// Extension given to generated files.
pub const XYZ_EXTENSION: &str = "xyz";

/// Vertices between two progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 200_000;

/// Conversion settings shared by single-file and batch runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Decimals written per coordinate.
    pub precision: usize,
    /// Log progress every this many vertices; `0` disables progress lines.
    pub progress_interval: usize,
    /// Color for files without `f_dc_*` properties. `None` makes those files fail.
    pub fallback_color: Option<[u8; 3]>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            fallback_color: None,
        }
    }
}

impl ConvertOptions {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Write uncolored files with mid gray instead of rejecting them.
    pub fn with_gray_fallback(mut self) -> Self {
        self.fallback_color = Some(FALLBACK_GRAY);
        self
    }
}

/// Outcome of one successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub points: usize,
    /// False when the fallback color was written for every point.
    pub has_color: bool,
}

/// Aggregate result of a directory conversion.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: Vec<ConversionReport>,
    pub failed: Vec<ConvertError>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.converted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded() + self.failed_count()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// `input` with its extension replaced by `.xyz`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(XYZ_EXTENSION)
}

/// Convert one PLY file to XYZ.
///
/// The input is fully parsed before the output file is created, so a format
/// error never leaves an output file behind.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);

    info!("Reading: {}", input.display());
    let cloud = load_vertices_from_ply(input, options.fallback_color.is_none())?;
    let total = cloud.len();
    let has_color = cloud.has_color();
    if !has_color {
        warn!("No f_dc_* properties found, writing fallback color for every point");
    }

    info!("Writing: {}", output.display());
    let io_err = |e| ConvertError::io(&output, e);
    let mut writer = XyzWriter::create(&output)
        .map_err(io_err)?
        .with_precision(options.precision);
    let fallback = options.fallback_color.unwrap_or(FALLBACK_GRAY);

    for (i, vertex) in cloud.vertices.iter().enumerate() {
        writer
            .write_point(&XyzPoint::from_vertex(vertex, fallback))
            .map_err(io_err)?;

        let done = i + 1;
        if options.progress_interval > 0 && done % options.progress_interval == 0 {
            info!("Processed {}/{} vertices", done, total);
        }
    }
    let points = writer.points_written();
    writer.finish().map_err(io_err)?;

    info!("Done! Output: {}", output.display());
    Ok(ConversionReport {
        input: input.to_path_buf(),
        output,
        points,
        has_color,
    })
}

/// PLY files directly inside `dir`, sorted by path.
pub fn find_ply_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let io_err = |e| ConvertError::io(dir, e);
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_ply = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PLY_EXTENSION));
        if is_ply && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Convert every PLY file in `input_dir` into `output_dir` (default: `input_dir`).
///
/// Per-file failures are logged and collected; only problems with the
/// directories themselves abort the run.
#[tracing::instrument(skip_all, fields(input_dir = %input_dir.display()))]
pub fn convert_dir(
    input_dir: &Path,
    output_dir: Option<&Path>,
    options: &ConvertOptions,
) -> Result<BatchSummary, ConvertError> {
    if !input_dir.is_dir() {
        return Err(ConvertError::NotADirectory(input_dir.to_path_buf()));
    }
    let output_dir = output_dir.unwrap_or(input_dir);
    std::fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;

    let inputs = find_ply_files(input_dir)?;
    info!("Found {} PLY files", inputs.len());

    let mut summary = BatchSummary::default();
    for (i, input) in inputs.iter().enumerate() {
        info!(
            "[{}/{}] Processing {}",
            i + 1,
            inputs.len(),
            input.file_name().unwrap_or_default().to_string_lossy()
        );

        let output = output_dir.join(xyz_file_name(input));
        match convert_file(input, Some(&output), options) {
            Ok(report) => summary.converted.push(report),
            Err(e) => {
                error!("Conversion failed: {}", e);
                summary.failed.push(e);
            }
        }
    }

    info!(
        "Batch complete: {} succeeded, {} failed",
        summary.succeeded(),
        summary.failed_count()
    );
    Ok(summary)
}

fn xyz_file_name(input: &Path) -> std::ffi::OsString {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(XYZ_EXTENSION);
    name
}
