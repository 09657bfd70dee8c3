//! Splat to XYZ
//!
//! Converts 3D Gaussian Splatting PLY files into colored XYZ point clouds.
//!
//! Usage:
//! - `splat-to-xyz input.ply` writes `input.xyz` next to the input
//! - `splat-to-xyz input.ply output.xyz`
//! - `splat-to-xyz ./plys/ ./xyz/` converts every PLY file in a directory

mod app;
mod errors;

use clap::Parser;
use std::path::PathBuf;

/// Convert Gaussian splat PLY files to XYZ point cloud format
#[derive(Parser, Debug)]
#[command(name = "splat-to-xyz")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input PLY file or directory containing PLY files
    input: PathBuf,

    /// Output XYZ file or directory (default: next to the input with .xyz extension)
    output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Decimal places written for each coordinate
    #[arg(long, default_value_t = splat_data::xyz::DEFAULT_PRECISION)]
    precision: usize,

    /// Write mid gray for files without f_dc_* properties instead of failing
    #[arg(long)]
    fallback_gray: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = app::run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
