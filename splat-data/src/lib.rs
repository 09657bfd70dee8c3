//! Splat Data Crate
//!
//! Reading Gaussian splat PLY files and exporting them as colored XYZ point clouds.
//! Colors are derived from the zeroth-order spherical-harmonic coefficients
//! (`f_dc_0..2`) of each splat.

pub mod color;
pub mod convert;
pub mod error;
pub mod ply;
pub mod types;
pub mod xyz;

pub use color::{SH_C0, sh_dc_to_rgb};
pub use convert::{
    BatchSummary, ConversionReport, ConvertOptions, convert_dir, convert_file, default_output_path,
};
pub use error::{ConvertError, FormatError, FormatErrorKind};
pub use ply::{PlyCloud, PlyHeader, PlyVertex, load_vertices_from_ply, parse_ply};
pub use types::XyzPoint;
pub use xyz::XyzWriter;
