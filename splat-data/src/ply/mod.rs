//! PLY file loading and parsing

mod decoder;
mod header;
mod loader;
mod scalar;
mod vertex;

pub use decoder::{VertexLayout, decode_vertices};
pub use header::{PlyEncoding, PlyHeader, VERTEX_ELEMENT};
pub use loader::{PlyCloud, load_vertices_from_ply, parse_ply};
pub use vertex::{POSITION_PROPERTIES, PlyVertex, SH_DC_PROPERTIES};
