//! PLY file loading functions

use crate::error::{ConvertError, FormatError};
use crate::ply::decoder::decode_vertices;
use crate::ply::header::{PlyHeader, property_index};
use crate::ply::vertex::{PlyVertex, SH_DC_PROPERTIES};
use std::path::Path;
use tracing::{debug, info, warn};

/// Parsed header together with the decoded vertices, in file order.
#[derive(Debug)]
pub struct PlyCloud {
    pub header: PlyHeader,
    pub vertices: Vec<PlyVertex>,
}

impl PlyCloud {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the vertex element declares all SH DC properties.
    pub fn has_color(&self) -> bool {
        self.header.vertex_element().is_ok_and(|e| {
            SH_DC_PROPERTIES
                .iter()
                .all(|name| property_index(e, name).is_some())
        })
    }
}

/// Parse a complete PLY file held in memory.
pub fn parse_ply(data: &[u8], require_color: bool) -> Result<PlyCloud, FormatError> {
    let header = PlyHeader::parse(data)?;
    let vertices = decode_vertices(&header, data, require_color)?;
    Ok(PlyCloud { header, vertices })
}

/// Load all vertices of a Gaussian splat PLY file.
///
/// The whole file is read in one pass; the returned vertices keep file order.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_vertices_from_ply(path: &Path, require_color: bool) -> Result<PlyCloud, ConvertError> {
    debug!("Loading PLY vertices from: {}", path.display());
    let data = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;

    let cloud = parse_ply(&data, require_color).map_err(|e| {
        warn!("Failed to parse PLY file: {}", e);
        ConvertError::format(path, e)
    })?;

    let properties = cloud
        .header
        .vertex_element()
        .map(|e| e.properties.len())
        .unwrap_or_default();
    info!(
        "PLY file parsed: {} vertices, {} vertex properties",
        cloud.len(),
        properties
    );
    Ok(cloud)
}
