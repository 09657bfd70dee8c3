//! Output point type for XYZ export.

use crate::color::sh_dc_to_rgb;
use crate::ply::PlyVertex;
use glam::DVec3;

/// A colored point as written to one XYZ line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyzPoint {
    /// Position in world space.
    pub position: DVec3,
    /// Display RGB, one byte per channel.
    pub color: [u8; 3],
}

impl XyzPoint {
    /// Create a new point with position and color.
    pub fn new(position: DVec3, color: [u8; 3]) -> Self {
        Self { position, color }
    }

    /// Derive the display point of a splat vertex.
    ///
    /// `fallback` is used when the vertex has no SH coefficients.
    pub fn from_vertex(vertex: &PlyVertex, fallback: [u8; 3]) -> Self {
        Self {
            position: vertex.position,
            color: vertex.sh_dc.map(sh_dc_to_rgb).unwrap_or(fallback),
        }
    }
}

impl From<&PlyVertex> for XyzPoint {
    fn from(vertex: &PlyVertex) -> Self {
        Self::from_vertex(vertex, crate::color::FALLBACK_GRAY)
    }
}
