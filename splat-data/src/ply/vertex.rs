//! PLY vertex data structures

use glam::DVec3;

/// Position properties every vertex element must declare.
pub const POSITION_PROPERTIES: [&str; 3] = ["x", "y", "z"];

/// Zeroth-order spherical-harmonic color coefficients, one per RGB channel.
pub const SH_DC_PROPERTIES: [&str; 3] = ["f_dc_0", "f_dc_1", "f_dc_2"];

/// Vertex values extracted from a Gaussian splat PLY, resolved by property name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlyVertex {
    pub position: DVec3,
    /// `None` only when the file lacks `f_dc_*` and the caller allowed it.
    pub sh_dc: Option<DVec3>,
}
