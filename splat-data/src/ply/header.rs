//! PLY header parsing

use crate::error::FormatError;
use crate::ply::scalar::scalar_size;
use serde_ply::{ElementDef, PlyFormat, PropertyType};
use std::io::Cursor;
use tracing::debug;

/// Name of the element that carries per-point data.
pub const VERTEX_ELEMENT: &str = "vertex";

/// Body encodings the decoder can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyEncoding {
    Ascii,
    BinaryLittleEndian,
}

/// Parsed PLY header together with the position of the data block.
#[derive(Debug)]
pub struct PlyHeader {
    pub encoding: PlyEncoding,
    /// Declarations as read by serde-ply.
    pub declared: serde_ply::PlyHeader,
    /// Byte offset of the first byte after the `end_header` line.
    pub body_offset: usize,
}

impl PlyHeader {
    /// Parse the header at the start of `data`, consuming exactly up to and
    /// including the `end_header` line.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Cursor::new(data);
        let declared = serde_ply::PlyReader::from_reader(&mut reader)
            .map(|r| r.header().clone())
            .map_err(|e| {
            if reader.position() as usize >= data.len() {
                FormatError::TruncatedHeader
            } else {
                FormatError::Malformed(e.to_string())
            }
        })?;
        let body_offset = reader.position() as usize;

        let encoding = match declared.format {
            PlyFormat::Ascii => PlyEncoding::Ascii,
            PlyFormat::BinaryLittleEndian => PlyEncoding::BinaryLittleEndian,
            PlyFormat::BinaryBigEndian => {
                return Err(FormatError::Unsupported("binary_big_endian encoding".into()));
            }
        };
        validate_elements(&declared.elem_defs)?;

        debug!(
            "PLY header: {:?}, {} elements, {} bytes",
            encoding,
            declared.elem_defs.len(),
            body_offset
        );

        Ok(Self {
            encoding,
            declared,
            body_offset,
        })
    }

    pub fn elements(&self) -> &[ElementDef] {
        &self.declared.elem_defs
    }

    /// The vertex element, which must be declared.
    pub fn vertex_element(&self) -> Result<&ElementDef, FormatError> {
        self.elements()
            .iter()
            .find(|e| e.name == VERTEX_ELEMENT)
            .ok_or(FormatError::MissingVertexElement)
    }

    /// Declared number of vertices.
    pub fn vertex_count(&self) -> Result<usize, FormatError> {
        self.vertex_element().map(|e| e.count)
    }
}

/// Rules serde-ply leaves to the caller: a single vertex element made of
/// scalars, and unique property names within each element.
fn validate_elements(elements: &[ElementDef]) -> Result<(), FormatError> {
    let mut seen_vertex = false;
    for element in elements {
        if element.name == VERTEX_ELEMENT {
            if seen_vertex {
                return Err(FormatError::Malformed("duplicate vertex element".into()));
            }
            seen_vertex = true;
        }

        for (i, property) in element.properties.iter().enumerate() {
            if element.name == VERTEX_ELEMENT
                && matches!(property.property_type, PropertyType::List { .. })
            {
                return Err(FormatError::Unsupported(format!(
                    "list property '{}' on vertex element",
                    property.name
                )));
            }
            if element.properties[..i].iter().any(|p| p.name == property.name) {
                return Err(FormatError::Malformed(format!(
                    "duplicate property '{}' in element '{}'",
                    property.name, element.name
                )));
            }
        }
    }
    Ok(())
}

/// Position of a property in declaration order.
pub(crate) fn property_index(element: &ElementDef, name: &str) -> Option<usize> {
    element.properties.iter().position(|p| p.name == name)
}

/// Binary row width, or `None` if the element has list properties.
pub(crate) fn fixed_row_size(element: &ElementDef) -> Option<usize> {
    element
        .properties
        .iter()
        .map(|p| match p.property_type {
            PropertyType::Scalar(ty) => Some(scalar_size(ty)),
            PropertyType::List { .. } => None,
        })
        .sum()
}
