//! Vertex data decoding for ASCII and binary little-endian bodies

use crate::error::FormatError;
use crate::ply::header::{PlyEncoding, PlyHeader, VERTEX_ELEMENT, fixed_row_size, property_index};
use crate::ply::scalar::{parse_ascii, read_le, scalar_size};
use crate::ply::vertex::{POSITION_PROPERTIES, PlyVertex, SH_DC_PROPERTIES};
use glam::DVec3;
use serde_ply::{ElementDef, PropertyType, ScalarType};
use tracing::debug;

/// Field layout of the vertex element, resolved once per file.
#[derive(Debug, Clone)]
pub struct VertexLayout {
    types: Vec<ScalarType>,
    offsets: Vec<usize>,
    record_size: usize,
    position: [usize; 3],
    sh_dc: Option<[usize; 3]>,
}

impl VertexLayout {
    /// Locate the required properties by name.
    ///
    /// With `require_color` unset, missing `f_dc_*` properties are tolerated and
    /// decoded vertices carry no color coefficients.
    pub fn resolve(element: &ElementDef, require_color: bool) -> Result<Self, FormatError> {
        let mut types = Vec::with_capacity(element.properties.len());
        let mut offsets = Vec::with_capacity(element.properties.len());
        let mut record_size = 0;

        for property in &element.properties {
            let PropertyType::Scalar(ty) = property.property_type else {
                return Err(FormatError::Unsupported(format!(
                    "list property '{}' on vertex element",
                    property.name
                )));
            };
            types.push(ty);
            offsets.push(record_size);
            record_size += scalar_size(ty);
        }

        let find = |name: &'static str| {
            property_index(element, name).ok_or(FormatError::MissingProperty(name))
        };

        let position = [
            find(POSITION_PROPERTIES[0])?,
            find(POSITION_PROPERTIES[1])?,
            find(POSITION_PROPERTIES[2])?,
        ];

        let sh_dc = match (
            find(SH_DC_PROPERTIES[0]),
            find(SH_DC_PROPERTIES[1]),
            find(SH_DC_PROPERTIES[2]),
        ) {
            (Ok(r), Ok(g), Ok(b)) => Some([r, g, b]),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) if require_color => return Err(e),
            _ => None,
        };

        Ok(Self {
            types,
            offsets,
            record_size,
            position,
            sh_dc,
        })
    }

    /// Bytes per vertex in binary mode.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    fn vertex(&self, value: impl Fn(usize) -> f64) -> PlyVertex {
        let [x, y, z] = self.position;
        PlyVertex {
            position: DVec3::new(value(x), value(y), value(z)),
            sh_dc: self
                .sh_dc
                .map(|[r, g, b]| DVec3::new(value(r), value(g), value(b))),
        }
    }

    /// `record` is exactly [`Self::record_size`] bytes, so every field read succeeds.
    fn decode_binary(&self, record: &[u8]) -> PlyVertex {
        self.vertex(|i| {
            record
                .get(self.offsets[i]..)
                .and_then(|field| read_le(self.types[i], field))
                .unwrap_or_default()
        })
    }

    fn decode_ascii(&self, row: usize, line: &str) -> Result<PlyVertex, FormatError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != self.types.len() {
            return Err(FormatError::InvalidRow {
                row,
                reason: format!("expected {} values, found {}", self.types.len(), tokens.len()),
            });
        }

        let values = tokens
            .iter()
            .zip(&self.types)
            .map(|(token, ty)| {
                parse_ascii(*ty, token).ok_or_else(|| FormatError::InvalidRow {
                    row,
                    reason: format!("'{token}' is not a valid {ty:?}"),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(self.vertex(|i| values[i]))
    }
}

/// Decode every vertex of `data`, whose header has already been parsed.
///
/// Elements declared ahead of the vertex element are skipped; anything after
/// it is ignored.
pub fn decode_vertices(
    header: &PlyHeader,
    data: &[u8],
    require_color: bool,
) -> Result<Vec<PlyVertex>, FormatError> {
    let element = header.vertex_element()?;
    let layout = VertexLayout::resolve(element, require_color)?;
    let body = data.get(header.body_offset..).unwrap_or_default();
    let preceding = header
        .elements()
        .iter()
        .take_while(|e| e.name != VERTEX_ELEMENT);

    debug!(
        "Decoding {} vertices ({:?}, {} properties, {} bytes per record)",
        element.count,
        header.encoding,
        element.properties.len(),
        layout.record_size()
    );

    match header.encoding {
        PlyEncoding::Ascii => decode_ascii(&layout, element.count, preceding, body),
        PlyEncoding::BinaryLittleEndian => {
            decode_binary(&layout, element.count, preceding, body)
        }
    }
}

fn decode_ascii<'h>(
    layout: &VertexLayout,
    count: usize,
    mut preceding: impl Iterator<Item = &'h ElementDef>,
    body: &[u8],
) -> Result<Vec<PlyVertex>, FormatError> {
    let mut lines = body
        .split(|&b| b == b'\n')
        .filter(|line| !line.trim_ascii().is_empty());

    let skipped = preceding
        .try_fold(0usize, |total, e| total.checked_add(e.count))
        .ok_or_else(|| FormatError::Malformed("element row counts overflow".into()))?;
    for _ in 0..skipped {
        lines
            .next()
            .ok_or_else(|| FormatError::Malformed("data ends before vertex element".into()))?;
    }

    // Capacity hint only: a row is at least one token and a separator.
    let mut vertices = Vec::with_capacity(count.min(body.len() / 2));
    for row in 0..count {
        let line = lines.next().ok_or(FormatError::MissingRows {
            expected: count,
            found: row,
        })?;
        let line = std::str::from_utf8(line).map_err(|_| FormatError::InvalidRow {
            row,
            reason: "not valid UTF-8".into(),
        })?;
        vertices.push(layout.decode_ascii(row, line)?);
    }
    Ok(vertices)
}

fn decode_binary<'h>(
    layout: &VertexLayout,
    count: usize,
    preceding: impl Iterator<Item = &'h ElementDef>,
    body: &[u8],
) -> Result<Vec<PlyVertex>, FormatError> {
    let mut cursor = 0;
    for element in preceding {
        cursor = skip_binary_element(element, body, cursor)?;
    }

    let record_size = layout.record_size();
    let expected = count
        .checked_mul(record_size)
        .ok_or_else(|| FormatError::Malformed(format!("vertex count {count} is too large")))?;
    let found = body.len() - cursor;
    if found < expected {
        return Err(FormatError::TruncatedData { expected, found });
    }

    Ok(body[cursor..cursor + expected]
        .chunks_exact(record_size)
        .map(|record| layout.decode_binary(record))
        .collect())
}

/// Advance past the rows of a non-vertex element, returning the new cursor.
fn skip_binary_element(
    element: &ElementDef,
    body: &[u8],
    mut cursor: usize,
) -> Result<usize, FormatError> {
    let truncated = || {
        FormatError::Malformed(format!(
            "data ends inside element '{}' before the vertex element",
            element.name
        ))
    };

    if let Some(row_size) = fixed_row_size(element) {
        let end = row_size
            .checked_mul(element.count)
            .and_then(|len| cursor.checked_add(len))
            .filter(|&end| end <= body.len())
            .ok_or_else(truncated)?;
        return Ok(end);
    }

    for _ in 0..element.count {
        for property in &element.properties {
            let width = match property.property_type {
                PropertyType::Scalar(ty) => scalar_size(ty),
                PropertyType::List {
                    count_type,
                    data_type,
                } => {
                    let len = body
                        .get(cursor..)
                        .and_then(|rest| read_le(count_type, rest))
                        .ok_or_else(truncated)?;
                    cursor += scalar_size(count_type);
                    if !(len >= 0.0 && len.fract() == 0.0) {
                        return Err(FormatError::Malformed(format!(
                            "bad list length {len} in element '{}'",
                            element.name
                        )));
                    }
                    (len as usize)
                        .checked_mul(scalar_size(data_type))
                        .ok_or_else(truncated)?
                }
            };
            cursor = cursor
                .checked_add(width)
                .filter(|&end| end <= body.len())
                .ok_or_else(truncated)?;
        }
    }
    Ok(cursor)
}
