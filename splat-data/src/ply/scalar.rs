//! Fixed-width value decoding for the scalar types a header declares.

use serde_ply::ScalarType;

/// Width of one encoded value in binary mode.
pub(crate) fn scalar_size(ty: ScalarType) -> usize {
    match ty {
        ScalarType::I8 | ScalarType::U8 => 1,
        ScalarType::I16 | ScalarType::U16 => 2,
        ScalarType::I32 | ScalarType::U32 | ScalarType::F32 => 4,
        ScalarType::F64 => 8,
    }
}

/// Decode one little-endian value from the front of `bytes`.
///
/// Returns `None` if `bytes` is shorter than the type's width.
pub(crate) fn read_le(ty: ScalarType, bytes: &[u8]) -> Option<f64> {
    let value = match ty {
        ScalarType::I8 => i8::from_le_bytes(le(bytes)?) as f64,
        ScalarType::U8 => u8::from_le_bytes(le(bytes)?) as f64,
        ScalarType::I16 => i16::from_le_bytes(le(bytes)?) as f64,
        ScalarType::U16 => u16::from_le_bytes(le(bytes)?) as f64,
        ScalarType::I32 => i32::from_le_bytes(le(bytes)?) as f64,
        ScalarType::U32 => u32::from_le_bytes(le(bytes)?) as f64,
        ScalarType::F32 => f32::from_le_bytes(le(bytes)?) as f64,
        ScalarType::F64 => f64::from_le_bytes(le(bytes)?),
    };
    Some(value)
}

/// Parse one ASCII token at the precision of the declared type.
///
/// Floats are parsed at their declared width so ASCII and binary encodings of
/// the same cloud decode to identical values.
pub(crate) fn parse_ascii(ty: ScalarType, token: &str) -> Option<f64> {
    match ty {
        ScalarType::I8 => token.parse::<i8>().ok().map(f64::from),
        ScalarType::U8 => token.parse::<u8>().ok().map(f64::from),
        ScalarType::I16 => token.parse::<i16>().ok().map(f64::from),
        ScalarType::U16 => token.parse::<u16>().ok().map(f64::from),
        ScalarType::I32 => token.parse::<i32>().ok().map(f64::from),
        ScalarType::U32 => token.parse::<u32>().ok().map(f64::from),
        ScalarType::F32 => token.parse::<f32>().ok().map(f64::from),
        ScalarType::F64 => token.parse::<f64>().ok(),
    }
}

fn le<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.get(..N)?.try_into().ok()
}
