//! Encoded polyline decoding.
//!
//! Each coordinate is stored as the delta from the previous one, scaled by
//! 1e5, zig-zag encoded and split into 5-bit chunks (low bits first). Every
//! chunk is offset by 63 to land in printable ASCII; bit 0x20 marks that
//! another chunk follows.

use crate::domain::{DomainError, GeoPoint};

/// Coordinates are stored to five decimal places.
const PRECISION: f64 = 1e5;

/// A single value never needs more than 7 chunks (35 bits).
const MAX_SHIFT: u32 = 35;

/// Error decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolylineError {
    #[error("invalid character {byte:#04x} at position {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("polyline truncated at position {position}")]
    Truncated { position: usize },

    #[error("value too long at position {position}")]
    Overflow { position: usize },

    #[error("decoded coordinate out of range: {0}")]
    OutOfRange(#[from] DomainError),
}

/// Decode an encoded polyline into points.
///
/// # Examples
///
/// ```
/// use ev_reach::directions::decode_polyline;
///
/// let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[0].latitude(), 38.5);
/// assert_eq!(points[0].longitude(), -120.2);
/// ```
pub fn decode_polyline(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat += next_value(bytes, &mut index)?;
        lon += next_value(bytes, &mut index)?;
        points.push(GeoPoint::new(lat as f64 / PRECISION, lon as f64 / PRECISION)?);
    }

    Ok(points)
}

/// Read one zig-zag varint starting at `index`, advancing past it.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let position = *index;
        let byte = *bytes
            .get(position)
            .ok_or(PolylineError::Truncated { position })?;

        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter { position, byte });
        }
        if shift >= MAX_SHIFT {
            return Err(PolylineError::Overflow { position });
        }

        let chunk = i64::from(byte - 63);
        *index += 1;

        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
