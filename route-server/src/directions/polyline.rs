//! Google encoded polyline format (precision 1e5).
//!
//! Each point is a pair of zigzag-encoded deltas from the previous point,
//! written as 5-bit chunks offset by 63, least significant chunk first.

use crate::domain::Coordinate;

const PRECISION: f64 = 1e5;

/// Longest chunk run a 32-bit delta can need.
const MAX_SHIFT: u32 = 35;

/// Errors decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    #[error("polyline value at offset {offset} is too long")]
    Overflow { offset: usize },
}

/// Decode an encoded polyline into coordinates.
///
/// ```
/// use route_server::directions::polyline::decode;
///
/// let points = decode("_p~iF~ps|U").unwrap();
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].lat, 38.5);
/// assert_eq!(points[0].lng, -120.2);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while offset < bytes.len() {
        lat += next_delta(bytes, &mut offset)?;
        if offset >= bytes.len() {
            return Err(PolylineError::Truncated);
        }
        lng += next_delta(bytes, &mut offset)?;
        points.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

/// Read one zigzag-encoded value starting at `offset`.
fn next_delta(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let start = *offset;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte {
                offset: *offset,
                byte,
            });
        }
        if shift >= MAX_SHIFT {
            return Err(PolylineError::Overflow { offset: start });
        }
        *offset += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
