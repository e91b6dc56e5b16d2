//! Area points uplink (port 101).
//!
//! The first byte declares the number of polygon points. The remaining
//! bytes hold the points packed as 13-bit groups (7 bits of `x`, then 6 bits
//! of `y`) with no alignment between points. The stream is preceded by
//! discard padding so its bit length is a multiple of 13.

use serde::Serialize;

use super::common::{FrameReader, bytes_to_bit_string};
use super::error::FrameError;
use super::layout;

/// One polygon vertex; `x` fits in 7 bits and `y` in 6 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

/// Decoded area definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaPoints {
    pub declared_count: u8,
    pub points: Vec<Coordinate>,
}

/// Number of payload bytes needed to hold `count` packed points.
pub fn packed_len(count: u8) -> usize {
    (usize::from(count) * layout::POINT_PACK_BITS).div_ceil(8)
}

/// Unpacks every complete 13-bit group after the leading padding.
///
/// Non-binary symbols are read as `0`; input produced by
/// [`bytes_to_bit_string`] never contains any.
pub fn decode_points(bit_string: &str) -> Vec<Coordinate> {
    let bits = bit_string.as_bytes();
    let padding = bits.len() % layout::POINT_PACK_BITS;
    bits[padding..]
        .chunks_exact(layout::POINT_PACK_BITS)
        .map(|group| {
            let (x, y) = group.split_at(layout::X_PACK_BITS);
            Coordinate {
                x: parse_bits(x),
                y: parse_bits(y),
            }
        })
        .collect()
}

fn parse_bits(bits: &[u8]) -> u8 {
    bits.iter()
        .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit == b'1'))
}

pub fn parse_area_payload(bytes: &[u8]) -> Result<AreaPoints, FrameError> {
    let reader = FrameReader::new(bytes);
    let declared_count = reader.read_u8(layout::AREA_COUNT_OFFSET)?;
    let packed = reader.read_tail(layout::AREA_POINTS_OFFSET)?;

    let expected = packed_len(declared_count);
    if packed.len() != expected {
        return Err(FrameError::InconsistentPointCount {
            declared: declared_count,
            expected,
            actual: packed.len(),
        });
    }

    Ok(AreaPoints {
        declared_count,
        points: decode_points(&bytes_to_bit_string(packed)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(points: &[(u8, u8)]) -> Vec<u8> {
        let bits: String = points
            .iter()
            .map(|(x, y)| format!("{:07b}{:06b}", x, y))
            .collect();
        let total = packed_len(points.len() as u8) * 8;
        let padded = format!("{}{}", "0".repeat(total - bits.len()), bits);
        padded
            .as_bytes()
            .chunks(8)
            .map(|chunk| u8::from_str_radix(std::str::from_utf8(chunk).unwrap(), 2).unwrap())
            .collect()
    }

    #[test]
    fn decode_points_example() {
        let points = decode_points("00000000000001010000111100");
        assert_eq!(
            points,
            vec![Coordinate { x: 0, y: 0 }, Coordinate { x: 80, y: 60 }]
        );
    }

    #[test]
    fn decode_points_discards_leading_padding() {
        // 6 padding bits, then x=127 y=63.
        let points = decode_points("1010101111111111111");
        assert_eq!(points, vec![Coordinate { x: 127, y: 63 }]);
    }

    #[test]
    fn decode_points_short_input() {
        assert!(decode_points("").is_empty());
        assert!(decode_points("101010101010").is_empty());
    }

    #[test]
    fn decoded_points_stay_in_range() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        for point in decode_points(&bytes_to_bit_string(&bytes)) {
            assert!(point.x <= 127);
            assert!(point.y <= 63);
        }
    }

    #[test]
    fn parse_two_points() {
        let mut payload = vec![2];
        payload.extend(pack(&[(0, 0), (80, 60)]));
        assert_eq!(payload.len(), 1 + 4);

        let parsed = parse_area_payload(&payload).unwrap();
        assert_eq!(parsed.declared_count, 2);
        assert_eq!(
            parsed.points,
            vec![Coordinate { x: 0, y: 0 }, Coordinate { x: 80, y: 60 }]
        );
    }

    #[test]
    fn parse_polygon() {
        let polygon = [(1, 2), (127, 0), (64, 63), (0, 31), (100, 50)];
        let mut payload = vec![polygon.len() as u8];
        payload.extend(pack(&polygon));

        let parsed = parse_area_payload(&payload).unwrap();
        let expected: Vec<_> = polygon.iter().map(|&(x, y)| Coordinate { x, y }).collect();
        assert_eq!(parsed.points, expected);
    }

    #[test]
    fn zero_points() {
        let parsed = parse_area_payload(&[0]).unwrap();
        assert_eq!(parsed.declared_count, 0);
        assert!(parsed.points.is_empty());
    }

    #[test]
    fn inconsistent_length() {
        let err = parse_area_payload(&[2, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            FrameError::InconsistentPointCount {
                declared: 2,
                expected: 4,
                actual: 3,
            }
        );
        assert_eq!(
            err.to_string(),
            "Couldn't decode area payload: Inconsistent number of points"
        );
    }

    #[test]
    fn empty_payload() {
        assert!(matches!(
            parse_area_payload(&[]),
            Err(FrameError::TooShort { needed: 1, actual: 0 })
        ));
    }

    #[test]
    fn packed_len_rounds_up() {
        assert_eq!(packed_len(0), 0);
        assert_eq!(packed_len(1), 2);
        assert_eq!(packed_len(2), 4);
        assert_eq!(packed_len(8), 13);
        assert_eq!(packed_len(255), 415);
    }
}
