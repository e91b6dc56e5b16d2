//! Bit and byte primitives shared by every frame decoder.

use crate::frames::error::FrameError;

/// Supported widths for big-endian unsigned decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintWidth {
    U16,
    U32,
}

impl UintWidth {
    pub fn bytes(self) -> usize {
        match self {
            UintWidth::U16 => 2,
            UintWidth::U32 => 4,
        }
    }
}

/// Returns whether bit `k` (0 = least significant) of `byte` is set.
pub fn is_bit_set(byte: u8, k: u8) -> bool {
    k < 8 && byte & (1 << k) != 0
}

/// Concatenates the zero-padded 8-bit big-endian form of every byte.
///
/// ```text
/// [0, 1, 255] => "000000000000000111111111"
/// ```
pub fn bytes_to_bit_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:08b}", b)).collect()
}

/// Decodes exactly `width` bytes as a big-endian unsigned integer.
pub fn decode_uint(bytes: &[u8], width: UintWidth) -> Result<u32, FrameError> {
    if bytes.len() != width.bytes() {
        return Err(FrameError::WidthMismatch {
            bits: width.bytes() * 8,
            width: width.bytes(),
            actual: bytes.len(),
        });
    }
    Ok(bytes
        .iter()
        .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte)))
}
