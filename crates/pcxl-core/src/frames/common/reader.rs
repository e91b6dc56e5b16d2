use super::bits::{UintWidth, decode_uint};
use crate::frames::error::FrameError;

/// Bounds-checked view over an uplink payload.
pub struct FrameReader<'a> {
    payload: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FrameError> {
        if self.payload.len() < needed {
            return Err(FrameError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FrameError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(FrameError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, FrameError> {
        let bytes = self.read_slice(range)?;
        let value = decode_uint(bytes, UintWidth::U16)?;
        // decode_uint only accepts two bytes here, so the value fits.
        Ok(value as u16)
    }

    pub fn read_u32_be(&self, range: std::ops::Range<usize>) -> Result<u32, FrameError> {
        let bytes = self.read_slice(range)?;
        decode_uint(bytes, UintWidth::U32)
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FrameError> {
        self.payload.get(range.clone()).ok_or(FrameError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    pub fn read_tail(&self, offset: usize) -> Result<&'a [u8], FrameError> {
        self.payload.get(offset..).ok_or(FrameError::TooShort {
            needed: offset,
            actual: self.payload.len(),
        })
    }
}
