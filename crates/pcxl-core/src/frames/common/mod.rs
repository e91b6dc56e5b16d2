pub mod bits;
pub mod reader;

pub use bits::{UintWidth, bytes_to_bit_string, decode_uint, is_bit_set};
pub use reader::FrameReader;
