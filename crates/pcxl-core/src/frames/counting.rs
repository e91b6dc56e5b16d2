//! Counting-event uplink (port 1).
//!
//! Bespoke layout with no header: `count_in` (u32 BE), `count_out`
//! (u32 BE), then one status byte whose low bits are device flags.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::common::{FrameReader, is_bit_set};
use super::error::FrameError;
use super::layout;

/// Periodic people-counting report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountingData {
    pub count_in: u32,
    pub count_out: u32,
    pub flags: StatusFlags,
}

/// Device status bits carried by a counting frame.
///
/// Serializes as an object holding one key per set flag (value `1`);
/// unset flags are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFlags(u8);

impl StatusFlags {
    pub const NAMED: [(u8, &'static str); 4] = [
        (layout::FLAG_TPC_STOPPED, "TPC_STOPPED"),
        (layout::FLAG_TPC_STUCK, "TPC_STUCK"),
        (layout::FLAG_MULTI_DEV_ISSUE, "MULTI_DEV_ISSUE"),
        (layout::FLAG_WIFI_AP_ENABLED, "WIFI_AP_ENABLED"),
    ];

    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Names of the set flags, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(bit, _)| is_bit_set(self.0, *bit))
            .map(|(_, name)| name)
    }
}

impl Serialize for StatusFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names: Vec<_> = self.names().collect();
        let mut map = serializer.serialize_map(Some(names.len()))?;
        for name in names {
            map.serialize_entry(name, &1u8)?;
        }
        map.end()
    }
}

pub fn parse_counting_frame(bytes: &[u8]) -> Result<CountingData, FrameError> {
    let reader = FrameReader::new(bytes);
    reader.require_len(layout::COUNTING_MIN_LEN)?;

    let count_in = reader.read_u32_be(layout::COUNT_IN_RANGE)?;
    let count_out = reader.read_u32_be(layout::COUNT_OUT_RANGE)?;
    let flags = StatusFlags::from_byte(reader.read_u8(layout::FLAGS_OFFSET)?);

    Ok(CountingData {
        count_in,
        count_out,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_counts_and_flags() {
        let parsed = parse_counting_frame(&[0, 0, 0, 5, 0, 0, 0, 3, 0b0000_0011]).unwrap();
        assert_eq!(parsed.count_in, 5);
        assert_eq!(parsed.count_out, 3);
        assert_eq!(
            parsed.flags.names().collect::<Vec<_>>(),
            vec!["TPC_STOPPED", "TPC_STUCK"]
        );
    }

    #[test]
    fn flags_serialize_only_set_bits() {
        let value = serde_json::to_value(StatusFlags::from_byte(0b0000_1010)).unwrap();
        assert_eq!(value, json!({"TPC_STUCK": 1, "WIFI_AP_ENABLED": 1}));
        let value = serde_json::to_value(StatusFlags::from_byte(0)).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn upper_bits_are_ignored() {
        let flags = StatusFlags::from_byte(0b1111_0100);
        assert_eq!(flags.names().collect::<Vec<_>>(), vec!["MULTI_DEV_ISSUE"]);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let parsed = parse_counting_frame(&[0, 0, 1, 44, 0, 0, 0, 0, 0, 0xaa]).unwrap();
        assert_eq!(parsed.count_in, 300);
    }

    #[test]
    fn short_frame() {
        let err = parse_counting_frame(&[0, 0, 0, 5, 0, 0, 0, 3]).unwrap_err();
        assert_eq!(err, FrameError::TooShort { needed: 9, actual: 8 });
    }
}
