//! Fixed-layout payload parsers for header-keyed commands.
//!
//! Parsers receive the payload with the command id byte already stripped.
//! Each one is selected through the command registry and yields a typed
//! [`CommandValue`].

use serde::Serialize;

use super::area::AreaPoints;
use super::common::FrameReader;
use super::error::FrameError;
use super::layout;

/// Payload decoder attached to a registered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadParser {
    Counts,
    CountDirection,
    AccessPointState,
    MountingHeight,
    PushPeriod,
    SoftwareVersion,
}

impl PayloadParser {
    pub fn name(self) -> &'static str {
        match self {
            PayloadParser::Counts => "counts",
            PayloadParser::CountDirection => "count_direction",
            PayloadParser::AccessPointState => "access_point_state",
            PayloadParser::MountingHeight => "mounting_height",
            PayloadParser::PushPeriod => "push_period",
            PayloadParser::SoftwareVersion => "software_version",
        }
    }

    pub fn parse(self, payload: &[u8]) -> Result<CommandValue, FrameError> {
        let reader = FrameReader::new(payload);
        match self {
            PayloadParser::Counts => Ok(CommandValue::Counts {
                count_in: reader.read_u32_be(layout::COUNT_IN_RANGE)?,
                count_out: reader.read_u32_be(layout::COUNT_OUT_RANGE)?,
            }),
            PayloadParser::CountDirection => {
                let direction = if reader.read_u8(layout::STATE_OFFSET)? == 1 {
                    CountDirection::Reversed
                } else {
                    CountDirection::Normal
                };
                Ok(CommandValue::CountDirection { direction })
            }
            PayloadParser::AccessPointState => {
                let state = if reader.read_u8(layout::STATE_OFFSET)? == 1 {
                    AccessPointState::Enabled
                } else {
                    AccessPointState::Disabled
                };
                Ok(CommandValue::AccessPointState { state })
            }
            PayloadParser::MountingHeight => Ok(CommandValue::MountingHeight {
                mounting_height: reader.read_u16_be(layout::U16_RANGE)?,
            }),
            PayloadParser::PushPeriod => Ok(CommandValue::PushPeriod {
                push_period_min: reader.read_u16_be(layout::U16_RANGE)?,
            }),
            PayloadParser::SoftwareVersion => {
                reader.require_len(layout::VERSION_LEN)?;
                let software_version = format!(
                    "{}.{}.{}",
                    reader.read_u8(0)?,
                    reader.read_u8(1)?,
                    reader.read_u8(2)?
                );
                Ok(CommandValue::SoftwareVersion { software_version })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountDirection {
    Normal,
    Reversed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPointState {
    Enabled,
    Disabled,
}

/// Decoded command payload, serialized as its bare field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandValue {
    Counts { count_in: u32, count_out: u32 },
    CountDirection { direction: CountDirection },
    AccessPointState { state: AccessPointState },
    MountingHeight { mounting_height: u16 },
    PushPeriod { push_period_min: u16 },
    SoftwareVersion { software_version: String },
    Area(AreaPoints),
}
