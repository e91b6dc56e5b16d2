//! Command header shared by every port except the bespoke ones.
//!
//! A leading `0xff` marks an acknowledge envelope `[0xff, cmd_id, status]`
//! where a status of `0xff` is a negative acknowledgement. Any other
//! leading byte is the command id of a direct response whose payload
//! follows immediately.

use serde::Serialize;

use super::common::FrameReader;
use super::error::FrameError;
use super::layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Acknowledge,
    Response,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub command_id: u8,
    pub acknowledged: bool,
    pub kind: FrameKind,
}

pub fn parse_header(bytes: &[u8]) -> Result<Header, FrameError> {
    let reader = FrameReader::new(bytes);
    let first = reader.read_u8(0)?;

    if first == layout::ACK_SENTINEL {
        reader.require_len(layout::ACK_MIN_LEN)?;
        let command_id = reader.read_u8(layout::ACK_COMMAND_OFFSET)?;
        let status = reader.read_u8(layout::ACK_STATUS_OFFSET)?;
        return Ok(Header {
            command_id,
            acknowledged: status != layout::NACK_MARKER,
            kind: FrameKind::Acknowledge,
        });
    }

    Ok(Header {
        command_id: reader.read_u8(layout::RESPONSE_COMMAND_OFFSET)?,
        acknowledged: true,
        kind: FrameKind::Response,
    })
}
