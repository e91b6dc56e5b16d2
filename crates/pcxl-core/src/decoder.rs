use thiserror::Error;
use tracing::{debug, warn};

use crate::frames::layout;
use crate::frames::{
    CommandValue, FrameError, FrameKind, parse_area_payload, parse_counting_frame, parse_header,
};
use crate::registry::{CommandRegistry, RegistryError};
use crate::{CommandReport, DecodeResult, UplinkData, UplinkInput};

/// Failure of a single decode call; surfaced as the envelope's error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Uplink decoder bound to an immutable command registry.
///
/// # Examples
/// ```
/// use pcxl_core::{Decoder, UplinkInput};
///
/// let decoder = Decoder::pc_l_xl()?;
/// let result = decoder.decode(&UplinkInput::new(1, vec![0, 0, 0, 5, 0, 0, 0, 3, 0]));
/// assert!(result.errors.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    registry: CommandRegistry,
}

impl Default for Decoder {
    /// Decoder over the standard PC-L-XL command table.
    ///
    /// # Panics
    /// Only if the built-in command table holds an out-of-range entry.
    fn default() -> Self {
        Self::pc_l_xl().expect("built-in command table is valid")
    }
}

impl Decoder {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// Decoder over the standard PC-L-XL command table.
    pub fn pc_l_xl() -> Result<Self, RegistryError> {
        Ok(Self::new(CommandRegistry::pc_l_xl()?))
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Decodes one uplink. Never panics; every failure becomes a
    /// single-entry `errors` list.
    pub fn decode(&self, input: &UplinkInput) -> DecodeResult {
        match self.decode_frame(input.f_port, &input.bytes) {
            Ok(data) => DecodeResult::success(data),
            Err(err) => {
                warn!(f_port = input.f_port, len = input.bytes.len(), error = %err, "uplink not decoded");
                DecodeResult::failure(&err)
            }
        }
    }

    /// Decodes one uplink, returning the typed error on failure.
    pub fn decode_frame(&self, f_port: u8, bytes: &[u8]) -> Result<UplinkData, DecodeError> {
        match f_port {
            layout::COUNTING_PORT => {
                debug!(f_port, "counting frame");
                Ok(UplinkData::Counting(parse_counting_frame(bytes)?))
            }
            layout::GET_AREA_PORT => {
                debug!(f_port, "area frame");
                let area = parse_area_payload(bytes)?;
                Ok(UplinkData::Command {
                    cmd: CommandReport {
                        name: layout::GET_AREA_COMMAND.to_string(),
                        id: None,
                        success: true,
                        value: Some(CommandValue::Area(area)),
                    },
                })
            }
            _ => self.decode_command(f_port, bytes),
        }
    }

    fn decode_command(&self, f_port: u8, bytes: &[u8]) -> Result<UplinkData, DecodeError> {
        let header = parse_header(bytes)?;
        let command = self.registry.lookup(f_port, header.command_id)?;
        debug!(
            f_port,
            command_id = header.command_id,
            name = %command.name,
            kind = ?header.kind,
            "command frame"
        );

        // Acknowledge envelopes only carry a value when the device appends
        // one after the status byte; a trailing value that does not parse
        // leaves the acknowledgement itself intact.
        let value = match (header.kind, command.parser) {
            (FrameKind::Response, Some(parser)) => bytes
                .get(layout::RESPONSE_PAYLOAD_OFFSET..)
                .map(|payload| parser.parse(payload))
                .transpose()?,
            (FrameKind::Acknowledge, Some(parser)) if header.acknowledged => bytes
                .get(layout::ACK_PAYLOAD_OFFSET..)
                .filter(|payload| !payload.is_empty())
                .and_then(|payload| match parser.parse(payload) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        debug!(error = %err, "acknowledge trailer not decoded");
                        None
                    }
                }),
            _ => None,
        };

        Ok(UplinkData::Command {
            cmd: CommandReport {
                name: command.name.clone(),
                id: Some(header.command_id),
                success: header.acknowledged,
                value,
            },
        })
    }
}
