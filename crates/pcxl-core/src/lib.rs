//! PC-L-XL core library for decoding LoRaWAN uplinks.
//!
//! This crate turns the raw uplink bytes of a Terabee PC-L-XL people counter
//! into structured, JSON-serializable records. The device multiplexes its
//! messages over LoRaWAN ports: port 1 carries counting events and port 101
//! area definitions, each with a bespoke layout; every other port uses a
//! command header that an immutable registry resolves to a payload parser.
//! Decoding is byte-oriented and side-effect free; callers own all I/O.
//!
//! Invariants:
//! - A decode call yields either `data` or exactly one error message.
//! - The command registry is built once and never mutated afterwards.
//! - No byte input makes the decoder panic.
//!
//! Version française (résumé):
//! Cette crate décode les trames montantes du compteur PC-L-XL : port 1
//! (comptage), port 101 (zone, points compactés sur 13 bits) et les autres
//! ports via un en-tête de commande et un registre immuable. Chaque appel
//! renvoie soit `data`, soit une seule erreur.
//!
//! # Examples
//! ```
//! use pcxl_core::{Decoder, UplinkInput};
//!
//! let decoder = Decoder::pc_l_xl()?;
//! let result = decoder.decode(&UplinkInput::new(2, vec![250]));
//! assert_eq!(result.errors, vec!["command not registered".to_string()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod decoder;
pub mod frames;
pub mod registry;

pub use decoder::{DecodeError, Decoder};
pub use frames::{
    AccessPointState, AreaPoints, CommandValue, Coordinate, CountDirection, CountingData,
    FrameError, PayloadParser, StatusFlags,
};
pub use registry::{CommandDescriptor, CommandKey, CommandRegistry, RegistryError};

/// One uplink as handed over by the network server.
///
/// # Examples
/// ```
/// use pcxl_core::UplinkInput;
///
/// let input: UplinkInput = serde_json::from_str(r#"{"bytes": [1, 2], "fPort": 3}"#)?;
/// assert_eq!(input.f_port, 3);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UplinkInput {
    /// FRMPayload bytes.
    pub bytes: Vec<u8>,
    /// LoRaWAN FPort the uplink arrived on.
    #[serde(rename = "fPort")]
    pub f_port: u8,
}

impl UplinkInput {
    pub fn new(f_port: u8, bytes: Vec<u8>) -> Self {
        Self { bytes, f_port }
    }
}

/// Result envelope of a decode call.
///
/// Absent `data` and empty lists are omitted when serialized, so a success
/// reads `{"data": ...}` and a failure `{"errors": ["..."]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DecodeResult {
    /// Decoded record, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UplinkData>,
    /// Non-fatal remarks; no decoder currently emits any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Human-readable failure messages, at most one per call.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl DecodeResult {
    pub fn success(data: UplinkData) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn failure(err: &impl std::fmt::Display) -> Self {
        Self {
            errors: vec![err.to_string()],
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decoded uplink record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UplinkData {
    /// Port 1 counting event.
    Counting(CountingData),
    /// Command response or acknowledgement.
    Command { cmd: CommandReport },
}

/// Command outcome as reported by the device.
///
/// # Examples
/// ```
/// use pcxl_core::CommandReport;
///
/// let cmd = CommandReport {
///     name: "CMD_DEV_RBT".to_string(),
///     id: Some(1),
///     success: true,
///     value: None,
/// };
/// let json = serde_json::to_string(&cmd)?;
/// assert_eq!(json, r#"{"name":"CMD_DEV_RBT","id":1,"success":true}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandReport {
    /// Registered command name (e.g., `CMD_CNT_GET`).
    pub name: String,
    /// Command id from the header; absent for area frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u8>,
    /// `false` when the device sent a negative acknowledgement.
    pub success: bool,
    /// Decoded payload, for responses of commands that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CommandValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_omits_empty_fields() {
        let ok = DecodeResult::success(UplinkData::Command {
            cmd: CommandReport {
                name: "CMD_FORCE_REJOIN".to_string(),
                id: Some(1),
                success: true,
                value: None,
            },
        });
        let value = serde_json::to_value(&ok).expect("result json");
        assert!(value.get("warnings").is_none());
        assert!(value.get("errors").is_none());
        assert!(value["data"]["cmd"].get("value").is_none());
        assert!(ok.is_ok());

        let failed = DecodeResult::failure(&"command not registered");
        let value = serde_json::to_value(&failed).expect("result json");
        assert_eq!(value, json!({"errors": ["command not registered"]}));
        assert!(!failed.is_ok());
    }

    #[test]
    fn uplink_input_uses_network_server_field_names() {
        let input = UplinkInput::new(101, vec![0]);
        let value = serde_json::to_value(&input).expect("input json");
        assert_eq!(value, json!({"bytes": [0], "fPort": 101}));
    }

    #[test]
    fn uplink_input_rejects_out_of_range_port() {
        let parsed = serde_json::from_str::<UplinkInput>(r#"{"bytes": [], "fPort": 256}"#);
        assert!(parsed.is_err());
    }
}
