use thiserror::Error;

/// Errors returned by command registration and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("fport must be between 1 and 255")]
    PortOutOfRange { port: u16 },
    #[error("cmd_id must be between 0 and 254")]
    CommandIdOutOfRange { command_id: u16 },
    #[error("command not registered")]
    NotRegistered { port: u8, command_id: u8 },
}
