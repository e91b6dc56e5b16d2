//! Command registry keyed by `(port, command id)`.
//!
//! The table is assembled once with [`CommandRegistryBuilder`] and frozen
//! into an immutable [`CommandRegistry`] that the decoder borrows for every
//! call. Later registrations under the same key replace earlier ones.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::frames::PayloadParser;
use crate::frames::layout;

pub mod catalogue;
pub mod error;

pub use error::RegistryError;

/// Composite registry key: the port in the high byte, the command id in
/// the low byte. Displays as four lowercase hex digits (`"0282"` for port
/// 2, command 130), so distinct pairs never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandKey(u16);

impl CommandKey {
    pub fn new(port: u8, command_id: u8) -> Self {
        Self(u16::from_be_bytes([port, command_id]))
    }

    pub fn port(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    pub fn command_id(self) -> u8 {
        self.0.to_be_bytes()[1]
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}", self.port(), self.command_id())
    }
}

/// Registered command: a name and an optional payload decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<PayloadParser>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>, parser: Option<PayloadParser>) -> Self {
        Self {
            name: name.into(),
            parser,
        }
    }
}

#[derive(Debug, Default)]
pub struct CommandRegistryBuilder {
    commands: HashMap<CommandKey, CommandDescriptor>,
}

impl CommandRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        port: u16,
        command_id: u16,
        name: impl Into<String>,
        parser: Option<PayloadParser>,
    ) -> Result<&mut Self, RegistryError> {
        let port = u8::try_from(port)
            .ok()
            .filter(|p| u16::from(*p) >= layout::MIN_PORT)
            .ok_or(RegistryError::PortOutOfRange { port })?;
        let command_id = u8::try_from(command_id)
            .ok()
            .filter(|id| u16::from(*id) <= layout::MAX_COMMAND_ID)
            .ok_or(RegistryError::CommandIdOutOfRange { command_id })?;

        let key = CommandKey::new(port, command_id);
        let descriptor = CommandDescriptor::new(name, parser);
        if let Some(previous) = self.commands.insert(key, descriptor) {
            tracing::debug!(%key, previous = %previous.name, "command registration replaced");
        }
        Ok(self)
    }

    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            commands: self.commands,
        }
    }
}

/// Immutable `(port, command id)` → descriptor table.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<CommandKey, CommandDescriptor>,
}

impl CommandRegistry {
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::new()
    }

    pub fn lookup(&self, port: u8, command_id: u8) -> Result<&CommandDescriptor, RegistryError> {
        self.commands
            .get(&CommandKey::new(port, command_id))
            .ok_or(RegistryError::NotRegistered { port, command_id })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered commands in key order.
    pub fn iter(&self) -> impl Iterator<Item = (CommandKey, &CommandDescriptor)> {
        let mut entries: Vec<_> = self.commands.iter().map(|(k, v)| (*k, v)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_lookup() {
        let mut builder = CommandRegistry::builder();
        builder
            .register(2, 2, "CMD_CNT_GET", Some(PayloadParser::Counts))
            .unwrap();
        let registry = builder.build();

        let command = registry.lookup(2, 2).unwrap();
        assert_eq!(
            command,
            &CommandDescriptor::new("CMD_CNT_GET", Some(PayloadParser::Counts))
        );
        let err = registry.lookup(2, 99).unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotRegistered {
                port: 2,
                command_id: 99,
            }
        );
        assert_eq!(err.to_string(), "command not registered");
    }

    #[test]
    fn register_rejects_out_of_range() {
        let mut builder = CommandRegistry::builder();
        let err = builder.register(0, 1, "x", None).unwrap_err();
        assert_eq!(err, RegistryError::PortOutOfRange { port: 0 });
        assert_eq!(err.to_string(), "fport must be between 1 and 255");

        let err = builder.register(256, 1, "x", None).unwrap_err();
        assert_eq!(err, RegistryError::PortOutOfRange { port: 256 });

        let err = builder.register(5, 255, "x", None).unwrap_err();
        assert_eq!(err, RegistryError::CommandIdOutOfRange { command_id: 255 });
        assert_eq!(err.to_string(), "cmd_id must be between 0 and 254");

        assert!(builder.build().is_empty());
    }

    #[test]
    fn register_accepts_bounds() {
        let mut builder = CommandRegistry::builder();
        builder.register(1, 0, "low", None).unwrap();
        builder.register(255, 254, "high", None).unwrap();
        let registry = builder.build();
        assert_eq!(registry.lookup(1, 0).unwrap().name, "low");
        assert_eq!(registry.lookup(255, 254).unwrap().name, "high");
    }

    #[test]
    fn last_registration_wins() {
        let mut builder = CommandRegistry::builder();
        builder
            .register(100, 1, "first", None)
            .unwrap()
            .register(100, 1, "second", Some(PayloadParser::MountingHeight))
            .unwrap();
        let registry = builder.build();
        assert_eq!(registry.len(), 1);
        let command = registry.lookup(100, 1).unwrap();
        assert_eq!(command.name, "second");
        assert_eq!(command.parser, Some(PayloadParser::MountingHeight));
    }

    #[test]
    fn same_id_on_different_ports_coexist() {
        let mut builder = CommandRegistry::builder();
        builder.register(2, 1, "CMD_CNT_RST", None).unwrap();
        builder.register(3, 1, "CMD_DEV_RBT", None).unwrap();
        let registry = builder.build();
        assert_eq!(registry.lookup(2, 1).unwrap().name, "CMD_CNT_RST");
        assert_eq!(registry.lookup(3, 1).unwrap().name, "CMD_DEV_RBT");
    }

    #[test]
    fn key_encoding() {
        let key = CommandKey::new(2, 130);
        assert_eq!(key.to_string(), "0282");
        assert_eq!(key.port(), 2);
        assert_eq!(key.command_id(), 130);
        assert_eq!(CommandKey::new(101, 0).to_string(), "6500");
        assert_eq!(CommandKey::new(255, 254).to_string(), "fffe");
        assert_ne!(CommandKey::new(1, 16), CommandKey::new(16, 1));
    }

    #[test]
    fn iter_is_key_ordered() {
        let mut builder = CommandRegistry::builder();
        builder.register(100, 3, "c", None).unwrap();
        builder.register(2, 130, "b", None).unwrap();
        builder.register(2, 1, "a", None).unwrap();
        let registry = builder.build();
        let names: Vec<_> = registry.iter().map(|(_, d)| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
