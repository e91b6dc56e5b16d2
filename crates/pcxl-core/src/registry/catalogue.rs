//! Standard command table of the Terabee PC-L-XL people counter.

use super::{CommandRegistry, CommandRegistryBuilder, RegistryError};
use crate::frames::PayloadParser;
use crate::frames::layout;

type Entry = (u8, u8, &'static str, Option<PayloadParser>);

#[rustfmt::skip]
const COMMANDS: &[Entry] = &[
    (layout::COUNTS_PORT, 1, "CMD_CNT_RST", None),
    (layout::COUNTS_PORT, 2, "CMD_CNT_GET", Some(PayloadParser::Counts)),
    (layout::COUNTS_PORT, 130, "CMD_CNT_SET", None),
    (layout::REBOOT_PORT, 1, "CMD_DEV_RBT", None),
    (layout::REBOOT_PORT, 2, "CMD_TPC_RST", None),
    (layout::SOFTWARE_VERSION_PORT, 1, "CMD_GET_VER_PEOPLE_COUNTING", Some(PayloadParser::SoftwareVersion)),
    (layout::SOFTWARE_VERSION_PORT, 2, "CMD_GET_VER_WEB_GUI", Some(PayloadParser::SoftwareVersion)),
    (layout::SOFTWARE_VERSION_PORT, 3, "CMD_GET_VER_LORA_AGENT", Some(PayloadParser::SoftwareVersion)),
    (layout::SOFTWARE_VERSION_PORT, 4, "CMD_GET_VER_ACCESS_POINT", Some(PayloadParser::SoftwareVersion)),
    (layout::SOFTWARE_VERSION_PORT, 5, "CMD_GET_VER_UPDATER_WEB_GUI", Some(PayloadParser::SoftwareVersion)),
    (layout::SOFTWARE_VERSION_PORT, 6, "CMD_GET_VER_FAN_SERVICE", Some(PayloadParser::SoftwareVersion)),
    (layout::ACCESS_POINT_PORT, 1, "CMD_GET_AP_STATE", Some(PayloadParser::AccessPointState)),
    (layout::ACCESS_POINT_PORT, 129, "CMD_SET_AP_STATE", None),
    (layout::REJOIN_PORT, 1, "CMD_FORCE_REJOIN", None),
    (layout::TIME_SYNC_PORT, 1, "CMD_FORCE_TIME_SYNC", None),
    (layout::COUNTING_PARAM_PORT, 1, "CMD_GET_HEIGHT", Some(PayloadParser::MountingHeight)),
    (layout::COUNTING_PARAM_PORT, 129, "CMD_SET_HEIGHT", None),
    (layout::COUNTING_PARAM_PORT, 2, "CMD_GET_REVERSE", Some(PayloadParser::CountDirection)),
    (layout::COUNTING_PARAM_PORT, 130, "CMD_SET_REVERSE", None),
    (layout::COUNTING_PARAM_PORT, 3, "CMD_GET_PUSH_PERIOD", Some(PayloadParser::PushPeriod)),
    (layout::COUNTING_PARAM_PORT, 131, "CMD_SET_PUSH_PERIOD", None),
    (layout::SET_AREA_PORT, 0, "CMD_SET_AREA_PTS", None),
];

/// Registers every standard command into `builder`.
pub fn register_pc_l_xl(builder: &mut CommandRegistryBuilder) -> Result<(), RegistryError> {
    for &(port, command_id, name, parser) in COMMANDS {
        builder.register(port.into(), command_id.into(), name, parser)?;
    }
    Ok(())
}

impl CommandRegistry {
    /// Registry holding the standard PC-L-XL command table.
    pub fn pc_l_xl() -> Result<Self, RegistryError> {
        let mut builder = CommandRegistry::builder();
        register_pc_l_xl(&mut builder)?;
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_entries_are_valid() {
        let registry = CommandRegistry::pc_l_xl().unwrap();
        assert_eq!(registry.len(), COMMANDS.len());
        for &(port, command_id, name, parser) in COMMANDS {
            let descriptor = registry.lookup(port, command_id).unwrap();
            assert_eq!(descriptor.name, name);
            assert_eq!(descriptor.parser, parser);
        }
    }

    #[test]
    fn get_and_set_pairs_share_a_port() {
        let registry = CommandRegistry::pc_l_xl().unwrap();
        assert_eq!(registry.lookup(100, 2).unwrap().name, "CMD_GET_REVERSE");
        assert_eq!(registry.lookup(100, 130).unwrap().name, "CMD_SET_REVERSE");
        assert_eq!(
            registry.lookup(100, 2).unwrap().parser,
            Some(PayloadParser::CountDirection)
        );
        assert_eq!(registry.lookup(100, 130).unwrap().parser, None);
    }

    #[test]
    fn bespoke_ports_are_not_registered() {
        let registry = CommandRegistry::pc_l_xl().unwrap();
        assert!(registry.lookup(layout::COUNTING_PORT, 0).is_err());
        assert!(registry.lookup(layout::GET_AREA_PORT, 0).is_err());
    }
}
