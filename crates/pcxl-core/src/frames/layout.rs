//! Port numbers, offsets and bit positions of PC-L-XL uplinks.

/// Counting-event uplink (bespoke layout, no header).
pub const COUNTING_PORT: u8 = 1;
/// Area points response (bespoke layout, no header).
pub const GET_AREA_PORT: u8 = 101;

pub const COUNTS_PORT: u8 = 2;
pub const REBOOT_PORT: u8 = 3;
pub const SOFTWARE_VERSION_PORT: u8 = 4;
pub const ACCESS_POINT_PORT: u8 = 5;
pub const REJOIN_PORT: u8 = 6;
pub const TIME_SYNC_PORT: u8 = 7;
pub const COUNTING_PARAM_PORT: u8 = 100;
pub const SET_AREA_PORT: u8 = 102;

pub const GET_AREA_COMMAND: &str = "CMD_GET_AREA_PTS";

// Counting frames and CMD_CNT_GET payloads share the two counters.
pub const COUNT_IN_RANGE: std::ops::Range<usize> = 0..4;
pub const COUNT_OUT_RANGE: std::ops::Range<usize> = 4..8;
pub const FLAGS_OFFSET: usize = 8;
pub const COUNTING_MIN_LEN: usize = FLAGS_OFFSET + 1;

pub const FLAG_TPC_STOPPED: u8 = 0;
pub const FLAG_TPC_STUCK: u8 = 1;
pub const FLAG_MULTI_DEV_ISSUE: u8 = 2;
pub const FLAG_WIFI_AP_ENABLED: u8 = 3;

/// Leading byte of an acknowledge envelope.
pub const ACK_SENTINEL: u8 = 0xff;
/// Status byte value that marks a negative acknowledgement.
pub const NACK_MARKER: u8 = 0xff;
pub const ACK_COMMAND_OFFSET: usize = 1;
pub const ACK_STATUS_OFFSET: usize = 2;
pub const ACK_MIN_LEN: usize = ACK_STATUS_OFFSET + 1;
pub const ACK_PAYLOAD_OFFSET: usize = ACK_MIN_LEN;
pub const RESPONSE_COMMAND_OFFSET: usize = 0;
pub const RESPONSE_PAYLOAD_OFFSET: usize = 1;

pub const U16_RANGE: std::ops::Range<usize> = 0..2;
pub const STATE_OFFSET: usize = 0;
pub const VERSION_LEN: usize = 3;

pub const AREA_COUNT_OFFSET: usize = 0;
pub const AREA_POINTS_OFFSET: usize = 1;
pub const X_PACK_BITS: usize = 7;
pub const Y_PACK_BITS: usize = 6;
pub const POINT_PACK_BITS: usize = X_PACK_BITS + Y_PACK_BITS;

pub const MIN_PORT: u16 = 1;
pub const MAX_PORT: u16 = 255;
pub const MAX_COMMAND_ID: u16 = 254;
