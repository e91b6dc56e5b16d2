//! Uplink frame decoding.
//!
//! Each frame family follows a layered structure:
//! - `layout`: ports, byte offsets and bit widths (source of truth)
//! - `common`: bit primitives and the bounds-checked `FrameReader`
//! - `counting`, `area`, `header`, `payload`: domain-level decoding
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; the decoder selects which one runs
//! for a given port.

pub mod area;
pub mod common;
pub mod counting;
pub mod error;
pub mod header;
pub mod layout;
pub mod payload;

pub use area::{AreaPoints, Coordinate, decode_points, parse_area_payload};
pub use counting::{CountingData, StatusFlags, parse_counting_frame};
pub use error::FrameError;
pub use header::{FrameKind, Header, parse_header};
pub use payload::{AccessPointState, CommandValue, CountDirection, PayloadParser};
