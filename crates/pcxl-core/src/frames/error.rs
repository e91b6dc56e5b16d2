use thiserror::Error;

/// Errors returned while reading uplink frames and command payloads.
///
/// # Examples
/// ```
/// use pcxl_core::frames::error::FrameError;
///
/// let err = FrameError::TooShort { needed: 9, actual: 3 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("uint{bits} must have exactly {width} bytes")]
    WidthMismatch {
        bits: usize,
        width: usize,
        actual: usize,
    },
    #[error("Couldn't decode area payload: Inconsistent number of points")]
    InconsistentPointCount {
        declared: u8,
        expected: usize,
        actual: usize,
    },
}
