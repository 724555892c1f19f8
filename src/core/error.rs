use thiserror::Error;

/// Errors surfaced by the picker core.
///
/// Parse failures are recovered close to where they occur (the model keeps
/// its previous value); `Inconsistency` signals a broken internal invariant
/// and is propagated to the host instead of being swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("invalid date range: {start}..{end} with interval {interval}")]
    InvalidRange {
        start: String,
        end: String,
        interval: i32,
    },

    #[error("unparsable date-time text: {text:?}")]
    ParseDateTime { text: String },

    #[error("invalid picker configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("internal consistency violation: {detail}")]
    Inconsistency { detail: String },
}
