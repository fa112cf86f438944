use thiserror::Error;

/// Why an input failed every normalization strategy.
///
/// `Empty` is deliberately separate: callers treat it as "nothing entered
/// yet" and suppress the message instead of showing an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidReason {
    /// The input contained no characters after trimming.
    #[error("no phone number entered")]
    Empty,
    /// Too few significant digits to evaluate against any numbering plan.
    #[error("the number is too short to be a phone number")]
    TooShort,
    /// Structurally a phone number, but no strategy produced a valid one,
    /// or the input contained characters outside the allowed set.
    #[error("not a recognizable phone number, check the country code")]
    FormatMismatch,
}
