use phonenumber::{country, Mode};

use super::errors::InvalidReason;

/// A strictly valid phone number with its derived metadata.
///
/// Instances only exist for numbers that passed full validity against the
/// numbering-plan database; there is no "maybe valid" `ParsedNumber`.
/// `e164` is the single key used for every provider call,
/// `international_display` exists for rendering only and is always derived
/// from the same parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumber {
    region: Option<country::Id>,
    calling_code: String,
    national_number: String,
    e164: String,
    international_display: String,
}

impl ParsedNumber {
    pub(crate) fn from_phonenumber(number: &phonenumber::PhoneNumber) -> Self {
        let e164 = number.format().mode(Mode::E164).to_string();
        let international_display = number.format().mode(Mode::International).to_string();
        let calling_code = number.country().code().to_string();
        // The national significant number is exactly the E.164 digits after
        // the calling code, so domestic trunk prefixes never leak in.
        let national_number = e164[1 + calling_code.len()..].to_string();
        Self {
            region: number.country().id(),
            calling_code,
            national_number,
            e164,
            international_display,
        }
    }

    /// ISO-3166 region, when the numbering plan pairs one with the calling code.
    pub fn region(&self) -> Option<country::Id> {
        self.region
    }

    /// Country calling code digits, without the `+`.
    pub fn calling_code(&self) -> &str {
        &self.calling_code
    }

    /// National significant number, digits only, no trunk prefix.
    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    /// Canonical `+<calling code><national number>` form.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// Space-grouped international rendering of [`Self::e164`]. Display only;
    /// never a provider request key and never used for comparison.
    pub fn international_display(&self) -> &str {
        &self.international_display
    }
}

/// Outcome of one normalization pass. Recomputed from scratch on every
/// input change, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// A strictly valid number; safe to hand to the provider.
    Valid(ParsedNumber),
    /// Partial or unconfirmed input. Surfaced to live-typing UIs to guide
    /// the user without blocking; `region` carries the detected region when
    /// a hinted parse was possible but not strictly valid.
    Incomplete {
        display: String,
        region: Option<country::Id>,
    },
    /// No strategy matched.
    Invalid(InvalidReason),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn parsed(&self) -> Option<&ParsedNumber> {
        match self {
            Validation::Valid(number) => Some(number),
            _ => None,
        }
    }

    pub fn into_parsed(self) -> Option<ParsedNumber> {
        match self {
            Validation::Valid(number) => Some(number),
            _ => None,
        }
    }
}
