use std::sync::LazyLock;

use log::{error, trace};
use phonenumber::{country, Mode};
use regex::Regex;

use crate::string_util::significant_digits;

use super::{
    config::NormalizerConfig,
    errors::InvalidReason,
    types::{ParsedNumber, Validation},
};

/// Characters a user may legitimately type into a phone field: digits,
/// spaces, dashes, parentheses and the international `+`.
static INPUT_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\s().-]*$").expect("charset pattern is static"));

/// Converts raw user input into a canonical number via an ordered,
/// first-match-wins strategy chain.
///
/// The order is the load-bearing design decision: phone numbers are
/// structurally ambiguous (a national number in one region can be a
/// truncated international number in another), so the chain moves from the
/// most explicit signal (a typed `+`) through the caller's hint and the
/// global plan down to the configured regional fallbacks.
///
/// Normalization is a pure function of the input, the static numbering-plan
/// data and the configured fallback list; no state is kept between calls.
#[derive(Debug, Clone, Default)]
pub struct PhoneNormalizer {
    config: NormalizerConfig,
}

impl PhoneNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Strict normalization: only a fully valid number becomes
    /// [`Validation::Valid`]. Hinted input that is merely possible surfaces
    /// as [`Validation::Incomplete`] with the detected region — but only
    /// after the rest of the chain has run, so a fallback region in which
    /// the input is fully valid outranks a possible-only hint.
    pub fn normalize(&self, raw: &str, region_hint: Option<country::Id>) -> Validation {
        let raw = raw.trim();
        if raw.is_empty() {
            return Validation::Invalid(InvalidReason::Empty);
        }
        if !INPUT_CHARSET.is_match(raw) {
            trace!("input rejected by charset gate");
            return Validation::Invalid(InvalidReason::FormatMismatch);
        }

        let digits = significant_digits(raw);

        // Strategy 1: explicit international. A typed `+` is parsed strictly
        // against the global plan and never consults the hint.
        if raw.starts_with('+') {
            if let Some(number) = parse_guarded(None, raw) {
                if phonenumber::is_valid(&number) {
                    trace!("matched as explicit international number");
                    return Validation::Valid(ParsedNumber::from_phonenumber(&number));
                }
            }
        }

        // Strategy 2: region-hinted parse. Hinted input is the most
        // trustworthy signal of intent, so a possible-but-unassigned number
        // is kept as an Incomplete candidate in case nothing stricter wins.
        let mut hinted_possible: Option<(String, country::Id)> = None;
        if let Some(region) = region_hint {
            if let Some(number) = parse_guarded(Some(region), raw) {
                if phonenumber::is_valid(&number) {
                    trace!("matched within hinted region {:?}", region);
                    return Validation::Valid(ParsedNumber::from_phonenumber(&number));
                }
                if self.within_length_envelope(&digits) {
                    let display = number.format().mode(Mode::International).to_string();
                    hinted_possible = Some((display, region));
                }
            }
        }

        // Strategy 3: implicit international. Users worldwide omit the
        // leading `+` when the number already begins with their calling code
        // (a US number typed as `1985...`, an Indian one as `9198...`).
        // Trying this before the regional fallbacks keeps two-digit calling
        // codes from being misread as a national trunk prefix.
        if !digits.is_empty() {
            let with_plus = format!("+{digits}");
            if let Some(number) = parse_guarded(None, &with_plus) {
                if phonenumber::is_valid(&number) {
                    trace!("matched as implicit international number");
                    return Validation::Valid(ParsedNumber::from_phonenumber(&number));
                }
            }
        }

        // Strategies 4..: configured regional fallbacks, in priority order.
        for fallback in &self.config.fallback_regions {
            if let Some(number) = parse_guarded(Some(fallback.region), raw) {
                if phonenumber::is_valid(&number) {
                    trace!("matched within fallback region {:?}", fallback.region);
                    return Validation::Valid(ParsedNumber::from_phonenumber(&number));
                }
            }
            if fallback.retry_with_trunk_zero && !raw.starts_with('+') {
                let with_zero = format!("0{raw}");
                if let Some(number) = parse_guarded(Some(fallback.region), &with_zero) {
                    if phonenumber::is_valid(&number) {
                        trace!(
                            "matched within fallback region {:?} after trunk-zero retry",
                            fallback.region
                        );
                        return Validation::Valid(ParsedNumber::from_phonenumber(&number));
                    }
                }
            }
        }

        if let Some((display, region)) = hinted_possible {
            return Validation::Incomplete {
                display,
                region: Some(region),
            };
        }

        if digits.len() < self.config.min_significant_digits {
            Validation::Invalid(InvalidReason::TooShort)
        } else {
            Validation::Invalid(InvalidReason::FormatMismatch)
        }
    }

    /// Lenient variant for live typing: identical chain, but a too-short
    /// non-empty input is reported as [`Validation::Incomplete`] so the UI
    /// can guide the user without blocking further input.
    pub fn preview(&self, raw: &str, region_hint: Option<country::Id>) -> Validation {
        match self.normalize(raw, region_hint) {
            Validation::Invalid(InvalidReason::TooShort) => Validation::Incomplete {
                display: raw.trim().to_string(),
                region: region_hint,
            },
            other => other,
        }
    }

    /// The digit-count envelope standing in for per-region possible-length
    /// metadata: at least the configured minimum, at most the fifteen digits
    /// E.164 allows.
    fn within_length_envelope(&self, digits: &str) -> bool {
        (self.config.min_significant_digits..=15).contains(&digits.len())
    }
}

/// Parses through the numbering-plan backend, downgrading both parse errors
/// and backend panics to `None`. The backend has some questionable unwraps
/// on adversarial input, so the unwind guard is required for an input that
/// comes straight from users.
fn parse_guarded(region: Option<country::Id>, input: &str) -> Option<phonenumber::PhoneNumber> {
    let owned = input.to_owned();
    match std::panic::catch_unwind(move || phonenumber::parse(region, owned)) {
        Ok(Ok(number)) => Some(number),
        Ok(Err(err)) => {
            trace!("parse failed for region {:?}: {:?}", region, err);
            None
        }
        Err(panic) => {
            error!("numbering-plan backend panicked while parsing: {:?}", panic);
            None
        }
    }
}
