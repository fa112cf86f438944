use phonenumber::country::Id;

use crate::{
    normalizer::{FallbackRegion, NormalizerConfig},
    InvalidReason, ParsedNumber, PhoneNormalizer, Validation,
};

fn normalizer() -> PhoneNormalizer {
    super::init_test_logging();
    PhoneNormalizer::new()
}

fn expect_valid(validation: Validation) -> ParsedNumber {
    match validation {
        Validation::Valid(number) => number,
        other => panic!("expected a valid number, got {:?}", other),
    }
}

#[test]
fn explicit_international_number_is_canonicalized() {
    let number = expect_valid(normalizer().normalize("+44 20 7946 0123", None));
    assert_eq!(number.e164(), "+442079460123");
    assert_eq!(number.calling_code(), "44");
    assert_eq!(number.national_number(), "2079460123");
    assert_eq!(number.region(), Some(Id::GB));
}

#[test]
fn explicit_international_never_consults_the_hint() {
    // An Indian hint must not override a typed +44 number.
    let number = expect_valid(normalizer().normalize("+442079460123", Some(Id::IN)));
    assert_eq!(number.calling_code(), "44");
}

#[test]
fn digits_only_input_matches_the_plus_prefixed_parse() {
    let with_plus = expect_valid(normalizer().normalize("+919876543210", None));
    let without = expect_valid(normalizer().normalize("919876543210", None));
    assert_eq!(with_plus, without);

    let with_plus = expect_valid(normalizer().normalize("+442079460123", None));
    let without = expect_valid(normalizer().normalize("442079460123", None));
    assert_eq!(with_plus, without);
}

#[test]
fn normalize_is_idempotent_on_its_own_e164() {
    let first = expect_valid(normalizer().normalize("02079460123", None));
    let second = expect_valid(normalizer().normalize(first.e164(), None));
    assert_eq!(first.e164(), second.e164());
    assert_eq!(first, second);
}

#[test]
fn hinted_national_number_parses_in_the_hinted_plan() {
    let number = expect_valid(normalizer().normalize("9876543210", Some(Id::IN)));
    assert_eq!(number.calling_code(), "91");
    assert_eq!(number.national_number(), "9876543210");
    assert_eq!(number.e164(), "+919876543210");
}

#[test]
fn uk_number_with_trunk_zero_hits_the_first_fallback() {
    let number = expect_valid(normalizer().normalize("02079460123", None));
    assert_eq!(number.calling_code(), "44");
    assert_eq!(number.e164(), "+442079460123");
}

#[test]
fn uk_number_without_trunk_zero_is_recovered_by_the_zero_retry() {
    let number = expect_valid(normalizer().normalize("2079460123", None));
    assert_eq!(number.calling_code(), "44");
    assert_eq!(number.e164(), "+442079460123");
}

#[test]
fn formatting_characters_are_stripped_before_digit_strategies() {
    let number = expect_valid(normalizer().normalize("  +44 (20) 7946-0123 ", None));
    assert_eq!(number.e164(), "+442079460123");
}

#[test]
fn display_form_is_derived_from_the_same_parse() {
    let number = expect_valid(normalizer().normalize("+442079460123", None));
    let digits: String = number
        .international_display()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    assert_eq!(format!("+{digits}"), number.e164());
}

#[test]
fn too_short_input_reports_too_short_with_any_hint() {
    assert_eq!(
        normalizer().normalize("123", Some(Id::IN)),
        Validation::Invalid(InvalidReason::TooShort)
    );
    assert_eq!(
        normalizer().normalize("123", None),
        Validation::Invalid(InvalidReason::TooShort)
    );
}

#[test]
fn empty_input_is_reported_as_empty() {
    assert_eq!(
        normalizer().normalize("", None),
        Validation::Invalid(InvalidReason::Empty)
    );
    assert_eq!(
        normalizer().normalize("   ", Some(Id::GB)),
        Validation::Invalid(InvalidReason::Empty)
    );
}

#[test]
fn disallowed_characters_fail_the_charset_gate() {
    assert_eq!(
        normalizer().normalize("20794601ab", None),
        Validation::Invalid(InvalidReason::FormatMismatch)
    );
}

#[test]
fn long_unrecognizable_input_is_a_format_mismatch() {
    assert_eq!(
        normalizer().normalize("999999999999999999", None),
        Validation::Invalid(InvalidReason::FormatMismatch)
    );
}

#[test]
fn hinted_possible_but_unassigned_surfaces_as_incomplete() {
    // Eight digits parse under the IN plan but match no assigned range, and
    // no other strategy claims them either.
    match normalizer().normalize("98765432", Some(Id::IN)) {
        Validation::Incomplete { region, .. } => assert_eq!(region, Some(Id::IN)),
        other => panic!("expected incomplete, got {:?}", other),
    }
}

#[test]
fn fallback_validity_outranks_a_possible_only_hint() {
    // Eight digits are possible but unassigned under the IN plan, yet a
    // valid Singapore mobile number; the fallback's strict match wins over
    // the hinted candidate.
    let sg_fallback = PhoneNormalizer::with_config(NormalizerConfig {
        fallback_regions: vec![FallbackRegion::new(Id::SG)],
        ..NormalizerConfig::default()
    });
    let number = expect_valid(sg_fallback.normalize("98765432", Some(Id::IN)));
    assert_eq!(number.calling_code(), "65");
    assert_eq!(number.e164(), "+6598765432");
}

#[test]
fn preview_reports_short_input_as_incomplete() {
    match normalizer().preview("+4420", Some(Id::GB)) {
        Validation::Incomplete { display, region } => {
            assert_eq!(display, "+4420");
            assert_eq!(region, Some(Id::GB));
        }
        other => panic!("expected incomplete, got {:?}", other),
    }
    // Valid input previews exactly like it normalizes.
    assert!(normalizer().preview("+442079460123", None).is_valid());
}

#[test]
fn fallback_list_is_configuration_not_a_constant() {
    let us_first = PhoneNormalizer::with_config(NormalizerConfig {
        fallback_regions: vec![FallbackRegion::new(Id::US)],
        ..NormalizerConfig::default()
    });
    let number = expect_valid(us_first.normalize("(650) 253-0000", None));
    assert_eq!(number.calling_code(), "1");
    assert_eq!(number.e164(), "+16502530000");
}
