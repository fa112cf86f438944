/// Returns only the decimal digits of `s`, in order.
///
/// Formatting characters the input charset allows (spaces, dashes,
/// parentheses, the leading `+`) are all dropped here before any
/// digit-based strategy runs.
pub fn significant_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use crate::string_util::significant_digits;

    #[test]
    fn strips_everything_but_digits() {
        assert_eq!(significant_digits("+44 (20) 7946-0123"), "442079460123");
        assert_eq!(significant_digits("  "), "");
        assert_eq!(significant_digits("9876543210"), "9876543210");
    }
}
