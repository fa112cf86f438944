mod provider;
mod session;

pub use provider::{Channel, CheckStatus, ProviderError, VerifyProvider};
pub use session::{SessionError, SessionState, VerificationSession};

use std::sync::LazyLock;

use regex::Regex;

/// One-time codes are 4 to 6 decimal digits; anything else is rejected
/// locally before a provider call is considered.
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4,6}$").expect("code pattern is static"));

/// Whether `code` is syntactically a one-time code.
pub fn is_well_formed_code(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}
