use strum::Display;
use thiserror::Error;

use crate::credentials::CredentialSet;

/// Delivery channel for a one-time code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Channel {
    #[strum(serialize = "sms")]
    Sms,
}

/// Outcome of a code check as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CheckStatus {
    /// The code matched; the phone number is proven.
    Approved,
    /// The code did not match (yet); the caller may retry the check.
    Pending,
    /// The verification aged out server-side; a new code must be requested.
    Expired,
}

/// Failures of the external verification service.
///
/// The split matters downstream: `UnsupportedNumber` is a user error,
/// `Misconfigured` is an operator error and must never be rendered as an
/// input problem, and the retryable variants are surfaced once per request
/// with no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The destination number was rejected server-side as malformed or
    /// unsupported.
    #[error("the verification service does not support this number, check it and try again")]
    UnsupportedNumber,
    /// The provider refused the request because a quota was exhausted.
    #[error("the verification service refused the request: quota exceeded")]
    QuotaExceeded,
    /// The verification no longer exists server-side. The user must request
    /// a new code rather than retry the same one.
    #[error("the verification expired, request a new code")]
    VerificationExpired,
    /// The service itself is misconfigured. Operator-facing.
    #[error("verification service misconfigured: {0}")]
    Misconfigured(String),
    /// Transport-level failure talking to the service.
    #[error("could not reach the verification service: {0}")]
    Network(String),
    /// The bounded call timeout elapsed. A code may still have been
    /// delivered, so this is a retryable failure, not an outcome.
    #[error("timed out waiting for the verification service")]
    Timeout,
}

impl ProviderError {
    /// Whether the caller may usefully repeat the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::QuotaExceeded
                | ProviderError::VerificationExpired
                | ProviderError::Network(_)
                | ProviderError::Timeout
        )
    }
}

/// Capability contract of the SMS verification provider.
///
/// Implementations wrap a concrete vendor API. They must apply a bounded
/// timeout to every network call and report it as [`ProviderError::Timeout`];
/// cancellation of an in-flight call is the embedding application's concern,
/// with the caveat that an abandoned send may still deliver a code.
pub trait VerifyProvider {
    /// Requests delivery of a one-time code to `e164` over `channel`.
    fn send_code(
        &self,
        credentials: &CredentialSet,
        e164: &str,
        channel: Channel,
    ) -> Result<(), ProviderError>;

    /// Checks `code` against the pending verification for `e164`.
    fn check_code(
        &self,
        credentials: &CredentialSet,
        e164: &str,
        code: &str,
    ) -> Result<CheckStatus, ProviderError>;
}
