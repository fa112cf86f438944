pub mod normalizer;
pub mod verification;
pub mod credentials;
pub mod rate_limit;
pub mod service;
pub mod events;
pub(crate) mod string_util;

/// Region codes are the `phonenumber` crate's ISO-3166 alpha-2 identifiers;
/// re-exported so callers never need a direct dependency for hints.
pub use phonenumber::country;

pub use credentials::{CredentialError, CredentialSet, CredentialStore};
pub use events::WidgetEvent;
pub use normalizer::{
    FallbackRegion, InvalidReason, NormalizerConfig, ParsedNumber, PhoneNormalizer, Validation,
};
pub use rate_limit::{Clock, RateLimitConfig, RateLimiter, SystemClock};
pub use service::{InputError, VerificationService, VerifyError};
pub use verification::{
    Channel, CheckStatus, ProviderError, SessionError, SessionState, VerificationSession,
    VerifyProvider,
};

#[cfg(test)]
mod tests;
