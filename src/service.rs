use log::{debug, error};
use phonenumber::country;
use thiserror::Error;

use crate::{
    credentials::{CredentialError, CredentialStore},
    normalizer::{InvalidReason, ParsedNumber, PhoneNormalizer, Validation},
    rate_limit::{Clock, RateLimitConfig, RateLimiter, SystemClock},
    verification::{is_well_formed_code, Channel, CheckStatus, ProviderError, VerifyProvider},
};

/// Problems with the request itself, reported before anything else runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("a phone number is required")]
    MissingPhone,
    #[error("the verification code must be 4 to 6 digits")]
    MalformedCode,
}

/// The request-level error taxonomy.
///
/// `Configuration` is operator-facing and logged where it arises; it is kept
/// distinct so transport layers can map it to a 500-class response instead
/// of blaming the user's input. Provider errors are surfaced once per
/// request; retrying is always caller-initiated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("invalid phone number: {0}")]
    Validation(#[from] InvalidReason),
    #[error(transparent)]
    Configuration(#[from] CredentialError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("too many verification requests, try again in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

/// Per-request orchestration behind the send-code, verify-code and lookup
/// operations: the exact logic an HTTP handler delegates to, minus the
/// transport.
///
/// Every operation is stateless and independent; the rate-limit window store
/// is the only shared mutable resource.
pub struct VerificationService<P, C: Clock = SystemClock> {
    normalizer: PhoneNormalizer,
    credentials: CredentialStore,
    rate_limiter: RateLimiter<C>,
    provider: P,
}

impl<P: VerifyProvider> VerificationService<P> {
    /// Service with the default normalizer and send-code quota.
    pub fn new(provider: P, credentials: CredentialStore) -> Self {
        Self::with_parts(
            provider,
            credentials,
            PhoneNormalizer::new(),
            RateLimiter::new(RateLimitConfig::default()),
        )
    }
}

impl<P: VerifyProvider, C: Clock> VerificationService<P, C> {
    pub fn with_parts(
        provider: P,
        credentials: CredentialStore,
        normalizer: PhoneNormalizer,
        rate_limiter: RateLimiter<C>,
    ) -> Self {
        Self {
            normalizer,
            credentials,
            rate_limiter,
            provider,
        }
    }

    pub fn normalizer(&self) -> &PhoneNormalizer {
        &self.normalizer
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sends a one-time code to the given raw phone number.
    ///
    /// `source_key` identifies the requester for rate limiting (typically
    /// the client address). Returns the canonical number so callers can
    /// echo it back to the user.
    pub fn send_code(
        &self,
        source_key: &str,
        raw_phone: &str,
        client_id: &str,
    ) -> Result<ParsedNumber, VerifyError> {
        if !self.rate_limiter.try_consume(source_key) {
            let retry_after_secs = self
                .rate_limiter
                .retry_after(source_key)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            return Err(VerifyError::RateLimited { retry_after_secs });
        }
        let number = self.require_valid(raw_phone, None)?;
        let credentials = self.resolve_credentials(client_id)?;
        self.provider
            .send_code(credentials, number.e164(), Channel::Sms)?;
        debug!(
            "code sent for client {:?} to a number in region {:?}",
            client_id,
            number.region()
        );
        Ok(number)
    }

    /// Checks a submitted code. The code format is validated locally before
    /// any provider call.
    pub fn verify_code(
        &self,
        raw_phone: &str,
        code: &str,
        client_id: &str,
    ) -> Result<CheckStatus, VerifyError> {
        if !is_well_formed_code(code) {
            return Err(InputError::MalformedCode.into());
        }
        let number = self.require_valid(raw_phone, None)?;
        let credentials = self.resolve_credentials(client_id)?;
        let status = self
            .provider
            .check_code(credentials, number.e164(), code)?;
        debug!("code check for client {:?} returned {}", client_id, status);
        Ok(status)
    }

    /// Normalizes a number on behalf of a client without contacting the
    /// provider. Lenient: hinted input that is possible but not strictly
    /// valid comes back as [`Validation::Incomplete`].
    pub fn lookup(
        &self,
        raw_phone: &str,
        region_hint: Option<country::Id>,
        client_id: &str,
    ) -> Result<Validation, VerifyError> {
        if raw_phone.trim().is_empty() {
            return Err(InputError::MissingPhone.into());
        }
        // Still fails closed on unknown clients; lookup is not an
        // unauthenticated side door.
        self.resolve_credentials(client_id)?;
        Ok(self.normalizer.normalize(raw_phone, region_hint))
    }

    fn require_valid(
        &self,
        raw_phone: &str,
        region_hint: Option<country::Id>,
    ) -> Result<ParsedNumber, VerifyError> {
        match self.normalizer.normalize(raw_phone, region_hint) {
            Validation::Valid(number) => Ok(number),
            Validation::Invalid(InvalidReason::Empty) => Err(InputError::MissingPhone.into()),
            Validation::Invalid(reason) => Err(reason.into()),
            Validation::Incomplete { .. } => Err(InvalidReason::FormatMismatch.into()),
        }
    }

    fn resolve_credentials(&self, client_id: &str) -> Result<&crate::CredentialSet, VerifyError> {
        self.credentials.resolve(client_id).map_err(|err| {
            error!("configuration error for client {:?}: {}", client_id, err);
            err.into()
        })
    }
}
