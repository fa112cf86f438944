use log::debug;
use strum::Display;
use thiserror::Error;

use crate::{credentials::CredentialSet, normalizer::ParsedNumber};

use super::{
    is_well_formed_code,
    provider::{Channel, CheckStatus, ProviderError, VerifyProvider},
};

/// Where a verification attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SessionState {
    /// No code has been sent.
    Idle,
    /// A code was sent and the user has not yet proven it.
    AwaitingCode,
    /// The provider approved a code; terminal.
    Verified,
    /// The last check did not approve. Retryable: the caller may submit
    /// another code or [`VerificationSession::reset`] to request a new one.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The requested action is not legal in the current state.
    #[error("cannot {action} while the session is {state}")]
    InvalidState {
        state: SessionState,
        action: &'static str,
    },
    /// The submitted code is not 4 to 6 digits. Rejected locally, no
    /// provider call is made.
    #[error("the verification code must be 4 to 6 digits")]
    MalformedCode,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Thin state machine over the verification provider, driven by a widget or
/// any other caller that holds one strictly valid number.
///
/// Transitions follow the provider's answers only; no timeout is modeled
/// here, since code expiry is reported by the provider at check time.
#[derive(Debug)]
pub struct VerificationSession {
    number: ParsedNumber,
    state: SessionState,
}

impl VerificationSession {
    /// Starts an idle session for an already normalized number.
    pub fn new(number: ParsedNumber) -> Self {
        Self {
            number,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn number(&self) -> &ParsedNumber {
        &self.number
    }

    /// `Idle -> AwaitingCode` on a successful provider send. Any provider
    /// error keeps the session idle and surfaces the error to the caller.
    pub fn request_code<P: VerifyProvider>(
        &mut self,
        provider: &P,
        credentials: &CredentialSet,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::InvalidState {
                state: self.state,
                action: "request a code",
            });
        }
        provider.send_code(credentials, self.number.e164(), Channel::Sms)?;
        debug!("code sent, awaiting user input");
        self.state = SessionState::AwaitingCode;
        Ok(())
    }

    /// `AwaitingCode -> Verified | Failed` depending on the provider's
    /// answer. Allowed again from `Failed` so the user can retry a check.
    pub fn submit_code<P: VerifyProvider>(
        &mut self,
        provider: &P,
        credentials: &CredentialSet,
        code: &str,
    ) -> Result<CheckStatus, SessionError> {
        if !matches!(
            self.state,
            SessionState::AwaitingCode | SessionState::Failed
        ) {
            return Err(SessionError::InvalidState {
                state: self.state,
                action: "submit a code",
            });
        }
        if !is_well_formed_code(code) {
            return Err(SessionError::MalformedCode);
        }
        let status = match provider.check_code(credentials, self.number.e164(), code) {
            Ok(status) => status,
            Err(err) => {
                if matches!(err, ProviderError::VerificationExpired) {
                    self.state = SessionState::Failed;
                }
                return Err(err.into());
            }
        };
        self.state = match status {
            CheckStatus::Approved => SessionState::Verified,
            CheckStatus::Pending | CheckStatus::Expired => SessionState::Failed,
        };
        Ok(status)
    }

    /// `Failed -> Idle`, so a fresh code can be requested.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Failed {
            return Err(SessionError::InvalidState {
                state: self.state,
                action: "reset",
            });
        }
        self.state = SessionState::Idle;
        Ok(())
    }
}
