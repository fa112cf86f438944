use log::warn;
use thiserror::Error;

/// Credentials selecting one account at the verification provider.
///
/// All three fields are required; an empty one is a deployment mistake, not
/// something user input can cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub account_id: String,
    pub auth_token: String,
    pub verify_service_id: String,
}

impl CredentialSet {
    pub fn new(
        account_id: impl Into<String>,
        auth_token: impl Into<String>,
        verify_service_id: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            auth_token: auth_token.into(),
            verify_service_id: verify_service_id.into(),
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.account_id.is_empty() {
            Some("account id")
        } else if self.auth_token.is_empty() {
            Some("auth token")
        } else if self.verify_service_id.is_empty() {
            Some("verify service id")
        } else {
            None
        }
    }
}

/// Operator-facing configuration failures. Never rendered as a validation
/// error: user input cannot cause these and must not be blamed for them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("no credentials configured for client {0:?}")]
    UnknownClient(String),
    #[error("credential set for client {client:?} is missing the {field}")]
    IncompleteSet { client: String, field: &'static str },
    #[error("environment variable {0} is not set")]
    MissingEnvVar(String),
}

/// Ordered mapping from client identifier to credential set, loaded once at
/// startup. Resolution fails closed: an unknown client or a partially
/// configured set is an error, never a fallback to some other client's
/// credentials.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    clients: Vec<(String, CredentialSet)>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the credential set for `client`.
    pub fn with_client(mut self, client: impl Into<String>, set: CredentialSet) -> Self {
        let client = client.into();
        if let Some(existing) = self.clients.iter_mut().find(|(name, _)| *name == client) {
            existing.1 = set;
        } else {
            self.clients.push((client, set));
        }
        self
    }

    /// Reads one credential set per listed client from the process
    /// environment, using the `{CLIENT}_ACCOUNT_SID`, `{CLIENT}_AUTH_TOKEN`
    /// and `{CLIENT}_VERIFY_SERVICE_ID` variables.
    pub fn from_env(clients: &[&str]) -> Result<Self, CredentialError> {
        let mut store = Self::new();
        for client in clients {
            let read = |suffix: &str| {
                let name = format!("{client}_{suffix}");
                std::env::var(&name).map_err(|_| CredentialError::MissingEnvVar(name))
            };
            let set = CredentialSet::new(
                read("ACCOUNT_SID")?,
                read("AUTH_TOKEN")?,
                read("VERIFY_SERVICE_ID")?,
            );
            store = store.with_client(*client, set);
        }
        Ok(store)
    }

    /// Resolves `client` to its credential set, failing closed on unknown
    /// clients and incomplete sets.
    pub fn resolve(&self, client: &str) -> Result<&CredentialSet, CredentialError> {
        let set = self
            .clients
            .iter()
            .find(|(name, _)| name == client)
            .map(|(_, set)| set)
            .ok_or_else(|| {
                warn!("credential lookup for unknown client {:?}", client);
                CredentialError::UnknownClient(client.to_string())
            })?;
        if let Some(field) = set.missing_field() {
            warn!("credential set for client {:?} is incomplete", client);
            return Err(CredentialError::IncompleteSet {
                client: client.to_string(),
                field,
            });
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialError, CredentialSet, CredentialStore};

    fn store() -> CredentialStore {
        CredentialStore::new().with_client("acme", CredentialSet::new("AC1", "tok", "VA1"))
    }

    #[test]
    fn resolves_configured_client() {
        let store = store();
        let set = store.resolve("acme").unwrap();
        assert_eq!(set.account_id, "AC1");
    }

    #[test]
    fn unknown_client_fails_closed() {
        assert_eq!(
            store().resolve("nobody"),
            Err(CredentialError::UnknownClient("nobody".into()))
        );
    }

    #[test]
    fn incomplete_set_fails_closed() {
        let store = CredentialStore::new().with_client("half", CredentialSet::new("AC1", "", "VA1"));
        assert!(matches!(
            store.resolve("half"),
            Err(CredentialError::IncompleteSet { field: "auth token", .. })
        ));
    }

    #[test]
    fn with_client_replaces_existing_entry() {
        let store = store().with_client("acme", CredentialSet::new("AC2", "tok2", "VA2"));
        assert_eq!(store.resolve("acme").unwrap().account_id, "AC2");
    }

    #[test]
    fn from_env_reads_all_three_fields() {
        std::env::set_var("ENVTEST_ACCOUNT_SID", "AC9");
        std::env::set_var("ENVTEST_AUTH_TOKEN", "tok9");
        std::env::set_var("ENVTEST_VERIFY_SERVICE_ID", "VA9");
        let store = CredentialStore::from_env(&["ENVTEST"]).unwrap();
        assert_eq!(store.resolve("ENVTEST").unwrap().verify_service_id, "VA9");

        std::env::remove_var("ENVTEST_VERIFY_SERVICE_ID");
        assert!(matches!(
            CredentialStore::from_env(&["ENVTEST"]),
            Err(CredentialError::MissingEnvVar(name)) if name == "ENVTEST_VERIFY_SERVICE_ID"
        ));
    }
}
