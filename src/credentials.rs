use crate::error::{OpsError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Google service-account key used by the backend's Firebase Admin SDK.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type")]
    pub kind: String,
    pub project_id: String,
    pub private_key_id: String,
    private_key: String,
    pub client_email: String,
    pub client_id: Option<String>,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("kind", &self.kind)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"[redacted]")
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginMethod {
    EmailPassword,
    Phone,
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginMethod::EmailPassword => write!(f, "email/password"),
            LoginMethod::Phone => write!(f, "phone"),
        }
    }
}

/// Whether the service account was present at startup. Loaded once and
/// handed to whatever needs it.
#[derive(Debug)]
pub enum CredentialState {
    Loaded(ServiceAccount),
    Missing { path: PathBuf },
}

impl CredentialState {
    /// An absent file puts the backend in degraded mode. A file that is there
    /// but cannot be used is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Firebase service account not found at {}. Phone authentication will not work until you add the service account JSON file.",
                    path.display()
                );
                return Ok(Self::Missing {
                    path: path.to_owned(),
                });
            }
            Err(source) => {
                return Err(OpsError::CredentialRead {
                    path: path.to_owned(),
                    source,
                })
            }
        };

        let account: ServiceAccount = serde_json::from_str(&raw)
            .map_err(|err| OpsError::credential_invalid(path, err.to_string()))?;
        if account.kind != "service_account" {
            return Err(OpsError::credential_invalid(
                path,
                format!("expected type \"service_account\", got \"{}\"", account.kind),
            ));
        }
        if !account.private_key.contains("PRIVATE KEY") {
            return Err(OpsError::credential_invalid(
                path,
                "private_key is not a PEM encoded key",
            ));
        }

        info!(project_id = %account.project_id, "Firebase Admin SDK initialized");
        Ok(Self::Loaded(account))
    }

    pub fn login_methods(&self) -> Vec<LoginMethod> {
        match self {
            Self::Loaded(_) => vec![LoginMethod::EmailPassword, LoginMethod::Phone],
            Self::Missing { .. } => vec![LoginMethod::EmailPassword],
        }
    }

    pub fn require_phone_login(&self) -> Result<&ServiceAccount> {
        match self {
            Self::Loaded(account) => Ok(account),
            Self::Missing { path } => Err(OpsError::PhoneLoginUnavailable { path: path.clone() }),
        }
    }
}
