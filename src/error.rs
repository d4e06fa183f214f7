use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("database.name must be set when database.url is not")]
    MissingDatabaseName,
    #[error("Failed to copy {} to {}: {source}", template.display(), target.display())]
    EnvCopy {
        template: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read service account {}: {source}", path.display())]
    CredentialRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid service account {}: {reason}", path.display())]
    CredentialInvalid { path: PathBuf, reason: String },
    #[error("Phone login is unavailable: no service account at {}", path.display())]
    PhoneLoginUnavailable { path: PathBuf },
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OpsError {
    pub fn env_copy(template: &Path, target: &Path, source: std::io::Error) -> Self {
        Self::EnvCopy {
            template: template.to_owned(),
            target: target.to_owned(),
            source,
        }
    }

    pub fn credential_invalid<T: Into<String>>(path: &Path, reason: T) -> Self {
        Self::CredentialInvalid {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = OpsError> = std::result::Result<T, E>;
