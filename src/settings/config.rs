use config::{Environment, File, Map, Source, Value};
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroU16;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Ansi {
    pub(crate) colors: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct Database {
    pub(crate) url: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<NonZeroU16>,
    pub(crate) name: Option<String>,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    #[serde(default)]
    pub(crate) params: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EnvFile {
    pub(crate) template: PathBuf,
    pub(crate) target: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Firebase {
    pub(crate) service_account: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpsConfig {
    pub(crate) ansi: Ansi,
    #[serde(default)]
    pub(crate) database: Database,
    pub(crate) env_file: EnvFile,
    pub(crate) firebase: Firebase,
}

#[derive(Debug)]
struct DefaultSettings;

impl Source for DefaultSettings {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(Self)
    }

    fn collect(&self) -> Result<Map<String, Value>, ::config::ConfigError> {
        let mut defaults = HashMap::new();
        defaults.insert("ansi.colors".to_string(), true.into());
        defaults.insert("env_file.template".to_string(), ".env.example".into());
        defaults.insert("env_file.target".to_string(), ".env".into());
        defaults.insert(
            "firebase.service_account".to_string(),
            "backend/firebase-service-account.json".into(),
        );

        Ok(defaults)
    }
}

/// Layers, lowest priority first: built-in defaults, the config file,
/// `SECTION__KEY` environment variables, then a plain `DATABASE_URL`.
pub fn build_config(
    config_file: Option<PathBuf>,
) -> Result<::config::Config, ::config::ConfigError> {
    ::config::Config::builder()
        .add_source(DefaultSettings)
        .add_source(
            config_file
                .map(File::from)
                .unwrap_or_else(|| File::with_name("config/onlyforu"))
                .required(false),
        )
        .add_source(Environment::default().separator("__"))
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_repository_layout() {
        let config: OpsConfig = build_config(Some(PathBuf::from("does/not/exist.yaml")))
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.ansi.colors);
        assert_eq!(config.env_file.template, PathBuf::from(".env.example"));
        assert_eq!(config.env_file.target, PathBuf::from(".env"));
        assert_eq!(
            config.firebase.service_account,
            PathBuf::from("backend/firebase-service-account.json")
        );
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "ansi:\n  colors: false\ndatabase:\n  name: onlyforu_db\n  port: 6543\n  params:\n    sslmode: disable"
        )
        .unwrap();

        let config: OpsConfig = build_config(Some(file.path().to_owned()))
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!config.ansi.colors);
        assert_eq!(config.database.name.as_deref(), Some("onlyforu_db"));
        assert_eq!(config.database.port.map(NonZeroU16::get), Some(6543));
        assert_eq!(config.database.params.get("sslmode").map(String::as_str), Some("disable"));
        assert_eq!(config.env_file.target, PathBuf::from(".env"));
    }
}
