pub(crate) mod config;

pub use self::config::OpsConfig;

use crate::error::Result;
use std::path::PathBuf;

impl OpsConfig {
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let config = self::config::build_config(config_file)?.try_deserialize()?;
        Ok(config)
    }
}
