use crate::error::{OpsError, Result};
use crate::settings::config;
use migration::{EnumLabel, MigratorTrait};
use std::borrow::Cow;
use std::fmt::Write;
use tracing::log::LevelFilter;
use tracing::info;

pub struct Database {
    connection: sea_orm::DatabaseConnection,
}

impl Database {
    pub async fn connect(settings: &config::Database) -> Result<Database> {
        let url = connection_url(settings)?;

        let mut opts = sea_orm::ConnectOptions::new(normalize_url(&url).into_owned());
        opts.sqlx_logging_level(LevelFilter::Trace);

        let connection = sea_orm::Database::connect(opts).await?;

        Ok(Database { connection })
    }

    pub fn connection(&self) -> &sea_orm::DatabaseConnection {
        &self.connection
    }

    pub async fn migrate_up(&self, steps: Option<u32>) -> Result<()> {
        migration::Migrator::up(&self.connection, steps).await?;
        info!("Migrations applied");
        Ok(())
    }

    pub async fn migrate_down(&self, steps: Option<u32>) -> Result<()> {
        migration::Migrator::down(&self.connection, steps).await?;
        info!("Migrations rolled back");
        Ok(())
    }

    pub async fn migration_status(&self) -> Result<()> {
        migration::Migrator::status(&self.connection).await?;
        Ok(())
    }

    /// Current labels of every enum type the rename migration touches.
    pub async fn renamed_enum_labels(&self) -> Result<Vec<EnumLabel>> {
        let type_names: Vec<&str> = migration::RENAMED_ENUMS
            .iter()
            .map(|renamed| renamed.type_name)
            .collect();
        let labels = migration::enum_labels(&self.connection, &type_names).await?;
        Ok(labels)
    }
}

fn connection_url(settings: &config::Database) -> Result<String> {
    if let Some(url) = &settings.url {
        return Ok(url.clone());
    }

    let name = settings.name.as_deref().ok_or(OpsError::MissingDatabaseName)?;

    let mut url = "postgresql://".to_string();
    write!(&mut url, "/{}", name)?;
    write!(&mut url, "?host={}", settings.host.as_deref().unwrap_or("localhost"))?;
    if let Some(port) = settings.port {
        write!(&mut url, "&port={}", port)?;
    }
    if let Some(user) = settings.user.as_deref() {
        write!(&mut url, "&user={}", user)?;
    }
    if let Some(password) = settings.password.as_deref() {
        write!(&mut url, "&password={}", password)?;
    }
    let mut params: Vec<_> = settings.params.iter().collect();
    params.sort();
    for (key, value) in params {
        write!(&mut url, "&{}={}", key, value)?;
    }

    Ok(url)
}

/// Strip a SQLAlchemy driver suffix (`postgresql+asyncpg://`) so the URL is
/// accepted by sqlx.
fn normalize_url(url: &str) -> Cow<'_, str> {
    match url.split_once("://") {
        Some((scheme, rest)) if scheme.contains('+') => {
            let base = scheme.split('+').next().unwrap_or(scheme);
            Cow::Owned(format!("{base}://{rest}"))
        }
        _ => Cow::Borrowed(url),
    }
}
