mod audit;
mod credentials;
mod database;
mod env_file;
mod error;
mod settings;
#[cfg(test)]
mod test_util;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use itertools::Itertools;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::credentials::CredentialState;
use crate::database::Database;
use crate::error::Result;
use crate::settings::OpsConfig;

/// Operator tooling for the OnlyForU backend.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to layer over the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the active environment file
    #[command(subcommand)]
    Env(EnvCommand),
    /// Run schema migrations
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Inspect the Firebase service account
    #[command(subcommand)]
    Credentials(CredentialsCommand),
    /// List every user and their creator profile
    Audit,
}

#[derive(Debug, Subcommand)]
enum EnvCommand {
    /// Overwrite the active env file with the template
    Init {
        #[arg(long)]
        template: Option<PathBuf>,
        #[arg(long)]
        target: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct Steps {
    /// Number of migrations to apply or revert; all when omitted
    #[arg(short = 'n', long)]
    num: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum MigrateCommand {
    Up(Steps),
    Down(Steps),
    Status,
    /// Show the current labels of the renamed enum types
    Labels,
}

#[derive(Debug, Subcommand)]
enum CredentialsCommand {
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok(); // ignore errors

    let cli = Cli::parse();
    let settings = OpsConfig::load(cli.config.clone())?;

    tracing_subscriber::fmt()
        .with_ansi(settings.ansi.colors)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    debug!(?cli, "starting");

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Env(EnvCommand::Init { template, target }) => {
            let template = template.unwrap_or(settings.env_file.template);
            let target = target.unwrap_or(settings.env_file.target);
            env_file::bootstrap(&template, &target, &mut stdout)?;
        }
        Command::Migrate(command) => {
            let db = Database::connect(&settings.database).await?;
            match command {
                MigrateCommand::Up(steps) => db.migrate_up(steps.num).await?,
                MigrateCommand::Down(steps) => db.migrate_down(steps.num).await?,
                MigrateCommand::Status => db.migration_status().await?,
                MigrateCommand::Labels => {
                    let labels = db.renamed_enum_labels().await?;
                    for (type_name, group) in &labels.iter().chunk_by(|l| l.type_name.as_str()) {
                        writeln!(stdout, "{}: {}", type_name, group.map(|l| l.label.as_str()).join(", "))?;
                    }
                }
            }
        }
        Command::Credentials(CredentialsCommand::Check) => {
            let state = CredentialState::load(&settings.firebase.service_account)?;
            match state.require_phone_login() {
                Ok(account) => writeln!(
                    stdout,
                    "Service account loaded for project {} ({})",
                    account.project_id, account.client_email
                )?,
                Err(err) => writeln!(stdout, "{err}")?,
            }
            writeln!(stdout, "Login methods: {}", state.login_methods().iter().join(", "))?;
        }
        Command::Audit => {
            let db = Database::connect(&settings.database).await?;
            let report = audit::audit_users(db.connection()).await?;
            report.write_to(&mut stdout)?;
        }
    }

    Ok(())
}
