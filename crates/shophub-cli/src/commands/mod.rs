//! CLI command definitions and dispatch.

pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use shophub_core::config::AppConfig;
use shophub_core::error::AppError;
use shophub_database::DatabasePool;

use crate::output::OutputFormat;

/// ShopHub operator tools
#[derive(Debug, Parser)]
#[command(name = "shophub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment; selects `config/<env>.toml`
    #[arg(short, long, env = "SHOPHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::User(args) => user::execute(args, &self.env, self.format).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: connect to PostgreSQL. The operator commands have no meaning
/// against the in-memory store, so the configured backend is ignored.
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.url.is_empty() {
        return Err(AppError::configuration(
            "database.url is required (set DATABASE_URL)",
        ));
    }
    DatabasePool::connect(&config.database).await
}
