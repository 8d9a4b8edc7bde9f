//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use shophub_core::error::AppError;
use shophub_database::Repositories;
use shophub_entity::user::{PermissionSet, User};
use shophub_service::UserService;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Replace a user's permissions, e.g. `grant wes@example.com ADMIN USER`
    Grant {
        /// E-mail of the account
        email: String,
        /// Permission names (ADMIN, USER, ITEMCREATE, ITEMUPDATE, ITEMDELETE, PERMISSIONUPDATE)
        #[arg(required = true)]
        permissions: Vec<String>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Display name
    name: String,
    /// Email
    email: String,
    /// Permissions
    permissions: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            permissions: u.permissions.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let repositories = Repositories::postgres(&pool);

    let result = match &args.command {
        UserCommand::List => repositories.users.list().await.map(|users| {
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }),
        UserCommand::Grant { email, permissions } => {
            match PermissionSet::from_names(permissions) {
                Ok(set) => UserService::new(repositories.users)
                    .grant_permissions(email, set)
                    .await
                    .map(|user| {
                        output::print_success(&format!(
                            "{} now has {}",
                            user.email, user.permissions
                        ));
                    }),
                Err(e) => Err(e),
            }
        }
    };

    pool.close().await;
    result
}
