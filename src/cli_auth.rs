use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};

use listify_server::catalog_store::SqliteCatalogStore;
use listify_server::user::{SqliteUserStore, UserManager, UserRole};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

fn parse_role(s: &str) -> Result<UserRole> {
    match UserRole::from_str(s) {
        Some(role) => Ok(role),
        None => bail!("Unknown role '{}', expected 'regular' or 'admin'", s),
    }
}

/// User administration against the server's databases.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding catalog.db and user.db.
    #[clap(long, env = "LISTIFY_DB_DIR", value_parser = parse_path)]
    pub db_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates a user with password credentials.
    AddUser {
        email: String,
        password: String,
        nickname: String,

        /// regular or admin
        #[clap(long, default_value = "regular", value_parser = parse_role)]
        role: UserRole,
    },

    /// Replaces the password of a user.
    SetPassword { email: String, password: String },

    /// Changes the role of a user.
    SetRole {
        email: String,
        #[clap(value_parser = parse_role)]
        role: UserRole,
    },

    /// Lists every account, deleted ones included.
    ListUsers,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli_args = CliArgs::parse();

    if !cli_args.db_dir.is_dir() {
        bail!("Database directory does not exist: {:?}", cli_args.db_dir);
    }
    let catalog_store = SqliteCatalogStore::new(cli_args.db_dir.join("catalog.db"))
        .context("Failed to open catalog database")?;
    let user_store = SqliteUserStore::new(cli_args.db_dir.join("user.db"))
        .context("Failed to open user database")?;
    let user_manager = UserManager::new(Arc::new(catalog_store), Arc::new(user_store));

    match cli_args.command {
        Command::AddUser {
            email,
            password,
            nickname,
            role,
        } => {
            let user = user_manager.add_user(&email, &password, &nickname, role)?;
            println!(
                "Created {} user {} ({})",
                role.as_str(),
                user.user_no,
                user.email
            );
        }
        Command::SetPassword { email, password } => {
            user_manager.set_password(&email, &password)?;
            println!("Password updated for {}", email);
        }
        Command::SetRole { email, role } => {
            user_manager.set_role(&email, role)?;
            println!("{} is now {}", email, role.as_str());
        }
        Command::ListUsers => {
            let users = user_manager.list_users()?;
            if users.is_empty() {
                println!("(no users)");
            }
            for user in users {
                println!(
                    "{:>5}  {:<8} {:<32} {}{}",
                    user.user_no,
                    user.role().as_str(),
                    user.email,
                    user.nickname,
                    if user.is_deleted { "  [deleted]" } else { "" }
                );
            }
        }
    }
    Ok(())
}
