//! dvdrental CLI - operator tooling for the dvdrental API.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin user
//! dvdrental-cli users create -u root -p 'long passphrase' -r admin
//!
//! # Create a regular user with a display name
//! dvdrental-cli users create -u mary -p pw1 --first-name Mary --last-name Smith
//!
//! # List users
//! dvdrental-cli users list
//! ```
//!
//! # Commands
//!
//! - `users create` - Create a user with any role
//! - `users list` - List users

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dvdrental-cli")]
#[command(author, version, about = "dvdrental API operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage API users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Plaintext password (hashed before storage)
        #[arg(short, long)]
        password: String,

        /// Role (`user` or `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Given name
        #[arg(long)]
        first_name: Option<String>,

        /// Family name
        #[arg(long)]
        last_name: Option<String>,
    },
    /// List all users
    List,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Users { action } => match action {
            UserAction::Create {
                username,
                password,
                role,
                first_name,
                last_name,
            } => {
                commands::users::create(commands::users::CreateUser {
                    username: &username,
                    password: &password,
                    role: &role,
                    first_name,
                    last_name,
                })
                .await?;
            }
            UserAction::List => commands::users::list().await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_users_create_flags() {
        let cli = Cli::try_parse_from([
            "dvdrental-cli",
            "users",
            "create",
            "-u",
            "root",
            "-p",
            "secret",
            "-r",
            "admin",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Users {
                action: UserAction::Create { .. }
            })
        ));
    }
}
