use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings, CollectionController, HttpUsersApi, UserCollection, UsersApi,
};
use shared::domain::UserId;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage the remote users directory from the terminal")]
struct Args {
    /// Settings file; defaults to ./client.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Users collection URL, overriding config and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the users collection.
    List,
    /// Create a user.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Update a loaded user; omitted fields keep their current value.
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user.
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?.with_api_url(args.api_url)?;
    let mut controller = CollectionController::new(HttpUsersApi::from_settings(&settings)?);

    let all_succeeded = run_command(&mut controller, args.command).await?;
    print!("{}", render_table(controller.view().users()));

    if !all_succeeded {
        tracing::error!(api_url = %settings.api_url, "command did not complete");
        bail!("a remote call to {} failed; see the log for details", settings.api_url);
    }
    Ok(())
}

/// Loads the collection, then runs `command` against it. Returns whether
/// every remote call succeeded; remote failures never surface as errors.
async fn run_command<A: UsersApi>(
    controller: &mut CollectionController<A>,
    command: Command,
) -> Result<bool> {
    let loaded = controller.load().await;

    let applied = match command {
        Command::List => true,
        Command::Add { name, email } => {
            controller.begin_create();
            let draft = controller.draft_mut();
            draft.name = name;
            draft.email = email;
            controller.submit().await
        }
        Command::Edit { id, name, email } => {
            // without a loaded collection there is nothing to edit from
            if !loaded {
                tracing::warn!(user_id = id, "edit skipped: users could not be loaded");
                return Ok(false);
            }
            if !controller.begin_edit(UserId(id)) {
                bail!("no user with id {id} in the loaded collection");
            }
            let draft = controller.draft_mut();
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(email) = email {
                draft.email = email;
            }
            controller.submit().await
        }
        Command::Delete { id } => controller.delete(UserId(id)).await,
    };

    Ok(loaded && applied)
}

fn render_table(users: &UserCollection) -> String {
    let id_width = users
        .iter()
        .map(|u| u.id.to_string().len())
        .chain(["ID".len()])
        .max()
        .unwrap_or(2);
    let name_width = users
        .iter()
        .map(|u| u.name.chars().count())
        .chain(["Name".len()])
        .max()
        .unwrap_or(4);

    let mut out = format!("{:<id_width$}  {:<name_width$}  Email\n", "ID", "Name");
    for user in users.iter() {
        out.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {}\n",
            user.id.to_string(),
            user.name,
            user.email
        ));
    }
    out
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
