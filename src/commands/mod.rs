pub mod comment;
pub mod export;
pub mod init;
pub mod record;
pub mod report;

use crate::db::users::Users;
use crate::libs::config::Config;
use crate::libs::user::User;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage records", subcommand)]
    Record(record::RecordCommand),
    #[command(about = "Manage comments on records", subcommand)]
    Comment(comment::CommentCommand),
    #[command(about = "Show the analytics report")]
    Report(report::ReportArgs),
    #[command(about = "Export the analytics report to a file")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        init_tracing();
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Record(command) => record::cmd(command),
            Commands::Comment(command) => comment::cmd(command),
            Commands::Report(args) => report::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}

/// Installs the tracing subscriber when debug mode is requested via
/// `REKOD_DEBUG` or `RUST_LOG`; plain console output otherwise.
fn init_tracing() {
    if crate::libs::messages::macros::is_debug_mode() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Resolves the active user from the configuration, creating the user
/// row on first use.
pub(crate) fn current_user() -> Result<User> {
    let config = Config::read()?;
    let user_config = config.active_user()?;
    Users::new()?.get_or_create(&user_config.username, &user_config.full_name)
}
