//! Report export command.
//!
//! Exports the active user's analytics report to PDF (the default),
//! CSV, or JSON. The output path defaults to
//! `report_<username>_<YYYYMMDD>.<ext>` in the working directory.

use crate::commands::current_user;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format for the exported report
    #[arg(short, long, value_enum, default_value = "pdf")]
    format: ExportFormat,

    /// Custom output file path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let user = current_user()?;

    msg_info!(Message::ExportingReport(format!("{:?}", args.format), user.username.clone()));

    let exporter = Exporter::new(args.format, args.output);
    let path = exporter.export(&user, Utc::now().naive_utc())?;

    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}
