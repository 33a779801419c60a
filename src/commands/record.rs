use crate::commands::current_user;
use crate::db::{comments::Comments, records::Records};
use crate::libs::messages::Message;
use crate::libs::record::{Record, RecordStatus, DEFAULT_CATEGORY};
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    #[command(about = "Create a record")]
    Add(AddArgs),
    #[command(about = "List records, optionally filtered by a search term")]
    List(ListArgs),
    #[command(about = "Show one record with its comments")]
    Show(ShowArgs),
    #[command(about = "Edit a record")]
    Edit(EditArgs),
    #[command(about = "Delete a record")]
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(help = "Record title")]
    title: String,
    #[arg(short, long, default_value = "", help = "Record description")]
    description: String,
    #[arg(short, long, default_value = DEFAULT_CATEGORY, help = "Record category")]
    category: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short, long, help = "Filter by a title/description substring")]
    search: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(help = "Record ID")]
    id: i64,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(help = "Record ID")]
    id: i64,
    #[arg(long, help = "New title")]
    title: Option<String>,
    #[arg(long, help = "New description")]
    description: Option<String>,
    #[arg(long, help = "New category")]
    category: Option<String>,
    #[arg(long, value_enum, help = "New status")]
    status: Option<RecordStatus>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(help = "Record ID")]
    id: i64,
    #[arg(short, long, help = "Skip the confirmation prompt")]
    yes: bool,
}

pub fn cmd(command: RecordCommand) -> Result<()> {
    match command {
        RecordCommand::Add(args) => add(args),
        RecordCommand::List(args) => list(args),
        RecordCommand::Show(args) => show(args),
        RecordCommand::Edit(args) => edit(args),
        RecordCommand::Delete(args) => delete(args),
    }
}

fn add(args: AddArgs) -> Result<()> {
    let user = current_user()?;
    let record = Record::new(user.id.unwrap_or(0), &args.title, &args.description, &args.category);
    Records::new()?.insert(&record)?;
    msg_success!(Message::RecordCreated);
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let user = current_user()?;
    let user_id = user.id.unwrap_or(0);
    let mut records_db = Records::new()?;

    let records = match &args.search {
        Some(term) => records_db.search(user_id, term)?,
        None => records_db.fetch(user_id)?,
    };
    if records.is_empty() {
        match args.search {
            Some(term) => msg_print!(Message::NoRecordsMatching(term)),
            None => msg_print!(Message::NoRecordsFound),
        }
        return Ok(());
    }

    msg_print!(Message::RecordsHeader);
    View::records(&records)?;
    Ok(())
}

fn show(args: ShowArgs) -> Result<()> {
    let mut records_db = Records::new()?;
    let record = records_db
        .get(args.id)?
        .ok_or_else(|| msg_error_anyhow!(Message::RecordNotFound(args.id)))?;

    View::records(std::slice::from_ref(&record))?;
    if !record.description.is_empty() {
        println!("\n{}", record.description);
    }

    let comments = Comments::new()?.fetch_by_record(args.id)?;
    if comments.is_empty() {
        msg_print!(Message::NoCommentsFound);
    } else {
        msg_print!(Message::CommentsHeader(record.title.clone()), true);
        View::comments(&comments)?;
    }
    Ok(())
}

fn edit(args: EditArgs) -> Result<()> {
    let mut records_db = Records::new()?;
    let record = records_db
        .get(args.id)?
        .ok_or_else(|| msg_error_anyhow!(Message::RecordNotFound(args.id)))?;

    let interactive = args.title.is_none() && args.description.is_none() && args.category.is_none() && args.status.is_none();
    let (title, description, category, status) = if interactive {
        prompt_changes(&record)?
    } else {
        (
            args.title.unwrap_or_else(|| record.title.clone()),
            args.description.unwrap_or_else(|| record.description.clone()),
            args.category.unwrap_or_else(|| record.category.clone()),
            args.status.map(|s| s.as_str().to_string()).unwrap_or_else(|| record.status.clone()),
        )
    };

    if title == record.title && description == record.description && category == record.category && status == record.status {
        msg_print!(Message::NoChangesDetected);
        return Ok(());
    }

    records_db.update(args.id, &title, &description, &category, &status)?;
    msg_success!(Message::RecordUpdated);
    Ok(())
}

fn prompt_changes(record: &Record) -> Result<(String, String, String, String)> {
    let theme = ColorfulTheme::default();
    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptRecordTitle.to_string())
        .with_initial_text(record.title.clone())
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptRecordDescription.to_string())
        .with_initial_text(record.description.clone())
        .allow_empty(true)
        .interact_text()?;
    let category: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptRecordCategory.to_string())
        .with_initial_text(record.category.clone())
        .interact_text()?;

    let current = RecordStatus::ALL.iter().position(|s| s.as_str() == record.status).unwrap_or(0);
    let selected = Select::with_theme(&theme)
        .with_prompt(Message::PromptRecordStatus.to_string())
        .items(&RecordStatus::ALL.map(|s| s.as_str()))
        .default(current)
        .interact()?;

    Ok((title, description, category, RecordStatus::ALL[selected].as_str().to_string()))
}

fn delete(args: DeleteArgs) -> Result<()> {
    let mut records_db = Records::new()?;
    let record = records_db
        .get(args.id)?
        .ok_or_else(|| msg_error_anyhow!(Message::RecordNotFound(args.id)))?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteRecord(record.title.clone()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_print!(Message::NoChangesDetected);
            return Ok(());
        }
    }

    records_db.delete(args.id)?;
    msg_success!(Message::RecordDeleted);
    Ok(())
}
