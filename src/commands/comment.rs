use crate::commands::current_user;
use crate::db::{comments::Comments, records::Records};
use crate::libs::comment::Comment;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    #[command(about = "Add a comment to a record")]
    Add(AddArgs),
    #[command(about = "List comments on a record")]
    List(ListArgs),
    #[command(about = "Edit one of your comments")]
    Edit(EditArgs),
    #[command(about = "Delete one of your comments")]
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(help = "Record ID to comment on")]
    record_id: i64,
    #[arg(help = "Comment content")]
    content: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(help = "Record ID")]
    record_id: i64,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(help = "Comment ID")]
    id: i64,
    #[arg(help = "New content")]
    content: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(help = "Comment ID")]
    id: i64,
    #[arg(short, long, help = "Skip the confirmation prompt")]
    yes: bool,
}

pub fn cmd(command: CommentCommand) -> Result<()> {
    match command {
        CommentCommand::Add(args) => add(args),
        CommentCommand::List(args) => list(args),
        CommentCommand::Edit(args) => edit(args),
        CommentCommand::Delete(args) => delete(args),
    }
}

fn add(args: AddArgs) -> Result<()> {
    let user = current_user()?;
    // Comments may outlive their record, but new ones must target a
    // record that exists right now.
    Records::new()?
        .get(args.record_id)?
        .ok_or_else(|| msg_error_anyhow!(Message::RecordNotFound(args.record_id)))?;

    let comment = Comment::new(args.record_id, user.id.unwrap_or(0), &args.content);
    Comments::new()?.insert(&comment)?;
    msg_success!(Message::CommentAdded);
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let record = Records::new()?
        .get(args.record_id)?
        .ok_or_else(|| msg_error_anyhow!(Message::RecordNotFound(args.record_id)))?;

    let comments = Comments::new()?.fetch_by_record(args.record_id)?;
    if comments.is_empty() {
        msg_print!(Message::NoCommentsFound);
        return Ok(());
    }

    msg_print!(Message::CommentsHeader(record.title));
    View::comments(&comments)?;
    Ok(())
}

fn edit(args: EditArgs) -> Result<()> {
    let user = current_user()?;
    Comments::new()?.update(args.id, user.id.unwrap_or(0), &args.content)?;
    msg_success!(Message::CommentUpdated);
    Ok(())
}

fn delete(args: DeleteArgs) -> Result<()> {
    let user = current_user()?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteComment.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_print!(Message::NoChangesDetected);
            return Ok(());
        }
    }

    Comments::new()?.delete(args.id, user.id.unwrap_or(0))?;
    msg_success!(Message::CommentDeleted);
    Ok(())
}
