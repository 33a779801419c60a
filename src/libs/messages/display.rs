//! Display implementation for rekod application messages.
//!
//! All user-facing text is defined here, in one place, so that wording
//! stays consistent across commands and the message enum remains the
//! single source of truth for terminal output.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError => "Failed to parse configuration file".to_string(),
            Message::ConfigUserMissing => "No active user configured. Run 'rekod init' first.".to_string(),
            Message::PromptUsername => "Username".to_string(),
            Message::PromptFullName => "Full name".to_string(),

            // === USER MESSAGES ===
            Message::UserCreated(username) => format!("User '{}' created.", username),
            Message::UserWelcome(full_name) => format!("Welcome back, {}!", full_name),
            Message::UserNotFound(username) => format!("User '{}' not found.", username),
            Message::UsernameTaken(username) => format!("Username '{}' already exists.", username),

            // === RECORD MESSAGES ===
            Message::RecordCreated => "Record created successfully!".to_string(),
            Message::RecordUpdated => "Record updated successfully!".to_string(),
            Message::RecordDeleted => "Record deleted successfully!".to_string(),
            Message::RecordNotFound(id) => format!("Record with ID {} not found.", id),
            Message::RecordTitleEmpty => "Record title must not be empty.".to_string(),
            Message::RecordsHeader => "Records:".to_string(),
            Message::NoRecordsFound => "No records found.".to_string(),
            Message::NoRecordsMatching(term) => format!("No records matching '{}'.", term),
            Message::ConfirmDeleteRecord(title) => format!("Delete record '{}'? Its comments will be kept.", title),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::PromptRecordTitle => "Title".to_string(),
            Message::PromptRecordDescription => "Description".to_string(),
            Message::PromptRecordCategory => "Category".to_string(),
            Message::PromptRecordStatus => "Status".to_string(),

            // === COMMENT MESSAGES ===
            Message::CommentAdded => "Comment added successfully!".to_string(),
            Message::CommentUpdated => "Comment updated successfully!".to_string(),
            Message::CommentDeleted => "Comment deleted successfully!".to_string(),
            Message::CommentNotFound(id) => format!("Comment with ID {} not found.", id),
            Message::CommentNotOwned => "You can only edit or delete your own comments.".to_string(),
            Message::CommentContentEmpty => "Comment content must not be empty.".to_string(),
            Message::CommentsHeader(title) => format!("Comments on '{}':", title),
            Message::NoCommentsFound => "No comments found.".to_string(),
            Message::ConfirmDeleteComment => "Delete this comment?".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportHeader(username) => format!("Analytics report for {}", username),
            Message::ReportGeneratedAt(ts) => format!("Generated on: {}", ts),
            Message::RecentCommentsHeader => "Recent Comments".to_string(),
            Message::StatsUnavailable(detail) => format!("Statistics unavailable: {}", detail),
            Message::SectionSkipped(section, reason) => format!("Section '{}' skipped: {}", section, reason),
            Message::UnclassifiedStatusWarning(count) => {
                format!("{} record(s) have an unrecognized status and are missing from the status breakdown.", count)
            }

            // === EXPORT MESSAGES ===
            Message::ExportingReport(format, username) => format!("Exporting {} report for {}...", format, username),
            Message::ExportCompleted(path) => format!("Export completed successfully: {}", path),
            Message::ExportFailed(error) => format!("Export failed: {}", error),
            Message::PdfRenderFailed(error) => format!("Error generating PDF: {}", error),
        };
        write!(f, "{}", text)
    }
}
