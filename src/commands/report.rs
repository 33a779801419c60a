use crate::commands::current_user;
use crate::db::{comments::Comments, records::Records};
use crate::libs::messages::Message;
use crate::libs::report::build_report;
use crate::libs::stats::StatsAggregator;
use crate::libs::view::View;
use crate::{msg_error, msg_print, msg_warning};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct ReportArgs {}

/// Computes the analytics summary for the active user and renders it
/// as terminal tables. A store failure degrades to a "statistics
/// unavailable" message instead of aborting with a raw error.
pub fn cmd(_report_args: ReportArgs) -> Result<()> {
    let user = current_user()?;
    let owner_id = user.id.unwrap_or(0);

    let mut aggregator = StatsAggregator::new(Records::new()?, Comments::new()?);
    let summary = match aggregator.compute_summary(owner_id, Utc::now().naive_utc()) {
        Ok(summary) => summary,
        Err(e) => {
            msg_error!(Message::StatsUnavailable(e.to_string()));
            return Ok(());
        }
    };

    msg_print!(Message::ReportHeader(user.username.clone()), true);
    msg_print!(Message::ReportGeneratedAt(summary.generated_at.clone()));

    if summary.unclassified_status > 0 {
        msg_warning!(Message::UnclassifiedStatusWarning(summary.unclassified_status));
    }

    let report = build_report(&user.username, &summary);
    for skipped in &report.skipped {
        msg_warning!(Message::SectionSkipped(skipped.section.to_string(), skipped.reason.clone()));
    }
    View::sections(&report.sections)?;

    if !summary.comments.recent_comments.is_empty() {
        msg_print!(Message::RecentCommentsHeader, true);
        View::recent_comments(&summary.comments.recent_comments)?;
    }

    Ok(())
}
