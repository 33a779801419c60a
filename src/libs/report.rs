//! Report formatting shared by the terminal view and every exporter.
//!
//! [`build_report`] maps a computed [`StatisticsSummary`] into an
//! ordered sequence of named sections, each a small table (header row
//! plus data rows of plain strings). The terminal tables, the CSV
//! export, and the PDF sink all render this same sequence, so the
//! report looks identical everywhere. The transform is pure: it never
//! touches a store and never fails on a well-formed summary — optional
//! sections degrade to omission, and a section fed malformed data
//! (negative counts) is skipped and recorded instead of corrupting the
//! rest of the document.

use crate::libs::formatter::{date_only, truncate_ellipsis};
use crate::libs::stats::StatisticsSummary;

/// Document title shown at the top of exported reports.
pub const REPORT_TITLE: &str = "Rekod Records";

/// Title length limits used in the tabular sections.
const COMMENTED_TITLE_LEN: usize = 40;
const RECENT_TITLE_LEN: usize = 30;

/// One named table within the formatted report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A section refused because its input was malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionError {
    pub section: &'static str,
    pub reason: String,
}

/// The formatter output: ordered sections plus any skipped ones.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub username: String,
    pub generated_at: String,
    pub sections: Vec<ReportSection>,
    pub skipped: Vec<SectionError>,
}

/// Builds the report for one summary. Section order is fixed:
/// Overview, Recent Activity, Records by Category, Most Commented
/// Records, Recent Records (Last 5); the latter three are omitted when
/// empty.
pub fn build_report(username: &str, summary: &StatisticsSummary) -> Report {
    let mut report = Report {
        title: REPORT_TITLE.to_string(),
        username: username.to_string(),
        generated_at: summary.generated_at.clone(),
        sections: Vec::new(),
        skipped: Vec::new(),
    };

    overview_section(summary, &mut report);
    activity_section(summary, &mut report);
    category_section(summary, &mut report);
    commented_section(summary, &mut report);
    recent_records_section(summary, &mut report);

    report
}

fn overview_section(summary: &StatisticsSummary, report: &mut Report) {
    let counts = [
        summary.total,
        summary.status_breakdown.active,
        summary.status_breakdown.completed,
        summary.status_breakdown.inactive,
        summary.unclassified_status,
        summary.comments.total_comments,
        summary.comments.comments_on_my_records,
    ];
    if let Some(bad) = counts.iter().find(|c| **c < 0) {
        report.skipped.push(SectionError {
            section: "Overview",
            reason: format!("negative count: {}", bad),
        });
        return;
    }

    let mut rows = vec![
        vec!["Total Records".to_string(), summary.total.to_string()],
        vec!["Active Records".to_string(), summary.status_breakdown.active.to_string()],
        vec!["Completed Records".to_string(), summary.status_breakdown.completed.to_string()],
        vec!["Inactive Records".to_string(), summary.status_breakdown.inactive.to_string()],
    ];
    if summary.unclassified_status > 0 {
        rows.push(vec!["Unclassified Status".to_string(), summary.unclassified_status.to_string()]);
    }
    rows.push(vec!["Total Comments".to_string(), summary.comments.total_comments.to_string()]);
    rows.push(vec![
        "Comments on My Records".to_string(),
        summary.comments.comments_on_my_records.to_string(),
    ]);
    if let Some(first) = &summary.first_record_date {
        rows.push(vec!["First Record Date".to_string(), first.clone()]);
    }
    if let Some(last) = &summary.last_record_date {
        rows.push(vec!["Last Record Date".to_string(), last.clone()]);
    }

    report.sections.push(ReportSection {
        title: "Overview".to_string(),
        header: vec!["Metric".to_string(), "Value".to_string()],
        rows,
    });
}

fn activity_section(summary: &StatisticsSummary, report: &mut Report) {
    let stats = &summary.time_stats;
    if stats.today < 0 || stats.this_week < 0 || stats.this_month < 0 {
        report.skipped.push(SectionError {
            section: "Recent Activity",
            reason: "negative time-window count".to_string(),
        });
        return;
    }

    report.sections.push(ReportSection {
        title: "Recent Activity".to_string(),
        header: vec!["Period".to_string(), "Records Created".to_string()],
        rows: vec![
            vec!["Today".to_string(), stats.today.to_string()],
            vec!["This Week".to_string(), stats.this_week.to_string()],
            vec!["This Month".to_string(), stats.this_month.to_string()],
        ],
    });
}

fn category_section(summary: &StatisticsSummary, report: &mut Report) {
    if summary.by_category.is_empty() {
        return;
    }
    if let Some((category, count)) = summary.by_category.iter().find(|(_, count)| **count < 0) {
        report.skipped.push(SectionError {
            section: "Records by Category",
            reason: format!("negative count for '{}': {}", category, count),
        });
        return;
    }

    // BTreeMap iteration already yields category names ascending.
    report.sections.push(ReportSection {
        title: "Records by Category".to_string(),
        header: vec!["Category".to_string(), "Count".to_string()],
        rows: summary
            .by_category
            .iter()
            .map(|(category, count)| vec![category.clone(), count.to_string()])
            .collect(),
    });
}

fn commented_section(summary: &StatisticsSummary, report: &mut Report) {
    let top = &summary.comments.top_commented_records;
    if top.is_empty() {
        return;
    }
    if top.iter().any(|t| t.comment_count < 0) {
        report.skipped.push(SectionError {
            section: "Most Commented Records",
            reason: "negative comment count".to_string(),
        });
        return;
    }

    report.sections.push(ReportSection {
        title: "Most Commented Records".to_string(),
        header: vec!["Record Title".to_string(), "Comments".to_string()],
        rows: top
            .iter()
            .map(|t| vec![truncate_ellipsis(&t.record_title, COMMENTED_TITLE_LEN), t.comment_count.to_string()])
            .collect(),
    });
}

fn recent_records_section(summary: &StatisticsSummary, report: &mut Report) {
    if summary.recent_records.is_empty() {
        return;
    }

    report.sections.push(ReportSection {
        title: "Recent Records (Last 5)".to_string(),
        header: vec!["Title".to_string(), "Category".to_string(), "Status".to_string(), "Date".to_string()],
        rows: summary
            .recent_records
            .iter()
            .map(|r| {
                vec![
                    truncate_ellipsis(&r.title, RECENT_TITLE_LEN),
                    r.category.clone(),
                    r.status.clone(),
                    date_only(&r.date).to_string(),
                ]
            })
            .collect(),
    });
}
