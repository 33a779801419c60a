//! Report export for sharing and archival.
//!
//! Wraps the aggregator → formatter → sink pipeline behind a single
//! `Exporter` that writes the analytics report to disk in one of three
//! formats. The summary is computed before any file is created, so a
//! failing store never leaves a half-written export behind.
//!
//! ## Formats
//!
//! - **PDF**: the rendered report document (the primary export)
//! - **CSV**: the formatter's sections flattened into one sheet
//! - **JSON**: the raw summary object, pretty-printed
//!
//! Default file names follow `report_<username>_<YYYYMMDD>.<ext>`.

use crate::db::{comments::Comments, records::Records};
use crate::libs::messages::Message;
use crate::libs::pdf::PdfSink;
use crate::libs::report::{build_report, Report};
use crate::libs::stats::StatsAggregator;
use crate::libs::user::User;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Rendered report document.
    Pdf,
    /// Formatter sections flattened into a single sheet.
    Csv,
    /// Raw summary object, pretty-printed.
    Json,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: Option<PathBuf>,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    /// Computes the summary for `user` as of `now` and writes the
    /// report file, returning the written path.
    pub fn export(&self, user: &User, now: NaiveDateTime) -> Result<PathBuf> {
        let owner_id = user.id.ok_or_else(|| msg_error_anyhow!(Message::UserNotFound(user.username.clone())))?;

        // Compute everything up front; only a complete report reaches
        // the filesystem.
        let mut aggregator = StatsAggregator::new(Records::new()?, Comments::new()?);
        let summary = aggregator
            .compute_summary(owner_id, now)
            .map_err(|e| msg_error_anyhow!(Message::ExportFailed(e.to_string())))?;
        let report = build_report(&user.username, &summary);

        let path = self.resolve_path(&user.username, now);
        match self.format {
            ExportFormat::Pdf => {
                let bytes = PdfSink::render(&report).map_err(|e| msg_error_anyhow!(Message::PdfRenderFailed(e.to_string())))?;
                fs::write(&path, bytes)?;
            }
            ExportFormat::Csv => self.write_csv(&report, &path)?,
            ExportFormat::Json => fs::write(&path, serde_json::to_string_pretty(&summary)?)?,
        }

        Ok(path)
    }

    fn resolve_path(&self, username: &str, now: NaiveDateTime) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| {
            PathBuf::from(format!("report_{}_{}.{}", username, now.format("%Y%m%d"), self.format.extension()))
        })
    }

    /// Flattens the report sections into one CSV sheet: section title
    /// row, header row, data rows, blank separator row.
    fn write_csv(&self, report: &Report, path: &PathBuf) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        let width = report
            .sections
            .iter()
            .map(|s| s.header.len())
            .max()
            .unwrap_or(2);

        wtr.write_record(pad(vec![report.title.clone(), report.username.clone()], width))?;
        wtr.write_record(pad(vec!["Generated".to_string(), report.generated_at.clone()], width))?;
        wtr.write_record(pad(Vec::new(), width))?;

        for section in &report.sections {
            wtr.write_record(pad(vec![section.title.to_uppercase()], width))?;
            wtr.write_record(pad(section.header.clone(), width))?;
            for row in &section.rows {
                wtr.write_record(pad(row.clone(), width))?;
            }
            wtr.write_record(pad(Vec::new(), width))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Pads a row with empty cells so every CSV record has equal width.
fn pad(mut row: Vec<String>, width: usize) -> Vec<String> {
    while row.len() < width {
        row.push(String::new());
    }
    row
}
