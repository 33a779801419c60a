use crate::libs::comment::Comment;
use crate::libs::formatter::{date_only, format_timestamp, truncate_ellipsis};
use crate::libs::record::Record;
use crate::libs::report::ReportSection;
use crate::libs::stats::CommentSample;
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    /// Prints each report section as a titled table.
    pub fn sections(sections: &[ReportSection]) -> Result<()> {
        for section in sections {
            println!("\n{}", section.title);
            let mut table = Table::new();
            table.add_row(Row::new(section.header.iter().map(|h| Cell::new(h)).collect()));
            for data_row in &section.rows {
                table.add_row(Row::new(data_row.iter().map(|c| Cell::new(c)).collect()));
            }
            table.printstd();
        }
        Ok(())
    }

    pub fn records(records: &[Record]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "TITLE", "CATEGORY", "STATUS", "DATE"]);
        for record in records {
            table.add_row(row![
                record.id.unwrap_or(0),
                truncate_ellipsis(&record.title, 30),
                record.category,
                record.status,
                record.created_at.map(|ts| format_timestamp(&ts)).unwrap_or_default()
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn comments(comments: &[Comment]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "CONTENT", "CREATED", "UPDATED"]);
        for comment in comments {
            table.add_row(row![
                comment.id.unwrap_or(0),
                truncate_ellipsis(&comment.content, 50),
                comment.created_at.map(|ts| format_timestamp(&ts)).unwrap_or_default(),
                comment.updated_at.map(|ts| format_timestamp(&ts)).unwrap_or_default()
            ]);
        }
        table.printstd();
        Ok(())
    }

    pub fn recent_comments(samples: &[CommentSample]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["RECORD", "CONTENT", "DATE"]);
        for sample in samples {
            table.add_row(row![
                truncate_ellipsis(&sample.record_title, 30),
                sample.content,
                date_only(&sample.created_at)
            ]);
        }
        table.printstd();
        Ok(())
    }
}
