//! # Rekod - personal record keeping with analytics
//!
//! A command-line utility for managing personal records with comments
//! and generating per-user statistics reports.
//!
//! ## Features
//!
//! - **Record Management**: Create, update, search, and track records
//! - **Comments**: Attach and manage comments on any record
//! - **Analytics**: Consolidated per-user statistics (status, category,
//!   time windows, activity, comment cross-stats)
//! - **Report Export**: Export the analytics report to PDF, CSV, or JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rekod::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
