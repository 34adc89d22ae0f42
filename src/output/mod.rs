//! Output module for presenting crawl results
//!
//! This module handles formatting the final link counts for the console.

mod report;

pub use report::{format_report, print_report, write_report};
