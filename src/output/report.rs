//! Console report of link counts

use crate::crawler::LinkCount;
use std::io::{self, Write};

/// Width of the right-justified count column
const COUNT_WIDTH: usize = 8;

/// Writes one line per page: count right-justified to 8 columns, a space,
/// then the page key
///
/// Lines are sorted ascending by count, ties by key.
pub fn write_report<W: Write>(links: &LinkCount, out: &mut W) -> io::Result<()> {
    for (key, count) in links.sorted_by_count() {
        writeln!(out, "{:>width$} {}", count, key, width = COUNT_WIDTH)?;
    }
    Ok(())
}

/// Renders the report into a string
pub fn format_report(links: &LinkCount) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report(links, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Prints the report to standard output
pub fn print_report(links: &LinkCount) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(links, &mut out)?;
    out.flush()
}
