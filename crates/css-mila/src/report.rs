//! Aligned console report for a finished build.
//!
//! Filenames are right-padded and size strings left-padded to the widest
//! entry so the columns line up, matching the original plugin's table.

use std::time::Duration;

use owo_colors::OwoColorize;

use crate::pipeline::ProcessResult;

/// Format a byte count as decimal kilobytes with two decimal places.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} kB", bytes as f64 / 1000.0)
}

/// Width of the filename column: the longest destination name.
pub fn name_column_width(results: &[ProcessResult]) -> usize {
    results.iter().map(|r| r.file.len()).max().unwrap_or(0)
}

/// Widths of the two size columns, from their formatted strings.
pub fn size_column_widths(results: &[ProcessResult]) -> (usize, usize) {
    let src = results
        .iter()
        .map(|r| format_kb(r.src_size).len())
        .max()
        .unwrap_or(0);
    let dest = results
        .iter()
        .map(|r| format_kb(r.dest_size).len())
        .max()
        .unwrap_or(0);
    (src, dest)
}

/// Print one aligned line per result, in encounter order, followed by the
/// elapsed-time summary.
pub fn print_report(results: &[ProcessResult], out_dir: &str, elapsed: Duration) {
    let name_width = name_column_width(results);
    let (src_width, dest_width) = size_column_widths(results);

    for result in results {
        let name = format!("{:<name_width$}", result.file);
        let src = format!("{:>src_width$}", format_kb(result.src_size));
        let dest = format!("{:>dest_width$}", format_kb(result.dest_size));

        eprintln!(
            "{}{}  {} {} {}",
            out_dir.dimmed(),
            name.cyan(),
            src.bold().dimmed(),
            "│ min:".dimmed(),
            dest.bold().dimmed()
        );
    }

    let millis = elapsed.as_secs_f64() * 1000.0;
    eprintln!("{}", format!("✓ built in {}ms", millis.ceil() as u64).green());
}

/// Per-target failure marker line.
pub fn print_fail(out_dir: &str, file: &str) {
    eprintln!("{}{} {}", out_dir.dimmed(), file.cyan(), "FAIL".red());
}
