//! One-line capacity report

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::query::CapacityReport;

use super::utils::color_choice;

/// Shown in place of a size when no directory is large enough.
pub const EXHAUSTED_MESSAGE: &str = "no directory large enough to delete";

/// Plain-text report line, without trailing newline.
pub fn format_report(report: &CapacityReport) -> String {
    match report.smallest_deletable {
        Some(size) => format!(
            "Reported size is: {}, smallest deletable size is {}",
            report.root_size, size
        ),
        None => format!(
            "Reported size is: {}, {} (need {} more)",
            report.root_size, EXHAUSTED_MESSAGE, report.needed
        ),
    }
}

/// Print the report line to stdout, highlighting an exhausted query.
pub fn print_report(report: &CapacityReport, use_color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(use_color));
    if report.is_exhausted() {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    }
    write!(stdout, "{}", format_report(report))?;
    stdout.reset()?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(smallest: Option<u64>) -> CapacityReport {
        CapacityReport {
            root_size: 48381165,
            capacity: 70_000_000,
            required_free: 30_000_000,
            available: 21618835,
            needed: 8381165,
            directory_count: 4,
            recorded_total: 73409764,
            smallest_deletable: smallest,
        }
    }

    #[test]
    fn test_report_line() {
        assert_eq!(
            format_report(&report(Some(24933642))),
            "Reported size is: 48381165, smallest deletable size is 24933642"
        );
    }

    #[test]
    fn test_exhausted_report_line() {
        let line = format_report(&report(None));
        assert!(line.starts_with("Reported size is: 48381165, "));
        assert!(line.contains(EXHAUSTED_MESSAGE));
        assert!(line.contains("need 8381165 more"));
        assert!(!line.contains("undefined"));
    }
}
