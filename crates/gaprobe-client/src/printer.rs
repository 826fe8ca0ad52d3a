//! Line-oriented rendering of reports.
//!
//! Values are written as `"{header}: {value}"`, one per line. Indices are
//! bounded by both the header and the row, so ragged responses never panic.

use std::io::{self, Write};

use crate::report::Report;

/// Write the notice used for a query that matched nothing.
pub fn print_no_data(view_id: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "No data found for {}", view_id)
}

/// Print every report's rows, labelled by the header names. The first report
/// without rows prints the no-data notice and ends the output.
pub fn print_reports(reports: &[Report], view_id: &str, out: &mut impl Write) -> io::Result<()> {
    if reports.is_empty() {
        return print_no_data(view_id, out);
    }

    for report in reports {
        if report.is_empty() {
            return print_no_data(view_id, out);
        }

        let dimension_headers = &report.header.dimensions;
        let metric_headers = &report.header.metrics;

        for row in &report.rows {
            for (name, value) in dimension_headers.iter().zip(&row.dimensions) {
                writeln!(out, "{}: {}", name, value)?;
            }

            for (j, values) in row.metrics.iter().enumerate() {
                write!(out, "Date Range ({}): ", j)?;
                for (name, value) in metric_headers.iter().zip(values) {
                    writeln!(out, "{}: {}", name, value)?;
                }
            }
        }
    }

    Ok(())
}

/// Print the first dimension of each row under a fixed label, e.g.
/// `bookingId: booking-42`.
pub fn print_labelled_column(
    report: &Report,
    label: &str,
    view_id: &str,
    out: &mut impl Write,
) -> io::Result<()> {
    if report.is_empty() {
        return print_no_data(view_id, out);
    }

    for row in &report.rows {
        if let Some(value) = row.dimensions.first() {
            writeln!(out, "{}: {}", label, value)?;
        }
    }
    Ok(())
}
