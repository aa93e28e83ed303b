//! Table and delimited rendering of aggregation rows.
//!
//! Column order is `[group-key columns..., time_spent_s, time_spent_m,
//! time_spent_h, time_spent_d]`; row order comes from the aggregator and is
//! never re-sorted here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;
use wt_core::AggregationRow;

use crate::cli::ExportFormat;

/// Builds the header cells for the given key combination.
fn headers(include_month: bool, domain_label: &str) -> Vec<String> {
    let mut cells = vec![domain_label.to_string()];
    if include_month {
        cells.push("year".to_string());
        cells.push("month".to_string());
    }
    for unit in ["time_spent_s", "time_spent_m", "time_spent_h", "time_spent_d"] {
        cells.push(unit.to_string());
    }
    cells
}

/// Builds the cells of one row. `fixed` selects three-decimal formatting
/// for the table; exports keep full precision.
fn row_cells(row: &AggregationRow, include_month: bool, fixed: bool) -> Vec<String> {
    let number = |value: f64| {
        if fixed {
            format!("{value:.3}")
        } else {
            format!("{value}")
        }
    };

    let mut cells = vec![row.domain.clone()];
    if include_month {
        cells.push(row.year.map_or_else(String::new, |y| y.to_string()));
        cells.push(row.month.map_or_else(String::new, |m| m.to_string()));
    }
    cells.push(number(row.time_spent_s));
    cells.push(number(row.time_spent_m()));
    cells.push(number(row.time_spent_h()));
    cells.push(number(row.time_spent_d()));
    cells
}

/// Renders rows as an aligned console table with a header and separator.
///
/// The domain column is left-aligned; everything else is right-aligned.
pub fn render_table(rows: &[AggregationRow], include_month: bool, domain_label: &str) -> String {
    let header = headers(include_month, domain_label);
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row_cells(row, include_month, true))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    push_line(&mut output, &header, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut output, &separator, &widths);
    for cells in &body {
        push_line(&mut output, cells, &widths);
    }
    output
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    for (i, (cell, width)) in cells.iter().zip(widths.iter().copied()).enumerate() {
        if i > 0 {
            output.push_str("  ");
        }
        if i == 0 {
            output.push_str(&format!("{cell:<width$}"));
        } else {
            output.push_str(&format!("{cell:>width$}"));
        }
    }
    output.push('\n');
}

/// Renders rows as delimiter-separated values with a header row.
pub fn render_delimited(
    rows: &[AggregationRow],
    include_month: bool,
    domain_label: &str,
    delimiter: char,
) -> String {
    let mut output = String::new();
    let join = |cells: &[String]| {
        cells
            .iter()
            .map(|cell| escape_field(cell, delimiter))
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    };

    output.push_str(&join(&headers(include_month, domain_label)));
    output.push('\n');
    for row in rows {
        output.push_str(&join(&row_cells(row, include_month, false)));
        output.push('\n');
    }
    output
}

/// Quotes a field when it contains the delimiter, a quote, or a newline.
fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Writes rows to the selected destination.
///
/// Console output always goes to stdout. File formats write to `output`,
/// or to a freshly generated `<uuid>.<ext>` name in the working directory
/// when no path is given.
pub fn write_output(
    rows: &[AggregationRow],
    include_month: bool,
    domain_label: &str,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    match format {
        ExportFormat::Console => {
            print!("{}", render_table(rows, include_month, domain_label));
            Ok(())
        }
        ExportFormat::Csv => write_file(
            &render_delimited(rows, include_month, domain_label, ','),
            "csv",
            output,
            rows.len(),
        ),
        ExportFormat::Tsv => write_file(
            &render_delimited(rows, include_month, domain_label, '\t'),
            "tsv",
            output,
            rows.len(),
        ),
    }
}

fn write_file(content: &str, extension: &str, output: Option<&Path>, rows: usize) -> Result<()> {
    let path = output.map_or_else(
        || PathBuf::from(format!("{}.{extension}", Uuid::new_v4())),
        Path::to_path_buf,
    );
    fs::write(&path, content)
        .with_context(|| format!("failed to write export: {}", path.display()))?;
    tracing::info!(path = %path.display(), rows, "exported file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn row(domain: &str, seconds: f64) -> AggregationRow {
        AggregationRow {
            domain: domain.to_string(),
            year: None,
            month: None,
            time_spent_s: seconds,
        }
    }

    fn monthly_row(domain: &str, year: i32, month: u32, seconds: f64) -> AggregationRow {
        AggregationRow {
            domain: domain.to_string(),
            year: Some(year),
            month: Some(month),
            time_spent_s: seconds,
        }
    }

    #[test]
    fn table_aligns_columns() {
        let rows = vec![row("github.com", 301.0)];
        let output = render_table(&rows, false, "domain");
        assert_snapshot!(output, @r"
        domain      time_spent_s  time_spent_m  time_spent_h  time_spent_d
        ----------  ------------  ------------  ------------  ------------
        github.com       301.000         5.017         0.084         0.003
        ");
    }

    #[test]
    fn empty_table_still_has_header() {
        let output = render_table(&[], false, "domain");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("domain"));
        assert!(lines[0].contains("time_spent_d"));
    }

    #[test]
    fn table_includes_month_columns_when_asked() {
        let rows = vec![monthly_row("github.com", 2020, 9, 60.0)];
        let output = render_table(&rows, true, "domain");
        assert!(output.lines().next().unwrap().contains("year"));
        assert!(output.lines().next().unwrap().contains("month"));
        assert!(output.contains("2020"));
    }

    #[test]
    fn delimited_keeps_full_precision() {
        // A day's worth of seconds keeps every derived column integral.
        let rows = vec![row("example.com", 86_400.0)];
        let output = render_delimited(&rows, false, "domain", ',');
        assert_eq!(
            output,
            "domain,time_spent_s,time_spent_m,time_spent_h,time_spent_d\n\
             example.com,86400,1440,24,1\n"
        );
    }

    #[test]
    fn delimited_includes_month_key_columns() {
        let rows = vec![monthly_row("example.com", 2020, 9, 86_400.0)];
        let output = render_delimited(&rows, true, "subdomain", ',');
        assert_eq!(
            output,
            "subdomain,year,month,time_spent_s,time_spent_m,time_spent_h,time_spent_d\n\
             example.com,2020,9,86400,1440,24,1\n"
        );
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let rows = vec![row("example.com", 86_400.0)];
        let output = render_delimited(&rows, false, "domain", '\t');
        assert!(output.contains("example.com\t86400\t1440\t24\t1"));
    }

    #[test]
    fn fields_containing_the_delimiter_are_quoted() {
        assert_eq!(escape_field("a,b", ','), "\"a,b\"");
        assert_eq!(escape_field("plain", ','), "plain");
        assert_eq!(escape_field("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn write_output_writes_csv_to_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![row("example.com", 86_400.0)];

        write_output(&rows, false, "domain", ExportFormat::Csv, Some(&path)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("domain,time_spent_s"));
        assert!(content.contains("example.com,86400"));
    }
}
