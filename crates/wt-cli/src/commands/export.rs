//! Implementation of the `wt export` command.

use std::path::Path;

use anyhow::Result;
use wt_core::{Analyzer, DomainGrouping};

use crate::cli::ExportFormat;
use crate::commands::domain_label;
use crate::render::write_output;

/// Exports the full-detail aggregation: every host, bucketed by month.
pub fn run(analyzer: &Analyzer, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let rows = analyzer.export_all();
    tracing::debug!(rows = rows.len(), "computed full export");

    write_output(
        &rows,
        true,
        domain_label(DomainGrouping::FullHost),
        format,
        output,
    )
}
