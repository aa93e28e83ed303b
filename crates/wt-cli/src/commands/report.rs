//! Implementation of the `wt report` command.

use anyhow::Result;
use wt_core::Analyzer;

use crate::cli::{OutputArgs, QueryArgs};
use crate::commands::{build_query, domain_label};
use crate::render::write_output;

/// Runs the time-by-domain report.
pub fn run(analyzer: &Analyzer, args: &QueryArgs, output: &OutputArgs) -> Result<()> {
    let query = build_query(args)?;
    let rows = analyzer.time_by_domain(&query);
    tracing::debug!(rows = rows.len(), "computed report");

    write_output(
        &rows,
        query.include_month,
        domain_label(query.groupby),
        output.format,
        output.output.as_deref(),
    )
}
