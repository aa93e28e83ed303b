//! Implementation of the `wt random` command.

use anyhow::Result;
use wt_core::{Analyzer, DomainGrouping, TimeByDomainArgs};

use crate::cli::OutputArgs;
use crate::commands::domain_label;
use crate::render::write_output;

/// Reports on one registrable domain picked uniformly at random.
///
/// Only the pick is random; the report itself is the deterministic
/// time-by-domain query scoped to it. An empty history renders an empty
/// table rather than failing.
pub fn run(analyzer: &Analyzer, include_month: bool, output: &OutputArgs) -> Result<()> {
    let mut rng = rand::thread_rng();
    let args = TimeByDomainArgs {
        include_month,
        ..TimeByDomainArgs::default()
    };

    let rows = match analyzer.time_by_random_domain(&mut rng, &args) {
        Some((domain, rows)) => {
            tracing::info!(%domain, "selected random domain");
            rows
        }
        None => Vec::new(),
    };

    write_output(
        &rows,
        include_month,
        domain_label(DomainGrouping::Registrable),
        output.format,
        output.output.as_deref(),
    )
}
