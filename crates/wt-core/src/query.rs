//! Named analysis presets over one loaded history.
//!
//! The [`Analyzer`] owns the annotated event sequence for the lifetime of a
//! run. Presets borrow it read-only, so callers can issue any number of
//! independent queries without recomputing the base sequence.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::aggregate::{AggregationRow, DomainGrouping, EventFilter, GroupSpec, aggregate};
use crate::duration::{DurationConfig, TimedVisit, annotate};
use crate::event::VisitEvent;

/// Arguments for the `time_by_domain` preset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeByDomainArgs {
    /// Restrict to these registrable domains.
    pub domains: Option<Vec<String>>,
    /// Restrict to these full hosts.
    pub hosts: Option<Vec<String>>,
    /// Domain granularity for the group key.
    pub groupby: DomainGrouping,
    /// Break totals down by calendar month.
    pub include_month: bool,
    /// Inclusive lower bound on visit timestamps.
    pub date_start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on visit timestamps.
    pub date_end: Option<DateTime<Utc>>,
}

/// One loaded, duration-annotated history, ready for repeated queries.
#[derive(Debug)]
pub struct Analyzer {
    visits: Vec<TimedVisit>,
}

impl Analyzer {
    /// Annotates a time-ordered event sequence and wraps it for querying.
    pub fn new(events: Vec<VisitEvent>, config: &DurationConfig) -> Self {
        Self {
            visits: annotate(events, config),
        }
    }

    /// The annotated sequence, in chronological order.
    pub fn visits(&self) -> &[TimedVisit] {
        &self.visits
    }

    /// Time spent per domain, with optional filters and month breakdown.
    pub fn time_by_domain(&self, args: &TimeByDomainArgs) -> Vec<AggregationRow> {
        let spec = GroupSpec {
            domain: args.groupby,
            include_month: args.include_month,
        };
        let filter = EventFilter {
            domains: args.domains.clone(),
            hosts: args.hosts.clone(),
            date_start: args.date_start,
            date_end: args.date_end,
        };
        aggregate(&self.visits, &spec, &filter)
    }

    /// Distinct registrable domains present, sorted.
    pub fn registrable_domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self
            .visits
            .iter()
            .map(|v| v.visit.page.registrable_domain.clone())
            .collect();
        domains.sort_unstable();
        domains.dedup();
        domains
    }

    /// Picks one registrable domain uniformly at random and reports on it.
    ///
    /// Randomness is confined to the domain *selection*; the report itself
    /// is the deterministic [`Self::time_by_domain`] scoped to the pick.
    /// Returns `None` for an empty history.
    pub fn time_by_random_domain<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        args: &TimeByDomainArgs,
    ) -> Option<(String, Vec<AggregationRow>)> {
        let domains = self.registrable_domains();
        let pick = domains.choose(rng)?.clone();

        let scoped = TimeByDomainArgs {
            domains: Some(vec![pick.clone()]),
            ..args.clone()
        };
        Some((pick, self.time_by_domain(&scoped)))
    }

    /// Full-detail export: every host, bucketed by month, no filter.
    pub fn export_all(&self) -> Vec<AggregationRow> {
        let spec = GroupSpec {
            domain: DomainGrouping::FullHost,
            include_month: true,
        };
        aggregate(&self.visits, &spec, &EventFilter::default())
    }
}
