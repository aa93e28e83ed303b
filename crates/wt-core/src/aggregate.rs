//! Grouping and summation of timed visits.
//!
//! Aggregation is a pure reduction: filter, bucket by key, sum durations.
//! It never mutates the upstream sequence, so independent queries can run
//! repeatedly over one loaded dataset.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::TimedVisit;

/// Which domain column events are bucketed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainGrouping {
    /// Bucket by registrable domain (`google.com`).
    #[default]
    Registrable,
    /// Bucket by full subdomain-qualified host (`mail.google.com`).
    FullHost,
}

/// The key combination for one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupSpec {
    /// Domain granularity; registrable domain and full host are mutually
    /// exclusive choices.
    pub domain: DomainGrouping,
    /// Break buckets down by calendar year and month. Year and month always
    /// travel together.
    pub include_month: bool,
}

/// Restricts which events contribute to the sums.
///
/// Filtering happens before grouping, so an excluded event never inflates
/// any bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Registrable-domain allow-list.
    pub domains: Option<Vec<String>>,
    /// Full-host allow-list.
    pub hosts: Option<Vec<String>>,
    /// Inclusive lower bound on the visit timestamp.
    pub date_start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the visit timestamp.
    pub date_end: Option<DateTime<Utc>>,
}

impl EventFilter {
    fn matches(&self, visit: &TimedVisit) -> bool {
        if let Some(domains) = &self.domains {
            if !domains.contains(&visit.visit.page.registrable_domain) {
                return false;
            }
        }
        if let Some(hosts) = &self.hosts {
            if !hosts.contains(&visit.visit.page.full_host) {
                return false;
            }
        }
        if let Some(start) = self.date_start {
            if visit.visit.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.date_end {
            if visit.visit.timestamp > end {
                return false;
            }
        }
        true
    }
}

/// One group-by result: a key tuple and its summed dwell time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationRow {
    /// The domain column: registrable domain or full host, per the
    /// grouping that produced the row.
    pub domain: String,
    /// Calendar year, present iff the grouping included months.
    pub year: Option<i32>,
    /// Calendar month (1-12), present iff the grouping included months.
    pub month: Option<u32>,
    /// Summed dwell time in seconds.
    pub time_spent_s: f64,
}

impl AggregationRow {
    /// Summed dwell time in minutes.
    pub fn time_spent_m(&self) -> f64 {
        self.time_spent_s / 60.0
    }

    /// Summed dwell time in hours.
    pub fn time_spent_h(&self) -> f64 {
        self.time_spent_s / 3600.0
    }

    /// Summed dwell time in days.
    pub fn time_spent_d(&self) -> f64 {
        self.time_spent_s / 86_400.0
    }
}

/// Groups timed visits by the requested key and sums their durations.
///
/// Row order is deterministic: month buckets ascending when present, then
/// summed time descending, then domain name lexicographic as the final
/// tie-break. Zero-sum groups (a domain visited only as the final event)
/// are retained.
pub fn aggregate(
    events: &[TimedVisit],
    spec: &GroupSpec,
    filter: &EventFilter,
) -> Vec<AggregationRow> {
    let mut sums: BTreeMap<(Option<i32>, Option<u32>, String), f64> = BTreeMap::new();

    for timed in events.iter().filter(|timed| filter.matches(timed)) {
        let domain = match spec.domain {
            DomainGrouping::Registrable => timed.visit.page.registrable_domain.clone(),
            DomainGrouping::FullHost => timed.visit.page.full_host.clone(),
        };
        let (year, month) = if spec.include_month {
            (Some(timed.visit.year()), Some(timed.visit.month()))
        } else {
            (None, None)
        };

        *sums.entry((year, month, domain)).or_insert(0.0) += timed.duration_seconds;
    }

    let mut rows: Vec<AggregationRow> = sums
        .into_iter()
        .map(|((year, month, domain), time_spent_s)| AggregationRow {
            domain,
            year,
            month,
            time_spent_s,
        })
        .collect();

    rows.sort_by(|a, b| {
        (a.year, a.month)
            .cmp(&(b.year, b.month))
            .then_with(|| {
                b.time_spent_s
                    .partial_cmp(&a.time_spent_s)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.domain.cmp(&b.domain))
    });

    rows
}
