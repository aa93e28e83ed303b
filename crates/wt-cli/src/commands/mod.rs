//! CLI command implementations.

pub mod export;
pub mod random;
pub mod report;

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use wt_core::{DomainGrouping, TimeByDomainArgs};

use crate::cli::{GroupbyMode, QueryArgs};

/// The domain column header for a grouping mode.
pub(crate) const fn domain_label(groupby: DomainGrouping) -> &'static str {
    match groupby {
        DomainGrouping::Registrable => "domain",
        DomainGrouping::FullHost => "subdomain",
    }
}

/// Translates command-line query flags into façade arguments.
pub(crate) fn build_query(args: &QueryArgs) -> Result<TimeByDomainArgs> {
    let groupby = match args.groupby {
        GroupbyMode::Domain => DomainGrouping::Registrable,
        GroupbyMode::Subdomain => DomainGrouping::FullHost,
    };

    Ok(TimeByDomainArgs {
        domains: non_empty(&args.domains),
        hosts: non_empty(&args.hosts),
        groupby,
        include_month: args.include_month,
        date_start: args.date_start.as_deref().map(parse_date_bound).transpose()?,
        date_end: args.date_end.as_deref().map(parse_date_bound).transpose()?,
    })
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

/// Parses a date bound: RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a bare date
/// (interpreted as midnight UTC). Bounds compare inclusively.
pub(crate) fn parse_date_bound(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(instant) = raw.parse::<DateTime<Utc>>() {
        return Ok(instant);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    bail!("unrecognized date {raw:?} (expected YYYY-MM-DD or RFC 3339)")
}
