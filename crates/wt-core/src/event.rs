//! Raw history records and the visit-event loader.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{self, PageLocation};

/// One entry of the source history export.
///
/// Only `time_usec` and `url` matter; the remaining fields exist so a full
/// export round-trips without noise. Every field is optional because a
/// record missing one is dropped individually, never failing the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Microseconds since the Unix epoch. The export has shipped this both
    /// as a JSON number and as a numeric string.
    #[serde(default)]
    pub time_usec: Option<TimeUsec>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub page_transition: Option<String>,
}

/// A microsecond-epoch timestamp in either of its exported spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeUsec {
    Micros(i64),
    Text(String),
}

impl TimeUsec {
    /// Returns the value as microseconds, if it is numeric.
    pub fn as_micros(&self) -> Option<i64> {
        match self {
            Self::Micros(us) => Some(*us),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One browsing action, immutable once constructed at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitEvent {
    /// When the page was visited.
    pub timestamp: DateTime<Utc>,
    /// The original URL string as recorded.
    pub url: String,
    /// Host and domain components derived from `url`.
    pub page: PageLocation,
}

impl VisitEvent {
    /// Calendar year of the visit (UTC).
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Calendar month of the visit (UTC), 1-12.
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }
}

/// Counts of records dropped during loading, by reason.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropStats {
    /// Missing or non-numeric `time_usec`.
    pub bad_timestamp: usize,
    /// Missing `url` field.
    pub missing_url: usize,
    /// URL present but not decomposable into a host.
    pub bad_url: usize,
    /// Pseudo-navigation entries such as the new-tab page.
    pub pseudo_navigation: usize,
}

impl DropStats {
    /// Total number of dropped records.
    pub const fn total(&self) -> usize {
        self.bad_timestamp + self.missing_url + self.bad_url + self.pseudo_navigation
    }
}

/// Result of loading a batch of raw records.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Usable events, sorted ascending by timestamp.
    pub events: Vec<VisitEvent>,
    /// What was dropped, and why.
    pub dropped: DropStats,
}

/// Turns raw records into a time-ordered sequence of visit events.
///
/// Records with an invalid timestamp or URL are dropped and counted, never
/// raised. The output ordering (ascending by timestamp, ties keeping input
/// order) is the invariant duration inference depends on.
pub fn load(records: Vec<RawRecord>) -> LoadOutcome {
    let mut events = Vec::with_capacity(records.len());
    let mut dropped = DropStats::default();

    for record in records {
        let Some(timestamp) = record
            .time_usec
            .as_ref()
            .and_then(TimeUsec::as_micros)
            .and_then(DateTime::from_timestamp_micros)
        else {
            dropped.bad_timestamp += 1;
            continue;
        };

        let Some(url) = record.url else {
            dropped.missing_url += 1;
            continue;
        };

        let page = match domain::decompose(&url) {
            Ok(page) => page,
            Err(error) => {
                tracing::debug!(%url, %error, "dropping record");
                dropped.bad_url += 1;
                continue;
            }
        };

        // Takeout logs Chrome's new-tab page with a literal `newtab` host.
        if page.full_host == "newtab" {
            dropped.pseudo_navigation += 1;
            continue;
        }

        events.push(VisitEvent {
            timestamp,
            url,
            page,
        });
    }

    // Stable sort: equal timestamps keep their input order, so repeated runs
    // over the same export produce identical sequences.
    events.sort_by_key(|e| e.timestamp);

    tracing::debug!(
        events = events.len(),
        dropped = dropped.total(),
        "loaded history records"
    );

    LoadOutcome { events, dropped }
}
