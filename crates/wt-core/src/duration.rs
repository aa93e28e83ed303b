//! Duration inference: crediting each visit with a dwell duration.
//!
//! The source data records points in time, not durations. Each event is
//! credited with the gap to its successor in the chronological sequence.
//! The successor relationship is global by default: navigating from domain
//! A to domain B truncates A's credit at the moment of navigation, even if
//! A's content (a video, say) logically continues. This is a known,
//! accepted inaccuracy, not a bug.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::VisitEvent;

/// Which event counts as a visit's successor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuccessorPolicy {
    /// The next event in the full chronological sequence, regardless of
    /// domain.
    #[default]
    Global,
    /// The next event on the same registrable domain. Credits a domain
    /// until the user returns to it, which can overcount heavily.
    PerDomain,
}

/// Configuration for duration inference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationConfig {
    /// Successor policy. Defaults to [`SuccessorPolicy::Global`].
    #[serde(default)]
    pub policy: SuccessorPolicy,

    /// Optional upper bound, in seconds, on a single page's credited
    /// duration. `None` (the default) performs no outlier capping: a
    /// multi-hour gap is credited in full, which is a documented
    /// shortcoming of the inference, not a silent transformation.
    #[serde(default)]
    pub single_page_limit_s: Option<f64>,
}

/// A visit event plus its inferred dwell duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedVisit {
    /// The underlying visit.
    pub visit: VisitEvent,
    /// Inferred dwell time in seconds. Never negative; zero for the final
    /// event in the sequence, which has no successor.
    pub duration_seconds: f64,
}

/// Annotates a time-ordered event sequence with dwell durations.
///
/// `events` must be sorted ascending by timestamp (the loader's output
/// invariant). Equal or out-of-order timestamps clamp to a zero duration,
/// never a negative one. The final event has no successor and is credited
/// zero, so it contributes nothing to downstream sums while its group still
/// appears in aggregation.
pub fn annotate(events: Vec<VisitEvent>, config: &DurationConfig) -> Vec<TimedVisit> {
    let mut durations = vec![0.0_f64; events.len()];

    match config.policy {
        SuccessorPolicy::Global => {
            for i in 0..events.len().saturating_sub(1) {
                durations[i] = gap_seconds(events[i].timestamp, events[i + 1].timestamp);
            }
        }
        SuccessorPolicy::PerDomain => {
            // Walk backwards, remembering the most recent visit per domain.
            let mut next_on_domain: HashMap<String, DateTime<Utc>> = HashMap::new();
            for (i, event) in events.iter().enumerate().rev() {
                if let Some(&next) = next_on_domain.get(&event.page.registrable_domain) {
                    durations[i] = gap_seconds(event.timestamp, next);
                }
                next_on_domain.insert(event.page.registrable_domain.clone(), event.timestamp);
            }
        }
    }

    if let Some(limit) = config.single_page_limit_s {
        for duration in &mut durations {
            *duration = duration.min(limit);
        }
    }

    events
        .into_iter()
        .zip(durations)
        .map(|(visit, duration_seconds)| TimedVisit {
            visit,
            duration_seconds,
        })
        .collect()
}

/// Gap between two instants in seconds, clamped at zero.
#[allow(clippy::cast_precision_loss)]
fn gap_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let micros = to
        .signed_duration_since(from)
        .num_microseconds()
        .unwrap_or(0)
        .max(0);
    micros as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decompose;

    fn visit(seconds: i64, url: &str) -> VisitEvent {
        VisitEvent {
            timestamp: DateTime::from_timestamp(seconds, 0).unwrap(),
            url: url.to_string(),
            page: decompose(url).unwrap(),
        }
    }

    fn durations(visits: &[TimedVisit]) -> Vec<f64> {
        visits.iter().map(|v| v.duration_seconds).collect()
    }

    #[test]
    fn gap_to_next_event_becomes_duration() {
        let events = vec![
            visit(0, "https://github.com/"),
            visit(300, "https://github.com/pulls"),
            visit(301, "https://stackoverflow.com/questions"),
        ];

        let timed = annotate(events, &DurationConfig::default());
        assert_eq!(durations(&timed), vec![300.0, 1.0, 0.0]);
    }

    #[test]
    fn telescoping_sum_equals_total_elapsed() {
        let events = vec![
            visit(10, "https://a.com/"),
            visit(75, "https://b.com/"),
            visit(200, "https://c.com/"),
            visit(1000, "https://a.com/again"),
        ];

        let timed = annotate(events, &DurationConfig::default());
        let total: f64 = timed.iter().map(|v| v.duration_seconds).sum();
        assert!((total - 990.0).abs() < f64::EPSILON);
    }

    #[test]
    fn simultaneous_events_get_zero_never_negative() {
        let events = vec![
            visit(100, "https://a.com/"),
            visit(100, "https://b.com/"),
            visit(100, "https://c.com/"),
            visit(150, "https://d.com/"),
        ];

        let timed = annotate(events, &DurationConfig::default());
        assert_eq!(durations(&timed), vec![0.0, 0.0, 50.0, 0.0]);
        assert!(timed.iter().all(|v| v.duration_seconds >= 0.0));
    }

    #[test]
    fn single_event_history_is_not_an_error() {
        let timed = annotate(
            vec![visit(42, "https://a.com/")],
            &DurationConfig::default(),
        );
        assert_eq!(durations(&timed), vec![0.0]);
    }

    #[test]
    fn empty_history_is_not_an_error() {
        let timed = annotate(Vec::new(), &DurationConfig::default());
        assert!(timed.is_empty());
    }

    #[test]
    fn long_gaps_are_not_capped_by_default() {
        let events = vec![
            visit(0, "https://a.com/"),
            visit(8 * 3600, "https://b.com/"),
        ];

        let timed = annotate(events, &DurationConfig::default());
        assert_eq!(timed[0].duration_seconds, 8.0 * 3600.0);
    }

    #[test]
    fn single_page_limit_caps_durations() {
        let events = vec![
            visit(0, "https://a.com/"),
            visit(50, "https://b.com/"),
            visit(5000, "https://c.com/"),
        ];

        let config = DurationConfig {
            single_page_limit_s: Some(600.0),
            ..DurationConfig::default()
        };
        let timed = annotate(events, &config);
        assert_eq!(durations(&timed), vec![50.0, 600.0, 0.0]);
    }

    #[test]
    fn per_domain_policy_credits_until_the_domain_returns() {
        let events = vec![
            visit(0, "https://a.com/one"),
            visit(100, "https://b.com/"),
            visit(300, "https://a.com/two"),
        ];

        let config = DurationConfig {
            policy: SuccessorPolicy::PerDomain,
            ..DurationConfig::default()
        };
        let timed = annotate(events, &config);
        // a.com at t=0 is credited until a.com returns at t=300; b.com and
        // the final a.com visit have no same-domain successor.
        assert_eq!(durations(&timed), vec![300.0, 0.0, 0.0]);
    }

    #[test]
    fn per_domain_policy_groups_by_registrable_domain() {
        let events = vec![
            visit(0, "https://mail.google.com/"),
            visit(60, "https://other.com/"),
            visit(90, "https://docs.google.com/"),
        ];

        let config = DurationConfig {
            policy: SuccessorPolicy::PerDomain,
            ..DurationConfig::default()
        };
        let timed = annotate(events, &config);
        // mail.google.com and docs.google.com share google.com.
        assert_eq!(durations(&timed), vec![90.0, 0.0, 0.0]);
    }

    #[test]
    fn sub_second_gaps_keep_fractional_seconds() {
        let events = vec![
            VisitEvent {
                timestamp: DateTime::from_timestamp_micros(1_000_000).unwrap(),
                url: "https://a.com/".to_string(),
                page: decompose("https://a.com/").unwrap(),
            },
            VisitEvent {
                timestamp: DateTime::from_timestamp_micros(1_250_000).unwrap(),
                url: "https://b.com/".to_string(),
                page: decompose("https://b.com/").unwrap(),
            },
        ];

        let timed = annotate(events, &DurationConfig::default());
        assert!((timed[0].duration_seconds - 0.25).abs() < 1e-9);
    }
}
