//! Core domain logic for the browsing-time analyzer.
//!
//! This crate contains the fundamental types and logic for:
//! - Decomposition: splitting visited URLs into host and domain components
//! - Loading: turning raw history records into a time-ordered event sequence
//! - Duration inference: crediting each visit with a dwell duration
//! - Aggregation: rolling durations up into per-domain time buckets

pub mod aggregate;
pub mod domain;
pub mod duration;
pub mod event;
pub mod query;

pub use aggregate::{AggregationRow, DomainGrouping, EventFilter, GroupSpec, aggregate};
pub use domain::{DecomposeError, PageLocation, decompose};
pub use duration::{DurationConfig, SuccessorPolicy, TimedVisit, annotate};
pub use event::{DropStats, LoadOutcome, RawRecord, VisitEvent, load};
pub use query::{Analyzer, TimeByDomainArgs};
