//! # Tracker Rust Backend
//!
//! Scheduling and statistics engine for a personal habit/event tracker.
//!
//! Users define recurring habits (scheduled on specific weekdays) or one-off
//! irregular events, mark them complete on calendar dates, and view aggregate
//! statistics. This crate is the deterministic core behind that workflow:
//! it decides which trackers are due on a given date, keeps the completion
//! ledger with day-granular identity, and derives streaks, ideal days and
//! completion rates from the ledger.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (weekdays, trackers, categories, snapshots)
//! - [`ledger`]: The completion ledger, a set of (tracker, day) records
//! - [`services`]: Filtering, aggregation and the `TrackerService` facade
//! - [`db`]: Repository trait, persisted record forms and the in-memory backend
//!
//! Data flows one direction: catalog + ledger feed the schedule filter, whose
//! output feeds the status/search pipeline consumed by the presentation layer.
//! Ledger mutations trigger a full statistics recomputation; nothing is
//! derived incrementally.
//!
//! ## Date semantics
//!
//! Every date entering a comparison, hash or map key is first truncated to the
//! local calendar day ([`models::time::day_of`]). Callers must not assume
//! sub-day precision survives anywhere in this crate.

pub mod db;
pub mod ledger;
pub mod models;
pub mod services;
