//! Service layer for filtering, aggregation and orchestration.
//!
//! The pure engines live in [`schedule_filter`], [`filter_pipeline`],
//! [`statistics`] and [`organizer`]; [`tracker_service`] wires them to a
//! repository and a change-event channel for the presentation layer.

pub mod filter_pipeline;
pub mod organizer;
pub mod schedule_filter;
pub mod statistics;
pub mod tracker_service;

pub use filter_pipeline::{apply_filters, FilteredView, TrackerFilter};
pub use organizer::reorganize;
pub use schedule_filter::due_trackers;
pub use statistics::compute_statistics;
pub use tracker_service::{TrackerEvent, TrackerService};
