//! Repository implementations.
//!
//! Only the in-memory `local` backend ships with the core; real database
//! backends live behind the same [`crate::db::repository::TrackerRepository`]
//! trait and can be swapped in without touching the engines.

#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "local-repo")]
pub use local::LocalRepository;
