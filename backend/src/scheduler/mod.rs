//! Recurring-series scheduling primitives.
//!
//! The scheduler module holds the algorithmic pieces of series generation:
//!
//! - [`planner`]: cadence arithmetic mapping occurrence indices to nominal
//!   dates
//! - [`resolver`]: bounded forward search for a conflict-free slot
//! - [`config`]: search-window settings (initial window, append-pass ceiling)
//! - [`error`]: fatal precondition errors
//!
//! The orchestration that drives these against the injected store lives in
//! [`crate::services::series_generator`].

pub mod config;
pub mod error;
pub mod planner;
pub mod resolver;

pub use config::SchedulerConfig;
pub use error::{SeriesError, SeriesResult};
pub use planner::nominal_date;
pub use resolver::{CandidateSlot, NominalOccurrence, SlotResolver};
