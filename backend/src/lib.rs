//! # EMS Rust Backend — Recurring Series Engine
//!
//! Conflict-aware generation of recurring-event series for the event
//! management platform.
//!
//! Given a first, already-persisted occurrence and a cadence, this crate
//! materializes the remaining occurrences of a series: it detects
//! double-booking conflicts against already-scheduled events (including
//! siblings created in the same call), shifts conflicting occurrences forward
//! within a bounded window, retries occurrences the window could not place
//! with a wider search, and notifies organizers about every adjustment.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: ID newtypes and DTO types for series generation
//! - [`models`]: wall-clock ↔ instant conversion through IANA timezones
//! - [`db`]: collaborator traits (conflict query, persistence, user lookup)
//!   and the in-memory implementation
//! - [`scheduler`]: cadence planning, slot resolution, search-window config
//! - [`services`]: the series-generation service tying it all together
//! - [`notify`]: best-effort reschedule notifications
//!
//! ## Guarantees
//!
//! - No side effect before the validation gate passes
//! - Strictly sequential persistence: siblings persisted earlier in a call
//!   are visible to every later conflict check
//! - Occurrences only ever move forward, and an occurrence that cannot be
//!   placed is omitted visibly (reschedule summary + warning log), never
//!   silently

pub mod api;

pub mod db;
pub mod models;

pub mod notify;
pub mod scheduler;
pub mod services;
