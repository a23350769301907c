//! Storage collaborator module.
//!
//! This module provides abstractions for the event store and user directory
//! via the Repository pattern, allowing different backends to be swapped
//! easily. The series orchestrator only ever sees the traits in
//! [`repository`]; the production document store lives outside this crate and
//! is injected at the composition root.
//!
//! # Repository Pattern
//! The module includes:
//! - `repository`: Trait definitions and structured error types
//! - `repositories::local`: In-memory implementation for unit testing and
//!   local development

pub mod repositories;
pub mod repository;

pub use repositories::{LocalEventStore, LocalUserDirectory};
pub use repository::{
    ConflictQuery, ErrorContext, EventPersister, EventRepository, RepositoryError,
    RepositoryResult, UserDirectory, UserProfile,
};
