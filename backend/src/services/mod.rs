//! High-level business logic services.

pub mod series_generator;

pub use series_generator::SeriesService;
