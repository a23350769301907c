//! Scheduler configuration file support.
//!
//! This module provides the conflict-search window settings and utilities for
//! reading them from TOML configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{SeriesError, SeriesResult};

/// Conflict-search window settings for series generation.
///
/// `initial_window_days` bounds the main-pass offset scan (offset 0 counts as
/// the first candidate, so the default of 7 tries offsets 0..=6).
/// `append_ceiling_days` is the safety ceiling for the append pass's extended
/// scan, measured from the occurrence's nominal date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_initial_window_days")]
    pub initial_window_days: u32,
    #[serde(default = "default_append_ceiling_days")]
    pub append_ceiling_days: u32,
}

fn default_initial_window_days() -> u32 {
    7
}

fn default_append_ceiling_days() -> u32 {
    90
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_window_days: default_initial_window_days(),
            append_ceiling_days: default_append_ceiling_days(),
        }
    }
}

impl SchedulerConfig {
    /// Build a validated config.
    pub fn new(initial_window_days: u32, append_ceiling_days: u32) -> SeriesResult<Self> {
        let config = Self {
            initial_window_days,
            append_ceiling_days,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SeriesResult<()> {
        if self.initial_window_days == 0 {
            return Err(SeriesError::InvalidRecurringConfig(
                "initial window must cover at least the nominal day".to_string(),
            ));
        }
        if self.append_ceiling_days < self.initial_window_days {
            return Err(SeriesError::InvalidRecurringConfig(format!(
                "append ceiling ({} days) below initial window ({} days)",
                self.append_ceiling_days, self.initial_window_days
            )));
        }
        Ok(())
    }

    /// Largest offset tried by the main pass (inclusive).
    pub fn max_initial_offset(&self) -> i64 {
        self.initial_window_days as i64 - 1
    }

    /// Largest offset tried by the append pass (inclusive).
    pub fn max_extended_offset(&self) -> i64 {
        self.append_ceiling_days as i64
    }

    /// Load scheduler configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read scheduler config: {}", e))?;
        let config: SchedulerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scheduler config: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid scheduler config: {}", e))?;
        Ok(config)
    }

    /// Load scheduler configuration from the default locations, falling back
    /// to defaults when no file exists.
    ///
    /// Searches for `scheduler.toml` in the current directory, `backend/`,
    /// and the parent directory.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let search_paths = [
            PathBuf::from("scheduler.toml"),
            PathBuf::from("backend/scheduler.toml"),
            PathBuf::from("../scheduler.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}
