//! Campus core - everything the assistant bot needs that is not Telegram.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `gateway`: typed client for the university REST API
//! - `schedule`: grouping, subgroup filtering and display formatting of lessons
//! - `preferences`: per-user subgroup preference storage

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod core;
pub mod gateway;
pub mod preferences;
pub mod schedule;

// Re-export commonly used types for convenience
pub use crate::core::error::{AppError, AppResult};
pub use gateway::{UniversityApi, UniversityApiClient};
pub use preferences::{CsvPreferenceStore, MemoryPreferenceStore, PreferenceStore, SubgroupMode};
pub use schedule::{DayTab, ScheduleDays};
