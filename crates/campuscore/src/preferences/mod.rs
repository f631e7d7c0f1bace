//! Per-user subgroup preference.
//!
//! A user either sees the whole group's schedule or only one subgroup's
//! lessons (plus the common ones). Unknown users see everything.

use async_trait::async_trait;
use strum::{Display, EnumString, IntoStaticStr};

use crate::core::AppResult;

mod csv;
mod memory;

pub use csv::CsvPreferenceStore;
pub use memory::MemoryPreferenceStore;

/// Which lessons of a split group a user wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SubgroupMode {
    #[default]
    Full,
    Group1,
    Group2,
}

impl SubgroupMode {
    /// Parses a stored value; anything unrecognized means [`SubgroupMode::Full`].
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    /// Subgroup number for filtered modes.
    pub fn group_number(self) -> Option<u8> {
        match self {
            SubgroupMode::Full => None,
            SubgroupMode::Group1 => Some(1),
            SubgroupMode::Group2 => Some(2),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Storage of subgroup preferences keyed by messenger user id.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored mode, [`SubgroupMode::Full`] when there is none
    /// or the storage cannot be read.
    async fn get(&self, user_id: i64) -> SubgroupMode;

    /// Stores the mode for the user, replacing any previous value.
    async fn set(&self, user_id: i64, mode: SubgroupMode) -> AppResult<()>;
}
