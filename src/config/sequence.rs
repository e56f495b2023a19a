//! Capacity configuration for sorted and linked sequences.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{OrdSeqError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slots reserved by a sorted sequence on its first insertion
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Upper bound accepted for any initial reservation
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Storage reservation settings shared by [`SortedSeq`](crate::SortedSeq)
/// and [`LinkedSeq`](crate::LinkedSeq).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqConfig {
    /// Slots reserved for a sorted sequence's backing array
    pub initial_capacity: usize,
    /// Node slots reserved for a linked sequence's arena (0 = grow on demand)
    pub linked_initial_capacity: usize,
    /// Reserve storage at construction instead of on first insertion
    pub eager_allocation: bool,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            linked_initial_capacity: 0,
            eager_allocation: false,
        }
    }
}

impl SeqConfig {
    /// Create a configuration with the given sorted-sequence reservation
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }
}

impl Config for SeqConfig {
    fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(OrdSeqError::configuration(
                "initial_capacity must be greater than 0",
            ));
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(OrdSeqError::configuration(format!(
                "initial_capacity {} exceeds maximum {}",
                self.initial_capacity, MAX_INITIAL_CAPACITY
            )));
        }
        if self.linked_initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(OrdSeqError::configuration(format!(
                "linked_initial_capacity {} exceeds maximum {}",
                self.linked_initial_capacity, MAX_INITIAL_CAPACITY
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity =
            parse_env_var(&format!("{}INITIAL_CAPACITY", prefix), config.initial_capacity);
        config.linked_initial_capacity = parse_env_var(
            &format!("{}LINKED_INITIAL_CAPACITY", prefix),
            config.linked_initial_capacity,
        );
        config.eager_allocation =
            parse_env_bool(&format!("{}EAGER_ALLOCATION", prefix), config.eager_allocation);
        config.validate()?;
        log::debug!("Loaded sequence config from environment: {:?}", config);
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 4096,
            linked_initial_capacity: 1024,
            eager_allocation: false,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: 16,
            linked_initial_capacity: 0,
            eager_allocation: false,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            initial_capacity: 4096,
            linked_initial_capacity: 1024,
            eager_allocation: true,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            OrdSeqError::configuration(format!("Failed to serialize sequence config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            OrdSeqError::configuration(format!("Failed to parse sequence config file: {}", e))
        })?;
        config.validate()?;
        log::debug!("Loaded sequence config from file: {:?}", config);
        Ok(config)
    }
}
