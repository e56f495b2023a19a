//! Configuration APIs for ordseq
//!
//! Sequences work without any configuration. [`SeqConfig`] exists for callers
//! that want to tune how much storage is reserved up front, or load those
//! settings from the environment or a JSON file.
//!
//! ```rust
//! use ordseq::config::{Config, SeqConfig};
//! use ordseq::OrderedSeq;
//!
//! # fn main() -> ordseq::Result<()> {
//! let config = SeqConfig::memory_preset();
//! let mut seq: OrderedSeq<u32> = OrderedSeq::with_config(&config)?;
//! seq.append(3);
//! assert_eq!(seq.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use ordseq::config::{Config, SeqConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads ORDSEQ_INITIAL_CAPACITY and ORDSEQ_LINKED_INITIAL_CAPACITY
//! let config = SeqConfig::from_env()?;
//! assert!(config.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod sequence;


pub use sequence::{SeqConfig, DEFAULT_INITIAL_CAPACITY, MAX_INITIAL_CAPACITY};

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `ORDSEQ_{FIELD}`, for example
    /// `ORDSEQ_INITIAL_CAPACITY=1024`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("ORDSEQ_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset that reserves generously to avoid early reallocation.
    fn performance_preset() -> Self;

    /// Preset that reserves as little as possible.
    fn memory_preset() -> Self;

    /// Preset that front-loads allocation so steady-state inserts rarely grow.
    fn realtime_preset() -> Self;

    /// Balanced preset, identical to the default.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load configuration from a file.
    ///
    /// The loaded configuration is validated before it is returned.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or does not parse.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
