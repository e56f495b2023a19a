//! Error handling for the ordseq library
//!
//! Contract violations (bad index, stale node handle) panic in the primary
//! API. The `get`/`try_*` forms report the same conditions through
//! [`OrdSeqError`] instead.

use thiserror::Error;

/// Main error type for the ordseq library
#[derive(Error, Debug)]
pub enum OrdSeqError {
    /// I/O errors while reading or writing configuration files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Memory allocation failures
    #[error("Memory allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },

    /// A node handle that was removed or never belonged to the sequence
    #[error("Stale node handle: slot {index}, generation {generation}")]
    StaleHandle {
        /// Arena slot the handle points at
        index: u32,
        /// Generation recorded in the handle
        generation: u32,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl OrdSeqError {
    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an out of memory error
    pub fn out_of_memory(size: usize) -> Self {
        Self::OutOfMemory { size }
    }

    /// Create a stale handle error
    pub fn stale_handle(index: u32, generation: u32) -> Self {
        Self::StaleHandle { index, generation }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::OutOfMemory { .. } => true,
            Self::OutOfBounds { .. } => false,
            Self::StaleHandle { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::OutOfBounds { .. } => "bounds",
            Self::OutOfMemory { .. } => "memory",
            Self::StaleHandle { .. } => "handle",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OrdSeqError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(OrdSeqError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}
