//! # Error Types
//!
//! All errors that can occur in the pool, the grid and config loading.
//!
//! Every mutating operation either fails before touching any state or
//! succeeds completely. There is nothing to roll back.

use thiserror::Error;

/// Errors that can occur in TESSERA core structures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TesseraError {
    /// No free record is left in the pool. The spawn request is dropped.
    #[error("pool exhausted: all {capacity} records in use")]
    PoolExhausted {
        /// Fixed capacity of the pool.
        capacity: usize,
    },

    /// A record was requested with a lifetime of zero frames.
    #[error("invalid lifetime: records must live for at least one tick")]
    InvalidLifetime,

    /// A coordinate lies outside the area covered by the grid.
    #[error("position ({x}, {y}) outside grid coverage [0, {extent})")]
    OutOfBounds {
        /// Rejected x coordinate.
        x: f64,
        /// Rejected y coordinate.
        y: f64,
        /// Covered length per axis (`num_cells * cell_size`).
        extent: f64,
    },

    /// Every occupant id has been issued.
    #[error("occupant id space exhausted")]
    IdsExhausted,

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration text is not valid TOML for the expected schema.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(String),
}

/// Result type for TESSERA operations.
pub type TesseraResult<T> = Result<T, TesseraError>;
