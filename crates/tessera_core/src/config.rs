//! # Configuration
//!
//! Grid dimensions and pool capacity, loaded once at startup from TOML.
//!
//! ```toml
//! [grid]
//! cell_size = 20.0
//! num_cells = 10
//!
//! [pool]
//! capacity = 8
//! ```
//!
//! Missing sections or fields fall back to the reference constants below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TesseraError, TesseraResult};

/// Default side length of one grid cell.
pub const DEFAULT_CELL_SIZE: f64 = 20.0;

/// Default number of cells per grid axis.
pub const DEFAULT_NUM_CELLS: usize = 10;

/// Upper bound on `num_cells * num_cells`, the number of buckets a grid
/// allocates up front.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Default number of records in a slab pool.
pub const DEFAULT_POOL_CAPACITY: usize = 8;

/// Spatial grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side length of one square cell.
    pub cell_size: f64,
    /// Number of cells along each axis.
    pub num_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            num_cells: DEFAULT_NUM_CELLS,
        }
    }
}

impl GridConfig {
    /// Covered length per axis. Valid coordinates lie in `[0, extent)`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn extent(&self) -> f64 {
        self.num_cells as f64 * self.cell_size
    }

    /// Checks that the grid covers a non-empty, finite area.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidConfig`] when `cell_size` is not a
    /// positive finite number, `num_cells` is zero, the grid would need more
    /// than [`MAX_GRID_CELLS`] buckets, or the covered extent is not finite.
    pub fn validate(&self) -> TesseraResult<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(TesseraError::InvalidConfig(format!(
                "grid.cell_size must be positive and finite, got {}",
                self.cell_size
            )));
        }
        if self.num_cells == 0 {
            return Err(TesseraError::InvalidConfig(
                "grid.num_cells must be greater than zero".to_string(),
            ));
        }
        let buckets = self.num_cells.checked_mul(self.num_cells);
        if buckets.map_or(true, |buckets| buckets > MAX_GRID_CELLS) {
            return Err(TesseraError::InvalidConfig(format!(
                "grid.num_cells = {} exceeds {MAX_GRID_CELLS} total cells",
                self.num_cells
            )));
        }
        if !self.extent().is_finite() {
            return Err(TesseraError::InvalidConfig(format!(
                "grid extent {} x {} is not finite",
                self.num_cells, self.cell_size
            )));
        }
        Ok(())
    }
}

/// Slab pool sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of simultaneously live records.
    pub capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl PoolConfig {
    /// Checks that the pool can hold at least one record.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidConfig`] when `capacity` is zero.
    pub fn validate(&self) -> TesseraResult<()> {
        if self.capacity == 0 {
            return Err(TesseraError::InvalidConfig(
                "pool.capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Spatial grid section.
    pub grid: GridConfig,
    /// Slab pool section.
    pub pool: PoolConfig,
}

impl TesseraConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::ConfigParse`] for malformed TOML and
    /// [`TesseraError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> TesseraResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| TesseraError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::ConfigIo`] if the file cannot be read, and
    /// otherwise the same errors as [`TesseraConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> TesseraResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TesseraError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`TesseraError::InvalidConfig`] found.
    pub fn validate(&self) -> TesseraResult<()> {
        self.grid.validate()?;
        self.pool.validate()
    }
}
