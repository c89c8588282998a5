//! Grid configuration - dimensions threaded through construction

use thiserror::Error;

use crate::types::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MAX_GRID_SIDE, MIN_GRID_SIDE};

/// Rejected grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width {0} is below the minimum of 4")]
    TooNarrow(u8),
    #[error("grid width {0} exceeds the maximum of 64")]
    TooWide(u8),
    #[error("grid height {0} is below the minimum of 4")]
    TooShort(u8),
    #[error("grid height {0} exceeds the maximum of 64")]
    TooTall(u8),
}

/// Width and height of the playing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    width: u8,
    height: u8,
}

impl GridConfig {
    /// Validate and build a configuration.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        if width < MIN_GRID_SIDE {
            return Err(ConfigError::TooNarrow(width));
        }
        if width > MAX_GRID_SIDE {
            return Err(ConfigError::TooWide(width));
        }
        if height < MIN_GRID_SIDE {
            return Err(ConfigError::TooShort(height));
        }
        if height > MAX_GRID_SIDE {
            return Err(ConfigError::TooTall(height));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of addressable cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}
