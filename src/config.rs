use std::time::Duration;

use thiserror::Error;

use crate::grid::Geometry;

/// Smallest grid that fits the starting snake and the first food cell inside the border.
pub const MIN_GRID_CELLS: u32 = 12;

/// Largest grid a terminal buffer can address at two columns per cell.
pub const MAX_GRID_CELLS: u32 = u16::MAX as u32 / 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Width of the drawing surface in surface units.
    pub surface_width: u32,
    /// Height of the drawing surface in surface units.
    pub surface_height: u32,
    /// Edge length of one grid cell in surface units.
    pub cell_size: u32,
    /// Time between two ticks.
    pub tick_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            surface_width: 600,
            surface_height: 450,
            cell_size: 15,
            tick_period: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("surface {dimension} {size} is not a multiple of cell size {cell_size}")]
    UnevenSurface {
        dimension: &'static str,
        size: u32,
        cell_size: u32,
    },
    #[error("grid of {width}x{height} cells is smaller than the minimum {min}x{min}")]
    GridTooSmall { width: u32, height: u32, min: u32 },
    #[error("grid of {width}x{height} cells is larger than the maximum {max}x{max}")]
    GridTooLarge { width: u32, height: u32, max: u32 },
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,
}

impl Config {
    /// Derives the grid from surface and cell size, rejecting geometry that
    /// would not render or play cleanly.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        for (dimension, size) in [
            ("width", self.surface_width),
            ("height", self.surface_height),
        ] {
            if size % self.cell_size != 0 {
                return Err(ConfigError::UnevenSurface {
                    dimension,
                    size,
                    cell_size: self.cell_size,
                });
            }
        }

        let width = self.surface_width / self.cell_size;
        let height = self.surface_height / self.cell_size;
        if width < MIN_GRID_CELLS || height < MIN_GRID_CELLS {
            return Err(ConfigError::GridTooSmall {
                width,
                height,
                min: MIN_GRID_CELLS,
            });
        }

        if width > MAX_GRID_CELLS || height > MAX_GRID_CELLS {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_CELLS,
            });
        }

        // Both bounded by MAX_GRID_CELLS, well inside i32.
        Ok(Geometry::new(width as i32, height as i32))
    }
}
