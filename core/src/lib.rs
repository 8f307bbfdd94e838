use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let total_cells = self
            .width
            .checked_mul(self.height)
            .ok_or(GameError::InvalidDimensions)?;
        if self.mines > total_cells {
            return Err(GameError::MineCountOutOfRange);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        self.width.saturating_mul(self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Placement of mines for one generation, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl Minefield {
    /// `mine_mask` is shaped `(height, width)`.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(width: Coord, height: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(width, height, 0)?;
        let mut mine_mask: Array2<bool> = Array2::default((height, width));

        for &(row, col) in mine_coords {
            if row >= height || col >= width {
                return Err(GameError::OutOfRange);
            }
            mine_mask[(row, col)] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn from_positions(width: Coord, height: Coord, positions: &[CellCount]) -> Result<Self> {
        GameConfig::new(width, height, 0)?;
        let coords = positions
            .iter()
            .map(|&position| {
                if position < width * height {
                    Ok(from_position(position, width))
                } else {
                    Err(GameError::OutOfRange)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_mine_coords(width, height, &coords)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.width(), self.height(), self.mine_count)
    }

    pub fn width(&self) -> Coord {
        self.mine_mask.ncols()
    }

    pub fn height(&self) -> Coord {
        self.mine_mask.nrows()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask.get(coords).copied().unwrap_or(false)
    }

    /// Mined coordinates in row-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|(coords, _)| coords)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.mine_mask.dim())
            .filter(|&pos| self.mine_mask[pos])
            .count() as u8
    }
}

impl Index<Coord2> for Minefield {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords]
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

/// Derived game status, loss takes precedence over win.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No successful reveal yet in this generation
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Ready
    }
}
