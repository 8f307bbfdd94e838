use ndarray::Array2;
use std::collections::BTreeSet;

use crate::*;
pub(crate) use reveal::FloodOutcome;

mod flag;
mod reveal;

/// Grid of tiles for one generation together with its mine and flag sets.
///
/// Sets hold row-major linear positions. Only the reveal and flag paths in this module mutate tiles; everything
/// handed out is a [`TileView`] copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Array2<Tile>,
    mines: BTreeSet<CellCount>,
    flags: BTreeSet<CellCount>,
    first_reveal: bool,
}

impl Board {
    /// Build a fresh generation from `minefield` and compute static adjacency counts.
    pub(crate) fn from_minefield(minefield: &Minefield) -> Self {
        let (height, width) = (minefield.height(), minefield.width());
        let mut grid: Array2<Tile> = Array2::default((height, width));
        let mut mines = BTreeSet::new();

        for coords in minefield.iter_mines() {
            grid[coords].set_mined();
            mines.insert(to_position(coords, width));
            for neighbor in NeighborIter::new(coords, (height, width)) {
                grid[neighbor].add_adjacent_mine();
            }
        }

        Self {
            grid,
            mines,
            flags: BTreeSet::new(),
            first_reveal: true,
        }
    }

    pub fn width(&self) -> Coord {
        self.grid.ncols()
    }

    pub fn height(&self) -> Coord {
        self.grid.nrows()
    }

    pub fn total_cells(&self) -> CellCount {
        self.grid.len()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flags.len()
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.mines.len() as isize) - (self.flags.len() as isize)
    }

    /// Whether no successful reveal has happened yet in this generation.
    pub fn is_first_reveal(&self) -> bool {
        self.first_reveal
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.height() && coords.1 < self.width() {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn position_of(&self, coords: Coord2) -> Result<CellCount> {
        let coords = self.validate_coords(coords)?;
        Ok(to_position(coords, self.width()))
    }

    pub fn coords_of(&self, position: CellCount) -> Result<Coord2> {
        if position < self.total_cells() {
            Ok(from_position(position, self.width()))
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<TileView> {
        self.grid
            .get(coords)
            .map(Tile::view)
            .ok_or(GameError::OutOfRange)
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord2, TileView)> + '_ {
        self.grid
            .indexed_iter()
            .map(|(coords, tile)| (coords, tile.view()))
    }

    /// Mined coordinates in row-major order.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        let width = self.width();
        self.mines
            .iter()
            .map(move |&position| from_position(position, width))
    }

    /// Flagged coordinates in row-major order.
    pub fn flags(&self) -> impl Iterator<Item = Coord2> + '_ {
        let width = self.width();
        self.flags
            .iter()
            .map(move |&position| from_position(position, width))
    }

    /// Loss condition: some mined tile has been revealed.
    pub fn is_mine_revealed(&self) -> bool {
        self.mines().any(|coords| self.grid[coords].is_revealed())
    }

    /// Win condition: every safe tile is revealed and no mine is.
    pub fn is_all_except_mines_revealed(&self) -> bool {
        self.grid
            .iter()
            .all(|tile| tile.is_revealed() || tile.is_mined())
            && !self.is_mine_revealed()
    }

    /// A board without safe tiles stays `Ready` until its first reveal, even though
    /// [`Board::is_all_except_mines_revealed`] already holds for it.
    pub fn status(&self) -> GameStatus {
        if self.is_mine_revealed() {
            GameStatus::Lost
        } else if self.first_reveal {
            GameStatus::Ready
        } else if self.is_all_except_mines_revealed() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.grid.dim())
    }
}
