use core::fmt;
use serde::{Deserialize, Serialize};

pub const FLAG_SYMBOL: char = 'F';
pub const MINE_SYMBOL: char = '*';
pub const BLANK_SYMBOL: char = ' ';

/// Mutable per-cell state, only ever touched through the owning board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tile {
    revealed: bool,
    flagged: bool,
    mined: bool,
    adjacent_mines: u8,
    adjacent_flags: u8,
}

impl Tile {
    pub(crate) const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub(crate) const fn is_mined(&self) -> bool {
        self.mined
    }

    pub(crate) const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) const fn adjacent_flags(&self) -> u8 {
        self.adjacent_flags
    }

    pub(crate) fn set_mined(&mut self) {
        self.mined = true;
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        self.adjacent_mines += 1;
    }

    pub(crate) fn add_adjacent_flag(&mut self) {
        self.adjacent_flags += 1;
    }

    pub(crate) fn remove_adjacent_flag(&mut self) {
        self.adjacent_flags -= 1;
    }

    /// Toggles the flag unless the tile is already revealed, returns whether it toggled.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.revealed {
            false
        } else {
            self.flagged = !self.flagged;
            true
        }
    }

    /// Reveals a hidden, unflagged tile, returns whether it was hidden before.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.flagged || self.revealed {
            false
        } else {
            self.revealed = true;
            true
        }
    }

    /// Reverts a reveal that has to be aborted before anything else observed it.
    pub(crate) fn undo_reveal(&mut self) {
        self.revealed = false;
    }

    pub(crate) const fn view(&self) -> TileView {
        TileView {
            revealed: self.revealed,
            flagged: self.flagged,
            mined: self.mined,
            adjacent_mine_count: self.adjacent_mines,
            adjacent_flag_count: self.adjacent_flags,
        }
    }
}

/// Read-only snapshot of a tile handed out to renderers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub revealed: bool,
    pub flagged: bool,
    pub mined: bool,
    pub adjacent_mine_count: u8,
    pub adjacent_flag_count: u8,
}

impl TileView {
    /// Glyph for this tile regardless of whether it is revealed: flag, then mine, then blank or digit.
    pub fn symbol(self) -> char {
        if self.flagged {
            FLAG_SYMBOL
        } else if self.mined {
            MINE_SYMBOL
        } else if self.adjacent_mine_count == 0 {
            BLANK_SYMBOL
        } else {
            char::from(b'0' + self.adjacent_mine_count)
        }
    }
}

impl From<TileView> for char {
    fn from(view: TileView) -> Self {
        view.symbol()
    }
}

impl fmt::Display for TileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
