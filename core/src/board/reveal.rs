use hashbrown::HashSet;
use std::collections::VecDeque;

use super::*;

/// Result of a single flood-fill pass over the current generation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FloodOutcome {
    /// Positions newly revealed by this pass, possibly including mines.
    Revealed(BTreeSet<Coord2>),
    /// The first reveal of the generation landed on a mine, the pass was rolled back and the board must be
    /// regenerated before retrying.
    FirstMine,
}

impl Board {
    /// Reveal `start` and propagate through blank tiles, or chord around `start` when it is an already revealed
    /// number whose flag count matches its mine count.
    pub(crate) fn flood_reveal(&mut self, start: Coord2) -> Result<FloodOutcome> {
        let start = self.validate_coords(start)?;
        let has_safe_tile = self.mines.len() < self.grid.len();

        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::from([start]);
        let mut revealed = BTreeSet::new();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let tile = &mut self.grid[visit_coords];

            // flags block both revealing and propagation
            if tile.is_flagged() {
                log::trace!("Skipping flagged tile at {:?}", visit_coords);
                continue;
            }

            let was_hidden = tile.reveal();
            if was_hidden {
                if tile.is_mined() && self.first_reveal {
                    if has_safe_tile {
                        tile.undo_reveal();
                        log::debug!("First reveal at {:?} hit a mine", visit_coords);
                        return Ok(FloodOutcome::FirstMine);
                    }
                    log::warn!("Board has no safe tile, cannot make first reveal safe");
                }
                self.first_reveal = false;
                revealed.insert(visit_coords);
                log::trace!(
                    "Revealed tile at {:?}, mine count: {}",
                    visit_coords,
                    tile.adjacent_mines()
                );
            }

            let tile = *tile;
            let is_chord = visit_coords == start
                && !was_hidden
                && tile.adjacent_flags() == tile.adjacent_mines();

            if !tile.is_mined() && (tile.adjacent_mines() == 0 || is_chord) {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::debug!("Reveal at {:?} opened {} tiles", start, revealed.len());
        Ok(FloodOutcome::Revealed(revealed))
    }
}
