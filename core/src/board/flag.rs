use super::*;

impl Board {
    /// Toggle the flag at `coords` and keep the neighbours' flag counters in sync.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let tile = &mut self.grid[coords];

        if !tile.toggle_flag() {
            return Ok(MarkOutcome::NoChange);
        }

        let flagged = tile.is_flagged();
        for neighbor in self.iter_neighbors(coords) {
            let neighbor_tile = &mut self.grid[neighbor];
            if flagged {
                neighbor_tile.add_adjacent_flag();
            } else {
                neighbor_tile.remove_adjacent_flag();
            }
        }

        let position = to_position(coords, self.width());
        if flagged {
            self.flags.insert(position);
        } else {
            self.flags.remove(&position);
        }
        log::trace!("Flag at {:?} set to {}", coords, flagged);

        Ok(MarkOutcome::Changed)
    }
}
