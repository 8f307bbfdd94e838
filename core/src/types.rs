/// Single coordinate axis used for rows, columns, board width and height.
pub type Coord = usize;

/// Count type used for mine counts, total-cell counts and linear positions.
pub type CellCount = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Row-major linear position of `(row, col)` on a board `width` columns wide.
pub const fn to_position((row, col): Coord2, width: Coord) -> CellCount {
    row * width + col
}

/// Inverse of [`to_position`].
pub const fn from_position(position: CellCount, width: Coord) -> Coord2 {
    (position / width, position % width)
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (height, width) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= height {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= width {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the (at most 8) in-bounds neighbours of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    /// `bounds` is `(height, width)`.
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
