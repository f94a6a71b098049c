/// Column or row index on the board.
pub type Coord = u8;

/// Number of cells or mines.
pub type CellCount = u16;

/// Board position `(x, y)`, origin top left.
pub type Coord2 = (Coord, Coord);

pub const WIDTH: Coord = 30;
pub const HEIGHT: Coord = 20;
pub const SIZE: Coord2 = (WIDTH, HEIGHT);
pub const CELLS: CellCount = mult(WIDTH, HEIGHT);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount).saturating_mul(b as CellCount)
}

/// The eight king moves, row by row.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// `coords` moved by `delta`, or `None` once it leaves `[0, bounds)`.
pub fn apply_delta(
    (x, y): Coord2,
    (dx, dy): (i8, i8),
    (width, height): Coord2,
) -> Option<Coord2> {
    let x = x.checked_add_signed(dx).filter(|&x| x < width)?;
    let y = y.checked_add_signed(dy).filter(|&y| y < height)?;
    Some((x, y))
}

/// Neighbours of a cell that fall inside `bounds`: 3 in a corner, 5 on an edge, 8 elsewhere.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: DISPLACEMENTS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.deltas.find_map(|&delta| apply_delta(center, delta, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), SIZE).count(), 3);
        assert_eq!(NeighborIter::new((WIDTH - 1, HEIGHT - 1), SIZE).count(), 3);
    }

    #[test]
    fn edge_and_interior_neighbor_counts() {
        assert_eq!(NeighborIter::new((5, 0), SIZE).count(), 5);
        assert_eq!(NeighborIter::new((0, 7), SIZE).count(), 5);
        assert_eq!(NeighborIter::new((5, 7), SIZE).count(), 8);
    }

    #[test]
    fn apply_delta_rejects_out_of_bounds() {
        assert_eq!(apply_delta((0, 3), (-1, 0), SIZE), None);
        assert_eq!(apply_delta((WIDTH - 1, 3), (1, 0), SIZE), None);
        assert_eq!(apply_delta((4, 3), (1, -1), SIZE), Some((5, 2)));
    }

    #[test]
    fn board_has_six_hundred_cells() {
        assert_eq!(CELLS, 600);
    }
}
