use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    /// Lays out all mines on `board`, keeping `center` and its surroundings clear.
    fn generate(self, board: &mut Board, center: Coord2);
}

/// Cells kept clear of mines around the first reveal: a 7×3 and a 3×7 rectangle crossed over the
/// center.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SafeZone {
    center: Coord2,
}

impl SafeZone {
    /// Size of the zone when it does not touch a border.
    pub const MAX_CELLS: CellCount = 7 * 3 + 3 * 7 - 3 * 3;

    pub const fn new(center: Coord2) -> Self {
        Self { center }
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let dx = i16::from(x) - i16::from(self.center.0);
        let dy = i16::from(y) - i16::from(self.center.1);
        let wide = dx.abs() < 4 && dy.abs() < 2;
        let tall = dx.abs() < 2 && dy.abs() < 4;
        wide || tall
    }
}

/// Checks the sizing invariant that keeps rejection sampling finite.
pub fn check_mine_count(mine_count: CellCount) -> Result<CellCount> {
    let available = CELLS - SafeZone::MAX_CELLS;
    if mine_count > available {
        Err(GameError::TooManyMines {
            requested: mine_count,
            available,
        })
    } else {
        Ok(mine_count)
    }
}
