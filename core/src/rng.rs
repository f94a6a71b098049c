use serde::{Deserialize, Serialize};

use crate::*;

/// Linear congruential generator fed with raw keypad samples.
///
/// Not suitable for anything beyond shuffling mines: the only entropy is how long and how the
/// player pressed buttons before the first reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    const MULTIPLIER: u32 = 1103515245;
    const INCREMENT: u32 = 24691;

    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub const fn state(&self) -> u32 {
        self.state
    }

    pub fn absorb(&mut self, raw: u16) {
        self.state = self.state.wrapping_add(raw.into());
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }

    /// Low half picks the column, high half the row.
    pub fn random_cell(&mut self) -> Coord2 {
        let value = self.next_u32();
        let x = (value & 0xFFFF) % u32::from(WIDTH);
        let y = (value >> 16) % u32::from(HEIGHT);
        (x as Coord, y as Coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurrence_from_zero() {
        let mut rng = Lcg::new(0);
        assert_eq!(rng.next_u32(), 24691);
        assert_eq!(
            rng.next_u32(),
            24691u32.wrapping_mul(1103515245).wrapping_add(24691)
        );
    }

    #[test]
    fn absorb_wraps() {
        let mut rng = Lcg::new(u32::MAX);
        rng.absorb(2);
        assert_eq!(rng.state(), 1);
    }

    #[test]
    fn random_cell_splits_halves() {
        let mut rng = Lcg::new(0);
        // 24691 = 0x00006073
        assert_eq!(rng.random_cell(), ((24691 % 30) as Coord, 0));
    }

    #[test]
    fn random_cells_stay_on_board() {
        let mut rng = Lcg::new(0x1234_5678);
        for _ in 0..10_000 {
            assert!(grid::is_valid(rng.random_cell()));
        }
    }
}
