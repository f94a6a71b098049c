use serde::{Deserialize, Serialize};

use crate::gfx::{self, Sprite};
use crate::input::{KeyState, Keys};
use crate::*;

/// Cursor over the board: moves once on a fresh press, then auto-repeats while held.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reticle {
    position: Coord2,
    repeat_delay: u8,
}

impl Reticle {
    /// Ticks after a fresh press before auto-repeat kicks in.
    pub const INITIAL_DELAY: u8 = 16;
    /// Ticks between auto-repeat moves.
    pub const REPEAT_INTERVAL: u8 = 4;
    const STARTUP_DELAY: u8 = 8;

    pub const fn new() -> Self {
        Self::at(((WIDTH - 1) / 2, (HEIGHT - 1) / 2))
    }

    pub const fn at(position: Coord2) -> Self {
        Self {
            position,
            repeat_delay: Self::STARTUP_DELAY,
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub fn update(&mut self, keys: &KeyState) {
        let hit = keys.hit(Keys::DIRECTIONS);
        if !hit.is_empty() {
            self.repeat_delay = Self::INITIAL_DELAY;
            self.step(hit);
        }

        self.repeat_delay -= 1;
        if self.repeat_delay == 0 {
            self.repeat_delay = Self::REPEAT_INTERVAL;
            self.step(keys.held(Keys::DIRECTIONS));
        }
    }

    /// One cell per direction in `keys`, stopping at the borders.
    fn step(&mut self, keys: Keys) {
        let (mut x, mut y) = self.position;
        if keys.contains(Keys::LEFT) && x > 0 {
            x -= 1;
        }
        if keys.contains(Keys::RIGHT) && x < WIDTH - 1 {
            x += 1;
        }
        if keys.contains(Keys::UP) && y > 0 {
            y -= 1;
        }
        if keys.contains(Keys::DOWN) && y < HEIGHT - 1 {
            y += 1;
        }
        if (x, y) != self.position {
            log::trace!("Reticle moved to {:?}", (x, y));
        }
        self.position = (x, y);
    }

    /// Sprite centred on the selected cell.
    pub fn sprite(&self) -> Sprite {
        let (x, y) = self.position;
        Sprite {
            x: i16::from(x) * 8 - 4,
            y: i16::from(y) * 8 - 4,
            tile_id: gfx::RETICLE_TILE_ID,
            visible: true,
        }
    }
}

impl Default for Reticle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(reticle: &mut Reticle, keys: &mut KeyState, held: Keys) {
        keys.poll(held);
        reticle.update(keys);
    }

    #[test]
    fn starts_near_center() {
        assert_eq!(Reticle::new().position(), (14, 9));
    }

    #[test]
    fn tap_moves_once() {
        let mut reticle = Reticle::at((5, 5));
        let mut keys = KeyState::default();
        tick(&mut reticle, &mut keys, Keys::RIGHT);
        assert_eq!(reticle.position(), (6, 5));
        for _ in 0..40 {
            tick(&mut reticle, &mut keys, Keys::empty());
        }
        assert_eq!(reticle.position(), (6, 5));
    }

    #[test]
    fn hold_repeats_after_delay_then_every_four_ticks() {
        let mut reticle = Reticle::at((0, 0));
        let mut keys = KeyState::default();
        let mut moved_at = alloc::vec::Vec::new();

        for t in 0..30 {
            let before = reticle.position();
            tick(&mut reticle, &mut keys, Keys::RIGHT);
            if reticle.position() != before {
                moved_at.push(t);
            }
        }
        assert_eq!(moved_at, [0, 15, 19, 23, 27]);
    }

    #[test]
    fn diagonal_moves_both_axes() {
        let mut reticle = Reticle::at((5, 5));
        let mut keys = KeyState::default();
        tick(&mut reticle, &mut keys, Keys::UP | Keys::LEFT);
        assert_eq!(reticle.position(), (4, 4));
    }

    #[test]
    fn clamps_at_every_border() {
        let mut keys = KeyState::default();
        let cases = [
            ((0, 5), Keys::LEFT),
            ((WIDTH - 1, 5), Keys::RIGHT),
            ((5, 0), Keys::UP),
            ((5, HEIGHT - 1), Keys::DOWN),
        ];
        for (start, direction) in cases {
            let mut reticle = Reticle::at(start);
            for _ in 0..40 {
                tick(&mut reticle, &mut keys, direction);
                tick(&mut reticle, &mut keys, Keys::empty());
            }
            assert_eq!(reticle.position(), start);
        }
    }

    #[test]
    fn sprite_is_offset_half_a_cell() {
        let sprite = Reticle::at((0, 2)).sprite();
        assert_eq!((sprite.x, sprite.y), (-4, 12));
        assert!(sprite.visible);
    }
}
