use serde::{Deserialize, Serialize};

use crate::gfx::{self, Tile};

/// Shrinks the covered tile into a rounded square, one ring per step.
///
/// Steps are applied on the frame the animation starts and then every
/// [`FRAMES_PER_STEP`](Self::FRAMES_PER_STEP) frames; the animation finishes
/// `STEPS * FRAMES_PER_STEP` frames after it started.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissolveAnimation {
    tile: Tile,
    next_step: u8,
    frames_left: u8,
}

/// What a frame of the animation produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DissolveFrame {
    /// Nothing changed this frame.
    Waiting,
    /// The tile bitmap was eroded one more step.
    Eroded,
    /// All steps are done and their frames have elapsed.
    Finished,
}

impl DissolveAnimation {
    pub const STEPS: u8 = 4;
    pub const FRAMES_PER_STEP: u8 = 3;
    pub const TOTAL_FRAMES: u8 = Self::STEPS * Self::FRAMES_PER_STEP;

    /// Seeds the bitmap from the covered tile and applies the first step.
    pub fn start() -> Self {
        let mut animation = Self {
            tile: gfx::BG_TILES[gfx::COVER_TILE_ID as usize],
            next_step: 0,
            frames_left: 0,
        };
        animation.erode();
        animation
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    pub fn is_finished(&self) -> bool {
        self.next_step >= Self::STEPS && self.frames_left == 0
    }

    /// Advances by one displayed frame.
    pub fn advance(&mut self) -> DissolveFrame {
        if self.is_finished() {
            return DissolveFrame::Finished;
        }

        self.frames_left -= 1;
        if self.frames_left > 0 {
            DissolveFrame::Waiting
        } else if self.next_step < Self::STEPS {
            self.erode();
            DissolveFrame::Eroded
        } else {
            DissolveFrame::Finished
        }
    }

    fn erode(&mut self) {
        erode_step(&mut self.tile, self.next_step.into());
        self.next_step += 1;
        self.frames_left = Self::FRAMES_PER_STEP;
    }
}

/// Clears the outer ring `step` of a tile: rows `step` and `7 - step`, and `step + 1` pixels at
/// both ends of the rows in between.
pub fn erode_step(tile: &mut Tile, step: usize) {
    let last = gfx::TILE_SIZE - 1;
    tile[step] = 0;
    tile[last - step] = 0;

    let shift = ((step + 1) * 4) as u32;
    for row in &mut tile[step + 1..last - step] {
        *row = (*row >> shift).checked_shl(2 * shift).unwrap_or(0) >> shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_trims_outer_ring() {
        let animation = DissolveAnimation::start();
        let tile = animation.tile();
        assert_eq!(tile[0], 0);
        assert_eq!(tile[7], 0);
        for row in &tile[1..7] {
            assert_eq!(*row, 0x0111_1110);
        }
    }

    #[test]
    fn steps_shrink_towards_center() {
        let mut tile = gfx::BG_TILES[gfx::COVER_TILE_ID as usize];
        erode_step(&mut tile, 0);
        erode_step(&mut tile, 1);
        assert_eq!(tile[1], 0);
        assert_eq!(tile[6], 0);
        assert_eq!(tile[2], 0x0011_1100);
        erode_step(&mut tile, 2);
        assert_eq!(tile[3], 0x0001_1000);
        assert_eq!(tile[4], 0x0001_1000);
        erode_step(&mut tile, 3);
        assert_eq!(tile, [0; 8]);
    }

    #[test]
    fn timing_is_four_steps_three_frames_apart() {
        let mut animation = DissolveAnimation::start();
        let mut eroded_at = alloc::vec::Vec::new();
        let mut finished_at = None;

        for frame in 1..=20u8 {
            match animation.advance() {
                DissolveFrame::Waiting => {}
                DissolveFrame::Eroded => eroded_at.push(frame),
                DissolveFrame::Finished => {
                    finished_at.get_or_insert(frame);
                }
            }
        }

        assert_eq!(eroded_at, [3, 6, 9]);
        assert_eq!(finished_at, Some(DissolveAnimation::TOTAL_FRAMES));
        assert_eq!(animation.tile(), &[0; 8]);
        assert!(animation.is_finished());
    }
}
