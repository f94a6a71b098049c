//! The hardware the game talks to: video memory, frame sync, tone generator and keypad.

use serde::{Deserialize, Serialize};

use crate::gfx::{ScreenEntry, Sprite, Tile};
use crate::input::Keys;
use crate::*;

/// Destination of a bulk transfer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    BgTiles,
    ObjTiles,
    BgPalette,
    ObjPalette,
    Screenblock(u8),
}

pub trait Video {
    /// Blocks until the next vertical blank has started.
    fn sync_frame(&mut self);

    /// Copies `words` to the start of `region`.
    fn bulk_copy(&mut self, region: Region, words: &[u32]);

    /// Fills the first `count` words of `region` with `value`.
    fn bulk_fill(&mut self, region: Region, value: u32, count: usize);

    fn write_entry(&mut self, slot: Slot, entry: ScreenEntry);

    /// Replaces one background tile bitmap.
    fn write_tile(&mut self, tile_id: u16, tile: &Tile);

    fn write_sprite(&mut self, index: u8, sprite: Sprite);
}

/// Square-wave blip pitched by how many mines are nearby.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    level: u8,
}

impl Tone {
    pub const MAX_LEVEL: u8 = 3;
    pub const SWEEP_STEP_SECONDS: f32 = 7.0 / 128.0;
    const RATE_LIMIT: u16 = 2048;

    pub const fn new(level: u8) -> Self {
        Self {
            level: if level > Self::MAX_LEVEL {
                Self::MAX_LEVEL
            } else {
                level
            },
        }
    }

    pub const fn level(self) -> u8 {
        self.level
    }

    /// Starting frequency, each level an octave above the previous one.
    pub fn frequency_hz(self) -> f32 {
        131072.0 / f32::from(1280u16 >> self.level)
    }

    /// Frequency sweep shift, higher means a slower rise.
    pub const fn sweep_shift(self) -> u8 {
        3 + self.level
    }

    /// Frequencies the tone steps through, [`SWEEP_STEP_SECONDS`](Self::SWEEP_STEP_SECONDS)
    /// apart, until the channel rate overflows and the tone stops.
    pub fn sweep(self) -> impl Iterator<Item = f32> {
        let shift = self.sweep_shift();
        let mut rate = Some(Self::RATE_LIMIT - (1280 >> self.level));
        core::iter::from_fn(move || {
            let current = rate?;
            let next = current + (current >> shift);
            rate = (next < Self::RATE_LIMIT).then_some(next);
            Some(131072.0 / f32::from(Self::RATE_LIMIT - current))
        })
    }
}

pub trait Audio {
    fn play_tone(&mut self, tone: Tone);

    fn play_noise_burst(&mut self);
}

pub trait Keypad {
    /// Buttons currently held down.
    fn poll_keys(&mut self) -> Keys;
}

/// Everything a session needs from the platform.
pub trait Console: Video + Audio + Keypad {}

impl<T: Video + Audio + Keypad> Console for T {}
