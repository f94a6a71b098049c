#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use dissolve::*;
pub use error::*;
pub use generator::*;
pub use grid::{Layer, Slot};
pub use reticle::*;
pub use reveal::*;
pub use rng::*;
pub use session::*;
pub use tile::*;
pub use types::*;

pub mod console;
pub mod gfx;
pub mod grid;
pub mod input;
pub mod vram;

mod board;
mod dissolve;
mod error;
mod generator;
mod reticle;
mod reveal;
mod rng;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Starting state of the random source before any key entropy is mixed in.
    pub seed: u32,
    pub mine_count: CellCount,
}

impl SessionConfig {
    pub const DEFAULT_MINES: CellCount = 140;

    pub const fn new(seed: u32, mine_count: CellCount) -> Self {
        Self { seed, mine_count }
    }

    pub const fn with_seed(seed: u32) -> Self {
        Self::new(seed, Self::DEFAULT_MINES)
    }

    pub fn validate(&self) -> Result<()> {
        check_mine_count(self.mine_count).map(|_| ())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// The starting cell was a mine. Play goes on regardless.
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}
