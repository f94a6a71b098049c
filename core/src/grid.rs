//! Addressing of board cells inside the two background tile maps.

use serde::{Deserialize, Serialize};

use crate::*;

/// Width of a background tile map in entries; rows wider than the board are padding.
pub const SCREENBLOCK_WIDTH: usize = 32;

/// Entries in one background tile map.
pub const SCREENBLOCK_ENTRIES: usize = SCREENBLOCK_WIDTH * SCREENBLOCK_WIDTH;

/// One of the two parallel board layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Visibility and flags, drawn on top.
    Cover,
    /// Mines and adjacency counts, drawn underneath.
    Mine,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Cover, Layer::Mine];

    pub const fn screenblock(self) -> u8 {
        match self {
            Self::Cover => 1,
            Self::Mine => 2,
        }
    }
}

/// Storage location of one cell of one layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub screenblock: u8,
    pub index: u16,
}

pub const fn is_valid((x, y): Coord2) -> bool {
    x < WIDTH && y < HEIGHT
}

pub fn validate(coords: Coord2) -> Result<Coord2> {
    if is_valid(coords) {
        Ok(coords)
    } else {
        Err(GameError::InvalidCoords)
    }
}

pub fn slot(layer: Layer, coords: Coord2) -> Result<Slot> {
    let (x, y) = validate(coords)?;
    let index = usize::from(x) + usize::from(y) * SCREENBLOCK_WIDTH;
    Ok(Slot {
        screenblock: layer.screenblock(),
        index: index as u16,
    })
}

/// In-bounds neighbours of a board cell.
pub fn neighbors(coords: Coord2) -> NeighborIter {
    NeighborIter::new(coords, SIZE)
}
