use serde::{Deserialize, Serialize};

use crate::gfx::{self, ScreenEntry};
use crate::*;

/// Contents of the mine layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineCell {
    /// No mine, with the number of adjacent mines.
    Clear(u8),
    Mine,
}

impl MineCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Whether a flood fill keeps spreading past this cell.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Clear(0))
    }

    pub const fn screen_entry(self) -> ScreenEntry {
        match self {
            Self::Clear(count) => gfx::screen_entry(
                gfx::NO_MINE_TILE_ID + count as u16,
                gfx::DIGIT_PALBANK,
            ),
            Self::Mine => gfx::screen_entry(gfx::MINE_TILE_ID, gfx::DIGIT_PALBANK),
        }
    }
}

impl Default for MineCell {
    fn default() -> Self {
        Self::Clear(0)
    }
}

/// Checkerboard shade of a covered cell, purely decorative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    Light,
    Dark,
}

impl Band {
    pub const fn at((x, y): Coord2) -> Self {
        if (x + y) & 1 == 0 { Self::Light } else { Self::Dark }
    }

    pub const fn palbank(self) -> u16 {
        match self {
            Self::Light => 1,
            Self::Dark => 2,
        }
    }
}

/// Contents of the cover layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverCell {
    Covered(Band),
    Flagged(Band),
    /// Revealed and still dissolving.
    Revealed(Band),
    /// Dissolve finished, nothing drawn.
    Blank,
}

impl CoverCell {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged(_))
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Blank)
    }

    pub const fn screen_entry(self) -> ScreenEntry {
        match self {
            Self::Covered(band) => gfx::screen_entry(gfx::COVER_TILE_ID, band.palbank()),
            Self::Flagged(band) => gfx::screen_entry(gfx::FLAG_TILE_ID, band.palbank()),
            Self::Revealed(band) => gfx::screen_entry(gfx::REVEAL_TILE_ID, band.palbank()),
            Self::Blank => gfx::screen_entry(gfx::BLANK_TILE_ID, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_alternate() {
        assert_eq!(Band::at((0, 0)), Band::Light);
        assert_eq!(Band::at((1, 0)), Band::Dark);
        assert_eq!(Band::at((1, 1)), Band::Light);
        assert_eq!(Band::at((29, 18)), Band::Dark);
    }

    #[test]
    fn mine_entries_follow_digit_tiles() {
        assert_eq!(MineCell::Clear(0).screen_entry(), gfx::NO_MINE_TILE_ID);
        assert_eq!(MineCell::Clear(8).screen_entry(), 9);
        assert_eq!(MineCell::Mine.screen_entry(), gfx::MINE_TILE_ID);
    }

    #[test]
    fn cover_entries_keep_band() {
        let covered = CoverCell::Covered(Band::Dark).screen_entry();
        let revealed = CoverCell::Revealed(Band::Dark).screen_entry();
        assert_eq!(gfx::entry_palbank(covered), gfx::entry_palbank(revealed));
        assert_eq!(gfx::entry_tile_id(revealed), gfx::REVEAL_TILE_ID);
        assert_eq!(CoverCell::Blank.screen_entry(), 0);
    }
}
