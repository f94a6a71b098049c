//! Tile bitmaps, palettes and the screen-entry encoding shared by the board and the video memory.
//!
//! Tiles are 8×8 pixels at 4 bits per pixel, one `u32` per row with the leftmost pixel in the
//! lowest nibble. A screen entry selects a tile id in its low bits and a 16-colour palette bank
//! in its top 4 bits.

use serde::{Deserialize, Serialize};

/// 15-bit BGR colour.
pub type Color = u16;

/// One 8×8 4bpp tile, a `u32` per row.
pub type Tile = [u32; 8];

/// A 16-colour palette bank.
pub type Palbank = [Color; 16];

/// A tile map entry: tile id plus palette bank.
pub type ScreenEntry = u16;

pub const TILE_SIZE: usize = 8;
pub const SCREEN_ENTRY_ID_MASK: ScreenEntry = 0x03FF;
const SCREEN_ENTRY_PALBANK_SHIFT: u32 = 12;

pub const BLANK_TILE_ID: u16 = 0;
pub const NO_MINE_TILE_ID: u16 = 1;
pub const MINE_TILE_ID: u16 = 10;
pub const FLAG_TILE_ID: u16 = 11;
pub const COVER_TILE_ID: u16 = 12;
/// Charblock slot rewritten by the dissolve animation; never part of [`BG_TILES`].
pub const REVEAL_TILE_ID: u16 = 13;

pub const DIGIT_PALBANK: u16 = 0;
pub const RETICLE_OBJ: u8 = 0;
pub const RETICLE_TILE_ID: u16 = 1;

pub const fn rgb8(r: u8, g: u8, b: u8) -> Color {
    ((r as Color) >> 3) | (((g as Color) >> 3) << 5) | (((b as Color) >> 3) << 10)
}

pub const fn screen_entry(tile_id: u16, palbank: u16) -> ScreenEntry {
    (tile_id & SCREEN_ENTRY_ID_MASK) | (palbank << SCREEN_ENTRY_PALBANK_SHIFT)
}

pub const fn entry_tile_id(entry: ScreenEntry) -> u16 {
    entry & SCREEN_ENTRY_ID_MASK
}

pub const fn entry_palbank(entry: ScreenEntry) -> u16 {
    entry >> SCREEN_ENTRY_PALBANK_SHIFT
}

/// Colour index of pixel `column` in a tile row.
pub const fn tile_pixel(row: u32, column: usize) -> u8 {
    ((row >> (column * 4)) & 0xF) as u8
}

pub const BG_TILES: [Tile; 13] = [
    [0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000],
    [0x00000000, 0x00000000, 0x00111100, 0x00111100, 0x00111100, 0x00111100, 0x00000000, 0x00000000],
    [0x00000000, 0x00022000, 0x00020000, 0x00020000, 0x00020000, 0x00020000, 0x00222200, 0x00000000],
    [0x00000000, 0x00033000, 0x00300300, 0x00030000, 0x00003000, 0x00000300, 0x00333300, 0x00000000],
    [0x00000000, 0x00044000, 0x00400400, 0x00040000, 0x00400000, 0x00400400, 0x00044000, 0x00000000],
    [0x00000000, 0x00050500, 0x00050500, 0x00050500, 0x00555500, 0x00050000, 0x00050000, 0x00000000],
    [0x00000000, 0x00666600, 0x00000600, 0x00066600, 0x00600000, 0x00600000, 0x00066600, 0x00000000],
    [0x00000000, 0x00666000, 0x00000600, 0x00066600, 0x00600600, 0x00600600, 0x00066000, 0x00000000],
    [0x00000000, 0x00666600, 0x00600000, 0x00060000, 0x00060000, 0x00006000, 0x00006000, 0x00000000],
    [0x00000000, 0x00066000, 0x00600600, 0x00066000, 0x00600600, 0x00600600, 0x00066000, 0x00000000],
    [0x00000000, 0x00000000, 0x00077000, 0x00777700, 0x00777700, 0x00077000, 0x00000000, 0x00000000],
    [0x11111111, 0x11111111, 0x11155511, 0x11155511, 0x11151111, 0x11151111, 0x11555511, 0x11111111],
    [0x11111111, 0x11111111, 0x11111111, 0x11111111, 0x11111111, 0x11111111, 0x11111111, 0x11111111],
];

/// Reticle quadrants, laid out for one-dimensional object tile mapping.
pub const OBJ_TILES: [Tile; 5] = [
    [0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000],
    [0x00000000, 0x00000000, 0x00222000, 0x02111200, 0x00221200, 0x00021200, 0x00002000, 0x00000000],
    [0x00000000, 0x00000000, 0x00022200, 0x00211120, 0x00212200, 0x00212000, 0x00020000, 0x00000000],
    [0x00000000, 0x00002000, 0x00021200, 0x00221200, 0x02111200, 0x00222000, 0x00000000, 0x00000000],
    [0x00000000, 0x00020000, 0x00212000, 0x00212200, 0x00211120, 0x00022200, 0x00000000, 0x00000000],
];

const fn palbank(colors: &[Color]) -> Palbank {
    let mut bank = [0; 16];
    let mut i = 0;
    while i < colors.len() {
        bank[i] = colors[i];
        i += 1;
    }
    bank
}

pub const BG_COLORS: [Palbank; 3] = [
    palbank(&[
        rgb8(245, 245, 245),
        rgb8(224, 224, 224),
        rgb8(66, 165, 245),
        rgb8(102, 187, 106),
        rgb8(255, 167, 38),
        rgb8(239, 83, 80),
        rgb8(171, 71, 188),
        rgb8(0, 0, 0),
    ]),
    palbank(&[rgb8(189, 189, 189), rgb8(158, 158, 158)]),
    palbank(&[rgb8(158, 158, 158), rgb8(189, 189, 189)]),
];

pub const OBJ_COLORS: [Palbank; 1] = [palbank(&[
    rgb8(0, 0, 0),
    rgb8(255, 238, 88),
    rgb8(0, 0, 0),
])];

/// Packs palette banks two colours per word, first colour in the low half, for 32-bit transfers.
pub const fn palette_words<const N: usize, const W: usize>(banks: &[Palbank; N]) -> [u32; W] {
    let mut words = [0; W];
    let mut i = 0;
    while i < W && i < N * 8 {
        let bank = &banks[i / 8];
        let low = bank[(i % 8) * 2] as u32;
        let high = bank[(i % 8) * 2 + 1] as u32;
        words[i] = low | (high << 16);
        i += 1;
    }
    words
}

pub const BG_PALETTE_WORDS: [u32; 24] = palette_words(&BG_COLORS);
pub const OBJ_PALETTE_WORDS: [u32; 8] = palette_words(&OBJ_COLORS);

/// Object attributes for a 16×16 square sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub x: i16,
    pub y: i16,
    pub tile_id: u16,
    pub visible: bool,
}

impl Sprite {
    pub const EDGE: usize = 16;

    pub const fn hidden(tile_id: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            tile_id,
            visible: false,
        }
    }
}
