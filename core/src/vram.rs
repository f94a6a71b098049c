//! Video memory kept in plain buffers, for frontends without tile hardware and for tests.

use alloc::vec;
use alloc::vec::Vec;

use crate::console::{Region, Video};
use crate::gfx::{self, Color, ScreenEntry, Sprite, Tile};
use crate::grid::{SCREENBLOCK_ENTRIES, SCREENBLOCK_WIDTH};
use crate::*;

pub const SCREEN_WIDTH: usize = 240;
pub const SCREEN_HEIGHT: usize = 160;
pub const BYTES_PER_PIXEL: usize = 4;

const CHARBLOCK_TILES: usize = 512;
const OBJ_TILE_CAPACITY: usize = 1024;
const PALETTE_COLORS: usize = 256;
const SCREENBLOCKS: usize = 4;
const SPRITE_CAPACITY: usize = 128;

#[derive(Clone, Debug, PartialEq)]
pub struct SoftVideo {
    bg_tiles: Vec<Tile>,
    obj_tiles: Vec<Tile>,
    bg_palette: Vec<Color>,
    obj_palette: Vec<Color>,
    screenblocks: Vec<ScreenEntry>,
    sprites: Vec<Sprite>,
    frames: u64,
}

impl SoftVideo {
    pub fn new() -> Self {
        Self {
            bg_tiles: vec![[0; 8]; CHARBLOCK_TILES],
            obj_tiles: vec![[0; 8]; OBJ_TILE_CAPACITY],
            bg_palette: vec![0; PALETTE_COLORS],
            obj_palette: vec![0; PALETTE_COLORS],
            screenblocks: vec![0; SCREENBLOCKS * SCREENBLOCK_ENTRIES],
            sprites: vec![Sprite::hidden(0); SPRITE_CAPACITY],
            frames: 0,
        }
    }

    /// Number of frame syncs so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn entry(&self, slot: Slot) -> ScreenEntry {
        self.screenblocks[screenblock_offset(slot.screenblock) + usize::from(slot.index)]
    }

    pub fn tile(&self, tile_id: u16) -> &Tile {
        &self.bg_tiles[usize::from(tile_id)]
    }

    pub fn sprite(&self, index: u8) -> Sprite {
        self.sprites[usize::from(index)]
    }

    pub fn bg_color(&self, index: usize) -> Color {
        self.bg_palette[index]
    }

    /// Stores word `index` of a region, splitting it into halves for 16-bit memories.
    fn store_word(&mut self, region: Region, index: usize, word: u32) {
        let halves = [word as u16, (word >> 16) as u16];
        let stored = match region {
            Region::BgTiles => store_tile_row(&mut self.bg_tiles, index, word),
            Region::ObjTiles => store_tile_row(&mut self.obj_tiles, index, word),
            Region::BgPalette => store_halves(&mut self.bg_palette, index, halves),
            Region::ObjPalette => store_halves(&mut self.obj_palette, index, halves),
            Region::Screenblock(block) if usize::from(block) < SCREENBLOCKS => {
                let offset = screenblock_offset(block);
                let block = &mut self.screenblocks[offset..offset + SCREENBLOCK_ENTRIES];
                store_halves(block, index, halves)
            }
            Region::Screenblock(_) => false,
        };
        if !stored {
            log::warn!("Dropped write past the end of {:?} at word {}", region, index);
        }
    }

    /// Draws the board layers and sprites as RGBA into `out`.
    pub fn rasterize_into(&self, out: &mut [u8]) {
        let backdrop = self.bg_palette[0];
        for (i, pixel) in out
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .take(SCREEN_WIDTH * SCREEN_HEIGHT)
            .enumerate()
        {
            let (px, py) = (i % SCREEN_WIDTH, i / SCREEN_WIDTH);
            let color = self
                .sprite_pixel(px, py)
                .or_else(|| {
                    Layer::ALL
                        .iter()
                        .find_map(|&layer| self.bg_pixel(layer, px, py))
                })
                .unwrap_or(backdrop);
            pixel.copy_from_slice(&to_rgba(color));
        }
    }

    pub fn rasterize(&self) -> Vec<u8> {
        let mut out = vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL];
        self.rasterize_into(&mut out);
        out
    }

    fn bg_pixel(&self, layer: Layer, px: usize, py: usize) -> Option<Color> {
        let index = px / gfx::TILE_SIZE + (py / gfx::TILE_SIZE) * SCREENBLOCK_WIDTH;
        let entry = self.screenblocks[screenblock_offset(layer.screenblock()) + index];
        let tile = self.bg_tiles.get(usize::from(gfx::entry_tile_id(entry)))?;
        let color = gfx::tile_pixel(tile[py % gfx::TILE_SIZE], px % gfx::TILE_SIZE);
        (color != 0).then(|| {
            self.bg_palette[usize::from(gfx::entry_palbank(entry)) * 16 + usize::from(color)]
        })
    }

    fn sprite_pixel(&self, px: usize, py: usize) -> Option<Color> {
        self.sprites.iter().filter(|sprite| sprite.visible).find_map(|sprite| {
            let sx = usize::try_from(px as i32 - i32::from(sprite.x)).ok()?;
            let sy = usize::try_from(py as i32 - i32::from(sprite.y)).ok()?;
            if sx >= Sprite::EDGE || sy >= Sprite::EDGE {
                return None;
            }
            // 1D mapping: quadrants follow each other in tile memory
            let quadrant = (sy / gfx::TILE_SIZE) * 2 + sx / gfx::TILE_SIZE;
            let tile = self.obj_tiles.get(usize::from(sprite.tile_id) + quadrant)?;
            let color = gfx::tile_pixel(tile[sy % gfx::TILE_SIZE], sx % gfx::TILE_SIZE);
            (color != 0).then(|| self.obj_palette[usize::from(color)])
        })
    }
}

impl Default for SoftVideo {
    fn default() -> Self {
        Self::new()
    }
}

impl Video for SoftVideo {
    fn sync_frame(&mut self) {
        self.frames += 1;
    }

    fn bulk_copy(&mut self, region: Region, words: &[u32]) {
        for (index, &word) in words.iter().enumerate() {
            self.store_word(region, index, word);
        }
    }

    fn bulk_fill(&mut self, region: Region, value: u32, count: usize) {
        for index in 0..count {
            self.store_word(region, index, value);
        }
    }

    fn write_entry(&mut self, slot: Slot, entry: ScreenEntry) {
        if usize::from(slot.screenblock) < SCREENBLOCKS {
            let offset = screenblock_offset(slot.screenblock);
            self.screenblocks[offset + usize::from(slot.index)] = entry;
        }
    }

    fn write_tile(&mut self, tile_id: u16, tile: &Tile) {
        if let Some(dest) = self.bg_tiles.get_mut(usize::from(tile_id)) {
            *dest = *tile;
        }
    }

    fn write_sprite(&mut self, index: u8, sprite: Sprite) {
        if let Some(dest) = self.sprites.get_mut(usize::from(index)) {
            *dest = sprite;
        }
    }
}

fn screenblock_offset(block: u8) -> usize {
    usize::from(block) * SCREENBLOCK_ENTRIES
}

fn store_tile_row(tiles: &mut [Tile], index: usize, word: u32) -> bool {
    match tiles.get_mut(index / gfx::TILE_SIZE) {
        Some(tile) => {
            tile[index % gfx::TILE_SIZE] = word;
            true
        }
        None => false,
    }
}

fn store_halves(memory: &mut [u16], index: usize, halves: [u16; 2]) -> bool {
    match memory.get_mut(index * 2..index * 2 + 2) {
        Some(dest) => {
            dest.copy_from_slice(&halves);
            true
        }
        None => false,
    }
}

/// Expands a 15-bit colour to opaque RGBA8888.
pub fn to_rgba(color: Color) -> [u8; 4] {
    let expand = |c: u16| {
        let c = (c & 0x1F) as u8;
        (c << 3) | (c >> 2)
    };
    [expand(color), expand(color >> 5), expand(color >> 10), 0xFF]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
        let at = (x + y * SCREEN_WIDTH) * BYTES_PER_PIXEL;
        frame[at..at + 4].try_into().unwrap()
    }

    fn loaded() -> SoftVideo {
        let mut video = SoftVideo::new();
        video.bulk_copy(Region::BgTiles, gfx::BG_TILES.as_flattened());
        video.bulk_copy(Region::ObjTiles, gfx::OBJ_TILES.as_flattened());
        video.bulk_copy(Region::BgPalette, &gfx::BG_PALETTE_WORDS);
        video.bulk_copy(Region::ObjPalette, &gfx::OBJ_PALETTE_WORDS);
        video
    }

    #[test]
    fn bulk_copy_fills_tiles_and_palettes() {
        let video = loaded();
        assert_eq!(video.tile(gfx::COVER_TILE_ID), &gfx::BG_TILES[12]);
        assert_eq!(video.bg_color(0), gfx::BG_COLORS[0][0]);
        assert_eq!(video.bg_color(17), gfx::BG_COLORS[1][1]);
        assert_eq!(video.bg_color(33), gfx::BG_COLORS[2][1]);
    }

    #[test]
    fn bulk_fill_writes_entry_pairs() {
        let mut video = SoftVideo::new();
        video.bulk_fill(Region::Screenblock(2), 0x0001_0001, SCREENBLOCK_ENTRIES / 2);
        let last = Slot {
            screenblock: 2,
            index: (SCREENBLOCK_ENTRIES - 1) as u16,
        };
        assert_eq!(video.entry(last), 1);
        assert_eq!(video.entry(Slot { screenblock: 1, index: 0 }), 0);
    }

    #[test]
    fn cover_layer_hides_mine_layer() {
        let mut video = loaded();
        let cover = grid::slot(Layer::Cover, (0, 0)).unwrap();
        let mine = grid::slot(Layer::Mine, (0, 0)).unwrap();
        video.write_entry(mine, MineCell::Mine.screen_entry());
        video.write_entry(cover, CoverCell::Covered(Band::Light).screen_entry());

        let frame = video.rasterize();
        assert_eq!(pixel(&frame, 3, 3), to_rgba(gfx::BG_COLORS[1][1]));

        video.write_entry(cover, CoverCell::Blank.screen_entry());
        let frame = video.rasterize();
        assert_eq!(pixel(&frame, 3, 3), to_rgba(gfx::BG_COLORS[0][7]));
        assert_eq!(pixel(&frame, 0, 0), to_rgba(gfx::BG_COLORS[0][0]));
    }

    #[test]
    fn sprite_draws_on_top_and_clips() {
        let mut video = loaded();
        video.write_sprite(
            gfx::RETICLE_OBJ,
            Sprite {
                x: -4,
                y: -4,
                tile_id: gfx::RETICLE_TILE_ID,
                visible: true,
            },
        );
        let frame = video.rasterize();
        // sprite pixel (4, 4) is the outline, (10, 12) is inside the bottom-right arrow
        assert_eq!(pixel(&frame, 0, 0), to_rgba(gfx::OBJ_COLORS[0][2]));
        assert_eq!(pixel(&frame, 6, 8), to_rgba(gfx::OBJ_COLORS[0][1]));
        assert_eq!(pixel(&frame, 20, 20), to_rgba(gfx::BG_COLORS[0][0]));
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut video = SoftVideo::new();
        video.bulk_fill(Region::BgPalette, u32::MAX, PALETTE_COLORS);
        video.write_entry(Slot { screenblock: 9, index: 0 }, 1);
        video.write_tile(u16::MAX, &[1; 8]);
        assert_eq!(video.bg_color(PALETTE_COLORS - 1), 0xFFFF);
    }

    #[test]
    fn rgba_expansion_reaches_full_range() {
        assert_eq!(to_rgba(0x7FFF), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(to_rgba(0), [0, 0, 0, 0xFF]);
        assert_eq!(to_rgba(0x001F), [0xFF, 0, 0, 0xFF]);
    }
}
