use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::console::{Region, Video};
use crate::*;

/// The two parallel layers of the 30×20 board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mines: Array2<MineCell>,
    cover: Array2<CoverCell>,
    mine_count: CellCount,
}

impl Board {
    /// Fully covered board without mines.
    pub fn new() -> Self {
        let mut board = Self {
            mines: Array2::default(SIZE.to_nd_index()),
            cover: Array2::from_elem(SIZE.to_nd_index(), CoverCell::Blank),
            mine_count: 0,
        };
        board.cover_all();
        board
    }

    /// Covered board with mines at the given positions, adjacency counts included.
    pub fn from_mine_coords(mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new();
        for &coords in mine_coords {
            let coords = grid::validate(coords)?;
            board.plant_mine(coords);
        }
        Ok(board)
    }

    pub fn mine_at(&self, coords: Coord2) -> MineCell {
        self.mines[coords.to_nd_index()]
    }

    pub fn cover_at(&self, coords: Coord2) -> CoverCell {
        self.cover[coords.to_nd_index()]
    }

    pub(crate) fn set_cover(&mut self, coords: Coord2, cell: CoverCell) {
        self.cover[coords.to_nd_index()] = cell;
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cover(CoverCell::is_flagged)
    }

    pub fn open_count(&self) -> CellCount {
        self.count_cover(CoverCell::is_open)
    }

    fn count_cover(&self, predicate: impl Fn(CoverCell) -> bool) -> CellCount {
        self.cover
            .iter()
            .filter(|&&cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.iter_coords()
            .filter(|&coords| self.mine_at(coords).is_mine())
            .collect()
    }

    /// All board coordinates, column by column.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        (0..WIDTH).flat_map(|x| (0..HEIGHT).map(move |y| (x, y)))
    }

    /// Resets every cell to covered with its checkerboard band.
    pub fn cover_all(&mut self) {
        for ((x, y), cell) in self.cover.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            *cell = CoverCell::Covered(Band::at(coords));
        }
    }

    pub fn clear_mines(&mut self) {
        self.mines.fill(MineCell::Clear(0));
        self.mine_count = 0;
    }

    /// Places a mine and bumps the counts around it. Returns `false` if there already was one.
    pub fn plant_mine(&mut self, coords: Coord2) -> bool {
        if self.mine_at(coords).is_mine() {
            return false;
        }
        self.mines[coords.to_nd_index()] = MineCell::Mine;
        self.mine_count += 1;

        for pos in grid::neighbors(coords) {
            if let MineCell::Clear(count) = &mut self.mines[pos.to_nd_index()] {
                *count += 1;
            }
        }
        true
    }

    /// Counts adjacent mines by scanning the neighbourhood, independent of the stored counts.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        grid::neighbors(coords)
            .filter(|&pos| self.mine_at(pos).is_mine())
            .count() as u8
    }

    /// Flips between covered and flagged, anything else is left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = grid::validate(coords)?;

        Ok(match self.cover_at(coords) {
            CoverCell::Covered(band) => {
                self.set_cover(coords, CoverCell::Flagged(band));
                MarkOutcome::Changed
            }
            CoverCell::Flagged(band) => {
                self.set_cover(coords, CoverCell::Covered(band));
                MarkOutcome::Changed
            }
            CoverCell::Revealed(_) | CoverCell::Blank => MarkOutcome::NoChange,
        })
    }

    /// Mirrors one cell of one layer into its tile map slot.
    pub fn write_cell(&self, video: &mut impl Video, layer: Layer, coords: Coord2) {
        let Ok(slot) = grid::slot(layer, coords) else {
            return;
        };
        let entry = match layer {
            Layer::Cover => self.cover_at(coords).screen_entry(),
            Layer::Mine => self.mine_at(coords).screen_entry(),
        };
        video.write_entry(slot, entry);
    }

    pub fn upload_cover(&self, video: &mut impl Video) {
        for coords in self.iter_coords() {
            self.write_cell(video, Layer::Cover, coords);
        }
    }

    /// Clears the mine tile map in bulk, then writes the cells that differ from an empty one.
    pub fn upload_mines(&self, video: &mut impl Video) {
        let empty = u32::from(MineCell::Clear(0).screen_entry());
        video.bulk_fill(
            Region::Screenblock(Layer::Mine.screenblock()),
            empty | (empty << 16),
            grid::SCREENBLOCK_ENTRIES / 2,
        );
        for coords in self.iter_coords() {
            if !self.mine_at(coords).is_empty() {
                self.write_cell(video, Layer::Mine, coords);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
