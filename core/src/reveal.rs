use alloc::vec::Vec;

use crate::console::Video;
use crate::gfx;
use crate::*;

/// Flood fill plus the dissolve that follows it.
///
/// Cell state changes happen at once in [`reveal`](Self::reveal); the revealed cells keep showing
/// the shared dissolve tile until [`advance`](Self::advance) has been called for
/// [`DissolveAnimation::TOTAL_FRAMES`] frames, after which they are blanked. Only one dissolve
/// runs at a time since every revealed cell points at the same tile bitmap.
#[derive(Clone, Debug)]
pub struct RevealEngine {
    revealed: Vec<Coord2>,
    worklist: Vec<Coord2>,
    dissolve: Option<DissolveAnimation>,
}

impl RevealEngine {
    pub fn new() -> Self {
        Self {
            revealed: Vec::with_capacity(CELLS.into()),
            worklist: Vec::with_capacity(CELLS.into()),
            dissolve: None,
        }
    }

    /// Cells uncovered by the latest fill, in the order they were reached.
    pub fn revealed(&self) -> &[Coord2] {
        &self.revealed
    }

    pub fn is_animating(&self) -> bool {
        self.dissolve.is_some()
    }

    pub fn dissolve(&self) -> Option<&DissolveAnimation> {
        self.dissolve.as_ref()
    }

    /// Uncovers `start` and, through empty cells, everything connected to it.
    ///
    /// Flagged, blank and out of range cells are left alone without touching the scratch state.
    pub fn reveal(
        &mut self,
        board: &mut Board,
        video: &mut impl Video,
        start: Coord2,
    ) -> RevealOutcome {
        let Ok(start) = grid::validate(start) else {
            return RevealOutcome::NoChange;
        };
        if matches!(board.cover_at(start), CoverCell::Blank | CoverCell::Flagged(_)) {
            log::trace!("Reveal at {:?} ignored, cell is {:?}", start, board.cover_at(start));
            return RevealOutcome::NoChange;
        }

        if self.dissolve.is_some() {
            log::warn!("Reveal at {:?} while dissolving, finishing early", start);
            self.blank_revealed(board, video);
        }

        self.revealed.clear();
        self.flood_fill(board, video, start);
        log::debug!("Revealed {} cells from {:?}", self.revealed.len(), start);

        let animation = DissolveAnimation::start();
        video.write_tile(gfx::REVEAL_TILE_ID, animation.tile());
        self.dissolve = Some(animation);

        if board.mine_at(start).is_mine() {
            RevealOutcome::HitMine
        } else {
            RevealOutcome::Revealed
        }
    }

    fn flood_fill(&mut self, board: &mut Board, video: &mut impl Video, start: Coord2) {
        self.worklist.clear();
        self.worklist.push(start);

        while let Some(coords) = self.worklist.pop() {
            // only covered cells go in, revealing them first is what stops revisits
            let CoverCell::Covered(band) = board.cover_at(coords) else {
                continue;
            };

            self.revealed.push(coords);
            board.set_cover(coords, CoverCell::Revealed(band));
            board.write_cell(video, Layer::Cover, coords);
            log::trace!("Flood revealed {:?}, {:?}", coords, board.mine_at(coords));

            if board.mine_at(coords).is_empty() {
                self.worklist.extend(
                    grid::neighbors(coords).filter(|&pos| board.cover_at(pos).is_covered()),
                );
            }
        }
    }

    /// Runs one frame of the dissolve, blanking the revealed cells when it ends.
    pub fn advance(&mut self, board: &mut Board, video: &mut impl Video) -> DissolveFrame {
        let Some(animation) = &mut self.dissolve else {
            return DissolveFrame::Finished;
        };

        let frame = animation.advance();
        match frame {
            DissolveFrame::Waiting => {}
            DissolveFrame::Eroded => video.write_tile(gfx::REVEAL_TILE_ID, animation.tile()),
            DissolveFrame::Finished => self.blank_revealed(board, video),
        }
        frame
    }

    /// Reveals and plays the whole dissolve, syncing to the display between frames.
    pub fn reveal_blocking(
        &mut self,
        board: &mut Board,
        video: &mut impl Video,
        start: Coord2,
    ) -> RevealOutcome {
        let outcome = self.reveal(board, video, start);
        while self.is_animating() {
            video.sync_frame();
            self.advance(board, video);
        }
        outcome
    }

    fn blank_revealed(&mut self, board: &mut Board, video: &mut impl Video) {
        for &coords in &self.revealed {
            board.set_cover(coords, CoverCell::Blank);
            board.write_cell(video, Layer::Cover, coords);
        }
        self.dissolve = None;
    }
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vram::SoftVideo;

    fn reveal(board: &mut Board, start: Coord2) -> (RevealEngine, RevealOutcome) {
        let mut engine = RevealEngine::new();
        let mut video = SoftVideo::new();
        let outcome = engine.reveal(board, &mut video, start);
        (engine, outcome)
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut board = Board::from_mine_coords(&[(5, 5)]).unwrap();
        let (engine, outcome) = reveal(&mut board, (6, 6));

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(engine.revealed(), &[(6, 6)]);
        assert_eq!(board.open_count(), 1);
        assert!(matches!(board.cover_at((6, 6)), CoverCell::Revealed(_)));
    }

    #[test]
    fn mine_cell_reveals_only_itself() {
        let mut board = Board::from_mine_coords(&[(5, 5)]).unwrap();
        let (engine, outcome) = reveal(&mut board, (5, 5));

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(engine.revealed(), &[(5, 5)]);
    }

    #[test]
    fn empty_board_reveals_everything() {
        let mut board = Board::new();
        let (engine, _) = reveal(&mut board, (0, 0));

        assert_eq!(engine.revealed().len(), usize::from(CELLS));
        assert_eq!(board.open_count(), CELLS);
    }

    #[test]
    fn flag_fence_bounds_five_by_five_region() {
        let mut board = Board::new();
        for i in 0..5 {
            board.toggle_flag((5, i)).unwrap();
            board.toggle_flag((i, 5)).unwrap();
        }
        board.toggle_flag((5, 5)).unwrap();
        let (engine, _) = reveal(&mut board, (2, 2));

        assert_eq!(engine.revealed().len(), 25);
        for x in 0..5 {
            for y in 0..5 {
                assert!(matches!(board.cover_at((x, y)), CoverCell::Revealed(_)));
            }
        }
        assert!(board.cover_at((6, 0)).is_covered());
        assert!(board.cover_at((5, 5)).is_flagged());
    }

    #[test]
    fn fill_stops_at_numbered_border() {
        // a wall of mines at x = 4 splits the board
        let wall: alloc::vec::Vec<Coord2> = (0..HEIGHT).map(|y| (4, y)).collect();
        let mut board = Board::from_mine_coords(&wall).unwrap();
        let (engine, _) = reveal(&mut board, (0, 0));

        assert_eq!(engine.revealed().len(), 4 * usize::from(HEIGHT));
        for y in 0..HEIGHT {
            assert!(matches!(board.cover_at((3, y)), CoverCell::Revealed(_)));
            assert!(board.cover_at((4, y)).is_covered());
            assert!(board.cover_at((5, y)).is_covered());
        }
        for &coords in engine.revealed() {
            let border = board.mine_at(coords) != MineCell::Clear(0);
            assert_eq!(border, coords.0 == 3);
        }
    }

    #[test]
    fn fill_does_not_cross_flags() {
        let mut board = Board::new();
        board.toggle_flag((10, 10)).unwrap();
        let (engine, _) = reveal(&mut board, (0, 0));

        assert_eq!(engine.revealed().len(), usize::from(CELLS) - 1);
        assert!(board.cover_at((10, 10)).is_flagged());
    }

    #[test]
    fn flagged_and_blank_starts_are_no_ops() {
        let mut board = Board::from_mine_coords(&[(5, 5)]).unwrap();
        let mut video = SoftVideo::new();
        let mut engine = RevealEngine::new();

        engine.reveal_blocking(&mut board, &mut video, (6, 6));
        assert_eq!(board.cover_at((6, 6)), CoverCell::Blank);
        board.toggle_flag((0, 0)).unwrap();

        let snapshot = board.clone();
        assert_eq!(engine.reveal(&mut board, &mut video, (6, 6)), RevealOutcome::NoChange);
        assert_eq!(engine.reveal(&mut board, &mut video, (0, 0)), RevealOutcome::NoChange);
        assert_eq!(
            engine.reveal(&mut board, &mut video, (WIDTH, 0)),
            RevealOutcome::NoChange
        );
        assert_eq!(board, snapshot);
        assert_eq!(engine.revealed(), &[(6, 6)]);
        assert!(!engine.is_animating());
    }

    #[test]
    fn dissolve_blanks_after_twelve_frames() {
        let mut board = Board::new();
        let mut video = SoftVideo::new();
        let mut engine = RevealEngine::new();
        engine.reveal(&mut board, &mut video, (3, 3));

        for _ in 1..DissolveAnimation::TOTAL_FRAMES {
            assert_ne!(engine.advance(&mut board, &mut video), DissolveFrame::Finished);
            assert!(matches!(board.cover_at((3, 3)), CoverCell::Revealed(_)));
        }
        assert_eq!(engine.advance(&mut board, &mut video), DissolveFrame::Finished);
        assert!(!engine.is_animating());
        assert!(board.iter_coords().all(|c| board.cover_at(c) == CoverCell::Blank));
        assert_eq!(video.tile(gfx::REVEAL_TILE_ID), &[0; 8]);
    }

    #[test]
    fn blocking_reveal_syncs_twelve_frames() {
        let mut board = Board::from_mine_coords(&[(5, 5)]).unwrap();
        let mut video = SoftVideo::new();
        let mut engine = RevealEngine::new();

        engine.reveal_blocking(&mut board, &mut video, (5, 5));
        assert_eq!(video.frame_count(), u64::from(DissolveAnimation::TOTAL_FRAMES));
        assert_eq!(board.cover_at((5, 5)), CoverCell::Blank);
    }

    #[test]
    fn cover_entries_are_mirrored() {
        let mut board = Board::from_mine_coords(&[(5, 5)]).unwrap();
        let mut video = SoftVideo::new();
        let mut engine = RevealEngine::new();
        board.upload_cover(&mut video);

        engine.reveal(&mut board, &mut video, (6, 6));
        let slot = grid::slot(Layer::Cover, (6, 6)).unwrap();
        assert_eq!(gfx::entry_tile_id(video.entry(slot)), gfx::REVEAL_TILE_ID);

        engine.reveal_blocking(&mut board, &mut video, (7, 7));
        assert_eq!(video.entry(slot), gfx::screen_entry(gfx::BLANK_TILE_ID, 0));
    }
}
