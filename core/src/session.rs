use serde::{Deserialize, Serialize};

use crate::console::{Console, Region, Tone, Video};
use crate::gfx;
use crate::input::{KeyState, Keys};
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Graphics not uploaded yet.
    Setup,
    /// Board covered, mines not placed; key presses are collected as entropy.
    AwaitingFirstReveal,
    Playing,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Setup
    }
}

/// One game from power-on: owns the board, the cursor and the reveal engine.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    reticle: Reticle,
    keys: KeyState,
    rng: Lcg,
    engine: RevealEngine,
    phase: Phase,
}

impl Session {
    pub const REVEAL_KEY: Keys = Keys::A;
    pub const FLAG_KEY: Keys = Keys::B;

    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::unchecked(config))
    }

    /// Session with the default mine count, which always fits the board.
    pub fn with_seed(seed: u32) -> Self {
        Self::unchecked(SessionConfig::with_seed(seed))
    }

    fn unchecked(config: SessionConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            reticle: Reticle::new(),
            keys: KeyState::default(),
            rng: Lcg::new(config.seed),
            engine: RevealEngine::new(),
            phase: Phase::default(),
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    pub fn rng(&self) -> &Lcg {
        &self.rng
    }

    pub fn is_dissolving(&self) -> bool {
        self.engine.is_animating()
    }

    /// Covers the board and loads tiles, palettes and the hidden reticle into video memory.
    pub fn setup(&mut self, video: &mut impl Video) {
        self.board.cover_all();
        self.board.upload_cover(video);
        video.sync_frame();

        video.bulk_copy(Region::BgTiles, gfx::BG_TILES.as_flattened());
        video.bulk_copy(Region::ObjTiles, gfx::OBJ_TILES.as_flattened());
        video.bulk_copy(Region::BgPalette, &gfx::BG_PALETTE_WORDS);
        video.bulk_copy(Region::ObjPalette, &gfx::OBJ_PALETTE_WORDS);
        self.board.upload_mines(video);
        video.write_sprite(gfx::RETICLE_OBJ, gfx::Sprite::hidden(gfx::RETICLE_TILE_ID));

        self.phase = Phase::AwaitingFirstReveal;
        log::debug!("Session set up, seed {:#010x}", self.config.seed);
    }

    /// Handles one displayed frame. Call right after the frame sync.
    ///
    /// While a dissolve is playing the frame only advances it; keys are not sampled until it has
    /// finished.
    pub fn tick(&mut self, console: &mut impl Console) {
        if self.phase == Phase::Setup {
            self.setup(console);
            return;
        }

        if self.engine.is_animating() {
            self.engine.advance(&mut self.board, console);
            return;
        }

        let held = console.poll_keys();
        self.keys.poll(held);
        self.reticle.update(&self.keys);
        console.write_sprite(gfx::RETICLE_OBJ, self.reticle.sprite());

        match self.phase {
            Phase::Setup => {}
            Phase::AwaitingFirstReveal => {
                self.rng.absorb(held.raw_register());
                if !self.keys.hit(Self::REVEAL_KEY).is_empty() {
                    self.start(console);
                }
            }
            Phase::Playing => {
                let position = self.reticle.position();
                if !self.keys.hit(Self::REVEAL_KEY).is_empty() {
                    self.investigate(console, position);
                }
                if !self.keys.hit(Self::FLAG_KEY).is_empty() {
                    self.toggle_flag(console, position);
                }
            }
        }
    }

    /// Frame loop for platforms with a blocking frame sync.
    pub fn run(mut self, console: &mut impl Console) -> ! {
        if self.phase == Phase::Setup {
            self.setup(console);
        }
        loop {
            console.sync_frame();
            self.tick(console);
        }
    }

    /// Places the mines around the cursor and opens the first cell.
    fn start(&mut self, console: &mut impl Console) {
        let center = self.reticle.position();
        match RandomMineGenerator::new(&mut self.rng, self.config.mine_count) {
            Ok(generator) => generator.generate(&mut self.board, center),
            Err(err) => {
                log::error!("Could not place mines: {}", err);
                return;
            }
        }
        self.board.upload_mines(console);

        self.phase = Phase::Playing;
        log::debug!("First reveal at {:?}, playing", center);
        self.investigate(console, center);
    }

    /// Sounds out what is under `position` and reveals it.
    fn investigate(&mut self, console: &mut impl Console, position: Coord2) -> RevealOutcome {
        if matches!(
            self.board.cover_at(position),
            CoverCell::Blank | CoverCell::Flagged(_)
        ) {
            log::trace!("Nothing to reveal at {:?}", position);
            return RevealOutcome::NoChange;
        }

        match self.board.mine_at(position) {
            MineCell::Mine => {
                log::debug!("Mine revealed at {:?}", position);
                console.play_noise_burst();
            }
            MineCell::Clear(count) => console.play_tone(Tone::new(count)),
        }
        self.engine.reveal(&mut self.board, console, position)
    }

    fn toggle_flag(&mut self, console: &mut impl Console, position: Coord2) {
        match self.board.toggle_flag(position) {
            Ok(MarkOutcome::Changed) => {
                self.board.write_cell(console, Layer::Cover, position);
                log::trace!("Flag toggled at {:?}", position);
            }
            Ok(MarkOutcome::NoChange) => log::trace!("Cannot flag {:?}", position),
            Err(err) => log::trace!("Cannot flag {:?}: {}", position, err),
        }
    }
}
