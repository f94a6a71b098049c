use tilesweep_core::Slot;
use tilesweep_core::console::{Audio, Keypad, Region, Tone, Video};
use tilesweep_core::gfx::{ScreenEntry, Sprite, Tile};
use tilesweep_core::input::Keys;
use tilesweep_core::vram::{self, SoftVideo};
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

use crate::app::audio::WebAudio;
use crate::app::utils::js_error;

/// The browser side of a session: software video memory drawn onto a canvas, keyboard state
/// and optional Web Audio output.
pub(in crate::app) struct WebConsole {
    video: SoftVideo,
    audio: Option<WebAudio>,
    held: Keys,
    frame: Vec<u8>,
}

impl WebConsole {
    pub(in crate::app) fn new(mute: bool) -> Self {
        let audio = if mute {
            None
        } else {
            WebAudio::new()
                .inspect_err(|err| log::error!("Audio disabled: {:#}", err))
                .ok()
        };
        Self {
            video: SoftVideo::new(),
            audio,
            held: Keys::empty(),
            frame: vec![0; vram::SCREEN_WIDTH * vram::SCREEN_HEIGHT * vram::BYTES_PER_PIXEL],
        }
    }

    pub(in crate::app) fn set_key(&mut self, keys: Keys, pressed: bool) {
        if pressed && let Some(audio) = &self.audio {
            audio.resume();
        }
        self.held.set(keys, pressed);
    }

    /// Lost focus means no keyup events, so nothing can stay held.
    pub(in crate::app) fn release_all(&mut self) {
        self.held = Keys::empty();
    }

    /// Rasterizes video memory and copies it to the canvas.
    pub(in crate::app) fn present(
        &mut self,
        context: &CanvasRenderingContext2d,
    ) -> anyhow::Result<()> {
        self.video.rasterize_into(&mut self.frame);
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.frame.as_slice()),
            vram::SCREEN_WIDTH as u32,
            vram::SCREEN_HEIGHT as u32,
        )
        .map_err(js_error)?;
        context.put_image_data(&image, 0.0, 0.0).map_err(js_error)
    }
}

impl Video for WebConsole {
    /// The frame interval already paces ticks, this only keeps the frame count.
    fn sync_frame(&mut self) {
        self.video.sync_frame();
    }

    fn bulk_copy(&mut self, region: Region, words: &[u32]) {
        self.video.bulk_copy(region, words);
    }

    fn bulk_fill(&mut self, region: Region, value: u32, count: usize) {
        self.video.bulk_fill(region, value, count);
    }

    fn write_entry(&mut self, slot: Slot, entry: ScreenEntry) {
        self.video.write_entry(slot, entry);
    }

    fn write_tile(&mut self, tile_id: u16, tile: &Tile) {
        self.video.write_tile(tile_id, tile);
    }

    fn write_sprite(&mut self, index: u8, sprite: Sprite) {
        self.video.write_sprite(index, sprite);
    }
}

impl Audio for WebConsole {
    fn play_tone(&mut self, tone: Tone) {
        if let Some(audio) = &self.audio
            && let Err(err) = audio.tone(tone)
        {
            log::warn!("Could not play tone: {:#}", err);
        }
    }

    fn play_noise_burst(&mut self) {
        if let Some(audio) = &self.audio
            && let Err(err) = audio.noise_burst()
        {
            log::warn!("Could not play noise: {:#}", err);
        }
    }
}

impl Keypad for WebConsole {
    fn poll_keys(&mut self) -> Keys {
        self.held
    }
}
