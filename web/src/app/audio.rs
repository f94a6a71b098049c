use tilesweep_core::console::Tone;
use web_sys::{
    AudioBuffer, AudioContext, AudioScheduledSourceNode, GainNode, OscillatorType,
};

use crate::app::utils::js_error;

/// Square-wave channel and noise channel rebuilt on Web Audio.
pub(in crate::app) struct WebAudio {
    context: AudioContext,
    noise: AudioBuffer,
}

impl WebAudio {
    const VOLUME: f32 = 0.15;
    const RELEASE_SECONDS: f64 = 0.01;
    /// Noise envelope: 15 volume steps of 6/64 s each.
    const NOISE_SECONDS: f64 = 15.0 * 6.0 / 64.0;
    /// Shift clock of the 15-stage noise register, 524288 Hz / 3 / 2^10.
    const NOISE_CLOCK_HZ: f64 = 524288.0 / 3.0 / 1024.0;

    pub(in crate::app) fn new() -> anyhow::Result<Self> {
        let context = AudioContext::new().map_err(js_error)?;
        let noise = Self::noise_buffer(&context)?;
        log::debug!("Audio ready at {} Hz", context.sample_rate());
        Ok(Self { context, noise })
    }

    /// Pre-renders the noise register output for the whole burst.
    fn noise_buffer(context: &AudioContext) -> anyhow::Result<AudioBuffer> {
        let sample_rate = context.sample_rate();
        let len = (Self::NOISE_SECONDS * f64::from(sample_rate)).ceil() as u32;
        let buffer = context
            .create_buffer(1, len, sample_rate)
            .map_err(js_error)?;

        let step = Self::NOISE_CLOCK_HZ / f64::from(sample_rate);
        let mut register: u16 = 0x7FFF;
        let mut phase = 0.0;
        let mut samples: Vec<f32> = (0..len)
            .map(|_| {
                phase += step;
                while phase >= 1.0 {
                    phase -= 1.0;
                    let bit = (register ^ (register >> 1)) & 1;
                    register = (register >> 1) | (bit << 14);
                }
                if register & 1 == 0 { 1.0 } else { -1.0 }
            })
            .collect();
        buffer
            .copy_to_channel(&mut samples, 0)
            .map_err(js_error)?;
        Ok(buffer)
    }

    /// Browsers keep the context suspended until a user gesture.
    pub(in crate::app) fn resume(&self) {
        if let Err(err) = self.context.resume() {
            log::trace!("Audio resume failed: {:?}", err);
        }
    }

    /// Gain at full volume for `hold` seconds, then falling to silence at `length`.
    fn envelope(&self, hold: f64, length: f64) -> anyhow::Result<GainNode> {
        let now = self.context.current_time();
        let gain = self.context.create_gain().map_err(js_error)?;
        let param = gain.gain();
        param
            .set_value_at_time(Self::VOLUME, now)
            .map_err(js_error)?;
        param
            .set_value_at_time(Self::VOLUME, now + hold)
            .map_err(js_error)?;
        param
            .linear_ramp_to_value_at_time(0.0, now + length)
            .map_err(js_error)?;
        gain.connect_with_audio_node(&self.context.destination())
            .map_err(js_error)?;
        Ok(gain)
    }

    pub(in crate::app) fn tone(&self, tone: Tone) -> anyhow::Result<()> {
        let step = f64::from(Tone::SWEEP_STEP_SECONDS);
        let now = self.context.current_time();
        let oscillator = self.context.create_oscillator().map_err(js_error)?;
        oscillator.set_type(OscillatorType::Square);

        let mut length = 0.0;
        for frequency in tone.sweep() {
            oscillator
                .frequency()
                .set_value_at_time(frequency, now + length)
                .map_err(js_error)?;
            length += step;
        }

        // square channel holds its volume until the sweep overflows
        let gain = self.envelope(length - Self::RELEASE_SECONDS, length)?;
        oscillator
            .connect_with_audio_node(&gain)
            .map_err(js_error)?;
        let source: &AudioScheduledSourceNode = &oscillator;
        source.start().map_err(js_error)?;
        source.stop_with_when(now + length).map_err(js_error)?;
        log::trace!("Tone level {} for {:.3} s", tone.level(), length);
        Ok(())
    }

    pub(in crate::app) fn noise_burst(&self) -> anyhow::Result<()> {
        let source = self.context.create_buffer_source().map_err(js_error)?;
        source.set_buffer(Some(&self.noise));

        let gain = self.envelope(0.0, Self::NOISE_SECONDS)?;
        source.connect_with_audio_node(&gain).map_err(js_error)?;
        let scheduled: &AudioScheduledSourceNode = &source;
        scheduled.start().map_err(js_error)?;
        Ok(())
    }
}
