//! Audio playback on the Web Audio API

use rand::SeedableRng;
use rand_pcg::Pcg32;
use web_sys::{
    AudioBufferSourceNode, AudioContext, AudioContextState, BiquadFilterType, GainNode,
    OscillatorNode, OscillatorType,
};

use super::{SoundEffect, Voice, Waveform, ambience, attack_time, scaled_gain, SILENCE};
use crate::settings::Settings;

impl From<Waveform> for OscillatorType {
    fn from(wave: Waveform) -> Self {
        match wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }
}

/// Nodes kept alive while the hallway murmur plays
struct Ambience {
    master: GainNode,
    src: AudioBufferSourceNode,
    lfo: OscillatorNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    ambience: Option<Ambience>,
    /// Noise source for pops and the murmur loop
    rng: Pcg32,
    master_volume: f32,
    sfx_volume: f32,
    ambience_enabled: bool,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Missing in some embedded browsers and non-secure contexts
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            ambience: None,
            rng: Pcg32::seed_from_u64(js_sys::Date::now() as u64),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            ambience_enabled: settings.ambience,
            muted: settings.muted,
        }
    }

    fn running(&self) -> Option<&AudioContext> {
        self.ctx
            .as_ref()
            .filter(|ctx| ctx.state() == AudioContextState::Running)
    }

    /// Resume the context after a user gesture, then start the murmur
    pub fn unlock(&mut self) {
        if self.muted {
            return;
        }
        if let Some(ctx) = &self.ctx
            && ctx.state() == AudioContextState::Suspended
        {
            let _ = ctx.resume();
        }
        self.ensure_ambience();
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_ambience();
        } else {
            self.unlock();
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.ambience_enabled = settings.ambience;
        self.set_muted(settings.muted);
        if !self.ambience_enabled {
            self.stop_ambience();
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.unlock();
        if self.running().is_none() {
            return;
        }
        for voice in effect.voices() {
            match *voice {
                Voice::Tone {
                    wave,
                    f0,
                    f1,
                    dur,
                    gain,
                    delay,
                } => {
                    if let Some(gain) = scaled_gain(gain, vol) {
                        self.play_tone(wave, f0, f1, dur, gain, delay);
                    }
                }
                Voice::Noise { dur, gain, delay } => {
                    if let Some(gain) = scaled_gain(gain, vol) {
                        self.play_noise(dur, gain, delay);
                    }
                }
            }
        }
    }

    // === Sound generators ===

    /// Oscillator with a short exponential attack and decay
    fn play_tone(&self, wave: Waveform, f0: f32, f1: Option<f32>, dur: f64, gain: f32, delay: f64) {
        let Some(ctx) = self.running() else { return };
        let Some((osc, amp)) = create_osc(ctx, f0, wave.into()) else {
            return;
        };
        let t0 = ctx.current_time() + delay;
        let t1 = t0 + dur;

        osc.frequency().set_value_at_time(f0, t0).ok();
        if let Some(f1) = f1 {
            osc.frequency().linear_ramp_to_value_at_time(f1, t1).ok();
        }

        amp.gain().set_value_at_time(SILENCE, t0).ok();
        amp.gain()
            .exponential_ramp_to_value_at_time(gain, t0 + attack_time(dur))
            .ok();
        amp.gain().exponential_ramp_to_value_at_time(SILENCE, t1).ok();

        osc.start_with_when(t0).ok();
        osc.stop_with_when(t1 + 0.01).ok();
    }

    /// A short burst of fading white noise
    fn play_noise(&mut self, dur: f64, gain: f32, delay: f64) {
        let Some(ctx) = self.ctx.clone() else { return };
        let rate = ctx.sample_rate();
        let len = ((rate as f64 * dur) as usize).max(1);
        let mut samples = super::noise_pop_samples(&mut self.rng, len);

        let Some(src) = buffer_source(&ctx, &mut samples, rate) else {
            return;
        };
        let Ok(amp) = ctx.create_gain() else { return };
        let t0 = ctx.current_time() + delay;
        let t1 = t0 + dur;
        amp.gain().set_value_at_time(SILENCE, t0).ok();
        amp.gain()
            .exponential_ramp_to_value_at_time(gain, t0 + 0.01)
            .ok();
        amp.gain().exponential_ramp_to_value_at_time(SILENCE, t1).ok();

        if src.connect_with_audio_node(&amp).is_err()
            || amp.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }
        src.start_with_when(t0).ok();
        src.stop_with_when(t1 + 0.01).ok();
    }

    /// Start the looping hallway murmur if it should be playing
    fn ensure_ambience(&mut self) {
        if self.muted || !self.ambience_enabled || self.ambience.is_some() {
            return;
        }
        let Some(ctx) = self.running().cloned() else {
            return;
        };
        match self.build_ambience(&ctx) {
            Some(amb) => {
                log::info!("Ambience started");
                self.ambience = Some(amb);
            }
            None => log::warn!("Could not build ambience graph"),
        }
    }

    fn build_ambience(&mut self, ctx: &AudioContext) -> Option<Ambience> {
        let rate = ctx.sample_rate();
        let len = (rate as f64 * ambience::LOOP_SECONDS) as usize;
        let mut samples = super::ambience_samples(&mut self.rng, len);
        let src = buffer_source(ctx, &mut samples, rate)?;
        src.set_loop(true);

        let amp = ctx.create_gain().ok()?;
        amp.gain().set_value(ambience::AMP_GAIN);

        for (freq, q, mix) in ambience::BANDS {
            let band = ctx.create_biquad_filter().ok()?;
            band.set_type(BiquadFilterType::Bandpass);
            band.frequency().set_value(freq);
            band.q().set_value(q);
            let mix_gain = ctx.create_gain().ok()?;
            mix_gain.gain().set_value(mix);
            src.connect_with_audio_node(&band).ok()?;
            band.connect_with_audio_node(&mix_gain).ok()?;
            mix_gain.connect_with_audio_node(&amp).ok()?;
        }

        // Slow swell on the murmur level
        let lfo = ctx.create_oscillator().ok()?;
        lfo.set_type(OscillatorType::Sine);
        lfo.frequency().set_value(ambience::LFO_HZ);
        let lfo_gain = ctx.create_gain().ok()?;
        lfo_gain.gain().set_value(ambience::LFO_DEPTH);
        lfo.connect_with_audio_node(&lfo_gain).ok()?;
        lfo_gain.connect_with_audio_param(&amp.gain()).ok()?;

        let comp = ctx.create_dynamics_compressor().ok()?;
        comp.threshold().set_value(ambience::COMP_THRESHOLD);
        comp.ratio().set_value(ambience::COMP_RATIO);

        let master = ctx.create_gain().ok()?;
        master.gain().set_value(ambience::MASTER_GAIN);

        amp.connect_with_audio_node(&comp).ok()?;
        comp.connect_with_audio_node(&master).ok()?;
        master.connect_with_audio_node(&ctx.destination()).ok()?;

        lfo.start().ok()?;
        src.start().ok()?;
        Some(Ambience { master, src, lfo })
    }

    fn stop_ambience(&mut self) {
        let Some(amb) = self.ambience.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let now = ctx.current_time();
        amb.master
            .gain()
            .set_target_at_time(SILENCE, now, ambience::FADE_TIME_CONSTANT)
            .ok();
        amb.src.stop_with_when(now + ambience::STOP_DELAY).ok();
        amb.lfo.stop_with_when(now + ambience::STOP_DELAY).ok();
        log::info!("Ambience stopped");
    }
}

/// Create an oscillator routed through its own gain node
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Mono buffer source holding `samples`
fn buffer_source(
    ctx: &AudioContext,
    samples: &mut [f32],
    rate: f32,
) -> Option<AudioBufferSourceNode> {
    let buffer = ctx.create_buffer(1, samples.len() as u32, rate).ok()?;
    buffer.copy_to_channel(samples, 0).ok()?;
    let src = ctx.create_buffer_source().ok()?;
    src.set_buffer(Some(&buffer));
    Some(src)
}
