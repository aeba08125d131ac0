//! Procedural audio
//!
//! Every sound effect is a short list of voices (an oscillator with a pitch
//! glide, or a burst of fading white noise) played through Web Audio. No
//! sample files are needed. The voice tables and buffer synthesis here are
//! plain data so they can be tested natively.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use rand::Rng;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Menu cursor, small progress
    Tick,
    /// Leaving a menu
    Start,
    Jump,
    /// A crate opened
    Open,
    /// Empty crate, coal, or out of hearts
    Decoy,
    Collect,
    Throw,
    /// Shot in the cup, goal reached
    Swish,
    /// Ran into an obstacle
    Hit,
    LevelComplete,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One sound source inside an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Voice {
    /// Oscillator gliding linearly from `f0` to `f1` over `dur`
    Tone {
        wave: Waveform,
        f0: f32,
        f1: Option<f32>,
        dur: f64,
        gain: f32,
        delay: f64,
    },
    /// White noise fading out over `dur`
    Noise { dur: f64, gain: f32, delay: f64 },
}

const fn tone(wave: Waveform, f0: f32, f1: f32, dur: f64, gain: f32) -> Voice {
    Voice::Tone {
        wave,
        f0,
        f1: Some(f1),
        dur,
        gain,
        delay: 0.0,
    }
}

const fn delayed(voice: Voice, by: f64) -> Voice {
    match voice {
        Voice::Tone {
            wave,
            f0,
            f1,
            dur,
            gain,
            ..
        } => Voice::Tone {
            wave,
            f0,
            f1,
            dur,
            gain,
            delay: by,
        },
        Voice::Noise { dur, gain, .. } => Voice::Noise {
            dur,
            gain,
            delay: by,
        },
    }
}

const fn noise(dur: f64, gain: f32) -> Voice {
    Voice::Noise {
        dur,
        gain,
        delay: 0.0,
    }
}

const fn note(freq: f32, delay: f64) -> Voice {
    Voice::Tone {
        wave: Waveform::Triangle,
        f0: freq,
        f1: None,
        dur: 0.12,
        gain: 0.05,
        delay,
    }
}

use Waveform::*;

const TICK: [Voice; 1] = [tone(Square, 740.0, 640.0, 0.04, 0.04)];
const START: [Voice; 1] = [tone(Triangle, 520.0, 780.0, 0.09, 0.06)];
const JUMP: [Voice; 1] = [tone(Square, 520.0, 880.0, 0.07, 0.06)];
const OPEN: [Voice; 1] = [tone(Sawtooth, 180.0, 120.0, 0.09, 0.05)];
const DECOY: [Voice; 1] = [noise(0.06, 0.04)];
const COLLECT: [Voice; 2] = [
    tone(Triangle, 880.0, 1320.0, 0.07, 0.06),
    delayed(tone(Triangle, 1320.0, 1760.0, 0.05, 0.05), 0.03),
];
const THROW: [Voice; 1] = [tone(Triangle, 420.0, 620.0, 0.06, 0.05)];
const SWISH: [Voice; 1] = [tone(Triangle, 980.0, 1680.0, 0.10, 0.06)];
const HIT: [Voice; 2] = [tone(Sawtooth, 220.0, 90.0, 0.12, 0.06), noise(0.05, 0.03)];
const LEVEL_COMPLETE: [Voice; 4] = [
    note(660.0, 0.0),
    note(880.0, 0.09),
    note(1100.0, 0.18),
    note(1320.0, 0.27),
];

impl SoundEffect {
    pub fn voices(&self) -> &'static [Voice] {
        match self {
            SoundEffect::Tick => &TICK,
            SoundEffect::Start => &START,
            SoundEffect::Jump => &JUMP,
            SoundEffect::Open => &OPEN,
            SoundEffect::Decoy => &DECOY,
            SoundEffect::Collect => &COLLECT,
            SoundEffect::Throw => &THROW,
            SoundEffect::Swish => &SWISH,
            SoundEffect::Hit => &HIT,
            SoundEffect::LevelComplete => &LEVEL_COMPLETE,
        }
    }

    /// The sound a simulation event makes, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::MenuStart => Some(SoundEffect::Start),
            GameEvent::MenuMove => Some(SoundEffect::Tick),
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::BoxOpened => Some(SoundEffect::Open),
            GameEvent::DecoyOpened | GameEvent::CoalCaught | GameEvent::PhaseRestarted => {
                Some(SoundEffect::Decoy)
            }
            GameEvent::CarrotCollected | GameEvent::DonationCaught => Some(SoundEffect::Collect),
            GameEvent::ShotThrown => Some(SoundEffect::Throw),
            GameEvent::ShotScored | GameEvent::GoalReached => Some(SoundEffect::Swish),
            // Every third cell, or colouring turns into a buzz
            GameEvent::ZoneFilled { progress } if progress % 3 == 0 => Some(SoundEffect::Tick),
            GameEvent::ObstacleHit { .. } => Some(SoundEffect::Hit),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::LevelComplete),
            _ => None,
        }
    }
}

/// Time to reach full gain at the start of a tone
pub fn attack_time(dur: f64) -> f64 {
    0.02f64.min(dur * 0.4)
}

/// Envelope floor; exponential ramps can't reach zero
pub const SILENCE: f32 = 0.0001;

/// Final gain of a voice, or `None` if it would be inaudible
pub fn scaled_gain(gain: f32, volume: f32) -> Option<f32> {
    let g = gain * volume;
    (g > SILENCE).then_some(g)
}

/// Samples of fading white noise for a noise pop
pub fn noise_pop_samples(rng: &mut impl Rng, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let fade = 1.0 - i as f32 / len as f32;
            rng.random_range(-1.0f32..1.0) * fade
        })
        .collect()
}

/// Steady noise for the looping hallway murmur
pub fn ambience_samples(rng: &mut impl Rng, len: usize) -> Vec<f32> {
    (0..len)
        .map(|_| rng.random_range(-1.0f32..1.0) * ambience::NOISE_AMPLITUDE)
        .collect()
}

/// Hallway murmur graph: looped noise, two bandpass voices, slow swell
pub mod ambience {
    pub const LOOP_SECONDS: f64 = 2.0;
    pub const NOISE_AMPLITUDE: f32 = 0.35;
    /// (centre Hz, Q, mix gain)
    pub const BANDS: [(f32, f32, f32); 2] = [(520.0, 0.7, 0.55), (950.0, 0.9, 0.45)];
    pub const AMP_GAIN: f32 = 0.035;
    pub const LFO_HZ: f32 = 0.22;
    pub const LFO_DEPTH: f32 = 0.012;
    pub const COMP_THRESHOLD: f32 = -28.0;
    pub const COMP_RATIO: f32 = 6.0;
    pub const MASTER_GAIN: f32 = 0.020;
    /// Fade-out time constant when stopping
    pub const FADE_TIME_CONSTANT: f64 = 0.05;
    pub const STOP_DELAY: f64 = 0.12;
}
