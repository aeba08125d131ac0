//! Game settings and preferences
//!
//! Persisted separately from best scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::DEFAULT_PARTICLE_CAP;

/// Particle budget when reduced motion is on
const REDUCED_PARTICLE_CAP: usize = 120;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound toggled off with the mute button
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Hallway murmur behind the effects
    pub ambience: bool,

    // === Visual Effects ===
    /// Particle bursts (carrots, sparkles, puffs)
    pub particles: bool,

    // === Accessibility ===
    /// Fewer particles, no idle bobbing
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 1.0,
            sfx_volume: 1.0,
            ambience: true,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else if self.reduced_motion {
            REDUCED_PARTICLE_CAP
        } else {
            DEFAULT_PARTICLE_CAP
        }
    }

    /// Flip the mute state; returns the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Label for the mute button
    pub fn sound_label(&self) -> &'static str {
        if self.muted { "Sound: Off" } else { "Sound: On" }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "trojan_christmas_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_cap() {
        let mut s = Settings::default();
        assert_eq!(s.max_particles(), DEFAULT_PARTICLE_CAP);
        s.reduced_motion = true;
        assert_eq!(s.max_particles(), REDUCED_PARTICLE_CAP);
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_mute_toggle_and_label() {
        let mut s = Settings::default();
        assert_eq!(s.sound_label(), "Sound: On");
        assert!(s.toggle_muted());
        assert_eq!(s.sound_label(), "Sound: Off");
        assert!(!s.toggle_muted());
    }

    #[test]
    fn test_json_missing_fields_use_defaults() {
        let s: Settings = serde_json::from_str(r#"{"muted":true}"#).unwrap_or_default();
        assert!(s.muted);
        assert!(s.ambience);
        assert_eq!(s.master_volume, 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings {
            muted: true,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&s).unwrap_or_default();
        let back: Settings = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, s);
    }
}
