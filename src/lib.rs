//! Trojan Christmas - a holiday side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (screens, levels, phases, physics)
//! - `renderer`: Builds per-frame draw lists; paints them on a 2D canvas (web)
//! - `audio`: Procedural sound effects and hallway ambience
//! - `view`: Letterbox transform between the window and logical game space
//! - `input`: Keyboard mapping onto simulation inputs
//! - `settings` / `highscores`: Preferences and best scores in LocalStorage

pub mod audio;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use highscores::BestScores;
pub use settings::Settings;
pub use view::View;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame time fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical resolution on desktop-sized windows
    pub const DESKTOP_VIEW: (f32, f32) = (960.0, 540.0);
    /// Smaller logical resolution so phones get a bigger-looking game
    pub const PHONE_VIEW: (f32, f32) = (560.0, 315.0);
    /// A window whose short side is at most this many CSS pixels is a phone
    pub const PHONE_BREAKPOINT: f32 = 520.0;

    /// Player physics
    pub const GRAVITY: f32 = 1800.0;
    pub const JUMP_VELOCITY: f32 = 640.0;
    pub const MOVE_SPEED: f32 = 260.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 140.0;
    pub const PLAYER_MIN_X: f32 = 60.0;
    /// Rightmost player x as a fraction of the logical width
    pub const PLAYER_MAX_X_FRAC: f32 = 0.55;

    /// Floor height as a fraction of the logical height
    pub const FLOOR_FRAC: f32 = 0.78;
    /// World objects further off-screen than this are skipped
    pub const CULL_MARGIN: f32 = 160.0;

    /// Baseline score earned per second of level time
    pub const BASELINE_POINTS_PER_SEC: f32 = 2.0;
}

/// Y coordinate of the floor for a logical height
#[inline]
pub fn floor_y(arena_height: f32) -> f32 {
    arena_height * consts::FLOOR_FRAC
}

/// Rightmost x the player may reach for a logical width
#[inline]
pub fn player_max_x(arena_width: f32) -> f32 {
    arena_width * consts::PLAYER_MAX_X_FRAC
}
