//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or browser dependencies

pub mod characters;
pub mod collision;
pub mod levels;
pub mod particles;
pub mod phases;
pub mod player;
pub mod state;
pub mod tick;

pub use characters::{Character, CharacterId, Palette, ROSTER};
pub use collision::{Aabb, land_on_top, on_screen};
pub use levels::{LEVELS, LevelDesc, PhaseDesc, PhaseEnd, PhaseKind};
pub use particles::{Burst, Particle};
pub use phases::{Phase, PhaseStatus};
pub use player::Player;
pub use state::{DEFAULT_PARTICLE_CAP, GameEvent, GameState, LevelRun, Screen, TouchState};
pub use tick::{PointerInput, TickInput, tick};
