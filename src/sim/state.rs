//! Game state and core simulation types
//!
//! One authoritative `GameState` is owned by the frame loop, mutated by
//! `tick()` and read by the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::characters::CharacterId;
use super::levels::{self, LevelDesc, PhaseDesc, PhaseKind};
use super::particles::{self, Burst, Particle};
use super::phases::Phase;
use super::player::Player;
use crate::consts::*;

/// Default particle budget when settings don't say otherwise
pub const DEFAULT_PARTICLE_CAP: usize = 400;
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Title,
    Select,
    Level,
}

/// Things that happened during a tick, drained by the frame loop (audio, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Left the title screen, or started a level
    MenuStart,
    /// Selection moved, level left or restarted
    MenuMove,
    Jump,
    BoxOpened,
    DecoyOpened,
    CarrotCollected,
    ShotThrown,
    ShotScored,
    /// A colouring cell was filled; carries the running count
    ZoneFilled { progress: u32 },
    DonationCaught,
    CoalCaught,
    ObstacleHit { hearts_left: u8 },
    ObstacleCleared,
    /// Ran out of hearts; the phase starts over
    PhaseRestarted,
    /// A goal phase hit its target
    GoalReached,
    PhaseStarted(PhaseKind),
    LevelComplete {
        level: u8,
        score: u64,
        character: CharacterId,
    },
}

/// Held touch zones (phone controls)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchState {
    pub left: bool,
    pub right: bool,
}

impl TouchState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Event and particle sink shared by every phase
///
/// Particles draw from their own generator so the particle setting can't
/// change the gameplay random sequence.
#[derive(Debug, Clone)]
pub struct Fx {
    pub events: Vec<GameEvent>,
    pub particles: Vec<Particle>,
    pub particle_cap: usize,
    rng: Pcg32,
}

impl Fx {
    pub fn new(particle_cap: usize) -> Self {
        Self::seeded(0, particle_cap)
    }

    pub fn seeded(seed: u64, particle_cap: usize) -> Self {
        Self {
            events: Vec::new(),
            particles: Vec::new(),
            particle_cap,
            rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }

    pub fn burst(&mut self, origin: Vec2, burst: &Burst) {
        particles::spawn_burst(
            &mut self.particles,
            &mut self.rng,
            origin,
            burst,
            self.particle_cap,
        );
    }
}

/// Progress through one level
#[derive(Debug, Clone)]
pub struct LevelRun {
    /// Index into the level table
    pub level: usize,
    pub phase_index: usize,
    pub phase: Phase,
    pub score: u64,
    pub time_in_level: f32,
    pub phase_time: f32,
    pub done: bool,
    /// Fractional baseline points not yet added to the score
    pub(crate) baseline_carry: f32,
}

impl LevelRun {
    pub fn new(level: usize, rng: &mut Pcg32, arena: Vec2) -> Self {
        let level = level.min(levels::LEVELS.len() - 1);
        let first = levels::level(level).phases[0].kind;
        Self {
            level,
            phase_index: 0,
            phase: Phase::start(first, rng, arena),
            score: 0,
            time_in_level: 0.0,
            phase_time: 0.0,
            done: false,
            baseline_carry: 0.0,
        }
    }

    pub fn desc(&self) -> &'static LevelDesc {
        levels::level(self.level)
    }

    pub fn phase_desc(&self) -> &'static PhaseDesc {
        &self.desc().phases[self.phase_index]
    }

    pub fn is_last_level(&self) -> bool {
        self.level + 1 >= levels::LEVELS.len()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub screen: Screen,
    /// Highlighted character on the select screen
    pub selected: CharacterId,
    /// Seconds since the game started (drives animation)
    pub time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Logical playfield size (VIEW gw x gh)
    pub arena: Vec2,
    pub player: Player,
    pub run: LevelRun,
    pub touch: TouchState,
    pub fx: Fx,
}

impl GameState {
    /// Create a new game state with the given seed, on the title screen
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = Vec2::new(DESKTOP_VIEW.0, DESKTOP_VIEW.1);
        let run = LevelRun::new(0, &mut rng, arena);
        Self {
            seed,
            rng,
            screen: Screen::Title,
            selected: CharacterId::default(),
            time: 0.0,
            time_ticks: 0,
            arena,
            player: Player::new(CharacterId::default()),
            run,
            touch: TouchState::default(),
            fx: Fx::seeded(seed, DEFAULT_PARTICLE_CAP),
        }
    }

    /// Adopt a new logical size (window resized or rotated)
    pub fn set_arena(&mut self, arena: Vec2) {
        if arena != self.arena {
            log::info!("Logical view {}x{}", arena.x, arena.y);
            self.arena = arena;
        }
    }

    pub fn set_particle_cap(&mut self, cap: usize) {
        self.fx.particle_cap = cap;
        self.fx.particles.truncate(cap);
    }

    /// Take everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.fx.events)
    }

    /// Begin (or restart) a level with the current character
    pub fn start_level(&mut self, level: usize) {
        self.run = LevelRun::new(level, &mut self.rng, self.arena);
        self.player.reset();
        self.touch.clear();
        self.fx.particles.clear();
        self.screen = Screen::Level;
        log::info!(
            "Level {} \"{}\" started as {}",
            self.run.desc().number,
            self.run.desc().name,
            self.player.character.get().name
        );
    }
}
