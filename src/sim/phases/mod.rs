//! Per-phase minigame state and update rules

pub mod carrot;
pub mod colouring;
pub mod dodge;
pub mod donation;
pub mod shot;

pub use carrot::{CarrotPhase, Crate, FallingCarrot};
pub use colouring::{ColouringPhase, Zone};
pub use dodge::{DodgePhase, Obstacle, ObstacleKind};
pub use donation::{DonationPhase, Pickup, PickupKind};
pub use shot::{Ball, ShotPhase};

use glam::Vec2;
use rand_pcg::Pcg32;

use super::levels::PhaseKind;
use super::player::Player;
use super::state::Fx;

/// What a phase needs from the rest of the game each tick
pub struct PhaseCtx<'a> {
    pub player: &'a mut Player,
    pub rng: &'a mut Pcg32,
    pub fx: &'a mut Fx,
    pub score: &'a mut u64,
    pub arena: Vec2,
    /// Global clock (seconds)
    pub time: f32,
    /// Previous bottom edge of the player, before this tick's gravity step
    pub prev_bottom: f32,
}

/// Outcome of a phase update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Running,
    /// Goal met; a `PhaseEnd::Goal` phase ends now
    GoalMet,
    /// The phase failed and must start over
    Restart,
}

/// Active phase state
#[derive(Debug, Clone)]
pub enum Phase {
    Carrot(CarrotPhase),
    Shot(ShotPhase),
    Colouring(ColouringPhase),
    Donation(DonationPhase),
    Dodge(DodgePhase),
}

impl Phase {
    /// Fresh state for a phase
    pub fn start(kind: PhaseKind, rng: &mut Pcg32, arena: Vec2) -> Self {
        match kind {
            PhaseKind::Carrot => Phase::Carrot(CarrotPhase::new()),
            PhaseKind::Shot => Phase::Shot(ShotPhase::new(arena)),
            PhaseKind::Colouring => Phase::Colouring(ColouringPhase::new(rng, arena)),
            PhaseKind::Donation => Phase::Donation(DonationPhase::new()),
            PhaseKind::Dodge => Phase::Dodge(DodgePhase::new()),
        }
    }

    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Carrot(_) => PhaseKind::Carrot,
            Phase::Shot(_) => PhaseKind::Shot,
            Phase::Colouring(_) => PhaseKind::Colouring,
            Phase::Donation(_) => PhaseKind::Donation,
            Phase::Dodge(_) => PhaseKind::Dodge,
        }
    }

    /// Horizontal scroll of world-space objects
    pub fn camera_x(&self) -> f32 {
        match self {
            Phase::Carrot(p) => p.cam_x,
            Phase::Dodge(p) => p.cam_x,
            _ => 0.0,
        }
    }

    /// Run the phase's own mechanics after the shared player physics
    pub fn update(&mut self, ctx: &mut PhaseCtx<'_>, dt: f32) -> PhaseStatus {
        match self {
            Phase::Carrot(p) => p.update(ctx, dt),
            Phase::Shot(p) => p.update(ctx, dt),
            Phase::Colouring(p) => p.update(ctx),
            Phase::Donation(p) => p.update(ctx, dt),
            Phase::Dodge(p) => p.update(ctx, dt),
        }
    }

    /// Primary action button (only the shot phase uses it)
    pub fn action(&mut self, ctx: &mut PhaseCtx<'_>) {
        if let Phase::Shot(p) = self {
            p.throw(ctx);
        }
    }
}
