//! Donation Drive: coins rain down, catch enough of them; coal takes one back

use glam::Vec2;
use rand::Rng;

use super::{PhaseCtx, PhaseStatus};
use crate::floor_y;
use crate::player_max_x;
use crate::sim::collision::Aabb;
use crate::sim::particles::Burst;
use crate::sim::state::GameEvent;

const PICKUP_SIZE: f32 = 14.0;
const COAL_CHANCE: f64 = 0.15;
const MIN_SPAWN_GAP: f32 = 0.45;
const MAX_SPAWN_GAP: f32 = 0.9;
const MIN_FALL_SPEED: f32 = 140.0;
const MAX_FALL_SPEED: f32 = 220.0;
/// Donations needed to finish the phase
pub const DONATION_TARGET: u32 = 20;
pub const COIN_POINTS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Coin,
    Coal,
}

/// Something falling from the ceiling
#[derive(Debug, Clone)]
pub struct Pickup {
    pub rect: Aabb,
    pub speed: f32,
    pub kind: PickupKind,
}

#[derive(Debug, Clone)]
pub struct DonationPhase {
    pub pickups: Vec<Pickup>,
    pub donations: u32,
    pub target: u32,
    /// Seconds until the next drop
    pub spawn_timer: f32,
    pub done: bool,
}

impl Default for DonationPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationPhase {
    pub fn new() -> Self {
        Self {
            pickups: Vec::new(),
            donations: 0,
            target: DONATION_TARGET,
            spawn_timer: 0.5,
            done: false,
        }
    }

    pub fn update(&mut self, ctx: &mut PhaseCtx<'_>, dt: f32) -> PhaseStatus {
        let floor = floor_y(ctx.arena.y);

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer += ctx.rng.random_range(MIN_SPAWN_GAP..=MAX_SPAWN_GAP);
            // Only where the player can reach
            let max_x = player_max_x(ctx.arena.x) + 30.0 - PICKUP_SIZE;
            let x = ctx.rng.random_range(40.0..=max_x.max(40.0));
            let kind = if ctx.rng.random_bool(COAL_CHANCE) {
                PickupKind::Coal
            } else {
                PickupKind::Coin
            };
            self.pickups.push(Pickup {
                rect: Aabb::new(x, -PICKUP_SIZE, PICKUP_SIZE, PICKUP_SIZE),
                speed: ctx.rng.random_range(MIN_FALL_SPEED..=MAX_FALL_SPEED),
                kind,
            });
        }

        let mut caught = Vec::new();
        self.pickups.retain_mut(|d| {
            d.rect.pos.y += d.speed * dt;
            if ctx.player.body.overlaps(&d.rect) {
                caught.push((d.kind, d.rect.center()));
                return false;
            }
            d.rect.top() < floor
        });

        for (kind, at) in caught {
            match kind {
                PickupKind::Coin => {
                    self.donations += 1;
                    *ctx.score += COIN_POINTS;
                    ctx.fx.emit(GameEvent::DonationCaught);
                    ctx.fx.burst(at, &Burst::GOLD);
                }
                PickupKind::Coal => {
                    self.donations = self.donations.saturating_sub(1);
                    ctx.fx.emit(GameEvent::CoalCaught);
                    ctx.fx.burst(at, &Burst::PUFF);
                }
            }
        }

        if !self.done && self.donations >= self.target {
            self.done = true;
            ctx.fx.emit(GameEvent::GoalReached);
        }
        if self.done {
            PhaseStatus::GoalMet
        } else {
            PhaseStatus::Running
        }
    }
}
