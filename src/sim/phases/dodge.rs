//! Hallway Rush: obstacles roll in along the floor; jump them or lose a heart

use glam::Vec2;
use rand::Rng;

use super::{PhaseCtx, PhaseStatus};
use crate::consts::CULL_MARGIN;
use crate::floor_y;
use crate::sim::collision::{Aabb, on_screen};
use crate::sim::particles::Burst;
use crate::sim::state::GameEvent;

/// Camera scroll speed, px/s
pub const SCROLL_SPEED: f32 = 260.0;
const FIRST_OBSTACLE_AHEAD: f32 = 200.0;
const SPAWN_AHEAD: f32 = 240.0;
const MIN_GAP: f32 = 260.0;
const MAX_GAP: f32 = 460.0;
const PRUNE_BEHIND: f32 = 200.0;
pub const MAX_HEARTS: u8 = 3;
/// Grace period after a hit, seconds
pub const INVULNERABLE_TIME: f32 = 1.2;
pub const CLEAR_POINTS: u64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Snowball,
    Cart,
}

impl ObstacleKind {
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Snowball => Vec2::new(26.0, 26.0),
            ObstacleKind::Cart => Vec2::new(44.0, 30.0),
        }
    }
}

/// An obstacle on the floor (x is world space)
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Aabb,
    pub kind: ObstacleKind,
    /// Already scored as jumped (or already hit the player)
    pub cleared: bool,
}

#[derive(Debug, Clone)]
pub struct DodgePhase {
    pub cam_x: f32,
    pub obstacles: Vec<Obstacle>,
    pub next_x: Option<f32>,
    pub hearts: u8,
    pub invulnerable: f32,
    pub cleared: u32,
}

impl Default for DodgePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl DodgePhase {
    pub fn new() -> Self {
        Self {
            cam_x: 0.0,
            obstacles: Vec::new(),
            next_x: None,
            hearts: MAX_HEARTS,
            invulnerable: 0.0,
            cleared: 0,
        }
    }

    pub fn update(&mut self, ctx: &mut PhaseCtx<'_>, dt: f32) -> PhaseStatus {
        let floor = floor_y(ctx.arena.y);
        self.cam_x += SCROLL_SPEED * dt;
        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }

        self.spawn_ahead(ctx, floor);

        let player = ctx.player.body;
        let mut hit_at = None;
        for o in &mut self.obstacles {
            let screen = o.rect.shifted_x(-self.cam_x);
            if !on_screen(screen.left(), ctx.arena.x, CULL_MARGIN) || o.cleared {
                continue;
            }
            if player.overlaps(&screen) {
                // An obstacle that hit you can't also be scored as jumped
                o.cleared = true;
                if self.invulnerable <= 0.0 && hit_at.is_none() {
                    hit_at = Some(screen.center());
                }
            } else if screen.right() < player.left() {
                o.cleared = true;
                self.cleared += 1;
                *ctx.score += CLEAR_POINTS;
                ctx.fx.emit(GameEvent::ObstacleCleared);
            }
        }

        let cutoff = self.cam_x - PRUNE_BEHIND;
        self.obstacles.retain(|o| o.rect.right() > cutoff);

        if let Some(at) = hit_at {
            self.hearts = self.hearts.saturating_sub(1);
            self.invulnerable = INVULNERABLE_TIME;
            ctx.fx.emit(GameEvent::ObstacleHit {
                hearts_left: self.hearts,
            });
            ctx.fx.burst(at, &Burst::HIT);
            if self.hearts == 0 {
                ctx.fx.emit(GameEvent::PhaseRestarted);
                return PhaseStatus::Restart;
            }
        }
        PhaseStatus::Running
    }

    fn spawn_ahead(&mut self, ctx: &mut PhaseCtx<'_>, floor: f32) {
        let mut next_x = self
            .next_x
            .unwrap_or(self.cam_x + ctx.arena.x + FIRST_OBSTACLE_AHEAD);
        let spawn_to = self.cam_x + ctx.arena.x + SPAWN_AHEAD;
        while next_x < spawn_to {
            let kind = if ctx.rng.random_bool(0.5) {
                ObstacleKind::Snowball
            } else {
                ObstacleKind::Cart
            };
            let size = kind.size();
            self.obstacles.push(Obstacle {
                rect: Aabb::new(next_x, floor - size.y, size.x, size.y),
                kind,
                cleared: false,
            });
            next_x += ctx.rng.random_range(MIN_GAP..=MAX_GAP);
        }
        self.next_x = Some(next_x);
    }

    /// Blink the player while invulnerable
    pub fn player_visible(&self, time: f32) -> bool {
        self.invulnerable <= 0.0 || (time * 12.0).fract() < 0.5
    }
}
