//! Carrot in a Box: crates scroll past; landing on one opens it

use glam::Vec2;
use rand::Rng;

use super::{PhaseCtx, PhaseStatus};
use crate::consts::CULL_MARGIN;
use crate::floor_y;
use crate::sim::collision::{Aabb, land_on_top, on_screen};
use crate::sim::particles::Burst;
use crate::sim::state::GameEvent;

/// Camera scroll speed, px/s
pub const SCROLL_SPEED: f32 = 220.0;
/// Crates are generated this far past the right edge
const SPAWN_AHEAD: f32 = 240.0;
/// Crates this far behind the camera are dropped
const PRUNE_BEHIND: f32 = 320.0;
const FIRST_CRATE_X: f32 = 360.0;
const DECOY_CHANCE: f64 = 0.20;
const CARROT_CHANCE: f64 = 0.30;
/// How far below a crate's top the feet may have been and still land
const LANDING_TOLERANCE: f32 = 8.0;
const CARROT_POP_VELOCITY: f32 = -420.0;
const CARROT_GRAVITY: f32 = 1400.0;
const CARROT_SIZE: Vec2 = Vec2::new(16.0, 12.0);
pub const CARROT_POINTS: u64 = 100;

/// A crate standing on the floor (x is world space)
#[derive(Debug, Clone)]
pub struct Crate {
    pub rect: Aabb,
    pub opened: bool,
    pub decoy: bool,
    pub has_carrot: bool,
}

/// A carrot popped out of a crate (x is world space)
#[derive(Debug, Clone)]
pub struct FallingCarrot {
    pub rect: Aabb,
    pub vel_y: f32,
}

#[derive(Debug, Clone)]
pub struct CarrotPhase {
    pub cam_x: f32,
    pub crates: Vec<Crate>,
    pub carrots: Vec<FallingCarrot>,
    pub next_crate_x: f32,
}

impl Default for CarrotPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl CarrotPhase {
    pub fn new() -> Self {
        Self {
            cam_x: 0.0,
            crates: Vec::new(),
            carrots: Vec::new(),
            next_crate_x: FIRST_CRATE_X,
        }
    }

    pub fn update(&mut self, ctx: &mut PhaseCtx<'_>, dt: f32) -> PhaseStatus {
        let floor = floor_y(ctx.arena.y);
        self.cam_x += SCROLL_SPEED * dt;

        self.spawn_ahead(ctx, floor);
        self.update_carrots(ctx, dt, floor);

        // Land on crates to open them
        for i in 0..self.crates.len() {
            let screen = self.crates[i].rect.shifted_x(-self.cam_x);
            if !on_screen(screen.left(), ctx.arena.x, CULL_MARGIN) {
                continue;
            }
            let landed = land_on_top(
                &ctx.player.body,
                ctx.prev_bottom,
                ctx.player.vel.y,
                &screen,
                LANDING_TOLERANCE,
            );
            if let Some(y) = landed {
                ctx.player.land_at(y);
                self.open_crate(i, ctx);
            }
        }

        let cutoff = self.cam_x - PRUNE_BEHIND;
        self.crates.retain(|c| c.rect.left() > cutoff);

        PhaseStatus::Running
    }

    fn spawn_ahead(&mut self, ctx: &mut PhaseCtx<'_>, floor: f32) {
        let spawn_to = self.cam_x + ctx.arena.x + SPAWN_AHEAD;
        while self.next_crate_x < spawn_to {
            let w = 52.0 + ctx.rng.random_range(0..18) as f32;
            let h = 32.0 + ctx.rng.random_range(0..12) as f32;
            let decoy = ctx.rng.random_bool(DECOY_CHANCE);
            let has_carrot = !decoy && ctx.rng.random_bool(CARROT_CHANCE);

            self.crates.push(Crate {
                rect: Aabb::new(self.next_crate_x, floor - h, w, h),
                opened: false,
                decoy,
                has_carrot,
            });
            self.next_crate_x += 140.0 + ctx.rng.random_range(0..140) as f32;
        }
    }

    fn open_crate(&mut self, index: usize, ctx: &mut PhaseCtx<'_>) {
        let cam_x = self.cam_x;
        let c = &mut self.crates[index];
        if c.opened {
            return;
        }
        c.opened = true;
        let top_center = Vec2::new(c.rect.center().x - cam_x, c.rect.top());

        if c.decoy {
            ctx.fx.emit(GameEvent::DecoyOpened);
            ctx.fx.burst(top_center, &Burst::PUFF);
            return;
        }

        ctx.fx.emit(GameEvent::BoxOpened);
        if c.has_carrot {
            c.has_carrot = false;
            self.carrots.push(FallingCarrot {
                rect: Aabb::new(
                    c.rect.center().x - CARROT_SIZE.x / 2.0,
                    c.rect.top() - 10.0,
                    CARROT_SIZE.x,
                    CARROT_SIZE.y,
                ),
                vel_y: CARROT_POP_VELOCITY,
            });
        }
    }

    fn update_carrots(&mut self, ctx: &mut PhaseCtx<'_>, dt: f32, floor: f32) {
        let cam_x = self.cam_x;
        self.carrots.retain_mut(|carrot| {
            carrot.vel_y += CARROT_GRAVITY * dt;
            carrot.rect.pos.y += carrot.vel_y * dt;
            if carrot.rect.top() > floor + 200.0 {
                return false;
            }

            let screen = carrot.rect.shifted_x(-cam_x);
            if ctx.player.body.overlaps(&screen) {
                *ctx.score += CARROT_POINTS;
                ctx.fx.emit(GameEvent::CarrotCollected);
                ctx.fx.burst(screen.center(), &Burst::CARROT);
                return false;
            }
            true
        });
    }
}
