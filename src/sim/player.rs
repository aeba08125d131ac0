//! The player's body and platformer physics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::characters::CharacterId;
use super::collision::Aabb;
use crate::consts::*;

/// The player (screen space; the camera scrolls the world instead)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Aabb,
    pub vel: Vec2,
    pub on_ground: bool,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub character: CharacterId,
}

impl Player {
    pub fn new(character: CharacterId) -> Self {
        Self {
            body: Aabb::new(PLAYER_START_X, 0.0, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            on_ground: false,
            facing: 1.0,
            character,
        }
    }

    /// Back to the start position, keeping the character
    pub fn reset(&mut self) {
        *self = Self::new(self.character);
    }

    /// Set horizontal velocity from held directions and move, clamped to
    /// the player's band of the screen
    pub fn steer(&mut self, left: bool, right: bool, dt: f32, max_x: f32) {
        self.vel.x = 0.0;
        if left {
            self.vel.x -= MOVE_SPEED;
        }
        if right {
            self.vel.x += MOVE_SPEED;
        }

        if self.vel.x < -5.0 {
            self.facing = -1.0;
        } else if self.vel.x > 5.0 {
            self.facing = 1.0;
        }

        self.body.pos.x = (self.body.pos.x + self.vel.x * dt).clamp(PLAYER_MIN_X, max_x);
    }

    /// Integrate gravity, then rest on the floor if reached.
    /// Returns the bottom edge before the step (for landing checks).
    pub fn fall(&mut self, dt: f32, floor_y: f32) -> f32 {
        let prev_bottom = self.body.bottom();
        self.vel.y += GRAVITY * dt;
        self.body.pos.y += self.vel.y * dt;

        if self.body.bottom() >= floor_y {
            self.land_at(floor_y - self.body.size.y);
        } else {
            self.on_ground = false;
        }
        prev_bottom
    }

    /// Jump if standing on something
    pub fn try_jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = -JUMP_VELOCITY;
        self.on_ground = false;
        true
    }

    /// Snap onto a surface whose top puts the body at `y`
    pub fn land_at(&mut self, y: f32) {
        self.body.pos.y = y;
        self.vel.y = 0.0;
        self.on_ground = true;
    }

    /// Horizontal speed as a fraction of full run speed (for animation)
    pub fn run_amount(&self) -> f32 {
        (self.vel.x.abs() / MOVE_SPEED).min(1.0)
    }
}
