//! Christmas Colouring: a grid of cells on the floor, filled by touching them

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{PhaseCtx, PhaseStatus};
use crate::floor_y;
use crate::sim::collision::Aabb;
use crate::sim::particles::Burst;
use crate::sim::state::GameEvent;

const COLS: u32 = 12;
const ROWS: u32 = 6;
const CELL: f32 = 18.0;
const CELL_GAP: f32 = 2.0;
/// Chance that a border cell is left out, to make the page look hand drawn
const BORDER_SKIP_CHANCE: f64 = 0.35;
/// Page is centred on this fraction of the width
const PAGE_CENTER_FRAC: f32 = 0.40;
const PAGE_FLOOR_GAP: f32 = 10.0;
const MIN_TARGET: u32 = 16;
const TARGET_FRACTION: f32 = 0.70;

/// One fillable cell
#[derive(Debug, Clone)]
pub struct Zone {
    pub rect: Aabb,
    pub filled: bool,
}

#[derive(Debug, Clone)]
pub struct ColouringPhase {
    pub zones: Vec<Zone>,
    pub progress: u32,
    pub target: u32,
    pub done: bool,
    /// Top-left of the page for the arena the cells were last laid out in
    pub origin: Vec2,
}

/// Cells needed to finish a page of `zone_count` cells
pub fn fill_target(zone_count: usize) -> u32 {
    MIN_TARGET.max((zone_count as f32 * TARGET_FRACTION).floor() as u32)
}

/// Top-left corner of the page: centred on `PAGE_CENTER_FRAC` of the width,
/// its bottom row just above the floor
fn page_origin(arena: Vec2) -> Vec2 {
    let page = Vec2::new(COLS as f32 * CELL, ROWS as f32 * CELL);
    Vec2::new(
        (arena.x * PAGE_CENTER_FRAC - page.x / 2.0).round(),
        (floor_y(arena.y) - page.y - PAGE_FLOOR_GAP).round(),
    )
}

impl ColouringPhase {
    pub fn new(rng: &mut Pcg32, arena: Vec2) -> Self {
        let origin = page_origin(arena);

        let mut zones = Vec::with_capacity((COLS * ROWS) as usize);
        for r in 0..ROWS {
            for c in 0..COLS {
                let border = r == 0 || r == ROWS - 1 || c == 0 || c == COLS - 1;
                if border && rng.random_bool(BORDER_SKIP_CHANCE) {
                    continue;
                }
                zones.push(Zone {
                    rect: Aabb::new(
                        origin.x + c as f32 * CELL,
                        origin.y + r as f32 * CELL,
                        CELL - CELL_GAP,
                        CELL - CELL_GAP,
                    ),
                    filled: false,
                });
            }
        }

        let target = fill_target(zones.len());
        Self {
            zones,
            progress: 0,
            target,
            done: false,
            origin,
        }
    }

    /// Keep the page standing on the floor after the view changes size.
    /// Filled cells stay filled.
    pub fn reanchor(&mut self, arena: Vec2) {
        let origin = page_origin(arena);
        let delta = origin - self.origin;
        if delta == Vec2::ZERO {
            return;
        }
        for z in &mut self.zones {
            z.rect.pos += delta;
        }
        self.origin = origin;
    }

    /// Bounding box of the page (for the paper backdrop)
    pub fn page_bounds(&self) -> Option<Aabb> {
        let first = self.zones.first()?;
        let (mut min, mut max) = (first.rect.pos, first.rect.pos + first.rect.size);
        for z in &self.zones {
            min = min.min(z.rect.pos);
            max = max.max(z.rect.pos + z.rect.size);
        }
        Some(Aabb {
            pos: min,
            size: max - min,
        })
    }

    pub fn update(&mut self, ctx: &mut PhaseCtx<'_>) -> PhaseStatus {
        self.reanchor(ctx.arena);
        for zone in self.zones.iter_mut().filter(|z| !z.filled) {
            if ctx.player.body.overlaps(&zone.rect) {
                zone.filled = true;
                self.progress += 1;
                ctx.fx.emit(GameEvent::ZoneFilled {
                    progress: self.progress,
                });
            }
        }

        if !self.done && self.progress >= self.target {
            self.done = true;
            ctx.fx.emit(GameEvent::GoalReached);
            ctx.fx.burst(ctx.player.body.center(), &Burst::SPARKLE);
        }

        if self.done {
            PhaseStatus::GoalMet
        } else {
            PhaseStatus::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::characters::CharacterId;
    use crate::sim::player::Player;
    use crate::sim::state::Fx;
    use rand::SeedableRng;

    const ARENA: Vec2 = Vec2::new(960.0, 540.0);

    #[test]
    fn test_target_has_floor_and_fraction() {
        assert_eq!(fill_target(10), 16);
        assert_eq!(fill_target(72), 50);
        assert_eq!(fill_target(60), 42);
    }

    #[test]
    fn test_page_sits_above_floor() {
        let mut rng = Pcg32::seed_from_u64(5);
        let phase = ColouringPhase::new(&mut rng, ARENA);
        let floor = floor_y(ARENA.y);
        // Interior cells are never skipped
        assert!(phase.zones.len() >= ((COLS - 2) * (ROWS - 2)) as usize);
        assert!(phase.zones.len() <= (COLS * ROWS) as usize);
        for z in &phase.zones {
            assert!(z.rect.bottom() <= floor - PAGE_FLOOR_GAP + 1.0);
            assert!(!z.filled);
        }
        let bounds = phase.page_bounds().map(|b| b.center().x).unwrap_or_default();
        assert!((bounds - ARENA.x * PAGE_CENTER_FRAC).abs() < CELL);
    }

    #[test]
    fn test_walking_across_fills_and_finishes() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut phase = ColouringPhase::new(&mut rng, ARENA);
        let mut player = Player::new(CharacterId(1));
        let mut fx = Fx::new(0);
        let mut score = 0;
        let bounds = phase.page_bounds().unwrap_or_default();

        let mut status = PhaseStatus::Running;
        // Sweep the player body over every row band of the page
        let mut y = bounds.top() - 20.0;
        while y < bounds.bottom() && status == PhaseStatus::Running {
            let mut x = bounds.left() - 30.0;
            while x < bounds.right() {
                player.body.pos = Vec2::new(x, y);
                let mut ctx = PhaseCtx {
                    player: &mut player,
                    rng: &mut rng,
                    fx: &mut fx,
                    score: &mut score,
                    arena: ARENA,
                    time: 0.0,
                    prev_bottom: 0.0,
                };
                status = phase.update(&mut ctx);
                x += 8.0;
            }
            y += 30.0;
        }

        assert_eq!(status, PhaseStatus::GoalMet);
        assert!(phase.done);
        assert!(phase.progress >= phase.target);
        assert_eq!(
            fx.events.iter().filter(|e| **e == GameEvent::GoalReached).count(),
            1
        );
    }

    #[test]
    fn test_page_follows_floor_after_resize() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut phase = ColouringPhase::new(&mut rng, ARENA);
        phase.zones[0].filled = true;
        phase.progress = 1;

        let phone = Vec2::new(560.0, 315.0);
        let mut player = Player::new(CharacterId(0));
        player.body.pos = Vec2::new(-500.0, -500.0);
        let mut fx = Fx::new(0);
        let mut score = 0;
        let mut ctx = PhaseCtx {
            player: &mut player,
            rng: &mut rng,
            fx: &mut fx,
            score: &mut score,
            arena: phone,
            time: 0.0,
            prev_bottom: 0.0,
        };
        phase.update(&mut ctx);

        let floor = floor_y(phone.y);
        for z in &phase.zones {
            assert!(z.rect.bottom() <= floor - PAGE_FLOOR_GAP + 1.0);
            assert!(z.rect.top() > 0.0);
        }
        let center = phase.page_bounds().map(|b| b.center().x).unwrap_or_default();
        assert!((center - phone.x * PAGE_CENTER_FRAC).abs() < CELL);
        assert!(phase.zones[0].filled);
        assert_eq!(phase.progress, 1);

        // The bottom row is reachable standing on the new floor
        let bottom_row = phase.zones.iter().filter(|z| !z.filled).map(|z| z.rect).find(|r| {
            (r.bottom() - (floor - PAGE_FLOOR_GAP - CELL_GAP)).abs() < 1.0
        });
        let Some(cell) = bottom_row else {
            panic!("no unfilled bottom-row cell");
        };
        player.body.pos = Vec2::new(cell.left(), floor - player.body.size.y);
        let mut ctx = PhaseCtx {
            player: &mut player,
            rng: &mut rng,
            fx: &mut fx,
            score: &mut score,
            arena: phone,
            time: 0.0,
            prev_bottom: 0.0,
        };
        phase.update(&mut ctx);
        assert!(phase.progress > 1);
        assert!(phase.zones.iter().any(|z| z.filled && z.rect == cell));
    }
}
