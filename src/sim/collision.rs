//! Axis-aligned box collision and platform landing
//!
//! Everything in the game is a rectangle: the player, crates, carrots, the
//! cup, colouring cells, coins and obstacles. Screen y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square box of side `2 * radius` centred on `center`
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Grow the box by `pad` on every side
    pub fn padded(&self, pad: f32) -> Aabb {
        Aabb {
            pos: self.pos - Vec2::splat(pad),
            size: self.size + Vec2::splat(pad * 2.0),
        }
    }

    /// Shift horizontally (world space -> screen space uses `-cam_x`)
    pub fn shifted_x(&self, dx: f32) -> Aabb {
        Aabb {
            pos: Vec2::new(self.pos.x + dx, self.pos.y),
            size: self.size,
        }
    }
}

/// Land a falling body on top of a platform.
///
/// The body must be moving down (or resting), overlap the platform, and its
/// bottom edge on the previous step must have been no more than `tolerance`
/// below the platform top. Returns the y the body should snap to.
pub fn land_on_top(
    body: &Aabb,
    prev_bottom: f32,
    vel_y: f32,
    platform: &Aabb,
    tolerance: f32,
) -> Option<f32> {
    let falling = vel_y >= 0.0;
    let came_from_above = prev_bottom <= platform.top() + tolerance;
    if falling && came_from_above && body.overlaps(platform) {
        Some(platform.top() - body.size.y)
    } else {
        None
    }
}

/// True when a world-space x lies in the visible band around the camera
#[inline]
pub fn on_screen(screen_x: f32, arena_width: f32, margin: f32) -> bool {
    screen_x >= -margin && screen_x <= arena_width + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_and_touching_edges() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
        // Sharing an edge is not an overlap
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_padded_catches_near_miss() {
        let cup = Aabb::new(100.0, 100.0, 30.0, 18.0);
        let ball = Aabb::around(Vec2::new(97.0, 110.0), 1.0);
        assert!(!ball.overlaps(&cup));
        assert!(ball.overlaps(&cup.padded(4.0)));
    }

    #[test]
    fn test_land_on_top_from_above() {
        let platform = Aabb::new(100.0, 200.0, 60.0, 40.0);
        // Body sunk 5px into the platform after a step, was above before
        let body = Aabb::new(110.0, 165.0, 30.0, 40.0);
        let y = land_on_top(&body, 198.0, 120.0, &platform, 8.0);
        assert_eq!(y, Some(160.0));
    }

    #[test]
    fn test_land_on_top_rejects_side_entry() {
        let platform = Aabb::new(100.0, 200.0, 60.0, 40.0);
        // Previous bottom well below the top: walked in from the side
        let body = Aabb::new(95.0, 190.0, 30.0, 40.0);
        assert_eq!(land_on_top(&body, 230.0, 0.0, &platform, 8.0), None);
    }

    #[test]
    fn test_land_on_top_rejects_rising_body() {
        let platform = Aabb::new(100.0, 200.0, 60.0, 40.0);
        let body = Aabb::new(110.0, 165.0, 30.0, 40.0);
        assert_eq!(land_on_top(&body, 198.0, -300.0, &platform, 8.0), None);
    }

    #[test]
    fn test_on_screen_band() {
        assert!(on_screen(-100.0, 960.0, 160.0));
        assert!(!on_screen(-200.0, 960.0, 160.0));
        assert!(!on_screen(1200.0, 960.0, 160.0));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..200.0, 1.0f32..200.0)
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn landing_rests_exactly_on_top(
            px in -100.0f32..100.0,
            top in 100.0f32..400.0,
            sink in 0.0f32..8.0,
        ) {
            let platform = Aabb::new(0.0, top, 60.0, 40.0);
            let body = Aabb::new(px.clamp(-25.0, 55.0), top - 40.0 + sink, 30.0, 40.0);
            if let Some(y) = land_on_top(&body, top, 50.0, &platform, 8.0) {
                prop_assert!((y + body.size.y - platform.top()).abs() < 1e-3);
            }
        }
    }
}
