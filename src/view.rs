//! VIEW: letterbox transform between window pixels and logical game space

use glam::Vec2;

use crate::consts::{DESKTOP_VIEW, PHONE_BREAKPOINT, PHONE_VIEW};

/// Left and right touch zones split the width in thirds
const LEFT_ZONE_FRAC: f32 = 0.33;
const RIGHT_ZONE_FRAC: f32 = 0.66;
/// Throw button: the top of the right zone
const TOP_ZONE_FRAC: f32 = 0.35;

/// Letterboxed mapping of the logical playfield into a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Logical width (gw)
    pub gw: f32,
    /// Logical height (gh)
    pub gh: f32,
    pub scale: f32,
    /// Offset of the playfield inside the window (CSS pixels)
    pub ox: f32,
    pub oy: f32,
}

impl Default for View {
    fn default() -> Self {
        Self::for_window(DESKTOP_VIEW.0, DESKTOP_VIEW.1)
    }
}

impl View {
    /// Fit the logical playfield into a `w` x `h` window (CSS pixels).
    /// Small windows switch to the phone resolution.
    pub fn for_window(w: f32, h: f32) -> Self {
        let (gw, gh) = logical_size(w, h);
        let scale = if w > 0.0 && h > 0.0 {
            (w / gw).min(h / gh)
        } else {
            1.0
        };
        Self {
            gw,
            gh,
            scale,
            ox: ((w - gw * scale) / 2.0).max(0.0),
            oy: ((h - gh * scale) / 2.0).max(0.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.gw, self.gh)
    }

    pub fn screen_to_game(&self, p: Vec2) -> Vec2 {
        Vec2::new((p.x - self.ox) / self.scale, (p.y - self.oy) / self.scale)
    }

    pub fn game_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x * self.scale + self.ox, p.y * self.scale + self.oy)
    }

    pub fn in_bounds(&self, p: Vec2) -> bool {
        in_arena(p, self.size())
    }
}

/// Logical resolution for a window size
pub fn logical_size(w: f32, h: f32) -> (f32, f32) {
    if w.min(h) <= PHONE_BREAKPOINT {
        PHONE_VIEW
    } else {
        DESKTOP_VIEW
    }
}

/// Device pixel ratio used for the canvas backing store
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() { dpr.clamp(1.0, 2.0) } else { 1.0 }
}

pub fn in_arena(p: Vec2, arena: Vec2) -> bool {
    (0.0..=arena.x).contains(&p.x) && (0.0..=arena.y).contains(&p.y)
}

/// Horizontal thirds of the playfield used by touch controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchZone {
    Left,
    Middle,
    Right,
}

impl TouchZone {
    pub fn classify(p: Vec2, arena: Vec2) -> Self {
        if p.x < arena.x * LEFT_ZONE_FRAC {
            TouchZone::Left
        } else if p.x > arena.x * RIGHT_ZONE_FRAC {
            TouchZone::Right
        } else {
            TouchZone::Middle
        }
    }
}

/// The throw button corner
pub fn is_top_right(p: Vec2, arena: Vec2) -> bool {
    TouchZone::classify(p, arena) == TouchZone::Right && p.y < arena.y * TOP_ZONE_FRAC
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_desktop_letterbox() {
        // Wider than 16:9: bars on the left and right
        let v = View::for_window(1920.0, 900.0);
        assert_eq!((v.gw, v.gh), DESKTOP_VIEW);
        assert!((v.scale - 900.0 / 540.0).abs() < 1e-5);
        assert!(v.oy.abs() < 1e-3);
        assert!((v.ox - (1920.0 - 960.0 * v.scale) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_phone_zoom() {
        assert_eq!(logical_size(844.0, 390.0), PHONE_VIEW);
        assert_eq!(logical_size(520.0, 900.0), PHONE_VIEW);
        assert_eq!(logical_size(1280.0, 521.0), DESKTOP_VIEW);
    }

    #[test]
    fn test_bounds_and_letterbox_bars() {
        let v = View::for_window(1920.0, 900.0);
        assert!(!v.in_bounds(v.screen_to_game(Vec2::new(5.0, 450.0))));
        assert!(v.in_bounds(v.screen_to_game(Vec2::new(960.0, 450.0))));
    }

    #[test]
    fn test_dpr_clamp() {
        assert_eq!(clamp_dpr(0.5), 1.0);
        assert_eq!(clamp_dpr(3.0), 2.0);
        assert_eq!(clamp_dpr(1.5), 1.5);
        assert_eq!(clamp_dpr(f64::NAN), 1.0);
    }

    #[test]
    fn test_touch_zones() {
        let arena = Vec2::new(960.0, 540.0);
        assert_eq!(TouchZone::classify(Vec2::new(100.0, 300.0), arena), TouchZone::Left);
        assert_eq!(TouchZone::classify(Vec2::new(480.0, 300.0), arena), TouchZone::Middle);
        assert_eq!(TouchZone::classify(Vec2::new(900.0, 300.0), arena), TouchZone::Right);
        assert!(is_top_right(Vec2::new(900.0, 100.0), arena));
        assert!(!is_top_right(Vec2::new(900.0, 300.0), arena));
        assert!(!is_top_right(Vec2::new(480.0, 100.0), arena));
    }

    proptest! {
        #[test]
        fn screen_game_round_trip(w in 200.0f32..4000.0, h in 200.0f32..3000.0,
                                  gx in 0.0f32..1.0, gy in 0.0f32..1.0) {
            let v = View::for_window(w, h);
            let g = Vec2::new(gx * v.gw, gy * v.gh);
            let back = v.screen_to_game(v.game_to_screen(g));
            prop_assert!((back - g).length() < 0.01);
        }

        #[test]
        fn playfield_fits_window(w in 200.0f32..4000.0, h in 200.0f32..3000.0) {
            let v = View::for_window(w, h);
            prop_assert!(v.gw * v.scale <= w + 0.01);
            prop_assert!(v.gh * v.scale <= h + 0.01);
            // One axis always fills the window
            let fills = (v.gw * v.scale - w).abs() < 0.01 || (v.gh * v.scale - h).abs() < 0.01;
            prop_assert!(fills);
        }
    }
}
