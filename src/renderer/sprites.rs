//! Pixel sprites built from coloured rectangles

use super::Frame;
use crate::sim::collision::Aabb;
use crate::sim::{Palette, Player};

const EYE: &str = "#1A1A1A";
const SHADOW: &str = "rgba(0,0,0,0.25)";

/// Chibi player: big head, small body, legs that step while running
pub fn chibi(frame: &mut Frame, player: &Player, palette: &Palette, time: f32, animate: bool) {
    let speed = if animate { player.run_amount() } else { 0.0 };
    let swing = (time * 14.0).sin() * 2.0 * speed;
    let bob = swing.round();

    let body = &player.body;
    let px = body.pos.x.round();
    let py = (body.pos.y + bob).round();

    let (head_w, head_h) = (18.0, 16.0);
    let (body_w, body_h) = (18.0, 14.0);
    let cx = px + ((body.size.x - head_w) / 2.0).round();
    let head_y = py + 2.0;
    let body_y = head_y + head_h;
    let leg_y = body_y + body_h;

    frame.rect(px + 6.0, py + body.size.y - 3.0, body.size.x - 12.0, 3.0, SHADOW);

    frame.rect(cx, head_y, head_w, head_h, palette.skin);
    frame.rect(cx, head_y, head_w, 6.0, palette.hair);

    // Eyes look the way the player faces
    let eye_y = head_y + 8.0;
    let (e1, e2) = if player.facing > 0.0 { (10.0, 13.0) } else { (3.0, 6.0) };
    frame.rect(cx + e1, eye_y, 2.0, 2.0, EYE);
    frame.rect(cx + e2, eye_y, 2.0, 2.0, EYE);

    let bx = px + ((body.size.x - body_w) / 2.0).round();
    frame.rect(bx, body_y, body_w, body_h, palette.shirt);
    frame.rect(bx, body_y + body_h - 4.0, body_w, 4.0, palette.pants);

    let step = swing.round();
    frame.rect(bx + 2.0, leg_y + (-step).max(0.0), 6.0, 9.0, palette.pants);
    frame.rect(bx + body_w - 8.0, leg_y + step.max(0.0), 6.0, 9.0, palette.pants);
}

/// Select screen card (48x52) with a front-facing head and shirt
pub fn portrait(frame: &mut Frame, x: f32, y: f32, palette: &Palette) {
    frame.rect(x, y, 48.0, 52.0, "rgba(255,255,255,0.18)");
    frame.rect(x + 2.0, y + 2.0, 44.0, 48.0, "rgba(0,0,0,0.45)");
    frame.rect(x + 14.0, y + 10.0, 20.0, 16.0, palette.skin);
    frame.rect(x + 14.0, y + 10.0, 20.0, 6.0, palette.hair);
    frame.rect(x + 20.0, y + 18.0, 2.0, 2.0, EYE);
    frame.rect(x + 26.0, y + 18.0, 2.0, 2.0, EYE);
    frame.rect(x + 14.0, y + 28.0, 20.0, 14.0, palette.shirt);
    frame.rect(x + 14.0, y + 38.0, 20.0, 4.0, palette.pants);
}

/// 16x12 carrot: leaves on top, tapering orange root
pub fn carrot(frame: &mut Frame, x: f32, y: f32) {
    const ROWS: [(f32, f32, &str); 6] = [
        (6.0, 4.0, "#3CFF74"),
        (5.0, 6.0, "#2FE35F"),
        (4.0, 8.0, "#FF8A2A"),
        (5.0, 6.0, "#FF7A1A"),
        (6.0, 4.0, "#FF6A0A"),
        (7.0, 2.0, "#FF5A00"),
    ];
    for (i, (dx, w, color)) in ROWS.iter().enumerate() {
        frame.rect(x + dx, y + i as f32 * 2.0, *w, 2.0, color);
    }
}

pub fn crate_box(frame: &mut Frame, rect: &Aabb, opened: bool, decoy: bool) {
    let (base, dark) = if opened {
        ("rgba(255,214,120,0.25)", "rgba(120,70,10,0.20)")
    } else {
        ("#FFB74A", "#B86A12")
    };
    let (x, y, w, h) = (rect.pos.x, rect.pos.y, rect.size.x, rect.size.y);
    frame.rect(x, y, w, h, base);
    for i in 1..=3 {
        let slat_y = y + h * i as f32 / 4.0;
        frame.rect(x + 6.0, slat_y - 2.0, w - 12.0, 3.0, dark);
    }
    if opened && decoy {
        frame.rect(x + w / 2.0 - 10.0, y + h / 2.0 - 2.0, 20.0, 4.0, SHADOW);
    }
}

pub fn cup(frame: &mut Frame, rect: &Aabb) {
    let (x, y, w, h) = (rect.pos.x, rect.pos.y, rect.size.x, rect.size.y);
    frame.rect(x, y, w, h, "rgba(255,255,255,0.88)");
    frame.rect(x + 3.0, y + 3.0, w - 6.0, h - 6.0, "rgba(0,0,0,0.35)");
    frame.rect(x - 2.0, y - 2.0, w + 4.0, 3.0, "rgba(255,255,255,0.92)");
}

pub fn ball(frame: &mut Frame, x: f32, y: f32, radius: f32) {
    frame.rect(x - radius, y - radius, radius * 2.0, radius * 2.0, "rgba(255,255,255,0.92)");
}

pub fn coin(frame: &mut Frame, rect: &Aabb) {
    let (x, y, w, h) = (rect.pos.x, rect.pos.y, rect.size.x, rect.size.y);
    frame.rect(x + 2.0, y, w - 4.0, h, "#FFD24D");
    frame.rect(x, y + 2.0, w, h - 4.0, "#FFD24D");
    frame.rect(x + w / 2.0 - 1.0, y + 3.0, 2.0, h - 6.0, "#B88A12");
}

pub fn coal(frame: &mut Frame, rect: &Aabb) {
    let (x, y, w, h) = (rect.pos.x, rect.pos.y, rect.size.x, rect.size.y);
    frame.rect(x + 1.0, y + 1.0, w - 2.0, h - 2.0, "#2A2A2A");
    frame.rect(x + 3.0, y + 3.0, 3.0, 2.0, "#5A5A5A");
}

pub fn snowball(frame: &mut Frame, rect: &Aabb) {
    let (x, y, w, h) = (rect.pos.x, rect.pos.y, rect.size.x, rect.size.y);
    frame.rect(x + 4.0, y, w - 8.0, h, "#EAF4FF");
    frame.rect(x, y + 4.0, w, h - 8.0, "#EAF4FF");
    frame.rect(x + 4.0, y + h - 5.0, w - 8.0, 3.0, "#B9CDE0");
}

pub fn cart(frame: &mut Frame, rect: &Aabb) {
    let (x, y, w, h) = (rect.pos.x, rect.pos.y, rect.size.x, rect.size.y);
    frame.rect(x, y, w, h - 8.0, "#9AA7B5");
    frame.rect(x + 3.0, y + 3.0, w - 6.0, 4.0, "#5E6B78");
    frame.rect(x + 4.0, y + h - 8.0, 8.0, 8.0, "#2B2B2B");
    frame.rect(x + w - 12.0, y + h - 8.0, 8.0, 8.0, "#2B2B2B");
}

/// 12x10 heart for the HUD
pub fn heart(frame: &mut Frame, x: f32, y: f32, full: bool) {
    let color = if full { "#FF5A7A" } else { "rgba(255,255,255,0.20)" };
    frame.rect(x, y + 2.0, 12.0, 4.0, color);
    frame.rect(x + 1.0, y, 4.0, 2.0, color);
    frame.rect(x + 7.0, y, 4.0, 2.0, color);
    frame.rect(x + 2.0, y + 6.0, 8.0, 2.0, color);
    frame.rect(x + 4.0, y + 8.0, 4.0, 2.0, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCmd;
    use crate::sim::CharacterId;

    fn eye_xs(frame: &Frame) -> Vec<f32> {
        frame
            .cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect { x, color, .. } if *color == EYE => Some(*x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_eyes_follow_facing() {
        let mut player = Player::new(CharacterId(0));
        let palette = player.character.get().palette;

        let mut right = Frame::new(960.0, 540.0);
        chibi(&mut right, &player, &palette, 0.0, true);

        player.facing = -1.0;
        let mut left = Frame::new(960.0, 540.0);
        chibi(&mut left, &player, &palette, 0.0, true);

        let (r, l) = (eye_xs(&right), eye_xs(&left));
        assert_eq!(r.len(), 2);
        assert!(r[0] > l[0]);
    }

    #[test]
    fn test_still_player_does_not_bob() {
        let player = Player::new(CharacterId(1));
        let palette = player.character.get().palette;
        let mut a = Frame::new(960.0, 540.0);
        let mut b = Frame::new(960.0, 540.0);
        chibi(&mut a, &player, &palette, 0.1, true);
        chibi(&mut b, &player, &palette, 0.7, true);
        assert_eq!(a.cmds, b.cmds);
    }

    #[test]
    fn test_carrot_is_six_rows() {
        let mut frame = Frame::new(960.0, 540.0);
        carrot(&mut frame, 10.0, 10.0);
        assert_eq!(frame.rect_count(), 6);
    }
}
