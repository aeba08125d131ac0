//! Scene layout: what each screen shows

use super::{Align, Frame, TextStyle, sprites};
use crate::consts::CULL_MARGIN;
use crate::floor_y;
use crate::highscores::BestScores;
use crate::sim::collision::on_screen;
use crate::sim::phases::{ObstacleKind, Phase, PickupKind};
use crate::sim::{GameState, LEVELS, ROSTER, Screen};

const BACKGROUND: &str = "#06101A";
const FLOOR: &str = "rgba(255,255,255,0.10)";
const HUD_MARGIN: f32 = 16.0;
const PORTRAIT_SPACING: f32 = 140.0;

const HUD: TextStyle = TextStyle::new(16.0, 700, Align::Left);
const HINT: TextStyle = TextStyle::new(13.0, 700, Align::Right).alpha(0.70);

/// Build the draw list for the current state
pub fn build_frame(state: &GameState, best: &BestScores, reduced_motion: bool) -> Frame {
    let mut frame = Frame::new(state.arena.x, state.arena.y);
    match state.screen {
        Screen::Title => title(&mut frame, best),
        Screen::Select => select(&mut frame, state),
        Screen::Level => level(&mut frame, state, best, reduced_motion),
    }
    frame
}

fn title(frame: &mut Frame, best: &BestScores) {
    let gh = frame.gh;
    frame.centered("A Very Trojan Christmas", gh * 0.35, 34.0, 0.95);
    frame.centered("Tap / Press Enter to start", gh * 0.45, 18.0, 0.85);

    let bests: Vec<String> = LEVELS
        .iter()
        .filter_map(|l| best.best(l.number).map(|b| format!("L{} best: {}", l.number, b.score)))
        .collect();
    if !bests.is_empty() {
        frame.centered(bests.join("  "), gh * 0.55, 14.0, 0.6);
    }
}

fn select(frame: &mut Frame, state: &GameState) {
    let (gw, gh) = (frame.gw, frame.gh);
    frame.centered("Choose Your Character", gh * 0.18, 28.0, 0.95);
    let chosen = state.selected.get();
    frame.centered(format!("{} - {}", chosen.name, chosen.tagline), gh * 0.26, 16.0, 0.9);

    // Narrow phone views squeeze the row together
    let spacing = PORTRAIT_SPACING.min((gw - 64.0) / ROSTER.len() as f32);
    let total = spacing * (ROSTER.len() - 1) as f32;
    let start_x = (gw / 2.0 - total / 2.0).round();
    let y = (gh * 0.55 - 26.0).round();

    for (i, c) in ROSTER.iter().enumerate() {
        let x = start_x + i as f32 * spacing - 24.0;
        let selected = i == state.selected.0 % ROSTER.len();
        if selected {
            frame.rect(x - 6.0, y - 6.0, 60.0, 64.0, "rgba(255,255,255,0.22)");
        }
        sprites::portrait(frame, x, y, &c.palette);
        let (size, alpha) = if selected { (13.0, 0.95) } else { (12.0, 0.65) };
        frame.text(
            c.name,
            x + 24.0,
            y + 70.0,
            TextStyle::new(size, 700, Align::Center).alpha(alpha),
        );
    }

    frame.centered("← / → to choose • Enter to play", gh * 0.85, 16.0, 0.85);
    frame.centered("Tap left/right to choose • Tap center to play", gh * 0.90, 14.0, 0.6);
}

fn level(frame: &mut Frame, state: &GameState, best: &BestScores, reduced_motion: bool) {
    let (gw, gh) = (frame.gw, frame.gh);
    let floor = floor_y(gh);
    let run = &state.run;

    frame.rect(0.0, 0.0, gw, gh, BACKGROUND);
    frame.rect(0.0, floor, gw, gh - floor, FLOOR);

    let mut player_visible = true;
    let cam_x = run.phase.camera_x();
    match &run.phase {
        Phase::Carrot(p) => {
            for c in &p.crates {
                let rect = c.rect.shifted_x(-cam_x);
                if on_screen(rect.left(), gw, CULL_MARGIN) {
                    sprites::crate_box(frame, &rect, c.opened, c.decoy);
                }
            }
            for c in &p.carrots {
                let rect = c.rect.shifted_x(-cam_x);
                sprites::carrot(frame, rect.left(), rect.top());
            }
        }
        Phase::Shot(p) => {
            sprites::cup(frame, &p.cup);
            for b in &p.balls {
                sprites::ball(frame, b.pos.x, b.pos.y, b.radius);
            }
        }
        Phase::Colouring(p) => {
            if let Some(page) = p.page_bounds() {
                let page = page.padded(8.0);
                frame.rect(page.pos.x, page.pos.y, page.size.x, page.size.y, "rgba(255,255,255,0.15)");
            }
            for z in &p.zones {
                let color = if z.filled {
                    "rgba(255,255,255,0.85)"
                } else {
                    "rgba(255,255,255,0.18)"
                };
                frame.rect(z.rect.pos.x, z.rect.pos.y, z.rect.size.x, z.rect.size.y, color);
            }
        }
        Phase::Donation(p) => {
            for d in &p.pickups {
                match d.kind {
                    PickupKind::Coin => sprites::coin(frame, &d.rect),
                    PickupKind::Coal => sprites::coal(frame, &d.rect),
                }
            }
        }
        Phase::Dodge(p) => {
            for o in &p.obstacles {
                let rect = o.rect.shifted_x(-cam_x);
                if !on_screen(rect.left(), gw, CULL_MARGIN) {
                    continue;
                }
                match o.kind {
                    ObstacleKind::Snowball => sprites::snowball(frame, &rect),
                    ObstacleKind::Cart => sprites::cart(frame, &rect),
                }
            }
            player_visible = run.done || p.player_visible(state.time);
        }
    }

    frame.text(
        run.phase_desc().banner,
        gw / 2.0,
        gh * 0.18,
        TextStyle::new(14.0, 800, Align::Center).alpha(0.9),
    );

    for p in &state.fx.particles {
        let alpha_size = p.size * p.life.clamp(0.2, 1.0);
        frame.rect(p.pos.x - alpha_size / 2.0, p.pos.y - alpha_size / 2.0, alpha_size, alpha_size, p.color);
    }

    if player_visible {
        let palette = state.player.character.get().palette;
        sprites::chibi(frame, &state.player, &palette, state.time, !reduced_motion);
    }

    hud(frame, state);

    if run.done {
        complete_overlay(frame, state, best);
    }
}

fn hud(frame: &mut Frame, state: &GameState) {
    let gw = frame.gw;
    let run = &state.run;
    let desc = run.desc();
    let right = gw - HUD_MARGIN;

    frame.text(format!("Level {} - {}", desc.number, desc.name), HUD_MARGIN, 38.0, HUD);
    frame.text(format!("Phase: {}", run.phase.kind().as_str()), HUD_MARGIN, 60.0, HUD);
    frame.text(format!("Score: {}", run.score), HUD_MARGIN, 82.0, HUD);

    frame.text("Back: Esc • Restart: R", right, 38.0, TextStyle::new(16.0, 700, Align::Right));

    let move_hint = "Phone: hold left/right • tap middle to jump";
    match &run.phase {
        Phase::Carrot(_) => frame.text(move_hint, right, 60.0, HINT),
        Phase::Shot(p) => {
            frame.text("Laptop: Enter to throw • Phone: tap top-right to throw", right, 60.0, HINT);
            frame.text(format!("Hits: {} / Attempts: {}", p.hits, p.attempts), right, 82.0, HINT);
        }
        Phase::Colouring(p) => {
            frame.text(format!("Move to colour • Fill: {}/{}", p.progress, p.target), right, 82.0, HINT);
        }
        Phase::Donation(p) => {
            frame.text(move_hint, right, 60.0, HINT);
            frame.text(format!("Donations: {}/{}", p.donations, p.target), right, 82.0, HINT);
        }
        Phase::Dodge(p) => {
            frame.text(move_hint, right, 60.0, HINT);
            for i in 0..crate::sim::phases::dodge::MAX_HEARTS {
                sprites::heart(frame, right - 14.0 * (i as f32 + 1.0), 72.0, i < p.hearts);
            }
        }
    }
}

fn complete_overlay(frame: &mut Frame, state: &GameState, best: &BestScores) {
    let (gw, gh) = (frame.gw, frame.gh);
    let run = &state.run;
    let desc = run.desc();

    frame.rect(0.0, 0.0, gw, gh, "rgba(0,0,0,0.55)");
    frame.text(
        format!("LEVEL {} COMPLETE!", desc.number),
        gw / 2.0,
        gh * 0.42,
        TextStyle::new(28.0, 900, Align::Center),
    );

    let line = match best.best(desc.number) {
        Some(record) if !best.is_new_best(desc.number, run.score) => {
            format!("Score: {} • Best: {}", run.score, record.score)
        }
        _ => format!("Score: {} • New best!", run.score),
    };
    frame.text(line, gw / 2.0, gh * 0.50, TextStyle::new(16.0, 800, Align::Center));

    let next = if run.is_last_level() {
        "That's every level - Enter / tap to pick a new character".to_string()
    } else {
        format!("Enter / tap for Level {}", desc.number + 1)
    };
    frame.text(
        next,
        gw / 2.0,
        gh * 0.58,
        TextStyle::new(13.0, 700, Align::Center).alpha(0.75),
    );
}
