//! Fixed timestep simulation tick
//!
//! Advances the screen state machine and, inside a level, the shared player
//! physics plus the active phase. Driven only by `TickInput`, so replaying
//! the same inputs from the same seed gives the same game.

use glam::Vec2;

use super::levels::{PhaseEnd, PhaseKind};
use super::particles::update_particles;
use super::phases::{Phase, PhaseCtx, PhaseStatus};
use super::state::{GameEvent, GameState, Screen};
use crate::consts::BASELINE_POINTS_PER_SEC;
use crate::view::{TouchZone, in_arena, is_top_right};
use crate::{floor_y, player_max_x};

/// Pointer activity since the last tick, in logical game coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Pressed (or touched) at a point
    Down(Vec2),
    /// Moved with the primary button held
    Drag(Vec2),
    /// Released, cancelled or left the canvas
    Up,
}

/// Input commands for a single tick (deterministic)
///
/// `left`/`right` are held states; everything else fires once.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Space, up or W
    pub jump: bool,
    /// Enter or Space
    pub confirm: bool,
    /// Enter
    pub throw: bool,
    pub prev: bool,
    pub next: bool,
    /// Escape
    pub back: bool,
    pub restart: bool,
    pub pointer: Option<PointerInput>,
}

impl TickInput {
    /// Drop the one-shot commands once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        *self = Self {
            left: self.left,
            right: self.right,
            ..Default::default()
        };
    }

    /// A press that landed on the playfield
    fn tap(&self, arena: Vec2) -> Option<Vec2> {
        match self.pointer {
            Some(PointerInput::Down(p)) if in_arena(p, arena) => Some(p),
            _ => None,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time += dt;
    state.time_ticks += 1;

    match state.screen {
        Screen::Title => tick_title(state, input),
        Screen::Select => tick_select(state, input),
        Screen::Level => tick_level(state, input, dt),
    }
}

fn tick_title(state: &mut GameState, input: &TickInput) {
    if input.confirm || input.tap(state.arena).is_some() {
        state.screen = Screen::Select;
        state.fx.emit(GameEvent::MenuStart);
    }
}

fn tick_select(state: &mut GameState, input: &TickInput) {
    let mut delta = 0;
    let mut start = input.confirm;
    if let Some(p) = input.tap(state.arena) {
        match TouchZone::classify(p, state.arena) {
            TouchZone::Left => delta = -1,
            TouchZone::Right => delta = 1,
            TouchZone::Middle => start = true,
        }
    }
    if input.prev {
        delta = -1;
    } else if input.next {
        delta = 1;
    }

    if delta != 0 {
        state.selected = state.selected.cycled(delta);
        state.fx.emit(GameEvent::MenuMove);
        return;
    }
    if start {
        state.player.character = state.selected;
        state.start_level(0);
        state.fx.emit(GameEvent::MenuStart);
        state
            .fx
            .emit(GameEvent::PhaseStarted(state.run.phase.kind()));
    }
}

fn tick_level(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.back {
        state.touch.clear();
        state.fx.particles.clear();
        state.screen = Screen::Select;
        state.fx.emit(GameEvent::MenuMove);
        log::info!("Back to character select");
        return;
    }
    if input.restart {
        state.start_level(state.run.level);
        state.fx.emit(GameEvent::MenuMove);
        return;
    }

    update_particles(&mut state.fx.particles, dt);

    if state.run.done {
        if input.confirm || input.tap(state.arena).is_some() {
            continue_after_level(state);
        }
        return;
    }

    let mut jump = input.jump;
    let mut throw = input.throw;
    apply_pointer(state, input, &mut jump, &mut throw);

    let arena = state.arena;
    let phase_desc = state.run.phase_desc();
    if jump && phase_desc.allows_jump && state.player.try_jump() {
        state.fx.emit(GameEvent::Jump);
    }

    let left = input.left || state.touch.left;
    let right = input.right || state.touch.right;
    state.player.steer(left, right, dt, player_max_x(arena.x));
    let prev_bottom = state.player.fall(dt, floor_y(arena.y));

    let run = &mut state.run;
    let mut ctx = PhaseCtx {
        player: &mut state.player,
        rng: &mut state.rng,
        fx: &mut state.fx,
        score: &mut run.score,
        arena,
        time: state.time,
        prev_bottom,
    };
    if throw {
        run.phase.action(&mut ctx);
    }
    let status = run.phase.update(&mut ctx, dt);

    run.phase_time += dt;
    run.time_in_level += dt;
    run.baseline_carry += dt * BASELINE_POINTS_PER_SEC;
    let whole = run.baseline_carry.floor();
    run.score += whole as u64;
    run.baseline_carry -= whole;

    let ended = match phase_desc.end {
        PhaseEnd::After(secs) => run.phase_time >= secs,
        PhaseEnd::Goal => status == PhaseStatus::GoalMet,
    };
    if status == PhaseStatus::Restart {
        restart_phase(state);
    } else if ended {
        advance_phase(state);
    }
}

/// Touch controls: thirds steer, a middle tap jumps, the top-right corner
/// throws during the shot phase
fn apply_pointer(state: &mut GameState, input: &TickInput, jump: &mut bool, throw: &mut bool) {
    let arena = state.arena;
    match input.pointer {
        Some(PointerInput::Down(p)) if in_arena(p, arena) => {
            if state.run.phase.kind() == PhaseKind::Shot && is_top_right(p, arena) {
                *throw = true;
                return;
            }
            let zone = TouchZone::classify(p, arena);
            if zone == TouchZone::Middle {
                *jump = true;
            }
            state.touch.left = zone == TouchZone::Left;
            state.touch.right = zone == TouchZone::Right;
        }
        Some(PointerInput::Drag(p)) if in_arena(p, arena) => {
            let zone = TouchZone::classify(p, arena);
            state.touch.left = zone == TouchZone::Left;
            state.touch.right = zone == TouchZone::Right;
        }
        Some(PointerInput::Up) => state.touch.clear(),
        _ => {}
    }
}

fn restart_phase(state: &mut GameState) {
    let kind = state.run.phase.kind();
    state.run.phase = Phase::start(kind, &mut state.rng, state.arena);
    state.run.phase_time = 0.0;
    log::info!("Phase {} restarted", kind.as_str());
}

fn advance_phase(state: &mut GameState) {
    let run = &mut state.run;
    let desc = run.desc();
    if run.phase_index + 1 < desc.phases.len() {
        run.phase_index += 1;
        let kind = desc.phases[run.phase_index].kind;
        run.phase = Phase::start(kind, &mut state.rng, state.arena);
        run.phase_time = 0.0;
        state.fx.emit(GameEvent::PhaseStarted(kind));
        log::info!("Level {} phase {}", desc.number, kind.as_str());
        return;
    }

    run.done = true;
    run.score += desc.completion_bonus;
    state.touch.clear();
    log::info!(
        "Level {} complete: {} points in {:.1}s",
        desc.number,
        run.score,
        run.time_in_level
    );
    state.fx.emit(GameEvent::LevelComplete {
        level: desc.number,
        score: run.score,
        character: state.player.character,
    });
}

fn continue_after_level(state: &mut GameState) {
    if state.run.is_last_level() {
        state.fx.particles.clear();
        state.screen = Screen::Select;
        state.fx.emit(GameEvent::MenuMove);
        log::info!("All levels complete");
    } else {
        state.start_level(state.run.level + 1);
        state.fx.emit(GameEvent::MenuStart);
        state
            .fx
            .emit(GameEvent::PhaseStarted(state.run.phase.kind()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::characters::CharacterId;

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    fn in_level(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &press(|i| i.confirm = true), SIM_DT);
        tick(&mut state, &press(|i| i.confirm = true), SIM_DT);
        assert_eq!(state.screen, Screen::Level);
        state
    }

    fn run_for(state: &mut GameState, input: &TickInput, secs: f32) {
        let ticks = (secs / SIM_DT).round() as usize;
        for _ in 0..ticks {
            tick(state, input, SIM_DT);
        }
    }

    #[test]
    fn test_title_to_select_to_level() {
        let mut state = GameState::new(1);
        assert_eq!(state.screen, Screen::Title);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.screen, Screen::Title);

        tick(&mut state, &press(|i| i.confirm = true), SIM_DT);
        assert_eq!(state.screen, Screen::Select);

        tick(&mut state, &press(|i| i.next = true), SIM_DT);
        tick(&mut state, &press(|i| i.next = true), SIM_DT);
        assert_eq!(state.selected, CharacterId(2));

        tick(&mut state, &press(|i| i.confirm = true), SIM_DT);
        assert_eq!(state.screen, Screen::Level);
        assert_eq!(state.player.character, CharacterId(2));
        assert_eq!(state.run.phase.kind(), PhaseKind::Carrot);

        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::MenuStart));
        assert!(events.contains(&GameEvent::PhaseStarted(PhaseKind::Carrot)));
    }

    #[test]
    fn test_select_wraps_and_taps() {
        let mut state = GameState::new(1);
        state.screen = Screen::Select;
        tick(&mut state, &press(|i| i.prev = true), SIM_DT);
        assert_eq!(state.selected, CharacterId(5));

        let right_third = Vec2::new(900.0, 270.0);
        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Down(right_third))),
            SIM_DT,
        );
        assert_eq!(state.selected, CharacterId(0));

        let middle = Vec2::new(480.0, 270.0);
        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Down(middle))),
            SIM_DT,
        );
        assert_eq!(state.screen, Screen::Level);
    }

    #[test]
    fn test_taps_outside_playfield_ignored() {
        let mut state = GameState::new(1);
        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Down(Vec2::new(-20.0, 100.0)))),
            SIM_DT,
        );
        assert_eq!(state.screen, Screen::Title);
    }

    #[test]
    fn test_jump_needs_ground() {
        let mut state = in_level(3);
        // Settle on the floor
        run_for(&mut state, &TickInput::default(), 1.0);
        assert!(state.player.on_ground);
        state.drain_events();

        let jump = press(|i| i.jump = true);
        tick(&mut state, &jump, SIM_DT);
        assert!(state.player.vel.y < 0.0);
        tick(&mut state, &jump, SIM_DT);
        let jumps = state
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::Jump)
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_carrot_phase_hands_over_to_shot() {
        let mut state = in_level(4);
        run_for(&mut state, &TickInput::default(), 40.5);
        assert_eq!(state.run.phase.kind(), PhaseKind::Shot);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PhaseStarted(PhaseKind::Shot))
        );
        // Baseline score alone accrues 2 points a second
        assert!(state.run.score >= 80);

        // No jumping during the shot
        tick(&mut state, &press(|i| i.jump = true), SIM_DT);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_top_right_tap_throws_in_shot_phase() {
        let mut state = in_level(4);
        run_for(&mut state, &TickInput::default(), 40.5);
        state.drain_events();

        let corner = Vec2::new(900.0, 60.0);
        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Down(corner))),
            SIM_DT,
        );
        assert!(state.drain_events().contains(&GameEvent::ShotThrown));
        assert!(!state.touch.right);
    }

    #[test]
    fn test_touch_drag_steers_and_release_stops() {
        let mut state = in_level(5);
        let x0 = state.player.body.pos.x;
        let left = Vec2::new(50.0, 400.0);
        let right = Vec2::new(900.0, 400.0);

        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Down(left))),
            SIM_DT,
        );
        run_for(&mut state, &TickInput::default(), 0.1);
        assert!(state.player.body.pos.x < x0);
        assert!(state.player.facing < 0.0);

        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Drag(right))),
            SIM_DT,
        );
        assert!(state.touch.right && !state.touch.left);

        tick(&mut state, &press(|i| i.pointer = Some(PointerInput::Up)), SIM_DT);
        let x1 = state.player.body.pos.x;
        run_for(&mut state, &TickInput::default(), 0.2);
        assert_eq!(state.player.body.pos.x, x1);
    }

    #[test]
    fn test_drag_outside_playfield_keeps_touch() {
        let mut state = in_level(9);
        let left = Vec2::new(50.0, 400.0);
        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Down(left))),
            SIM_DT,
        );
        assert!(state.touch.left);

        // Past the right edge of the letterbox
        let outside = Vec2::new(state.arena.x + 40.0, 400.0);
        tick(
            &mut state,
            &press(|i| i.pointer = Some(PointerInput::Drag(outside))),
            SIM_DT,
        );
        assert!(state.touch.left && !state.touch.right);
    }

    #[test]
    fn test_escape_and_restart() {
        let mut state = in_level(6);
        run_for(&mut state, &TickInput::default(), 2.0);
        assert!(state.run.score > 0);

        tick(&mut state, &press(|i| i.restart = true), SIM_DT);
        assert_eq!(state.screen, Screen::Level);
        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.phase_time, 0.0);

        tick(&mut state, &press(|i| i.back = true), SIM_DT);
        assert_eq!(state.screen, Screen::Select);
    }

    #[test]
    fn test_clear_one_shots_keeps_held() {
        let mut input = TickInput {
            left: true,
            jump: true,
            throw: true,
            pointer: Some(PointerInput::Up),
            ..Default::default()
        };
        input.clear_one_shots();
        assert!(input.left);
        assert!(!input.jump && !input.throw);
        assert!(input.pointer.is_none());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = in_level(99999);
        let mut state2 = in_level(99999);

        let inputs = [
            press(|i| i.right = true),
            press(|i| i.jump = true),
            press(|i| i.left = true),
            TickInput::default(),
        ];
        for round in 0..600 {
            let input = &inputs[round % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.run.score, state2.run.score);
        assert_eq!(state1.player.body, state2.player.body);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
