//! Keyboard and pointer mapping onto simulation input
//!
//! Keys are identified by `KeyboardEvent.key`, lowercased so that caps lock
//! and shift don't matter.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::{PointerInput, TickInput};

const LEFT_KEYS: [&str; 2] = ["arrowleft", "a"];
const RIGHT_KEYS: [&str; 2] = ["arrowright", "d"];

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashSet<String>,
}

impl HeldKeys {
    pub fn press(&mut self, key: &str) {
        self.keys.insert(normalize(key));
    }

    pub fn release(&mut self, key: &str) {
        self.keys.remove(&normalize(key));
    }

    /// Forget everything (window lost focus; keyups will never arrive)
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_down(k))
    }

    /// Copy held directions into the tick input
    pub fn apply(&self, input: &mut TickInput) {
        input.left = self.any(&LEFT_KEYS);
        input.right = self.any(&RIGHT_KEYS);
    }
}

fn normalize(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// Record a keydown. Auto-repeat only refreshes held state, so one-shot
/// commands fire once per physical press. Returns true if the key is a game
/// key whose browser default (scrolling) should be suppressed.
pub fn key_down(key: &str, repeat: bool, held: &mut HeldKeys, input: &mut TickInput) -> bool {
    let key = normalize(key);
    held.press(&key);
    held.apply(input);

    let handled = matches!(
        key.as_str(),
        "arrowleft" | "arrowright" | "arrowup" | "arrowdown" | " " | "enter"
    ) || LEFT_KEYS.contains(&key.as_str())
        || RIGHT_KEYS.contains(&key.as_str());
    if repeat {
        return handled;
    }

    match key.as_str() {
        " " => {
            input.jump = true;
            input.confirm = true;
        }
        "arrowup" | "w" => input.jump = true,
        "enter" => {
            input.confirm = true;
            input.throw = true;
        }
        "arrowleft" => input.prev = true,
        "arrowright" => input.next = true,
        "escape" => input.back = true,
        "r" => input.restart = true,
        _ => {}
    }
    handled
}

pub fn key_up(key: &str, held: &mut HeldKeys, input: &mut TickInput) {
    held.release(key);
    held.apply(input);
}

/// Orders pointer events between ticks so a quick tap is never lost.
///
/// A release that arrives before any tick has seen its press is held back
/// and delivered on the following tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerQueue {
    deferred_up: bool,
}

impl PointerQueue {
    pub fn down(&mut self, p: Vec2, input: &mut TickInput) {
        self.deferred_up = false;
        input.pointer = Some(PointerInput::Down(p));
    }

    pub fn drag(&mut self, p: Vec2, input: &mut TickInput) {
        if !matches!(input.pointer, Some(PointerInput::Down(_))) {
            input.pointer = Some(PointerInput::Drag(p));
        }
    }

    pub fn up(&mut self, input: &mut TickInput) {
        if matches!(input.pointer, Some(PointerInput::Down(_))) {
            self.deferred_up = true;
        } else {
            input.pointer = Some(PointerInput::Up);
        }
    }

    /// Call after each tick, once one-shots have been cleared
    pub fn after_tick(&mut self, input: &mut TickInput) {
        if std::mem::take(&mut self.deferred_up) {
            input.pointer = Some(PointerInput::Up);
        }
    }
}
