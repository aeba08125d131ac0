//! Trojan Christmas entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use trojan_christmas::audio::{AudioManager, SoundEffect};
    use trojan_christmas::consts::*;
    use trojan_christmas::input::{self, HeldKeys, PointerQueue};
    use trojan_christmas::renderer::build_frame;
    use trojan_christmas::renderer::canvas::CanvasPainter;
    use trojan_christmas::sim::{GameEvent, GameState, TickInput, tick};
    use trojan_christmas::{BestScores, Settings, View};

    /// How long the toast stays up (ms)
    const TOAST_MS: f64 = 900.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        held: HeldKeys,
        pointer: PointerQueue,
        view: View,
        painter: CanvasPainter,
        settings: Settings,
        best: BestScores,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        /// Timestamp when the toast hides (0 = hidden)
        toast_until: f64,
    }

    impl Game {
        fn new(seed: u64, painter: CanvasPainter) -> Self {
            let settings = Settings::load();
            let mut state = GameState::new(seed);
            state.set_particle_cap(settings.max_particles());
            Self {
                state,
                input: TickInput::default(),
                held: HeldKeys::default(),
                pointer: PointerQueue::default(),
                view: View::default(),
                painter,
                audio: AudioManager::new(&settings),
                best: BestScores::load(),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                toast_until: 0.0,
            }
        }

        /// Refit the canvas and the letterbox to the window
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            if self.painter.resize(w, h, window.device_pixel_ratio()) {
                self.view = View::for_window(w as f32, h as f32);
                self.state.set_arena(self.view.size());
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(MAX_FRAME_DT);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.held.apply(&mut self.input);
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shots are consumed by the first tick of the frame
                self.input.clear_one_shots();
                self.pointer.after_tick(&mut self.input);
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if let GameEvent::LevelComplete {
                    level,
                    score,
                    character,
                } = event
                    && self.best.record(level, score, character)
                {
                    log::info!("New best on level {}: {}", level, score);
                    self.best.save();
                }
            }
        }

        fn render(&self) {
            let frame = build_frame(&self.state, &self.best, self.settings.reduced_motion);
            if let Err(e) = self.painter.paint(&frame, &self.view) {
                log::warn!("Render error: {:?}", e);
            }
        }

        fn pointer_pos(&self, event: &PointerEvent, canvas: &HtmlCanvasElement) -> Vec2 {
            let rect = canvas.get_bounding_client_rect();
            let p = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            self.view.screen_to_game(p)
        }

        fn toggle_mute(&mut self, document: &Document, now: f64) {
            let muted = self.settings.toggle_muted();
            self.audio.set_muted(muted);
            self.settings.save();

            if let Some(btn) = document.get_element_by_id("muteBtn") {
                btn.set_text_content(Some(self.settings.sound_label()));
            }
            self.show_toast(document, if muted { "Muted" } else { "Sound on" }, now);
        }

        fn show_toast(&mut self, document: &Document, msg: &str, now: f64) {
            if let Some(el) = document.get_element_by_id("toast") {
                el.set_text_content(Some(msg));
                let _ = el.class_list().add_1("show");
                self.toast_until = now + TOAST_MS;
            }
        }

        fn expire_toast(&mut self, now: f64) {
            if self.toast_until == 0.0 || now < self.toast_until {
                return;
            }
            self.toast_until = 0.0;
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("toast"))
            {
                let _ = el.class_list().remove_1("show");
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Trojan Christmas starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let painter = CanvasPainter::new(canvas.clone())?;
        let game = Rc::new(RefCell::new(Game::new(seed, painter)));
        game.borrow_mut().resize();
        log::info!("Game initialized with seed: {}", seed);

        if let Some(btn) = document.get_element_by_id("muteBtn") {
            btn.set_text_content(Some(game.borrow().settings.sound_label()));
        }

        setup_keyboard(&window, game.clone())?;
        setup_pointer(&canvas, game.clone())?;
        setup_mute_button(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Trojan Christmas running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.unlock();
                let Game { held, input: pending, .. } = &mut *g;
                if input::key_down(&event.key(), event.repeat(), held, pending) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game { held, input: pending, .. } = &mut *g;
                input::key_up(&event.key(), held, pending);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyups never arrive once focus is gone
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let Game { held, input, .. } = &mut *g;
                held.clear();
                held.apply(input);
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.audio.unlock();
                let p = g.pointer_pos(&event, &canvas_clone);
                let Game { pointer, input, .. } = &mut *g;
                pointer.down(p, input);
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if event.buttons() & 1 == 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let p = g.pointer_pos(&event, &canvas_clone);
                let Game { pointer, input, .. } = &mut *g;
                pointer.drag(p, input);
            });
            canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
            let mut g = game.borrow_mut();
            let Game { pointer, input, .. } = &mut *g;
            pointer.up(input);
        });
        for name in ["pointerup", "pointercancel", "pointerleave"] {
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        }
        closure.forget();
        Ok(())
    }

    fn setup_mute_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("muteBtn") else {
            log::warn!("No #muteBtn; sound stays as configured");
            return Ok(());
        };
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().toggle_mute(&document, js_sys::Date::now());
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.resize();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.expire_toast(js_sys::Date::now());
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trojan Christmas (native) starting...");
    log::info!("The game runs in the browser - build for wasm32 and serve index.html");

    demo_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run through level 1 with a simple bot
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use trojan_christmas::consts::SIM_DT;
    use trojan_christmas::sim::{GameEvent, GameState, Screen, TickInput, tick};

    let mut state = GameState::new(2024);
    let confirm = TickInput {
        confirm: true,
        ..Default::default()
    };
    tick(&mut state, &confirm, SIM_DT);
    tick(&mut state, &confirm, SIM_DT);

    let mut events = 0usize;
    let mut ticks = 0u32;
    // Two minutes of game time
    while state.screen == Screen::Level && !state.run.done && ticks < 120 * 120 {
        let input = TickInput {
            right: (ticks / 240) % 2 == 0,
            left: (ticks / 240) % 2 == 1,
            jump: ticks % 50 == 0,
            throw: ticks % 60 == 0,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            events += 1;
            match event {
                GameEvent::PhaseStarted(kind) => println!("phase: {}", kind.as_str()),
                GameEvent::LevelComplete { level, score, .. } => {
                    println!("level {} complete, score {}", level, score)
                }
                _ => {}
            }
        }
        ticks += 1;
    }

    println!(
        "after {:.1}s: phase {}, score {}, {} events",
        state.time,
        state.run.phase.kind().as_str(),
        state.run.score,
        events
    );
}
