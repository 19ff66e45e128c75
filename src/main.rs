//! Heart Quest entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use heart_quest::audio::AudioManager;
    use heart_quest::consts::*;
    use heart_quest::renderer::canvas::SPRITES;
    use heart_quest::renderer::scene::PLAYER_IMAGE;
    use heart_quest::renderer::{AssetSource, CanvasRenderer, ImageStore, build_scene};
    use heart_quest::sim::{GameEvent, GameState, TickInput};
    use heart_quest::ui::{self, Ui};
    use heart_quest::{FrameLoop, QualityPreset, Settings};

    /// Player sprite art is drawn at four times its in-game size
    const SPRITE_SCALE: f32 = 0.25;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        frame: FrameLoop,
        settings: Settings,
        renderer: CanvasRenderer,
        images: ImageStore,
        audio: AudioManager,
        ui: Ui,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks and hand their events to the page
        fn update(&mut self, dt: f32) {
            let events = self.frame.advance(&mut self.state, &mut self.input, dt);
            for event in &events {
                self.dispatch(event);
            }
        }

        fn dispatch(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Audio(cue) => self.audio.handle(*cue),
                GameEvent::ToggleMute => {
                    let muted = self.audio.toggle_mute();
                    self.ui.set_muted(muted);
                }
                other => self.ui.handle(other),
            }
        }

        /// Render the current frame
        fn render(&self) {
            let scene = build_scene(&self.state, &self.images, &self.settings);
            if let Err(e) = self.renderer.render(&scene, &self.images) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    /// `?quality=low|medium|high` on the page URL
    fn quality_from_url() -> Option<QualityPreset> {
        let search = web_sys::window()?.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("quality="))
            .and_then(QualityPreset::parse)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Heart Quest starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        ui::hide_loading(&document)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = quality_from_url()
            .map(Settings::from_preset)
            .unwrap_or_default();
        log::info!("Quality preset: {}", settings.quality.as_str());

        let mut images = ImageStore::new();
        for (key, src) in SPRITES {
            images.load(key, src)?;
        }

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.particle_cap = Some(settings.max_particles());

        let ui = Ui::new(document.clone());
        ui.init_counters(state.total_items());
        ui.set_muted(false);

        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            frame: FrameLoop::new(),
            renderer: CanvasRenderer::new(&canvas)?,
            audio: AudioManager::new(&settings),
            settings,
            images,
            ui,
            last_time: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone())?;
        setup_touch_buttons(&document, game.clone());
        setup_menu_buttons(&document, game.clone());

        // Draw the level behind the start screen
        game.borrow().render();
        request_animation_frame(game.clone());

        fit_player_to_sprite(game).await;

        log::info!("Heart Quest running!");
        Ok(())
    }

    /// Wait for the player sprite, then size the hitbox from it
    async fn fit_player_to_sprite(game: Rc<RefCell<Game>>) {
        let decode = match game.borrow().images.get(PLAYER_IMAGE) {
            Some(img) => img.decode(),
            None => return,
        };
        if let Err(e) = JsFuture::from(decode).await {
            log::warn!("Player sprite failed to load, keeping placeholder: {:?}", e);
            return;
        }

        let mut g = game.borrow_mut();
        if let Some(size) = g.images.image_size(PLAYER_IMAGE) {
            let size = size * SPRITE_SCALE;
            g.state.set_player_size(size.x, size.y);
            log::info!("Player sized to {}x{}", size.x, size.y);
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if matches!(
                    code.as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Space"
                ) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                match code.as_str() {
                    "ArrowRight" => g.input.right = true,
                    "ArrowLeft" => g.input.left = true,
                    "ArrowUp" | "Space" => g.input.up = true,
                    "ArrowDown" => g.input.down = true,
                    "KeyF" => g.input.interact = true,
                    "Escape" => g.input.dismiss = true,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if matches!(
                    code.as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Space"
                ) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                match code.as_str() {
                    "ArrowRight" => g.input.right = false,
                    "ArrowLeft" => g.input.left = false,
                    "ArrowUp" | "Space" => g.input.up = false,
                    "ArrowDown" => g.input.down = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Hold-to-move on-screen buttons
    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons: [(&str, fn(&mut TickInput, bool)); 3] = [
            ("btn-left", |input, down| input.left = down),
            ("btn-right", |input, down| input.right = down),
            ("btn-jump", |input, down| input.up = down),
        ];

        for (id, set) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            for (kind, down) in [("touchstart", true), ("touchend", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    set(&mut game.borrow_mut().input, down);
                });
                if let Err(e) =
                    btn.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                {
                    log::warn!("Failed to bind #{} {}: {:?}", id, kind, e);
                }
                closure.forget();
            }
        }
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons: [(&str, fn(&mut TickInput)); 3] = [
            ("btn-start-game", |input| input.start = true),
            ("try-again-btn", |input| input.start = true),
            ("btn-mute", |input| input.toggle_mute = true),
        ];

        for (id, press) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                press(&mut game.borrow_mut().input);
            });
            if let Err(e) = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
                log::warn!("Failed to bind #{}: {:?}", id, e);
            }
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Heart Quest (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the real game");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => heart_quest::Tuning::default(),
    };

    headless_demo(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<heart_quest::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(heart_quest::Tuning::from_json(&json)?)
}

/// Run right for a while, hopping every second, and log what happens
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(tuning: heart_quest::Tuning) {
    use heart_quest::FrameLoop;
    use heart_quest::consts::SIM_DT;
    use heart_quest::sim::{GameState, TickInput};

    let mut state = GameState::with_tuning(7, tuning);
    let mut frame = FrameLoop::new();
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    for step in 0..1200u32 {
        input.right = true;
        input.up = step % 60 < 10;
        for event in frame.advance(&mut state, &mut input, SIM_DT) {
            log::info!("[{:>5}] {:?}", step, event);
        }
        if state.phase.is_finished() {
            break;
        }
    }

    println!(
        "\nDemo finished: phase {:?}, x {:.0}, items {}/{}, lives {}",
        state.phase,
        state.player.pos.x,
        state.score,
        state.total_items(),
        state.lives
    );
}
