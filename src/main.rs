//! Eriezium entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use eriezium::GameConfig;
    use eriezium::render::scene_svg;
    use eriezium::sim::{Direction, GameEvent, GameState, TickInput, tick};

    /// Side of the square view, in world units
    const VIEW_SIZE: f32 = 4000.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64) -> Result<Self, eriezium::SimError> {
            Ok(Self {
                state: GameState::new(GameConfig::default(), seed)?,
                last_time: 0.0,
                input: TickInput::default(),
            })
        }

        /// Run one simulation step and clear one-shot inputs
        fn update(&mut self, dt: f32) {
            let input = self.input;
            if let Err(e) = tick(&mut self.state, &input, dt.min(0.1)) {
                log::error!("Tick failed: {}", e);
            }
            self.input = TickInput::default();

            for event in self.state.drain_events() {
                match event {
                    GameEvent::PlanetCleared { level } => log::info!("Planet {} cleared", level),
                    GameEvent::Bankrupt { cash } => log::info!("Bankrupt ({})", cash),
                    GameEvent::Restarted { seed } => log::info!("New run, seed {}", seed),
                    _ => {}
                }
            }
        }

        /// Write the current scene into the page
        fn render(&self) {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            if let Some(el) = document.get_element_by_id("game") {
                el.set_inner_html(&scene_svg(&self.state, VIEW_SIZE));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Eriezium starting...");

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(seed) {
            Ok(g) => Rc::new(RefCell::new(g)),
            Err(e) => {
                log::error!("Could not start: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" => g.input.rotate = Some(Direction::Backward),
                "ArrowRight" => g.input.rotate = Some(Direction::Forward),
                "ArrowDown" => g.input.mine = true,
                "Enter" => g.input.advance = true,
                _ => return,
            }
            event.prevent_default();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eriezium (native) starting...");

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot: digs each sector to its floor, moving on when it bottoms out
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use eriezium::render::scene_svg;
    use eriezium::sim::{Direction, GamePhase, GameState, TickInput, tick};
    use eriezium::{GameConfig, SimResult};

    const MAX_FRAMES: usize = 20_000;
    const FRAME_DT: f32 = 1.0 / 60.0;
    const VIEW_SIZE: f32 = 4000.0;

    /// `eriezium [config.json] [seed]`
    pub fn run(args: Vec<String>) -> SimResult<()> {
        let config = match args.first() {
            Some(path) => GameConfig::load(Path::new(path))?,
            None => GameConfig::default(),
        };
        let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        let mut state = GameState::new(config, seed)?;

        let mut frames = 0;
        while state.phase == GamePhase::Playing && frames < MAX_FRAMES {
            let input = if state.planet.is_at_floor(state.player_sector)? {
                TickInput {
                    rotate: Some(Direction::Forward),
                    ..Default::default()
                }
            } else {
                TickInput {
                    mine: true,
                    ..Default::default()
                }
            };
            tick(&mut state, &input, FRAME_DT)?;
            frames += 1;
        }

        log::info!(
            "Finished after {} frames: {:?}, cash {}, {} deposits left",
            frames,
            state.phase,
            state.cash,
            state.ore.len()
        );
        println!("{}", scene_svg(&state, VIEW_SIZE));
        Ok(())
    }
}
