//! Data Treasure entry point
//!
//! Handles platform-specific initialization and wires input to the game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, MouseEvent, TouchEvent};

    use data_treasure::platform::browser::Dispatch;
    use data_treasure::platform::{BrowserScheduler, DomSurface};
    use data_treasure::{Game, Settings, Wake};

    type WebGame = Game<Pcg32, BrowserScheduler, DomSurface>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Data Treasure starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let surface = DomSurface::new(document)?;
        let settings = Settings::load(surface.canvas());
        let seed = settings
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        let canvas = surface.canvas().clone();
        let character = surface.character().clone();

        let game = Rc::new_cyclic(|weak: &Weak<RefCell<WebGame>>| {
            let weak = weak.clone();
            let dispatch: Dispatch = Rc::new(move |wake: Wake| {
                let Some(game) = weak.upgrade() else {
                    return;
                };
                match game.try_borrow_mut() {
                    Ok(mut g) => g.wake(wake),
                    Err(_) => log::warn!("Dropped {:?} wake, game busy", wake),
                }
            });
            RefCell::new(Game::new(
                settings,
                Pcg32::seed_from_u64(seed),
                BrowserScheduler::new(window.clone(), dispatch),
                surface,
            ))
        });

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, &character, game.clone());
        game.borrow_mut().boot();

        log::info!("Data Treasure running!");
        Ok(())
    }

    /// Client coordinates to play-surface coordinates
    fn to_surface(canvas: &HtmlElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(
        canvas: &HtmlElement,
        character: &HtmlElement,
        game: Rc<RefCell<WebGame>>,
    ) {
        // Mouse move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = to_surface(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().pointer_moved(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = to_surface(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().pointer_moved(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the play surface - start when idle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().surface_clicked();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the actor - chatter only, must not reach the play surface
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                game.borrow_mut().actor_clicked();
            });
            let _ = character
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Data Treasure failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Data Treasure (native) starting...");
    log::info!("Native mode runs one headless round - run with `trunk serve` for the web version");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = data_treasure::Settings::load(path.as_deref());
    demo::run_round(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use data_treasure::platform::HeadlessSurface;
    use data_treasure::sim::{Collectible, Session};
    use data_treasure::{Game, Settings, VirtualScheduler};

    /// Pointer update interval for the autopilot
    const STEP_MS: u64 = 250;

    /// Centre of the collectible nearest the actor
    fn nearest_target(session: &Session, size: f32) -> Option<Vec2> {
        let center = |c: &Collectible| c.pos + Vec2::splat(size / 2.0);
        session
            .collectibles
            .iter()
            .map(center)
            .min_by(|a, b| {
                a.distance_squared(session.actor)
                    .partial_cmp(&b.distance_squared(session.actor))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Play one round with an autopilot chasing the nearest treasure
    pub fn run_round(settings: Settings) {
        let seed = settings.seed.unwrap_or(0x5EED);
        let size = settings.collectible_size;
        let mut game = Game::new(
            settings,
            Pcg32::seed_from_u64(seed),
            VirtualScheduler::new(),
            HeadlessSurface::new(Vec2::new(500.0, 500.0)),
        );

        game.boot();
        while !game.session().is_playing() {
            game.advance(STEP_MS);
        }

        while game.session().is_playing() {
            if let Some(target) = nearest_target(game.session(), size) {
                game.pointer_moved(target);
            }
            game.advance(STEP_MS);
        }

        let surface = game.surface();
        log::info!(
            "Round over at {}ms: score {}, {} treasures placed, {} collected or cleared",
            game.now_ms(),
            game.session().score,
            surface.placed(),
            surface.removed()
        );
        println!("Final score: {}", game.session().score);
    }
}
