//! Particle Pong entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use particle_pong::renderer::{RenderState, ShapeBatch, TextLabel};
    use particle_pong::sim::{FixedStep, Match, frame};
    use particle_pong::{InputState, Settings};

    /// Game instance holding all state
    struct Game {
        state: Match,
        render_state: Option<RenderState>,
        batch: ShapeBatch,
        input: InputState,
        clock: FixedStep,
        fixed_timestep: bool,
        canvas: HtmlCanvasElement,
        /// One absolutely-positioned element per text label
        labels: Vec<HtmlElement>,
    }

    impl Game {
        /// Run the simulation frames due for this callback
        fn update(&mut self, time: f64) {
            let frames = if self.fixed_timestep {
                self.clock.frames_due(time)
            } else {
                1
            };
            for _ in 0..frames {
                frame(&mut self.state, &self.input, &mut self.batch);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.batch.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Mirror the frame's text labels into DOM elements
        fn update_hud(&mut self) -> Result<(), JsValue> {
            let document = document()?;
            while self.labels.len() < self.batch.labels().len() {
                let el: HtmlElement = document.create_element("div")?.dyn_into()?;
                el.set_class_name("hud-label");
                let style = el.style();
                style.set_property("position", "absolute")?;
                style.set_property("pointer-events", "none")?;
                style.set_property("transform", "translateY(-80%)")?;
                document
                    .body()
                    .ok_or_else(|| JsValue::from_str("no body"))?
                    .append_child(&el)?;
                self.labels.push(el);
            }

            for (el, label) in self.labels.iter().zip(self.batch.labels()) {
                apply_label(el, label)?;
            }
            Ok(())
        }

        /// Match the canvas backing store and court to the element's size
        fn fit_to_window(&mut self) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let client_w = self.canvas.client_width().max(1);
            let client_h = self.canvas.client_height().max(1);
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);

            self.state.resize(client_w as f32, client_h as f32);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
                render_state.set_court(client_w as f32, client_h as f32);
            }
        }
    }

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    fn apply_label(el: &HtmlElement, label: &TextLabel) -> Result<(), JsValue> {
        if el.text_content().as_deref() != Some(label.text.as_str()) {
            el.set_text_content(Some(&label.text));
        }
        let style = el.style();
        style.set_property("left", &format!("{}px", label.x))?;
        style.set_property("top", &format!("{}px", label.y))?;
        style.set_property("font", &label.font)?;
        style.set_property("color", &label.css_color())?;
        Ok(())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Particle Pong starting...");

        let document = document()?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let fixed_timestep = settings.fixed_timestep;

        let client_w = canvas.client_width().max(1) as f32;
        let client_h = canvas.client_height().max(1) as f32;
        let state = Match::new(client_w, client_h, settings, seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            render_state: None,
            batch: ShapeBatch::new(),
            input: InputState::new(),
            clock: FixedStep::new(),
            fixed_timestep,
            canvas: canvas.clone(),
            labels: Vec::new(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            canvas.width().max(1),
            canvas.height().max(1),
            (client_w, client_h),
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.fit_to_window();
        }

        setup_input_handlers(game.clone())?;
        setup_resize(game.clone())?;

        request_animation_frame(game);

        log::info!("Particle Pong running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.state.settings().keys.is_bound(&key) {
                    event.prevent_default();
                }
                g.input.press(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.release(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-ups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.clear();
                g.clock.reset();
                log::info!("Input released (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_to_window();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window; frame loop stopped");
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
            g.update(time);
            g.render();
            if let Err(e) = g.update_hud() {
                log::warn!("HUD update failed: {:?}", e);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Particle Pong failed to start: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use particle_pong::renderer::ShapeBatch;
    use particle_pong::sim::{Match, frame};
    use particle_pong::{InputState, Settings};

    /// Headless run length (one minute at 60 Hz)
    const HEADLESS_FRAMES: u32 = 60 * 60;

    env_logger::init();
    log::info!("Particle Pong (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    // Nobody at the keyboard: the ball rallies off the walls until it scores
    let mut game = Match::new(800.0, 600.0, settings, seed);
    let input = InputState::new();
    let mut batch = ShapeBatch::new();
    for _ in 0..HEADLESS_FRAMES {
        frame(&mut game, &input, &mut batch);
    }

    println!(
        "After {} frames: left {} - right {} ({} particles live, {} vertices in last frame)",
        game.frame_count,
        game.scores.left,
        game.scores.right,
        game.particles.len(),
        batch.vertices().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
