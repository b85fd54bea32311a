//! Ball Pit entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use ball_pit::renderer::RenderState;
    use ball_pit::sim::{Simulation, TickInput};
    use ball_pit::SimConfig;

    /// App instance holding all state
    struct App {
        sim: Simulation,
        render_state: Option<RenderState>,
        last_time: f64,
        input: TickInput,
    }

    impl App {
        fn new(config: SimConfig, seed: u64) -> Self {
            Self {
                sim: Simulation::new(config, seed),
                render_state: None,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Advance the simulation and draw when a step ran
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input;
            let stepped = self.sim.frame(&input, elapsed);

            // Clear one-shot inputs after processing
            self.input = TickInput::default();

            if stepped {
                self.render();
            }
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.sim.store) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    /// Optional tuning override from the canvas `data-config` attribute
    fn config_from_canvas(canvas: &HtmlCanvasElement) -> SimConfig {
        match canvas.get_attribute("data-config") {
            Some(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Using data-config tuning override");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring malformed data-config: {}", e);
                    SimConfig::default()
                }
            },
            None => SimConfig::default(),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ball Pit starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the backing store to the device pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = config_from_canvas(&canvas);
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(config, seed)));

        log::info!("Simulation initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, config.arena).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(app.clone());

        request_animation_frame(app);

        log::info!("Ball Pit running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                " " | "g" | "G" => a.input.toggle_gravity = true,
                "Escape" => a.input.quit = true,
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        let running = {
            let mut a = app.borrow_mut();
            a.frame(time);
            a.sim.is_running()
        };

        // Re-schedule only while running; Terminating ends the loop
        if running {
            request_animation_frame(app);
        } else {
            log::info!("Frame loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use ball_pit::sim::{Simulation, TickInput};
    use ball_pit::SimConfig;

    env_logger::init();
    log::info!("Ball Pit (native) starting...");
    log::info!("Native mode requires winit integration - run with `trunk serve` for web version");

    // Headless sanity run
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut sim = Simulation::new(SimConfig::default(), seed);

    for _ in 0..600 {
        sim.frame(&TickInput::default(), 1.0 / 60.0);
    }

    let mean_speed: f32 = sim
        .store
        .iter()
        .map(|(_, body)| body.vel.length())
        .sum::<f32>()
        / sim.store.count().max(1) as f32;
    log::info!(
        "Headless run: {} bodies, {} steps, mean speed {:.2}",
        sim.store.count(),
        sim.steps,
        mean_speed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
