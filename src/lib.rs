pub mod dom;
pub mod engine;
pub mod portfolio;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, WebGlRenderingContext, Window};
use std::cell::RefCell;
use std::rc::Rc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::dom::DomOverlay;
use crate::engine::frame::run_frame_loop;
use crate::engine::renderer::Renderer;
use crate::portfolio::config::SceneConfig;
use crate::portfolio::picking::Viewport;
use crate::portfolio::render::{draw_scene, SceneMeshes};
use crate::portfolio::Portfolio;

type App = Rc<RefCell<Portfolio<DomOverlay>>>;

/// GPU side of the page: the canvas, its context and the uploaded meshes.
struct Stage {
    canvas: HtmlCanvasElement,
    renderer: Renderer,
    meshes: SceneMeshes,
}

/// Entry point called by the host page. `config` is an optional object of
/// scene tuning overrides; `undefined` or `null` keeps the defaults.
#[wasm_bindgen]
pub fn start_portfolio(config: JsValue) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = load_config(config)?;

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let canvas = dom::require_element(&document, dom::CANVAS_ID)?
        .dyn_into::<HtmlCanvasElement>()?;

    let gl = canvas
        .get_context("webgl")?
        .ok_or("No WebGL")?
        .dyn_into::<WebGlRenderingContext>()?;

    let renderer = Renderer::new(gl)?;
    let overlay = DomOverlay::bind(&document)?;
    let reset_button = dom::require_element(&document, dom::RESET_ID)?;

    let mut rng = SmallRng::from_entropy();
    let app: App = Rc::new(RefCell::new(Portfolio::new(
        config,
        window_viewport(&window)?,
        overlay,
        &mut rng,
    )));
    let meshes = SceneMeshes::upload(&renderer, &app.borrow().scene)?;
    let stage = Rc::new(Stage { canvas, renderer, meshes });

    resize_surface(&window, &stage, &mut app.borrow_mut())?;

    // Picking
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let result = app
                .borrow_mut()
                .click(event.client_x() as f32, event.client_y() as f32);
            if let Err(err) = result {
                log::warn!("overlay update failed: {:?}", err);
            }
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Reset
    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            // Keep the click from reaching the window's picking handler.
            event.stop_propagation();
            if let Err(err) = app.borrow_mut().reset() {
                log::warn!("overlay reset failed: {:?}", err);
            }
        }) as Box<dyn FnMut(_)>);
        reset_button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resize
    {
        let app = app.clone();
        let stage = stage.clone();
        let host = window.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Err(err) = resize_surface(&host, &stage, &mut app.borrow_mut()) {
                log::warn!("resize failed: {:?}", err);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    log::info!(
        "solar-portfolio: {} bodies, {} debris, {} stars",
        app.borrow().scene.bodies.len(),
        app.borrow().scene.debris.len(),
        app.borrow().scene.stars.len() / 3,
    );

    run_frame_loop(Rc::new(window), move |timestamp| {
        let mut app = app.borrow_mut();
        app.frame(timestamp);
        draw_scene(&stage.renderer, &stage.meshes, &app.scene, &app.camera, &app.config);
    })
}

fn load_config(value: JsValue) -> Result<SceneConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SceneConfig::default());
    }
    let config: SceneConfig = serde_wasm_bindgen::from_value(value)?;
    config.validate().map_err(|e| JsValue::from_str(&e))?;
    Ok(config)
}

fn window_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().ok_or("No innerWidth")?;
    let height = window.inner_height()?.as_f64().ok_or("No innerHeight")?;
    Ok(Viewport::new(width as f32, height as f32))
}

/// Brings the camera aspect and the drawing buffer in line with the window.
/// Both change here, together, so the next frame never renders with one
/// updated and the other stale.
fn resize_surface(window: &Window, stage: &Stage, app: &mut Portfolio<DomOverlay>) -> Result<(), JsValue> {
    let viewport = window_viewport(window)?;
    app.resize(viewport);

    let (width, height) = viewport.drawing_buffer(window.device_pixel_ratio(), app.config.max_pixel_ratio);
    stage.renderer.resize(width, height);

    let style = stage.canvas.style();
    style.set_property("width", &format!("{}px", viewport.width))?;
    style.set_property("height", &format!("{}px", viewport.height))?;

    log::debug!("resized to {}x{} ({}x{} buffer)", viewport.width, viewport.height, width, height);
    Ok(())
}
