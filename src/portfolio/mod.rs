pub mod animation;
pub mod config;
pub mod content;
pub mod overlay;
pub mod picking;
pub mod render;
pub mod scene;

use nalgebra::{Point3, Vector3};
use rand::Rng;
use wasm_bindgen::JsValue;
use crate::engine::camera::Camera;
use crate::engine::frame::FrameClock;
use self::config::SceneConfig;
use self::content::Section;
use self::overlay::{Overlay, OverlayState, OverlayView};
use self::picking::{pick, pointer_to_ndc, Viewport};
use self::scene::Scene;

/// Whole-session application state. Input handlers and the frame callback
/// both receive it by reference; nothing lives in globals.
pub struct Portfolio<V: OverlayView> {
    pub config: SceneConfig,
    pub scene: Scene,
    pub camera: Camera,
    overlay: Overlay<V>,
    viewport: Viewport,
    clock: FrameClock,
}

impl<V: OverlayView> Portfolio<V> {
    pub fn new<R: Rng>(config: SceneConfig, viewport: Viewport, view: V, rng: &mut R) -> Self {
        let scene = Scene::build(&config, rng);
        let camera = Camera::new(
            home_position(&config),
            viewport.aspect(),
            config.fov_degrees,
            config.near,
            config.far,
        );

        Portfolio {
            config,
            scene,
            camera,
            overlay: Overlay::new(view),
            viewport,
            clock: FrameClock::new(),
        }
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Advances the scene to the given host frame timestamp.
    pub fn frame(&mut self, timestamp_ms: f64) {
        let t = self.clock.elapsed(timestamp_ms);
        animation::tick(&mut self.scene, &mut self.camera, &self.config, t);
    }

    /// Handles a click at CSS pixel coordinates. A miss leaves every piece
    /// of state untouched.
    pub fn click(&mut self, x: f32, y: f32) -> Result<Option<Section>, JsValue> {
        let ndc = pointer_to_ndc(x, y, &self.viewport);
        let ray = self.camera.ray_through(ndc);
        let Some(id) = pick(&self.scene, &ray) else {
            return Ok(None);
        };
        let (Some(body), Some(section)) = (self.scene.body(id), self.scene.section_of(id)) else {
            return Ok(None);
        };

        // Aimed once at the body's current position; an orbiting body keeps
        // moving while the camera eases in.
        let [ox, oy, oz] = self.config.focus_offset;
        self.camera.target = Some(body.position + Vector3::new(ox, oy, oz));

        log::debug!("picked {:?} at {:?}", section, body.position);
        self.overlay.show(section.entry())?;
        Ok(Some(section))
    }

    /// Hides the overlay and sends the camera back to its home framing.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.camera.target = Some(home_position(&self.config));
        log::debug!("reset camera");
        self.overlay.hide()
    }

    /// Updates the projection for a new viewport. The caller resizes the
    /// drawing buffer in the same handler, before the next frame.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }
}

fn home_position(config: &SceneConfig) -> Point3<f32> {
    let [x, y, z] = config.camera_home;
    Point3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use crate::portfolio::overlay::tests::{RecordingView, ViewCall};

    fn portfolio() -> Portfolio<RecordingView> {
        Portfolio::new(
            SceneConfig::default(),
            Viewport::new(1920.0, 1080.0),
            RecordingView::default(),
            &mut SmallRng::seed_from_u64(3),
        )
    }

    /// Screen position of a world point under the portfolio's camera.
    fn screen_of(p: &Portfolio<RecordingView>, world: &Point3<f32>) -> (f32, f32) {
        let clip: Matrix4<f32> = p.camera.projection() * p.camera.view();
        let ndc = clip.transform_point(world);
        let vp = p.viewport();
        ((ndc.x + 1.0) / 2.0 * vp.width, (1.0 - ndc.y) / 2.0 * vp.height)
    }

    #[test]
    fn clicking_the_sun_shows_about() {
        let mut p = portfolio();
        let (x, y) = screen_of(&p, &Point3::origin());

        assert_eq!(p.click(x, y).unwrap(), Some(Section::About));
        let state = p.overlay();
        assert!(state.visible);
        assert_eq!(state.entry.map(|e| e.title), Some("About Me"));
        assert_eq!(state.entry, Some(Section::About.entry()));
        assert_eq!(p.camera.target, Some(Point3::new(0.0, 2.0, 6.0)));
    }

    #[test]
    fn clicking_a_planet_targets_its_click_time_position() {
        let mut p = portfolio();
        p.frame(0.0);
        p.frame(1_000.0);
        let planet = p.scene.bodies[2].position;
        let (x, y) = screen_of(&p, &planet);

        assert_eq!(p.click(x, y).unwrap(), Some(Section::Work));
        assert_eq!(p.camera.target, Some(planet + Vector3::new(0.0, 2.0, 6.0)));

        // The planet moves on; the target does not follow it.
        p.frame(2_000.0);
        assert_ne!(p.scene.bodies[2].position, planet);
        assert_eq!(p.camera.target, Some(planet + Vector3::new(0.0, 2.0, 6.0)));
    }

    #[test]
    fn every_body_opens_its_own_section() {
        for id in portfolio().scene.ids() {
            let mut p = portfolio();
            let body = p.scene.bodies[id.0].position;
            let (x, y) = screen_of(&p, &body);
            let expected = p.scene.section_of(id);
            assert_eq!(p.click(x, y).unwrap(), expected);
            assert_eq!(p.overlay().entry, expected.map(Section::entry));
        }
    }

    #[test]
    fn miss_changes_nothing() {
        let mut p = portfolio();
        let (x, y) = screen_of(&p, &Point3::origin());
        p.click(x, y).unwrap();
        let before_overlay = p.overlay();
        let before_target = p.camera.target;

        // Top-left corner looks into empty sky.
        assert_eq!(p.click(1.0, 1.0).unwrap(), None);
        assert_eq!(p.overlay(), before_overlay);
        assert_eq!(p.camera.target, before_target);
        assert_eq!(p.overlay.view().calls.borrow().len(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut p = portfolio();
        let (x, y) = screen_of(&p, &Point3::origin());
        p.click(x, y).unwrap();

        for _ in 0..3 {
            p.reset().unwrap();
            assert!(!p.overlay().visible);
            assert_eq!(p.overlay().entry, None);
            assert_eq!(p.camera.target, Some(Point3::new(0.0, 18.0, 40.0)));
        }
        assert_eq!(p.overlay.view().calls.borrow().last(), Some(&ViewCall::Hide));
    }

    #[test]
    fn reset_returns_camera_home() {
        let mut p = portfolio();
        let (x, y) = screen_of(&p, &Point3::origin());
        p.click(x, y).unwrap();
        for i in 0..200 {
            p.frame(i as f64 * 16.0);
        }
        assert!((p.camera.position - Point3::new(0.0, 2.0, 6.0)).norm() < 0.01);

        p.reset().unwrap();
        for i in 200..400 {
            p.frame(i as f64 * 16.0);
        }
        assert!((p.camera.position - Point3::new(0.0, 18.0, 40.0)).norm() < 0.01);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut p = portfolio();
        assert!((p.camera.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        p.resize(Viewport::new(800.0, 600.0));
        assert!((p.camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(p.viewport().drawing_buffer(1.0, 2.0), (800, 600));
    }
}
