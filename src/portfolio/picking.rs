use nalgebra::Vector2;
use crate::engine::ray::Ray;
use crate::portfolio::scene::{BodyId, Scene};

/// Size of the area pointer coordinates are measured in, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width: width.max(1.0), height: height.max(1.0) }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Drawing-buffer size for this viewport at the given device pixel
    /// ratio, capped at `max_ratio`.
    pub fn drawing_buffer(&self, device_pixel_ratio: f64, max_ratio: f64) -> (u32, u32) {
        let ratio = device_pixel_ratio.min(max_ratio).max(0.0) as f32;
        (
            (self.width * ratio).round().max(1.0) as u32,
            (self.height * ratio).round().max(1.0) as u32,
        )
    }
}

/// Pointer position to normalized device coordinates, +y up.
pub fn pointer_to_ndc(x: f32, y: f32, viewport: &Viewport) -> Vector2<f32> {
    Vector2::new(
        x / viewport.width * 2.0 - 1.0,
        -(y / viewport.height) * 2.0 + 1.0,
    )
}

/// Nearest clickable body along the ray. Debris and stars are not part of
/// `Scene::bodies`, so they can never be picked.
pub fn pick(scene: &Scene, ray: &Ray) -> Option<BodyId> {
    scene
        .ids()
        .zip(scene.bodies.iter())
        .filter_map(|(id, body)| ray.intersect_sphere(&body.pick_center(), body.radius).map(|t| (id, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use crate::engine::camera::Camera;
    use crate::portfolio::animation;
    use crate::portfolio::config::SceneConfig;
    use crate::portfolio::scene::BodyKind;

    fn scene() -> Scene {
        Scene::build(&SceneConfig::default(), &mut SmallRng::seed_from_u64(1))
    }

    #[test]
    fn ndc_corners_and_center() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(pointer_to_ndc(400.0, 300.0, &vp), Vector2::new(0.0, 0.0));
        assert_eq!(pointer_to_ndc(0.0, 0.0, &vp), Vector2::new(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(800.0, 600.0, &vp), Vector2::new(1.0, -1.0));
    }

    #[test]
    fn nearest_body_wins() {
        let mut scene = scene();
        // Line the first planet up in front of the sun as seen from +z.
        scene.bodies[1].position = Point3::new(0.0, 0.0, 10.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 50.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(pick(&scene, &ray), Some(BodyId(1)));

        let reversed = Ray::new(Point3::new(0.0, 0.0, -50.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(pick(&scene, &reversed), Some(BodyId(0)));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let ray = Ray::new(Point3::new(0.0, 100.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(pick(&scene(), &ray), None);
    }

    #[test]
    fn marker_is_pickable() {
        let scene = scene();
        let marker = scene.marker().unwrap().position;
        let ray = Ray::new(marker + Vector3::new(0.0, 30.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        let id = pick(&scene, &ray).unwrap();
        assert_eq!(scene.bodies[id.0].kind, BodyKind::Marker);
    }

    #[test]
    fn rocket_nose_is_pickable_once_oriented() {
        let config = SceneConfig::default();
        let mut scene = Scene::build(&config, &mut SmallRng::seed_from_u64(1));
        let mut camera = Camera::new(Point3::new(0.0, 18.0, 40.0), 1.0, 60.0, 0.1, 500.0);
        animation::tick(&mut scene, &mut camera, &config, 1.3);

        let marker = scene.marker().unwrap();
        let nose = marker.position + marker.rotation * Vector3::new(0.0, 1.6, 0.0);
        let ray = Ray::new(nose + Vector3::new(0.0, 0.0, 60.0), Vector3::new(0.0, 0.0, -1.0));
        let id = pick(&scene, &ray).unwrap();
        assert_eq!(scene.bodies[id.0].kind, BodyKind::Marker);
    }

    #[test]
    fn rocket_base_is_pickable_at_rest() {
        let scene = scene();
        let marker = scene.marker().unwrap();
        let base = marker.position + Vector3::new(0.0, -0.9, 0.0);
        let ray = Ray::new(base + Vector3::new(0.0, 0.0, 60.0), Vector3::new(0.0, 0.0, -1.0));
        let id = pick(&scene, &ray).unwrap();
        assert_eq!(scene.bodies[id.0].kind, BodyKind::Marker);
    }

    #[test]
    fn debris_is_not_pickable() {
        let scene = scene();
        let d = scene.debris[0].position;
        let ray = Ray::new(Point3::new(d.x, 100.0, d.z), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(pick(&scene, &ray), None);
    }

    #[test]
    fn drawing_buffer_caps_pixel_ratio() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.drawing_buffer(3.0, 2.0), (1600, 1200));
        assert_eq!(vp.drawing_buffer(1.0, 2.0), (800, 600));
    }
}
