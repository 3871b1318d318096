use nalgebra::{Matrix4, Perspective3, Point3, Vector2, Vector3};
use crate::engine::ray::Ray;

/// Perspective camera that always looks at the world origin.
///
/// Position is the only stored pose; the view matrix is rebuilt from it on
/// demand, so there is no orientation state that can drift.
pub struct Camera {
    pub position: Point3<f32>,
    /// Where the camera is easing towards, if anywhere.
    pub target: Option<Point3<f32>>,
    projection: Perspective3<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>, aspect: f32, fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Camera {
            position,
            target: None,
            projection: Perspective3::new(aspect, fov_y_degrees.to_radians(), near, far),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.projection.aspect()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection.set_aspect(aspect);
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &Point3::origin(), &Vector3::y())
    }

    pub fn projection(&self) -> Matrix4<f32> {
        self.projection.to_homogeneous()
    }

    /// Moves `factor` of the remaining distance towards the target. Without a
    /// target the camera stays exactly where it is.
    pub fn approach_target(&mut self, factor: f32) {
        if let Some(target) = self.target {
            self.position = Point3::from(self.position.coords.lerp(&target.coords, factor));
        }
    }

    /// World-space ray from the eye through a point in normalized device
    /// coordinates (x and y in [-1, 1], +y up).
    pub fn ray_through(&self, ndc: Vector2<f32>) -> Ray {
        let inverse = (self.projection() * self.view())
            .try_inverse()
            .unwrap_or_else(Matrix4::identity);
        let on_far_plane = inverse.transform_point(&Point3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, on_far_plane - self.position)
    }
}
