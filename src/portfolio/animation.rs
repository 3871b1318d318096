use nalgebra::{Point3, UnitQuaternion, Vector3};
use crate::engine::camera::Camera;
use crate::portfolio::config::SceneConfig;
use crate::portfolio::scene::{BodyKind, Debris, Orbit, Scene};

pub fn orbit_position(orbit: &Orbit, rate: f32, t: f32) -> Point3<f32> {
    let angle = t * rate + orbit.phase;
    Point3::new(angle.cos() * orbit.distance, 0.0, angle.sin() * orbit.distance)
}

/// Closed path of the marker: a fast horizontal circle with a slower bob.
pub fn marker_position(config: &SceneConfig, t: f32) -> Point3<f32> {
    let angle = t * config.marker_rate;
    Point3::new(
        angle.cos() * config.marker_radius,
        t.sin() * config.marker_height,
        angle.sin() * config.marker_radius,
    )
}

/// Rotation turning local +Z towards the origin.
pub fn facing_origin(position: &Point3<f32>) -> UnitQuaternion<f32> {
    let dir = Point3::origin() - position;
    if dir.norm_squared() < 1e-12 {
        return UnitQuaternion::identity();
    }
    UnitQuaternion::face_towards(&dir, &Vector3::y())
}

/// Moves debris one step forward, wrapping back to `debris_far` once it has
/// passed `debris_forward`.
pub fn advance_debris(debris: &mut Debris, config: &SceneConfig) {
    debris.position.z += config.debris_step;
    if debris.position.z > config.debris_forward {
        debris.position.z = config.debris_far;
    }
}

/// One frame of scene motion at `t` seconds into the session.
pub fn tick(scene: &mut Scene, camera: &mut Camera, config: &SceneConfig, t: f32) {
    let spin = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), config.spin_step);

    for body in &mut scene.bodies {
        match body.kind {
            BodyKind::Orbiting(orbit) => {
                body.position = orbit_position(&orbit, config.orbit_rate, t);
                body.rotation = body.rotation * spin;
            }
            BodyKind::Marker => {
                body.position = marker_position(config, t);
                body.rotation = facing_origin(&body.position);
            }
            BodyKind::Central => {}
        }
    }

    for debris in &mut scene.debris {
        advance_debris(debris, config);
    }

    camera.approach_target(config.camera_lerp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn setup() -> (Scene, Camera, SceneConfig) {
        let config = SceneConfig::default();
        let scene = Scene::build(&config, &mut SmallRng::seed_from_u64(42));
        let [x, y, z] = config.camera_home;
        let camera = Camera::new(Point3::new(x, y, z), 16.0 / 9.0, config.fov_degrees, config.near, config.far);
        (scene, camera, config)
    }

    #[test]
    fn orbiting_bodies_stay_on_their_circle() {
        let (mut scene, mut camera, config) = setup();
        for frame in 0..2_000 {
            let t = frame as f32 / 60.0;
            tick(&mut scene, &mut camera, &config, t);
            for body in &scene.bodies {
                if let BodyKind::Orbiting(orbit) = body.kind {
                    let r = (body.position - Point3::origin()).norm();
                    assert!((r - orbit.distance).abs() < 1e-3, "radius {} at t={}", r, t);
                    assert_eq!(body.position.y, 0.0);
                }
            }
        }
    }

    #[test]
    fn phase_offsets_bodies_at_time_zero() {
        let orbit = Orbit { distance: 10.0, phase: 0.0 };
        let p = orbit_position(&orbit, 0.4, 0.0);
        assert!((p.x - 10.0).abs() < 1e-5 && p.z.abs() < 1e-5);

        let shifted = Orbit { distance: 10.0, phase: 1.0 };
        let q = orbit_position(&shifted, 0.4, 0.0);
        assert!((q.x - 1.0_f32.cos() * 10.0).abs() < 1e-5);
    }

    #[test]
    fn debris_never_leaves_its_interval() {
        let (mut scene, mut camera, config) = setup();
        for frame in 0..5_000 {
            tick(&mut scene, &mut camera, &config, frame as f32 / 60.0);
            for d in &scene.debris {
                assert!(d.position.z >= config.debris_far && d.position.z <= config.debris_forward);
            }
        }
    }

    #[test]
    fn debris_wraps_to_far_threshold() {
        let config = SceneConfig::default();
        let mut debris = Debris { position: Point3::new(0.0, 0.0, 19.5) };
        advance_debris(&mut debris, &config);
        assert_eq!(debris.position.z, config.debris_far);
    }

    #[test]
    fn planets_spin_every_tick() {
        let (mut scene, mut camera, config) = setup();
        tick(&mut scene, &mut camera, &config, 0.0);
        tick(&mut scene, &mut camera, &config, 0.0);
        let planet = &scene.bodies[1];
        assert!((planet.rotation.angle() - 2.0 * config.spin_step).abs() < 1e-5);
    }

    #[test]
    fn marker_faces_origin() {
        let (mut scene, mut camera, config) = setup();
        tick(&mut scene, &mut camera, &config, 1.3);
        let marker = scene.marker().unwrap();
        let forward = marker.rotation * Vector3::z();
        let to_origin = (Point3::origin() - marker.position).normalize();
        assert!((forward - to_origin).norm() < 1e-4);
    }

    #[test]
    fn marker_path_is_closed() {
        let config = SceneConfig::default();
        let period = 2.0 * std::f32::consts::PI;
        let a = marker_position(&config, 0.7);
        let b = marker_position(&config, 0.7 + period);
        assert!((a - b).norm() < 1e-3);
    }

    #[test]
    fn camera_without_target_is_stable() {
        let (mut scene, mut camera, config) = setup();
        let start = camera.position;
        for frame in 0..600 {
            tick(&mut scene, &mut camera, &config, frame as f32 / 60.0);
        }
        assert_eq!(camera.position, start);
    }
}
