use nalgebra::{Point3, UnitQuaternion, Vector3};
use rand::Rng;
use crate::portfolio::config::SceneConfig;
use crate::portfolio::content::Section;

/// Index of a clickable body in [`Scene::bodies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub distance: f32,
    /// Static angular offset, the body's index among the orbiting bodies.
    pub phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    Central,
    Orbiting(Orbit),
    Marker,
}

pub struct CelestialBody {
    pub kind: BodyKind,
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
    /// Render scale and bounding radius used for picking.
    pub radius: f32,
    /// Centre of the pick sphere in the body's local frame.
    pub pick_offset: Vector3<f32>,
    pub color: [f32; 3],
}

impl CelestialBody {
    /// World-space centre of the pick sphere.
    pub fn pick_center(&self) -> Point3<f32> {
        self.position + self.rotation * self.pick_offset
    }
}

pub struct Debris {
    pub position: Point3<f32>,
}

#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }
}

pub struct Lights {
    pub ambient: Light,
    pub point: Light,
    pub point_position: Point3<f32>,
}

pub const SUN_RADIUS: f32 = 4.0;
pub const SUN_COLOR: u32 = 0xffaa33;
pub const ROCKET_BODY_COLOR: u32 = 0xffffff;
pub const ROCKET_NOSE_COLOR: u32 = 0xff5722;
pub const ROCKET_BODY_RADIUS: f32 = 0.3;
pub const ROCKET_BODY_LENGTH: f32 = 2.0;
pub const ROCKET_NOSE_RADIUS: f32 = 0.35;
pub const ROCKET_NOSE_LENGTH: f32 = 0.8;
/// Height of the nose cone's centre above the rocket's origin.
pub const ROCKET_NOSE_OFFSET: f32 = 1.4;
pub const DEBRIS_COLOR: u32 = 0x888888;
pub const DEBRIS_RADIUS: f32 = 0.3;
const DEBRIS_START_DEPTH: f32 = -60.0;
pub const STAR_COLOR: u32 = 0xffffff;
pub const STAR_SIZE: f32 = 0.6;

struct PlanetSpec {
    radius: f32,
    distance: f32,
    color: u32,
    section: Section,
}

const PLANETS: [PlanetSpec; 4] = [
    PlanetSpec { radius: 1.6, distance: 10.0, color: 0x3399ff, section: Section::Education },
    PlanetSpec { radius: 1.8, distance: 15.0, color: 0xff4444, section: Section::Work },
    PlanetSpec { radius: 1.7, distance: 20.0, color: 0x44cc66, section: Section::Skills },
    PlanetSpec { radius: 1.9, distance: 26.0, color: 0xaa66ff, section: Section::Projects },
];

/// Sphere around the whole rocket, from the bottom of the body to the nose
/// tip, as (local centre, radius).
pub fn rocket_bounds() -> (Vector3<f32>, f32) {
    let bottom = -ROCKET_BODY_LENGTH / 2.0;
    let tip = ROCKET_NOSE_OFFSET + ROCKET_NOSE_LENGTH / 2.0;
    let center = (bottom + tip) / 2.0;
    let half_length = (tip - bottom) / 2.0;
    let widest = ROCKET_BODY_RADIUS.max(ROCKET_NOSE_RADIUS);
    // The widest rim can sit at either end, so cover the corner of the
    // enclosing cylinder.
    let radius = (half_length * half_length + widest * widest).sqrt();
    (Vector3::new(0.0, center, 0.0), radius)
}

pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub struct Scene {
    pub bodies: Vec<CelestialBody>,
    /// Parallel to `bodies`: the section each body opens.
    sections: Vec<Section>,
    pub debris: Vec<Debris>,
    /// Flat xyz triples.
    pub stars: Vec<f32>,
    pub lights: Lights,
}

impl Scene {
    pub fn build<R: Rng>(config: &SceneConfig, rng: &mut R) -> Self {
        let mut bodies = Vec::new();
        let mut sections = Vec::new();

        bodies.push(CelestialBody {
            kind: BodyKind::Central,
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            radius: SUN_RADIUS,
            pick_offset: Vector3::zeros(),
            color: rgb(SUN_COLOR),
        });
        sections.push(Section::About);

        for (i, planet) in PLANETS.iter().enumerate() {
            let orbit = Orbit { distance: planet.distance, phase: i as f32 };
            bodies.push(CelestialBody {
                kind: BodyKind::Orbiting(orbit),
                position: Point3::new(orbit.phase.cos() * orbit.distance, 0.0, orbit.phase.sin() * orbit.distance),
                rotation: UnitQuaternion::identity(),
                radius: planet.radius,
                pick_offset: Vector3::zeros(),
                color: rgb(planet.color),
            });
            sections.push(planet.section);
        }

        let (rocket_center, rocket_radius) = rocket_bounds();
        bodies.push(CelestialBody {
            kind: BodyKind::Marker,
            position: Point3::new(config.marker_radius, 0.0, 0.0),
            rotation: UnitQuaternion::identity(),
            radius: rocket_radius,
            pick_offset: rocket_center,
            color: rgb(ROCKET_BODY_COLOR),
        });
        sections.push(Section::Connect);

        let debris = (0..config.debris_count)
            .map(|_| Debris {
                position: Point3::new(
                    rng.gen_range(-40.0..40.0),
                    rng.gen_range(0.0..40.0),
                    DEBRIS_START_DEPTH.clamp(config.debris_far, config.debris_forward),
                ),
            })
            .collect();

        let half = config.star_extent / 2.0;
        let stars = (0..config.star_count * 3)
            .map(|_| if half > 0.0 { rng.gen_range(-half..half) } else { 0.0 })
            .collect();

        let lights = Lights {
            ambient: Light { color: [1.0, 1.0, 1.0], intensity: 0.4 },
            point: Light { color: [1.0, 1.0, 1.0], intensity: 1.4 },
            point_position: Point3::origin(),
        };

        Scene { bodies, sections, debris, stars, lights }
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    pub fn section_of(&self, id: BodyId) -> Option<Section> {
        self.sections.get(id.0).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn marker(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.kind == BodyKind::Marker)
    }
}
