use serde::{Deserialize, Serialize};

/// Tuning knobs for the scene. Every field has a default, so a host may pass
/// `{}` or only the fields it wants to change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Angular rate shared by all orbiting bodies, rad/s.
    pub orbit_rate: f32,
    /// Self-rotation added to each orbiting body every frame, rad.
    pub spin_step: f32,

    pub marker_radius: f32,
    pub marker_height: f32,
    pub marker_rate: f32,

    pub debris_count: usize,
    pub debris_step: f32,
    /// Depth past which a piece of debris wraps around.
    pub debris_forward: f32,
    /// Depth a wrapped piece of debris restarts from.
    pub debris_far: f32,

    pub star_count: usize,
    /// Edge length of the cube the stars are scattered in.
    pub star_extent: f32,

    pub camera_home: [f32; 3],
    /// Fraction of the remaining distance covered per frame.
    pub camera_lerp: f32,
    /// Offset from a clicked body to where the camera settles.
    pub focus_offset: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,

    pub fog_near: f32,
    pub fog_far: f32,
    pub max_pixel_ratio: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            orbit_rate: 0.4,
            spin_step: 0.01,
            marker_radius: 18.0,
            marker_height: 6.0,
            marker_rate: 2.0,
            debris_count: 6,
            debris_step: 0.8,
            debris_forward: 20.0,
            debris_far: -80.0,
            star_count: 600,
            star_extent: 400.0,
            camera_home: [0.0, 18.0, 40.0],
            camera_lerp: 0.05,
            focus_offset: [0.0, 2.0, 6.0],
            fov_degrees: 60.0,
            near: 0.1,
            far: 500.0,
            fog_near: 40.0,
            fog_far: 120.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.debris_far >= self.debris_forward {
            return Err(format!(
                "debris_far ({}) must be below debris_forward ({})",
                self.debris_far, self.debris_forward
            ));
        }
        if !(self.camera_lerp > 0.0 && self.camera_lerp <= 1.0) {
            return Err(format!("camera_lerp must be in (0, 1], got {}", self.camera_lerp));
        }
        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(format!("fov_degrees must be in (0, 180), got {}", self.fov_degrees));
        }
        if self.near <= 0.0 || self.near >= self.far {
            return Err(format!("near ({}) must be positive and below far ({})", self.near, self.far));
        }
        if self.fog_near < 0.0 || self.fog_near >= self.fog_far {
            return Err(format!(
                "fog_near ({}) must be non-negative and below fog_far ({})",
                self.fog_near, self.fog_far
            ));
        }
        if self.max_pixel_ratio <= 0.0 {
            return Err(format!("max_pixel_ratio must be positive, got {}", self.max_pixel_ratio));
        }
        Ok(())
    }
}
