use nalgebra::{Matrix4, Vector3};
use wasm_bindgen::JsValue;
use crate::engine::camera::Camera;
use crate::engine::mesh::Mesh;
use crate::engine::renderer::{FrameUniforms, GpuMesh, GpuPoints, Renderer};
use crate::portfolio::config::SceneConfig;
use crate::portfolio::scene::{
    rgb, BodyKind, Scene, DEBRIS_COLOR, DEBRIS_RADIUS, ROCKET_BODY_LENGTH, ROCKET_BODY_RADIUS,
    ROCKET_NOSE_COLOR, ROCKET_NOSE_LENGTH, ROCKET_NOSE_OFFSET, ROCKET_NOSE_RADIUS, STAR_COLOR,
    STAR_SIZE,
};

/// Everything the scene needs on the GPU, uploaded once at startup.
pub struct SceneMeshes {
    sphere: GpuMesh,
    rocket_body: GpuMesh,
    rocket_nose: GpuMesh,
    rock: GpuMesh,
    stars: GpuPoints,
}

impl SceneMeshes {
    pub fn upload(renderer: &Renderer, scene: &Scene) -> Result<Self, JsValue> {
        Ok(SceneMeshes {
            // Unit sphere, scaled per body. Six segments keep the faceted look.
            sphere: renderer.upload_mesh(&Mesh::sphere(1.0, 6, 6))?,
            rocket_body: renderer.upload_mesh(&Mesh::cylinder(
                ROCKET_BODY_RADIUS,
                ROCKET_BODY_RADIUS,
                ROCKET_BODY_LENGTH,
                6,
            ))?,
            rocket_nose: renderer.upload_mesh(&Mesh::cone(ROCKET_NOSE_RADIUS, ROCKET_NOSE_LENGTH, 6))?,
            rock: renderer.upload_mesh(&Mesh::icosahedron(DEBRIS_RADIUS))?,
            stars: renderer.upload_points(&scene.stars)?,
        })
    }
}

/// Draws the full scene from the camera.
pub fn draw_scene(renderer: &Renderer, meshes: &SceneMeshes, scene: &Scene, camera: &Camera, config: &SceneConfig) {
    renderer.clear(0.0, 0.0, 0.0);
    renderer.begin_frame(&FrameUniforms {
        view: camera.view(),
        projection: camera.projection(),
        camera_position: camera.position,
        ambient: scene.lights.ambient.radiance(),
        light_position: scene.lights.point_position,
        light_color: scene.lights.point.radiance(),
        fog_color: [0.0, 0.0, 0.0],
        fog_near: config.fog_near,
        fog_far: config.fog_far,
    });

    for body in &scene.bodies {
        let placement = Matrix4::new_translation(&body.position.coords) * body.rotation.to_homogeneous();
        match body.kind {
            BodyKind::Central | BodyKind::Orbiting(_) => {
                let model = placement * Matrix4::new_scaling(body.radius);
                renderer.draw_mesh(&meshes.sphere, &model, body.color);
            }
            BodyKind::Marker => {
                renderer.draw_mesh(&meshes.rocket_body, &placement, body.color);
                let nose = placement * Matrix4::new_translation(&Vector3::new(0.0, ROCKET_NOSE_OFFSET, 0.0));
                renderer.draw_mesh(&meshes.rocket_nose, &nose, rgb(ROCKET_NOSE_COLOR));
            }
        }
    }

    let rock_color = rgb(DEBRIS_COLOR);
    for debris in &scene.debris {
        let model = Matrix4::new_translation(&debris.position.coords);
        renderer.draw_mesh(&meshes.rock, &model, rock_color);
    }

    renderer.draw_points(&meshes.stars, STAR_SIZE, rgb(STAR_COLOR));
}
