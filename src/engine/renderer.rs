use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{WebGlRenderingContext, WebGlProgram, WebGlBuffer, WebGlUniformLocation, HtmlCanvasElement};
use nalgebra::{Matrix4, Point3};
use crate::engine::mesh::{Mesh, VERTEX_STRIDE};

const VERTEX_SHADER: &str = r#"
    attribute vec3 aPosition;
    attribute vec3 aNormal;
    uniform mat4 uModel;
    uniform mat4 uView;
    uniform mat4 uProjection;
    uniform float uPointSize;
    uniform float uPointScale;
    varying vec3 vWorldPos;
    varying vec3 vNormal;
    varying float vDepth;
    void main() {
        vec4 world = uModel * vec4(aPosition, 1.0);
        vec4 eye = uView * world;
        gl_Position = uProjection * eye;
        gl_PointSize = uPointSize * uPointScale / max(-eye.z, 0.001);
        vWorldPos = world.xyz;
        vNormal = (uModel * vec4(aNormal, 0.0)).xyz;
        vDepth = -eye.z;
    }
"#;

const FRAGMENT_SHADER: &str = r#"
    precision mediump float;
    varying vec3 vWorldPos;
    varying vec3 vNormal;
    varying float vDepth;
    uniform vec3 uColor;
    uniform bool uLit;
    uniform vec3 uAmbient;
    uniform vec3 uLightPosition;
    uniform vec3 uLightColor;
    uniform vec3 uCameraPosition;
    uniform vec3 uFogColor;
    uniform float uFogNear;
    uniform float uFogFar;

    void main() {
        vec3 color = uColor;

        if (uLit) {
            vec3 n = normalize(vNormal);
            vec3 l = normalize(uLightPosition - vWorldPos);
            vec3 v = normalize(uCameraPosition - vWorldPos);
            vec3 h = normalize(l + v);
            float diffuse = max(dot(n, l), 0.0);
            float specular = pow(max(dot(n, h), 0.0), 30.0);
            color = uColor * (uAmbient + uLightColor * diffuse) + uLightColor * specular * 0.07;
        }

        float fog = smoothstep(uFogNear, uFogFar, vDepth);
        gl_FragColor = vec4(mix(color, uFogColor, fog), 1.0);
    }
"#;

/// A triangle list uploaded once and drawn many times.
pub struct GpuMesh {
    buffer: WebGlBuffer,
    vertex_count: i32,
}

/// A point cloud uploaded once; positions only.
pub struct GpuPoints {
    buffer: WebGlBuffer,
    point_count: i32,
}

/// Per-frame shading parameters shared by every draw call.
pub struct FrameUniforms {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub camera_position: Point3<f32>,
    pub ambient: [f32; 3],
    pub light_position: Point3<f32>,
    pub light_color: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
}

pub struct Renderer {
    pub gl: WebGlRenderingContext,
    program: WebGlProgram,
    position_location: u32,
    normal_location: u32,
    model_location: WebGlUniformLocation,
    view_location: WebGlUniformLocation,
    projection_location: WebGlUniformLocation,
    color_location: WebGlUniformLocation,
    lit_location: WebGlUniformLocation,
    point_size_location: WebGlUniformLocation,
    point_scale_location: WebGlUniformLocation,
    ambient_location: WebGlUniformLocation,
    light_position_location: WebGlUniformLocation,
    light_color_location: WebGlUniformLocation,
    camera_position_location: WebGlUniformLocation,
    fog_color_location: WebGlUniformLocation,
    fog_near_location: WebGlUniformLocation,
    fog_far_location: WebGlUniformLocation,
}

impl Renderer {
    pub fn new(gl: WebGlRenderingContext) -> Result<Self, JsValue> {
        let program = create_program(&gl)?;
        gl.use_program(Some(&program));

        let position_location = attrib_location(&gl, &program, "aPosition")?;
        let normal_location = attrib_location(&gl, &program, "aNormal")?;
        let uniform = |name: &str| -> Result<WebGlUniformLocation, JsValue> {
            gl.get_uniform_location(&program, name)
                .ok_or_else(|| JsValue::from_str(&format!("Failed to get {} location", name)))
        };

        let renderer = Renderer {
            position_location,
            normal_location,
            model_location: uniform("uModel")?,
            view_location: uniform("uView")?,
            projection_location: uniform("uProjection")?,
            color_location: uniform("uColor")?,
            lit_location: uniform("uLit")?,
            point_size_location: uniform("uPointSize")?,
            point_scale_location: uniform("uPointScale")?,
            ambient_location: uniform("uAmbient")?,
            light_position_location: uniform("uLightPosition")?,
            light_color_location: uniform("uLightColor")?,
            camera_position_location: uniform("uCameraPosition")?,
            fog_color_location: uniform("uFogColor")?,
            fog_near_location: uniform("uFogNear")?,
            fog_far_location: uniform("uFogFar")?,
            program,
            gl,
        };

        renderer.gl.enable(WebGlRenderingContext::DEPTH_TEST);
        renderer.gl.enable(WebGlRenderingContext::CULL_FACE);
        Ok(renderer)
    }

    pub fn upload_mesh(&self, mesh: &Mesh) -> Result<GpuMesh, JsValue> {
        let buffer = self.upload(&mesh.vertices)?;
        Ok(GpuMesh { buffer, vertex_count: mesh.vertex_count() as i32 })
    }

    pub fn upload_points(&self, positions: &[f32]) -> Result<GpuPoints, JsValue> {
        let buffer = self.upload(positions)?;
        Ok(GpuPoints { buffer, point_count: (positions.len() / 3) as i32 })
    }

    fn upload(&self, data: &[f32]) -> Result<WebGlBuffer, JsValue> {
        let buffer = self.gl.create_buffer().ok_or("Failed to create buffer")?;
        self.gl.bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&buffer));
        // The view is consumed by buffer_data before any further allocation.
        unsafe {
            let array = js_sys::Float32Array::view(data);
            self.gl.buffer_data_with_array_buffer_view(
                WebGlRenderingContext::ARRAY_BUFFER,
                &array,
                WebGlRenderingContext::STATIC_DRAW
            );
        }
        Ok(buffer)
    }

    pub fn clear(&self, r: f32, g: f32, b: f32) {
        self.gl.clear_color(r, g, b, 1.0);
        self.gl.clear(WebGlRenderingContext::COLOR_BUFFER_BIT | WebGlRenderingContext::DEPTH_BUFFER_BIT);
    }

    /// Resizes the drawing buffer and the GL viewport together.
    pub fn resize(&self, width: u32, height: u32) {
        if let Some(canvas) = self.canvas() {
            canvas.set_width(width);
            canvas.set_height(height);
        }
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    pub fn canvas(&self) -> Option<HtmlCanvasElement> {
        self.gl.canvas()?.dyn_into::<HtmlCanvasElement>().ok()
    }

    pub fn begin_frame(&self, frame: &FrameUniforms) {
        let gl = &self.gl;
        gl.uniform_matrix4fv_with_f32_array(Some(&self.view_location), false, frame.view.as_slice());
        gl.uniform_matrix4fv_with_f32_array(Some(&self.projection_location), false, frame.projection.as_slice());
        gl.uniform3f(
            Some(&self.camera_position_location),
            frame.camera_position.x, frame.camera_position.y, frame.camera_position.z,
        );
        gl.uniform3fv_with_f32_array(Some(&self.ambient_location), &frame.ambient);
        gl.uniform3f(
            Some(&self.light_position_location),
            frame.light_position.x, frame.light_position.y, frame.light_position.z,
        );
        gl.uniform3fv_with_f32_array(Some(&self.light_color_location), &frame.light_color);
        gl.uniform3fv_with_f32_array(Some(&self.fog_color_location), &frame.fog_color);
        gl.uniform1f(Some(&self.fog_near_location), frame.fog_near);
        gl.uniform1f(Some(&self.fog_far_location), frame.fog_far);

        // Perspective point attenuation scales by half the drawing-buffer height.
        let half_height = self.canvas().map(|c| c.height() as f32 / 2.0).unwrap_or(1.0);
        gl.uniform1f(Some(&self.point_scale_location), half_height);
    }

    pub fn draw_mesh(&self, mesh: &GpuMesh, model: &Matrix4<f32>, color: [f32; 3]) {
        let gl = &self.gl;
        gl.bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&mesh.buffer));

        let stride = (VERTEX_STRIDE * 4) as i32;
        gl.vertex_attrib_pointer_with_i32(self.position_location, 3, WebGlRenderingContext::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(self.position_location);
        gl.vertex_attrib_pointer_with_i32(self.normal_location, 3, WebGlRenderingContext::FLOAT, false, stride, 12);
        gl.enable_vertex_attrib_array(self.normal_location);

        gl.uniform1i(Some(&self.lit_location), 1);
        gl.uniform3fv_with_f32_array(Some(&self.color_location), &color);
        gl.uniform_matrix4fv_with_f32_array(Some(&self.model_location), false, model.as_slice());

        gl.draw_arrays(WebGlRenderingContext::TRIANGLES, 0, mesh.vertex_count);
    }

    pub fn draw_points(&self, points: &GpuPoints, size: f32, color: [f32; 3]) {
        let gl = &self.gl;
        gl.bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&points.buffer));

        gl.vertex_attrib_pointer_with_i32(self.position_location, 3, WebGlRenderingContext::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(self.position_location);
        // Unlit points have no normals; feed a constant instead.
        gl.disable_vertex_attrib_array(self.normal_location);
        gl.vertex_attrib3f(self.normal_location, 0.0, 1.0, 0.0);

        gl.uniform1i(Some(&self.lit_location), 0);
        gl.uniform1f(Some(&self.point_size_location), size);
        gl.uniform3fv_with_f32_array(Some(&self.color_location), &color);
        gl.uniform_matrix4fv_with_f32_array(Some(&self.model_location), false, Matrix4::<f32>::identity().as_slice());

        gl.draw_arrays(WebGlRenderingContext::POINTS, 0, points.point_count);
    }
}

fn attrib_location(gl: &WebGlRenderingContext, program: &WebGlProgram, name: &str) -> Result<u32, JsValue> {
    let location = gl.get_attrib_location(program, name);
    if location < 0 {
        return Err(JsValue::from_str(&format!("Failed to get {} location", name)));
    }
    Ok(location as u32)
}

fn create_program(gl: &WebGlRenderingContext) -> Result<WebGlProgram, JsValue> {
    let vert_shader = compile_shader(gl, WebGlRenderingContext::VERTEX_SHADER, VERTEX_SHADER)?;
    let frag_shader = compile_shader(gl, WebGlRenderingContext::FRAGMENT_SHADER, FRAGMENT_SHADER)?;

    let program = gl.create_program().ok_or("Unable to create program")?;
    gl.attach_shader(&program, &vert_shader);
    gl.attach_shader(&program, &frag_shader);
    gl.link_program(&program);

    if gl.get_program_parameter(&program, WebGlRenderingContext::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        Err(JsValue::from_str(&gl.get_program_info_log(&program).unwrap_or_default()))
    }
}

fn compile_shader(gl: &WebGlRenderingContext, shader_type: u32, source: &str) -> Result<web_sys::WebGlShader, JsValue> {
    let shader = gl.create_shader(shader_type).ok_or("Unable to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl.get_shader_parameter(&shader, WebGlRenderingContext::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        Err(JsValue::from_str(&gl.get_shader_info_log(&shader).unwrap_or_default()))
    }
}
