use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// Floats per vertex: position (3) followed by normal (3).
pub const VERTEX_STRIDE: usize = 6;

/// Flat-shaded triangle soup. Every triangle owns its three vertices so each
/// carries the face normal, which is what gives the low-poly faceted look.
pub struct Mesh {
    pub vertices: Vec<f32>,
}

impl Mesh {
    fn new() -> Self {
        Mesh { vertices: Vec::new() }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    fn push_triangle(&mut self, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) {
        let normal = (b - a).cross(&(c - a));
        // Degenerate triangles at the poles collapse to a line; skip them.
        if normal.norm_squared() < 1e-12 {
            return;
        }
        let n = normal.normalize();
        for p in [a, b, c] {
            self.vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
    }

    fn push_quad(&mut self, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, d: Point3<f32>) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// UV sphere with counter-clockwise outward faces.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut mesh = Mesh::new();
        let point = |ix: u32, iy: u32| -> Point3<f32> {
            let u = ix as f32 / width_segments as f32;
            let v = iy as f32 / height_segments as f32;
            let phi = u * 2.0 * PI;
            let theta = v * PI;
            Point3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            )
        };

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = point(ix, iy);
                let b = point(ix, iy + 1);
                let c = point(ix + 1, iy + 1);
                let d = point(ix + 1, iy);
                mesh.push_quad(a, b, c, d);
            }
        }
        mesh
    }

    /// Capped cylinder centred on the origin along +Y. A zero `radius_top`
    /// gives a cone.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let mut mesh = Mesh::new();
        let half = height / 2.0;
        let ring = |i: u32, r: f32, y: f32| -> Point3<f32> {
            let angle = i as f32 / radial_segments as f32 * 2.0 * PI;
            Point3::new(r * angle.sin(), y, r * angle.cos())
        };

        for i in 0..radial_segments {
            let top_a = ring(i, radius_top, half);
            let top_b = ring(i + 1, radius_top, half);
            let bottom_a = ring(i, radius_bottom, -half);
            let bottom_b = ring(i + 1, radius_bottom, -half);

            if radius_top > 0.0 {
                mesh.push_quad(top_a, bottom_a, bottom_b, top_b);
                mesh.push_triangle(Point3::new(0.0, half, 0.0), top_a, top_b);
            } else {
                mesh.push_triangle(top_a, bottom_a, bottom_b);
            }
            if radius_bottom > 0.0 {
                mesh.push_triangle(Point3::new(0.0, -half, 0.0), bottom_b, bottom_a);
            }
        }
        mesh
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Mesh::cylinder(0.0, radius, height, radial_segments)
    }

    /// Regular icosahedron, used for the tumbling debris.
    pub fn icosahedron(radius: f32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let raw = [
            (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
            (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
            (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
        ];
        let corners: Vec<Point3<f32>> = raw
            .iter()
            .map(|&(x, y, z)| Point3::from(Vector3::new(x, y, z).normalize() * radius))
            .collect();
        let faces: [(usize, usize, usize); 20] = [
            (0, 11, 5), (0, 5, 1), (0, 1, 7), (0, 7, 10), (0, 10, 11),
            (1, 5, 9), (5, 11, 4), (11, 10, 2), (10, 7, 6), (7, 1, 8),
            (3, 9, 4), (3, 4, 2), (3, 2, 6), (3, 6, 8), (3, 8, 9),
            (4, 9, 5), (2, 4, 11), (6, 2, 10), (8, 6, 7), (9, 8, 1),
        ];

        let mut mesh = Mesh::new();
        for (a, b, c) in faces {
            mesh.push_triangle(corners[a], corners[b], corners[c]);
        }
        mesh
    }
}
