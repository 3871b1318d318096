pub mod camera;
pub mod frame;
pub mod mesh;
pub mod ray;
pub mod renderer;
