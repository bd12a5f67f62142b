pub mod camera;
pub mod error;
pub mod math;
pub mod mesh;
pub mod renderer;
pub mod shader;
