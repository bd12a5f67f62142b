use crate::engine::camera::Camera;
use crate::engine::error::EngineError;
use crate::engine::renderer::{Renderer, SceneObject};

mod engine;

const WIDTH: u32 = 1728;
const HEIGHT: u32 = 972;

fn main() -> Result<(), EngineError> {
    let mut renderer = Renderer::new("OpenGL Experiment", WIDTH, HEIGHT)?;
    renderer.set_clear_color(0.0, 0.0, 0.0, 1.0);

    let ratio = WIDTH as f32 / HEIGHT as f32;
    let mut camera = Camera::new(90.0, ratio);
    camera.set_position([0.1, 1.0, 1.0]);
    camera.set_near_far(0.1, 100.0);
    renderer.set_camera(camera);

    // The crate room: two spinning crates, a floor slab, walls around it.
    renderer.add_object(SceneObject::at([-1.5, 0.6, -2.0]).with_spin([0.0, 1.0, 0.0], 30.0));
    renderer.add_object(SceneObject::at([1.5, 0.6, -2.0]).with_spin([0.0, 1.0, 0.0], -30.0));
    renderer.add_object(SceneObject::at([0.0, 0.0, 0.0]).with_scale([10.0, 0.1, 10.0]));
    renderer.add_object(SceneObject::at([0.0, 0.0, 0.0]).with_scale([9.5, 10.0, 9.5]));

    renderer.run() // blocks until the window closes
}
