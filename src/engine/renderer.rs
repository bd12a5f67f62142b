use glutin::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
    window::WindowBuilder,
    ContextBuilder, ContextWrapper, PossiblyCurrent,
};
use std::time::Instant;

use crate::engine::camera::Camera;
use crate::engine::error::EngineError;
use crate::engine::math::{Matrix4, Vector3};
use crate::engine::mesh::{GLMesh, Geometry};
use crate::engine::shader::ShaderProgram;

const VERTEX_SHADER: &str = include_str!("../../shaders/cube.vert");
const FRAGMENT_SHADER: &str = include_str!("../../shaders/cube.frag");

/// One cube instance in the scene: its transform parameters, not a baked
/// matrix. The renderer rebuilds `scale`/`rotate`/`translate` from these
/// every frame and uploads each as its own uniform.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Per-axis scale factors.
    pub scale: [f32; 3],

    /// Rotation axis; the zero vector means no rotation.
    pub axis: [f32; 3],

    /// Base rotation angle in degrees.
    pub angle: f32,

    /// Extra rotation in degrees per second of wall-clock time.
    pub spin: f32,

    /// World-space position.
    pub position: [f32; 3],
}

impl SceneObject {
    /// A static object: unit scale, no rotation, placed at `position`.
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            scale: [1.0, 1.0, 1.0],
            axis: [0.0, 0.0, 0.0],
            angle: 0.0,
            spin: 0.0,
            position,
        }
    }

    pub fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_spin(mut self, axis: [f32; 3], spin: f32) -> Self {
        self.axis = axis;
        self.spin = spin;
        self
    }
}

/// `Renderer` owns the window, the OpenGL context and the event loop, and
/// draws a list of [`SceneObject`]s with the active [`Camera`].
///
/// Window and context management go through `glutin`; GL function pointers
/// are loaded from the context at startup. The render loop recomputes every
/// transform matrix each frame and pushes them through the uniform-upload
/// boundary in [`ShaderProgram`].
///
/// # Example
/// ```no_run
/// let mut renderer = Renderer::new("Demo", 800, 600)?;
/// renderer.set_clear_color(0.0, 0.0, 0.0, 1.0);
/// renderer.run()?; // blocks until the window closes
/// ```
pub struct Renderer {
    /// Drives window events and redraw requests.
    event_loop: EventLoop<()>,

    /// The GL context tied to the window, current on this thread.
    windowed_context: ContextWrapper<PossiblyCurrent, Window>,

    /// RGBA clear color for each frame.
    clear_color: [f32; 4],

    /// The camera the scene is rendered from.
    camera: Option<Camera>,

    /// Cube instances to draw each frame.
    scene: Vec<SceneObject>,
}

impl Renderer {
    /// Creates the window and OpenGL context and loads the GL function
    /// pointers.
    ///
    /// Fails with [`EngineError::Window`] if the window manager refuses the
    /// context; no GL call is made before `load_with` has run.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, EngineError> {
        let event_loop = EventLoop::new();

        let wb = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height));

        // vsync keeps the redraw loop at the display's refresh rate
        let windowed_context = ContextBuilder::new()
            .with_vsync(true)
            .build_windowed(wb, &event_loop)
            .map_err(|e| EngineError::window(e.to_string()))?;

        let windowed_context = unsafe {
            windowed_context
                .make_current()
                .map_err(|(_, e)| EngineError::window(e.to_string()))?
        };

        gl::load_with(|symbol| windowed_context.get_proc_address(symbol) as *const _);

        let clear_color = [0.0, 0.0, 0.0, 1.0];
        unsafe {
            gl::ClearColor(clear_color[0], clear_color[1], clear_color[2], clear_color[3]);
            gl::Enable(gl::DEPTH_TEST);
        }

        Ok(Self {
            event_loop,
            windowed_context,
            clear_color,
            camera: None,
            scene: Vec::new(),
        })
    }

    /// Updates the clear color used at the start of every frame.
    pub fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.clear_color = [r, g, b, a];
        unsafe {
            gl::ClearColor(r, g, b, a);
        }
    }

    /// Sets the camera the scene is rendered from.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    /// Adds a cube instance to the scene.
    pub fn add_object(&mut self, object: SceneObject) {
        self.scene.push(object);
    }

    /// Compiles the shaders, uploads the cube mesh and enters the event
    /// loop. Blocks until the window is closed.
    ///
    /// Each frame uploads, in order: the `time` clock, the `perspective`
    /// projection, the orbiting look-at `camera` view, and then per object
    /// its `scale`, `rotate` and `translate` matrices before the draw call.
    /// The vertex shader composes them as
    /// `perspective * camera * translate * rotate * scale`.
    pub fn run(self) -> Result<(), EngineError> {
        let Renderer {
            event_loop,
            windowed_context,
            clear_color: _,
            camera,
            scene,
        } = self;

        let program = ShaderProgram::link(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let mesh = GLMesh::upload(&Geometry::cube());

        let camera = camera.unwrap_or_else(|| Camera::new(90.0, 1.0));
        let start = Instant::now();

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;

            match event {
                Event::WindowEvent { event, .. } => {
                    if let WindowEvent::CloseRequested = event {
                        *control_flow = ControlFlow::Exit;
                    }
                }

                Event::RedrawRequested(_) => {
                    let time = start.elapsed().as_secs_f32();

                    unsafe {
                        gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
                    }

                    program.bind();
                    program.set_uniform_f32("time", time * 100.0);
                    program.set_uniform_matrix4("perspective", &camera.projection_matrix());

                    // The camera slowly pans across the room.
                    let target = Vector3::new(1.5 * time.cos(), 1.0 + time.sin(), -2.0);
                    let view = camera.look_at(target, Vector3::new(0.0, 1.0, 0.0));
                    program.set_uniform_matrix4("camera", &view);

                    for object in &scene {
                        let [ax, ay, az] = object.axis;
                        let angle = object.angle + object.spin * time;

                        program.set_uniform_matrix4(
                            "scale",
                            &Matrix4::scale(object.scale[0], object.scale[1], object.scale[2]),
                        );
                        program.set_uniform_matrix4("rotate", &Matrix4::rotate(ax, ay, az, angle));
                        program.set_uniform_matrix4(
                            "translate",
                            &Matrix4::translate(
                                object.position[0],
                                object.position[1],
                                object.position[2],
                            ),
                        );

                        mesh.draw();
                    }

                    if let Err(e) = windowed_context.swap_buffers() {
                        eprintln!("swap_buffers failed: {e}");
                        *control_flow = ControlFlow::Exit;
                    }
                }

                _ => {}
            }

            // Keep redrawing at the vsync rate
            windowed_context.window().request_redraw();
        })
    }
}
