use thiserror::Error;

/// Engine-level error categories.
///
/// Everything here comes from the boundary with the window manager or the
/// GL driver; the math core never produces these.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window or OpenGL context creation failed.
    #[error("window error: {0}")]
    Window(String),

    /// Shader compilation failed; carries the driver's info log.
    #[error("shader compile error in '{name}': {log}")]
    ShaderCompile { name: String, log: String },

    /// Program linking failed; carries the driver's info log.
    #[error("shader link error: {0}")]
    ShaderLink(String),
}

impl EngineError {
    pub fn window(detail: impl Into<String>) -> Self {
        Self::Window(detail.into())
    }

    pub fn shader_compile(name: impl Into<String>, log: impl Into<String>) -> Self {
        Self::ShaderCompile {
            name: name.into(),
            log: log.into(),
        }
    }
}
