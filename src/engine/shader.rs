use std::ffi::CString;

use gl::types::{GLenum, GLint, GLuint};

use crate::engine::error::EngineError;
use crate::engine::math::Matrix4;

/// Compiles a single shader stage, returning the GL handle.
///
/// On failure the driver's info log is captured into the error instead of
/// aborting, so a broken shader reports which stage and why.
pub fn compile_shader(src: &str, kind: GLenum, name: &str) -> Result<GLuint, EngineError> {
    unsafe {
        let shader = gl::CreateShader(kind);
        gl::ShaderSource(
            shader,
            1,
            [src.as_ptr() as *const _].as_ptr(),
            [src.len() as GLint].as_ptr(),
        );
        gl::CompileShader(shader);

        // Check compile status
        let mut status = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        if status == 0 {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len as usize];
            gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), buf.as_mut_ptr() as *mut _);
            gl::DeleteShader(shader);
            return Err(EngineError::shader_compile(
                name,
                String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string(),
            ));
        }

        Ok(shader)
    }
}

/// A linked GL shader program and the uniform-upload boundary of the math
/// core: matrices leave the engine through [`set_uniform_matrix4`], 16
/// floats in row-major order to a named uniform.
///
/// [`set_uniform_matrix4`]: ShaderProgram::set_uniform_matrix4
#[derive(Debug)]
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Compiles and links a vertex + fragment shader pair.
    pub fn link(vs_src: &str, fs_src: &str) -> Result<Self, EngineError> {
        let vs = compile_shader(vs_src, gl::VERTEX_SHADER, "vertex")?;
        let fs = compile_shader(fs_src, gl::FRAGMENT_SHADER, "fragment")?;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vs);
            gl::AttachShader(program, fs);
            gl::LinkProgram(program);

            // Shaders are owned by the program after linking
            gl::DeleteShader(vs);
            gl::DeleteShader(fs);

            let mut status = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status == 0 {
                let mut len = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
                let mut buf = vec![0u8; len as usize];
                gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), buf.as_mut_ptr() as *mut _);
                gl::DeleteProgram(program);
                return Err(EngineError::ShaderLink(
                    String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string(),
                ));
            }

            Ok(Self { id: program })
        }
    }

    /// Makes this program current for subsequent draw calls.
    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    /// Uploads a matrix to the named uniform.
    ///
    /// The buffer is row-major, so `transpose` is passed as `GL_TRUE` to let
    /// the driver flip it into the column-major layout GLSL expects. Called
    /// once per matrix per frame.
    pub fn set_uniform_matrix4(&self, name: &str, matrix: &Matrix4) {
        let location = self.uniform_location(name);
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::TRUE, matrix.as_slice().as_ptr());
        }
    }

    /// Uploads a single float uniform (e.g. the animation clock).
    pub fn set_uniform_f32(&self, name: &str, value: f32) {
        let location = self.uniform_location(name);
        unsafe {
            gl::Uniform1f(location, value);
        }
    }

    fn uniform_location(&self, name: &str) -> GLint {
        // A name with an interior NUL can't exist in the shader; -1 makes
        // the GL calls no-ops, same as any other unknown uniform.
        let Ok(cname) = CString::new(name) else {
            return -1;
        };
        unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}
