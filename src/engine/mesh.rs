//! CPU-side geometry and its GPU mesh counterpart.

use std::mem;

use gl::types::{GLsizei, GLsizeiptr, GLuint};

/// Vertex format: position plus a flat color per face.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// 16-bit indices are plenty for the demo meshes.
pub type Index = u16;

/// Mesh data held on the CPU: a vertex list plus the indices connecting
/// them into triangles. Kept separate from any transform so the same
/// geometry can be drawn at several places in the scene.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<Index>,
}

impl Geometry {
    /// A unit cube centered on the origin, each face a different flat
    /// color (the textured crates of the original demo, minus textures).
    pub fn cube() -> Self {
        // 4 corners per face so each face keeps its own color.
        #[rustfmt::skip]
        const FACES: [([[f32; 3]; 4], [f32; 3]); 6] = [
            // +z (front), crate brown
            ([[-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5]], [0.71, 0.55, 0.34]),
            // -z (back)
            ([[ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5]], [0.62, 0.46, 0.29]),
            // +x (right)
            ([[ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5]], [0.66, 0.50, 0.31]),
            // -x (left)
            ([[-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5]], [0.66, 0.50, 0.31]),
            // +y (top)
            ([[-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5]], [0.78, 0.62, 0.40]),
            // -y (bottom)
            ([[-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5]], [0.52, 0.39, 0.25]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (face, (corners, color)) in FACES.iter().enumerate() {
            for corner in corners {
                vertices.push(Vertex {
                    position: *corner,
                    color: *color,
                });
            }
            let base = (face * 4) as Index;
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self { vertices, indices }
    }
}

/// GPU-side mesh: the VAO/VBO/IBO triple for a piece of geometry.
#[derive(Debug)]
pub struct GLMesh {
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
    index_count: usize,
}

impl GLMesh {
    /// Uploads the geometry's vertex and index buffers and records the
    /// attribute layout (location 0 = position, location 1 = color) in a
    /// fresh VAO.
    pub fn upload(geometry: &Geometry) -> Self {
        let mut vao = 0;
        let mut vbo = 0;
        let mut ibo = 0;

        let stride = mem::size_of::<Vertex>() as GLsizei;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::GenBuffers(1, &mut ibo);

            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (geometry.vertices.len() * mem::size_of::<Vertex>()) as GLsizeiptr,
                geometry.vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (geometry.indices.len() * mem::size_of::<Index>()) as GLsizeiptr,
                geometry.indices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // position, color
            gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, std::ptr::null());
            gl::VertexAttribPointer(
                1,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (3 * mem::size_of::<f32>()) as *const _,
            );
            gl::EnableVertexAttribArray(0);
            gl::EnableVertexAttribArray(1);

            gl::BindVertexArray(0);
        }

        Self {
            vao,
            vbo,
            ibo,
            index_count: geometry.indices.len(),
        }
    }

    /// Issues the draw call for this mesh. Uniforms must already be set.
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count as GLsizei,
                gl::UNSIGNED_SHORT,
                std::ptr::null(),
            );
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for GLMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ibo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_24_vertices_and_36_indices() {
        let cube = Geometry::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        // every index must point at a real vertex
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }
}
