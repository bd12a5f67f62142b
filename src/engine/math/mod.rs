//! Transform math for the renderer.
//!
//! Conventions shared by everything in here:
//! - matrices are 4x4 `f32`, flattened row-major (`4*y + x`)
//! - every angle parameter is in **degrees**
//! - multiplication composes right-to-left: `A * B` applies B first

pub mod dynmatrix;
pub mod matrix;
pub mod vec3;

pub use dynmatrix::DynMatrix;
pub use matrix::Matrix4;
pub use vec3::Vector3;

use thiserror::Error;

/// Errors produced by the math module.
///
/// The fixed 4x4 operations are total and never fail; only the
/// variable-size [`DynMatrix`] multiply has a failure mode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Inner dimensions of a matrix product don't line up:
    /// `a` has `a_width` columns but `b` has `b_height` rows.
    #[error("dimension mismatch in matrix multiply: {a_width} columns vs {b_height} rows")]
    DimensionMismatch { a_width: usize, b_height: usize },
}
