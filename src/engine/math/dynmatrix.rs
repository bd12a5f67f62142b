use std::fmt::Write;

use crate::engine::math::MathError;

/// A heap-backed matrix of arbitrary width × height.
///
/// [`Matrix4`](crate::engine::math::Matrix4) covers everything the renderer
/// needs; this variant exists for the odd non-square product (e.g. a 4×4
/// matrix against a 4×1 column vector) where the shapes have to be checked
/// at runtime instead of by the type.
///
/// Same conventions as `Matrix4`: row-major storage, element at column `x`,
/// row `y` at offset `width*y + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct DynMatrix {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DynMatrix {
    /// Creates a zero-filled matrix with `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height`.
    pub fn from_rows(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), width * height, "row data does not match shape");
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.width * y + x]
    }

    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[self.width * y + x] = v;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Multiplies `a * b`, checking that the shapes line up.
    ///
    /// The column count of `a` must equal the row count of `b`; a mismatch
    /// is reported as [`MathError::DimensionMismatch`] rather than silently
    /// truncating or padding. The result has `b`'s width and `a`'s height.
    pub fn multiply(a: &DynMatrix, b: &DynMatrix) -> Result<DynMatrix, MathError> {
        if a.width != b.height {
            return Err(MathError::DimensionMismatch {
                a_width: a.width,
                b_height: b.height,
            });
        }

        let mut result = DynMatrix::new(b.width, a.height);
        for row in 0..a.height {
            for col in 0..b.width {
                let mut sum = 0.0;
                for k in 0..a.width {
                    sum += a.get(k, row) * b.get(col, k);
                }
                result.set(col, row, sum);
            }
        }

        Ok(result)
    }

    /// Same `| ... |` row layout as `Matrix4::format`.
    pub fn format(&self, spacing: usize, precision: usize) -> String {
        let mut out = String::new();
        for row in 0..self.height {
            out.push('|');
            for col in 0..self.width {
                let _ = write!(out, " {:>spacing$.precision$}", self.get(col, row));
            }
            out.push_str(" |\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_checks_inner_dimensions() {
        let a = DynMatrix::new(3, 2); // 3 columns
        let b = DynMatrix::new(2, 2); // 2 rows
        let err = DynMatrix::multiply(&a, &b).unwrap_err();
        assert_eq!(err, MathError::DimensionMismatch { a_width: 3, b_height: 2 });
    }

    #[test]
    fn multiply_matrix_by_column_vector() {
        // 4x4 translation against a 4x1 homogeneous point.
        let translate = DynMatrix::from_rows(
            4,
            4,
            vec![
                1.0, 0.0, 0.0, 2.0, //
                0.0, 1.0, 0.0, 3.0, //
                0.0, 0.0, 1.0, 4.0, //
                0.0, 0.0, 0.0, 1.0, //
            ],
        );
        let point = DynMatrix::from_rows(1, 4, vec![1.0, 1.0, 1.0, 1.0]);

        let moved = DynMatrix::multiply(&translate, &point).unwrap();
        assert_eq!(moved.width(), 1);
        assert_eq!(moved.height(), 4);
        assert_eq!(moved.as_slice(), &[3.0, 4.0, 5.0, 1.0]);
    }

    #[test]
    fn result_takes_b_width_and_a_height() {
        let a = DynMatrix::new(3, 2);
        let b = DynMatrix::new(5, 3);
        let product = DynMatrix::multiply(&a, &b).unwrap();
        assert_eq!(product.width(), 5);
        assert_eq!(product.height(), 2);
    }

    #[test]
    fn format_matches_fixed_layout() {
        let m = DynMatrix::from_rows(2, 1, vec![1.0, -2.5]);
        assert_eq!(m.format(6, 2), "|   1.00  -2.50 |\n");
    }
}
