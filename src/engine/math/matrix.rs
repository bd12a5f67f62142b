use std::fmt;
use std::ops::Mul;

use crate::engine::math::vec3::Vector3;

/// A 4x4 transformation matrix for building model/view/projection transforms.
///
/// Storage is a flat `[f32; 16]` in **row-major** order: the element at
/// column `x`, row `y` lives at offset `4*y + x`, so each row occupies four
/// consecutive slots. OpenGL expects column-major uniforms, which is why the
/// uniform upload path passes `transpose = GL_TRUE` (see
/// `ShaderProgram::set_uniform_matrix4`).
///
/// All rotation constructors take their angle in **degrees** and convert to
/// radians internally. Callers throughout the demos pass degrees; changing
/// this convention silently breaks every scene.
///
/// Matrices follow the column-vector convention: `a * b` applied to a point
/// applies `b` first, then `a`.
///
/// # Example
/// ```no_run
/// let model = Matrix4::translate(0.0, 1.0, -2.0) * Matrix4::rotate_y(45.0);
/// let mvp = Matrix4::perspective(90.0, 90.0, 0.1, 100.0) * model;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    data: [f32; 16],
}

impl Matrix4 {
    /// Creates a matrix directly from 16 row-major values.
    pub fn from_rows(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Creates the identity matrix: 1s on the diagonal, 0 elsewhere.
    ///
    /// Multiplying by this matrix is the equivalent of doing nothing.
    pub fn identity() -> Self {
        Self::from_rows([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ])
    }

    /// Creates a scale matrix stretching each axis by the given factor.
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_rows([
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ])
    }

    /// Creates a translation matrix.
    ///
    /// The offsets sit in the rightmost column, so applying the matrix to a
    /// homogeneous point `(x, y, z, 1)` yields `(x+tx, y+ty, z+tz, 1)`.
    pub fn translate(tx: f32, ty: f32, tz: f32) -> Self {
        Self::from_rows([
            1.0, 0.0, 0.0, tx, //
            0.0, 1.0, 0.0, ty, //
            0.0, 0.0, 1.0, tz, //
            0.0, 0.0, 0.0, 1.0, //
        ])
    }

    /// Creates a rotation of `angle` degrees around the X axis.
    ///
    /// The matrix built, where `a` is the angle in radians:
    ///
    /// ```text
    /// | 1    0       0       0 |
    /// | 0    cos(a) -sin(a)  0 |
    /// | 0    sin(a)  cos(a)  0 |
    /// | 0    0       0       1 |
    /// ```
    pub fn rotate_x(angle: f32) -> Self {
        let a = angle.to_radians();
        let (sin, cos) = a.sin_cos();
        Self::from_rows([
            1.0, 0.0, 0.0, 0.0, //
            0.0, cos, -sin, 0.0, //
            0.0, sin, cos, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ])
    }

    /// Creates a rotation of `angle` degrees around the Y axis.
    pub fn rotate_y(angle: f32) -> Self {
        let a = angle.to_radians();
        let (sin, cos) = a.sin_cos();
        Self::from_rows([
            cos, 0.0, sin, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -sin, 0.0, cos, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ])
    }

    /// Creates a rotation of `angle` degrees around the Z axis.
    pub fn rotate_z(angle: f32) -> Self {
        let a = angle.to_radians();
        let (sin, cos) = a.sin_cos();
        Self::from_rows([
            cos, -sin, 0.0, 0.0, //
            sin, cos, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ])
    }

    /// Creates a rotation of `angle` degrees around an arbitrary axis
    /// (Rodrigues' rotation formula).
    ///
    /// The axis is normalized internally, so `(2, 0, 0)` behaves like
    /// `(1, 0, 0)`. If the axis is the zero vector there is nothing to
    /// rotate around; the identity matrix is returned rather than dividing
    /// by a zero norm and producing a broken transformation.
    pub fn rotate(ax: f32, ay: f32, az: f32, angle: f32) -> Self {
        let magnitude = (ax * ax + ay * ay + az * az).sqrt();
        if magnitude == 0.0 {
            return Self::identity();
        }

        let a = angle.to_radians();
        let (sin, cos) = a.sin_cos();
        let t = 1.0 - cos;

        // normalize the rotation axis
        let x = ax / magnitude;
        let y = ay / magnitude;
        let z = az / magnitude;

        Self::from_rows([
            cos + x * x * t,
            x * y * t - z * sin,
            x * z * t + y * sin,
            0.0,
            y * x * t + z * sin,
            cos + y * y * t,
            y * z * t - x * sin,
            0.0,
            z * x * t - y * sin,
            z * y * t + x * sin,
            cos + z * z * t,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Creates a perspective (frustum) projection matrix.
    ///
    /// Both fields of view are in degrees. The diagonal scale terms are
    /// `atan(fov_radians / 2)` — intentionally `atan`, not the textbook
    /// `1/tan(fov/2)`: every shader and scene in the demos was tuned against
    /// this formula, so it is kept bit-for-bit.
    ///
    /// `far == near` is not guarded; the division produces non-finite
    /// values, which is left to the caller exactly as with any other
    /// degenerate float input.
    pub fn perspective(fovx: f32, fovy: f32, near: f32, far: f32) -> Self {
        let fx = fovx.to_radians();
        let fy = fovy.to_radians();

        Self::from_rows([
            (fx / 2.0).atan(),
            0.0,
            0.0,
            0.0,
            0.0,
            (fy / 2.0).atan(),
            0.0,
            0.0,
            0.0,
            0.0,
            -(far + near) / (far - near),
            -(2.0 * far * near) / (far - near),
            0.0,
            0.0,
            -1.0,
            1.0,
        ])
    }

    /// Creates an orthographic projection matrix.
    ///
    /// Maps an axis-aligned box of the given half-extents onto the
    /// normalized device cube: with `width = height = depth = 10`, the point
    /// `(5, 5, 5)` lands on `(0.5, 0.5, 0.5)`.
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::from_rows([
            1.0 / width,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0 / height,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 / (far - near),
            (far + near) / (far - near),
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Creates a view matrix from a camera position and Euler angles.
    ///
    /// The world is translated by the negated eye position, then rotated
    /// around x, then y, then z (each rotation is in degrees). Each new axis
    /// rotation is pre-multiplied onto the accumulated rotation — the order
    /// matters and callers tune their angles against it.
    pub fn camera(px: f32, py: f32, pz: f32, ax: f32, ay: f32, az: f32) -> Self {
        // Per-axis rotations rather than Matrix4::rotate, since each axis
        // needs its own specific angle.
        let mut rotation = Self::rotate_x(ax);
        rotation = Self::rotate_y(ay) * rotation;
        rotation = Self::rotate_z(az) * rotation;

        rotation * Self::translate(-px, -py, -pz)
    }

    /// Creates a look-at view matrix from an eye position, a target point
    /// and an up direction.
    ///
    /// Builds the classic orthonormal-ish basis: forward
    /// `f = normalize(target - eye)`, right `s = cross(f, normalize(up))`,
    /// corrected up `u = cross(s, f)`. The result is the basis-change matrix
    /// with rows `(s, u, -f)` multiplied by a translation of `-eye`.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let f = (target - eye).normalized();
        let s = f.cross(up.normalized());
        let u = s.cross(f);

        let basis = Self::from_rows([
            s.x, s.y, s.z, 0.0, //
            u.x, u.y, u.z, 0.0, //
            -f.x, -f.y, -f.z, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
        ]);

        basis * Self::translate(-eye.x, -eye.y, -eye.z)
    }

    /// Multiplies two matrices: `result[row][col] = Σ a[row][k] * b[k][col]`.
    ///
    /// Always computes into a fresh matrix, so passing the same value as
    /// both operands (or assigning the result back onto an operand) can
    /// never observe a half-written product.
    pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let mut data = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a.get(k, row) * b.get(col, k);
                }
                data[4 * row + col] = sum;
            }
        }

        Matrix4 { data }
    }

    /// Returns the element at column `x`, row `y`.
    ///
    /// Translates 2D coordinates to the 1D row-major index.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[4 * y + x]
    }

    /// Sets the element at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[4 * y + x] = v;
    }

    /// Applies the matrix to a homogeneous column vector `(x, y, z, w)`.
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.get(0, row) * v[0]
                + self.get(1, row) * v[1]
                + self.get(2, row) * v[2]
                + self.get(3, row) * v[3];
        }
        out
    }

    /// The raw 16-float row-major buffer, ready for uniform upload.
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }

    /// Pretty-prints the matrix as four `| ... |` rows, each value
    /// right-aligned in a `spacing`-wide field with `precision` decimals.
    ///
    /// Debugging aid only.
    pub fn format(&self, spacing: usize, precision: usize) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for row in 0..4 {
            out.push('|');
            for col in 0..4 {
                // A write into a String cannot fail.
                let _ = write!(out, " {:>spacing$.precision$}", self.get(col, row));
            }
            out.push_str(" |\n");
        }
        out
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Matrix4::multiply(&self, &rhs)
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(8, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_matrix_eq(a: &Matrix4, b: &Matrix4) {
        for y in 0..4 {
            for x in 0..4 {
                assert!(
                    (a.get(x, y) - b.get(x, y)).abs() < EPSILON,
                    "matrices differ at ({x}, {y}): {} vs {}\n{a}\nvs\n{b}",
                    a.get(x, y),
                    b.get(x, y),
                );
            }
        }
    }

    #[test]
    fn identity_has_unit_diagonal() {
        let m = Matrix4::identity();
        for y in 0..4 {
            for x in 0..4 {
                let expected = if x == y { 1.0 } else { 0.0 };
                assert_eq!(m.get(x, y), expected);
            }
        }
    }

    #[test]
    fn translate_stores_offsets_in_last_column() {
        let m = Matrix4::translate(2.0, -3.0, 7.5);
        assert_eq!(m.get(3, 0), 2.0);
        assert_eq!(m.get(3, 1), -3.0);
        assert_eq!(m.get(3, 2), 7.5);
        assert_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn scale_applies_to_homogeneous_point() {
        let p = Matrix4::scale(2.0, 3.0, 4.0).transform([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(p, [2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn translate_applies_to_homogeneous_point() {
        let p = Matrix4::translate(1.0, 2.0, 3.0).transform([5.0, 5.0, 5.0, 1.0]);
        assert_eq!(p, [6.0, 7.0, 8.0, 1.0]);
    }

    #[test]
    fn rotation_at_zero_degrees_is_identity() {
        assert_matrix_eq(&Matrix4::rotate_x(0.0), &Matrix4::identity());
        assert_matrix_eq(&Matrix4::rotate_y(0.0), &Matrix4::identity());
        assert_matrix_eq(&Matrix4::rotate_z(0.0), &Matrix4::identity());
    }

    #[test]
    fn rotation_is_orthogonal() {
        // For a rotation matrix the transpose is the inverse, so M * Mᵀ
        // must come back as identity.
        for angle in [-270.0, -43.7, 0.0, 12.5, 90.0, 360.0] {
            let m = Matrix4::rotate_x(angle);
            let mut transpose = Matrix4::identity();
            for y in 0..4 {
                for x in 0..4 {
                    transpose.set(y, x, m.get(x, y));
                }
            }
            assert_matrix_eq(&(m * transpose), &Matrix4::identity());
        }
    }

    #[test]
    fn rotation_round_trips_with_negated_angle() {
        for angle in [1.0, 33.0, 90.0, 179.0, 271.5] {
            let round_trip = Matrix4::rotate_x(angle) * Matrix4::rotate_x(-angle);
            assert_matrix_eq(&round_trip, &Matrix4::identity());
        }
    }

    #[test]
    fn translate_round_trips_with_negated_offsets() {
        let round_trip = Matrix4::translate(4.0, -2.0, 9.0) * Matrix4::translate(-4.0, 2.0, -9.0);
        assert_matrix_eq(&round_trip, &Matrix4::identity());
    }

    #[test]
    fn identity_is_multiplicative_unit() {
        let m = Matrix4::rotate_y(30.0) * Matrix4::translate(1.0, 2.0, 3.0);
        assert_matrix_eq(&(Matrix4::identity() * m), &m);
        assert_matrix_eq(&(m * Matrix4::identity()), &m);
    }

    #[test]
    fn arbitrary_axis_reduces_to_axis_aligned_on_unit_axes() {
        for angle in [15.0, 45.0, 120.0] {
            assert_matrix_eq(&Matrix4::rotate(1.0, 0.0, 0.0, angle), &Matrix4::rotate_x(angle));
            assert_matrix_eq(&Matrix4::rotate(0.0, 1.0, 0.0, angle), &Matrix4::rotate_y(angle));
            assert_matrix_eq(&Matrix4::rotate(0.0, 0.0, 1.0, angle), &Matrix4::rotate_z(angle));
        }
    }

    #[test]
    fn arbitrary_axis_normalizes_its_axis() {
        assert_matrix_eq(
            &Matrix4::rotate(5.0, 0.0, 0.0, 40.0),
            &Matrix4::rotate_x(40.0),
        );
    }

    #[test]
    fn zero_axis_rotation_is_identity() {
        for angle in [0.0, 17.0, 90.0, -360.0] {
            assert_eq!(Matrix4::rotate(0.0, 0.0, 0.0, angle), Matrix4::identity());
        }
    }

    #[test]
    fn camera_places_origin_in_front_of_eye() {
        // An unrotated camera 5 units up the z axis sees the world origin
        // 5 units ahead of it, down -z in eye space.
        let view = Matrix4::camera(0.0, 0.0, 5.0, 0.0, 0.0, 0.0);
        let p = view.transform([0.0, 0.0, 0.0, 1.0]);
        assert!((p[0]).abs() < EPSILON);
        assert!((p[1]).abs() < EPSILON);
        assert!((p[2] + 5.0).abs() < EPSILON);
        assert!((p[3] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn camera_applies_rotations_in_x_y_z_order() {
        let view = Matrix4::camera(1.0, 2.0, 3.0, 10.0, 20.0, 30.0);
        let expected = Matrix4::rotate_z(30.0)
            * Matrix4::rotate_y(20.0)
            * Matrix4::rotate_x(10.0)
            * Matrix4::translate(-1.0, -2.0, -3.0);
        assert_matrix_eq(&view, &expected);
    }

    #[test]
    fn perspective_last_row_is_exact() {
        let m = Matrix4::perspective(90.0, 90.0, 0.1, 100.0);
        assert_eq!(m.get(0, 3), 0.0);
        assert_eq!(m.get(1, 3), 0.0);
        assert_eq!(m.get(2, 3), -1.0);
        assert_eq!(m.get(3, 3), 1.0);
        for y in 0..4 {
            for x in 0..4 {
                assert!(m.get(x, y).is_finite(), "non-finite entry at ({x}, {y})");
            }
        }
    }

    #[test]
    fn orthographic_maps_half_extents_to_unit_cube() {
        let m = Matrix4::orthographic(10.0, 10.0, -5.0, 5.0);
        let p = m.transform([5.0, 5.0, 5.0, 1.0]);
        assert!((p[0] - 0.5).abs() < EPSILON);
        assert!((p[1] - 0.5).abs() < EPSILON);
        assert!((p[2] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn look_at_down_negative_z_matches_simple_translation() {
        // Eye at +5z looking at the origin with +y up: the axes already line
        // up, so the view matrix is just the eye translation.
        let view = Matrix4::look_at(
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        assert_matrix_eq(&view, &Matrix4::translate(0.0, 0.0, -5.0));
    }

    #[test]
    fn look_at_sends_target_down_negative_z() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let target = Vector3::new(-4.0, 0.5, 7.0);
        let view = Matrix4::look_at(eye, target, Vector3::new(0.0, 1.0, 0.0));
        let p = view.transform([target.x, target.y, target.z, 1.0]);

        // The target lands on the -z axis, its distance from the eye away.
        let distance = (target - eye).length();
        assert!((p[0]).abs() < 1e-4);
        assert!((p[1]).abs() < 1e-4);
        assert!((p[2] + distance).abs() < 1e-4);
    }

    #[test]
    fn multiply_matches_known_product() {
        // Rotate-then-translate against hand-checked values: the
        // translation column must be untouched by the later rotation.
        let m = Matrix4::translate(1.0, 2.0, 3.0) * Matrix4::rotate_z(90.0);
        let p = m.transform([1.0, 0.0, 0.0, 1.0]);
        assert!((p[0] - 1.0).abs() < EPSILON);
        assert!((p[1] - 3.0).abs() < EPSILON);
        assert!((p[2] - 3.0).abs() < EPSILON);
    }

    #[test]
    fn multiply_is_safe_when_output_aliases_an_input() {
        let m = Matrix4::rotate_y(30.0) * Matrix4::translate(1.0, 2.0, 3.0);
        let expected = Matrix4::multiply(&m, &m);

        // Same binding as both operand and destination, as the camera
        // builder does when accumulating rotations.
        let mut accumulated = m;
        accumulated = Matrix4::multiply(&accumulated, &accumulated);

        assert_matrix_eq(&accumulated, &expected);
    }

    #[test]
    fn format_right_aligns_rows() {
        let rendered = Matrix4::identity().format(6, 2);
        let expected = "\
|   1.00   0.00   0.00   0.00 |\n\
|   0.00   1.00   0.00   0.00 |\n\
|   0.00   0.00   1.00   0.00 |\n\
|   0.00   0.00   0.00   1.00 |\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn get_set_use_row_major_flattening() {
        let mut m = Matrix4::identity();
        m.set(3, 1, 42.0);
        assert_eq!(m.get(3, 1), 42.0);
        assert_eq!(m.as_slice()[4 * 1 + 3], 42.0);
    }
}
