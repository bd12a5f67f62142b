use std::ops::{Neg, Sub};

/// A 3-component float vector.
///
/// Exists mainly to feed the look-at construction (subtract, normalize,
/// cross); it is a plain value type with no further lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Euclidean length.
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns the vector scaled to unit length.
    pub fn normalized(&self) -> Self {
        let norm = self.length();
        Self::new(self.x / norm, self.y / norm, self.z / norm)
    }

    /// Cross product `self × other`.
    pub fn cross(&self, other: Vector3) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_is_componentwise() {
        let d = Vector3::new(3.0, 5.0, 7.0) - Vector3::new(1.0, 1.0, 10.0);
        assert_eq!(d, Vector3::new(2.0, 4.0, -3.0));
    }

    #[test]
    fn normalized_has_unit_length() {
        let n = Vector3::new(3.0, 4.0, 0.0).normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn cross_of_basis_vectors() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        let z = Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(x.cross(y), z);
        assert_eq!(y.cross(z), x);
        assert_eq!(y.cross(x), -z);
    }
}
