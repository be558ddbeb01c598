//! World-space picking ray

use glam::{Mat4, Vec3};

/// A half-line in world space. `direction` is kept normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform the ray by a matrix (e.g. into an object's local space).
    ///
    /// The returned direction is *not* renormalized so that parameters `t`
    /// stay comparable between the two spaces.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }

    /// Intersection with a plane, returns the hit point
    pub fn intersect_plane(&self, plane_point: Vec3, plane_normal: Vec3) -> Option<Vec3> {
        let denom = self.direction.dot(plane_normal);
        if denom.abs() < 1e-6 {
            return None;
        }

        let t = (plane_point - self.origin).dot(plane_normal) / denom;
        if t < 0.0 {
            return None;
        }

        Some(self.at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_plane_intersection() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 5.0), Vec3::NEG_Z);
        let hit = ray.intersect_plane(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(hit.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_plane_behind_or_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ray.intersect_plane(Vec3::ZERO, Vec3::Z).is_none());

        let parallel = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X);
        assert!(parallel.intersect_plane(Vec3::ZERO, Vec3::Z).is_none());
    }
}
