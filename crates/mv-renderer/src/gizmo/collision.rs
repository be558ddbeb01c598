//! Gizmo handle collision
//!
//! Ray tests for the two handle shapes: axis arrows are finite cylinders,
//! rotation rings are thin annuli lying in the plane normal to their axis.

use glam::Vec3;

use mv_core::Ray;

/// Ray vs. finite cylinder.
///
/// Projects the ray into the plane perpendicular to the cylinder axis,
/// solves the quadratic `at² + bt + c = 0` for the infinite cylinder, then
/// keeps the hit only if it lies between `start` and `end`.
///
/// Returns the ray distance of the closest hit in front of the origin.
pub fn ray_cylinder_intersection(ray: &Ray, start: Vec3, end: Vec3, radius: f32) -> Option<f32> {
    let length = (end - start).length();
    if length <= f32::EPSILON {
        return None;
    }
    let axis = (end - start) / length;

    let offset = ray.origin - start;
    let d = ray.direction - axis * ray.direction.dot(axis);
    let o = offset - axis * offset.dot(axis);

    let a = d.dot(d);
    // Ray parallel to the axis never touches the side wall
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * d.dot(o);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let near = (-b - sqrt_disc) / (2.0 * a);
    let far = (-b + sqrt_disc) / (2.0 * a);

    [near, far].into_iter().filter(|t| *t >= 0.0).find(|t| {
        let projection = (ray.at(*t) - start).dot(axis);
        (0.0..=length).contains(&projection)
    })
}

/// Ray vs. ring of radius `ring_radius` and half-width `thickness`.
pub fn ray_ring_intersection(
    ray: &Ray,
    center: Vec3,
    normal: Vec3,
    ring_radius: f32,
    thickness: f32,
) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }

    let distance_from_center = (ray.at(t) - center).length();
    ((distance_from_center - ring_radius).abs() <= thickness).then_some(t)
}
