//! Ray-primitive intersection routines.
//!
//! Every routine takes the ray and the admissible parameter range and
//! returns `None` when nothing is hit strictly inside it.

use lumen_core::{AreaLight, MaterialHandle, Plane, Sphere, Triangle};
use lumen_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub hit_point: Vec3,
    /// Unit surface normal, always facing against the incoming ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: MaterialHandle,
}

impl HitRecord {
    /// Build a record, flipping `outward_normal` so it faces against the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: MaterialHandle) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        Self {
            t,
            hit_point: ray.at(t),
            normal: if front_face { outward_normal } else { -outward_normal },
            material,
        }
    }
}

/// Ray-sphere intersection.
pub fn hit_sphere(ray: &Ray, sphere: &Sphere, ray_t: Interval) -> Option<HitRecord> {
    let oc = sphere.center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - sphere.radius * sphere.radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let p = ray.at(root);
    let outward_normal = (p - sphere.center) / sphere.radius;
    Some(HitRecord::new(ray, root, outward_normal, sphere.material))
}

/// Möller-Trumbore ray-triangle intersection.
pub fn hit_triangle(ray: &Ray, triangle: &Triangle, ray_t: Interval) -> Option<HitRecord> {
    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-12 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - triangle.v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !ray_t.surrounds(t) {
        return None;
    }

    Some(HitRecord::new(ray, t, triangle.normal(), triangle.material))
}

/// Intersection with the parallelogram `position + s*u + t*v`.
///
/// Returns the ray parameter and the unnormalized plane normal `u x v`.
fn hit_parallelogram(
    ray: &Ray,
    position: Vec3,
    u: Vec3,
    v: Vec3,
    ray_t: Interval,
) -> Option<(f64, Vec3)> {
    let n = u.cross(v);
    let nn = n.length_squared();
    let denom = n.dot(ray.direction());
    if nn == 0.0 || denom.abs() < 1e-12 {
        return None;
    }

    let t = n.dot(position - ray.origin()) / denom;
    if !ray_t.surrounds(t) {
        return None;
    }

    // Planar coordinates of the hit point in the (u, v) frame
    let w = n / nn;
    let q = ray.at(t) - position;
    let alpha = w.dot(q.cross(v));
    let beta = w.dot(u.cross(q));
    if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
        return None;
    }

    Some((t, n))
}

/// Ray-plane intersection, bounded to the plane's parallelogram.
pub fn hit_plane(ray: &Ray, plane: &Plane, ray_t: Interval) -> Option<HitRecord> {
    let (t, n) = hit_parallelogram(ray, plane.position, plane.u, plane.v, ray_t)?;
    Some(HitRecord::new(ray, t, n.normalize(), plane.material))
}

/// Ray-area-light intersection. Lights are two-sided; only the distance is reported.
pub fn hit_area_light(ray: &Ray, light: &AreaLight, ray_t: Interval) -> Option<f64> {
    hit_parallelogram(ray, light.position, light.u, light.v, ray_t).map(|(t, _)| t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Color;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialHandle(3));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = hit_sphere(&ray, &sphere, Interval::from_min(EPS)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12); // Should hit at t=0.5
        assert_eq!(rec.normal, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(rec.material, MaterialHandle(3));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialHandle(0));

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(hit_sphere(&ray, &sphere, Interval::from_min(EPS)).is_none());
    }

    #[test]
    fn test_sphere_from_inside_faces_inward() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MaterialHandle(0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = hit_sphere(&ray, &sphere, Interval::from_min(EPS)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert_eq!(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_sphere_respects_max_distance() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, MaterialHandle(0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_sphere(&ray, &sphere, Interval::new(EPS, 3.0)).is_none());
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
            MaterialHandle(0),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = hit_triangle(&ray, &tri, Interval::from_min(EPS)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert!(rec.normal.dot(ray.direction) < 0.0);

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_triangle(&ray, &tri, Interval::from_min(EPS)).is_none());
    }

    #[test]
    fn test_plane_bounded() {
        let plane = Plane::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            MaterialHandle(1),
        );

        let down = Ray::new(Vec3::new(0.5, 2.0, 0.5), Vec3::new(0.0, -1.0, 0.0));
        let rec = hit_plane(&down, &plane, Interval::from_min(EPS)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert_eq!(rec.hit_point, Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(rec.normal, Vec3::Y);

        // Outside the parallelogram
        let outside = Ray::new(Vec3::new(3.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(hit_plane(&outside, &plane, Interval::from_min(EPS)).is_none());

        // Parallel to the plane
        let parallel = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(hit_plane(&parallel, &plane, Interval::from_min(EPS)).is_none());
    }

    #[test]
    fn test_area_light_two_sided() {
        let light = AreaLight::new(
            Vec3::new(-1.0, 3.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Color::ONE,
        );

        let up = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(hit_area_light(&up, &light, Interval::from_min(EPS)), Some(3.0));

        let down = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);
        assert_eq!(hit_area_light(&down, &light, Interval::from_min(EPS)), Some(2.0));

        let away = Ray::new(Vec3::ZERO, -Vec3::Y);
        assert!(hit_area_light(&away, &light, Interval::from_min(EPS)).is_none());
    }
}
