//! Double-precision math types shared by the Lumen crates.
//!
//! The path tracer matches shadow-ray hit points against shading points
//! with a 1e-6 per-axis tolerance, so everything runs on glam's `f64`
//! vectors. They are re-exported under the short names used everywhere else.

pub use glam::{DVec2 as Vec2, DVec3 as Vec3};

mod interval;
mod onb;
mod ray;

pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;

/// RGB color in linear space.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_color_is_componentwise() {
        let a = Color::new(0.5, 1.0, 2.0);
        let b = Color::new(2.0, 0.5, 0.25);
        assert_eq!(a * b, Color::new(1.0, 0.5, 0.5));
    }
}
