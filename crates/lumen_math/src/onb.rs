use crate::Vec3;

/// Orthonormal basis built around a single normal.
///
/// `w` is the normal; `u` and `v` span the tangent plane. Hemisphere samples
/// generated with `z` up are rotated into world space with [`Onb::local`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    /// Build a basis whose `w` axis is `normal`.
    pub fn new(normal: Vec3) -> Self {
        let w = normal.normalize();
        // Pick a helper axis that is not nearly parallel to w.
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self { u, v, w }
    }

    /// Transform a direction expressed in this basis into world space.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}
