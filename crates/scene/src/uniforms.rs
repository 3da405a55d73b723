//! Per-object uniform data handed to the renderer.
//!
//! All structures use `#[repr(C)]` and implement `Pod` so the renderer can
//! upload them with `bytemuck::bytes_of`.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Matrices bound for one drawable object.
///
/// # Memory Layout
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 64   | matrix |
/// | 64     | 64   | world |
/// | 128    | 64   | world_inverse_transpose |
///
/// Total size: 192 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Object-to-clip matrix (`view_projection * world`).
    pub matrix: Mat4,
    /// Object-to-world matrix.
    pub world: Mat4,
    /// Inverse transpose of `world`, for transforming normals.
    pub world_inverse_transpose: Mat4,
}

impl ObjectUniforms {
    /// Size of the struct in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Build the uniform bag for an object with the given world matrix.
    #[inline]
    pub fn new(view_projection: &Mat4, world: Mat4) -> Self {
        Self {
            matrix: *view_projection * world,
            world,
            world_inverse_transpose: Self::compute_inverse_transpose(world),
        }
    }

    /// Transpose of the inverse of `world`.
    ///
    /// Singular matrices (e.g. zero scale) yield the identity instead of
    /// NaN/Inf.
    #[inline]
    pub fn compute_inverse_transpose(world: Mat4) -> Mat4 {
        const EPSILON: f32 = 1e-6;
        if world.determinant().abs() < EPSILON {
            Mat4::IDENTITY
        } else {
            world.inverse().transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_object_uniforms_size() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 192);
        assert_eq!(ObjectUniforms::SIZE, 192);
        assert_eq!(bytemuck::bytes_of(&ObjectUniforms::default()).len(), 192);
    }

    #[test]
    fn test_object_uniforms_new() {
        let view_projection = Mat4::perspective_rh_gl(1.0, 1.5, 1.0, 100.0);
        let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniforms = ObjectUniforms::new(&view_projection, world);

        assert_eq!(uniforms.world, world);
        assert_eq!(uniforms.matrix, view_projection * world);
        assert_eq!(uniforms.world_inverse_transpose, world.inverse().transpose());
    }

    #[test]
    fn test_singular_world_falls_back_to_identity() {
        let world = Mat4::from_scale(Vec3::ZERO);
        let uniforms = ObjectUniforms::new(&Mat4::IDENTITY, world);
        assert_eq!(uniforms.world_inverse_transpose, Mat4::IDENTITY);
    }
}
