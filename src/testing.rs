//! Fixtures shared between the per-module tests.

use glam::{vec3, Mat4, Vec3};

use crate::{FrameInfo, Grid2D};

/// Builds a frame with flat geometry: per-pixel world positions on the
/// `z = 0` plane matching screen coordinates, normals facing the camera and
/// identity transforms, so that an identity world-to-screen projection
/// reprojects every pixel onto itself.
pub fn frame(
    beauty: Grid2D<Vec3>,
    position: Grid2D<Vec3>,
    normal: Grid2D<Vec3>,
    object_id: Grid2D<i32>,
) -> FrameInfo {
    let dim = beauty.dim();

    FrameInfo::new(
        beauty,
        position,
        normal,
        Grid2D::filled(dim.x, dim.y, 1.0),
        object_id,
        vec![Mat4::IDENTITY; 4],
        vec![Mat4::IDENTITY, Mat4::IDENTITY],
    )
    .unwrap()
}

pub fn uniform_frame(width: u32, height: u32, color: Vec3) -> FrameInfo {
    frame(
        Grid2D::filled(width, height, color),
        flat_positions(width, height),
        Grid2D::filled(width, height, Vec3::Z),
        Grid2D::filled(width, height, 0),
    )
}

/// A frame with flat geometry and a deterministic, non-uniform color
/// pattern.
pub fn patterned_frame(width: u32, height: u32) -> FrameInfo {
    frame(
        Grid2D::from_fn(width, height, |x, y| {
            vec3(
                ((7 * x + 13 * y) % 17) as f32 / 17.0,
                ((3 * x + 5 * y) % 11) as f32 / 11.0,
                ((11 * x + 2 * y) % 13) as f32 / 13.0,
            )
        }),
        flat_positions(width, height),
        Grid2D::filled(width, height, Vec3::Z),
        Grid2D::filled(width, height, 0),
    )
}

pub fn flat_positions(width: u32, height: u32) -> Grid2D<Vec3> {
    Grid2D::from_fn(width, height, |x, y| vec3(x as f32, y as f32, 0.0))
}
