//! Joint bilateral filter: denoises a single frame using its G-buffers,
//! weighting each neighbour by position, color, normal and tangent-plane
//! distance so that geometric edges survive the blur.

use glam::Vec3;
use rayon::prelude::*;

use crate::utils::F32Ext;
use crate::{DenoiserParams, FrameInfo, Grid2D};

/// Filters one frame's noisy color estimate.
///
/// Pure function of the given frame - no history is consulted; the output at
/// each pixel is a convex combination of the colors inside that pixel's
/// window.
pub fn filter(frame: &FrameInfo, params: &DenoiserParams) -> Grid2D<Vec3> {
    let dim = frame.dim();
    let mut out = Grid2D::filled(dim.x, dim.y, Vec3::ZERO);

    out.par_rows_mut().enumerate().for_each(|(y, row)| {
        for (x, out_color) in row.iter_mut().enumerate() {
            *out_color = filter_pixel(frame, params, x as u32, y as u32);
        }
    });

    out
}

fn filter_pixel(frame: &FrameInfo, params: &DenoiserParams, x: u32, y: u32) -> Vec3 {
    let dim = frame.dim();
    let radius = params.filter_radius as i32;

    let center_color = frame.beauty()[(x, y)];
    let center_position = frame.position()[(x, y)];
    let center_normal = frame.normal()[(x, y)];

    let min_x = (x as i32 - radius).max(0) as u32;
    let max_x = (x as i32 + radius).min(dim.x as i32 - 1) as u32;
    let min_y = (y as i32 - radius).max(0) as u32;
    let max_y = (y as i32 + radius).min(dim.y as i32 - 1) as u32;

    let mut weighted_colors = Vec3::ZERO;
    let mut weights = 0.0;

    for qy in min_y..=max_y {
        for qx in min_x..=max_x {
            if qx == x && qy == y {
                weighted_colors += center_color;
                weights += 1.0;
                continue;
            }

            let sample_color = frame.beauty()[(qx, qy)];
            let sample_position = frame.position()[(qx, qy)];
            let sample_normal = frame.normal()[(qx, qy)];

            let position_term = center_position.distance_squared(sample_position)
                / (2.0 * params.sigma_coord);

            let color_term =
                center_color.distance_squared(sample_color) / (2.0 * params.sigma_color);

            let normal_term = center_normal.dot(sample_normal).acos_clamped()
                / (2.0 * params.sigma_normal);

            // Distance of the sample off the center's tangent plane; tells
            // apart surfaces that are close in space but geometrically
            // unrelated, e.g. across a depth discontinuity.
            //
            // `normalize_or_zero()` keeps the term total when the sample
            // shares the center's world position.
            let plane_term = center_normal
                .dot((sample_position - center_position).normalize_or_zero())
                .sqr()
                / (2.0 * params.sigma_plane);

            let weight =
                (-(position_term + color_term + normal_term + plane_term)).exp();

            weighted_colors += sample_color * weight;
            weights += weight;
        }
    }

    if weights > 0.0 {
        weighted_colors / weights
    } else {
        // The center always contributes weight 1, so this only triggers on
        // non-finite inputs; pass the sample through rather than divide by
        // zero.
        center_color
    }
}
