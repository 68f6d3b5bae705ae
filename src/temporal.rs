//! Temporal accumulation: blends reprojected history into the freshly
//! filtered frame with a variance-clamped exponential moving average.
//!
//! Before blending, the history color is clamped into a per-channel band
//! around the current frame's local mean; history that disagrees strongly
//! with the neighbourhood (stale lighting, ghosting) gets pulled back into
//! plausible range instead of being trusted outright.

use glam::Vec3;
use rayon::prelude::*;

use crate::utils::Vec3Ext;
use crate::{DenoiserParams, Grid2D};

/// Combines the filtered current frame with its reprojected history.
///
/// Pixels whose `validity` flag is unset discard history entirely and take
/// the filtered color as-is.
pub fn accumulate(
    filtered: &Grid2D<Vec3>,
    history: &Grid2D<Vec3>,
    validity: &Grid2D<bool>,
    params: &DenoiserParams,
) -> Grid2D<Vec3> {
    let dim = filtered.dim();
    let mut out = Grid2D::filled(dim.x, dim.y, Vec3::ZERO);

    out.par_rows_mut().enumerate().for_each(|(y, row)| {
        for (x, out_color) in row.iter_mut().enumerate() {
            *out_color = accumulate_pixel(
                filtered,
                history,
                validity,
                params,
                x as u32,
                y as u32,
            );
        }
    });

    out
}

fn accumulate_pixel(
    filtered: &Grid2D<Vec3>,
    history: &Grid2D<Vec3>,
    validity: &Grid2D<bool>,
    params: &DenoiserParams,
    x: u32,
    y: u32,
) -> Vec3 {
    // A miss during reprojection means there is no history to trust; take
    // the fresh filtered value outright
    if !validity[(x, y)] {
        return filtered[(x, y)];
    }

    let dim = filtered.dim();
    let radius = params.clamp_radius as i32;

    let min_x = (x as i32 - radius).max(0) as u32;
    let max_x = (x as i32 + radius).min(dim.x as i32 - 1) as u32;
    let min_y = (y as i32 - radius).max(0) as u32;
    let max_y = (y as i32 + radius).min(dim.y as i32 - 1) as u32;

    let count = ((max_x - min_x + 1) * (max_y - min_y + 1)) as f32;

    let mut mean = Vec3::ZERO;

    for qy in min_y..=max_y {
        for qx in min_x..=max_x {
            mean += filtered[(qx, qy)];
        }
    }

    mean /= count;

    let mut variance = Vec3::ZERO;

    for qy in min_y..=max_y {
        for qx in min_x..=max_x {
            variance += (filtered[(qx, qy)] - mean).sqr();
        }
    }

    variance /= count;

    let spread = variance.sqrt() * params.color_box_k;
    let clamped_history = history[(x, y)].clamp(mean - spread, mean + spread);

    clamped_history.lerp(filtered[(x, y)], params.alpha)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    // Large enough to keep the variance clamp from biting
    fn lenient_params(alpha: f32) -> DenoiserParams {
        DenoiserParams {
            alpha,
            color_box_k: 1.0e6,
            ..Default::default()
        }
    }

    #[test]
    fn invalid_pixels_take_the_filtered_color_outright() {
        let filtered = Grid2D::filled(4, 4, vec3(0.2, 0.4, 0.6));
        let history = Grid2D::filled(4, 4, vec3(0.9, 0.9, 0.9));
        let validity = Grid2D::from_fn(4, 4, |x, y| !(x == 1 && y == 1));

        let target =
            accumulate(&filtered, &history, &validity, &lenient_params(0.5));

        assert_eq!(filtered[(1, 1)], target[(1, 1)]);
    }

    #[test]
    fn valid_pixels_blend_history_with_alpha() {
        let filtered = Grid2D::filled(4, 4, Vec3::ONE);
        let history = Grid2D::filled(4, 4, Vec3::ZERO);
        let validity = Grid2D::filled(4, 4, true);

        let target =
            accumulate(&filtered, &history, &validity, &lenient_params(0.25));

        for y in 0..4 {
            for x in 0..4 {
                assert_relative_eq!(0.25, target[(x, y)].x, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn disagreeing_history_gets_clamped_to_local_statistics() {
        // The current frame is uniform, so its local variance is zero - a
        // history that disagrees must be clamped all the way to the mean,
        // killing the ghost in a single frame
        let filtered = Grid2D::filled(4, 4, vec3(0.5, 0.5, 0.5));
        let history = Grid2D::filled(4, 4, vec3(10.0, -3.0, 0.5));
        let validity = Grid2D::filled(4, 4, true);

        let params = DenoiserParams {
            alpha: 0.2,
            ..Default::default()
        };

        let target = accumulate(&filtered, &history, &validity, &params);

        for y in 0..4 {
            for x in 0..4 {
                assert_relative_eq!(0.5, target[(x, y)].x, epsilon = 1e-6);
                assert_relative_eq!(0.5, target[(x, y)].y, epsilon = 1e-6);
                assert_relative_eq!(0.5, target[(x, y)].z, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn border_statistics_use_the_clipped_window() {
        // A 1x1 image has a single-sample window; the mean must be that
        // sample itself, not a full-window average diluted by zeros
        let filtered = Grid2D::filled(1, 1, vec3(0.8, 0.8, 0.8));
        let history = Grid2D::filled(1, 1, vec3(0.8, 0.8, 0.8));
        let validity = Grid2D::filled(1, 1, true);

        let target =
            accumulate(&filtered, &history, &validity, &lenient_params(0.5));

        assert_relative_eq!(0.8, target[(0, 0)].x, epsilon = 1e-6);
    }
}
