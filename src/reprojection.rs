//! Cross-frame reprojection: finds out where each current pixel's surface
//! point was located on screen in the previous frame.
//!
//! The surface point is carried through the owning object's local space
//! (current world -> local -> previous world), so reprojection works for
//! moving objects, not just a moving camera. A pixel that lands off screen
//! or on a different object has simply been disoccluded - that is the
//! expected "no history" outcome, not an error.

use glam::{IVec2, Vec3};
use rayon::prelude::*;

use crate::{FrameInfo, Grid2D};

/// Reprojects the previously accumulated color into the current frame.
///
/// Returns a per-pixel validity mask and the reprojected history colors;
/// invalid pixels carry black and must not contribute history downstream.
pub fn reproject(
    current: &FrameInfo,
    previous: &FrameInfo,
    previous_accumulated: &Grid2D<Vec3>,
) -> (Grid2D<bool>, Grid2D<Vec3>) {
    let dim = current.dim();
    let mut validity = Grid2D::filled(dim.x, dim.y, false);
    let mut history = Grid2D::filled(dim.x, dim.y, Vec3::ZERO);

    validity
        .par_rows_mut()
        .zip(history.par_rows_mut())
        .enumerate()
        .for_each(|(y, (validity_row, history_row))| {
            for x in 0..dim.x {
                let (valid, color) = reproject_pixel(
                    current,
                    previous,
                    previous_accumulated,
                    x,
                    y as u32,
                );

                validity_row[x as usize] = valid;
                history_row[x as usize] = color;
            }
        });

    (validity, history)
}

fn reproject_pixel(
    current: &FrameInfo,
    previous: &FrameInfo,
    previous_accumulated: &Grid2D<Vec3>,
    x: u32,
    y: u32,
) -> (bool, Vec3) {
    const MISS: (bool, Vec3) = (false, Vec3::ZERO);

    let id = current.object_id()[(x, y)];

    // Background pixels never carry history
    if id == -1 {
        return MISS;
    }

    let (Some(object_to_world), Some(prev_object_to_world)) = (
        current.object_to_world(id),
        previous.object_to_world(id),
    ) else {
        return MISS;
    };

    let world_pos = current.position()[(x, y)];
    let local_pos = object_to_world.inverse().transform_point3(world_pos);
    let prev_world_pos = prev_object_to_world.transform_point3(local_pos);

    let prev_screen_pos = previous
        .world_to_screen()
        .project_point3(prev_world_pos);

    if !prev_screen_pos.is_finite() {
        return MISS;
    }

    let prev_pos = IVec2::new(prev_screen_pos.x as i32, prev_screen_pos.y as i32);

    if !previous_accumulated.contains(prev_pos) {
        return MISS;
    }

    let prev_pos = prev_pos.as_uvec2();

    // Same object id at the reprojected pixel means the same surface was
    // visible there; anything else is an occlusion change
    if previous.object_id()[prev_pos] != id {
        return MISS;
    }

    (true, previous_accumulated[prev_pos])
}
