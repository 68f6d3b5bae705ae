use glam::{Mat4, UVec2, Vec3};

use crate::{Error, Grid2D, Result};

/// Per-frame bundle of renderer outputs: the noisy color estimate plus the
/// G-buffers and transforms the temporal pipeline needs.
///
/// Immutable once constructed; [`FrameInfo::new()`] checks that all buffers
/// share one size and that the transform history ends with the
/// world-to-camera and world-to-screen transforms, in that order. That
/// trailing-entries convention is a contract of the renderer's frame dump
/// format, validated here instead of being assumed deeper in the pipeline.
#[derive(Clone, Debug)]
pub struct FrameInfo {
    beauty: Grid2D<Vec3>,
    position: Grid2D<Vec3>,
    normal: Grid2D<Vec3>,
    depth: Grid2D<f32>,
    object_id: Grid2D<i32>,
    object_to_world: Vec<Mat4>,
    transform_history: Vec<Mat4>,
}

impl FrameInfo {
    pub fn new(
        beauty: Grid2D<Vec3>,
        position: Grid2D<Vec3>,
        normal: Grid2D<Vec3>,
        depth: Grid2D<f32>,
        object_id: Grid2D<i32>,
        object_to_world: Vec<Mat4>,
        transform_history: Vec<Mat4>,
    ) -> Result<Self> {
        let expected = beauty.dim();

        let actuals = [
            position.dim(),
            normal.dim(),
            depth.dim(),
            object_id.dim(),
        ];

        for actual in actuals {
            if actual != expected {
                return Err(Error::DimensionMismatch { expected, actual });
            }
        }

        if transform_history.len() < 2 {
            return Err(Error::TruncatedTransformHistory {
                len: transform_history.len(),
            });
        }

        Ok(Self {
            beauty,
            position,
            normal,
            depth,
            object_id,
            object_to_world,
            transform_history,
        })
    }

    pub fn dim(&self) -> UVec2 {
        self.beauty.dim()
    }

    /// Noisy color estimate, straight from the renderer.
    pub fn beauty(&self) -> &Grid2D<Vec3> {
        &self.beauty
    }

    /// World-space surface point visible at each pixel.
    pub fn position(&self) -> &Grid2D<Vec3> {
        &self.position
    }

    /// World-space unit surface normal at each pixel.
    pub fn normal(&self) -> &Grid2D<Vec3> {
        &self.normal
    }

    pub fn depth(&self) -> &Grid2D<f32> {
        &self.depth
    }

    /// Id of the object visible at each pixel; `-1` marks background.
    pub fn object_id(&self) -> &Grid2D<i32> {
        &self.object_id
    }

    /// Object-to-world transform for given object id, or `None` if the id is
    /// negative or has no entry in this frame's transform table.
    pub fn object_to_world(&self, id: i32) -> Option<Mat4> {
        usize::try_from(id)
            .ok()
            .and_then(|id| self.object_to_world.get(id))
            .copied()
    }

    pub fn world_to_camera(&self) -> Mat4 {
        self.transform_history[self.transform_history.len() - 2]
    }

    pub fn world_to_screen(&self) -> Mat4 {
        self.transform_history[self.transform_history.len() - 1]
    }
}
