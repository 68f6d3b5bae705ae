use glam::Vec3;

use crate::{
    reprojection, spatial, temporal, DenoiserParams, Error, FrameInfo, Grid2D,
    Result,
};

/// Drives the denoising pipeline across a frame sequence.
///
/// Owns the accumulated color and the per-pixel validity mask; frames must
/// be fed in temporal order, one at a time (enforced by `&mut self`), and
/// must all share the dimensions of the first frame. To reset history - e.g.
/// on a scene cut - construct a fresh `Denoiser`.
pub struct Denoiser {
    params: DenoiserParams,
    state: State,
    frames: u64,
}

/// Before the first frame there is nothing to reproject against; afterwards
/// the denoiser stays in `Tracking` for its entire lifetime.
enum State {
    Uninitialized,
    Tracking {
        previous: FrameInfo,
        accumulated: Grid2D<Vec3>,
        validity: Grid2D<bool>,
    },
}

impl Denoiser {
    pub fn new(params: DenoiserParams) -> Result<Self> {
        params.validate()?;

        log::info!(
            "Initializing (alpha={}, color_box_k={}, filter_radius={})",
            params.alpha,
            params.color_box_k,
            params.filter_radius,
        );

        Ok(Self {
            params,
            state: State::Uninitialized,
            frames: 0,
        })
    }

    /// Denoises one frame; the returned grid stays valid for read until the
    /// next call.
    ///
    /// The call is atomic: a rejected frame leaves the retained state
    /// exactly as it was.
    pub fn process_frame(&mut self, frame: FrameInfo) -> Result<&Grid2D<Vec3>> {
        if let State::Tracking { previous, .. } = &self.state {
            if previous.dim() != frame.dim() {
                return Err(Error::DimensionMismatch {
                    expected: previous.dim(),
                    actual: frame.dim(),
                });
            }
        }

        log::trace!("Processing frame {} ({})", self.frames, frame.dim());

        let filtered = spatial::filter(&frame, &self.params);

        let state = std::mem::replace(&mut self.state, State::Uninitialized);

        self.state = match state {
            State::Uninitialized => {
                let dim = frame.dim();

                State::Tracking {
                    previous: frame,
                    accumulated: filtered,
                    validity: Grid2D::filled(dim.x, dim.y, false),
                }
            }

            State::Tracking {
                previous,
                accumulated,
                ..
            } => {
                let (validity, history) =
                    reprojection::reproject(&frame, &previous, &accumulated);

                let accumulated = temporal::accumulate(
                    &filtered,
                    &history,
                    &validity,
                    &self.params,
                );

                State::Tracking {
                    previous: frame,
                    accumulated,
                    validity,
                }
            }
        };

        self.frames += 1;

        let State::Tracking { accumulated, .. } = &self.state else {
            unreachable!();
        };

        Ok(accumulated)
    }

    pub fn params(&self) -> &DenoiserParams {
        &self.params
    }

    /// Per-pixel validity mask from the most recent reprojection, or `None`
    /// before the first frame.
    pub fn validity(&self) -> Option<&Grid2D<bool>> {
        match &self.state {
            State::Uninitialized => None,
            State::Tracking { validity, .. } => Some(validity),
        }
    }

    /// Number of frames processed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
