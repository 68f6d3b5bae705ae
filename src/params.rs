use crate::{Error, Result};

/// Denoiser configuration; fixed for the lifetime of one [`Denoiser`].
///
/// The sigma values are the bandwidths of the joint bilateral filter's
/// distance terms - smaller values make the corresponding feature more
/// discriminating.
///
/// [`Denoiser`]: crate::Denoiser
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenoiserParams {
    /// Blend weight of the current frame against history; `1.0` disables
    /// temporal accumulation altogether.
    pub alpha: f32,

    /// Multiplier on the per-channel spread used to clamp history into the
    /// current frame's local color statistics.
    pub color_box_k: f32,

    /// Bandwidth of the world-space position term.
    pub sigma_coord: f32,

    /// Bandwidth of the color term.
    pub sigma_color: f32,

    /// Bandwidth of the normal-angle term.
    pub sigma_normal: f32,

    /// Bandwidth of the tangent-plane term.
    pub sigma_plane: f32,

    /// Half-width of the spatial filter's window; the window spans
    /// `(2 * filter_radius + 1)²` pixels, clipped to image bounds.
    pub filter_radius: u32,

    /// Half-width of the window used to gather the color statistics that
    /// clamp history during temporal accumulation.
    pub clamp_radius: u32,
}

impl DenoiserParams {
    pub fn validate(&self) -> Result<()> {
        let bandwidths = [
            ("color_box_k", self.color_box_k),
            ("sigma_coord", self.sigma_coord),
            ("sigma_color", self.sigma_color),
            ("sigma_normal", self.sigma_normal),
            ("sigma_plane", self.sigma_plane),
        ];

        for (name, value) in bandwidths {
            // Negated comparison, so that NaN gets rejected as well
            if !(value > 0.0) {
                return Err(Error::InvalidParam { name, value });
            }
        }

        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidParam {
                name: "alpha",
                value: self.alpha,
            });
        }

        Ok(())
    }
}

impl Default for DenoiserParams {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            color_box_k: 1.0,
            sigma_coord: 32.0,
            sigma_color: 0.6,
            sigma_normal: 0.1,
            sigma_plane: 0.1,
            filter_radius: 16,
            clamp_radius: 3,
        }
    }
}
