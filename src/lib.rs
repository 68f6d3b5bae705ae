//! Temporal denoiser for stochastically rendered frame sequences.
//!
//! Each frame carries a noisy color estimate plus the G-buffers produced
//! alongside it (world position, normal, depth, object id) and the frame's
//! transform chain. Per frame, the pipeline runs a joint bilateral filter
//! over the current buffers, reprojects the previous frame's accumulated
//! color to the current view, and blends the two with a variance-clamped
//! exponential moving average.
//!
//! The entry point is [`Denoiser::process_frame`]; the individual passes
//! ([`filter`], [`reproject`], [`accumulate`]) are exposed as pure functions
//! as well.

mod denoiser;
mod error;
mod frame;
mod grid;
mod params;
mod reprojection;
mod spatial;
mod temporal;
#[cfg(test)]
mod testing;
mod utils;

pub use self::denoiser::*;
pub use self::error::*;
pub use self::frame::*;
pub use self::grid::*;
pub use self::params::*;
pub use self::reprojection::*;
pub use self::spatial::*;
pub use self::temporal::*;
pub use self::utils::*;
