use glam::UVec2;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// A configuration value that would divide by zero inside the bilateral
    /// weighting or produce a meaningless blend.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParam { name: &'static str, value: f32 },

    /// A frame's buffers disagree in size with each other, or with the
    /// dimensions established by the first processed frame.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: UVec2, actual: UVec2 },

    /// The transform history must end with the world-to-camera and
    /// world-to-screen transforms, in that order.
    #[error("transform history holds {len} entries, expected at least 2")]
    TruncatedTransformHistory { len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
