use thiserror::Error;

use crate::units::Length;

/// Top-level error type for the wallkit kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Segmentation(#[from] SegmentationError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Hard failures of wall segmentation.
///
/// These mean the wall's opening list is invalid and the operation that
/// produced it must be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentationError {
    #[error("Opening extends beyond wall length: opening ends at {opening_end} but wall is only {wall_length} long")]
    ExtendsBeyondWall {
        opening_end: Length,
        wall_length: Length,
    },

    #[error("Opening overlaps with previous segment: opening starts at {opening_start} but previous segment ends at {previous_end}")]
    OverlapsPrevious {
        opening_start: Length,
        previous_end: Length,
    },

    #[error("Opening has negative offset: opening starts at {offset}")]
    NegativeOffset { offset: Length },
}

/// Errors raised by mutations of the floor model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("invalid wall count: a perimeter needs at least 3 walls, got {0}")]
    InvalidWallCount(usize),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to loading kernel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`KernelError`].
pub type Result<T> = std::result::Result<T, KernelError>;
