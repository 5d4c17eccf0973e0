use thiserror::Error;

/// Failures surfaced by maze construction.
///
/// Everything else in the core (off-grid probes, moves into walls) is a
/// normal boundary condition and is reported through return values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
