use thiserror::Error;

/// Errors reported before a simulation starts. Simulation itself cannot fail once its inputs
/// have been validated.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid frame count: {0} (expected between 1 and {max} frames)", max = crate::simulator::MAX_FRAMES)]
    InvalidFrameCount(usize),

    #[error("Unknown algorithm: {0} (expected FIFO, LRU, or Optimal)")]
    UnknownAlgorithm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
