use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::SimulationError;
use crate::frames::Page;
use crate::io::parse_references;

pub const DEFAULT_FRAMES: usize = 3;

/// The replacement policy - fifo, lru, or optimal. Defaults to fifo.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub enum Algorithm {
    #[default]
    #[serde(alias = "fifo", alias = "FIFO")]
    Fifo,
    #[serde(alias = "lru", alias = "LRU")]
    Lru,
    #[serde(alias = "optimal", alias = "opt", alias = "min")]
    Optimal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Fifo, Algorithm::Lru, Algorithm::Optimal];
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Algorithm::Fifo),
            "lru" => Ok(Algorithm::Lru),
            "optimal" | "opt" | "min" => Ok(Algorithm::Optimal),
            _ => Err(SimulationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Fifo => write!(f, "FIFO"),
            Algorithm::Lru => write!(f, "LRU"),
            Algorithm::Optimal => write!(f, "Optimal"),
        }
    }
}

/// Reference sequences can be given either as a reference string, tokenised the same way as on
/// the command line, or as a plain list of integers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReferenceSource {
    Text(String),
    List(Vec<Page>),
}

/// A simulation run read from a JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub references: ReferenceSource,
    /// Signed so that out of range values such as `-2` clamp instead of failing the parse
    #[serde(default = "default_frames")]
    pub frames: i64,
    #[serde(default)]
    pub algorithm: Algorithm,
}

fn default_frames() -> i64 {
    DEFAULT_FRAMES as i64
}

impl SimulationConfig {
    /// The clean reference sequence, with malformed tokens dropped for the text form
    pub fn reference_sequence(&self) -> Vec<Page> {
        match &self.references {
            ReferenceSource::Text(text) => parse_references(text),
            ReferenceSource::List(list) => list.clone(),
        }
    }

    /// Frame count, clamped to the minimum of one frame
    pub fn frame_count(&self) -> usize {
        usize::try_from(self.frames.max(1)).unwrap_or(usize::MAX)
    }
}
