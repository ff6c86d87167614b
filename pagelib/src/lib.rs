//! # PageLib
//!
//! Pagelib is a library for simulating page replacement policies
//!
//! It provides a simulator which replays a reference sequence against a fixed number of frames
//! using FIFO, LRU, or Optimal replacement, recording the frame contents after every reference.
//! The recorded steps can then be played back and rendered one at a time
//!
//! The simulation itself is independent of playback and rendering, which only ever read a
//! finished result

/// Contains the frame set which holds resident pages
pub mod frames;

/// Contains definitions for the JSON run format and the algorithm selection
pub mod config;

/// Contains the error type for invalid simulation parameters
pub mod error;

/// Contains reference string parsing and file reading
pub mod io;

/// Contains the provided replacement policies, with a trait for implementing custom replacement
/// policies
pub mod replacement_policies;

/// Contains the simulator and the step records it produces
pub mod simulator;

/// Contains the playback session used to reveal a result step by step
pub mod playback;

/// Contains text rendering of results
pub mod render;

#[cfg(test)]
mod test;

/// Contains known scenarios for running tests and benchmarks.
pub mod util;
