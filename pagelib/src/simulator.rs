use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use crate::config::Algorithm;
use crate::error::SimulationError;
use crate::frames::{FrameSet, Page};
use crate::replacement_policies::{GenericPolicy, ReplacementPolicy};

/// Whether a reference found its page resident
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Outcome {
    Hit,
    Fault,
}

/// The record of a single reference being processed
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct StepRecord {
    pub reference: Page,
    /// Frame contents after this reference, one entry per frame
    pub frames: Vec<Option<Page>>,
    pub outcome: Outcome,
    /// Set only when a fault evicted a resident page from this slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_slot: Option<usize>,
}

impl StepRecord {
    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }
}

/// The result of a simulation. Can be serialised for consumers outside the process
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SimulationResult {
    pub steps: Vec<StepRecord>,
    pub hits: u64,
    pub faults: u64,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The number of frames in each snapshot, zero for an empty run
    pub fn frame_count(&self) -> usize {
        self.steps.first().map_or(0, |s| s.frames.len())
    }

    pub fn hit_ratio(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.hits as f64 / self.steps.len() as f64
        }
    }
}

/// Largest frame count a simulation accepts, every step records a snapshot of all frames
pub const MAX_FRAMES: usize = 1 << 16;

/// The simulator validates the run parameters once, then replays reference sequences against a
/// fresh frame set each time.
///
/// It supports calling simulate multiple times, no state is carried between runs apart from the
/// accumulated time taken to simulate
pub struct Simulator {
    frame_count: usize,
    algorithm: Algorithm,
    simulation_time: Duration,
}

impl Simulator {
    /// Creates a new simulator
    ///
    /// # Arguments
    ///
    /// * `frame_count`: The number of frames, between 1 and `MAX_FRAMES`
    /// * `algorithm`: The replacement policy to simulate
    ///
    /// returns: Result<Simulator, SimulationError>
    pub fn new(frame_count: usize, algorithm: Algorithm) -> Result<Self, SimulationError> {
        if !(1..=MAX_FRAMES).contains(&frame_count) {
            return Err(SimulationError::InvalidFrameCount(frame_count));
        }
        Ok(Self {
            frame_count,
            algorithm,
            simulation_time: Duration::new(0, 0),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Simulates the configured policy over a reference sequence, producing one step record per
    /// reference
    ///
    /// The whole sequence is processed before returning. An empty sequence produces an empty
    /// result
    ///
    /// # Arguments
    ///
    /// * `references`: The reference sequence
    ///
    /// returns: SimulationResult
    pub fn simulate(&mut self, references: &[Page]) -> SimulationResult {
        let start = Instant::now();
        let policy = GenericPolicy::new(self.algorithm, self.frame_count);
        let result = run(policy, self.frame_count, references);
        self.simulation_time += start.elapsed();
        debug!(
            algorithm = %self.algorithm,
            frames = self.frame_count,
            references = references.len(),
            hits = result.hits,
            faults = result.faults,
            "Simulation finished"
        );
        result
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }
}

/// Simulates a replacement policy over a reference sequence
///
/// # Arguments
///
/// * `references`: The reference sequence, possibly empty
/// * `frame_count`: The number of frames, between 1 and `MAX_FRAMES`
/// * `algorithm`: The replacement policy
///
/// returns: Result<SimulationResult, SimulationError>
///
/// # Examples
///
/// ```
/// use pagelib::config::Algorithm;
/// use pagelib::simulator::simulate;
/// let result = simulate(&[1, 2, 1, 3], 2, Algorithm::Lru).unwrap();
/// assert_eq!((result.hits, result.faults), (1, 3));
/// assert_eq!(result.steps[3].frames, vec![Some(1), Some(3)]);
/// ```
pub fn simulate(references: &[Page], frame_count: usize, algorithm: Algorithm) -> Result<SimulationResult, SimulationError> {
    Ok(Simulator::new(frame_count, algorithm)?.simulate(references))
}

/// Runs a policy over the references. The frame set lives only for the duration of this call
pub fn run<R: ReplacementPolicy>(mut policy: R, frame_count: usize, references: &[Page]) -> SimulationResult {
    let mut frames = FrameSet::new(frame_count);
    let mut steps = Vec::with_capacity(references.len());
    let mut hits = 0;
    let mut faults = 0;
    for (position, &reference) in references.iter().enumerate() {
        let step = match frames.slot_of(reference) {
            Some(slot) => {
                policy.update_on_hit(slot);
                hits += 1;
                StepRecord {
                    reference,
                    frames: frames.snapshot(),
                    outcome: Outcome::Hit,
                    replaced_slot: None,
                }
            }
            None => {
                let slot = policy.get_new_slot(&frames, position, references);
                debug_assert!(slot < frame_count);
                let evicted = frames.replace(slot, reference);
                if let Some(victim) = evicted {
                    trace!(position, reference, slot, victim, "Evicted");
                }
                faults += 1;
                StepRecord {
                    reference,
                    frames: frames.snapshot(),
                    outcome: Outcome::Fault,
                    replaced_slot: evicted.map(|_| slot),
                }
            }
        };
        trace!(position, reference, outcome = ?step.outcome, "Step");
        steps.push(step);
    }
    SimulationResult { steps, hits, faults }
}
