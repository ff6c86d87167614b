use std::collections::VecDeque;
use crate::config::Algorithm;
use crate::frames::{FrameSet, Page};

/// A generic trait for implementing replacement policies. Used by the simulator to decide where a
/// faulting page is placed.
pub trait ReplacementPolicy {
    /// Updates the policy when a resident page is referenced again
    ///
    /// Not applicable for some policies, a default which does nothing is provided
    ///
    /// # Arguments
    ///
    /// * `slot`: The slot holding the page which was hit
    ///
    /// returns: ()
    fn update_on_hit(&mut self, _slot: usize) {}

    /// Used by the simulator to get a slot when a faulting page needs placing.
    ///
    /// Implementations should assume that when this method is called, the returned slot will
    /// receive the faulting page, whether it was empty or held a victim
    ///
    /// # Arguments
    ///
    /// * `frames`: The frame set before the faulting page is placed
    /// * `position`: The position of the faulting reference in the reference sequence
    /// * `references`: The whole reference sequence, for policies which look ahead
    ///
    /// returns: usize, always less than the frame set's capacity
    fn get_new_slot(&mut self, frames: &FrameSet, position: usize, references: &[Page]) -> usize;
}

/// First in, first out
///
/// Keeps a single circular pointer. Every fault writes to the slot under the pointer and moves it
/// along, so while the frame set is filling the pointer lands on the lowest empty slot and
/// afterwards victims cycle through the slots in order
pub struct Fifo {
    pointer: usize,
    frame_count: usize,
}

impl Fifo {
    pub fn new(frame_count: usize) -> Self {
        Self {
            pointer: 0,
            frame_count,
        }
    }
}

impl ReplacementPolicy for Fifo {
    fn update_on_hit(&mut self, _: usize) {}

    fn get_new_slot(&mut self, _frames: &FrameSet, _position: usize, _references: &[Page]) -> usize {
        let slot = self.pointer;
        self.pointer = (self.pointer + 1) % self.frame_count;
        slot
    }
}

/// Least Recently Used replacement policy
///
/// This implementation tracks slot indices rather than page values. The usage order holds every
/// occupied slot exactly once, least recently used at the front
pub struct LeastRecentlyUsed {
    usage_order: VecDeque<usize>,
}

impl LeastRecentlyUsed {
    pub fn new(frame_count: usize) -> Self {
        Self {
            usage_order: VecDeque::with_capacity(frame_count),
        }
    }

    /// Occupied slots from least to most recently used
    pub fn usage_order(&self) -> impl Iterator<Item = &usize> {
        self.usage_order.iter()
    }
}

impl ReplacementPolicy for LeastRecentlyUsed {
    fn update_on_hit(&mut self, slot: usize) {
        if let Some(index) = self.usage_order.iter().position(|s| *s == slot) {
            self.usage_order.remove(index);
        }
        self.usage_order.push_back(slot);
    }

    fn get_new_slot(&mut self, frames: &FrameSet, _position: usize, _references: &[Page]) -> usize {
        let slot = match frames.first_empty() {
            Some(empty) => empty,
            // A full frame set has every slot in the usage order, so the front is always present
            None => self.usage_order.pop_front().unwrap_or_default(),
        };
        self.usage_order.push_back(slot);
        slot
    }
}

/// Belady's optimal policy, evicting the page whose next use is farthest away
///
/// Slots are scanned in ascending order. The first page which is never referenced again is taken
/// immediately. Otherwise a later slot only displaces the current candidate when its next use is
/// strictly farther, so ties go to the lower slot
#[derive(Default)]
pub struct Optimal;

impl ReplacementPolicy for Optimal {
    fn get_new_slot(&mut self, frames: &FrameSet, position: usize, references: &[Page]) -> usize {
        if let Some(empty) = frames.first_empty() {
            return empty;
        }
        let future = references.get(position + 1..).unwrap_or(&[]);
        let mut victim = 0;
        let mut farthest: Option<usize> = None;
        for (slot, page) in frames.occupied() {
            match future.iter().position(|p| *p == page) {
                None => return slot,
                Some(distance) => {
                    if farthest.map_or(true, |f| distance > f) {
                        farthest = Some(distance);
                        victim = slot;
                    }
                }
            }
        }
        victim
    }
}

// Relatively boilerplate heavy, but keeps each run monomorphised rather than going through a
// trait object per reference
pub enum GenericPolicy {
    Fifo(Fifo),
    LeastRecentlyUsed(LeastRecentlyUsed),
    Optimal(Optimal),
}

impl GenericPolicy {
    /// Fresh policy state for one simulation run
    pub fn new(algorithm: Algorithm, frame_count: usize) -> Self {
        match algorithm {
            Algorithm::Fifo => Fifo::new(frame_count).into(),
            Algorithm::Lru => LeastRecentlyUsed::new(frame_count).into(),
            Algorithm::Optimal => Optimal.into(),
        }
    }
}

impl From<Fifo> for GenericPolicy {
    fn from(value: Fifo) -> Self {
        Self::Fifo(value)
    }
}

impl From<LeastRecentlyUsed> for GenericPolicy {
    fn from(value: LeastRecentlyUsed) -> Self {
        Self::LeastRecentlyUsed(value)
    }
}

impl From<Optimal> for GenericPolicy {
    fn from(value: Optimal) -> Self {
        Self::Optimal(value)
    }
}

impl ReplacementPolicy for GenericPolicy {
    fn update_on_hit(&mut self, slot: usize) {
        match self {
            GenericPolicy::Fifo(p) => p.update_on_hit(slot),
            GenericPolicy::LeastRecentlyUsed(p) => p.update_on_hit(slot),
            GenericPolicy::Optimal(p) => p.update_on_hit(slot),
        }
    }

    fn get_new_slot(&mut self, frames: &FrameSet, position: usize, references: &[Page]) -> usize {
        match self {
            GenericPolicy::Fifo(p) => p.get_new_slot(frames, position, references),
            GenericPolicy::LeastRecentlyUsed(p) => p.get_new_slot(frames, position, references),
            GenericPolicy::Optimal(p) => p.get_new_slot(frames, position, references),
        }
    }
}
