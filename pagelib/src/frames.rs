/// A page identifier, as it appears in a reference sequence
pub type Page = i64;

/// A fixed number of frames, each either holding a resident page or empty
///
/// The frame set never grows or shrinks after creation, so a snapshot always has exactly
/// `capacity` entries. Empty slots are `None`, which keeps them distinct from every valid page
/// identifier (including 0 and negative identifiers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    slots: Vec<Option<Page>>,
}

impl FrameSet {
    /// Creates a frame set with all slots empty
    ///
    /// # Arguments
    ///
    /// * `capacity`: The number of frames. Validated by the simulator, must be at least 1
    ///
    /// returns: FrameSet
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The slot currently holding `page`, if it is resident
    pub fn slot_of(&self, page: Page) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(page))
    }

    /// The lowest-indexed empty slot, if any
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn get(&self, slot: usize) -> Option<Page> {
        self.slots.get(slot).copied().flatten()
    }

    /// Places a page into a slot, returning whatever was resident there before
    pub fn replace(&mut self, slot: usize, page: Page) -> Option<Page> {
        self.slots[slot].replace(page)
    }

    /// Iterates over occupied slots in ascending slot order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Page)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, page)| page.map(|p| (slot, p)))
    }

    pub fn resident_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    pub fn snapshot(&self) -> Vec<Option<Page>> {
        self.slots.clone()
    }
}
