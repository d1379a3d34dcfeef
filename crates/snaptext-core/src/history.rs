use std::collections::VecDeque;

use snaptext_types::Region;

/// Most recently selected regions, oldest first.
///
/// Appending to a full history drops the oldest entry.
#[derive(Debug, Clone)]
pub struct RegionHistory {
    regions: VecDeque<Region>,
    capacity: usize,
}

impl RegionHistory {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            regions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, region: Region) {
        if self.regions.len() == self.capacity {
            self.regions.pop_front();
        }
        self.regions.push_back(region);
    }

    pub fn most_recent(&self) -> Option<Region> {
        self.regions.back().copied()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}

impl Default for RegionHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
