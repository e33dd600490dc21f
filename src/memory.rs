use std::collections::BTreeSet;

/// Asteroid ids the ship has already committed a shot toward this game.
/// Cleared on a new game and after every `rotation` commits.
#[derive(Clone, Debug)]
pub struct EngagementMemory {
    claimed: BTreeSet<u64>,
    commits: u32,
    rotation: u32,
}

impl EngagementMemory {
    pub fn new(rotation: u32) -> Self {
        Self {
            claimed: BTreeSet::new(),
            commits: 0,
            rotation: rotation.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.claimed.clear();
        self.commits = 0;
    }

    pub fn is_engaged(&self, id: u64) -> bool {
        self.claimed.contains(&id)
    }

    /// Returns `true` if this commit rotated the memory, clearing every
    /// claim including this one.
    pub fn commit(&mut self, id: u64) -> bool {
        self.claimed.insert(id);
        self.commits += 1;
        if self.commits >= self.rotation {
            tracing::trace!(commits = self.commits, "rotating engagement memory");
            self.reset();
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    pub fn commits(&self) -> u32 {
        self.commits
    }
}
