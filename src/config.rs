//! Construction-time settings for a [`Forest`](crate::Forest).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for a forest.
///
///```
/// use copse::ForestConfig;
///
/// let config = ForestConfig::default().with_seed(7).with_capacity(1024);
/// assert_eq!(config.seed, Some(7));
/// assert!(config.recycle_handles);
///```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForestConfig {
    /// Seed for the priority generator. `None` seeds from the OS entropy source.
    pub seed: Option<u64>,
    /// Number of node slots reserved up front.
    pub capacity: usize,
    /// Whether freed node slots are reused for new nodes.
    /// Handles to freed slots are rejected either way.
    pub recycle_handles: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        ForestConfig {
            seed: None,
            capacity: 0,
            recycle_handles: true,
        }
    }
}

impl ForestConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn recycle_handles(mut self, recycle: bool) -> Self {
        self.recycle_handles = recycle;
        self
    }
}
