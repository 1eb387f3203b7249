/// Counters describing how a [`Cache`](crate::Cache) has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CacheStats {
    /// `get` calls that found their key.
    pub hits: u64,
    /// `get` calls that did not.
    pub misses: u64,
    /// Entries dropped by `remove_oldest`, whether called directly or to restore the budget.
    pub evictions: u64,
    /// `add` calls with a new key.
    pub insertions: u64,
    /// `add` calls that replaced the value of an existing key.
    pub updates: u64,
    /// Entries taken out with `remove`.
    pub removals: u64,
}

impl CacheStats {
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }
}
