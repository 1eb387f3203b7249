//! An LRU cache bounded by the number of bytes it holds rather than the number of entries.
//!
//! Every entry is charged `key.len() + value.byte_len()`. When an [`add`](Cache::add) pushes the
//! total over the configured budget, the least recently used entries are evicted until it fits
//! again, and an optional hook is told about each one.
//!
//! The cache is a plain single-threaded structure. Wrap it in a `Mutex` to share it.
//!
//! ```
//! use byte_lru::Cache;
//!
//! let mut cache = Cache::new(20);
//! cache.add("a", String::from("123456789"));
//! cache.add("b", String::from("123456789"));
//!
//! // This `get` touches "a" so it is now the newest.
//! assert!(cache.get("a").is_some());
//!
//! cache.add("c", String::from("123456789"));
//! assert!(cache.get("a").is_some());
//! assert!(cache.get("b").is_none());
//! ```

use std::{
    collections::HashMap,
    fmt,
    ops::{Deref, DerefMut},
};

use log::{debug, trace};

mod budget;
use budget::ByteBudget;
mod byte_len;
pub use byte_len::ByteLen;
mod config;
pub use config::{CacheConfig, MAX_BYTES_ENV};
mod error;
pub use error::ConfigError;
mod recency;
use recency::{RecencyList, SlotId};
mod stats;
pub use stats::CacheStats;


/// Callback told about every evicted entry.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

struct Entry<V> {
    key: String,
    value: V,
    /// What the budget was charged for this entry; released as-is when it leaves.
    charged: u64,
}

impl<V: ByteLen> Entry<V> {
    fn new(key: String, value: V) -> Self {
        let charged = entry_bytes(&key, &value);
        Entry {
            key,
            value,
            charged,
        }
    }

    /// Re-measures the entry, returning the old and new charge.
    fn recharge(&mut self) -> (u64, u64) {
        let old = self.charged;
        self.charged = entry_bytes(&self.key, &self.value);
        (old, self.charged)
    }
}

fn entry_bytes<V: ByteLen>(key: &str, value: &V) -> u64 {
    (key.len() as u64).saturating_add(value.byte_len() as u64)
}

pub struct Cache<V> {
    budget: ByteBudget,
    entries: RecencyList<Entry<V>>,
    index: HashMap<String, SlotId>,
    on_evicted: Option<OnEvicted<V>>,
    stats: CacheStats,
}

impl<V> Cache<V>
where
    V: ByteLen,
{
    /// Creates an empty cache holding at most `max_bytes`. Zero means no limit.
    pub fn new(max_bytes: u64) -> Self {
        Cache {
            budget: ByteBudget::new(max_bytes),
            entries: RecencyList::new(),
            index: HashMap::new(),
            on_evicted: None,
            stats: CacheStats::default(),
        }
    }

    /// Like [`new`](Cache::new), calling `on_evicted` with each entry dropped by
    /// [`remove_oldest`](Cache::remove_oldest).
    pub fn with_on_evicted(
        max_bytes: u64,
        on_evicted: impl FnMut(String, V) + Send + 'static,
    ) -> Self {
        let mut cache = Self::new(max_bytes);
        cache.set_on_evicted(on_evicted);
        cache
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_bytes)
    }

    pub fn set_on_evicted(&mut self, on_evicted: impl FnMut(String, V) + Send + 'static) {
        self.on_evicted = Some(Box::new(on_evicted));
    }

    pub fn clear_on_evicted(&mut self) {
        self.on_evicted = None;
    }

    /// Looks up `key`, making it the most recently used entry on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let id = self.touch(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Cache::get), for editing a value in place.
    ///
    /// The value is measured again when the returned guard drops. A change in size is charged
    /// to the budget, and entries are evicted if it no longer fits, possibly this one.
    pub fn get_mut(&mut self, key: &str) -> Option<ValueMut<'_, V>> {
        let id = self.touch(key)?;
        Some(ValueMut { cache: self, id })
    }

    /// Looks up `key` without changing its recency or the stats.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or replaces `key`, making it the most recently used entry, then evicts the least
    /// recently used entries until the cache is back within budget.
    ///
    /// An entry that is larger than the whole budget ends up evicting itself.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let bytes = entry_bytes(&key, &value);
        if self.budget.exceeds_ceiling(bytes) {
            debug!(
                "entry {:?} is {} bytes, over the {} byte budget",
                key,
                bytes,
                self.budget.max()
            );
        }

        match self.index.get(&key) {
            Some(&id) => self.update(id, value),
            None => self.insert(key, value),
        }

        self.evict_to_budget();
    }

    fn evict_to_budget(&mut self) {
        while self.budget.is_exceeded() {
            self.remove_oldest();
        }
    }

    fn insert(&mut self, key: String, value: V) {
        let entry = Entry::new(key, value);
        self.budget.charge(entry.charged);
        let key = entry.key.clone();
        let id = self.entries.push_newest(entry);
        self.index.insert(key, id);
        self.stats.insertions += 1;
    }

    fn update(&mut self, id: SlotId, value: V) {
        self.entries.set_newest(id);
        if let Some(entry) = self.entries.get_mut(id) {
            entry.value = value;
            self.stats.updates += 1;
        }
        self.recharge(id);
    }

    fn recharge(&mut self, id: SlotId) {
        if let Some(entry) = self.entries.get_mut(id) {
            let (old, new) = entry.recharge();
            if old != new {
                trace!("entry {:?} resized from {} to {} bytes", entry.key, old, new);
            }
            self.budget.release(old);
            self.budget.charge(new);
        }
    }

    /// Evicts the least recently used entry, if any, and hands it to the eviction hook.
    ///
    /// The cache has already forgotten the entry when the hook runs.
    pub fn remove_oldest(&mut self) {
        let entry = match self.entries.take_oldest() {
            Some(entry) => entry,
            None => return,
        };
        self.index.remove(&entry.key);
        let bytes = entry.charged;
        self.budget.release(bytes);
        self.stats.evictions += 1;
        trace!("evicted {:?}, freeing {} bytes", entry.key, bytes);

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(entry.key, entry.value);
        }
    }

    /// Takes `key` out of the cache. This is not an eviction, so the hook is not called.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.entries.remove(id)?;
        self.budget.release(entry.charged);
        self.stats.removals += 1;
        Some(entry.value)
    }

    /// Drops every entry without calling the hook. Stats are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.budget.reset();
    }

    pub fn peek_oldest(&self) -> Option<(&str, &V)> {
        self.entries
            .oldest()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    pub fn peek_newest(&self) -> Option<(&str, &V)> {
        self.entries
            .newest()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    fn touch(&mut self, key: &str) -> Option<SlotId> {
        match self.index.get(key) {
            Some(&id) => {
                self.entries.set_newest(id);
                self.stats.hits += 1;
                Some(id)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }
}

impl<V> Cache<V> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> u64 {
        self.budget.used()
    }

    /// The budget. Zero means unbounded.
    pub fn max_bytes(&self) -> u64 {
        self.budget.max()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Entries from least to most recently used. Iterating does not change recency.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &V)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }
}

/// Mutable access to a cached value, returned by [`Cache::get_mut`].
///
/// Dropping it charges any change in the value's size and restores the budget.
pub struct ValueMut<'a, V: ByteLen> {
    cache: &'a mut Cache<V>,
    id: SlotId,
}

impl<V: ByteLen> Deref for ValueMut<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self
            .cache
            .entries
            .get(self.id)
            .expect("guarded entry should stay cached")
            .value
    }
}

impl<V: ByteLen> DerefMut for ValueMut<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self
            .cache
            .entries
            .get_mut(self.id)
            .expect("guarded entry should stay cached")
            .value
    }
}

impl<V: ByteLen> Drop for ValueMut<'_, V> {
    fn drop(&mut self) {
        self.cache.recharge(self.id);
        self.cache.evict_to_budget();
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("max_bytes", &self.budget.max())
            .field("used_bytes", &self.budget.used())
            .field("len", &self.entries.len())
            .field("has_on_evicted", &self.on_evicted.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}
