//! Sharded concurrent map
//!
//! This module provides:
//! - ShardedMap: a key/value map split across independently locked shards
//! - EntryGuard: RAII access to one value while its shard lock is held
//! - ShardKey: shard selection for integer key types
//!
//! # Locking Contract
//!
//! Every operation locks at most one shard at a time. `entry` and `remove`
//! lock only the shard owning the key; `snapshot` visits shards one after
//! another and releases each lock before taking the next. Critical sections
//! cover a single map lookup or insert, nothing longer.

use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

// ============================================================================
// ShardKey
// ============================================================================

/// Shard selection for map keys
///
/// Implemented for the integer key types. Selection reduces the key through
/// `u64` before taking the modulus, so negative keys land in a valid shard
/// instead of corrupting the index.
pub trait ShardKey: Copy + Eq + Hash {
    /// Index of the shard owning this key, in `0..shard_count`
    fn shard_index(self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ShardKey for $ty {
                #[inline]
                fn shard_index(self, shard_count: usize) -> usize {
                    (self as u64 % shard_count as u64) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i32, i64, u32, u64, usize);

// ============================================================================
// ShardedMap
// ============================================================================

/// A map partitioned into independently locked shards
///
/// Keys are routed to shards by [`ShardKey::shard_index`]; each shard owns
/// a private `FxHashMap` behind its own `parking_lot::Mutex`. The shard
/// count is fixed at construction.
///
/// # Thread Safety
///
/// Shared references can be used from many threads at once. Operations on
/// keys in different shards proceed fully concurrently; operations on the
/// same shard serialize on that shard's mutex.
#[derive(Debug)]
pub struct ShardedMap<K, V> {
    shards: Vec<Mutex<FxHashMap<K, V>>>,
}

impl<K: ShardKey, V: Default> ShardedMap<K, V> {
    /// Create a map with `shard_count` shards
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn with_shards(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        let mut shards = Vec::with_capacity(shard_count);
        shards.resize_with(shard_count, || Mutex::new(FxHashMap::default()));
        ShardedMap { shards }
    }

    /// Number of shards chosen at construction
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Lock the shard owning `key` and return mutable access to its value
    ///
    /// The value is default-inserted on first access; absence is never
    /// surfaced. The shard lock is held until the returned guard drops.
    pub fn entry(&self, key: K) -> EntryGuard<'_, K, V> {
        let shard = key.shard_index(self.shards.len());
        let mut guard = self.shards[shard].lock();
        guard.entry(key).or_default();
        EntryGuard { guard, key }
    }

    /// Remove `key` from its shard, if present
    ///
    /// Locks only the owning shard. Removing an absent key is a no-op.
    pub fn remove(&self, key: K) {
        let shard = key.shard_index(self.shards.len());
        self.shards[shard].lock().remove(&key);
    }

    /// Merge all shards into one ordinary map, cloning the values
    ///
    /// Shard locks are taken one at a time and released before the next
    /// shard is visited, so a snapshot can run while writers are active
    /// (it observes each shard at a possibly different instant).
    pub fn snapshot(&self) -> FxHashMap<K, V>
    where
        V: Clone,
    {
        let mut merged = FxHashMap::default();
        for shard in &self.shards {
            let guard = shard.lock();
            merged.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    /// Consume the map and merge all shards without locking
    ///
    /// Exclusive ownership proves no other thread can touch the shards,
    /// so the mutexes are unwrapped rather than locked.
    pub fn into_map(self) -> FxHashMap<K, V> {
        let mut merged = FxHashMap::default();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }
}

// ============================================================================
// EntryGuard
// ============================================================================

/// Exclusive access to one value while its shard lock is held
///
/// Dereferences to the value. Dropping the guard releases the shard.
pub struct EntryGuard<'a, K: ShardKey, V> {
    guard: MutexGuard<'a, FxHashMap<K, V>>,
    key: K,
}

impl<K: ShardKey, V> Deref for EntryGuard<'_, K, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.guard
            .get(&self.key)
            .expect("entry vanished while its shard was locked")
    }
}

impl<K: ShardKey, V> DerefMut for EntryGuard<'_, K, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.guard
            .get_mut(&self.key)
            .expect("entry vanished while its shard was locked")
    }
}

// ============================================================================
// Tests
// ============================================================================
