//! Concurrency primitives for Quarry
//!
//! This crate provides the sharded concurrent map used by the parallel
//! query path to accumulate per-document relevance without a global lock.
//!
//! The map partitions its key space into a fixed number of shards, each
//! guarded by an independent mutex. Writers touching keys in different
//! shards never contend; writers on the same shard serialize. No operation
//! ever holds more than one shard lock, so lock-ordering deadlocks are
//! impossible by construction.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded_map;

pub use sharded_map::{EntryGuard, ShardKey, ShardedMap};
