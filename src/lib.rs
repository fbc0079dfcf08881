//! chained-containers: small resizable in-memory containers, centred on a
//! string-keyed hash map with separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a chained hash map whose resize policy is explicit and whose
//!   bucket assignments are fully deterministic, plus the plain containers
//!   it is built from or sits beside.
//! - Layers:
//!   - `fnv`: 32-bit FNV-1a digest over UTF-16 code units, reduced modulo
//!     the bucket count.
//!   - `LinkedList<T>`: doubly linked list with nodes in a `SlotMap` arena;
//!     links are generational keys, not pointers.
//!   - `Bucket<V>`: one slot's collision chain, a `LinkedList` of `Pair`s.
//!   - `ChainedHashMap<V>`: owns the bucket array and length, applies the
//!     `ResizePolicy`, migrates pairs on grow/shrink.
//!   - `Vector<T>`, `Deque<T>`, `Bitset`: standalone containers sharing the
//!     error type and (`Vector`/`Deque`) the `GrowthPolicy`.
//!
//! Constraints
//! - Single-threaded; callers needing shared mutation wrap the map
//!   themselves. All operations run to completion.
//! - Keys are text and immutable once stored.
//! - No iteration-order guarantee across buckets.
//!
//! Resize policy
//! - Grow (bucket count times `growth_factor`) right after a fresh insert
//!   when `len / cap > load_factor` or the receiving bucket holds more than
//!   `bucket_capacity` pairs.
//! - Shrink (bucket count divided by `growth_factor`) right after a remove
//!   when `cap > shrink_min_capacity` and `len / cap < shrink_factor`.
//! - At most one migration per call. Overwriting an existing key never
//!   resizes. `clear` reallocates at the initial capacity.
//!
//! Migration invariants
//! - The old bucket array is consumed by value; each pair is moved into the
//!   bucket its digest names under the new capacity, so a pair can be
//!   neither dropped nor duplicated. Debug builds re-verify uniqueness,
//!   placement and the length count after every migration.
//!
//! Errors
//! - Missing keys are `None`, never errors. `ContainerError` covers
//!   positional access out of range, zero-sized bitsets and invalid
//!   policies.
//!
//! Logging
//! - Migrations log at `debug`, clears and array reallocation at `trace`,
//!   through the `log` facade. No logger is installed here.

mod bucket;
pub mod bitset;
pub mod chained_hash_map;
pub mod deque;
pub mod error;
pub mod fnv;
pub mod linked_list;
mod map_proptest;
pub mod policy;
pub mod vector;

// Public surface
pub use bitset::Bitset;
pub use bucket::Pair;
pub use chained_hash_map::ChainedHashMap;
pub use deque::Deque;
pub use error::{ContainerError, Result};
pub use linked_list::LinkedList;
pub use policy::{GrowthPolicy, ResizePolicy};
pub use vector::Vector;
