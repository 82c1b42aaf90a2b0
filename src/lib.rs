//! symtable: a string-keyed symbol table with two interchangeable
//! backends, built for embedding wherever a program needs fast,
//! ownership-safe key/value storage (interpreter symbol tables,
//! interning sidecars, small registries).
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a mapping from unique text keys to opaque caller-owned
//!   values with insertion, lookup, in-place replacement, removal,
//!   length query, and full traversal.
//! - Layers:
//!   - hash: the rolling 65599 hash and the prime bucket tier table.
//!   - ChainedMap<V>: the real backend, a separately chained hash table
//!     whose bindings live in a slot arena; buckets hold chain heads and
//!     chains are threaded through the arena via `next` links.
//!   - ListMap<V>: a single-chain reference backend with the same
//!     contract and O(n) scans; no hashing, no growth.
//!
//! Constraints
//! - Keys are text, compared byte-exactly; each insert stores an owned
//!   copy, so the caller's buffer is free to go away after the call.
//! - Values are opaque: never hashed, compared, or cloned. The map hands
//!   them back by move on `remove`/`replace`; a failed `insert` or
//!   `replace` returns the supplied value to the caller rather than
//!   dropping it.
//! - Duplicate keys are rejected; at most one live binding per key.
//! - Single-threaded: no internal locking, ordinary `&`/`&mut`
//!   discipline applies when sharing across threads.
//!
//! Growth
//! - After each successful insert, once the binding count exceeds the
//!   bucket count the table moves to the next tier (primes from 509 up
//!   to 65521, roughly doubling) and re-homes every binding by
//!   recomputing its bucket against the new count. Growth is
//!   best-effort: if the new bucket array cannot be allocated the table
//!   keeps running at its current tier and the insert still succeeds.
//!   At the final tier growth stops for good and chains simply lengthen.
//!
//! Notes and non-goals
//! - Traversal order is bucket order, then chain head to tail; it is a
//!   property of the current snapshot and reshuffles across growth.
//! - No serialization, persistence, or concurrency layer.
//! - No arbitrary key types; this is deliberately not a general-purpose
//!   hash map.

pub mod chained_map;
mod chained_map_proptest;
mod hash;
pub mod list_map;

// Public surface
pub use chained_map::{ChainedMap, InsertError};
pub use list_map::ListMap;
