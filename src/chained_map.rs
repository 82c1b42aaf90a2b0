//! ChainedMap: separately chained hash table with tiered, best-effort growth.

use crate::hash::{bucket_index, BUCKET_TIERS};
use core::fmt;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

/// One key/value binding, threaded into its bucket's chain via `next`.
#[derive(Debug)]
struct Binding<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

/// Error returned by a failed insert.
///
/// Carries the rejected value back so the caller keeps ownership when
/// the key is already bound; the map is left exactly as it was.
pub enum InsertError<V> {
    DuplicateKey(V),
}

impl<V> InsertError<V> {
    /// Recover the value that was not inserted.
    pub fn into_value(self) -> V {
        match self {
            InsertError::DuplicateKey(value) => value,
        }
    }
}

impl<V> fmt::Debug for InsertError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey(_) => f.write_str("DuplicateKey"),
        }
    }
}

impl<V> fmt::Display for InsertError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey(_) => f.write_str("key is already bound"),
        }
    }
}

impl<V> std::error::Error for InsertError<V> {}

/// A mapping from unique string keys to caller-owned values, backed by a
/// hash table with separate chaining.
///
/// Keys are copied into owned storage on insert, so the caller's buffer
/// may be reused or freed as soon as the call returns. Values are opaque:
/// the map never hashes, compares, or clones them, and hands them back by
/// move on `remove`/`replace`.
///
/// Bindings live in a slot arena; each bucket holds the head of a singly
/// linked chain threaded through the arena, so chains are acyclic and
/// ownership stays tree-shaped. Once the binding count exceeds the bucket
/// count the table moves to the next bucket tier and re-homes every
/// binding (see [`ChainedMap::bucket_count`]).
pub struct ChainedMap<V> {
    nodes: SlotMap<DefaultKey, Binding<V>>,
    heads: Vec<Option<DefaultKey>>,
    tier: usize,
}

impl<V> ChainedMap<V> {
    /// Create an empty map at the smallest bucket tier.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            heads: vec![None; BUCKET_TIERS[0]],
            tier: 0,
        }
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current bucket count. Starts at the smallest tier and moves up the
    /// tier table as the map fills; observable so embedders and tests can
    /// see tier crossings.
    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// Walk one bucket's chain looking for `key`.
    fn find_in_chain(&self, bucket: usize, key: &str) -> Option<DefaultKey> {
        let mut cur = self.heads[bucket];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find_in_chain(bucket_index(key, self.heads.len()), key)
            .is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let k = self.find_in_chain(bucket_index(key, self.heads.len()), key)?;
        Some(&self.nodes[k].value)
    }

    /// Insert a new binding, copying `key` into owned storage.
    ///
    /// A duplicate key leaves the map unmodified and returns the value in
    /// [`InsertError::DuplicateKey`]. On success the binding is linked at
    /// the head of its bucket's chain, so the most recent insert in a
    /// bucket is found first; the growth policy then runs.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), InsertError<V>> {
        let bucket = bucket_index(key, self.heads.len());
        if self.find_in_chain(bucket, key).is_some() {
            return Err(InsertError::DuplicateKey(value));
        }
        let k = self.nodes.insert(Binding {
            key: key.to_owned(),
            value,
            next: self.heads[bucket],
        });
        self.heads[bucket] = Some(k);
        if self.nodes.len() > self.heads.len() {
            self.grow();
        }
        Ok(())
    }

    /// Swap the value stored under `key`, returning the previous one.
    ///
    /// When the key is absent the map is untouched and the supplied value
    /// rides back in `Err`. The stored key and chain structure are never
    /// altered.
    pub fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
        match self.find_in_chain(bucket_index(key, self.heads.len()), key) {
            Some(k) => Ok(mem::replace(&mut self.nodes[k].value, value)),
            None => Err(value),
        }
    }

    /// Unlink the binding for `key` and return its value to the caller.
    ///
    /// Absent keys return `None` with no state change.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let bucket = bucket_index(key, self.heads.len());
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.heads[bucket];
        while let Some(k) = cur {
            if self.nodes[k].key == key {
                let next = self.nodes[k].next;
                match prev {
                    None => self.heads[bucket] = next,
                    Some(p) => self.nodes[p].next = next,
                }
                let node = self
                    .nodes
                    .remove(k)
                    .expect("linked node must be live in the arena");
                return Some(node.value);
            }
            prev = cur;
            cur = self.nodes[k].next;
        }
        None
    }

    /// Move to the next bucket tier and re-home every binding.
    ///
    /// Best-effort: if the new bucket array cannot be allocated the map
    /// keeps serving at its current tier and the triggering insert never
    /// sees the failure. Nodes are reused in the arena; only chain links
    /// and bucket residency change. At the final tier this is a no-op and
    /// chains may exceed a load factor of one.
    fn grow(&mut self) {
        let next_tier = self.tier + 1;
        let Some(&new_count) = BUCKET_TIERS.get(next_tier) else {
            return;
        };
        let mut new_heads: Vec<Option<DefaultKey>> = Vec::new();
        if new_heads.try_reserve_exact(new_count).is_err() {
            return;
        }
        new_heads.resize(new_count, None);

        let old_heads = mem::replace(&mut self.heads, new_heads);
        self.tier = next_tier;
        for head in old_heads {
            let mut cur = head;
            while let Some(k) = cur {
                // Detach before relinking so no node sits on two chains.
                let next = self.nodes[k].next.take();
                let bucket = bucket_index(&self.nodes[k].key, new_count);
                self.nodes[k].next = self.heads[bucket];
                self.heads[bucket] = Some(k);
                cur = next;
            }
        }
    }

    /// Iterate over `(key, value)` pairs in bucket-index order, each
    /// chain head to tail (most recently inserted within a bucket first).
    /// The order is a property of the current snapshot only; growth
    /// reshuffles it.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            bucket: 0,
            cur: None,
        }
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a [`ChainedMap`]'s bindings in bucket-then-chain order.
pub struct Iter<'a, V> {
    map: &'a ChainedMap<V>,
    bucket: usize,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let node = &self.map.nodes[k];
                self.cur = node.next;
                return Some((node.key.as_str(), &node.value));
            }
            if self.bucket == self.map.heads.len() {
                return None;
            }
            self.cur = self.map.heads[self.bucket];
            self.bucket += 1;
        }
    }
}
