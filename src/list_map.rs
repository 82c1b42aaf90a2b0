//! ListMap: singly linked list backend with the same contract as
//! `ChainedMap`, trading hashing for O(n) scans.

use crate::chained_map::InsertError;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Binding<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

/// The linked-list rendition of the symbol table: one chain, linear
/// scans, no growth policy. Useful as a reference backend and for tiny
/// tables; every operation except `len` is O(n).
pub struct ListMap<V> {
    nodes: SlotMap<DefaultKey, Binding<V>>,
    head: Option<DefaultKey>,
}

impl<V> ListMap<V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn find(&self, key: &str) -> Option<DefaultKey> {
        let mut cur = self.head;
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
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let k = self.find(key)?;
        Some(&self.nodes[k].value)
    }

    /// Insert a new binding at the head of the list, copying `key` into
    /// owned storage. Duplicate keys are rejected with the value handed
    /// back and the list unchanged.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), InsertError<V>> {
        if self.find(key).is_some() {
            return Err(InsertError::DuplicateKey(value));
        }
        let k = self.nodes.insert(Binding {
            key: key.to_owned(),
            value,
            next: self.head,
        });
        self.head = Some(k);
        Ok(())
    }

    /// Swap the value stored under `key`, returning the previous one;
    /// absent keys hand the supplied value back in `Err`.
    pub fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
        match self.find(key) {
            Some(k) => Ok(mem::replace(&mut self.nodes[k].value, value)),
            None => Err(value),
        }
    }

    /// Unlink the binding for `key` and return its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            if self.nodes[k].key == key {
                let next = self.nodes[k].next;
                match prev {
                    None => self.head = next,
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

    /// Iterate over `(key, value)` pairs head to tail, i.e. reverse
    /// insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            cur: self.head,
        }
    }
}

impl<V> Default for ListMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a [`ListMap`]'s bindings in reverse insertion order.
pub struct Iter<'a, V> {
    map: &'a ListMap<V>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let node = &self.map.nodes[k];
        self.cur = node.next;
        Some((node.key.as_str(), &node.value))
    }
}
