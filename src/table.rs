// MIT License
//
// Copyright (c) 2019 Gregory Meyer
//
// Permission is hereby granted, free of charge, to any person
// obtaining a copy of this software and associated documentation files
// (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of the Software,
// and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
// BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
// ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! A hash table with string keys, implemented with separate chaining and
//! doubling-based resizing.

mod entry;


use std::{fmt, iter, mem};

use log::{debug, warn};
use thiserror::Error;

use entry::Entry;

/// Error returned when constructing a table with no buckets.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("capacity must be at least 1 bucket, got {0}")]
pub struct CapacityError(pub usize);

/// A hash table mapping string keys to values, resolving collisions by
/// separate chaining.
///
/// Each bucket holds an optional chain of key/value nodes; a key's bucket is
/// chosen by reducing a [DJB2] hash of its bytes modulo the bucket count.
/// Within a bucket, lookups walk the chain front to back and insertions of new
/// keys append at the tail.
///
/// The table doubles its bucket count when an insertion finds every bucket
/// occupied by at least one chain. Note that this counts occupied buckets, not
/// stored pairs: a single long chain never triggers growth on its own. The
/// bucket count never shrinks.
///
/// A missing key is a normal outcome, not an error. [`retrieve`] and
/// [`remove`] report misses as [`None`] and emit a log diagnostic rather than
/// failing.
///
/// `HashTable` provides no internal synchronization; it is intended for
/// single-threaded use under the usual `&mut` exclusivity.
///
/// [DJB2]: http://www.cse.yorku.ca/~oz/hash.html
/// [`retrieve`]: #method.retrieve
/// [`remove`]: #method.remove
#[derive(Debug)]
pub struct HashTable<V> {
    storage: Vec<Option<Box<Entry<V>>>>,
    len: usize,
}

impl<V> HashTable<V> {
    /// Creates a table with `capacity` empty buckets.
    ///
    /// Returns a [`CapacityError`] if `capacity` is zero; a table must always
    /// have at least one bucket to index into.
    pub fn with_capacity(capacity: usize) -> Result<HashTable<V>, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError(capacity));
        }

        Ok(HashTable {
            storage: iter::repeat_with(|| None).take(capacity).collect(),
            len: 0,
        })
    }

    /// Returns the number of key/value pairs in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Inserts `value` under `key`, returning the previously stored value if
    /// the key was already present.
    ///
    /// If every bucket already holds a chain at the time of the call, the
    /// table doubles its capacity before the pair is placed, moving existing
    /// pairs to their new buckets. A new key lands at the tail of its bucket's
    /// chain; an existing key has its value overwritten in place, silently.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        if self.storage.iter().all(Option::is_some) {
            self.resize();
        }

        let index = self.bucket_index(key);
        let mut cursor = &mut self.storage[index];

        while let Some(node) = cursor {
            if node.key == key {
                return Some(mem::replace(&mut node.value, value));
            }

            cursor = &mut node.next;
        }

        *cursor = Some(Box::new(Entry::new(key.to_owned(), value)));
        self.len += 1;

        None
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// A miss logs a diagnostic and returns [`None`] without mutating the
    /// table.
    pub fn retrieve(&self, key: &str) -> Option<&V> {
        let index = self.bucket_index(key);
        let mut cursor = self.storage[index].as_deref();

        while let Some(node) = cursor {
            if node.key == key {
                return Some(&node.value);
            }

            cursor = node.next.as_deref();
        }

        debug!("table[{:?}] is undefined", key);

        None
    }

    /// Removes the pair stored under `key`, returning its value.
    ///
    /// The target node is unlinked whether it is the sole node of its bucket,
    /// the head of a longer chain, or an interior or tail node; the rest of
    /// the chain is preserved. A miss logs a diagnostic and returns [`None`]
    /// without mutating the table.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let mut cursor = &mut self.storage[index];

        loop {
            match cursor {
                Some(node) if node.key == key => {
                    let mut removed = cursor.take();
                    *cursor = removed.as_mut().and_then(|node| node.next.take());
                    self.len -= 1;

                    return removed.map(|node| node.value);
                }
                Some(node) => cursor = &mut node.next,
                None => {
                    warn!("table[{:?}] cannot be removed: it does not exist", key);

                    return None;
                }
            }
        }
    }

    /// Doubles the bucket count and rehashes every pair.
    ///
    /// Existing nodes are relinked into the fresh buckets in old-bucket order,
    /// then chain order, each appended at the tail of its new chain. Relinking
    /// bypasses the load check in [`insert`], so a resize cannot trigger
    /// another.
    ///
    /// [`insert`]: #method.insert
    pub fn resize(&mut self) {
        let new_capacity = self.storage.len() * 2;
        let old_storage = mem::replace(
            &mut self.storage,
            iter::repeat_with(|| None).take(new_capacity).collect(),
        );

        for mut head in old_storage {
            while let Some(mut node) = head {
                head = node.next.take();

                let index = self.bucket_index(&node.key);
                Self::link_at_tail(&mut self.storage[index], node);
            }
        }
    }

    /// Maps `key` to a bucket index under the current capacity.
    fn bucket_index(&self, key: &str) -> usize {
        (hash(key) % self.storage.len() as u64) as usize
    }

    /// Appends `node` at the tail of the chain rooted in `slot`.
    fn link_at_tail(slot: &mut Option<Box<Entry<V>>>, node: Box<Entry<V>>) {
        let mut cursor = slot;

        while let Some(tail) = cursor {
            cursor = &mut tail.next;
        }

        *cursor = Some(node);
    }
}

impl<V: fmt::Display> fmt::Display for HashTable<V> {
    /// Renders one line per bucket: the bucket index, then either an empty
    /// marker or the bucket's chain in order. The format is a debugging aid,
    /// not a stable interface.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.storage.iter().enumerate() {
            write!(f, "{}:", index)?;

            match slot {
                Some(head) => {
                    for node in head.chain() {
                        write!(f, " {}", node)?;
                    }
                }
                None => write!(f, " <empty>")?,
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

/// DJB2 over the key's bytes: the accumulator starts at 5381 and each byte
/// folds in as `acc = acc * 33 + byte`, with wrapping arithmetic.
fn hash(key: &str) -> u64 {
    key.bytes().fold(5381, |acc: u64, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}
