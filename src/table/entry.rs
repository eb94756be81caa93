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

//! Chain nodes for the table's buckets.

use std::{fmt, iter};

/// One key/value pair in a bucket's chain.
///
/// The bucket slot owns the head of its chain and every node owns its
/// successor, so a chain is a strictly linear, acyclic sequence. Keys within
/// one chain are always distinct.
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: Option<Box<Entry<V>>>,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            next: None,
        }
    }

    /// Iterates over this node and its successors in chain order.
    pub(crate) fn chain(&self) -> impl Iterator<Item = &Entry<V>> {
        iter::successors(Some(self), |node| node.next.as_deref())
    }
}

impl<V: fmt::Debug> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("next_key", &self.next.as_ref().map(|next| next.key.as_str()))
            .finish()
    }
}

impl<V: fmt::Display> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: {}}}", self.key, self.value)
    }
}
