//! Append-only persistent list used for move and capture history.
//!
//! Each successor `GameState` shares every earlier entry with its
//! predecessor; pushing allocates one node and never copies the list.

use std::fmt;
use std::sync::Arc;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

struct Node<T> {
    item: T,
    prev: Option<Arc<Node<T>>>,
}

pub struct History<T> {
    head: Option<Arc<Node<T>>>,
    len: usize,
}

impl<T> History<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// A new history with `item` appended. `self` is left untouched.
    #[must_use]
    pub fn push(&self, item: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                item,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.item)
    }

    /// Entries from the most recent back to the first.
    pub fn iter_newest_first(&self) -> NewestFirst<'_, T> {
        NewestFirst {
            next: self.head.as_deref(),
        }
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut items: Vec<&T> = self.iter_newest_first().collect();
        items.reverse();
        items.into_iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

pub struct NewestFirst<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for NewestFirst<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.prev.as_deref();
            &node.item
        })
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for History<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

// Unlinks uniquely owned nodes one at a time so long games never recurse.
impl<T> Drop for History<T> {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(node) = cursor {
            match Arc::try_unwrap(node) {
                Ok(mut owned) => cursor = owned.prev.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: PartialEq> PartialEq for History<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter_newest_first().eq(other.iter_newest_first())
    }
}

impl<T: Eq> Eq for History<T> {}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for History<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(History::new(), |history, item| history.push(item))
    }
}

impl<T: Serialize> Serialize for History<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for History<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().collect())
    }
}
