//! Bucket containers for separate chaining.
//!
//! A [`HashTable`](crate::HashTable) keeps one bucket per slot of its bucket
//! array. A bucket is any container that can add an entry, take an entry out by
//! key, and iterate its entries; the table never relies on the order in which a
//! bucket yields them. [`Bucket`] is implemented for `Vec`, `VecDeque` and
//! `LinkedList`, and the bucket type is picked through the table's `B`
//! parameter.

use alloc::collections::LinkedList;
use alloc::collections::VecDeque;
use alloc::collections::linked_list;
use alloc::collections::vec_deque;
use alloc::vec::Vec;

use crate::entry::Entry;

/// Growable-array bucket. This is the default.
pub type VecBucket<K, V> = Vec<Entry<K, V>>;

/// Ring-buffer bucket.
pub type DequeBucket<K, V> = VecDeque<Entry<K, V>>;

/// Doubly-linked-list bucket.
pub type ListBucket<K, V> = LinkedList<Entry<K, V>>;

/// The operations a hash table needs from a bucket container.
///
/// Implementations must not deduplicate on their own: the table guarantees
/// that it only pushes an entry after taking out any entry with an equal key.
pub trait Bucket<K, V>: Default {
    /// Borrowing iterator over the entries.
    type Iter<'a>: Iterator<Item = &'a Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Mutably borrowing iterator over the entries.
    type IterMut<'a>: Iterator<Item = &'a mut Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Owning iterator over the entries.
    type IntoEntries: Iterator<Item = Entry<K, V>>;

    /// Adds an entry to the bucket.
    fn push_entry(&mut self, entry: Entry<K, V>);

    /// Removes and returns the entry stored under `key`, if any.
    fn take_entry(&mut self, key: &K) -> Option<Entry<K, V>>
    where
        K: Eq;

    /// Iterates the entries in unspecified order.
    fn entries<'a>(&'a self) -> Self::Iter<'a>
    where
        K: 'a,
        V: 'a;

    /// Iterates the entries mutably in unspecified order.
    fn entries_mut<'a>(&'a mut self) -> Self::IterMut<'a>
    where
        K: 'a,
        V: 'a;

    /// Consumes the bucket, yielding its entries.
    fn into_entries(self) -> Self::IntoEntries;

    /// Number of entries in the bucket.
    fn entry_count(&self) -> usize;

    /// Returns the entry stored under `key`, if any.
    fn find_entry<'a>(&'a self, key: &K) -> Option<&'a Entry<K, V>>
    where
        K: Eq + 'a,
        V: 'a,
    {
        self.entries().find(|entry| entry.matches(key))
    }

    /// Returns the entry stored under `key` mutably, if any.
    fn find_entry_mut<'a>(&'a mut self, key: &K) -> Option<&'a mut Entry<K, V>>
    where
        K: Eq + 'a,
        V: 'a,
    {
        self.entries_mut().find(|entry| entry.matches(key))
    }
}

impl<K, V> Bucket<K, V> for Vec<Entry<K, V>> {
    type Iter<'a>
        = core::slice::Iter<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = core::slice::IterMut<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = alloc::vec::IntoIter<Entry<K, V>>;

    #[inline]
    fn push_entry(&mut self, entry: Entry<K, V>) {
        self.push(entry);
    }

    fn take_entry(&mut self, key: &K) -> Option<Entry<K, V>>
    where
        K: Eq,
    {
        let index = self.iter().position(|entry| entry.matches(key))?;
        Some(self.swap_remove(index))
    }

    fn entries<'a>(&'a self) -> Self::Iter<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn entries_mut<'a>(&'a mut self) -> Self::IterMut<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.iter_mut()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl<K, V> Bucket<K, V> for VecDeque<Entry<K, V>> {
    type Iter<'a>
        = vec_deque::Iter<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = vec_deque::IterMut<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = vec_deque::IntoIter<Entry<K, V>>;

    #[inline]
    fn push_entry(&mut self, entry: Entry<K, V>) {
        self.push_back(entry);
    }

    fn take_entry(&mut self, key: &K) -> Option<Entry<K, V>>
    where
        K: Eq,
    {
        let index = self.iter().position(|entry| entry.matches(key))?;
        self.remove(index)
    }

    fn entries<'a>(&'a self) -> Self::Iter<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn entries_mut<'a>(&'a mut self) -> Self::IterMut<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.iter_mut()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}

impl<K, V> Bucket<K, V> for LinkedList<Entry<K, V>> {
    type Iter<'a>
        = linked_list::Iter<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = linked_list::IterMut<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = linked_list::IntoIter<Entry<K, V>>;

    #[inline]
    fn push_entry(&mut self, entry: Entry<K, V>) {
        self.push_back(entry);
    }

    fn take_entry(&mut self, key: &K) -> Option<Entry<K, V>>
    where
        K: Eq,
    {
        let index = self.iter().position(|entry| entry.matches(key))?;
        let mut tail = self.split_off(index);
        let entry = tail.pop_front();
        self.append(&mut tail);
        entry
    }

    fn entries<'a>(&'a self) -> Self::Iter<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn entries_mut<'a>(&'a mut self) -> Self::IterMut<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.iter_mut()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}
