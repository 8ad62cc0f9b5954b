//! LRU Recency List Module
//!
//! Implements the recency ordering used for LRU eviction.

use crate::cache::entry::{EntryStore, SlotId};

// == Recency List ==
/// Doubly-linked ordering over the entries of an [`EntryStore`].
///
/// The list owns nothing; it only remembers both ends and rewires the
/// `more_recent` / `less_recent` links stored on the entries themselves.
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug, Default)]
pub struct RecencyList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    // == Push Front ==
    /// Links an unlinked entry in as the most recently used.
    pub fn push_front<K, V>(&mut self, entries: &mut EntryStore<K, V>, id: SlotId) {
        let old_head = self.head;
        match entries.get_mut(id) {
            Some(entry) => {
                entry.more_recent = None;
                entry.less_recent = old_head;
            }
            None => return,
        }

        if let Some(head) = old_head.and_then(|h| entries.get_mut(h)) {
            head.more_recent = Some(id);
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
    }

    // == Unlink ==
    /// Detaches a linked entry, joining its neighbours together.
    ///
    /// The entry must currently be a member of this list.
    pub fn unlink<K, V>(&mut self, entries: &mut EntryStore<K, V>, id: SlotId) {
        let (more, less) = match entries.get_mut(id) {
            Some(entry) => (entry.more_recent.take(), entry.less_recent.take()),
            None => return,
        };

        match more.and_then(|m| entries.get_mut(m)) {
            Some(neighbour) => neighbour.less_recent = less,
            None => self.head = less,
        }
        match less.and_then(|l| entries.get_mut(l)) {
            Some(neighbour) => neighbour.more_recent = more,
            None => self.tail = more,
        }
    }

    // == Move To Front ==
    /// Promotes a linked entry to most recently used.
    pub fn move_to_front<K, V>(&mut self, entries: &mut EntryStore<K, V>, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.unlink(entries, id);
        self.push_front(entries, id);
    }

    // == Pop Back ==
    /// Unlinks and returns the least recently used slot.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back<K, V>(&mut self, entries: &mut EntryStore<K, V>) -> Option<SlotId> {
        let tail = self.tail?;
        self.unlink(entries, tail);
        Some(tail)
    }

    /// The most recently used slot.
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// The least recently used slot.
    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    // == Clear ==
    /// Forgets both ends. Entries are released by the store.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
    }

    // == Iter ==
    /// Walks from most to least recent.
    ///
    /// The walk is capped at the store's live count, so a corrupted
    /// list can never loop forever.
    pub fn iter<'a, K, V>(&self, entries: &'a EntryStore<K, V>) -> Iter<'a, K, V> {
        Iter {
            entries,
            next: self.head,
            remaining: entries.len(),
        }
    }
}

// == Iterator ==
/// Iterator over slot ids in recency order, see [`RecencyList::iter`].
pub struct Iter<'a, K, V> {
    entries: &'a EntryStore<K, V>,
    next: Option<SlotId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = SlotId;

    fn next(&mut self) -> Option<SlotId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        self.remaining -= 1;
        self.next = self.entries.get(id).and_then(|e| e.less_recent);
        Some(id)
    }
}
