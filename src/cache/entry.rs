//! Cache Entry Module
//!
//! Defines individual cache entries and the slot arena that owns them.

// == Slot Index ==
/// Position of an entry inside the [`EntryStore`] arena.
pub type SlotId = usize;

// == Cache Entry ==
/// A single cached key/value pair plus its recency links.
///
/// The links are slot ids into the owning [`EntryStore`], never pointers.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Neighbour closer to the most-recent end, None at the head
    pub more_recent: Option<SlotId>,
    /// Neighbour closer to the least-recent end, None at the tail
    pub less_recent: Option<SlotId>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            more_recent: None,
            less_recent: None,
        }
    }
}

// == Entry Store ==
/// Arena owning every live entry.
///
/// Freed slots are recycled, so eviction is slot reuse rather than
/// deallocation of a node.
#[derive(Debug)]
pub struct EntryStore<K, V> {
    slots: Vec<Option<CacheEntry<K, V>>>,
    free: Vec<SlotId>,
    live: usize,
}

impl<K, V> EntryStore<K, V> {
    // == Constructor ==
    /// Creates an arena with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    // == Insert ==
    /// Stores an entry and returns the slot it landed in.
    pub fn insert(&mut self, entry: CacheEntry<K, V>) -> SlotId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(entry);
                id
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    // == Remove ==
    /// Takes the entry out of its slot and marks the slot reusable.
    pub fn remove(&mut self, id: SlotId) -> Option<CacheEntry<K, V>> {
        let entry = self.slots.get_mut(id)?.take()?;
        self.free.push(id);
        self.live -= 1;
        Some(entry)
    }

    pub fn get(&self, id: SlotId) -> Option<&CacheEntry<K, V>> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut CacheEntry<K, V>> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    // == Clear ==
    /// Drops every entry and forgets all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
