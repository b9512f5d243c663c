use std::collections::{BTreeMap, HashMap};

use constants::node::MAX_AGE_LOOKUP_ANCHOR;
use jam_types::{HeaderHash, TimeSlot};

/// Header-chain oracle: answers whether a header belongs to the chain being extended.
pub trait HeaderChain {
    fn is_in_chain(&self, header_hash: &HeaderHash) -> bool;
}

impl<F: Fn(&HeaderHash) -> bool> HeaderChain for F {
    fn is_in_chain(&self, header_hash: &HeaderHash) -> bool {
        self(header_hash)
    }
}

/// The headers imported within the last MAX_AGE_LOOKUP_ANCHOR slots, which is as far back as a
/// lookup anchor may reach.
#[derive(Debug, Clone, Default)]
pub struct Ancestors {
    by_slot: BTreeMap<TimeSlot, HeaderHash>,
    by_hash: HashMap<HeaderHash, TimeSlot>,
}

impl Ancestors {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, slot: TimeSlot, header_hash: HeaderHash) {

        log::debug!("Update ancestors. slot: {:?} hash: {}", slot, hex::encode(header_hash));

        if let Some(replaced) = self.by_slot.insert(slot, header_hash) {
            self.forget(slot, &replaced);
        }
        let latest = self.by_hash.entry(header_hash).or_insert(slot);
        *latest = (*latest).max(slot);

        while self.by_slot.len() > MAX_AGE_LOOKUP_ANCHOR as usize {
            if let Some((evicted, oldest)) = self.by_slot.pop_first() {
                self.forget(evicted, &oldest);
            }
        }
    }

    // A hash recorded again at a later slot stays known until that slot leaves the window.
    fn forget(&mut self, slot: TimeSlot, header_hash: &HeaderHash) {
        if self.by_hash.get(header_hash) == Some(&slot) {
            self.by_hash.remove(header_hash);
        }
    }

    pub fn lookup(&self, slot: &TimeSlot, header_hash: &HeaderHash) -> bool {
        self.by_slot.get(slot).map_or(false, |hash| hash == header_hash)
    }

    pub fn len(&self) -> usize {
        self.by_slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }
}

impl HeaderChain for Ancestors {
    fn is_in_chain(&self, header_hash: &HeaderHash) -> bool {
        self.by_hash.contains_key(header_hash)
    }
}
