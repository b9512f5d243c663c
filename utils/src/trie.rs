use std::collections::BTreeMap;

use sp_core::blake2_256;

use jam_types::{StateEntries, StateKey, StateRoot};
use codec::Encode;

// State Merklization transforms the serialized mapping into a cryptographic commitment: the root of a binary
// Patricia Merkle Trie whose nodes are 64 bytes long. The shape of the trie only depends on the bits of the
// keys, so the same set of entries always gives the same root.

fn hash(data: &[u8]) -> [u8; 32] {
    blake2_256(data)
}

fn bit(k: &[u8], i: usize) -> bool {
    (k[i >> 3] & (1 << (7 - (i & 7)))) != 0
}

fn branch(l: &[u8; 32], r: &[u8; 32]) -> [u8; 64] {

    let mut node = [0u8; 64];
    // The first bit discriminates between branches (0) and leaves (1)
    node[0] = l[0] & 0x7f;
    // Last 255 bits of the left sub-trie identity
    node[1..32].copy_from_slice(&l[1..]);
    // Full 256 bits of the right sub-trie identity
    node[32..].copy_from_slice(r);
    node
}

fn leaf(k: &StateKey, v: &[u8]) -> [u8; 64] {

    let mut encoded = Vec::with_capacity(64);

    if v.len() <= 32 {
        // Embedded-value leaf. The low 6 bits of the head store the value size
        let head = (0b10000000 | v.len()) as u8;
        head.encode_to(&mut encoded);
        k[..31].encode_to(&mut encoded);
        v.encode_to(&mut encoded);
        encoded.resize(64, 0);
    } else {
        // Regular leaf, the value is committed through its hash
        let head = 0b11000000u8;
        head.encode_to(&mut encoded);
        k[..31].encode_to(&mut encoded);
        hash(v).encode_to(&mut encoded);
    }

    let mut node = [0u8; 64];
    node.copy_from_slice(&encoded);
    node
}

// `kvs` must be sorted by key, so each split on bit `i` is a prefix/suffix partition.
fn merkle(kvs: &[(&StateKey, &Vec<u8>)], i: usize) -> [u8; 32] {

    // Empty (sub-)tries are identified as the zero hash
    if kvs.is_empty() {
        return [0u8; 32];
    }

    if kvs.len() == 1 {
        let (k, v) = kvs[0];
        return hash(&leaf(k, v));
    }

    let split = kvs.partition_point(|(k, _)| !bit(&k[..], i));
    let (l, r) = kvs.split_at(split);

    hash(&branch(&merkle(l, i + 1), &merkle(r, i + 1)))
}

/// Binary Merkle trie keyed by 32-byte state keys. Leaves keep the full value so the trie can also serve
/// point lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MerkleTrie {
    leaves: BTreeMap<StateKey, Vec<u8>>,
}

impl MerkleTrie {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &StateEntries) -> Self {
        let mut trie = Self::new();
        for (key, value) in entries.map.iter() {
            trie.insert(*key, value.clone());
        }
        trie
    }

    /// Returns the previous value stored under the key, if any.
    pub fn insert(&mut self, key: StateKey, value: Vec<u8>) -> Option<Vec<u8>> {
        self.leaves.insert(key, value)
    }

    pub fn remove(&mut self, key: &StateKey) -> Option<Vec<u8>> {
        self.leaves.remove(key)
    }

    pub fn get(&self, key: &StateKey) -> Option<&Vec<u8>> {
        self.leaves.get(key)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn root(&self) -> StateRoot {
        let kvs: Vec<(&StateKey, &Vec<u8>)> = self.leaves.iter().collect();
        merkle(&kvs, 0)
    }
}

/// Root of the trie holding exactly `entries`.
pub fn merkle_root(entries: &StateEntries) -> StateRoot {
    let mut kvs: Vec<(&StateKey, &Vec<u8>)> = entries.map.iter().collect();
    kvs.sort_by(|a, b| a.0.cmp(b.0));
    merkle(&kvs, 0)
}
