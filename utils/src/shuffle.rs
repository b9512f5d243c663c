use sp_core::blake2_256;

use jam_types::Hash;
use codec::EncodeSize;

// Fisher-Yates shuffle driven by a numeric sequence: at each step the element at r[i] mod remaining
// is taken and the last element is swapped into its place.
fn fisher_yates_shuffle<T: Clone>(s: &[T], r: &[u32]) -> Vec<T> {

    let mut remaining = s.to_vec();
    let mut result = Vec::with_capacity(s.len());

    for random in r.iter() {
        if remaining.is_empty() {
            break;
        }
        let index = *random as usize % remaining.len();
        result.push(remaining.swap_remove(index));
    }

    return result;
}

// Shuffles a sequence from a 32-byte seed instead of a numeric sequence.
pub fn shuffle<T: Clone>(s: &[T], hash: &Hash) -> Vec<T> {

    fisher_yates_shuffle(s, &sequencer(hash, s.len()))
}

// Numeric sequence from a hash: every 8 items a new blake2 hash of the entropy and the block counter is
// taken, and each item reads 4 little-endian bytes of it.
fn sequencer(entropy: &Hash, len: usize) -> Vec<u32> {

    let mut sequence: Vec<u32> = Vec::with_capacity(len);
    let mut hash = [0u8; 32];

    for i in 0..len {

        if i % 8 == 0 {
            let mut payload = Vec::from(&entropy[..]);
            payload.extend_from_slice(&(i / 8).encode_size(4));
            hash = blake2_256(&payload);
        }

        let start = (4 * i) % 32;
        sequence.push(u32::from_le_bytes([hash[start], hash[start + 1], hash[start + 2], hash[start + 3]]));
    }

    return sequence;
}
