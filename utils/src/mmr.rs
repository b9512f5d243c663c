use sp_core::keccak_256;

use jam_types::{Hash, Mmr, MmrPeak};

// Merkle Mountain Range over keccak. Peaks are stored from the smallest mountain up; an empty slot means
// there is no mountain of that height.

pub fn append(mmr: &Mmr, leaf: Hash, hasher: fn(&[u8]) -> [u8; 32]) -> Mmr {
    let mut peaks = mmr.peaks.clone();
    replace_peak(&mut peaks, 0, leaf, hasher);
    Mmr { peaks }
}

fn replace_peak(peaks: &mut Vec<MmrPeak>, n: usize, data: Hash, hasher: fn(&[u8]) -> [u8; 32]) {

    if n >= peaks.len() {
        peaks.push(Some(data));
        return;
    }

    match peaks[n].take() {
        None => peaks[n] = Some(data),
        Some(peak) => {
            let merged = hasher(&[&peak[..], &data[..]].concat());
            replace_peak(peaks, n + 1, merged, hasher);
        }
    }
}

/// Commitment to the whole range, the value work-report contexts carry as their beefy root.
pub fn super_peak(mmr: &Mmr) -> Hash {
    let peaks: Vec<Hash> = mmr.peaks.iter().flatten().copied().collect();
    bag(&peaks)
}

fn bag(peaks: &[Hash]) -> Hash {

    match peaks {
        [] => [0u8; 32],
        [single] => *single,
        [init @ .., last] => keccak_256(&[&b"peak"[..], &bag(init)[..], &last[..]].concat()),
    }
}

/// Appends with the keccak hasher used for the recent history.
pub fn append_keccak(mmr: &Mmr, leaf: Hash) -> Mmr {
    append(mmr, leaf, keccak_256)
}
