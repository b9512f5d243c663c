/*
    We retain in state information on the most recent RECENT_HISTORY_SIZE blocks. This is used to preclude the
    possibility of duplicate or out of date work-reports from being submitted.

    For each recent block, we retain its header hash, its state root, its accumulation-result mmr and the corresponding
    work-package hashes of each item reported (which is no more than the total number of cores).
*/

use constants::node::RECENT_HISTORY_SIZE;
use jam_types::{AccumulateRoot, BlockInfo, HeaderHash, Mmr, RecentBlocks, ReportedPackage, StateRoot, StateUpdate, Transition};
use utils::mmr::append_keccak;

pub fn process(
    recent_history: &RecentBlocks,
    header_hash: &HeaderHash,
    parent_state_root: &StateRoot,
    accumulation_root: &AccumulateRoot,
    reported: &[ReportedPackage],
) -> Transition<()> {

    log::debug!("Processing recent history for block 0x{}", utils::print_hash!(header_hash));

    let mut post_history = recent_history.clone();

    // The state root of the parent block is only known once its successor arrives, so the last entry is
    // corrected here
    if let Some(last) = post_history.history.back_mut() {
        last.state_root = *parent_state_root;
    }

    let mmr = last_mmr(&post_history);

    post_history.history.push_back(BlockInfo {
        header_hash: *header_hash,
        mmr: append_keccak(&mmr, *accumulation_root),
        // Filled in by the next block
        state_root: StateRoot::default(),
        reported: reported.to_vec(),
    });

    while post_history.history.len() > RECENT_HISTORY_SIZE {
        post_history.history.pop_front();
    }

    Transition { output: (), update: StateUpdate { recent_history: Some(post_history), ..Default::default() } }
}

/// The most recent accumulation mmr, empty before the first block.
pub fn last_mmr(recent_history: &RecentBlocks) -> Mmr {
    recent_history.history.back().map(|last| last.mmr.clone()).unwrap_or_default()
}
