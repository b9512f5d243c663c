#[cfg(test)]
mod tests {

    use constants::{ChainSpec, ProtocolVersion};
    use constants::node::RECENT_HISTORY_SIZE;
    use jam_types::{Block, GlobalState, HeaderHash};
    use state_controller::{NoHooks, StateController};
    use crate::init;

    fn unknown(_: &HeaderHash) -> bool {
        false
    }

    #[test]
    fn history_is_a_bounded_fifo() {
        init();
        let spec = ChainSpec::TINY;
        let mut controller = StateController::new(GlobalState::genesis(&spec), spec, ProtocolVersion::Current);

        let mut parent = HeaderHash::default();
        let mut hashes = Vec::new();
        let mut roots = Vec::new();

        for slot in 1..=12u32 {
            let mut block = Block::default();
            block.header.slot = slot;
            block.header.parent = parent;
            block.header.parent_state_root = controller.state_root();
            roots.push(block.header.parent_state_root);

            parent = controller.apply(&block, &mut NoHooks, &unknown).unwrap().header_hash;
            hashes.push(parent);
        }

        let history = &controller.state().recent_history.history;
        assert_eq!(RECENT_HISTORY_SIZE, history.len());
        assert_eq!(hashes[4..].to_vec(), history.iter().map(|block| block.header_hash).collect::<Vec<_>>());

        // Each entry got the root its successor carried in the header, the newest one is still pending
        for (i, block) in history.iter().take(RECENT_HISTORY_SIZE - 1).enumerate() {
            assert_eq!(roots[i + 5], block.state_root);
        }
        assert_eq!([0u8; 32], history[RECENT_HISTORY_SIZE - 1].state_root);

        // Twelve leaves make mountains of four and eight
        let peaks = &history[RECENT_HISTORY_SIZE - 1].mmr.peaks;
        assert_eq!(vec![false, false, true, true], peaks.iter().map(Option::is_some).collect::<Vec<bool>>());
    }
}
