#[cfg(test)]
mod tests {

    use constants::{ChainSpec, ProtocolVersion};
    use jam_types::{Account, GlobalState, StateKey};
    use storage::SerializedState;
    use utils::serialization::{serialize, state_root};
    use utils::shuffle::shuffle;
    use utils::trie::{merkle_root, MerkleTrie};
    use crate::init;

    fn populated_state(spec: &ChainSpec) -> GlobalState {
        let mut state = GlobalState::genesis(spec);
        state.time = 1234;
        state.entropy.buf[0] = [0x11; 32];
        for service in 0..4u32 {
            let mut account = Account::default();
            account.info.code_hash = [service as u8; 32];
            account.info.balance = 1000 + service as u64;
            for i in 0..5u8 {
                account.storage.insert([i + service as u8 * 10; 32], vec![i; i as usize * 20]);
            }
            account.preimages.insert([0xaa; 32], vec![service as u8; 64]);
            account.lookup.insert(([0xaa; 32], 64), vec![1, 2]);
            state.service_accounts.insert(service, account);
        }
        state
    }

    #[test]
    fn root_does_not_depend_on_insertion_order() {
        init();
        let spec = ChainSpec::TINY;
        let entries = serialize(&populated_state(&spec), ProtocolVersion::Current);
        let pairs = entries.map.iter().map(|(key, value)| (*key, value.clone())).collect::<Vec<(StateKey, Vec<u8>)>>();

        let expected = merkle_root(&entries);
        assert_ne!([0u8; 32], expected);

        for seed in 0..8u8 {
            let mut trie = MerkleTrie::new();
            for (key, value) in shuffle(&pairs, &[seed; 32]) {
                trie.insert(key, value);
            }
            assert_eq!(pairs.len(), trie.len());
            assert_eq!(expected, trie.root());
        }
    }

    #[test]
    fn root_tracks_every_entry() {
        init();
        let spec = ChainSpec::TINY;
        let mut state = populated_state(&spec);
        let before = state_root(&state, ProtocolVersion::Current);

        if let Some(account) = state.service_accounts.get_mut(&2) {
            account.storage.insert([21; 32], vec![0xff]);
        }
        assert_ne!(before, state_root(&state, ProtocolVersion::Current));

        // The key layout is part of the commitment
        assert_ne!(state_root(&state, ProtocolVersion::Legacy), state_root(&state, ProtocolVersion::Current));
    }

    #[test]
    fn trie_serves_the_serialized_state() {
        init();
        let spec = ChainSpec::TINY;
        let state = populated_state(&spec);

        for version in [ProtocolVersion::Legacy, ProtocolVersion::Current] {
            let trie = MerkleTrie::from_entries(&serialize(&state, version));
            let view = SerializedState::new(&trie, spec, version);

            let rebuilt = view.to_chain_state(&[0, 1, 2, 3]).unwrap();
            assert_eq!(state.time, rebuilt.time);
            assert_eq!(state.entropy, rebuilt.entropy);
            assert_eq!(state.service_accounts[&3].info, rebuilt.service_accounts[&3].info);

            assert_eq!(Some(vec![4u8; 80]), view.storage(1, &[14; 32]).unwrap());
            assert_eq!(Some(vec![2u8; 64]), view.preimage(2, &[0xaa; 32]).unwrap());
            assert_eq!(Some(vec![1, 2]), view.lookup_history(3, &[0xaa; 32], 64).unwrap());
            assert_eq!(None, view.storage(1, &[15; 32]).unwrap());
        }
    }
}
