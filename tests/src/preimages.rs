#[cfg(test)]
mod tests {

    use sp_core::blake2_256;

    use constants::{ChainSpec, ProtocolVersion};
    use jam_types::{Account, GlobalState, Preimage, PreimagesErrorCode, ProcessError};
    use state_controller::apply_update;
    use storage::SerializedState;
    use utils::serialization::{serialize, state_root};
    use crate::init;

    fn requesting(spec: &ChainSpec, requests: &[(u32, &[u8])]) -> GlobalState {
        let mut state = GlobalState::genesis(spec);
        for (service, blob) in requests {
            state
                .service_accounts
                .entry(*service)
                .or_insert_with(Account::default)
                .lookup
                .insert((blake2_256(blob), blob.len() as u32), Vec::new());
        }
        state
    }

    #[test]
    fn provided_preimages_are_committed() {
        init();
        let spec = ChainSpec::TINY;
        let mut state = requesting(&spec, &[(1, &b"first"[..]), (1, &b"second"[..]), (4, &b"third"[..])]);
        let before = state_root(&state, ProtocolVersion::Current);

        let preimages = vec![
            Preimage { requester: 1, blob: b"first".to_vec() },
            Preimage { requester: 1, blob: b"second".to_vec() },
            Preimage { requester: 4, blob: b"third".to_vec() },
        ];
        let transition = preimages::process(&preimages, &state.service_accounts, 9).unwrap();
        apply_update(&mut state, transition.update);

        assert_ne!(before, state_root(&state, ProtocolVersion::Current));

        let entries = serialize(&state, ProtocolVersion::Current);
        let view = SerializedState::new(&entries, spec, ProtocolVersion::Current);
        assert_eq!(Some(b"second".to_vec()), view.preimage(1, &blake2_256(b"second")).unwrap());
        assert_eq!(Some(vec![9]), view.lookup_history(4, &blake2_256(b"third"), 5).unwrap());

        // A second submission of the same data is no longer needed
        let error = preimages::process(&preimages[..1], &state.service_accounts, 10).unwrap_err();
        assert_eq!(ProcessError::PreimagesError(PreimagesErrorCode::PreimageUnneeded), error);
    }

    #[test]
    fn one_bad_item_rejects_the_extrinsic() {
        init();
        let spec = ChainSpec::TINY;
        let state = requesting(&spec, &[(1, &b"first"[..])]);

        let preimages = vec![Preimage { requester: 1, blob: b"first".to_vec() }, Preimage { requester: 1, blob: b"unrequested".to_vec() }];
        let error = preimages::process(&preimages, &state.service_accounts, 9).unwrap_err();
        assert_eq!(ProcessError::PreimagesError(PreimagesErrorCode::PreimageUnneeded), error);

        let unordered = vec![Preimage { requester: 2, blob: vec![1] }, Preimage { requester: 1, blob: b"first".to_vec() }];
        let error = preimages::process(&unordered, &state.service_accounts, 9).unwrap_err();
        assert_eq!(ProcessError::PreimagesError(PreimagesErrorCode::PreimagesNotSortedUnique), error);

        assert!(state.service_accounts[&1].preimages.is_empty());
    }
}
