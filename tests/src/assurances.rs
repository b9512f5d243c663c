#[cfg(test)]
mod tests {

    use sp_core::{ed25519, Pair};

    use constants::ChainSpec;
    use jam_types::{
        Assurance, AssurancesErrorCode, AvailabilityAssignment, AvailabilityAssignments, GlobalState, HeaderHash, ProcessError, WorkReport,
    };
    use assurances::{assurance_message, process};
    use state_controller::apply_update;
    use crate::{init, validator_keys, validators_data};

    const PARENT: HeaderHash = [0x3e; 32];

    fn pending(spec: &ChainSpec, timeout: u32) -> AvailabilityAssignments {
        let mut availability = AvailabilityAssignments::new(spec);
        for (core, item) in availability.list.iter_mut().enumerate() {
            let mut report = WorkReport::default();
            report.core_index = core as u16;
            report.package_spec.hash = [core as u8 + 1; 32];
            *item = Some(AvailabilityAssignment { report, timeout });
        }
        availability
    }

    fn assure(keys: &[ed25519::Pair], validators: &[usize], bitfield: u8) -> Vec<Assurance> {
        validators
            .iter()
            .map(|i| Assurance {
                anchor: PARENT,
                bitfield: vec![bitfield],
                validator_index: *i as u16,
                signature: keys[*i].sign(&assurance_message(&PARENT, &[bitfield])).0,
            })
            .collect()
    }

    #[test]
    fn super_majority_makes_reports_available() {
        init();
        let spec = ChainSpec::TINY;
        let keys = validator_keys(&spec);
        let mut state = GlobalState::genesis(&spec);
        state.curr_validators = validators_data(&keys);
        state.availability = pending(&spec, 10);

        // Five validators assure core 0, only three of them also assure core 1
        let mut assurances = assure(&keys, &[0, 1], 0b01);
        assurances.extend(assure(&keys, &[2, 3, 4], 0b11));

        let transition = process(&assurances, 11, &PARENT, &state.availability, &state.curr_validators, &spec).unwrap();
        assert_eq!(1, transition.output.reported.len());
        assert_eq!([1u8; 32], transition.output.reported[0].package_spec.hash);

        apply_update(&mut state, transition.update);
        assert!(state.availability.list[0].is_none());
        assert!(state.availability.list[1].is_some());

        // Without further assurances the remaining report times out and is dropped silently
        let transition = process(&[], 15, &PARENT, &state.availability, &state.curr_validators, &spec).unwrap();
        assert!(transition.output.reported.is_empty());
        apply_update(&mut state, transition.update);
        assert!(state.availability.list.iter().all(Option::is_none));
    }

    #[test]
    fn signature_over_another_parent_is_rejected() {
        init();
        let spec = ChainSpec::TINY;
        let keys = validator_keys(&spec);
        let validators = validators_data(&keys);
        let availability = pending(&spec, 10);

        let mut assurances = assure(&keys, &[0, 1, 2], 0b01);
        assurances[1].signature = keys[1].sign(&assurance_message(&[0u8; 32], &[0b01])).0;

        let error = process(&assurances, 11, &PARENT, &availability, &validators, &spec).unwrap_err();
        assert_eq!(ProcessError::AssurancesError(AssurancesErrorCode::InvalidSignature), error);
    }

    #[test]
    fn bits_for_idle_cores_are_rejected() {
        init();
        let spec = ChainSpec::TINY;
        let keys = validator_keys(&spec);
        let validators = validators_data(&keys);
        let mut availability = pending(&spec, 10);
        availability.list[1] = None;

        let error = process(&assure(&keys, &[0], 0b10), 11, &PARENT, &availability, &validators, &spec).unwrap_err();
        assert_eq!(ProcessError::AssurancesError(AssurancesErrorCode::NoReportPending), error);
    }
}
