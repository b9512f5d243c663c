/*
    The assurances extrinsic is a sequence of assurance values, at most one per validator. Each assurance is a bitstring
    with one bit per core, together with a signature and the index of the validator who is assuring. A set bit implies
    that the validator assures they are contributing to the availability of the report pending on that core.

    A work-report becomes available once a super-majority of validators have marked its core. Reports which do not
    reach that threshold are dropped once they time out, so the core can take a new report.
*/

use sp_core::blake2_256;

use constants::ChainSpec;
use constants::node::{JAM_AVAILABLE, REPORTED_WORK_REPLACEMENT_PERIOD};
use jam_types::{
    Assurance, AssurancesErrorCode, AvailabilityAssignments, HeaderHash, OutputDataAssurances, ProcessError, StateUpdate, TimeSlot,
    Transition, ValidatorIndex, ValidatorsData,
};
use codec::Encode;
use utils::common::{first_invalid, is_sorted_and_unique, SignatureCheck};

pub fn process(
    assurances: &[Assurance],
    slot: TimeSlot,
    parent: &HeaderHash,
    availability: &AvailabilityAssignments,
    curr_validators: &ValidatorsData,
    spec: &ChainSpec,
) -> Result<Transition<OutputDataAssurances>, ProcessError> {

    log::debug!("Processing assurances extrinsic...");

    assert_eq!(spec.cores_count, availability.list.len(), "availability must hold one entry per core");

    // The assurances must all be anchored on the parent
    for assurance in assurances {
        if assurance.anchor != *parent {
            log::error!("Bad assurance anchor: 0x{} != block parent: 0x{}", utils::print_hash!(assurance.anchor), utils::print_hash!(*parent));
            return Err(ProcessError::AssurancesError(AssurancesErrorCode::InvalidAnchor));
        }
    }

    // The assurances must all be ordered by validator index
    let validator_indexes = assurances.iter().map(|assurance| assurance.validator_index).collect::<Vec<ValidatorIndex>>();
    if !is_sorted_and_unique(&validator_indexes) {
        log::error!("Not sorted or unique assurers");
        return Err(ProcessError::AssurancesError(AssurancesErrorCode::InvalidOrder));
    }

    let mut core_marks = vec![0usize; spec.cores_count];

    for assurance in assurances {

        assert_eq!(spec.avail_bitfield_bytes(), assurance.bitfield.len(), "bitfield must hold one bit per core");

        for (core, marks) in core_marks.iter_mut().enumerate() {
            if assurance.bitfield[core / 8] & (1 << (core % 8)) == 0 {
                continue;
            }
            // A bit may only be set if the corresponding core has a report pending availability on it
            if availability.list[core].is_none() {
                log::error!("Core {} has no report pending", core);
                return Err(ProcessError::AssurancesError(AssurancesErrorCode::NoReportPending));
            }
            *marks += 1;
        }
    }

    verify_signatures(assurances, parent, curr_validators)?;

    // A report leaves its core either because it became available or because it timed out. Only the former
    // is handed over to accumulation.
    let mut post_availability = availability.clone();
    let mut reported = Vec::new();

    for (core, item) in post_availability.list.iter_mut().enumerate() {
        let Some(assignment) = item else { continue };

        if core_marks[core] >= spec.super_majority() {
            log::debug!("Report 0x{} on core {} is now available", utils::print_hash!(assignment.report.package_spec.hash), core);
            reported.push(assignment.report.clone());
            *item = None;
        } else if slot >= assignment.timeout.saturating_add(REPORTED_WORK_REPLACEMENT_PERIOD) {
            log::debug!("Report 0x{} on core {} timed out", utils::print_hash!(assignment.report.package_spec.hash), core);
            *item = None;
        }
    }

    log::debug!("Assurances extrinsic processed successfully, {} reports available", reported.len());

    Ok(Transition {
        output: OutputDataAssurances { reported },
        update: StateUpdate { availability: Some(post_availability), ..Default::default() },
    })
}

/// The signed message: the availability context followed by the hash of the parent and the bitfield.
pub fn assurance_message(parent: &HeaderHash, bitfield: &[u8]) -> Vec<u8> {
    let mut serialization = Vec::with_capacity(32 + bitfield.len());
    parent.encode_to(&mut serialization);
    bitfield.encode_to(&mut serialization);
    [JAM_AVAILABLE, &blake2_256(&serialization)[..]].concat()
}

fn verify_signatures(assurances: &[Assurance], parent: &HeaderHash, curr_validators: &ValidatorsData) -> Result<(), ProcessError> {

    let mut checks = Vec::with_capacity(assurances.len());

    for assurance in assurances {
        let Some(validator) = curr_validators.list.get(assurance.validator_index as usize) else {
            log::error!("Bad validator index: {}", assurance.validator_index);
            return Err(ProcessError::AssurancesError(AssurancesErrorCode::InvalidValidatorIndex));
        };
        checks.push(SignatureCheck {
            message: assurance_message(parent, &assurance.bitfield),
            public_key: validator.ed25519,
            signature: assurance.signature,
        });
    }

    if let Some(index) = first_invalid(&checks) {
        log::error!("Bad signature in validator index {}", assurances[index].validator_index);
        return Err(ProcessError::AssurancesError(AssurancesErrorCode::InvalidSignature));
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use sp_core::{ed25519, Pair};
    use jam_types::{AvailabilityAssignment, ValidatorData, WorkReport};

    const PARENT: HeaderHash = [7u8; 32];

    fn keys(spec: &ChainSpec) -> Vec<ed25519::Pair> {
        (0..spec.validators_count).map(|i| ed25519::Pair::from_seed(&[i as u8 + 1; 32])).collect()
    }

    fn validators(keys: &[ed25519::Pair]) -> ValidatorsData {
        ValidatorsData {
            list: keys.iter().map(|pair| ValidatorData { ed25519: pair.public().0, ..Default::default() }).collect(),
        }
    }

    fn pending(spec: &ChainSpec, core: usize, timeout: TimeSlot) -> AvailabilityAssignments {
        let mut availability = AvailabilityAssignments::new(spec);
        let mut report = WorkReport::default();
        report.core_index = core as u16;
        report.package_spec.hash = [core as u8 + 0xa0; 32];
        availability.list[core] = Some(AvailabilityAssignment { report, timeout });
        availability
    }

    fn assurance(keys: &[ed25519::Pair], index: u16, bitfield: Vec<u8>) -> Assurance {
        let signature = keys[index as usize].sign(&assurance_message(&PARENT, &bitfield)).0;
        Assurance { anchor: PARENT, bitfield, validator_index: index, signature }
    }

    fn error_of(result: Result<Transition<OutputDataAssurances>, ProcessError>) -> AssurancesErrorCode {
        match result {
            Err(ProcessError::AssurancesError(code)) => code,
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn super_majority_makes_report_available() {
        let _ = env_logger::builder().is_test(true).try_init();
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let availability = pending(&spec, 0, 10);
        let assurances = (0..spec.super_majority() as u16).map(|i| assurance(&keys, i, vec![0b01])).collect::<Vec<_>>();

        let transition = process(&assurances, 11, &PARENT, &availability, &validators(&keys), &spec).unwrap();

        assert_eq!(vec![availability.list[0].clone().unwrap().report], transition.output.reported);
        assert_eq!(Some(AvailabilityAssignments::new(&spec)), transition.update.availability);
    }

    #[test]
    fn not_enough_assurances_keeps_report() {
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let availability = pending(&spec, 0, 10);
        let assurances = (0..spec.super_majority() as u16 - 1).map(|i| assurance(&keys, i, vec![0b01])).collect::<Vec<_>>();

        let transition = process(&assurances, 11, &PARENT, &availability, &validators(&keys), &spec).unwrap();

        assert!(transition.output.reported.is_empty());
        assert_eq!(Some(availability), transition.update.availability);
    }

    #[test]
    fn timed_out_report_is_cleared_but_not_reported() {
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let availability = pending(&spec, 1, 10);
        let assurances = vec![assurance(&keys, 0, vec![0b10])];

        let transition = process(&assurances, 10 + REPORTED_WORK_REPLACEMENT_PERIOD, &PARENT, &availability, &validators(&keys), &spec).unwrap();

        assert!(transition.output.reported.is_empty());
        assert_eq!(Some(AvailabilityAssignments::new(&spec)), transition.update.availability);
    }

    #[test]
    fn bad_anchor() {
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let mut item = assurance(&keys, 0, vec![0b01]);
        item.anchor = [8u8; 32];

        let result = process(&[item], 11, &PARENT, &pending(&spec, 0, 10), &validators(&keys), &spec);
        assert_eq!(AssurancesErrorCode::InvalidAnchor, error_of(result));
    }

    #[test]
    fn assurers_out_of_order() {
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let assurances = vec![assurance(&keys, 2, vec![0b01]), assurance(&keys, 1, vec![0b01])];

        let result = process(&assurances, 11, &PARENT, &pending(&spec, 0, 10), &validators(&keys), &spec);
        assert_eq!(AssurancesErrorCode::InvalidOrder, error_of(result));
    }

    #[test]
    fn bit_set_on_idle_core() {
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let assurances = vec![assurance(&keys, 0, vec![0b10])];

        let result = process(&assurances, 11, &PARENT, &pending(&spec, 0, 10), &validators(&keys), &spec);
        assert_eq!(AssurancesErrorCode::NoReportPending, error_of(result));
    }

    #[test]
    fn bad_signature() {
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let mut item = assurance(&keys, 3, vec![0b01]);
        item.signature[0] ^= 0xff;

        let result = process(&[item], 11, &PARENT, &pending(&spec, 0, 10), &validators(&keys), &spec);
        assert_eq!(AssurancesErrorCode::InvalidSignature, error_of(result));
    }

    #[test]
    fn validator_index_out_of_range() {
        let spec = ChainSpec::TINY;
        let keys = keys(&spec);
        let mut item = assurance(&keys, 0, vec![0b01]);
        item.validator_index = spec.validators_count as u16;

        let result = process(&[item], 11, &PARENT, &pending(&spec, 0, 10), &validators(&keys), &spec);
        assert_eq!(AssurancesErrorCode::InvalidValidatorIndex, error_of(result));
    }
}
