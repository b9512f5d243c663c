/*
    Each core has V/C validators assigned to guarantee work-reports for it. We determine the core to which any given
    validator is assigned through a shuffle using epochal entropy and a periodic rotation to help guard the security and
    liveness of the network. We use η2 for the epochal entropy rather than η1 to avoid the possibility of fork-magnification
    where uncertainty about chain state at the end of an epoch could give rise to two established forks before it naturally
    resolves.
*/

use constants::ChainSpec;
use jam_types::{CoreIndex, Ed25519Public, EntropyPool, Hash, TimeSlot, ValidatorsData};
use utils::common::set_offenders_null;
use utils::shuffle::shuffle;

/// Core of every validator, indexed by validator index, together with the keys the assignment was made for.
/// Offenders have their keys nulled.
#[derive(Debug, Clone, PartialEq)]
pub struct GuarantorAssignments {
    pub cores: Vec<CoreIndex>,
    pub validators: ValidatorsData,
}

fn rotation(cores: &[CoreIndex], n: u32, spec: &ChainSpec) -> Vec<CoreIndex> {
    cores.iter().map(|core| ((*core as u32 + n) % spec.cores_count as u32) as CoreIndex).collect()
}

fn permute(entropy: &Hash, slot: TimeSlot, spec: &ChainSpec) -> Vec<CoreIndex> {

    let items = (0..spec.validators_count)
        .map(|i| ((spec.cores_count * i) / spec.validators_count) as CoreIndex)
        .collect::<Vec<_>>();

    let n = (slot % spec.epoch_length as u32) / spec.rotation_period;
    rotation(&shuffle(&items, entropy), n, spec)
}

fn assign(entropy: &Hash, slot: TimeSlot, validators: &ValidatorsData, offenders: &[Ed25519Public], spec: &ChainSpec) -> GuarantorAssignments {

    let mut validators = validators.clone();
    set_offenders_null(&mut validators, offenders);

    GuarantorAssignments { cores: permute(entropy, slot, spec), validators }
}

/// Assignments of the rotation `slot` belongs to.
pub fn current(entropy: &EntropyPool, slot: TimeSlot, curr_validators: &ValidatorsData, offenders: &[Ed25519Public], spec: &ChainSpec) -> GuarantorAssignments {
    assign(&entropy.buf[2], slot, curr_validators, offenders, spec)
}

/// Assignments of the rotation before the one `slot` belongs to. When that rotation falls in the previous epoch
/// it was made with that epoch's entropy and validator set.
pub fn previous(
    entropy: &EntropyPool,
    slot: TimeSlot,
    prev_validators: &ValidatorsData,
    curr_validators: &ValidatorsData,
    offenders: &[Ed25519Public],
    spec: &ChainSpec,
) -> GuarantorAssignments {

    let prev_slot = slot.saturating_sub(spec.rotation_period);
    let epoch_length = spec.epoch_length as u32;

    if prev_slot / epoch_length == slot / epoch_length {
        assign(&entropy.buf[2], prev_slot, curr_validators, offenders, spec)
    } else {
        assign(&entropy.buf[3], prev_slot, prev_validators, offenders, spec)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use jam_types::ValidatorData;

    fn validators(seed: u8, spec: &ChainSpec) -> ValidatorsData {
        ValidatorsData {
            list: (0..spec.validators_count).map(|i| ValidatorData { ed25519: [seed + i as u8; 32], ..Default::default() }).collect(),
        }
    }

    #[test]
    fn rotation_wraps_cores() {
        let spec = ChainSpec::TINY;
        assert_eq!(vec![1, 0, 1, 0, 1, 0], rotation(&[0, 1, 0, 1, 0, 1], 5, &spec));
    }

    #[test]
    fn every_core_gets_the_same_number_of_guarantors() {
        let spec = ChainSpec::TINY;
        let mut entropy = EntropyPool::default();
        entropy.buf[2] = [0x2a; 32];

        for slot in [0, 5, 11, 23] {
            let assignments = current(&entropy, slot, &validators(1, &spec), &[], &spec);
            for core in 0..spec.cores_count as CoreIndex {
                let count = assignments.cores.iter().filter(|c| **c == core).count();
                assert_eq!(spec.validators_count / spec.cores_count, count);
            }
        }
    }

    #[test]
    fn next_rotation_shifts_by_one_core() {
        let spec = ChainSpec::TINY;
        let entropy = EntropyPool::default();
        let curr = validators(1, &spec);

        let first = current(&entropy, 12, &curr, &[], &spec);
        let second = current(&entropy, 12 + spec.rotation_period, &curr, &[], &spec);
        assert_eq!(rotation(&first.cores, 1, &spec), second.cores);
    }

    #[test]
    fn previous_rotation_across_epoch_uses_previous_set() {
        let spec = ChainSpec::TINY;
        let mut entropy = EntropyPool::default();
        entropy.buf[2] = [2u8; 32];
        entropy.buf[3] = [3u8; 32];
        let prev = validators(100, &spec);
        let curr = validators(1, &spec);

        // Slot 13 is in the second epoch, its previous rotation started in the first one
        let assignments = previous(&entropy, 13, &prev, &curr, &[], &spec);
        assert_eq!(prev, assignments.validators);
        assert_eq!(current(&entropy_with(&entropy, 3), 9, &prev, &[], &spec).cores, assignments.cores);

        // Slot 21 shares its epoch with the previous rotation
        let assignments = previous(&entropy, 21, &prev, &curr, &[], &spec);
        assert_eq!(curr, assignments.validators);
        assert_eq!(current(&entropy, 17, &curr, &[], &spec).cores, assignments.cores);
    }

    fn entropy_with(entropy: &EntropyPool, index: usize) -> EntropyPool {
        let mut shifted = *entropy;
        shifted.buf[2] = entropy.buf[index];
        shifted
    }

    #[test]
    fn offenders_are_nulled() {
        let spec = ChainSpec::TINY;
        let curr = validators(1, &spec);
        let assignments = current(&EntropyPool::default(), 0, &curr, &[[3u8; 32]], &spec);

        assert_eq!([0u8; 32], assignments.validators.list[2].ed25519);
        assert_eq!([1u8; 32], assignments.validators.list[0].ed25519);
    }
}
