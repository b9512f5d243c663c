use std::collections::HashSet;
use std::hash::Hash;

use rayon::prelude::*;
use sp_core::{ed25519, Pair};

use jam_types::{BandersnatchPublic, BlsPublic, Ed25519Public, Ed25519Signature, Metadata, ValidatorsData};

pub fn is_sorted_and_unique<T: PartialOrd>(items: &[T]) -> bool {
    items.windows(2).all(|window| window[0] < window[1])
}

pub fn has_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    !items.iter().all(|item| seen.insert(item))
}

pub trait VerifySignature {
    fn verify_signature(&self, message: &[u8], public_key: &Ed25519Public) -> bool;
}

impl VerifySignature for Ed25519Signature {

    fn verify_signature(&self, message: &[u8], public_key: &Ed25519Public) -> bool {

        let signature = ed25519::Signature::from_raw(*self);
        let public_key = ed25519::Public::from_raw(*public_key);

        ed25519::Pair::verify(&signature, message, &public_key)
    }
}

/// One signature to check: the signed message, the signer key and the signature itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureCheck {
    pub message: Vec<u8>,
    pub public_key: Ed25519Public,
    pub signature: Ed25519Signature,
}

/// Verifies a whole batch on the rayon pool. The result keeps the order of the input.
pub fn verify_batch(checks: &[SignatureCheck]) -> Vec<bool> {
    checks
        .par_iter()
        .map(|check| check.signature.verify_signature(&check.message, &check.public_key))
        .collect()
}

/// Index of the first failed check in a batch, if any.
pub fn first_invalid(checks: &[SignatureCheck]) -> Option<usize> {
    verify_batch(checks).iter().position(|valid| !valid)
}

pub fn set_offenders_null(validators_data: &mut ValidatorsData, offenders: &[Ed25519Public]) {

    if offenders.is_empty() {
        return;
    }

    for validator in validators_data.list.iter_mut() {
        if offenders.contains(&validator.ed25519) {
            log::debug!("Validator {} belongs to offenders set", crate::print_hash!(validator.ed25519));
            validator.bandersnatch = [0u8; std::mem::size_of::<BandersnatchPublic>()];
            validator.ed25519 = [0u8; std::mem::size_of::<Ed25519Public>()];
            validator.bls = [0u8; std::mem::size_of::<BlsPublic>()];
            validator.metadata = [0u8; std::mem::size_of::<Metadata>()];
        }
    }
}
