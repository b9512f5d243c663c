/*
    Preimages are static data which is presently being requested to be available for workloads to be able to fetch on demand.
    Prior to accumulation, we must first integrate all preimages provided in the lookup extrinsic.
 */

use sp_core::blake2_256;

use jam_types::{PreimageUpdate, Preimage, PreimagesErrorCode, ProcessError, ServiceAccounts, ServicesUpdate, StateUpdate, TimeSlot, Transition};
use utils::common::is_sorted_and_unique;

pub fn process(preimages: &[Preimage], services: &ServiceAccounts, slot: TimeSlot) -> Result<Transition<()>, ProcessError> {

    log::debug!("Processing preimages extrinsic...");

    // The lookup extrinsic is a sequence of pairs of service indices and data. These pairs must be ordered and
    // without duplicates.
    let pairs = preimages.iter().map(|preimage| (preimage.requester, preimage.blob.as_slice())).collect::<Vec<_>>();
    if !is_sorted_and_unique(&pairs) {
        log::error!("Preimages not sorted or unique");
        return Err(ProcessError::PreimagesError(PreimagesErrorCode::PreimagesNotSortedUnique));
    }

    let mut updates = Vec::with_capacity(preimages.len());

    for preimage in preimages {

        let hash = blake2_256(&preimage.blob);
        let length = preimage.blob.len() as u32;

        let Some(account) = services.get(&preimage.requester) else {
            log::error!("Requester {} not found", preimage.requester);
            return Err(ProcessError::PreimagesError(PreimagesErrorCode::AccountNotFound));
        };

        if account.preimages.contains_key(&hash) {
            log::error!("Preimage unneeded. The hash 0x{} is already provided to service {}", utils::print_hash!(hash), preimage.requester);
            return Err(ProcessError::PreimagesError(PreimagesErrorCode::PreimageUnneeded));
        }

        // Only an outstanding request, with no slots recorded yet, can be fulfilled
        match account.lookup.get(&(hash, length)) {
            Some(slots) if slots.is_empty() => {}
            Some(_) => {
                log::error!("Preimage unneeded. The request for 0x{} is not pending", utils::print_hash!(hash));
                return Err(ProcessError::PreimagesError(PreimagesErrorCode::PreimageUnneeded));
            }
            None => {
                log::error!("Preimage unneeded. No request for 0x{} with length {}", utils::print_hash!(hash), length);
                return Err(ProcessError::PreimagesError(PreimagesErrorCode::PreimageUnneeded));
            }
        }

        updates.push(PreimageUpdate::Provide { service: preimage.requester, hash, blob: preimage.blob.clone(), slot });
    }

    log::debug!("Preimages extrinsic processed successfully, {} provided", updates.len());

    Ok(Transition {
        output: (),
        update: StateUpdate { services: ServicesUpdate { preimages: updates, ..Default::default() }, ..Default::default() },
    })
}
