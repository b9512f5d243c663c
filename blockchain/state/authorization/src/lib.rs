/*
    The authorization pool of each core holds the authorizers which may currently justify a work-package on it. Each block
    removes from the pool the authorizers consumed by the reports it guarantees, then takes the next authorizer from the
    core's queue, cycling through the queue one slot at a time. The pool never holds more than MAX_ITEMS_AUTHORIZATION_POOL
    items: the oldest are dropped first.
*/

use constants::ChainSpec;
use constants::node::{MAX_ITEMS_AUTHORIZATION_POOL, MAX_ITEMS_AUTHORIZATION_QUEUE};
use jam_types::{AuthPools, AuthQueues, CodeAuthorizer, StateUpdate, TimeSlot, Transition};

pub fn process(
    slot: TimeSlot,
    used: &[CodeAuthorizer],
    auth_pools: &AuthPools,
    auth_queues: &AuthQueues,
    spec: &ChainSpec,
) -> Transition<()> {

    log::debug!("Processing authorization for slot {}", slot);

    assert_eq!(spec.cores_count, auth_pools.0.len(), "auth pools must hold one pool per core");
    assert_eq!(spec.cores_count, auth_queues.0.len(), "auth queues must hold one queue per core");

    let mut post_pools = auth_pools.clone();

    for (core, pool) in post_pools.0.iter_mut().enumerate() {

        for authorizer in used.iter().filter(|authorizer| authorizer.core as usize == core) {
            // Only the left-most occurrence is consumed
            if let Some(position) = pool.iter().position(|hash| *hash == authorizer.auth_hash) {
                pool.remove(position);
            } else {
                log::debug!("Authorizer 0x{} not found in pool of core {}", utils::print_hash!(authorizer.auth_hash), core);
            }
        }

        pool.push_back(auth_queues.0[core][slot as usize % MAX_ITEMS_AUTHORIZATION_QUEUE]);

        while pool.len() > MAX_ITEMS_AUTHORIZATION_POOL {
            pool.pop_front();
        }
    }

    Transition { output: (), update: StateUpdate { auth_pools: Some(post_pools), ..Default::default() } }
}
