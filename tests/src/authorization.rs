#[cfg(test)]
mod tests {

    use constants::ChainSpec;
    use constants::node::{MAX_ITEMS_AUTHORIZATION_POOL, MAX_ITEMS_AUTHORIZATION_QUEUE};
    use jam_types::{AuthQueues, CodeAuthorizer, GlobalState};
    use state_controller::apply_update;
    use crate::init;

    fn queues(spec: &ChainSpec) -> AuthQueues {
        let mut queues = AuthQueues::new(spec);
        for (core, queue) in queues.0.iter_mut().enumerate() {
            for (i, item) in queue.iter_mut().enumerate() {
                let mut hash = [0u8; 32];
                hash[0] = core as u8;
                hash[1] = i as u8;
                *item = hash;
            }
        }
        queues
    }

    #[test]
    fn pools_keep_the_latest_queue_items() {
        init();
        let spec = ChainSpec::TINY;
        let mut state = GlobalState::genesis(&spec);
        state.auth_queues = queues(&spec);

        for slot in 0..MAX_ITEMS_AUTHORIZATION_QUEUE as u32 + 3 {
            let transition = authorization::process(slot, &[], &state.auth_pools, &state.auth_queues, &spec);
            apply_update(&mut state, transition.update);
        }

        // The queue wraps around: the last slots processed were 75..=82, i.e. items 75..=79 then 0..=2
        let expected = (75..80).chain(0..3).collect::<Vec<u8>>();
        for (core, pool) in state.auth_pools.0.iter().enumerate() {
            assert_eq!(MAX_ITEMS_AUTHORIZATION_POOL, pool.len());
            assert_eq!(expected, pool.iter().map(|hash| hash[1]).collect::<Vec<u8>>());
            assert!(pool.iter().all(|hash| hash[0] == core as u8));
        }
        // Queues are only read
        assert_eq!(queues(&spec), state.auth_queues);
    }

    #[test]
    fn used_authorizers_make_room() {
        init();
        let spec = ChainSpec::TINY;
        let mut state = GlobalState::genesis(&spec);
        state.auth_queues = queues(&spec);

        for slot in 0..MAX_ITEMS_AUTHORIZATION_POOL as u32 {
            let transition = authorization::process(slot, &[], &state.auth_pools, &state.auth_queues, &spec);
            apply_update(&mut state, transition.update);
        }
        let oldest = state.auth_pools.0[1][0];
        let used = state.auth_pools.0[1][3];

        let transition = authorization::process(8, &[CodeAuthorizer { core: 1, auth_hash: used }], &state.auth_pools, &state.auth_queues, &spec);
        apply_update(&mut state, transition.update);

        // Core 1 consumed one authorizer, so nothing had to be evicted from it
        assert!(!state.auth_pools.0[1].contains(&used));
        assert_eq!(oldest, state.auth_pools.0[1][0]);
        assert_eq!(MAX_ITEMS_AUTHORIZATION_POOL, state.auth_pools.0[1].len());
        // Core 0 evicted its oldest entry instead
        assert_eq!(1, state.auth_pools.0[0][0][1]);
    }
}
