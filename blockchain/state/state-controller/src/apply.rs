use constants::node::MAX_LOOKUP_HISTORY_SLOTS;
use jam_types::{
    Account, GlobalState, PreimageUpdate, ServiceAccounts, ServiceId, ServiceUpdate, ServicesUpdate, StateUpdate, StorageUpdate,
};

/// Writes a sub-transition's diff into the state. Components left unset in the update are untouched.
pub fn apply_update(state: &mut GlobalState, update: StateUpdate) {

    let StateUpdate {
        time,
        availability,
        entropy,
        recent_history,
        auth_pools,
        auth_queues,
        statistics,
        prev_validators,
        curr_validators,
        next_validators,
        disputes,
        safrole,
        accumulation_history,
        ready_queue,
        privileges,
        services,
    } = update;

    if let Some(time) = time { state.time = time; }
    if let Some(availability) = availability { state.availability = availability; }
    if let Some(entropy) = entropy { state.entropy = entropy; }
    if let Some(recent_history) = recent_history { state.recent_history = recent_history; }
    if let Some(auth_pools) = auth_pools { state.auth_pools = auth_pools; }
    if let Some(auth_queues) = auth_queues { state.auth_queues = auth_queues; }
    if let Some(statistics) = statistics { state.statistics = statistics; }
    if let Some(prev_validators) = prev_validators { state.prev_validators = prev_validators; }
    if let Some(curr_validators) = curr_validators { state.curr_validators = curr_validators; }
    if let Some(next_validators) = next_validators { state.next_validators = next_validators; }
    if let Some(disputes) = disputes { state.disputes = disputes; }
    if let Some(safrole) = safrole { state.safrole = safrole; }
    if let Some(accumulation_history) = accumulation_history { state.accumulation_history = accumulation_history; }
    if let Some(ready_queue) = ready_queue { state.ready_queue = ready_queue; }
    if let Some(privileges) = privileges { state.privileges = privileges; }

    apply_services(state, services);
}

fn apply_services(state: &mut GlobalState, update: ServicesUpdate) {

    if update.is_empty() {
        return;
    }

    let accounts = &mut state.service_accounts;

    for service in update.removed {
        log::debug!("Remove service {}", service);
        accounts.remove(&service);
    }

    for item in update.updated {
        match item {
            ServiceUpdate::Create { service, info } => {
                log::debug!("Create service {}", service);
                accounts.insert(service, Account { info, ..Default::default() });
            }
            ServiceUpdate::Update { service, info } => account_mut(accounts, service).info = info,
        }
    }

    for item in update.preimages {
        match item {
            PreimageUpdate::Provide { service, hash, blob, slot } => {
                let account = account_mut(accounts, service);
                account.lookup.insert((hash, blob.len() as u32), vec![slot]);
                account.preimages.insert(hash, blob);
            }
            PreimageUpdate::Remove { service, hash, length } => {
                let account = account_mut(accounts, service);
                account.preimages.remove(&hash);
                account.lookup.remove(&(hash, length));
            }
            PreimageUpdate::UpdateLookup { service, hash, length, slots } => {
                assert!(
                    slots.len() <= MAX_LOOKUP_HISTORY_SLOTS,
                    "lookup history of service {} holds {} slots, at most {} are allowed",
                    service,
                    slots.len(),
                    MAX_LOOKUP_HISTORY_SLOTS
                );
                account_mut(accounts, service).lookup.insert((hash, length), slots);
            }
        }
    }

    for item in update.storage {
        match item {
            StorageUpdate::Set { service, key, value } => {
                account_mut(accounts, service).storage.insert(key, value);
            }
            StorageUpdate::Remove { service, key } => {
                account_mut(accounts, service).storage.remove(&key);
            }
        }
    }
}

// Stages only emit updates for services they have seen in the state
fn account_mut(accounts: &mut ServiceAccounts, service: ServiceId) -> &mut Account {
    match accounts.get_mut(&service) {
        Some(account) => account,
        None => panic!("update targets unknown service {}", service),
    }
}
