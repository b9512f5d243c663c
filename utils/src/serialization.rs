/*
    The serialization of state places all the components of the global state into a single mapping from
    32-octet state keys to octet sequences of indefinite length. A state key is built either from the index
    of a global component or, for the inner dictionaries of the service accounts, from a service index
    interleaved with a hash of the entry's sub-key.
*/

use sp_core::blake2_256;

use constants::ProtocolVersion;
use constants::node::{
    ACCUMULATION_HISTORY, AUTH_POOLS, AUTH_QUEUE, AVAILABILITY, CURR_VALIDATORS, DISPUTES, ENTROPY, NEXT_VALIDATORS, PREIMAGE_PREFIX,
    PREV_VALIDATORS, PRIVILEGES, READY_QUEUE, RECENT_HISTORY, SAFROLE, SERVICE_INFO, STATISTICS, STORAGE_PREFIX, TIME,
};
use jam_types::{GlobalState, OpaqueHash, ServiceId, StateEntries, StateKey, StateRoot, StorageKey};
use codec::{Encode, EncodeLen};

use crate::trie::merkle_root;

#[derive(Debug, Clone, PartialEq)]
pub enum StateKeyType {
    Component(u8),
    ServiceInfo(ServiceId),
    Storage(ServiceId, StorageKey),
    Preimage(ServiceId, OpaqueHash),
    Lookup(ServiceId, OpaqueHash, u32),
}

pub trait StateKeyTrait {
    fn construct(&self, version: ProtocolVersion) -> StateKey;
}

impl StateKeyTrait for StateKeyType {

    fn construct(&self, version: ProtocolVersion) -> StateKey {
        match self {
            StateKeyType::Component(tag) => index(*tag),
            StateKeyType::ServiceInfo(service) => service_info(*service),
            StateKeyType::Storage(service, key) => service_nested(*service, STORAGE_PREFIX, key, version),
            StateKeyType::Preimage(service, hash) => service_nested(*service, PREIMAGE_PREFIX, hash, version),
            StateKeyType::Lookup(service, hash, length) => match version {
                ProtocolVersion::Current => service_nested(*service, *length, hash, version),
                ProtocolVersion::Legacy => {
                    let mut body = [0u8; 32];
                    body[..4].copy_from_slice(&length.encode());
                    body[4..].copy_from_slice(&blake2_256(hash)[2..30]);
                    interleave(*service, &body)
                }
            },
        }
    }
}

/// Key of a global component: the component index followed by zeroes.
pub fn index(tag: u8) -> StateKey {
    let mut key = StateKey::default();
    key[0] = tag;
    key
}

/// Key of a service's account info: 255, then the service id bytes at the odd positions.
pub fn service_info(service: ServiceId) -> StateKey {
    let mut key = index(SERVICE_INFO);
    for (i, byte) in service.encode().iter().enumerate() {
        key[1 + 2 * i] = *byte;
    }
    key
}

/// Key of an entry inside a service's dictionaries. The current layout hashes the prefix together with the
/// sub-key; the legacy layout stores them in the clear.
pub fn service_nested(service: ServiceId, prefix: u32, hash: &OpaqueHash, version: ProtocolVersion) -> StateKey {

    let mut body = [0u8; 32];
    body[..4].copy_from_slice(&prefix.encode());
    body[4..].copy_from_slice(&hash[..28]);

    if version == ProtocolVersion::Current {
        body = blake2_256(&[&prefix.encode()[..], &hash[..]].concat());
    }

    interleave(service, &body)
}

// The first four body bytes alternate with the service id, so every entry of a service sorts together
fn interleave(service: ServiceId, body: &[u8; 32]) -> StateKey {

    let mut key = StateKey::default();

    for (i, byte) in service.encode().iter().enumerate() {
        key[2 * i] = *byte;
        key[2 * i + 1] = body[i];
    }
    key[8..].copy_from_slice(&body[4..28]);

    key
}

pub fn is_service_info_key(key: &StateKey) -> bool {
    key[0] == SERVICE_INFO && key[2] == 0 && key[4] == 0 && key[6] == 0 && key[8..].iter().all(|&b| b == 0)
}

pub fn service_id_from_info_key(key: &StateKey) -> Option<ServiceId> {
    if !is_service_info_key(key) {
        return None;
    }
    Some(u32::from_le_bytes([key[1], key[3], key[5], key[7]]))
}

/// Flattens the global state into its key/value projection.
pub fn serialize(global_state: &GlobalState, version: ProtocolVersion) -> StateEntries {

    let mut state = StateEntries::default();

    state.map.insert(index(AUTH_POOLS), global_state.auth_pools.encode());
    state.map.insert(index(AUTH_QUEUE), global_state.auth_queues.encode());
    state.map.insert(index(RECENT_HISTORY), global_state.recent_history.encode());
    state.map.insert(index(SAFROLE), global_state.safrole.encode());
    state.map.insert(index(DISPUTES), global_state.disputes.encode());
    state.map.insert(index(ENTROPY), global_state.entropy.encode());
    state.map.insert(index(NEXT_VALIDATORS), global_state.next_validators.encode());
    state.map.insert(index(CURR_VALIDATORS), global_state.curr_validators.encode());
    state.map.insert(index(PREV_VALIDATORS), global_state.prev_validators.encode());
    state.map.insert(index(AVAILABILITY), global_state.availability.encode());
    state.map.insert(index(TIME), global_state.time.encode());
    state.map.insert(index(PRIVILEGES), global_state.privileges.encode());
    state.map.insert(index(STATISTICS), global_state.statistics.encode());
    state.map.insert(index(READY_QUEUE), global_state.ready_queue.encode());
    state.map.insert(index(ACCUMULATION_HISTORY), global_state.accumulation_history.encode());

    for (service_id, account) in global_state.service_accounts.iter() {

        state.map.insert(service_info(*service_id), account.info.encode());

        for (key, value) in account.storage.iter() {
            state.map.insert(StateKeyType::Storage(*service_id, *key).construct(version), value.clone());
        }

        for (hash, blob) in account.preimages.iter() {
            state.map.insert(StateKeyType::Preimage(*service_id, *hash).construct(version), blob.clone());
        }

        for ((hash, length), slots) in account.lookup.iter() {
            state.map.insert(StateKeyType::Lookup(*service_id, *hash, *length).construct(version), slots.encode_len());
        }
    }

    log::trace!("Serialized state into {} entries", state.map.len());

    return state;
}

/// The state commitment: the trie root of the serialized state.
pub fn state_root(global_state: &GlobalState, version: ProtocolVersion) -> StateRoot {
    merkle_root(&serialize(global_state, version))
}
