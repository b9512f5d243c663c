use thiserror::Error;

use constants::{ChainSpec, ProtocolVersion};
use constants::node::{
    ACCUMULATION_HISTORY, AUTH_POOLS, AUTH_QUEUE, AVAILABILITY, CURR_VALIDATORS, DISPUTES, ENTROPY, NEXT_VALIDATORS, PREV_VALIDATORS,
    MAX_LOOKUP_HISTORY_SLOTS, PRIVILEGES, READY_QUEUE, RECENT_HISTORY, SAFROLE, STATISTICS, TIME,
};
use jam_types::{
    Account, AccumulatedHistory, AuthPools, AuthQueues, AvailabilityAssignments, DisputesRecords, EntropyPool, GlobalState, OpaqueHash,
    Privileges, ReadError, ReadyQueue, RecentBlocks, Safrole, ServiceAccounts, ServiceId, ServiceInfo, StateKey, Statistics, StorageKey,
    TimeSlot, ValidatorSet, ValidatorsData,
};
use codec::{decode_all, decode_all_spec, BytesReader, Decode, DecodeLen, DecodeSpec};
use utils::serialization::{index, service_info, StateKeyTrait, StateKeyType};

use crate::{StateBackend, StorageError};

#[derive(Error, Debug)]
pub enum StateError {
    #[error("missing required state entry 0x{}", hex::encode(.0))]
    MissingEntry(StateKey),
    #[error("cannot decode state entry 0x{}: {error}", hex::encode(.key))]
    Decode { key: StateKey, error: ReadError },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read-only view over serialized state. Components are decoded on access: global components must
/// always be present, service-scoped entries may be absent.
pub struct SerializedState<B: StateBackend> {
    backend: B,
    spec: ChainSpec,
    version: ProtocolVersion,
}

impl<B: StateBackend> SerializedState<B> {

    pub fn new(backend: B, spec: ChainSpec, version: ProtocolVersion) -> Self {
        SerializedState { backend, spec, version }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn required(&self, key: &StateKey) -> Result<Vec<u8>, StateError> {
        match self.backend.get(key)? {
            Some(value) => Ok(value),
            None => {
                log::error!("Missing state entry 0x{}", hex::encode(key));
                Err(StateError::MissingEntry(*key))
            }
        }
    }

    fn component<T: Decode>(&self, tag: u8) -> Result<T, StateError> {
        let key = index(tag);
        let value = self.required(&key)?;
        decode_all::<T>(&value).map_err(|error| StateError::Decode { key, error })
    }

    fn component_spec<T: DecodeSpec>(&self, tag: u8) -> Result<T, StateError> {
        let key = index(tag);
        let value = self.required(&key)?;
        decode_all_spec::<T>(&value, &self.spec).map_err(|error| StateError::Decode { key, error })
    }

    pub fn auth_pools(&self) -> Result<AuthPools, StateError> {
        self.component_spec(AUTH_POOLS)
    }

    pub fn auth_queues(&self) -> Result<AuthQueues, StateError> {
        self.component_spec(AUTH_QUEUE)
    }

    pub fn recent_history(&self) -> Result<RecentBlocks, StateError> {
        self.component(RECENT_HISTORY)
    }

    pub fn safrole(&self) -> Result<Safrole, StateError> {
        self.component_spec(SAFROLE)
    }

    pub fn disputes(&self) -> Result<DisputesRecords, StateError> {
        self.component(DISPUTES)
    }

    pub fn entropy(&self) -> Result<EntropyPool, StateError> {
        self.component(ENTROPY)
    }

    pub fn validators(&self, set: ValidatorSet) -> Result<ValidatorsData, StateError> {
        match set {
            ValidatorSet::Previous => self.component_spec(PREV_VALIDATORS),
            ValidatorSet::Current => self.component_spec(CURR_VALIDATORS),
            ValidatorSet::Next => self.component_spec(NEXT_VALIDATORS),
        }
    }

    pub fn availability(&self) -> Result<AvailabilityAssignments, StateError> {
        self.component_spec(AVAILABILITY)
    }

    pub fn time(&self) -> Result<TimeSlot, StateError> {
        self.component(TIME)
    }

    pub fn privileges(&self) -> Result<Privileges, StateError> {
        self.component(PRIVILEGES)
    }

    pub fn statistics(&self) -> Result<Statistics, StateError> {
        self.component_spec(STATISTICS)
    }

    pub fn ready_queue(&self) -> Result<ReadyQueue, StateError> {
        self.component_spec(READY_QUEUE)
    }

    pub fn accumulation_history(&self) -> Result<AccumulatedHistory, StateError> {
        self.component_spec(ACCUMULATION_HISTORY)
    }

    pub fn service_info(&self, service: ServiceId) -> Result<Option<ServiceInfo>, StateError> {
        let key = service_info(service);
        match self.backend.get(&key)? {
            Some(value) => Ok(Some(decode_all::<ServiceInfo>(&value).map_err(|error| StateError::Decode { key, error })?)),
            None => Ok(None),
        }
    }

    pub fn storage(&self, service: ServiceId, storage_key: &StorageKey) -> Result<Option<Vec<u8>>, StateError> {
        let key = StateKeyType::Storage(service, *storage_key).construct(self.version);
        Ok(self.backend.get(&key)?)
    }

    pub fn preimage(&self, service: ServiceId, hash: &OpaqueHash) -> Result<Option<Vec<u8>>, StateError> {
        let key = StateKeyType::Preimage(service, *hash).construct(self.version);
        Ok(self.backend.get(&key)?)
    }

    pub fn lookup_history(&self, service: ServiceId, hash: &OpaqueHash, length: u32) -> Result<Option<Vec<TimeSlot>>, StateError> {

        let key = StateKeyType::Lookup(service, *hash, length).construct(self.version);

        match self.backend.get(&key)? {
            Some(value) => {
                let mut reader = BytesReader::new(&value);
                let slots = Vec::<TimeSlot>::decode_len(&mut reader).map_err(|error| StateError::Decode { key, error })?;
                if !reader.is_consumed() {
                    return Err(StateError::Decode { key, error: ReadError::InvalidData });
                }
                if slots.len() > MAX_LOOKUP_HISTORY_SLOTS {
                    log::error!("Lookup history of service {} holds {} slots", service, slots.len());
                    return Err(StateError::Decode { key, error: ReadError::InvalidData });
                }
                Ok(Some(slots))
            }
            None => Ok(None),
        }
    }

    /// Rebuilds the global state. Service dictionaries cannot be enumerated from hashed keys, so only
    /// the account info of the listed services is restored; their entries stay reachable through the
    /// point lookups above.
    pub fn to_chain_state(&self, service_ids: &[ServiceId]) -> Result<GlobalState, StateError> {

        let mut service_accounts = ServiceAccounts::new();

        for service in service_ids {
            if let Some(info) = self.service_info(*service)? {
                service_accounts.insert(*service, Account { info, ..Default::default() });
            } else {
                log::debug!("Service {} not found in serialized state", service);
            }
        }

        Ok(GlobalState {
            time: self.time()?,
            availability: self.availability()?,
            entropy: self.entropy()?,
            recent_history: self.recent_history()?,
            auth_pools: self.auth_pools()?,
            auth_queues: self.auth_queues()?,
            statistics: self.statistics()?,
            prev_validators: self.validators(ValidatorSet::Previous)?,
            curr_validators: self.validators(ValidatorSet::Current)?,
            next_validators: self.validators(ValidatorSet::Next)?,
            disputes: self.disputes()?,
            safrole: self.safrole()?,
            service_accounts,
            accumulation_history: self.accumulation_history()?,
            ready_queue: self.ready_queue()?,
            privileges: self.privileges()?,
        })
    }
}
