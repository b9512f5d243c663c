use crate::{
    AccumulatedHistory, AuthPools, AuthQueues, AvailabilityAssignments, DisputesRecords, EntropyPool, OpaqueHash, Privileges, ReadyQueue,
    RecentBlocks, Safrole, ServiceId, ServiceInfo, Statistics, StorageKey, TimeSlot, ValidatorsData,
};

/// A diff over the global state. Every sub-transition returns one of these and the state controller
/// applies them in pipeline order. Unset components are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateUpdate {
    pub time: Option<TimeSlot>,
    pub availability: Option<AvailabilityAssignments>,
    pub entropy: Option<EntropyPool>,
    pub recent_history: Option<RecentBlocks>,
    pub auth_pools: Option<AuthPools>,
    pub auth_queues: Option<AuthQueues>,
    pub statistics: Option<Statistics>,
    pub prev_validators: Option<ValidatorsData>,
    pub curr_validators: Option<ValidatorsData>,
    pub next_validators: Option<ValidatorsData>,
    pub disputes: Option<DisputesRecords>,
    pub safrole: Option<Safrole>,
    pub accumulation_history: Option<AccumulatedHistory>,
    pub ready_queue: Option<ReadyQueue>,
    pub privileges: Option<Privileges>,
    pub services: ServicesUpdate,
}

/// Services are a dictionary, so they are updated through explicit lists instead of a plain overwrite.
/// Lists are applied in field order: removals, account updates, preimages, storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServicesUpdate {
    pub removed: Vec<ServiceId>,
    pub updated: Vec<ServiceUpdate>,
    pub preimages: Vec<PreimageUpdate>,
    pub storage: Vec<StorageUpdate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceUpdate {
    Create { service: ServiceId, info: ServiceInfo },
    Update { service: ServiceId, info: ServiceInfo },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreimageUpdate {
    // Store the blob and set its lookup history to a single entry
    Provide { service: ServiceId, hash: OpaqueHash, blob: Vec<u8>, slot: TimeSlot },
    // Drop the blob and its lookup history
    Remove { service: ServiceId, hash: OpaqueHash, length: u32 },
    // Overwrite the lookup history of an entry
    UpdateLookup { service: ServiceId, hash: OpaqueHash, length: u32, slots: Vec<TimeSlot> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageUpdate {
    Set { service: ServiceId, key: StorageKey, value: Vec<u8> },
    Remove { service: ServiceId, key: StorageKey },
}

/// The successful result of a sub-transition: its protocol output plus the state diff it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    pub output: T,
    pub update: StateUpdate,
}

impl StateUpdate {

    pub fn is_empty(&self) -> bool {
        *self == StateUpdate::default()
    }
}

impl ServicesUpdate {

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty() && self.preimages.is_empty() && self.storage.is_empty()
    }
}
