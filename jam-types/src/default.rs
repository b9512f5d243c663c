use std::collections::VecDeque;

use constants::ChainSpec;
use constants::node::MAX_ITEMS_AUTHORIZATION_QUEUE;
use crate::{
    AccumulatedHistory, ActivityRecord, AuthPools, AuthQueues, AvailabilityAssignments, BandersnatchPublic, BlsPublic, Block,
    DisputesExtrinsic, Ed25519Public, EntropyPool, Extrinsic, GlobalState, Header, Metadata, OpaqueHash, Privileges, ReadyQueue, RecentBlocks,
    RefineContext, Safrole, ServiceAccounts, Statistics, TicketsOrKeys, ValidatorData, ValidatorStatistics, ValidatorsData, WorkPackageSpec,
    WorkReport,
};

impl GlobalState {

    /// Canonical empty state, every fixed-size collection sized from the chain spec.
    pub fn genesis(spec: &ChainSpec) -> Self {
        GlobalState {
            time: 0,
            availability: AvailabilityAssignments::new(spec),
            entropy: EntropyPool::default(),
            recent_history: RecentBlocks::default(),
            auth_pools: AuthPools::new(spec),
            auth_queues: AuthQueues::new(spec),
            statistics: Statistics::new(spec),
            prev_validators: ValidatorsData::new(spec),
            curr_validators: ValidatorsData::new(spec),
            next_validators: ValidatorsData::new(spec),
            disputes: Default::default(),
            safrole: Safrole::new(spec),
            service_accounts: ServiceAccounts::default(),
            accumulation_history: AccumulatedHistory::new(spec),
            ready_queue: ReadyQueue::new(spec),
            privileges: Privileges::default(),
        }
    }
}
// ----------------------------------------------------------------------------------------------------------
// Block
// ----------------------------------------------------------------------------------------------------------
impl Default for Block {
    fn default() -> Self {
        Self { header: Header::default(), extrinsic: Extrinsic::default() }
    }
}

impl Default for Extrinsic {
    fn default() -> Self {
        Extrinsic {
            tickets: Vec::new(),
            preimages: Vec::new(),
            guarantees: Vec::new(),
            assurances: Vec::new(),
            disputes: DisputesExtrinsic::default(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self {
            parent: OpaqueHash::default(),
            parent_state_root: OpaqueHash::default(),
            extrinsic_hash: OpaqueHash::default(),
            slot: 0,
            epoch_mark: None,
            tickets_mark: None,
            offenders_mark: Vec::new(),
            author_index: 0,
            entropy_source: [0u8; 96],
            seal: [0u8; 96],
        }
    }
}

impl Default for WorkReport {
    fn default() -> Self {
        WorkReport {
            package_spec: WorkPackageSpec::default(),
            context: RefineContext::default(),
            core_index: 0,
            authorizer_hash: OpaqueHash::default(),
            auth_output: Vec::new(),
            segment_root_lookup: Vec::new(),
            results: Vec::new(),
            auth_gas_used: 0,
        }
    }
}
// ----------------------------------------------------------------------------------------------------------
// Per-core, per-validator and per-epoch components
// ----------------------------------------------------------------------------------------------------------
impl AvailabilityAssignments {
    pub fn new(spec: &ChainSpec) -> Self {
        AvailabilityAssignments { list: vec![None; spec.cores_count] }
    }
}

impl AuthPools {
    pub fn new(spec: &ChainSpec) -> Self {
        AuthPools(vec![VecDeque::new(); spec.cores_count])
    }
}

impl AuthQueues {
    pub fn new(spec: &ChainSpec) -> Self {
        AuthQueues(vec![vec![OpaqueHash::default(); MAX_ITEMS_AUTHORIZATION_QUEUE]; spec.cores_count])
    }
}

impl Default for ValidatorData {
    fn default() -> Self {
        ValidatorData {
            bandersnatch: [0u8; std::mem::size_of::<BandersnatchPublic>()],
            ed25519: [0u8; std::mem::size_of::<Ed25519Public>()],
            bls: [0u8; std::mem::size_of::<BlsPublic>()],
            metadata: [0u8; std::mem::size_of::<Metadata>()],
        }
    }
}

impl ValidatorsData {
    pub fn new(spec: &ChainSpec) -> Self {
        ValidatorsData { list: vec![ValidatorData::default(); spec.validators_count] }
    }
}

impl Statistics {
    pub fn new(spec: &ChainSpec) -> Self {
        let records = ValidatorStatistics { records: vec![ActivityRecord::default(); spec.validators_count] };
        Statistics { curr: records.clone(), prev: records }
    }
}

impl Safrole {
    pub fn new(spec: &ChainSpec) -> Self {
        Safrole {
            pending_validators: ValidatorsData::new(spec),
            epoch_root: [0u8; 144],
            seal: TicketsOrKeys::Keys(vec![BandersnatchPublic::default(); spec.epoch_length]),
            ticket_accumulator: Vec::new(),
        }
    }
}

impl ReadyQueue {
    pub fn new(spec: &ChainSpec) -> Self {
        ReadyQueue { queue: vec![Vec::new(); spec.epoch_length] }
    }
}

impl AccumulatedHistory {
    pub fn new(spec: &ChainSpec) -> Self {
        AccumulatedHistory { queue: vec![Vec::new(); spec.epoch_length] }
    }
}
