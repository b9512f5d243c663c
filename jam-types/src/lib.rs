mod default;
mod update;
// JAM Protocol Types
use std::collections::{BTreeMap, HashMap, VecDeque};
use serde::Deserialize;
use thiserror::Error;

use constants::node::ENTROPY_POOL_SIZE;

pub use update::{PreimageUpdate, ServiceUpdate, ServicesUpdate, StateUpdate, StorageUpdate, Transition};
// ----------------------------------------------------------------------------------------------------------
// Crypto
// ----------------------------------------------------------------------------------------------------------
pub type Ed25519Public = [u8; 32];
pub type BlsPublic = [u8; 144];
pub type BandersnatchPublic = [u8; 32];

pub type BandersnatchRingVrfSignature = [u8; 784];
pub type BandersnatchVrfSignature = [u8; 96];
pub type Ed25519Signature = [u8; 64];

pub type BandersnatchRingCommitment = [u8; 144];
// ----------------------------------------------------------------------------------------------------------
// Application Specific Core
// ----------------------------------------------------------------------------------------------------------
pub type OpaqueHash = [u8; 32];
pub type Metadata = [u8; 128];

pub type TimeSlot = u32;
pub type ValidatorIndex = u16;
pub type CoreIndex = u16;
pub type ServiceId = u32;

pub type Hash = OpaqueHash;
pub type HeaderHash = OpaqueHash;
pub type StateRoot = OpaqueHash;
pub type WorkPackageHash = OpaqueHash;
pub type WorkReportHash = OpaqueHash;
pub type ExportsRoot = OpaqueHash;
pub type AuthorizerHash = OpaqueHash;
pub type AccumulateRoot = OpaqueHash;

pub type Gas = u64;
pub type Balance = u64;
// ----------------------------------------------------------------------------------------------------------
// State keys
// ----------------------------------------------------------------------------------------------------------
pub type StateKey = [u8; 32];
pub type StorageKey = OpaqueHash;

/// The flattened projection of the state, built fresh whenever a root must be computed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateEntries {
    pub map: HashMap<StateKey, Vec<u8>>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    #[error("Not enough data to decode.")]
    NotEnoughData,
    #[error("Invalid data encountered during decoding.")]
    InvalidData,
    #[error("Error occurred during data conversion.")]
    ConversionError,
}
// ----------------------------------------------------------------------------------------------------------
// Block
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    pub header: Header,
    pub extrinsic: Extrinsic,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Header {
    pub parent: HeaderHash,
    pub parent_state_root: StateRoot,
    pub extrinsic_hash: OpaqueHash,
    pub slot: TimeSlot,
    pub epoch_mark: Option<EpochMark>,
    pub tickets_mark: Option<TicketsMark>,
    pub offenders_mark: Vec<Ed25519Public>,
    pub author_index: ValidatorIndex,
    pub entropy_source: BandersnatchVrfSignature,
    pub seal: BandersnatchVrfSignature,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Extrinsic {
    // Tickets, used for the mechanism which manages the selection of validators for the permissioning of block authoring.
    pub tickets: Vec<Ticket>,
    // Static data which is presently being requested to be available for workloads to be able to fetch on demand.
    pub preimages: Vec<Preimage>,
    // Reports of newly completed workloads whose accuracy is guaranteed by specific validators.
    pub guarantees: Vec<Guarantee>,
    // Assurances by each validator concerning which of the input data of workloads they have correctly received and are storing locally.
    pub assurances: Vec<Assurance>,
    // Votes, by validators, on dispute(s) arising between them presently taking place.
    pub disputes: DisputesExtrinsic,
}

// The epoch marker specifies key and entropy relevant to the following epoch in case the ticket
// contest does not complete adequately.
#[derive(Debug, PartialEq, Clone)]
pub struct EpochMark {
    pub entropy: OpaqueHash,
    pub tickets_entropy: OpaqueHash,
    pub validators: Vec<(BandersnatchPublic, Ed25519Public)>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TicketsMark {
    pub tickets: Vec<TicketBody>,
}
// ----------------------------------------------------------------------------------------------------------
// Entropy
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntropyPool {
    pub buf: [OpaqueHash; ENTROPY_POOL_SIZE],
}
// ----------------------------------------------------------------------------------------------------------
// Validators
// ----------------------------------------------------------------------------------------------------------
/// This is a combination of a set of cryptographic public keys and metadata which is an opaque octet sequence,
/// but utilized to specify practical identifiers for the validator, not least a hardware address. The set of
/// validator keys itself is equivalent to the set of 336-octet sequences.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValidatorData {
    // The Bandersnatch key is equivalent to the first 32 octets
    pub bandersnatch: BandersnatchPublic,
    // The Ed25519 is the second 32 octets
    pub ed25519: Ed25519Public,
    // The bls key is equivalent to the following 144 octets
    pub bls: BlsPublic,
    // The metadata is the last 128 octets
    pub metadata: Metadata,
}

/// One entry per validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorsData {
    pub list: Vec<ValidatorData>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValidatorSet {
    Previous,
    Current,
    Next,
}
// ----------------------------------------------------------------------------------------------------------
// Availability Assignments
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityAssignment {
    pub report: WorkReport,
    pub timeout: TimeSlot,
}

pub type AvailabilityAssignmentsItem = Option<AvailabilityAssignment>;

/// One slot per core.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityAssignments {
    pub list: Vec<AvailabilityAssignmentsItem>,
}
// ----------------------------------------------------------------------------------------------------------
// Refine Context
// ----------------------------------------------------------------------------------------------------------
// A refinement context describes the context of the chain at the point that the report's
// corresponding work-package was evaluated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RefineContext {
    // Anchor block header hash
    pub anchor: OpaqueHash,
    // Posterior block state root
    pub state_root: OpaqueHash,
    // Posterior BEEFY root
    pub beefy_root: OpaqueHash,
    // Lookup anchor header hash
    pub lookup_anchor: OpaqueHash,
    // Lookup anchor timeslot
    pub lookup_anchor_slot: TimeSlot,
    // Sequence of hashes of any prerequisite work packages
    pub prerequisites: Vec<OpaqueHash>,
}
// ----------------------------------------------------------------------------------------------------------
// Authorizations
// ----------------------------------------------------------------------------------------------------------
pub type AuthPool = VecDeque<AuthorizerHash>;
pub type AuthQueue = Vec<AuthorizerHash>;

/// One bounded pool per core.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPools(pub Vec<AuthPool>);

/// One fixed ring of MAX_ITEMS_AUTHORIZATION_QUEUE hashes per core.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthQueues(pub Vec<AuthQueue>);

#[derive(Debug, Clone, PartialEq)]
pub struct CodeAuthorizer {
    pub core: CoreIndex,
    pub auth_hash: AuthorizerHash,
}
// ----------------------------------------------------------------------------------------------------------
// Work Report
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkPackageSpec {
    // Work package hash
    pub hash: WorkPackageHash,
    // Work bundle length
    pub length: u32,
    // Erasure root
    pub erasure_root: OpaqueHash,
    // Segment root
    pub exports_root: ExportsRoot,
    // Segment count
    pub exports_count: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRootLookupItem {
    pub work_package_hash: WorkPackageHash,
    pub segment_tree_root: OpaqueHash,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkReport {
    // Work package specification
    pub package_spec: WorkPackageSpec,
    // Refine context
    pub context: RefineContext,
    // Core index
    pub core_index: CoreIndex,
    // Authorizer hash
    pub authorizer_hash: AuthorizerHash,
    // Authorization output
    pub auth_output: Vec<u8>,
    // Segment root lookup dictionary
    pub segment_root_lookup: Vec<SegmentRootLookupItem>,
    // Sequence of work results of the evaluation of each of the items in the package together with some associated data
    pub results: Vec<WorkResult>,
    // Gas used
    pub auth_gas_used: Gas,
}

// The Work Result is the data conduit by which services states may be altered through the computation done within a work-package.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkResult {
    // Index of the service whose state is to be altered and thus whose refine code was already executed
    pub service: ServiceId,
    // Hash of the code service at the time of being reported
    pub code_hash: OpaqueHash,
    // Hash of the payload within the work item which was executed in the refine stage to give this result
    pub payload_hash: OpaqueHash,
    // Gas limit for executing this item's accumulate
    pub accumulate_gas: Gas,
    // Output blob or error of the refine execution
    pub result: WorkExecResult,
    // Level of activity which this workload imposed on the core in bringing the result to bear
    pub refine_load: RefineLoad,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RefineLoad {
    // Gas used during refinement
    pub gas_used: Gas,
    // Number of segments imported from DA
    pub imports: u16,
    // Number of the extrinsics used in computing the workload
    pub extrinsic_count: u16,
    // Total size in octets of the extrinsics used in computing the workload
    pub extrinsic_size: u32,
    // Number of segments exported into DA
    pub exports: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkExecResult {
    Ok(Vec<u8>),
    Error(WorkExecError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkExecError {
    OutOfGas = 1,
    Panic = 2,
    BadNumberExports = 3,
    BadCode = 4,
    CodeOversize = 5,
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord)]
pub struct ReportedPackage {
    pub work_package_hash: WorkPackageHash,
    pub segment_tree_root: ExportsRoot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputDataReports {
    pub reported: Vec<ReportedPackage>,
    pub reporters: Vec<Ed25519Public>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportErrorCode {
    #[error("bad core index")]
    BadCoreIndex = 0,
    #[error("future report slot")]
    FutureReportSlot = 1,
    #[error("report epoch before last")]
    ReportEpochBeforeLast = 2,
    #[error("insufficient guarantees")]
    InsufficientGuarantees = 3,
    #[error("out of order guarantee")]
    OutOfOrderGuarantee = 4,
    #[error("not sorted or unique guarantors")]
    NotSortedOrUniqueGuarantors = 5,
    #[error("wrong assignment")]
    WrongAssignment = 6,
    #[error("core engaged")]
    CoreEngaged = 7,
    #[error("anchor not recent")]
    AnchorNotRecent = 8,
    #[error("bad service id")]
    BadServiceId = 9,
    #[error("bad code hash")]
    BadCodeHash = 10,
    #[error("dependency missing")]
    DependencyMissing = 11,
    #[error("duplicate package")]
    DuplicatePackage = 12,
    #[error("bad state root")]
    BadStateRoot = 13,
    #[error("bad beefy mmr root")]
    BadBeefyMmrRoot = 14,
    #[error("core unauthorized")]
    CoreUnauthorized = 15,
    #[error("bad validator index")]
    BadValidatorIndex = 16,
    #[error("work report gas too high")]
    WorkReportGasTooHigh = 17,
    #[error("service item gas too low")]
    ServiceItemGasTooLow = 18,
    #[error("too many dependencies")]
    TooManyDependencies = 19,
    #[error("segment root lookup invalid")]
    SegmentRootLookupInvalid = 20,
    #[error("bad signature")]
    BadSignature = 21,
    #[error("work report too big")]
    WorkReportTooBig = 22,
    #[error("no results")]
    NoResults = 23,
    #[error("too many results")]
    TooManyResults = 24,
}
// ----------------------------------------------------------------------------------------------------------
// Recent History
// ----------------------------------------------------------------------------------------------------------
pub type MmrPeak = Option<Hash>;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Mmr {
    pub peaks: Vec<MmrPeak>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockInfo {
    // Block's header hash
    pub header_hash: HeaderHash,
    // Accumulation-result mmr
    pub mmr: Mmr,
    // Block's posterior state root. Zero until patched by the next block
    pub state_root: StateRoot,
    // Work packages reported in this block, sorted by hash
    pub reported: Vec<ReportedPackage>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct RecentBlocks {
    pub history: VecDeque<BlockInfo>,
}
// ----------------------------------------------------------------------------------------------------------
// Statistics
// ----------------------------------------------------------------------------------------------------------
#[derive(Clone, Debug, PartialEq, Copy, Default)]
pub struct ActivityRecord {
    pub blocks: u32,
    pub tickets: u32,
    pub preimages: u32,
    pub preimages_size: u32,
    pub guarantees: u32,
    pub assurances: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatorStatistics {
    pub records: Vec<ActivityRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
    pub curr: ValidatorStatistics,
    pub prev: ValidatorStatistics,
}
// ----------------------------------------------------------------------------------------------------------
// Tickets
// ----------------------------------------------------------------------------------------------------------
pub type TicketId = OpaqueHash;
pub type TicketAttempt = u8;

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub attempt: TicketAttempt,
    pub signature: BandersnatchRingVrfSignature,
}

#[derive(Debug, Clone, PartialEq, Ord, PartialOrd, Eq, Default)]
pub struct TicketBody {
    pub id: TicketId,
    pub attempt: TicketAttempt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TicketsOrKeys {
    Tickets(Vec<TicketBody>),
    Keys(Vec<BandersnatchPublic>),
}
// ----------------------------------------------------------------------------------------------------------
// Safrole
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct Safrole {
    // The set of keys which will be active in the next epoch
    pub pending_validators: ValidatorsData,
    // Bandersnatch ring root composed with the one Bandersnatch key of each of the next epoch's validators
    pub epoch_root: BandersnatchRingCommitment,
    // Current epoch's slot-sealer series
    pub seal: TicketsOrKeys,
    // Sequence of highest-scoring ticket identifiers to be used for the next epoch
    pub ticket_accumulator: Vec<TicketBody>,
}
// ----------------------------------------------------------------------------------------------------------
// Disputes
// ----------------------------------------------------------------------------------------------------------
// The disputes state includes four items, three of which concern verdicts. Every set is sorted and duplicate-free.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisputesRecords {
    pub good: Vec<WorkReportHash>,
    pub bad: Vec<WorkReportHash>,
    pub wonky: Vec<WorkReportHash>,
    // Ed25519 keys of validators found to have misjudged a work report
    pub offenders: Vec<Ed25519Public>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisputesExtrinsic {
    pub verdicts: Vec<Verdict>,
    pub culprits: Vec<Culprit>,
    pub faults: Vec<Fault>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub target: OpaqueHash,
    pub age: u32,
    pub votes: Vec<Judgement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Culprit {
    pub target: OpaqueHash,
    pub key: Ed25519Public,
    pub signature: Ed25519Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub target: OpaqueHash,
    pub vote: bool,
    pub key: Ed25519Public,
    pub signature: Ed25519Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Judgement {
    pub vote: bool,
    pub index: ValidatorIndex,
    pub signature: Ed25519Signature,
}
// ----------------------------------------------------------------------------------------------------------
// Service Accounts
// ----------------------------------------------------------------------------------------------------------
pub type ServiceAccounts = HashMap<ServiceId, Account>;
/// Lookup history entries are keyed by preimage hash and length.
pub type LookupKey = (OpaqueHash, u32);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Account {
    pub info: ServiceInfo,
    // Storage dictionary
    pub storage: HashMap<StorageKey, Vec<u8>>,
    // Preimages dictionary
    pub preimages: HashMap<OpaqueHash, Vec<u8>>,
    // Lookup dictionary. At most three slots per entry
    pub lookup: HashMap<LookupKey, Vec<TimeSlot>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ServiceInfo {
    // Code hash
    pub code_hash: OpaqueHash,
    // Account balance
    pub balance: Balance,
    // Minimum gas required in order to execute the accumulate entry-point of the service's code
    pub acc_min_gas: Gas,
    // Minimum gas required for the on transfer entry-point
    pub xfer_min_gas: Gas,
    // Number of octets in the storage
    pub bytes: u64,
    // Number of items in the storage
    pub items: u32,
}
// ----------------------------------------------------------------------------------------------------------
// Privileges
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Privileges {
    // Index of the manager service
    pub bless: ServiceId,
    // Index of service able to alter the authorizer queue state component
    pub assign: ServiceId,
    // Index of service able to alter the next validators state component
    pub designate: ServiceId,
    // Services which automatically accumulate in each block with a basic amount of gas
    pub always_acc: BTreeMap<ServiceId, Gas>,
}
// ----------------------------------------------------------------------------------------------------------
// Accumulation
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyRecord {
    pub report: WorkReport,
    pub dependencies: Vec<WorkPackageHash>,
}

/// One list per epoch slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyQueue {
    pub queue: Vec<Vec<ReadyRecord>>,
}

/// One list of accumulated work packages per epoch slot.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedHistory {
    pub queue: Vec<Vec<WorkPackageHash>>,
}
// ----------------------------------------------------------------------------------------------------------
// Preimages
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, PartialEq, Eq, Clone, PartialOrd, Ord, std::hash::Hash)]
pub struct Preimage {
    pub requester: ServiceId,
    pub blob: Vec<u8>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreimagesErrorCode {
    #[error("preimage unneeded")]
    PreimageUnneeded = 0,
    #[error("preimages not sorted or unique")]
    PreimagesNotSortedUnique = 1,
    #[error("account not found")]
    AccountNotFound = 2,
}
// ----------------------------------------------------------------------------------------------------------
// Assurances
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct Assurance {
    // Assurance anchor hash must be the parent header
    pub anchor: OpaqueHash,
    // One bit per core. A set bit implies that the validator assures they are contributing to its availability
    pub bitfield: Vec<u8>,
    // Index of validator who is assuring
    pub validator_index: ValidatorIndex,
    // Validator Ed25519 signature
    pub signature: Ed25519Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputDataAssurances {
    pub reported: Vec<WorkReport>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssurancesErrorCode {
    #[error("assurance anchor is not the parent header")]
    InvalidAnchor = 0,
    #[error("assurers not sorted or unique")]
    InvalidOrder = 1,
    #[error("no report pending on assured core")]
    NoReportPending = 2,
    #[error("invalid assurance signature")]
    InvalidSignature = 3,
    #[error("invalid validator index")]
    InvalidValidatorIndex = 4,
}
// ----------------------------------------------------------------------------------------------------------
// Guarantees
// ----------------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorSignature {
    pub validator_index: ValidatorIndex,
    pub signature: Ed25519Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guarantee {
    pub report: WorkReport,
    pub slot: TimeSlot,
    pub signatures: Vec<ValidatorSignature>,
}
// ----------------------------------------------------------------------------------------------------------
// Global state
// ----------------------------------------------------------------------------------------------------------
/// The chain state. Owned by the state controller and mutated once per block.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalState {
    pub time: TimeSlot,
    pub availability: AvailabilityAssignments,
    pub entropy: EntropyPool,
    pub recent_history: RecentBlocks,
    pub auth_pools: AuthPools,
    pub auth_queues: AuthQueues,
    pub statistics: Statistics,
    pub prev_validators: ValidatorsData,
    pub curr_validators: ValidatorsData,
    pub next_validators: ValidatorsData,
    pub disputes: DisputesRecords,
    pub safrole: Safrole,
    pub service_accounts: ServiceAccounts,
    pub accumulation_history: AccumulatedHistory,
    pub ready_queue: ReadyQueue,
    pub privileges: Privileges,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error("read error: {0}")]
    ReadError(#[from] ReadError),
    #[error("assurances error: {0}")]
    AssurancesError(AssurancesErrorCode),
    #[error("preimages error: {0}")]
    PreimagesError(PreimagesErrorCode),
    #[error("report error: {0}")]
    ReportError(ReportErrorCode),
    #[error("external transition error: {0}")]
    External(String),
}
