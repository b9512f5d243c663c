// The size of the on-chain entropy pool
pub const ENTROPY_POOL_SIZE: usize = 4;
// The size of recent history in blocks
pub const RECENT_HISTORY_SIZE: usize = 8;
// The maximum number of items in the authorizations pool.
pub const MAX_ITEMS_AUTHORIZATION_POOL: usize = 8;
// The number of items in the authorizations queue.
pub const MAX_ITEMS_AUTHORIZATION_QUEUE: usize = 80;
// The maximum sum of dependency items in a work-report.
pub const MAX_DEPENDENCY_ITEMS: usize = 8;
// The maximum amount of work items in a package.
pub const MAX_WORK_ITEMS: usize = 16;
// The maximum total size of all output blobs in a work-report, in octets
pub const MAX_OUTPUT_BLOB_SIZE: usize = 48 << 10;
// The gas allocated to invoke a work-report's Accumulation logic
pub const WORK_REPORT_GAS_LIMIT: u64 = 10_000_000;
// The maximum age in timeslots of the lookup anchor.
pub const MAX_AGE_LOOKUP_ANCHOR: u32 = 14_400;
// The period in timeslots after which reported but unavailable work may be replaced.
pub const REPORTED_WORK_REPLACEMENT_PERIOD: u32 = 5;
// Maximum number of recorded slots in a lookup history entry
pub const MAX_LOOKUP_HISTORY_SLOTS: usize = 3;
// Minimum and maximum number of credentials in a guarantee
pub const MIN_GUARANTORS: usize = 2;
pub const MAX_GUARANTORS: usize = 3;

// Signing contexts
pub const JAM_AVAILABLE: &[u8] = b"jam_available";
pub const JAM_GUARANTEE: &[u8] = b"jam_guarantee";

// Service-scoped key prefixes
pub const STORAGE_PREFIX: u32 = u32::MAX;
pub const PREIMAGE_PREFIX: u32 = u32::MAX - 1;

// JAM global state constants
pub const AUTH_POOLS: u8 = 1;
pub const AUTH_QUEUE: u8 = 2;
pub const RECENT_HISTORY: u8 = 3;
pub const SAFROLE: u8 = 4;
pub const DISPUTES: u8 = 5;
pub const ENTROPY: u8 = 6;
pub const NEXT_VALIDATORS: u8 = 7;
pub const CURR_VALIDATORS: u8 = 8;
pub const PREV_VALIDATORS: u8 = 9;
pub const AVAILABILITY: u8 = 10;
pub const TIME: u8 = 11;
pub const PRIVILEGES: u8 = 12;
pub const STATISTICS: u8 = 13;
pub const READY_QUEUE: u8 = 14;
pub const ACCUMULATION_HISTORY: u8 = 15;
pub const SERVICE_INFO: u8 = 255;

pub const GLOBAL_COMPONENTS: [u8; 15] = [
    AUTH_POOLS, AUTH_QUEUE, RECENT_HISTORY, SAFROLE, DISPUTES, ENTROPY, NEXT_VALIDATORS, CURR_VALIDATORS,
    PREV_VALIDATORS, AVAILABILITY, TIME, PRIVILEGES, STATISTICS, READY_QUEUE, ACCUMULATION_HISTORY,
];
