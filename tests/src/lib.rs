use once_cell::sync::Lazy;
use sp_core::{ed25519, Pair};

use constants::ChainSpec;
use jam_types::{ValidatorData, ValidatorsData};

mod keys;
mod trie;
mod assurances;
mod authorization;
mod preimages;
mod recent_history;
mod reports;
mod pipeline;

static LOGGER: Lazy<()> = Lazy::new(|| {
    dotenv::dotenv().ok();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).is_test(true).try_init();
});

pub fn init() {
    Lazy::force(&LOGGER);
}

pub fn validator_keys(spec: &ChainSpec) -> Vec<ed25519::Pair> {
    (0..spec.validators_count).map(|i| ed25519::Pair::from_seed(&[i as u8 + 1; 32])).collect()
}

pub fn validators_data(keys: &[ed25519::Pair]) -> ValidatorsData {
    ValidatorsData {
        list: keys
            .iter()
            .enumerate()
            .map(|(i, pair)| ValidatorData { bandersnatch: [i as u8; 32], ed25519: pair.public().0, ..Default::default() })
            .collect(),
    }
}

pub fn decode_hash(value: &str) -> [u8; 32] {
    let bytes = hex::decode(value.trim_start_matches("0x")).unwrap_or_else(|error| panic!("bad hex '{}': {}", value, error));
    bytes.try_into().unwrap_or_else(|bytes: Vec<u8>| panic!("expected 32 bytes, got {}", bytes.len()))
}
