use serde::Deserialize;

use crate::config::ConfigError;

pub mod node;
pub mod config;

pub const BUILD_PROFILE: &str = {
    #[cfg(feature = "full")]
    { "full" }
    #[cfg(all(feature = "tiny", not(feature = "full")))]
    { "tiny" }
    #[cfg(not(any(feature = "tiny", feature = "full")))]
    { "unknown" }
};

/// Chain parameters which size every per-core, per-validator and per-epoch collection.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSpec {
    // Total number of validators
    pub validators_count: usize,
    // Total number of cores
    pub cores_count: usize,
    // The length of an epoch in timeslots
    pub epoch_length: usize,
    // The rotation period of validator-core assignments, in timeslots
    pub rotation_period: u32,
}

impl ChainSpec {

    pub const TINY: ChainSpec = ChainSpec {
        validators_count: 6,
        cores_count: 2,
        epoch_length: 12,
        rotation_period: 4,
    };

    pub const FULL: ChainSpec = ChainSpec {
        validators_count: 1023,
        cores_count: 341,
        epoch_length: 600,
        rotation_period: 10,
    };

    /// The preset selected by the enabled cargo feature.
    pub const fn build_default() -> ChainSpec {
        #[cfg(feature = "full")]
        { ChainSpec::FULL }
        #[cfg(not(feature = "full"))]
        { ChainSpec::TINY }
    }

    /// Parses a chain spec. Every parameter is a divisor or a collection size somewhere, so zero is rejected.
    pub fn from_json(json: &str) -> Result<ChainSpec, ConfigError> {
        let spec: ChainSpec = serde_json::from_str(json)?;
        for (name, value) in [
            ("validators_count", spec.validators_count),
            ("cores_count", spec.cores_count),
            ("epoch_length", spec.epoch_length),
            ("rotation_period", spec.rotation_period as usize),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroParameter(name));
            }
        }
        Ok(spec)
    }

    // Validator super majority
    pub fn super_majority(&self) -> usize {
        (self.validators_count * 2) / 3 + 1
    }

    // Available bitfield bytes
    pub fn avail_bitfield_bytes(&self) -> usize {
        (self.cores_count + 7) / 8
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        ChainSpec::build_default()
    }
}

/// Selects the state-key layout. Old state snapshots and test vectors were produced with
/// the legacy layout, where storage and preimage keys are not hashed.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    Legacy,
    #[default]
    Current,
}
