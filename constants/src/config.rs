use std::path::Path;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::{ChainSpec, ProtocolVersion};

pub const CHAIN_SPEC_VAR: &str = "JAM_CHAIN_SPEC";
pub const PROTOCOL_VERSION_VAR: &str = "JAM_PROTOCOL_VERSION";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown protocol version '{0}'")]
    UnknownProtocolVersion(String),
    #[error("failed to read chain spec file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid chain spec: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chain spec parameter {0} must be non-zero")]
    ZeroParameter(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub chain_spec: ChainSpec,
    pub protocol_version: ProtocolVersion,
}

impl Config {

    /// Loads `.env` (if any) and reads the chain parameters and key layout from the environment.
    /// Unset variables fall back to the build profile and the current key layout.
    pub fn from_env() -> Result<Config, ConfigError> {

        let _ = dotenv::dotenv();

        let chain_spec = match std::env::var(CHAIN_SPEC_VAR) {
            Ok(value) => parse_chain_spec(&value)?,
            Err(_) => ChainSpec::build_default(),
        };

        let protocol_version = match std::env::var(PROTOCOL_VERSION_VAR) {
            Ok(value) => parse_protocol_version(&value)?,
            Err(_) => ProtocolVersion::default(),
        };

        log::info!("Chain spec: {:?}, protocol version: {:?} (build profile {})", chain_spec, protocol_version, crate::BUILD_PROFILE);

        Ok(Config { chain_spec, protocol_version })
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env().unwrap_or_else(|error| {
        log::warn!("Invalid environment configuration ({}), using build defaults", error);
        Config::default()
    })
});

/// Process-wide configuration, read from the environment on first use.
pub fn config() -> &'static Config {
    &CONFIG
}

fn parse_chain_spec(value: &str) -> Result<ChainSpec, ConfigError> {
    match value {
        "tiny" => Ok(ChainSpec::TINY),
        "full" => Ok(ChainSpec::FULL),
        path => {
            let json = std::fs::read_to_string(Path::new(path))?;
            ChainSpec::from_json(&json)
        }
    }
}

fn parse_protocol_version(value: &str) -> Result<ProtocolVersion, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "legacy" => Ok(ProtocolVersion::Legacy),
        "current" => Ok(ProtocolVersion::Current),
        other => Err(ConfigError::UnknownProtocolVersion(other.to_string())),
    }
}
