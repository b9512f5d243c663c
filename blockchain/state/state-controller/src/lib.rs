/*
    Our state may be logically partitioned into several largely independent segments. The state controller owns the
    one live copy of it and is the only component which mutates it: every sub-transition reads the components it needs
    and returns the diff it produced, which is applied before the next stage runs.

    The stages of a block run strictly in this order:

        assurances -> authorization -> preimages -> entropy/safrole -> statistics -> disputes -> reports -> recent history

    The first stage to fail halts the block. Earlier stages are not rolled back: callers which need the state of the
    parent block after a failure must keep their own copy.
*/

use sp_core::blake2_256;
use thiserror::Error;

use constants::{ChainSpec, ProtocolVersion};
use constants::config::config;
use jam_types::{
    Block, CodeAuthorizer, GlobalState, Header, HeaderHash, OutputDataAssurances, OutputDataReports, ProcessError, StateRoot,
    StateUpdate,
};
use codec::Encode;
use storage::HeaderChain;
use utils::serialization::state_root;

mod apply;
pub mod hooks;

pub use apply::apply_update;
pub use hooks::{BlockHooks, NoHooks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Assurances,
    Authorization,
    Preimages,
    Entropy,
    Statistics,
    Disputes,
    Reports,
    RecentHistory,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{stage:?} stage failed: {error}")]
pub struct PipelineError {
    pub stage: Stage,
    pub error: ProcessError,
}

/// What a successfully imported block produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockOutput {
    pub header_hash: HeaderHash,
    pub available: OutputDataAssurances,
    pub reported: OutputDataReports,
}

pub fn header_hash(header: &Header) -> HeaderHash {
    blake2_256(&header.encode())
}

pub struct StateController {
    state: GlobalState,
    spec: ChainSpec,
    version: ProtocolVersion,
}

impl StateController {

    pub fn new(state: GlobalState, spec: ChainSpec, version: ProtocolVersion) -> Self {
        StateController { state, spec, version }
    }

    /// Controller for the chain parameters and key layout configured in the environment.
    pub fn from_config(state: GlobalState) -> Self {
        let config = config();
        StateController::new(state, config.chain_spec, config.protocol_version)
    }

    pub fn state(&self) -> &GlobalState {
        &self.state
    }

    pub fn into_state(self) -> GlobalState {
        self.state
    }

    pub fn spec(&self) -> &ChainSpec {
        &self.spec
    }

    pub fn state_root(&self) -> StateRoot {
        state_root(&self.state, self.version)
    }

    fn stage<T>(stage: Stage, result: Result<T, ProcessError>) -> Result<T, PipelineError> {
        result.map_err(|error| {
            log::error!("Stage {:?} failed: {}", stage, error);
            PipelineError { stage, error }
        })
    }

    pub fn apply<H: BlockHooks>(&mut self, block: &Block, hooks: &mut H, chain: &dyn HeaderChain) -> Result<BlockOutput, PipelineError> {

        let header = &block.header;
        let extrinsic = &block.extrinsic;
        let header_hash = header_hash(header);
        let spec = self.spec;

        log::info!("Importing block 0x{} at slot {}", utils::print_hash!(header_hash), header.slot);

        apply_update(&mut self.state, StateUpdate { time: Some(header.slot), ..Default::default() });

        let available = Self::stage(
            Stage::Assurances,
            assurances::process(&extrinsic.assurances, header.slot, &header.parent, &self.state.availability, &self.state.curr_validators, &spec),
        )?;
        apply_update(&mut self.state, available.update);

        // Reports are authorized against the pools as they were before this block consumed them
        let prior_auth_pools = self.state.auth_pools.clone();
        let used = extrinsic
            .guarantees
            .iter()
            .map(|guarantee| CodeAuthorizer { core: guarantee.report.core_index, auth_hash: guarantee.report.authorizer_hash })
            .collect::<Vec<_>>();
        let authorized = authorization::process(header.slot, &used, &self.state.auth_pools, &self.state.auth_queues, &spec);
        apply_update(&mut self.state, authorized.update);

        let provided = Self::stage(Stage::Preimages, preimages::process(&extrinsic.preimages, &self.state.service_accounts, header.slot))?;
        apply_update(&mut self.state, provided.update);

        let update = Self::stage(Stage::Entropy, hooks.entropy(&self.state, block, &spec))?;
        apply_update(&mut self.state, update);

        let update = Self::stage(Stage::Statistics, hooks.statistics(&self.state, block, &spec))?;
        apply_update(&mut self.state, update);

        let update = Self::stage(Stage::Disputes, hooks.disputes(&self.state, block, &spec))?;
        apply_update(&mut self.state, update);

        let reported = {
            let state = &self.state;
            let ctx = reports::ReportsContext {
                slot: header.slot,
                entropy: &state.entropy,
                prev_validators: &state.prev_validators,
                curr_validators: &state.curr_validators,
                offenders: &state.disputes.offenders,
                recent_history: &state.recent_history,
                prior_state_root: &header.parent_state_root,
                availability: &state.availability,
                auth_pools: &prior_auth_pools,
                services: &state.service_accounts,
                ready_queue: &state.ready_queue,
                accumulated: &state.accumulation_history,
                chain,
                spec: &spec,
            };
            Self::stage(Stage::Reports, reports::process(&extrinsic.guarantees, &ctx))?
        };
        apply_update(&mut self.state, reported.update);

        let accumulation_root = hooks.accumulation_root(&self.state, &available.output.reported);
        let history = recent_history::process(
            &self.state.recent_history,
            &header_hash,
            &header.parent_state_root,
            &accumulation_root,
            &reported.output.reported,
        );
        apply_update(&mut self.state, history.update);

        log::info!("Block 0x{} imported successfully", utils::print_hash!(header_hash));

        Ok(BlockOutput { header_hash, available: available.output, reported: reported.output })
    }
}
