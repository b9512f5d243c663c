// Stages run by other components of the node. The pipeline calls them at their place in the block order and
// applies whatever they return.

use constants::ChainSpec;
use jam_types::{AccumulateRoot, Block, GlobalState, ProcessError, StateUpdate, WorkReport};

pub trait BlockHooks {

    /// Entropy accumulation and safrole ticket/key rotation.
    fn entropy(&mut self, _state: &GlobalState, _block: &Block, _spec: &ChainSpec) -> Result<StateUpdate, ProcessError> {
        Ok(StateUpdate::default())
    }

    fn statistics(&mut self, _state: &GlobalState, _block: &Block, _spec: &ChainSpec) -> Result<StateUpdate, ProcessError> {
        Ok(StateUpdate::default())
    }

    fn disputes(&mut self, _state: &GlobalState, _block: &Block, _spec: &ChainSpec) -> Result<StateUpdate, ProcessError> {
        Ok(StateUpdate::default())
    }

    /// Commitment to the accumulation outputs of the reports made available in this block.
    fn accumulation_root(&mut self, _state: &GlobalState, _available: &[WorkReport]) -> AccumulateRoot {
        AccumulateRoot::default()
    }
}

/// Runs none of the external stages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl BlockHooks for NoHooks {}
