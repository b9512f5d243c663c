#[cfg(test)]
mod tests {

    use sp_core::{blake2_256, ed25519, Pair};

    use constants::{ChainSpec, ProtocolVersion};
    use constants::node::JAM_GUARANTEE;
    use jam_types::{
        Account, Assurance, Block, GlobalState, Guarantee, HeaderHash, ProcessError, ReportErrorCode, TimeSlot, ValidatorSignature,
        WorkExecResult, WorkReport, WorkResult,
    };
    use codec::Encode;
    use state_controller::{NoHooks, Stage, StateController};
    use storage::{Ancestors, SerializedState};
    use utils::mmr::super_peak;
    use utils::serialization::serialize;
    use crate::{init, validator_keys, validators_data};

    const AUTHORIZER: [u8; 32] = [0xaa; 32];
    const PACKAGE: [u8; 32] = [0x10; 32];

    struct Node {
        spec: ChainSpec,
        keys: Vec<ed25519::Pair>,
        controller: StateController,
        ancestors: Ancestors,
        head: HeaderHash,
    }

    impl Node {

        fn genesis() -> Self {
            init();
            let spec = ChainSpec::TINY;
            let keys = validator_keys(&spec);

            let mut state = GlobalState::genesis(&spec);
            state.curr_validators = validators_data(&keys);
            state.entropy.buf[2] = [0x22; 32];
            state.auth_pools.0[0].push_back(AUTHORIZER);
            let mut account = Account::default();
            account.info.code_hash = [1u8; 32];
            account.info.acc_min_gas = 10;
            state.service_accounts.insert(1, account);

            let controller = StateController::new(state, spec, ProtocolVersion::Current);
            Node { spec, keys, controller, ancestors: Ancestors::new(), head: HeaderHash::default() }
        }

        fn block(&self, slot: TimeSlot) -> Block {
            let mut block = Block::default();
            block.header.slot = slot;
            block.header.parent = self.head;
            block.header.parent_state_root = self.controller.state_root();
            block
        }

        fn import(&mut self, block: &Block) -> Result<state_controller::BlockOutput, state_controller::PipelineError> {
            let output = self.controller.apply(block, &mut NoHooks, &self.ancestors)?;
            self.ancestors.update(block.header.slot, output.header_hash);
            self.head = output.header_hash;
            Ok(output)
        }

        // A report anchored on the head, which is the last entry of the recent history
        fn report(&self, block: &Block, lookup_slot: TimeSlot) -> WorkReport {
            let state = self.controller.state();
            let mut report = WorkReport::default();
            report.core_index = 0;
            report.authorizer_hash = AUTHORIZER;
            report.package_spec.hash = PACKAGE;
            report.package_spec.exports_root = [0x11; 32];
            report.context.anchor = self.head;
            report.context.state_root = block.header.parent_state_root;
            report.context.beefy_root = super_peak(&state.recent_history.history[state.recent_history.history.len() - 1].mmr);
            report.context.lookup_anchor = self.head;
            report.context.lookup_anchor_slot = lookup_slot;
            report.results.push(WorkResult {
                service: 1,
                code_hash: [1u8; 32],
                payload_hash: blake2_256(b"payload"),
                accumulate_gas: 500,
                result: WorkExecResult::Ok(b"output".to_vec()),
                refine_load: Default::default(),
            });
            report
        }

        fn guarantee(&self, report: WorkReport, slot: TimeSlot) -> Guarantee {
            let state = self.controller.state();
            let assignments = reports::assignments::current(&state.entropy, slot, &state.curr_validators, &[], &self.spec);
            let message = [JAM_GUARANTEE, &blake2_256(&report.encode())[..]].concat();
            let signatures = (0..self.spec.validators_count)
                .filter(|i| assignments.cores[*i] == report.core_index)
                .take(2)
                .map(|i| ValidatorSignature { validator_index: i as u16, signature: self.keys[i].sign(&message).0 })
                .collect();
            Guarantee { report, slot, signatures }
        }

        fn assurances(&self, validators: std::ops::Range<usize>, bitfield: u8) -> Vec<Assurance> {
            validators
                .map(|i| Assurance {
                    anchor: self.head,
                    bitfield: vec![bitfield],
                    validator_index: i as u16,
                    signature: self.keys[i].sign(&assurances::assurance_message(&self.head, &[bitfield])).0,
                })
                .collect()
        }
    }

    #[test]
    fn report_becomes_available() {
        let mut node = Node::genesis();

        let block1 = node.block(1);
        let output = node.import(&block1).unwrap();
        assert!(output.reported.reported.is_empty());

        let mut block2 = node.block(2);
        let report = node.report(&block2, 1);
        block2.extrinsic.guarantees.push(node.guarantee(report.clone(), 2));
        let root_before = block2.header.parent_state_root;

        let output = node.import(&block2).unwrap();
        assert_eq!(vec![PACKAGE], output.reported.reported.iter().map(|p| p.work_package_hash).collect::<Vec<_>>());
        assert_eq!(2, output.reported.reporters.len());
        assert_ne!(root_before, node.controller.state_root());
        {
            let state = node.controller.state();
            let pending = state.availability.list[0].as_ref().unwrap();
            assert_eq!(report, pending.report);
            assert_eq!(2, pending.timeout);
            // The authorizer was consumed from the pool of the core
            assert!(!state.auth_pools.0[0].contains(&AUTHORIZER));
            assert_eq!(output.reported.reported, state.recent_history.history[1].reported);
        }

        let mut block3 = node.block(3);
        block3.extrinsic.assurances = node.assurances(0..5, 0b01);

        let output = node.import(&block3).unwrap();
        assert_eq!(vec![report], output.available.reported);
        assert!(node.controller.state().availability.list.iter().all(Option::is_none));

        // The package is still in the recent history, so it cannot be reported again
        let mut block4 = node.block(4);
        let mut again = node.report(&block4, 3);
        again.authorizer_hash = [0u8; 32];
        block4.extrinsic.guarantees.push(node.guarantee(again, 4));
        let error = node.import(&block4).unwrap_err();
        assert_eq!(Stage::Reports, error.stage);
        assert_eq!(ProcessError::ReportError(ReportErrorCode::DuplicatePackage), error.error);
    }

    #[test]
    fn serialized_state_matches_the_controller() {
        let mut node = Node::genesis();
        for slot in 1..=3 {
            let block = node.block(slot);
            node.import(&block).unwrap();
        }

        let state = node.controller.state();
        let entries = serialize(state, ProtocolVersion::Current);
        let view = SerializedState::new(&entries, node.spec, ProtocolVersion::Current);
        let rebuilt = view.to_chain_state(&[1]).unwrap();

        assert_eq!(state.time, rebuilt.time);
        assert_eq!(state.recent_history, rebuilt.recent_history);
        assert_eq!(state.auth_pools, rebuilt.auth_pools);
        assert_eq!(state.availability, rebuilt.availability);
        assert_eq!(state.curr_validators, rebuilt.curr_validators);
        assert_eq!(state.service_accounts[&1].info, rebuilt.service_accounts[&1].info);
    }
}
