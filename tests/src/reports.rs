#[cfg(test)]
mod tests {

    use sp_core::{blake2_256, ed25519, Pair};

    use constants::ChainSpec;
    use constants::node::{JAM_GUARANTEE, MAX_AGE_LOOKUP_ANCHOR};
    use jam_types::{
        Account, BlockInfo, GlobalState, Guarantee, HeaderHash, Mmr, OutputDataReports, ProcessError, ReportErrorCode, ReportedPackage,
        SegmentRootLookupItem, StateRoot, TimeSlot, Transition, ValidatorSignature, WorkExecResult, WorkReport, WorkResult,
    };
    use codec::Encode;
    use reports::{assignments, ReportsContext};
    use storage::Ancestors;
    use utils::mmr::super_peak;
    use crate::{init, validator_keys, validators_data};

    const SLOT: TimeSlot = 100;
    const ANCHOR: HeaderHash = [0xa0; 32];
    const LOOKUP_ANCHOR: HeaderHash = [0xb0; 32];
    const LOOKUP_SLOT: TimeSlot = 90;
    const PRIOR_ROOT: StateRoot = [0x52; 32];
    const AUTHORIZER: [u8; 32] = [0xaa; 32];
    const REPORTED: [u8; 32] = [0x77; 32];

    struct Chain {
        spec: ChainSpec,
        keys: Vec<ed25519::Pair>,
        state: GlobalState,
        ancestors: Ancestors,
    }

    impl Chain {

        fn new(slot: TimeSlot) -> Self {
            init();
            let spec = ChainSpec::TINY;
            let keys = validator_keys(&spec);

            let mut state = GlobalState::genesis(&spec);
            state.time = slot;
            state.curr_validators = validators_data(&keys);
            state.entropy.buf[2] = [0x22; 32];
            for pool in state.auth_pools.0.iter_mut() {
                pool.push_back(AUTHORIZER);
            }
            state.recent_history.history.push_back(BlockInfo {
                header_hash: ANCHOR,
                mmr: Mmr { peaks: vec![Some([0xe1; 32])] },
                state_root: StateRoot::default(),
                reported: vec![ReportedPackage { work_package_hash: REPORTED, segment_tree_root: [0x78; 32] }],
            });
            let mut account = Account::default();
            account.info.code_hash = [1u8; 32];
            account.info.acc_min_gas = 10;
            state.service_accounts.insert(1, account);

            let mut ancestors = Ancestors::new();
            ancestors.update(LOOKUP_SLOT, LOOKUP_ANCHOR);

            Chain { spec, keys, state, ancestors }
        }

        fn report(&self, core: u16, package: u8) -> WorkReport {
            let mut report = WorkReport::default();
            report.core_index = core;
            report.authorizer_hash = AUTHORIZER;
            report.package_spec.hash = [package; 32];
            report.context.anchor = ANCHOR;
            report.context.state_root = PRIOR_ROOT;
            report.context.beefy_root = super_peak(&self.state.recent_history.history[0].mmr);
            report.context.lookup_anchor = LOOKUP_ANCHOR;
            report.context.lookup_anchor_slot = LOOKUP_SLOT;
            report.results.push(WorkResult {
                service: 1,
                code_hash: [1u8; 32],
                payload_hash: [0u8; 32],
                accumulate_gas: 1000,
                result: WorkExecResult::Ok(vec![0xde, 0xad]),
                refine_load: Default::default(),
            });
            report
        }

        fn guarantee(&self, report: WorkReport) -> Guarantee {
            let assignments = assignments::current(&self.state.entropy, self.state.time, &self.state.curr_validators, &[], &self.spec);
            let message = [JAM_GUARANTEE, &blake2_256(&report.encode())[..]].concat();
            let signatures = (0..self.spec.validators_count)
                .filter(|i| assignments.cores[*i] == report.core_index)
                .take(3)
                .map(|i| ValidatorSignature { validator_index: i as u16, signature: self.keys[i].sign(&message).0 })
                .collect();
            Guarantee { report, slot: self.state.time, signatures }
        }

        fn process(&self, guarantees: &[Guarantee]) -> Result<Transition<OutputDataReports>, ProcessError> {
            let state = &self.state;
            let ctx = ReportsContext {
                slot: state.time,
                entropy: &state.entropy,
                prev_validators: &state.prev_validators,
                curr_validators: &state.curr_validators,
                offenders: &state.disputes.offenders,
                recent_history: &state.recent_history,
                prior_state_root: &PRIOR_ROOT,
                availability: &state.availability,
                auth_pools: &state.auth_pools,
                services: &state.service_accounts,
                ready_queue: &state.ready_queue,
                accumulated: &state.accumulation_history,
                chain: &self.ancestors,
                spec: &self.spec,
            };
            reports::process(guarantees, &ctx)
        }
    }

    fn error_of(result: Result<Transition<OutputDataReports>, ProcessError>) -> ReportErrorCode {
        match result {
            Err(ProcessError::ReportError(code)) => code,
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn report_depending_on_a_recent_package() {
        let chain = Chain::new(SLOT);
        let mut report = chain.report(1, 0x10);
        report.context.prerequisites.push(REPORTED);
        report.segment_root_lookup.push(SegmentRootLookupItem { work_package_hash: REPORTED, segment_tree_root: [0x78; 32] });

        let transition = chain.process(&[chain.guarantee(report.clone())]).unwrap();

        assert_eq!(vec![[0x10u8; 32]], transition.output.reported.iter().map(|p| p.work_package_hash).collect::<Vec<_>>());
        assert_eq!(3, transition.output.reporters.len());
        let availability = transition.update.availability.unwrap();
        assert!(availability.list[0].is_none());
        assert_eq!(Some(report), availability.list[1].as_ref().map(|assignment| assignment.report.clone()));
    }

    #[test]
    fn anchor_must_be_recent() {
        let chain = Chain::new(SLOT);
        let mut report = chain.report(0, 0x10);
        report.context.anchor = [0xcc; 32];

        assert_eq!(ReportErrorCode::AnchorNotRecent, error_of(chain.process(&[chain.guarantee(report)])));
    }

    #[test]
    fn lookup_anchor_must_be_young_and_known() {
        let chain = Chain::new(LOOKUP_SLOT + MAX_AGE_LOOKUP_ANCHOR + 1);
        let report = chain.report(0, 0x10);
        assert_eq!(ReportErrorCode::SegmentRootLookupInvalid, error_of(chain.process(&[chain.guarantee(report)])));

        let chain = Chain::new(SLOT);
        let mut report = chain.report(0, 0x10);
        report.context.lookup_anchor = [0xbb; 32];
        assert_eq!(ReportErrorCode::SegmentRootLookupInvalid, error_of(chain.process(&[chain.guarantee(report)])));
    }

    #[test]
    fn packages_are_reported_once() {
        let chain = Chain::new(SLOT);

        let guarantees = vec![chain.guarantee(chain.report(0, 0x10)), chain.guarantee(chain.report(1, 0x10))];
        assert_eq!(ReportErrorCode::DuplicatePackage, error_of(chain.process(&guarantees)));

        let already_reported = chain.guarantee(chain.report(0, REPORTED[0]));
        assert_eq!(ReportErrorCode::DuplicatePackage, error_of(chain.process(&[already_reported])));
    }

    #[test]
    fn missing_dependency() {
        let chain = Chain::new(SLOT);
        let mut report = chain.report(0, 0x10);
        report.context.prerequisites.push([0x99; 32]);

        assert_eq!(ReportErrorCode::DependencyMissing, error_of(chain.process(&[chain.guarantee(report)])));
    }
}
