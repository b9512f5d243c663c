/*
    The guarantees extrinsic is a series of guarantees, at most one for each core, each of which is a tuple of a work-report,
    a credential and its corresponding timeslot. The core index of each guarantee must be unique and guarantees must be in
    ascending order of this. They are reports of newly completed workloads whose accuracy is guaranteed by specific validators.

    Reporting happens after the assurances of the block have been processed, so a core may only take a new report once its
    previous one became available or timed out. Checks run in order of increasing cost: the shape of each report first,
    then the chain context it claims, then its dependencies and finally the guarantors' credentials.
*/

use std::collections::{HashMap, HashSet};

use sp_core::blake2_256;

use constants::ChainSpec;
use constants::node::{JAM_GUARANTEE, MAX_AGE_LOOKUP_ANCHOR, MAX_GUARANTORS, MIN_GUARANTORS};
use jam_types::{
    AccumulatedHistory, AuthPools, AvailabilityAssignment, AvailabilityAssignments, CoreIndex, Ed25519Public, EntropyPool, ExportsRoot,
    Guarantee, OutputDataReports, ProcessError, ReadyQueue, RecentBlocks, ReportErrorCode, ReportedPackage, ServiceAccounts, StateRoot,
    StateUpdate, TimeSlot, Transition, ValidatorIndex, ValidatorsData, WorkPackageHash, WorkReport,
};
use codec::Encode;
use storage::HeaderChain;
use utils::common::{first_invalid, has_duplicates, is_sorted_and_unique, SignatureCheck};
use utils::mmr::super_peak;

pub mod assignments;
mod work_report;

use assignments::GuarantorAssignments;

/// Everything the reports transition reads besides the extrinsic itself.
pub struct ReportsContext<'a> {
    pub slot: TimeSlot,
    pub entropy: &'a EntropyPool,
    pub prev_validators: &'a ValidatorsData,
    pub curr_validators: &'a ValidatorsData,
    pub offenders: &'a [Ed25519Public],
    pub recent_history: &'a RecentBlocks,
    // Posterior state root of the parent block, not yet recorded in the recent history
    pub prior_state_root: &'a StateRoot,
    // Availability after the assurances of this block
    pub availability: &'a AvailabilityAssignments,
    // Authorizer pools before this block's authorization
    pub auth_pools: &'a AuthPools,
    pub services: &'a ServiceAccounts,
    pub ready_queue: &'a ReadyQueue,
    pub accumulated: &'a AccumulatedHistory,
    pub chain: &'a dyn HeaderChain,
    pub spec: &'a ChainSpec,
}

pub fn process(guarantees: &[Guarantee], ctx: &ReportsContext) -> Result<Transition<OutputDataReports>, ProcessError> {

    log::debug!("Processing guarantees extrinsic...");

    assert_eq!(ctx.spec.cores_count, ctx.availability.list.len(), "availability must hold one entry per core");
    assert_eq!(ctx.spec.cores_count, ctx.auth_pools.0.len(), "auth pools must hold one pool per core");

    let core_indexes = guarantees.iter().map(|guarantee| guarantee.report.core_index).collect::<Vec<CoreIndex>>();
    if !is_sorted_and_unique(&core_indexes) {
        log::error!("Out of order guarantee");
        return Err(ProcessError::ReportError(ReportErrorCode::OutOfOrderGuarantee));
    }

    for guarantee in guarantees {

        work_report::check_structure(&guarantee.report, ctx.spec)?;

        // The credential is a sequence of two or three tuples of a unique validator index and a signature
        if guarantee.signatures.len() < MIN_GUARANTORS || guarantee.signatures.len() > MAX_GUARANTORS {
            log::error!("Insufficient guarantees signatures: {}", guarantee.signatures.len());
            return Err(ProcessError::ReportError(ReportErrorCode::InsufficientGuarantees));
        }

        let validator_indexes = guarantee.signatures.iter().map(|credential| credential.validator_index).collect::<Vec<ValidatorIndex>>();
        if !is_sorted_and_unique(&validator_indexes) {
            log::error!("Not sorted or unique guarantors");
            return Err(ProcessError::ReportError(ReportErrorCode::NotSortedOrUniqueGuarantors));
        }
    }

    for guarantee in guarantees {
        work_report::check_services(&guarantee.report, ctx.services)?;
    }

    // There must be no two work-reports of the same package
    let package_hashes = guarantees.iter().map(|guarantee| guarantee.report.package_spec.hash).collect::<Vec<WorkPackageHash>>();
    if has_duplicates(&package_hashes) {
        log::error!("Duplicate package in guarantees extrinsic");
        return Err(ProcessError::ReportError(ReportErrorCode::DuplicatePackage));
    }

    for guarantee in guarantees {
        check_core(&guarantee.report, ctx)?;
    }

    for guarantee in guarantees {
        check_context(&guarantee.report, ctx)?;
    }

    check_dependencies(guarantees, ctx.recent_history)?;
    check_not_in_pipeline(guarantees, ctx)?;

    let reporters = check_credentials(guarantees, ctx)?;

    let mut reported = guarantees
        .iter()
        .map(|guarantee| ReportedPackage {
            work_package_hash: guarantee.report.package_spec.hash,
            segment_tree_root: guarantee.report.package_spec.exports_root,
        })
        .collect::<Vec<_>>();
    reported.sort_by_key(|package| package.work_package_hash);

    // The timeout is the present slot, so the entry may be replaced once sufficient time has elapsed
    let mut post_availability = ctx.availability.clone();
    for guarantee in guarantees {
        post_availability.list[guarantee.report.core_index as usize] =
            Some(AvailabilityAssignment { report: guarantee.report.clone(), timeout: ctx.slot });
    }

    log::debug!("Guarantees extrinsic processed successfully, {} reports placed", reported.len());

    Ok(Transition {
        output: OutputDataReports { reported, reporters },
        update: StateUpdate { availability: Some(post_availability), ..Default::default() },
    })
}

fn check_core(report: &WorkReport, ctx: &ReportsContext) -> Result<(), ProcessError> {

    let core = report.core_index as usize;

    // No reports may be placed on cores with a report pending availability on it
    if ctx.availability.list[core].is_some() {
        log::error!("Core {} engaged", core);
        return Err(ProcessError::ReportError(ReportErrorCode::CoreEngaged));
    }

    // The authorizer hash must be present in the authorizer pool of the core on which the work is reported
    if !ctx.auth_pools.0[core].contains(&report.authorizer_hash) {
        log::error!("Core {} unauthorized. Could not find 0x{} auth hash", core, utils::print_hash!(report.authorizer_hash));
        return Err(ProcessError::ReportError(ReportErrorCode::CoreUnauthorized));
    }

    Ok(())
}

fn check_context(report: &WorkReport, ctx: &ReportsContext) -> Result<(), ProcessError> {

    let context = &report.context;
    let history = &ctx.recent_history.history;

    // The anchor block must be within the recent blocks and its details must be correct
    let Some(position) = history.iter().position(|block| block.header_hash == context.anchor) else {
        log::error!("Anchor 0x{} not recent", utils::print_hash!(context.anchor));
        return Err(ProcessError::ReportError(ReportErrorCode::AnchorNotRecent));
    };

    let block = &history[position];
    // The last block's state root is still unpatched, its actual value is the prior state root
    let state_root = if position + 1 == history.len() { ctx.prior_state_root } else { &block.state_root };

    if *state_root != context.state_root {
        log::error!("Bad state root. Block state root 0x{} != context state root 0x{}", utils::print_hash!(state_root), utils::print_hash!(context.state_root));
        return Err(ProcessError::ReportError(ReportErrorCode::BadStateRoot));
    }

    if super_peak(&block.mmr) != context.beefy_root {
        log::error!("Bad beefy mmr root 0x{}", utils::print_hash!(context.beefy_root));
        return Err(ProcessError::ReportError(ReportErrorCode::BadBeefyMmrRoot));
    }

    // The lookup-anchor block must be within the last MAX_AGE_LOOKUP_ANCHOR timeslots and part of our chain
    if ctx.slot > context.lookup_anchor_slot.saturating_add(MAX_AGE_LOOKUP_ANCHOR) {
        log::error!("Lookup anchor slot {} too old for slot {}", context.lookup_anchor_slot, ctx.slot);
        return Err(ProcessError::ReportError(ReportErrorCode::SegmentRootLookupInvalid));
    }

    if !ctx.chain.is_in_chain(&context.lookup_anchor) {
        log::error!("Lookup anchor 0x{} not in chain", utils::print_hash!(context.lookup_anchor));
        return Err(ProcessError::ReportError(ReportErrorCode::SegmentRootLookupInvalid));
    }

    Ok(())
}

fn check_dependencies(guarantees: &[Guarantee], recent_history: &RecentBlocks) -> Result<(), ProcessError> {

    let mut known: HashMap<WorkPackageHash, ExportsRoot> = recent_history
        .history
        .iter()
        .flat_map(|block| block.reported.iter())
        .map(|package| (package.work_package_hash, package.segment_tree_root))
        .collect();

    known.extend(guarantees.iter().map(|guarantee| (guarantee.report.package_spec.hash, guarantee.report.package_spec.exports_root)));

    for guarantee in guarantees {

        for prerequisite in &guarantee.report.context.prerequisites {
            if !known.contains_key(prerequisite) {
                log::error!("Dependency missing 0x{}", utils::print_hash!(prerequisite));
                return Err(ProcessError::ReportError(ReportErrorCode::DependencyMissing));
            }
        }

        for item in &guarantee.report.segment_root_lookup {
            match known.get(&item.work_package_hash) {
                Some(root) if *root == item.segment_tree_root => continue,
                _ => {
                    log::error!("Segment root lookup invalid for package 0x{}", utils::print_hash!(item.work_package_hash));
                    return Err(ProcessError::ReportError(ReportErrorCode::SegmentRootLookupInvalid));
                }
            }
        }
    }

    Ok(())
}

fn check_not_in_pipeline(guarantees: &[Guarantee], ctx: &ReportsContext) -> Result<(), ProcessError> {

    let mut pipeline: HashSet<WorkPackageHash> = HashSet::new();

    pipeline.extend(ctx.recent_history.history.iter().flat_map(|block| block.reported.iter()).map(|package| package.work_package_hash));
    pipeline.extend(ctx.accumulated.queue.iter().flatten());
    pipeline.extend(ctx.ready_queue.queue.iter().flatten().map(|record| record.report.package_spec.hash));
    pipeline.extend(ctx.availability.list.iter().flatten().map(|assignment| assignment.report.package_spec.hash));

    for guarantee in guarantees {
        if pipeline.contains(&guarantee.report.package_spec.hash) {
            log::error!("Duplicate package 0x{}", utils::print_hash!(guarantee.report.package_spec.hash));
            return Err(ProcessError::ReportError(ReportErrorCode::DuplicatePackage));
        }
    }

    Ok(())
}

/// Checks every credential and returns the keys of the guarantors, sorted.
fn check_credentials(guarantees: &[Guarantee], ctx: &ReportsContext) -> Result<Vec<Ed25519Public>, ProcessError> {

    let rotation_period = ctx.spec.rotation_period;
    let current_rotation = ctx.slot / rotation_period;

    let mut current: Option<GuarantorAssignments> = None;
    let mut previous: Option<GuarantorAssignments> = None;
    let mut checks = Vec::new();
    let mut reporters = Vec::new();

    for guarantee in guarantees {

        if guarantee.slot > ctx.slot {
            log::error!("Future report slot: {}. The current block slot is {}", guarantee.slot, ctx.slot);
            return Err(ProcessError::ReportError(ReportErrorCode::FutureReportSlot));
        }

        if guarantee.slot < rotation_period * current_rotation.saturating_sub(1) {
            log::error!("Report epoch before last: {}", guarantee.slot);
            return Err(ProcessError::ReportError(ReportErrorCode::ReportEpochBeforeLast));
        }

        // The guarantors must be assigned to the core either in the current rotation or in the previous one,
        // according to the slot of the guarantee
        let assignments = if guarantee.slot / rotation_period == current_rotation {
            current.get_or_insert_with(|| {
                assignments::current(ctx.entropy, ctx.slot, ctx.curr_validators, ctx.offenders, ctx.spec)
            })
        } else {
            previous.get_or_insert_with(|| {
                assignments::previous(ctx.entropy, ctx.slot, ctx.prev_validators, ctx.curr_validators, ctx.offenders, ctx.spec)
            })
        };

        // The signed message is the serialization of the hash of the work-report
        let message = [JAM_GUARANTEE, &blake2_256(&guarantee.report.encode())[..]].concat();

        for credential in &guarantee.signatures {

            let index = credential.validator_index as usize;
            if index >= ctx.spec.validators_count {
                log::error!("Bad validator index: {}", credential.validator_index);
                return Err(ProcessError::ReportError(ReportErrorCode::BadValidatorIndex));
            }

            if assignments.cores[index] != guarantee.report.core_index {
                log::error!("Wrong assignment: validator {} is assigned to core {} != {}", index, assignments.cores[index], guarantee.report.core_index);
                return Err(ProcessError::ReportError(ReportErrorCode::WrongAssignment));
            }

            let public_key = assignments.validators.list[index].ed25519;
            checks.push(SignatureCheck { message: message.clone(), public_key, signature: credential.signature });
            reporters.push(public_key);
        }
    }

    if let Some(index) = first_invalid(&checks) {
        log::error!("Bad signature for guarantor 0x{}", utils::print_hash!(checks[index].public_key));
        return Err(ProcessError::ReportError(ReportErrorCode::BadSignature));
    }

    reporters.sort();
    reporters.dedup();

    Ok(reporters)
}
