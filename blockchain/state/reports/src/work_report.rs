// Checks a work-report can pass on its own, before looking at the chain context it was produced in.

use constants::ChainSpec;
use constants::node::{MAX_DEPENDENCY_ITEMS, MAX_OUTPUT_BLOB_SIZE, MAX_WORK_ITEMS, WORK_REPORT_GAS_LIMIT};
use jam_types::{Gas, ProcessError, ReportErrorCode, ServiceAccounts, WorkExecResult, WorkReport, WorkResult};

pub fn check_structure(report: &WorkReport, spec: &ChainSpec) -> Result<(), ProcessError> {

    if report.core_index as usize >= spec.cores_count {
        log::error!("Bad core index: {}. The total of cores is {}", report.core_index, spec.cores_count);
        return Err(ProcessError::ReportError(ReportErrorCode::BadCoreIndex));
    }

    // We limit the sum of the number of items in the segment-root lookup dictionary and the number of prerequisites
    let dependencies = report.context.prerequisites.len() + report.segment_root_lookup.len();
    if dependencies > MAX_DEPENDENCY_ITEMS {
        log::error!("Too many dependencies: {} > {}", dependencies, MAX_DEPENDENCY_ITEMS);
        return Err(ProcessError::ReportError(ReportErrorCode::TooManyDependencies));
    }

    if report.results.is_empty() {
        log::error!("No results");
        return Err(ProcessError::ReportError(ReportErrorCode::NoResults));
    }

    if report.results.len() > MAX_WORK_ITEMS {
        log::error!("Too many results: {}", report.results.len());
        return Err(ProcessError::ReportError(ReportErrorCode::TooManyResults));
    }

    // Work-reports are limited in the total size of the successful output blobs together with the authorizer output
    let size = report.auth_output.len() + outputs_size(&report.results);
    if size > MAX_OUTPUT_BLOB_SIZE {
        log::error!("Work report too big: {}. The max output blob size is {}", size, MAX_OUTPUT_BLOB_SIZE);
        return Err(ProcessError::ReportError(ReportErrorCode::WorkReportTooBig));
    }

    Ok(())
}

fn outputs_size(results: &[WorkResult]) -> usize {
    results
        .iter()
        .map(|result| match &result.result {
            WorkExecResult::Ok(output) => output.len(),
            WorkExecResult::Error(_) => 0,
        })
        .sum()
}

pub fn check_services(report: &WorkReport, services: &ServiceAccounts) -> Result<(), ProcessError> {

    let mut total_gas: Gas = 0;

    for result in &report.results {

        let Some(account) = services.get(&result.service) else {
            log::error!("Bad service id: {}", result.service);
            return Err(ProcessError::ReportError(ReportErrorCode::BadServiceId));
        };

        // All work results must predict the correct code hash for their service
        if result.code_hash != account.info.code_hash {
            log::error!("Bad code hash 0x{} != 0x{}", utils::print_hash!(result.code_hash), utils::print_hash!(account.info.code_hash));
            return Err(ProcessError::ReportError(ReportErrorCode::BadCodeHash));
        }

        if result.accumulate_gas < account.info.acc_min_gas {
            log::error!("Service item gas too low: {}. The min gas required is {}", result.accumulate_gas, account.info.acc_min_gas);
            return Err(ProcessError::ReportError(ReportErrorCode::ServiceItemGasTooLow));
        }

        total_gas = total_gas.saturating_add(result.accumulate_gas);
    }

    if total_gas > WORK_REPORT_GAS_LIMIT {
        log::error!("Work report gas too high: {}. The work report gas limit is {}", total_gas, WORK_REPORT_GAS_LIMIT);
        return Err(ProcessError::ReportError(ReportErrorCode::WorkReportGasTooHigh));
    }

    Ok(())
}
