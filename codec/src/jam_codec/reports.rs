use constants::ChainSpec;
use jam_types::{
    AvailabilityAssignment, AvailabilityAssignments, WorkReport, RefineContext, TimeSlot, OpaqueHash, Gas, WorkResult, WorkExecResult,
    WorkExecError, RefineLoad, WorkPackageHash, SegmentRootLookupItem, WorkPackageSpec, ReportedPackage, ServiceId,
};
use crate::{Encode, Decode, DecodeSpec, BytesReader, EncodeSize, EncodeLen, DecodeLen, ReadError};
use crate::generic_codec::{encode_unsigned, decode_unsigned};

impl Encode for WorkReport {

    fn encode(&self) -> Vec<u8> {

        let mut work_report_blob: Vec<u8> = Vec::with_capacity(std::mem::size_of::<WorkReport>());

        self.package_spec.encode_to(&mut work_report_blob);
        self.context.encode_to(&mut work_report_blob);
        encode_unsigned(self.core_index as usize).encode_to(&mut work_report_blob);
        self.authorizer_hash.encode_to(&mut work_report_blob);
        encode_unsigned(self.auth_gas_used as usize).encode_to(&mut work_report_blob);
        self.auth_output.encode_len().encode_to(&mut work_report_blob);
        self.segment_root_lookup.encode_len().encode_to(&mut work_report_blob);
        self.results.encode_len().encode_to(&mut work_report_blob);

        return work_report_blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for WorkReport {

    fn decode(work_report: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(WorkReport {
            package_spec: WorkPackageSpec::decode(work_report)?,
            context: RefineContext::decode(work_report)?,
            core_index: u16::try_from(decode_unsigned(work_report)?).map_err(|_| ReadError::ConversionError)?,
            authorizer_hash: OpaqueHash::decode(work_report)?,
            auth_gas_used: decode_unsigned(work_report)? as Gas,
            auth_output: Vec::<u8>::decode_len(work_report)?,
            segment_root_lookup: Vec::<SegmentRootLookupItem>::decode_len(work_report)?,
            results: Vec::<WorkResult>::decode_len(work_report)?,
        })
    }
}

impl Encode for WorkPackageSpec {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(102);

        self.hash.encode_to(&mut blob);
        self.length.encode_to(&mut blob);
        self.erasure_root.encode_to(&mut blob);
        self.exports_root.encode_to(&mut blob);
        self.exports_count.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for WorkPackageSpec {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(WorkPackageSpec {
            hash: OpaqueHash::decode(blob)?,
            length: u32::decode(blob)?,
            erasure_root: OpaqueHash::decode(blob)?,
            exports_root: OpaqueHash::decode(blob)?,
            exports_count: u16::decode(blob)?,
        })
    }
}

impl Encode for RefineContext {

    fn encode(&self) -> Vec<u8> {

        let mut refine_blob: Vec<u8> = Vec::with_capacity(std::mem::size_of::<RefineContext>());

        self.anchor.encode_to(&mut refine_blob);
        self.state_root.encode_to(&mut refine_blob);
        self.beefy_root.encode_to(&mut refine_blob);
        self.lookup_anchor.encode_to(&mut refine_blob);
        self.lookup_anchor_slot.encode_size(4).encode_to(&mut refine_blob);
        self.prerequisites.encode_len().encode_to(&mut refine_blob);

        return refine_blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for RefineContext {

    fn decode(refine_blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(RefineContext {
            anchor: OpaqueHash::decode(refine_blob)?,
            state_root: OpaqueHash::decode(refine_blob)?,
            beefy_root: OpaqueHash::decode(refine_blob)?,
            lookup_anchor: OpaqueHash::decode(refine_blob)?,
            lookup_anchor_slot: TimeSlot::decode(refine_blob)?,
            prerequisites: Vec::<OpaqueHash>::decode_len(refine_blob)?,
        })
    }
}

impl Encode for SegmentRootLookupItem {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(64);

        self.work_package_hash.encode_to(&mut blob);
        self.segment_tree_root.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for SegmentRootLookupItem {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(SegmentRootLookupItem {
            work_package_hash: WorkPackageHash::decode(blob)?,
            segment_tree_root: OpaqueHash::decode(blob)?,
        })
    }
}

impl Encode for WorkResult {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(std::mem::size_of::<WorkResult>());

        self.service.encode_size(4).encode_to(&mut blob);
        self.code_hash.encode_to(&mut blob);
        self.payload_hash.encode_to(&mut blob);
        self.accumulate_gas.encode_size(8).encode_to(&mut blob);
        self.result.encode_to(&mut blob);
        self.refine_load.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for WorkResult {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(WorkResult {
            service: ServiceId::decode(blob)?,
            code_hash: OpaqueHash::decode(blob)?,
            payload_hash: OpaqueHash::decode(blob)?,
            accumulate_gas: Gas::decode(blob)?,
            result: WorkExecResult::decode(blob)?,
            refine_load: RefineLoad::decode(blob)?,
        })
    }
}

impl Encode for WorkExecResult {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        match self {
            WorkExecResult::Ok(output) => {
                blob.push(0);
                output.encode_len().encode_to(&mut blob);
            }
            WorkExecResult::Error(error) => {
                blob.push(*error as u8);
            }
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for WorkExecResult {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        let result = match blob.read_byte()? {
            0 => WorkExecResult::Ok(Vec::<u8>::decode_len(blob)?),
            1 => WorkExecResult::Error(WorkExecError::OutOfGas),
            2 => WorkExecResult::Error(WorkExecError::Panic),
            3 => WorkExecResult::Error(WorkExecError::BadNumberExports),
            4 => WorkExecResult::Error(WorkExecError::BadCode),
            5 => WorkExecResult::Error(WorkExecError::CodeOversize),
            _ => return Err(ReadError::InvalidData),
        };

        Ok(result)
    }
}

impl Encode for RefineLoad {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        encode_unsigned(self.gas_used as usize).encode_to(&mut blob);
        encode_unsigned(self.imports as usize).encode_to(&mut blob);
        encode_unsigned(self.extrinsic_count as usize).encode_to(&mut blob);
        encode_unsigned(self.extrinsic_size as usize).encode_to(&mut blob);
        encode_unsigned(self.exports as usize).encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for RefineLoad {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(RefineLoad {
            gas_used: decode_unsigned(blob)? as Gas,
            imports: decode_unsigned(blob)? as u16,
            extrinsic_count: decode_unsigned(blob)? as u16,
            extrinsic_size: decode_unsigned(blob)? as u32,
            exports: decode_unsigned(blob)? as u16,
        })
    }
}

impl Encode for ReportedPackage {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(std::mem::size_of::<Self>());

        self.work_package_hash.encode_to(&mut blob);
        self.segment_tree_root.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for ReportedPackage {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(ReportedPackage {
            work_package_hash: WorkPackageHash::decode(blob)?,
            segment_tree_root: OpaqueHash::decode(blob)?,
        })
    }
}

impl Encode for AvailabilityAssignment {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(std::mem::size_of::<Self>());

        self.report.encode_to(&mut blob);
        self.timeout.encode_size(4).encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for AvailabilityAssignment {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(AvailabilityAssignment {
            report: WorkReport::decode(blob)?,
            timeout: TimeSlot::decode(blob)?,
        })
    }
}

impl Encode for AvailabilityAssignments {

    fn encode(&self) -> Vec<u8> {
        self.list.encode()
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        self.list.encode_to(into);
    }
}

impl DecodeSpec for AvailabilityAssignments {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let mut list = Vec::with_capacity(spec.cores_count);

        for _ in 0..spec.cores_count {
            list.push(Option::<AvailabilityAssignment>::decode(blob)?);
        }

        Ok(AvailabilityAssignments { list })
    }
}
