use constants::ChainSpec;
use jam_types::{ActivityRecord, Statistics, ValidatorStatistics};
use crate::{Encode, Decode, DecodeSpec, BytesReader, ReadError};
use crate::generic_codec::decode_fixed;

impl Encode for ActivityRecord {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(24);

        self.blocks.encode_to(&mut blob);
        self.tickets.encode_to(&mut blob);
        self.preimages.encode_to(&mut blob);
        self.preimages_size.encode_to(&mut blob);
        self.guarantees.encode_to(&mut blob);
        self.assurances.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for ActivityRecord {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(ActivityRecord {
            blocks: u32::decode(blob)?,
            tickets: u32::decode(blob)?,
            preimages: u32::decode(blob)?,
            preimages_size: u32::decode(blob)?,
            guarantees: u32::decode(blob)?,
            assurances: u32::decode(blob)?,
        })
    }
}

impl Encode for ValidatorStatistics {

    fn encode(&self) -> Vec<u8> {
        self.records.encode()
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        self.records.encode_to(into);
    }
}

impl DecodeSpec for ValidatorStatistics {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {
        Ok(ValidatorStatistics { records: decode_fixed::<ActivityRecord>(blob, spec.validators_count)? })
    }
}

impl Encode for Statistics {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(self.curr.records.len() * 48);

        self.curr.encode_to(&mut blob);
        self.prev.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for Statistics {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        Ok(Statistics {
            curr: ValidatorStatistics::decode_spec(blob, spec)?,
            prev: ValidatorStatistics::decode_spec(blob, spec)?,
        })
    }
}
