use constants::ChainSpec;
use jam_types::{AccumulatedHistory, ReadyQueue, ReadyRecord, WorkPackageHash, WorkReport};
use crate::{Encode, EncodeLen, Decode, DecodeLen, DecodeSpec, BytesReader, ReadError};

impl Encode for ReadyRecord {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        self.report.encode_to(&mut blob);
        self.dependencies.encode_len().encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for ReadyRecord {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(ReadyRecord {
            report: WorkReport::decode(blob)?,
            dependencies: Vec::<WorkPackageHash>::decode_len(blob)?,
        })
    }
}

impl Encode for ReadyQueue {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        for records in self.queue.iter() {
            records.encode_len().encode_to(&mut blob);
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for ReadyQueue {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let mut queue = Vec::with_capacity(spec.epoch_length);

        for _ in 0..spec.epoch_length {
            queue.push(Vec::<ReadyRecord>::decode_len(blob)?);
        }

        Ok(ReadyQueue { queue })
    }
}

impl Encode for AccumulatedHistory {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        for hashes in self.queue.iter() {
            hashes.encode_len().encode_to(&mut blob);
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for AccumulatedHistory {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let mut queue = Vec::with_capacity(spec.epoch_length);

        for _ in 0..spec.epoch_length {
            queue.push(Vec::<WorkPackageHash>::decode_len(blob)?);
        }

        Ok(AccumulatedHistory { queue })
    }
}
