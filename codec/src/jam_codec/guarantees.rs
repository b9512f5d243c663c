use jam_types::{Ed25519Signature, Guarantee, TimeSlot, ValidatorIndex, ValidatorSignature, WorkReport};
use crate::{Encode, EncodeLen, Decode, DecodeLen, BytesReader, ReadError};

impl Encode for ValidatorSignature {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(66);

        self.validator_index.encode_to(&mut blob);
        self.signature.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for ValidatorSignature {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(ValidatorSignature { validator_index: ValidatorIndex::decode(blob)?, signature: Ed25519Signature::decode(blob)? })
    }
}

impl Encode for Guarantee {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        self.report.encode_to(&mut blob);
        self.slot.encode_to(&mut blob);
        self.signatures.encode_len().encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Guarantee {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(Guarantee {
            report: WorkReport::decode(blob)?,
            slot: TimeSlot::decode(blob)?,
            signatures: Vec::<ValidatorSignature>::decode_len(blob)?,
        })
    }
}
