use constants::ChainSpec;
use jam_types::{ValidatorData, ValidatorsData, BandersnatchPublic, Ed25519Public, BlsPublic, Metadata};
use crate::{Encode, Decode, DecodeSpec, BytesReader, ReadError};
use crate::generic_codec::decode_fixed;

impl Encode for ValidatorData {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(336);

        self.bandersnatch.encode_to(&mut blob);
        self.ed25519.encode_to(&mut blob);
        self.bls.encode_to(&mut blob);
        self.metadata.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for ValidatorData {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(ValidatorData {
            bandersnatch: BandersnatchPublic::decode(blob)?,
            ed25519: Ed25519Public::decode(blob)?,
            bls: BlsPublic::decode(blob)?,
            metadata: Metadata::decode(blob)?,
        })
    }
}

impl Encode for ValidatorsData {

    fn encode(&self) -> Vec<u8> {
        self.list.encode()
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        self.list.encode_to(into);
    }
}

impl DecodeSpec for ValidatorsData {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {
        Ok(ValidatorsData { list: decode_fixed::<ValidatorData>(blob, spec.validators_count)? })
    }
}
