use constants::ChainSpec;
use jam_types::{Assurance, Ed25519Signature, OpaqueHash, ValidatorIndex};
use crate::{Encode, Decode, DecodeSpec, BytesReader, ReadError};

impl Encode for Assurance {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(32 + self.bitfield.len() + 66);

        self.anchor.encode_to(&mut blob);
        self.bitfield.encode_to(&mut blob);
        self.validator_index.encode_to(&mut blob);
        self.signature.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for Assurance {

    // The bitfield carries one bit per core, rounded up to whole bytes
    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        Ok(Assurance {
            anchor: OpaqueHash::decode(blob)?,
            bitfield: blob.read_bytes(spec.avail_bitfield_bytes())?.to_vec(),
            validator_index: ValidatorIndex::decode(blob)?,
            signature: Ed25519Signature::decode(blob)?,
        })
    }
}
