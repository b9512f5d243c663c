use jam_types::{Preimage, ServiceId};
use crate::{Encode, EncodeLen, Decode, DecodeLen, BytesReader, ReadError};

impl Encode for Preimage {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(self.blob.len() + 8);

        self.requester.encode_to(&mut blob);
        self.blob.encode_len().encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Preimage {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(Preimage { requester: ServiceId::decode(blob)?, blob: Vec::<u8>::decode_len(blob)? })
    }
}
