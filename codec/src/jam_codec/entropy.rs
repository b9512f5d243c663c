use jam_types::{EntropyPool, OpaqueHash};
use constants::node::ENTROPY_POOL_SIZE;
use crate::{Encode, Decode, BytesReader, ReadError};

impl Encode for EntropyPool {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(std::mem::size_of::<OpaqueHash>() * ENTROPY_POOL_SIZE);

        for entropy in self.buf.iter() {
            entropy.encode_to(&mut blob);
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for EntropyPool {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(EntropyPool { buf: <[OpaqueHash; ENTROPY_POOL_SIZE]>::decode(blob)? })
    }
}
