use std::collections::VecDeque;

use constants::ChainSpec;
use constants::node::MAX_ITEMS_AUTHORIZATION_QUEUE;
use jam_types::{AuthPools, AuthQueues, AuthorizerHash, CodeAuthorizer, CoreIndex};
use crate::{Encode, EncodeLen, Decode, DecodeLen, DecodeSpec, BytesReader, ReadError};
use crate::generic_codec::decode_fixed;

impl Encode for AuthPools {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        for pool in self.0.iter() {
            pool.encode_len().encode_to(&mut blob);
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for AuthPools {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let mut pools = Vec::with_capacity(spec.cores_count);

        for _ in 0..spec.cores_count {
            pools.push(VecDeque::from(Vec::<AuthorizerHash>::decode_len(blob)?));
        }

        Ok(AuthPools(pools))
    }
}

impl Encode for AuthQueues {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(self.0.len() * MAX_ITEMS_AUTHORIZATION_QUEUE * 32);

        for queue in self.0.iter() {
            queue.encode_to(&mut blob);
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for AuthQueues {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let mut queues = Vec::with_capacity(spec.cores_count);

        for _ in 0..spec.cores_count {
            queues.push(decode_fixed::<AuthorizerHash>(blob, MAX_ITEMS_AUTHORIZATION_QUEUE)?);
        }

        Ok(AuthQueues(queues))
    }
}

impl Encode for CodeAuthorizer {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(34);

        self.core.encode_to(&mut blob);
        self.auth_hash.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for CodeAuthorizer {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(CodeAuthorizer {
            core: CoreIndex::decode(blob)?,
            auth_hash: AuthorizerHash::decode(blob)?,
        })
    }
}
