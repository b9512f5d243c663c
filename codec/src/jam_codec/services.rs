use jam_types::{Balance, Gas, OpaqueHash, ServiceInfo};
use crate::{Encode, Decode, BytesReader, ReadError};

impl Encode for ServiceInfo {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(68);

        self.code_hash.encode_to(&mut blob);
        self.balance.encode_to(&mut blob);
        self.acc_min_gas.encode_to(&mut blob);
        self.xfer_min_gas.encode_to(&mut blob);
        self.bytes.encode_to(&mut blob);
        self.items.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for ServiceInfo {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(ServiceInfo {
            code_hash: OpaqueHash::decode(blob)?,
            balance: Balance::decode(blob)?,
            acc_min_gas: Gas::decode(blob)?,
            xfer_min_gas: Gas::decode(blob)?,
            bytes: u64::decode(blob)?,
            items: u32::decode(blob)?,
        })
    }
}
