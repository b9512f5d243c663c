use std::collections::BTreeMap;

use jam_types::{Gas, Privileges, ServiceId};
use crate::{Encode, Decode, BytesReader, ReadError};
use crate::generic_codec::{encode_unsigned, decode_unsigned};

impl Encode for Privileges {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(12 + self.always_acc.len() * 12);

        self.bless.encode_to(&mut blob);
        self.assign.encode_to(&mut blob);
        self.designate.encode_to(&mut blob);
        encode_unsigned(self.always_acc.len()).encode_to(&mut blob);

        // BTreeMap iterates in key order
        for (service, gas) in self.always_acc.iter() {
            service.encode_to(&mut blob);
            gas.encode_to(&mut blob);
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Privileges {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        let bless = ServiceId::decode(blob)?;
        let assign = ServiceId::decode(blob)?;
        let designate = ServiceId::decode(blob)?;

        let num_always_acc = decode_unsigned(blob)?;
        let mut always_acc = BTreeMap::new();

        for _ in 0..num_always_acc {
            let service = ServiceId::decode(blob)?;
            let gas = Gas::decode(blob)?;
            if always_acc.insert(service, gas).is_some() {
                return Err(ReadError::InvalidData);
            }
        }

        Ok(Privileges { bless, assign, designate, always_acc })
    }
}
