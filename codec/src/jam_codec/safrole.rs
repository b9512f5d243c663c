use constants::ChainSpec;
use jam_types::{
    Safrole, Ticket, TicketBody, TicketsOrKeys, TicketId, TicketAttempt, BandersnatchPublic, BandersnatchRingVrfSignature,
    BandersnatchRingCommitment, ValidatorsData,
};
use crate::{Encode, EncodeLen, Decode, DecodeLen, DecodeSpec, BytesReader, ReadError};
use crate::generic_codec::decode_fixed;

impl Encode for TicketBody {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(33);

        self.id.encode_to(&mut blob);
        self.attempt.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for TicketBody {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(TicketBody { id: TicketId::decode(blob)?, attempt: TicketAttempt::decode(blob)? })
    }
}

impl Encode for Ticket {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(785);

        self.attempt.encode_to(&mut blob);
        self.signature.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Ticket {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(Ticket { attempt: TicketAttempt::decode(blob)?, signature: BandersnatchRingVrfSignature::decode(blob)? })
    }
}

impl Encode for TicketsOrKeys {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        match self {
            TicketsOrKeys::Tickets(tickets) => {
                blob.push(0);
                tickets.encode_to(&mut blob);
            }
            TicketsOrKeys::Keys(keys) => {
                blob.push(1);
                keys.encode_to(&mut blob);
            }
        }

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for TicketsOrKeys {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        match blob.read_byte()? {
            0 => Ok(TicketsOrKeys::Tickets(decode_fixed::<TicketBody>(blob, spec.epoch_length)?)),
            1 => Ok(TicketsOrKeys::Keys(decode_fixed::<BandersnatchPublic>(blob, spec.epoch_length)?)),
            _ => Err(ReadError::InvalidData),
        }
    }
}

impl Encode for Safrole {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        self.pending_validators.encode_to(&mut blob);
        self.epoch_root.encode_to(&mut blob);
        self.seal.encode_to(&mut blob);
        self.ticket_accumulator.encode_len().encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for Safrole {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        Ok(Safrole {
            pending_validators: ValidatorsData::decode_spec(blob, spec)?,
            epoch_root: BandersnatchRingCommitment::decode(blob)?,
            seal: TicketsOrKeys::decode_spec(blob, spec)?,
            ticket_accumulator: Vec::<TicketBody>::decode_len(blob)?,
        })
    }
}
