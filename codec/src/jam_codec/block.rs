use constants::ChainSpec;
use jam_types::{
    Assurance, BandersnatchPublic, BandersnatchVrfSignature, Block, DisputesExtrinsic, Ed25519Public, EpochMark, Extrinsic, Guarantee, Header,
    OpaqueHash, Preimage, Ticket, TicketBody, TicketsMark, TimeSlot, ValidatorIndex,
};
use crate::{Encode, EncodeLen, EncodeSize, Decode, DecodeLen, DecodeSpec, BytesReader, ReadError};
use crate::generic_codec::{decode_fixed, decode_unsigned};

impl Encode for Block {

    fn encode(&self) -> Vec<u8> {

        let mut block_blob: Vec<u8> = Vec::new();

        self.header.encode_to(&mut block_blob);
        self.extrinsic.encode_to(&mut block_blob);

        return block_blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for Block {

    fn decode_spec(block_blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let header = Header::decode_spec(block_blob, spec)?;
        let extrinsic = Extrinsic::decode_spec(block_blob, spec)?;

        Ok(Block { header, extrinsic })
    }
}

impl Encode for Extrinsic {

    fn encode(&self) -> Vec<u8> {

        let mut extrinsic_blob: Vec<u8> = Vec::new();

        self.tickets.encode_len().encode_to(&mut extrinsic_blob);
        self.preimages.encode_len().encode_to(&mut extrinsic_blob);
        self.guarantees.encode_len().encode_to(&mut extrinsic_blob);
        self.assurances.encode_len().encode_to(&mut extrinsic_blob);
        self.disputes.encode_to(&mut extrinsic_blob);

        return extrinsic_blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for Extrinsic {

    fn decode_spec(extrinsic_blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let tickets = Vec::<Ticket>::decode_len(extrinsic_blob)?;
        let preimages = Vec::<Preimage>::decode_len(extrinsic_blob)?;
        let guarantees = Vec::<Guarantee>::decode_len(extrinsic_blob)?;

        let num_assurances = decode_unsigned(extrinsic_blob)?;
        if num_assurances > spec.validators_count {
            return Err(ReadError::InvalidData);
        }
        let mut assurances = Vec::with_capacity(num_assurances);
        for _ in 0..num_assurances {
            assurances.push(Assurance::decode_spec(extrinsic_blob, spec)?);
        }

        let disputes = DisputesExtrinsic::decode_spec(extrinsic_blob, spec)?;

        Ok(Extrinsic { tickets, preimages, guarantees, assurances, disputes })
    }
}

// The header comprises a parent hash and prior state root, an extrinsic hash, a time-slot index, the epoch,
// winning-tickets and offenders markers, a block author index and two Bandersnatch signatures: the
// entropy-yielding vrf signature and the block seal.
impl Encode for Header {

    fn encode(&self) -> Vec<u8> {

        let mut header_blob: Vec<u8> = Vec::with_capacity(std::mem::size_of::<Header>());

        self.parent.encode_to(&mut header_blob);
        self.parent_state_root.encode_to(&mut header_blob);
        self.extrinsic_hash.encode_to(&mut header_blob);
        self.slot.encode_size(4).encode_to(&mut header_blob);
        self.epoch_mark.encode_to(&mut header_blob);
        self.tickets_mark.encode_to(&mut header_blob);
        self.author_index.encode_size(2).encode_to(&mut header_blob);
        self.entropy_source.encode_to(&mut header_blob);
        self.offenders_mark.encode_len().encode_to(&mut header_blob);
        self.seal.encode_to(&mut header_blob);

        return header_blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for Header {

    fn decode_spec(header_blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        Ok(Header {
            parent: OpaqueHash::decode(header_blob)?,
            parent_state_root: OpaqueHash::decode(header_blob)?,
            extrinsic_hash: OpaqueHash::decode(header_blob)?,
            slot: TimeSlot::decode(header_blob)?,
            epoch_mark: match header_blob.read_byte()? {
                0 => None,
                1 => Some(EpochMark::decode_spec(header_blob, spec)?),
                _ => return Err(ReadError::InvalidData),
            },
            tickets_mark: match header_blob.read_byte()? {
                0 => None,
                1 => Some(TicketsMark::decode_spec(header_blob, spec)?),
                _ => return Err(ReadError::InvalidData),
            },
            author_index: ValidatorIndex::decode(header_blob)?,
            entropy_source: BandersnatchVrfSignature::decode(header_blob)?,
            offenders_mark: Vec::<Ed25519Public>::decode_len(header_blob)?,
            seal: BandersnatchVrfSignature::decode(header_blob)?,
        })
    }
}

impl Encode for EpochMark {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(64 + self.validators.len() * 64);

        self.entropy.encode_to(&mut blob);
        self.tickets_entropy.encode_to(&mut blob);
        self.validators.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for EpochMark {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        Ok(EpochMark {
            entropy: OpaqueHash::decode(blob)?,
            tickets_entropy: OpaqueHash::decode(blob)?,
            validators: decode_fixed::<(BandersnatchPublic, Ed25519Public)>(blob, spec.validators_count)?,
        })
    }
}

impl Encode for TicketsMark {

    fn encode(&self) -> Vec<u8> {
        self.tickets.encode()
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        self.tickets.encode_to(into);
    }
}

impl DecodeSpec for TicketsMark {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {
        Ok(TicketsMark { tickets: decode_fixed::<TicketBody>(blob, spec.epoch_length)? })
    }
}
