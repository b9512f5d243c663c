use constants::ChainSpec;
use jam_types::{
    Culprit, DisputesExtrinsic, DisputesRecords, Ed25519Public, Ed25519Signature, Fault, Judgement, OpaqueHash, ValidatorIndex, Verdict,
    WorkReportHash,
};
use crate::{Encode, EncodeLen, Decode, DecodeLen, DecodeSpec, BytesReader, ReadError};
use crate::generic_codec::{decode_fixed, decode_unsigned};

impl Encode for DisputesRecords {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        self.good.encode_len().encode_to(&mut blob);
        self.bad.encode_len().encode_to(&mut blob);
        self.wonky.encode_len().encode_to(&mut blob);
        self.offenders.encode_len().encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for DisputesRecords {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(DisputesRecords {
            good: decode_sorted_set::<WorkReportHash>(blob)?,
            bad: decode_sorted_set::<WorkReportHash>(blob)?,
            wonky: decode_sorted_set::<WorkReportHash>(blob)?,
            offenders: decode_sorted_set::<Ed25519Public>(blob)?,
        })
    }
}

// Every disputes set is kept sorted and free of duplicates
fn decode_sorted_set<T: Decode + Ord>(blob: &mut BytesReader) -> Result<Vec<T>, ReadError> {

    let items = Vec::<T>::decode_len(blob)?;

    if !items.windows(2).all(|pair| pair[0] < pair[1]) {
        log::error!("Disputes set not sorted or unique");
        return Err(ReadError::InvalidData);
    }

    Ok(items)
}

impl Encode for Judgement {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(67);

        self.vote.encode_to(&mut blob);
        self.index.encode_to(&mut blob);
        self.signature.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Judgement {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(Judgement {
            vote: bool::decode(blob)?,
            index: ValidatorIndex::decode(blob)?,
            signature: Ed25519Signature::decode(blob)?,
        })
    }
}

impl Encode for Verdict {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        self.target.encode_to(&mut blob);
        self.age.encode_to(&mut blob);
        self.votes.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for Verdict {

    // A verdict carries exactly a super-majority of judgements
    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        Ok(Verdict {
            target: OpaqueHash::decode(blob)?,
            age: u32::decode(blob)?,
            votes: decode_fixed::<Judgement>(blob, spec.super_majority())?,
        })
    }
}

impl Encode for Culprit {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(128);

        self.target.encode_to(&mut blob);
        self.key.encode_to(&mut blob);
        self.signature.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Culprit {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(Culprit {
            target: OpaqueHash::decode(blob)?,
            key: Ed25519Public::decode(blob)?,
            signature: Ed25519Signature::decode(blob)?,
        })
    }
}

impl Encode for Fault {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(129);

        self.target.encode_to(&mut blob);
        self.vote.encode_to(&mut blob);
        self.key.encode_to(&mut blob);
        self.signature.encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Fault {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(Fault {
            target: OpaqueHash::decode(blob)?,
            vote: bool::decode(blob)?,
            key: Ed25519Public::decode(blob)?,
            signature: Ed25519Signature::decode(blob)?,
        })
    }
}

impl Encode for DisputesExtrinsic {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::new();

        self.verdicts.encode_len().encode_to(&mut blob);
        self.culprits.encode_len().encode_to(&mut blob);
        self.faults.encode_len().encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl DecodeSpec for DisputesExtrinsic {

    fn decode_spec(blob: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError> {

        let num_verdicts = decode_unsigned(blob)?;
        let mut verdicts = Vec::with_capacity(num_verdicts.min(blob.data.len()));

        for _ in 0..num_verdicts {
            verdicts.push(Verdict::decode_spec(blob, spec)?);
        }

        Ok(DisputesExtrinsic {
            verdicts,
            culprits: Vec::<Culprit>::decode_len(blob)?,
            faults: Vec::<Fault>::decode_len(blob)?,
        })
    }
}
