use std::collections::VecDeque;

use jam_types::{BlockInfo, Mmr, MmrPeak, RecentBlocks, ReportedPackage, HeaderHash, StateRoot};
use crate::{Encode, EncodeLen, Decode, DecodeLen, BytesReader, ReadError};

impl Encode for Mmr {

    fn encode(&self) -> Vec<u8> {
        self.peaks.encode_len()
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for Mmr {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(Mmr { peaks: Vec::<MmrPeak>::decode_len(blob)? })
    }
}

impl Encode for BlockInfo {

    fn encode(&self) -> Vec<u8> {

        let mut blob = Vec::with_capacity(std::mem::size_of::<BlockInfo>());

        self.header_hash.encode_to(&mut blob);
        self.mmr.encode_to(&mut blob);
        self.state_root.encode_to(&mut blob);
        self.reported.encode_len().encode_to(&mut blob);

        return blob;
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for BlockInfo {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        Ok(BlockInfo {
            header_hash: HeaderHash::decode(blob)?,
            mmr: Mmr::decode(blob)?,
            state_root: StateRoot::decode(blob)?,
            reported: Vec::<ReportedPackage>::decode_len(blob)?,
        })
    }
}

impl Encode for RecentBlocks {

    fn encode(&self) -> Vec<u8> {
        self.history.encode_len()
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        into.extend_from_slice(&self.encode());
    }
}

impl Decode for RecentBlocks {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {
        Ok(RecentBlocks { history: VecDeque::from(Vec::<BlockInfo>::decode_len(blob)?) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_info_layout() {
        let info = BlockInfo {
            header_hash: [1u8; 32],
            mmr: Mmr { peaks: vec![None, Some([2u8; 32])] },
            state_root: [3u8; 32],
            reported: vec![],
        };
        let blob = info.encode();

        assert_eq!(32 + 1 + 1 + 33 + 32 + 1, blob.len());
        assert_eq!(2, blob[32]);
        assert_eq!(0, blob[33]);
        assert_eq!(1, blob[34]);
        assert_eq!(info, BlockInfo::decode(&mut BytesReader::new(&blob)).unwrap());
    }
}
