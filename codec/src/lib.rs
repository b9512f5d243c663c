use constants::ChainSpec;
pub use jam_types::ReadError;

pub mod generic_codec;
pub mod jam_codec;

pub trait Encode {
    fn encode(&self) -> Vec<u8>;
    fn encode_to(&self, into: &mut Vec<u8>);
}

pub trait EncodeSize {
    fn encode_size(&self, l: usize) -> Vec<u8>;
}

pub trait EncodeLen {
    fn encode_len(&self) -> Vec<u8>;
}

pub trait Decode: Sized {
    fn decode(reader: &mut BytesReader) -> Result<Self, ReadError>;
}

pub trait DecodeLen: Sized {
    fn decode_len(reader: &mut BytesReader) -> Result<Self, ReadError>;
}

/// Decoding of records whose fixed-size sequences are sized by the chain parameters
/// (one entry per core, per validator or per epoch slot).
pub trait DecodeSpec: Sized {
    fn decode_spec(reader: &mut BytesReader, spec: &ChainSpec) -> Result<Self, ReadError>;
}

pub struct BytesReader<'a> {
    pub position: usize,
    pub data: &'a [u8],
}

impl<'a> BytesReader<'a> {

    pub fn new(data: &'a [u8]) -> Self {
        BytesReader { data, position: 0 }
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], ReadError> {

        if self.position + length > self.data.len() {
            log::trace!("Not enough data at position: {}, length {}", self.position, length);
            return Err(ReadError::NotEnoughData);
        }

        let bytes = &self.data[self.position..self.position + length];
        self.position += length;

        Ok(bytes)
    }

    pub fn read_byte(&mut self) -> Result<u8, ReadError> {

        if self.position + 1 > self.data.len() {
            log::trace!("Not enough data at position: {}", self.position);
            return Err(ReadError::NotEnoughData);
        }

        let byte = self.data[self.position];
        self.position += 1;

        Ok(byte)
    }

    pub fn get_position(&self) -> usize {
        self.position
    }

    pub fn is_consumed(&self) -> bool {
        self.position == self.data.len()
    }
}

/// Decodes a whole blob, rejecting trailing bytes.
pub fn decode_all<T: Decode>(bytes: &[u8]) -> Result<T, ReadError> {
    let mut reader = BytesReader::new(bytes);
    let value = T::decode(&mut reader)?;
    if !reader.is_consumed() {
        return Err(ReadError::InvalidData);
    }
    Ok(value)
}

/// Same as `decode_all` for chain-spec sized records.
pub fn decode_all_spec<T: DecodeSpec>(bytes: &[u8], spec: &ChainSpec) -> Result<T, ReadError> {
    let mut reader = BytesReader::new(bytes);
    let value = T::decode_spec(&mut reader, spec)?;
    if !reader.is_consumed() {
        return Err(ReadError::InvalidData);
    }
    Ok(value)
}
