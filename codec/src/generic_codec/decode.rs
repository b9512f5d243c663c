use crate::{Decode, DecodeLen, ReadError, BytesReader};

pub fn decode_unsigned(data: &mut BytesReader) -> Result<usize, ReadError> {

    let first_byte = data.read_byte()?;
    let l = first_byte.leading_ones() as usize;

    if l == 0 {
        return Ok(first_byte as usize);
    }

    let result = decode_integer(data, l)?;

    if l == 8 {
        return Ok(result);
    }

    let mask = (1u16 << (7 - l)) as u8 - 1;

    Ok(result | ((first_byte & mask) as usize) << (8 * l))
}

pub fn decode_integer(data: &mut BytesReader, l: usize) -> Result<usize, ReadError> {
    if l > std::mem::size_of::<usize>() {
        return Err(ReadError::ConversionError);
    }
    let mut array = [0u8; std::mem::size_of::<usize>()];
    let bytes = data.read_bytes(l)?;
    array[..l].copy_from_slice(bytes);
    Ok(usize::from_le_bytes(array))
}

pub fn decode_to_bits(bytes: &mut BytesReader, n: usize) -> Result<Vec<bool>, ReadError> {
    let mut bools = Vec::with_capacity(n * 8);

    for _ in 0..n {
        let byte = bytes.read_byte()?;
        for i in 0..8 {
            bools.push(byte & (1 << i) != 0);
        }
    }

    Ok(bools)
}

macro_rules! impl_decode_int {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(reader: &mut BytesReader) -> Result<Self, ReadError> {
                    let bytes = reader.read_bytes(std::mem::size_of::<$t>())?;
                    let mut array = [0u8; std::mem::size_of::<$t>()];
                    array.copy_from_slice(bytes);
                    Ok(<$t>::from_le_bytes(array))
                }
            }
        )*
    };
}

impl_decode_int!(u8, u16, u32, u64);

impl Decode for bool {
    fn decode(reader: &mut BytesReader) -> Result<Self, ReadError> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ReadError::InvalidData),
        }
    }
}

impl<T, const N: usize> Decode for [T; N]
where
    T: Decode + Default + Copy,
{
    fn decode(reader: &mut BytesReader) -> Result<Self, ReadError> {
        let mut array: [T; N] = [T::default(); N];
        for item in array.iter_mut() {
            *item = T::decode(reader)?;
        }
        Ok(array)
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    fn decode(reader: &mut BytesReader) -> Result<Self, ReadError> {
        Ok((A::decode(reader)?, B::decode(reader)?))
    }
}

impl<T: Decode> Decode for Option<T> {

    fn decode(blob: &mut BytesReader) -> Result<Self, ReadError> {

        match blob.read_byte()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(blob)?)),
            _ => Err(ReadError::InvalidData),
        }
    }
}

impl<T: Decode> DecodeLen for Vec<T> {

    fn decode_len(reader: &mut BytesReader) -> Result<Vec<T>, ReadError> {

        let len = decode_unsigned(reader)?;
        // Every item takes at least one byte, so a larger length can only be malformed input
        if len > reader.data.len() - reader.position {
            return Err(ReadError::NotEnoughData);
        }

        let mut result = Vec::with_capacity(len);

        for _ in 0..len {
            result.push(T::decode(reader)?);
        }

        Ok(result)
    }
}

/// Fixed-length sequence of `n` items.
pub fn decode_fixed<T: Decode>(reader: &mut BytesReader, n: usize) -> Result<Vec<T>, ReadError> {
    let mut result = Vec::with_capacity(n);
    for _ in 0..n {
        result.push(T::decode(reader)?);
    }
    Ok(result)
}
