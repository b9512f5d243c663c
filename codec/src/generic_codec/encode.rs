use std::collections::VecDeque;

use crate::{Encode, EncodeSize, EncodeLen};

/// Variable-length natural number encoding. The count of leading one bits of the
/// prefix byte gives the number of little-endian bytes which follow.
pub fn encode_unsigned(x: usize) -> Vec<u8> {

    if x == 0 {
        return vec![0];
    }

    let bit_length = usize::BITS - x.leading_zeros();
    let mut l = (bit_length - 1) / 7;

    if l > 8 {
        l = 8;
    }

    if l == 0 {
        return vec![x as u8];
    }

    let prefix = if l < 8 {
        (256u64 - (1u64 << (8 - l)) + ((x >> (8 * l)) as u64)) as u8
    } else {
        255u8
    };

    let mut result = vec![prefix];
    result.extend_from_slice(&encode_integer(x, l as usize));
    result
}

pub fn encode_integer(x: usize, l: usize) -> Vec<u8> {

    let mut result = Vec::with_capacity(l);
    let mut value = x as u128;

    for _ in 0..l {
        result.push((value & 0xFF) as u8);
        value >>= 8;
    }

    result
}

pub fn encode_from_bits(v: &[bool]) -> Vec<u8> {
    v.chunks(8)
        .map(|chunk| {
            chunk.iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << i))
        })
        .collect()
}

macro_rules! impl_encode_int {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Vec<u8> {
                    self.to_le_bytes().to_vec()
                }
                fn encode_to(&self, writer: &mut Vec<u8>) {
                    writer.extend_from_slice(&self.to_le_bytes())
                }
            }

            impl EncodeSize for $t {
                fn encode_size(&self, l: usize) -> Vec<u8> {
                    encode_integer(*self as usize, l)
                }
            }
        )*
    };
}

impl_encode_int!(u8, u16, u32, u64);

impl EncodeSize for usize {
    fn encode_size(&self, l: usize) -> Vec<u8> {
        encode_integer(*self, l)
    }
}

impl Encode for bool {
    fn encode(&self) -> Vec<u8> {
        vec![*self as u8]
    }
    fn encode_to(&self, writer: &mut Vec<u8>) {
        writer.push(*self as u8)
    }
}

impl Encode for [u8] {
    fn encode(&self) -> Vec<u8> {
        self.to_vec()
    }
    fn encode_to(&self, writer: &mut Vec<u8>) {
        writer.extend_from_slice(self)
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self) -> Vec<u8> {
        self.to_vec()
    }
    fn encode_to(&self, writer: &mut Vec<u8>) {
        writer.extend_from_slice(self)
    }
}

impl<A: Encode, B: Encode> Encode for (A, B) {
    fn encode(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        self.encode_to(&mut blob);
        blob
    }
    fn encode_to(&self, writer: &mut Vec<u8>) {
        self.0.encode_to(writer);
        self.1.encode_to(writer);
    }
}

// Fixed-length sequences carry no length prefix. Use `encode_len` for variable-length ones.
impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(self.len());
        self.encode_to(&mut blob);
        blob
    }
    fn encode_to(&self, into: &mut Vec<u8>) {
        for item in self.iter() {
            item.encode_to(into);
        }
    }
}

impl<T: Encode> Encode for Option<T> {

    fn encode(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        self.encode_to(&mut blob);
        blob
    }

    fn encode_to(&self, into: &mut Vec<u8>) {
        match self {
            None => {
                into.push(0);
            }
            Some(data) => {
                into.push(1);
                data.encode_to(into);
            }
        }
    }
}

impl<T: Encode> EncodeLen for [T] {

    fn encode_len(&self) -> Vec<u8> {

        let mut blob = encode_unsigned(self.len());

        for item in self.iter() {
            item.encode_to(&mut blob);
        }

        blob
    }
}

impl<T: Encode> EncodeLen for Vec<T> {
    fn encode_len(&self) -> Vec<u8> {
        self.as_slice().encode_len()
    }
}

impl<T: Encode> EncodeLen for VecDeque<T> {

    fn encode_len(&self) -> Vec<u8> {

        let mut blob = encode_unsigned(self.len());

        for item in self.iter() {
            item.encode_to(&mut blob);
        }

        blob
    }
}
