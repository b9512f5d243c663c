mod encode;
mod decode;

pub use encode::{encode_unsigned, encode_integer, encode_from_bits};
pub use decode::{decode_unsigned, decode_integer, decode_to_bits, decode_fixed};
