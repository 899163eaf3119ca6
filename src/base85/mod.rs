pub mod decode;
pub mod encode;
pub use crate::base_common::Alphabet;

pub use decode::{decode, decode_into, decoded_len, Decoder};
pub use encode::{encode, encode_into, encoded_len, Encoder};

pub const ALPHABET: Alphabet<85> =
    match Alphabet::new(b"#$%&()*+-0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^_abcdefghijklmnopqrstuvwxyz{|}") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("Could not build alphabet"),
    };

/// Bytes per group.
const BYTES: usize = 4;
/// Characters per group.
const CHARACTERS: usize = 5;
const RADIX: u64 = 85;

#[cfg(test)]
mod tests {
    use super::{decode, encode, ALPHABET};

    #[test]
    fn alphabet() {
        assert_eq!(ALPHABET.len(), 85);
        assert_eq!(ALPHABET.character(0), b'#');
        assert_eq!(ALPHABET.last(), b'}');
        for value in 0..ALPHABET.len() {
            assert_eq!(ALPHABET.value(ALPHABET.character(value), 0), Ok(value as u8));
        }
        for character in [b'"', b'\'', b'\\', b',', b'.', b'/', b'!', b'`', b'~', b' '] {
            assert!(!ALPHABET.contains(character));
        }
    }

    #[test]
    fn roundtrip() {
        let mut state = 0x2545_f491_u32;
        for len in 0..64 {
            let bytes: Vec<u8> = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state as u8
                })
                .collect();
            let encoded = encode(&bytes).unwrap();
            assert_eq!(encoded.len(), 5 * ((len + 3) / 4) - (4 - len % 4) % 4);
            assert!(encoded.bytes().all(|character| ALPHABET.contains(character)));
            assert_eq!(decode(&encoded), Ok(bytes));
        }
    }

    #[test]
    fn roundtrip_extremes() {
        for len in 0..13 {
            for byte in [0x00, 0x01, 0x7f, 0x80, 0xfe, 0xff] {
                let bytes = vec![byte; len];
                assert_eq!(decode(encode(&bytes).unwrap()), Ok(bytes));
            }
        }
    }
}
