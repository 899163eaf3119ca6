use super::{Alphabet, ALPHABET, BYTES, CHARACTERS, RADIX};
use crate::base_common::alphabet::{self, Character};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BufferTooSmall,
    InvalidCharacter { character: u8, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooSmall => write!(f, "Output buffer too small"),
            Error::InvalidCharacter { character, index } => write!(f, "Invalid character {} at index {}", Character(*character), index),
        }
    }
}

impl From<alphabet::DecodeError> for Error {
    fn from(error: alphabet::DecodeError) -> Self {
        match error {
            alphabet::DecodeError::InvalidCharacter { character, index } => Error::InvalidCharacter { character, index },
        }
    }
}

/// Length of the decoding of `len` characters: every started group of five
/// characters holds one character more than it yields bytes.
pub const fn decoded_len(len: usize) -> usize {
    len - (len + CHARACTERS - 1) / CHARACTERS
}

pub struct Decoder<'a> {
    alphabet: &'a Alphabet<85>,
}

impl<'a> Decoder<'a> {
    pub const fn new(alphabet: &'a Alphabet<85>) -> Self {
        Self { alphabet }
    }

    /// `offset` is the index of the group's first character in the whole input.
    fn decode_group(&self, group: &[u8], offset: usize) -> Result<[u8; BYTES], Error> {
        let mut value: u64 = 0;
        for index in 0..CHARACTERS {
            // a short final group is filled with the last alphabet character
            let character = group.get(index).copied().unwrap_or_else(|| self.alphabet.last());
            value = value * RADIX + self.alphabet.value(character, offset + index)? as u64;
        }
        // five digits can exceed 32 bits; only the low 32 are kept
        Ok(((value & 0xFFFF_FFFF) as u32).to_be_bytes())
    }

    pub fn decode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        let input = input.as_ref();
        let output = output.as_mut();
        let len = decoded_len(input.len());
        let output = output.get_mut(..len).ok_or(Error::BufferTooSmall)?;

        let mut output_index = 0;
        for (group_index, group) in input.chunks(CHARACTERS).enumerate() {
            // a group of n < 5 characters keeps only its first n - 1 bytes
            let bytes = self.decode_group(group, group_index * CHARACTERS)?;
            let count = group.len() - (CHARACTERS - BYTES);
            output[output_index..output_index + count].copy_from_slice(&bytes[..count]);
            output_index += count;
        }
        Ok(output_index)
    }

    pub fn decode(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
        let mut output = vec![0u8; decoded_len(input.as_ref().len())];
        let len = self.decode_into(input, &mut output)?;
        output.truncate(len);
        Ok(output)
    }

    pub fn default() -> &'static Self {
        &DECODER
    }
}

const DECODER: Decoder = Decoder::new(&ALPHABET);

pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    Decoder::default().decode(input)
}

pub fn decode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    Decoder::default().decode_into(input, output)
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn decode() {
        assert_eq!(super::decode(""), Ok(vec![]));
        assert_eq!(super::decode("#####"), Ok(vec![0x00, 0x00, 0x00, 0x00]));
        assert_eq!(super::decode("{>^3#"), Ok(vec![0xff, 0xff, 0xff, 0xff]));
        assert_eq!(super::decode("pWCTd"), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(super::decode(";t"), Ok(vec![0x41]));
        assert_eq!(super::decode("##"), Ok(vec![0x00]));
        assert_eq!(super::decode("zz"), Ok(vec![0xff]));
        assert_eq!(super::decode("{>T"), Ok(vec![0xff, 0xff]));
        assert_eq!(super::decode("{>^0"), Ok(vec![0xff, 0xff, 0xff]));
        assert_eq!(super::decode(";{ly2=6"), Ok(vec![0x41, 0x42, 0x43, 0x44, 0x45]));
        assert_eq!(super::decode("P2nWR#B"), Ok(vec![0x80, 0x00, 0x00, 0x00, 0x01]));
        assert_eq!(super::decode("#########"), Ok(vec![0x00; 7]));
        assert_eq!(
            super::decode("##03*$?m}="),
            Ok(vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07])
        );
        assert_eq!(super::decode(">=k[XJer=HKjw="), Ok(b"Hello world".to_vec()));
    }

    #[test]
    fn decode_partial_groups() {
        // a lone trailing character carries no byte
        assert_eq!(super::decode("}"), Ok(vec![]));
        assert_eq!(super::decode("#"), Ok(vec![]));
        assert_eq!(super::decode("pWCTd#"), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
        // group values above u32::MAX wrap to their low 32 bits
        assert_eq!(super::decode("}}}}}"), Ok(vec![0x08, 0x78, 0x0e, 0xc4]));
    }

    #[test]
    fn decode_invalid() {
        assert_eq!(super::decode("ab\"de"), Err(Error::InvalidCharacter { character: b'"', index: 2 }));
        assert_eq!(super::decode("pWCTd,"), Err(Error::InvalidCharacter { character: b',', index: 5 }));
        assert_eq!(super::decode("pWCTd\\a"), Err(Error::InvalidCharacter { character: b'\\', index: 5 }));
        assert_eq!(super::decode("#é"), Err(Error::InvalidCharacter { character: 0xc3, index: 1 }));
        assert_eq!(super::decode(" "), Err(Error::InvalidCharacter { character: b' ', index: 0 }));
    }

    #[test]
    fn decoded_len() {
        for (len, expected) in [(0, 0), (1, 0), (2, 1), (3, 2), (4, 3), (5, 4), (6, 4), (7, 5), (10, 8)] {
            assert_eq!(super::decoded_len(len), expected);
        }
    }

    #[test]
    fn decode_into() {
        let mut output = [0u8; 6];
        assert_eq!(super::decode_into("pWCTd;t", &mut output), Ok(5));
        assert_eq!(output, [0xde, 0xad, 0xbe, 0xef, 0x41, 0x00]);

        let mut output = [0u8; 4];
        assert_eq!(super::decode_into("pWCTd;t", &mut output), Err(Error::BufferTooSmall));
    }
}
