use super::{Alphabet, ALPHABET, BYTES, CHARACTERS, RADIX};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The output buffer was too small to contain the encoded input.
    BufferTooSmall,
    /// A packed group did not fit in 32 bits.
    Overflow { value: u64 },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooSmall => write!(f, "Output buffer too small"),
            Error::Overflow { value } => write!(f, "Group value {} > {}", value, u32::MAX),
        }
    }
}

/// Length of the encoding of `len` bytes: every started group of four bytes
/// costs one character on top of the bytes themselves.
pub const fn encoded_len(len: usize) -> usize {
    len + (len + BYTES - 1) / BYTES
}

pub struct Encoder<'a> {
    alphabet: &'a Alphabet<85>,
}

impl<'a> Encoder<'a> {
    pub const fn new(alphabet: &'a Alphabet<85>) -> Self {
        Self { alphabet }
    }

    fn encode_group(&self, group: &[u8]) -> Result<[u8; CHARACTERS], Error> {
        // a short final group is zero filled
        let mut value: u64 = 0;
        for index in 0..BYTES {
            value = (value << 8) | group.get(index).copied().unwrap_or(0) as u64;
        }
        let mut value = u32::try_from(value).map_err(|_| Error::Overflow { value })?;

        let mut characters = [0u8; CHARACTERS];
        for character in characters.iter_mut().rev() {
            *character = self.alphabet.character((value % RADIX as u32) as usize);
            value /= RADIX as u32;
        }
        Ok(characters)
    }

    pub fn encode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        let input = input.as_ref();
        let output = output.as_mut();
        let len = encoded_len(input.len());
        let output = output.get_mut(..len).ok_or(Error::BufferTooSmall)?;

        for (group, chunk) in input.chunks(BYTES).zip(output.chunks_mut(CHARACTERS)) {
            // a group of n < 4 bytes keeps only its first n + 1 characters
            let characters = self.encode_group(group)?;
            chunk.copy_from_slice(&characters[..chunk.len()]);
        }
        Ok(len)
    }

    pub fn encode(&self, input: impl AsRef<[u8]>) -> Result<String, Error> {
        let mut output = vec![0u8; encoded_len(input.as_ref().len())];
        let len = self.encode_into(input, &mut output)?;
        output.truncate(len);
        Ok(output.into_iter().map(char::from).collect())
    }

    pub fn default() -> &'static Self {
        &ENCODER
    }
}

const ENCODER: Encoder = Encoder::new(&ALPHABET);

pub fn encode(input: impl AsRef<[u8]>) -> Result<String, Error> {
    Encoder::default().encode(input)
}

pub fn encode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    Encoder::default().encode_into(input, output)
}
