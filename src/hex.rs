use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BufferTooSmall,
    InvalidHexCharacter { character: char, index: usize },
    OddLength,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::BufferTooSmall => write!(f, "Output buffer too small"),
            Error::InvalidHexCharacter { character, index } => write!(f, "Invalid hex character {:?} at index {}", character, index),
            Error::OddLength => write!(f, "Odd number of hex digits"),
        }
    }
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

fn nibble(character: u8, index: usize) -> Result<u8, Error> {
    (character as char)
        .to_digit(16)
        .map(|digit| digit as u8)
        .ok_or(Error::InvalidHexCharacter {
            character: character as char,
            index,
        })
}

pub fn decode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    let input = input.as_ref();
    if input.len() % 2 != 0 {
        return Err(Error::OddLength);
    }
    let output = output.as_mut().get_mut(..input.len() / 2).ok_or(Error::BufferTooSmall)?;
    for (index, (pair, byte)) in input.chunks_exact(2).zip(output.iter_mut()).enumerate() {
        *byte = nibble(pair[0], 2 * index)? << 4 | nibble(pair[1], 2 * index + 1)?;
    }
    Ok(output.len())
}

pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    let mut output = vec![0u8; input.as_ref().len() / 2];
    let len = decode_into(input, &mut output)?;
    output.truncate(len);
    Ok(output)
}

/// Lowercase hex, written straight into a formatter.
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{}{}", DIGITS[(byte >> 4) as usize] as char, DIGITS[(byte & 0x0F) as usize] as char)?;
        }
        Ok(())
    }
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    Hex(input.as_ref()).to_string()
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn encode() {
        assert_eq!(super::encode([]), "");
        assert_eq!(super::encode([0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
        assert_eq!(super::encode(b"Hello world"), "48656c6c6f20776f726c64");
    }

    #[test]
    fn decode() {
        assert_eq!(super::decode(""), Ok(vec![]));
        assert_eq!(super::decode("DEADbeef"), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(super::decode("abc"), Err(Error::OddLength));
        assert_eq!(super::decode("0g"), Err(Error::InvalidHexCharacter { character: 'g', index: 1 }));
    }

    #[test]
    fn decode_into() {
        let mut output = [0u8; 3];
        assert_eq!(super::decode_into("41ff", &mut output), Ok(2));
        assert_eq!(output, [0x41, 0xff, 0x00]);
        assert_eq!(super::decode_into("41ff41ff", &mut output), Err(Error::BufferTooSmall));
    }
}
