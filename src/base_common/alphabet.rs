use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    DuplicateCharacter { character: char, first: usize, second: usize },
    NonAsciiCharacter { character: u8, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCharacter { character, first, second } => {
                write!(f, "Duplicate character '{}' at indexes {} and {}", character, first, second)
            }
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#04x} at index {}", character, index),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    InvalidCharacter { character: u8, index: usize },
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character {} at index {}", Character(*character), index),
        }
    }
}

/// Renders a byte as a quoted ascii character, or as hex when it is not printable.
pub struct Character(pub u8);

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() || self.0 == b' ' {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "{:#04x}", self.0)
        }
    }
}

/// A fixed table of `N` ascii characters together with its inverse.
///
/// Both directions are built by [`Alphabet::new`], which is `const` so that
/// alphabets can live in `const` items and are checked at compile time.
pub struct Alphabet<const N: usize> {
    characters: [u8; N],
    values: [Option<u8>; 128],
}

impl<const N: usize> Alphabet<N> {
    pub const fn new(characters: &[u8; N]) -> Result<Self, Error> {
        assert!(N <= 256);
        let mut values: [Option<u8>; 128] = [None; 128];

        let mut index = 0;
        while index < N {
            let character = characters[index];
            if character >= 128 {
                return Err(Error::NonAsciiCharacter { character, index });
            }
            if let Some(first) = values[character as usize] {
                return Err(Error::DuplicateCharacter {
                    character: character as char,
                    first: first as usize,
                    second: index,
                });
            }
            values[character as usize] = Some(index as u8);
            index += 1;
        }

        Ok(Self {
            characters: *characters,
            values,
        })
    }

    /// Character for a digit value; `value` must be below `N`.
    pub fn character(&self, value: usize) -> u8 {
        self.characters[value]
    }

    /// Digit value of `character`, which was found at `index` in the input.
    pub fn value(&self, character: u8, index: usize) -> Result<u8, DecodeError> {
        match self.values.get(character as usize) {
            Some(Some(value)) => Ok(*value),
            _ => Err(DecodeError::InvalidCharacter { character, index }),
        }
    }

    pub fn contains(&self, character: u8) -> bool {
        matches!(self.values.get(character as usize), Some(Some(_)))
    }

    pub const fn last(&self) -> u8 {
        self.characters[N - 1]
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub fn as_str(&self) -> &str {
        // every character was checked to be ascii in `new`
        std::str::from_utf8(&self.characters).unwrap_or_default()
    }
}
