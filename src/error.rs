use crate::{base85, hex, vectors};
use std::{error, fmt, io};

/// Application level error: a message ready to be shown to a user.
#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl error::Error for Error {}

macro_rules! from_error {
    ( $( $source:ty => $context:literal ),* $(,)? ) => {
        $(
            impl From<$source> for Error {
                fn from(error: $source) -> Self {
                    Self::new(format!("{}: {}", $context, error))
                }
            }
        )*
    };
}

from_error! {
    base85::encode::Error => "Could not encode",
    base85::decode::Error => "Could not decode",
    hex::Error => "Invalid hex",
    vectors::Error => "Invalid test vectors",
    io::Error => "I/O error",
}
