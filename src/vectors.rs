use crate::{base85, hex};
use regex::Regex;
use serde::Serialize;
use std::{error, fmt, fs};

#[derive(Debug)]
pub enum Error {
    InvalidLine { line: usize },
    InvalidHex { line: usize, error: hex::Error },
    Read { path: String, message: String },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLine { line } => write!(f, "Invalid test vector at line {}", line),
            Error::InvalidHex { line, error } => write!(f, "Invalid test vector at line {}: {}", line, error),
            Error::Read { path, message } => write!(f, "Could not read {}: {}", path, message),
        }
    }
}

/// One line of a test vector file: raw bytes and their expected encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vector {
    pub line: usize,
    pub bytes: Vec<u8>,
    pub encoded: String,
}

pub fn parse(text: &str) -> Result<Vec<Vector>, Error> {
    // hex, one space, encoding; either side may be empty
    let regex = Regex::new(r"^([0-9a-fA-F]*) ([^ ]*)$").expect("test vector pattern compiles");
    let mut vectors = Vec::new();
    for (index, text) in text.lines().enumerate() {
        let line = index + 1;
        if text.is_empty() {
            continue;
        }
        let captures = regex.captures(text).ok_or(Error::InvalidLine { line })?;
        let bytes = hex::decode(&captures[1]).map_err(|error| Error::InvalidHex { line, error })?;
        vectors.push(Vector {
            line,
            bytes,
            encoded: captures[2].to_string(),
        });
    }
    Ok(vectors)
}

pub fn read(path: &str) -> Result<Vec<Vector>, Error> {
    let text = fs::read_to_string(path).map_err(|error| Error::Read {
        path: path.to_string(),
        message: error.to_string(),
    })?;
    parse(&text)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encode,
    Decode,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Failure {
    pub line: usize,
    pub direction: Direction,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Encode => write!(f, "line {}: expected encoding {:?}, got {:?}", self.line, self.expected, self.actual),
            Direction::Decode => write!(f, "line {}: expected bytes {}, got {}", self.line, self.expected, self.actual),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Report {
    pub passed: usize,
    pub failures: Vec<Failure>,
    #[serde(skip)]
    progress: String,
}

impl Report {
    fn pass(&mut self) {
        self.passed += 1;
        self.progress.push('.');
    }

    fn fail(&mut self, failure: Failure) {
        self.progress.push('F');
        self.failures.push(failure);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One character per checked direction, `.` when it passed.
    pub fn progress(&self) -> &str {
        &self.progress
    }
}

fn check_encode(vector: &Vector) -> Result<(), Failure> {
    let actual = match base85::encode(&vector.bytes) {
        Ok(encoded) if encoded == vector.encoded => return Ok(()),
        Ok(encoded) => encoded,
        Err(error) => error.to_string(),
    };
    Err(Failure {
        line: vector.line,
        direction: Direction::Encode,
        expected: vector.encoded.clone(),
        actual,
    })
}

fn check_decode(vector: &Vector) -> Result<(), Failure> {
    let actual = match base85::decode(&vector.encoded) {
        Ok(bytes) if bytes == vector.bytes => return Ok(()),
        Ok(bytes) => hex::encode(bytes),
        Err(error) => error.to_string(),
    };
    Err(Failure {
        line: vector.line,
        direction: Direction::Decode,
        expected: hex::encode(&vector.bytes),
        actual,
    })
}

pub fn verify(vectors: &[Vector]) -> Report {
    let mut report = Report::default();
    for vector in vectors {
        for result in [check_encode(vector), check_decode(vector)] {
            match result {
                Ok(()) => report.pass(),
                Err(failure) => report.fail(failure),
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::{Direction, Error, Failure, Vector};

    #[test]
    fn parse() {
        let vectors = super::parse(" \n\n41 ;t\r\nDEADBEEF pWCTd\n").unwrap();
        assert_eq!(
            vectors,
            vec![
                Vector {
                    line: 1,
                    bytes: vec![],
                    encoded: String::new()
                },
                Vector {
                    line: 3,
                    bytes: vec![0x41],
                    encoded: ";t".to_string()
                },
                Vector {
                    line: 4,
                    bytes: vec![0xde, 0xad, 0xbe, 0xef],
                    encoded: "pWCTd".to_string()
                },
            ]
        );
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(super::parse("41 ;t\n41;t"), Err(Error::InvalidLine { line: 2 })));
        assert!(matches!(super::parse("41 ;t extra"), Err(Error::InvalidLine { line: 1 })));
        assert!(matches!(super::parse("414 ;t"), Err(Error::InvalidHex { line: 1, .. })));
    }

    #[test]
    fn verify_golden_file() {
        let vectors = super::parse(include_str!("../data/vectors.txt")).unwrap();
        assert_eq!(vectors.len(), 22);
        let report = super::verify(&vectors);
        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(report.passed, 44);
        assert_eq!(report.progress(), ".".repeat(44));
    }

    #[test]
    fn verify_failures() {
        let vectors = super::parse("42 ;t\n41 ;t\n00 \"\"").unwrap();
        let report = super::verify(&vectors);
        assert!(!report.is_success());
        assert_eq!(report.passed, 2);
        assert_eq!(report.progress(), "FF..FF");
        assert_eq!(
            report.failures[0],
            Failure {
                line: 1,
                direction: Direction::Encode,
                expected: ";t".to_string(),
                actual: "<9".to_string()
            }
        );
        assert_eq!(report.failures[1].direction, Direction::Decode);
        assert_eq!(report.failures[1].expected, "42");
        assert_eq!(report.failures[1].actual, "41");
        assert_eq!(report.failures[3].actual, "Invalid character '\"' at index 0");
    }

    #[test]
    fn report_json() {
        let vectors = super::parse("42 ;t").unwrap();
        let json = serde_json::to_value(super::verify(&vectors)).unwrap();
        assert_eq!(json["passed"], 0);
        assert_eq!(json["failures"][0]["direction"], "encode");
        assert_eq!(json["failures"][1]["direction"], "decode");
        assert!(json.get("progress").is_none());
    }
}
