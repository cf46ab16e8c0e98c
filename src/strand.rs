//! The strand upon which a junction is located.

use std::str::FromStr;

/// An error related to the parsing of a strand.
#[derive(Debug)]
pub struct ParseError(String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a valid strand", self.0)
    }
}

impl std::error::Error for ParseError {}

/// The strand of a junction record.
///
/// Junction BED files use `.` for junctions where the strand could not be
/// inferred (for instance, non-canonical splice motifs).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strand {
    /// The positive strand (`+`).
    Positive,

    /// The negative strand (`-`).
    Negative,

    /// An unknown strand (`.`).
    Unknown,
}

impl FromStr for Strand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Positive),
            "-" => Ok(Self::Negative),
            "." => Ok(Self::Unknown),
            c => Err(ParseError(c.to_string())),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Positive => write!(f, "+"),
            Strand::Negative => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}
