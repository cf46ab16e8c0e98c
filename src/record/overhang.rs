//! The overhang descriptor of a junction record.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;

/// The delimiter between the left and right overhang.
pub const OVERHANG_DELIMITER: char = ',';

/// The number of expected parts in an overhang descriptor.
pub const NUM_OVERHANG_PARTS: usize = 2;

/// An error associated with parsing an overhang descriptor.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of comma-separated parts.
    IncorrectNumberOfParts(usize),

    /// An invalid left overhang.
    InvalidLeft(ParseIntError),

    /// An invalid right overhang.
    InvalidRight(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfParts(n) => write!(
                f,
                "invalid number of parts in overhang: expected {NUM_OVERHANG_PARTS} parts, found \
                 {n} parts"
            ),
            ParseError::InvalidLeft(err) => write!(f, "invalid left overhang: {err}"),
            ParseError::InvalidRight(err) => write!(f, "invalid right overhang: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// The left and right overhangs of a junction.
///
/// Some aligners report a junction as the pair of exon blocks that flank it.
/// The overhangs are the lengths of those blocks, so adding the left overhang
/// to the block start and subtracting the right overhang from the block end
/// recovers the intron itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Overhang {
    /// The left overhang.
    left: Number,

    /// The right overhang.
    right: Number,
}

impl Overhang {
    /// Creates a new [`Overhang`].
    ///
    /// # Examples
    ///
    /// ```
    /// use splicecmp::record::Overhang;
    ///
    /// let overhang = Overhang::new(5, 10);
    /// assert_eq!(overhang.left(), 5);
    /// assert_eq!(overhang.right(), 10);
    /// ```
    pub fn new(left: Number, right: Number) -> Self {
        Self { left, right }
    }

    /// Gets the left overhang.
    pub fn left(&self) -> Number {
        self.left
    }

    /// Gets the right overhang.
    pub fn right(&self) -> Number {
        self.right
    }
}

impl FromStr for Overhang {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // BED12 writers commonly terminate block lists with a comma.
        let s = s.strip_suffix(OVERHANG_DELIMITER).unwrap_or(s);

        let parts = s.split(OVERHANG_DELIMITER).collect::<Vec<_>>();
        if parts.len() != NUM_OVERHANG_PARTS {
            return Err(ParseError::IncorrectNumberOfParts(parts.len()));
        }

        let left = parts[0].parse().map_err(ParseError::InvalidLeft)?;
        let right = parts[1].parse().map_err(ParseError::InvalidRight)?;

        Ok(Self { left, right })
    }
}

impl std::fmt::Display for Overhang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{OVERHANG_DELIMITER}{}", self.left, self.right)
    }
}
