//! A junction record.
//!
//! Junction records are rows of a junction BED file. Only the columns that
//! identify the junction are retained: the chromosome, the strand, the block
//! boundaries (`thickStart`/`thickEnd`), and the overhang descriptor
//! (`blockSizes`).

pub mod overhang;

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;
pub use overhang::Overhang;

use crate::strand;
use crate::Strand;

/// The column holding the chromosome.
const CHROMOSOME_FIELD: usize = 0;

/// The column holding the strand.
const STRAND_FIELD: usize = 5;

/// The column holding the block start.
const BLOCK_START_FIELD: usize = 6;

/// The column holding the block end.
const BLOCK_END_FIELD: usize = 7;

/// The column holding the overhang descriptor.
const OVERHANG_FIELD: usize = 10;

/// The minimum number of expected fields in a junction record.
pub const MIN_NUM_FIELDS: usize = OVERHANG_FIELD + 1;

/// An error associated with parsing a junction record.
#[derive(Debug)]
pub enum ParseError {
    /// Too few fields in the junction line.
    IncorrectNumberOfFields(usize),

    /// An invalid block start.
    InvalidBlockStart(ParseIntError),

    /// An invalid block end.
    InvalidBlockEnd(ParseIntError),

    /// An invalid strand.
    InvalidStrand(strand::ParseError),

    /// An invalid overhang descriptor.
    InvalidOverhang(overhang::ParseError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in junction: expected at least {MIN_NUM_FIELDS} \
                 fields, found {n} fields"
            ),
            ParseError::InvalidBlockStart(err) => write!(f, "invalid block start: {err}"),
            ParseError::InvalidBlockEnd(err) => write!(f, "invalid block end: {err}"),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {err}"),
            ParseError::InvalidOverhang(err) => write!(f, "invalid overhang: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A junction record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The chromosome name.
    chromosome: String,

    /// The start of the reported block.
    block_start: Number,

    /// The end of the reported block.
    block_end: Number,

    /// The strand.
    strand: Strand,

    /// The overhangs flanking the junction.
    overhang: Overhang,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use splicecmp::record::Overhang;
    /// use splicecmp::record::Record;
    /// use splicecmp::Strand;
    ///
    /// let record = Record::new("chr1", 100, 200, Strand::Positive, Overhang::new(5, 10));
    ///
    /// assert_eq!(record.chromosome(), "chr1");
    /// assert_eq!(record.block_start(), 100);
    /// assert_eq!(record.block_end(), 200);
    /// assert_eq!(record.strand(), Strand::Positive);
    /// assert_eq!(record.overhang(), Overhang::new(5, 10));
    /// ```
    pub fn new(
        chromosome: impl Into<String>,
        block_start: Number,
        block_end: Number,
        strand: Strand,
        overhang: Overhang,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            block_start,
            block_end,
            strand,
            overhang,
        }
    }

    /// Gets the chromosome name.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the start of the reported block.
    pub fn block_start(&self) -> Number {
        self.block_start
    }

    /// Gets the end of the reported block.
    pub fn block_end(&self) -> Number {
        self.block_end
    }

    /// Gets the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the overhangs.
    pub fn overhang(&self) -> Overhang {
        self.overhang
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();
        if parts.len() < MIN_NUM_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let chromosome = parts[CHROMOSOME_FIELD].to_string();
        let strand = parts[STRAND_FIELD]
            .parse()
            .map_err(ParseError::InvalidStrand)?;
        let block_start = parts[BLOCK_START_FIELD]
            .parse()
            .map_err(ParseError::InvalidBlockStart)?;
        let block_end = parts[BLOCK_END_FIELD]
            .parse()
            .map_err(ParseError::InvalidBlockEnd)?;
        let overhang = parts[OVERHANG_FIELD]
            .parse()
            .map_err(ParseError::InvalidOverhang)?;

        Ok(Self {
            chromosome,
            block_start,
            block_end,
            strand,
            overhang,
        })
    }
}
