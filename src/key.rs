//! Normalization of junction records into comparable keys.
//!
//! Two junction records are considered to describe the same junction if and
//! only if their [`Key`]s are equal. A key is constructed deterministically
//! from the record's fields and a [`Normalization`], which controls whether
//! the strand takes part in the comparison and whether the reported block
//! boundaries should be shifted inward by the overhangs.

use omics::coordinate::position::Number;

use crate::record::Overhang;
use crate::record::Record;

/// The delimiter between the parts of a key.
pub const KEY_DELIMITER: char = '_';

/// An error related to normalizing a [`Record`].
#[derive(Debug)]
pub enum Error {
    /// The overhangs do not fit within the reported block.
    OverhangExceedsBlock(Number, Number, Overhang),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OverhangExceedsBlock(start, end, overhang) => write!(
                f,
                "the overhang ({overhang}) does not fit within the block {start}-{end}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A canonical, comparable identity for a junction.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key(String);

impl Key {
    /// Gets the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes `self` and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The options controlling how a [`Record`] is turned into a [`Key`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Normalization {
    /// Whether the strand is part of the key.
    use_strand: bool,

    /// Whether the block boundaries are shifted inward by the overhangs.
    adjust_for_overhang: bool,
}

impl Normalization {
    /// Creates a new [`Normalization`].
    pub fn new(use_strand: bool, adjust_for_overhang: bool) -> Self {
        Self {
            use_strand,
            adjust_for_overhang,
        }
    }

    /// Whether the strand is part of the key.
    pub fn use_strand(&self) -> bool {
        self.use_strand
    }

    /// Whether the block boundaries are shifted inward by the overhangs.
    pub fn adjust_for_overhang(&self) -> bool {
        self.adjust_for_overhang
    }

    /// Normalizes a [`Record`] into a [`Key`].
    ///
    /// # Examples
    ///
    /// ```
    /// use splicecmp::key::Normalization;
    /// use splicecmp::record::Overhang;
    /// use splicecmp::record::Record;
    /// use splicecmp::Strand;
    ///
    /// let record = Record::new("chr1", 100, 200, Strand::Positive, Overhang::new(5, 10));
    ///
    /// let key = Normalization::new(false, false).normalize(&record)?;
    /// assert_eq!(key.as_str(), "chr1_100_200");
    ///
    /// let key = Normalization::new(true, true).normalize(&record)?;
    /// assert_eq!(key.as_str(), "chr1_105_190_+");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn normalize(&self, record: &Record) -> Result<Key> {
        let (start, end) = if self.adjust_for_overhang {
            adjust(record)?
        } else {
            (record.block_start(), record.block_end())
        };

        let mut key = format!(
            "{}{KEY_DELIMITER}{start}{KEY_DELIMITER}{end}",
            record.chromosome()
        );

        if self.use_strand {
            key.push(KEY_DELIMITER);
            key.push_str(&record.strand().to_string());
        }

        Ok(Key(key))
    }
}

/// Shifts the block boundaries of a record inward by its overhangs.
fn adjust(record: &Record) -> Result<(Number, Number)> {
    let overhang = record.overhang();
    let err = || {
        Error::OverhangExceedsBlock(record.block_start(), record.block_end(), overhang)
    };

    let start = record
        .block_start()
        .checked_add(overhang.left())
        .ok_or_else(err)?;
    let end = record
        .block_end()
        .checked_sub(overhang.right())
        .ok_or_else(err)?;

    if start > end {
        return Err(err());
    }

    Ok((start, end))
}
