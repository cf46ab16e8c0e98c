//! Sets of junctions and loading them from junction files.

use std::collections::hash_set;
use std::collections::HashSet;
use std::hash::Hash;
use std::io;
use std::io::BufRead;
use std::path::Path;

use tracing::debug;
use tracing::warn;

use crate::key;
use crate::key::Key;
use crate::key::Normalization;
use crate::reader;
use crate::Reader;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to loading a [`JunctionSet`].
#[derive(Debug)]
pub enum Error {
    /// The source could not be opened.
    Open(String, io::Error),

    /// An error reading from the source.
    Reader(String, reader::Error),

    /// A record could not be normalized into a key. The line number is
    /// included.
    Key(String, usize, key::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Open(source, err) => write!(f, "unable to open {source}: {err}"),
            Error::Reader(source, err) => write!(f, "reader error in {source}: {err}"),
            Error::Key(source, line_no, err) => {
                write!(f, "malformed record in {source} at line {line_no}: {err}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Junction sets
////////////////////////////////////////////////////////////////////////////////////////

/// A deduplicated set of junctions.
///
/// The set remembers how many keys were fed into it, which allows detecting
/// sources that contain the same junction more than once.
#[derive(Clone, Debug)]
pub struct JunctionSet<K = Key> {
    /// The unique keys.
    keys: HashSet<K>,

    /// The number of keys before deduplication.
    raw_count: usize,
}

impl<K> JunctionSet<K>
where
    K: Eq + Hash,
{
    /// Gets the number of unique junctions.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set contains no junctions.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Gets the number of keys that went into the set before deduplication.
    pub fn raw_count(&self) -> usize {
        self.raw_count
    }

    /// Gets the number of keys that were dropped as duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use splicecmp::JunctionSet;
    ///
    /// let set = ["a", "b", "a"].into_iter().collect::<JunctionSet<_>>();
    ///
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.raw_count(), 3);
    /// assert_eq!(set.duplicates(), 1);
    /// ```
    pub fn duplicates(&self) -> usize {
        self.raw_count - self.keys.len()
    }

    /// Whether the set contains the provided key.
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Gets the underlying keys.
    pub fn keys(&self) -> &HashSet<K> {
        &self.keys
    }

    /// Returns an iterator over the keys in the set.
    pub fn iter(&self) -> hash_set::Iter<'_, K> {
        self.keys.iter()
    }
}

impl<K> FromIterator<K> for JunctionSet<K>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut keys = HashSet::new();
        let mut raw_count = 0;

        for key in iter {
            keys.insert(key);
            raw_count += 1;
        }

        Self { keys, raw_count }
    }
}

impl<K> PartialEq for JunctionSet<K>
where
    K: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl<K> Eq for JunctionSet<K> where K: Eq + Hash {}

impl<'a, K> IntoIterator for &'a JunctionSet<K> {
    type Item = &'a K;
    type IntoIter = hash_set::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Loader
////////////////////////////////////////////////////////////////////////////////////////

/// Loads [`JunctionSet`]s from junction files.
#[derive(Clone, Copy, Debug)]
pub struct Loader {
    /// How records are normalized into keys.
    normalization: Normalization,

    /// Whether the first line of every source is a header to be discarded.
    skip_first_line: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            normalization: Normalization::default(),
            skip_first_line: true,
        }
    }
}

impl Loader {
    /// Creates a new [`Loader`].
    pub fn new(normalization: Normalization, skip_first_line: bool) -> Self {
        Self {
            normalization,
            skip_first_line,
        }
    }

    /// Gets the normalization applied to each record.
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Whether the first line of every source is discarded.
    pub fn skip_first_line(&self) -> bool {
        self.skip_first_line
    }

    /// Loads a [`JunctionSet`] from a reader.
    ///
    /// The `source` names the reader in diagnostics. A warning is emitted if
    /// the source contains duplicate junctions; this does not fail the load.
    ///
    /// # Examples
    ///
    /// ```
    /// use splicecmp::Loader;
    /// use splicecmp::Reader;
    ///
    /// let data = b"track name=junctions\n\
    ///              chr1\t95\t205\tj\t1\t+\t100\t200\t0\t2\t5,5\t0,105\n\
    ///              chr1\t95\t205\tj\t1\t-\t100\t200\t0\t2\t5,5\t0,105";
    ///
    /// let set = Loader::default().load(Reader::new(&data[..]), "example")?;
    /// assert_eq!(set.len(), 1);
    /// assert_eq!(set.raw_count(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<T>(&self, mut reader: Reader<T>, source: &str) -> Result<JunctionSet>
    where
        T: BufRead,
    {
        if self.skip_first_line {
            let mut buffer = String::new();
            reader
                .read_line_raw(&mut buffer)
                .map_err(|e| Error::Reader(source.to_string(), reader::Error::Io(e)))?;
        }

        let mut keys = Vec::new();
        let mut buffer = String::new();

        while let Some(record) = reader
            .read_record(&mut buffer)
            .map_err(|e| Error::Reader(source.to_string(), e))?
        {
            let key = self
                .normalization
                .normalize(&record)
                .map_err(|e| Error::Key(source.to_string(), reader.line_no(), e))?;
            keys.push(key);
        }

        let set = keys.into_iter().collect::<JunctionSet>();
        debug!(
            "{source}: {} records, {} unique junctions",
            set.raw_count(),
            set.len()
        );

        if set.duplicates() > 0 {
            warn!(
                "non-unique junctions in {source}: {} of {} records are duplicates",
                set.duplicates(),
                set.raw_count()
            );
        }

        Ok(set)
    }

    /// Loads a [`JunctionSet`] from a file on disk.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<JunctionSet> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let reader = Reader::from_path(path).map_err(|e| Error::Open(source.clone(), e))?;
        self.load(reader, &source)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;
    use crate::record::tests::line;

    fn source(lines: &[String]) -> String {
        let mut data = String::from("track name=junctions\n");
        for line in lines {
            data.push_str(line);
            data.push('\n');
        }
        data
    }

    #[test]
    fn test_set_arithmetic_identity() {
        let a = ["j1", "j2", "j3", "j4"].into_iter().collect::<JunctionSet<_>>();
        let b = ["j2", "j4", "j5"].into_iter().collect::<JunctionSet<_>>();

        let intersection = a.keys().intersection(b.keys()).count();
        let difference = a.keys().difference(b.keys()).count();
        assert_eq!(intersection + difference, a.len());
    }

    #[test]
    fn test_load_skips_header() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = source(&[
            line("chr1", 100, 200, "+", "5,10"),
            line("chr1", 300, 400, "+", "5,10"),
        ]);

        let set = Loader::default().load(Reader::new(data.as_bytes()), "test")?;
        assert_eq!(set.len(), 2);
        assert_eq!(set.raw_count(), 2);
        assert_eq!(set.duplicates(), 0);

        let err = Loader::new(Normalization::default(), false)
            .load(Reader::new(data.as_bytes()), "test")
            .unwrap_err();
        assert!(matches!(err, Error::Reader(_, reader::Error::Record(1, _))));

        Ok(())
    }

    #[test]
    fn test_load_applies_normalization() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let data = source(&[
            line("chr1", 100, 200, "+", "5,10"),
            line("chr1", 100, 200, "-", "5,10"),
        ]);

        let set = Loader::new(Normalization::new(true, true), true)
            .load(Reader::new(data.as_bytes()), "test")?;
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Key::from("chr1_105_190_+")));
        assert!(set.contains(&Key::from("chr1_105_190_-")));

        let set = Loader::new(Normalization::new(false, false), true)
            .load(Reader::new(data.as_bytes()), "test")?;
        assert_eq!(set.len(), 1);
        assert_eq!(set.duplicates(), 1);
        assert!(set.contains(&Key::from("chr1_100_200")));

        Ok(())
    }

    #[test]
    fn test_load_fails_on_bad_overhang() {
        let data = source(&[
            line("chr1", 100, 200, "+", "5,10"),
            line("chr1", 100, 110, "+", "50,50"),
        ]);

        let err = Loader::new(Normalization::new(false, true), true)
            .load(Reader::new(data.as_bytes()), "test.bed")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed record in test.bed at line 3: the overhang (50,50) does not fit within \
             the block 100-110"
        );
    }

    #[test]
    fn test_load_path_twice_is_equal() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("set")?;
        let path = dir.path().join("junctions.bed");
        fs::write(
            &path,
            source(&[
                line("chr1", 100, 200, "+", "5,10"),
                line("chr2", 100, 200, "+", "5,10"),
            ]),
        )?;

        let loader = Loader::default();
        assert_eq!(loader.load_path(&path)?, loader.load_path(&path)?);

        let err = loader
            .load_path(dir.path().join("missing.bed"))
            .unwrap_err();
        assert!(matches!(err, Error::Open(_, _)));

        Ok(())
    }
}
