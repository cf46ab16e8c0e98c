//! A junction file reader.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::iter;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::record;
use crate::record::Record;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The extension of gzip-compressed files.
const GZIP_EXTENSION: &str = "gz";

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A malformed record along with its (1-based) line number.
    Record(usize, record::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Record(line_no, err) => write!(f, "malformed record at line {line_no}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A junction file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a junction file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"track name=junctions\nchr1\t95\t205\tj\t1\t+\t100\t200\t0\t2\t5,5\t0,105";
    /// let reader = splicecmp::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Gets the number of lines read so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"track name=junctions\r\nchr1";
    /// let mut reader = splicecmp::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 22);
    /// assert_eq!(buffer, "track name=junctions");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 4);
    /// assert_eq!(buffer, "chr1");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        let read = read_line(&mut self.inner, buffer)?;

        if read > 0 {
            self.line_no += 1;
        }

        Ok(read)
    }

    /// Attempts to read the next [`Record`] from the underlying reader.
    ///
    /// Blank lines are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\t95\t205\tj\t1\t+\t100\t200\t0\t2\t5,5\t0,105\n\n";
    /// let mut reader = splicecmp::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// let record = reader.read_record(&mut buffer)?.unwrap();
    /// assert_eq!(record.chromosome(), "chr1");
    ///
    /// assert!(reader.read_record(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>> {
        loop {
            match self.read_line_raw(buffer).map_err(Error::Io)? {
                0 => return Ok(None),
                _ if buffer.trim().is_empty() => continue,
                _ => {
                    let record = buffer
                        .parse::<Record>()
                        .map_err(|e| Error::Record(self.line_no, e))?;
                    return Ok(Some(record));
                }
            }
        }
    }

    /// Returns an iterator over the [`Record`]s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chr1\t95\t205\tj\t1\t+\t100\t200\t0\t2\t5,5\t0,105\n\
    ///              chr2\t95\t205\tj\t1\t-\t100\t200\t0\t2\t5,5\t0,105";
    /// let mut reader = splicecmp::Reader::new(&data[..]);
    ///
    /// let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(records.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a junction file, decompressing it if the file name ends in
    /// `.gz`.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let inner: Box<dyn BufRead> = match path.extension() {
            Some(ext) if ext == GZIP_EXTENSION => Box::new(BufReader::new(GzDecoder::new(file))),
            _ => Box::new(BufReader::new(file)),
        };

        Ok(Self::new(inner))
    }
}

/// Reads a line from a buffered reader, stripping the line terminator.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}
