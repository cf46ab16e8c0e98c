//! Tab-delimited reports of overlap entries.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::overlap::Entry;

/// The delimiter between columns.
const DELIMITER: u8 = b'\t';

/// The header row of a report.
pub const HEADER: [&str; 7] = [
    "Dataset", "Aligner", "InRef", "InRef%", "Missing", "Missing%", "OutRef",
];

/// An error related to writing a report.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An error serializing a row.
    Csv(csv::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A report writer.
#[derive(Debug)]
pub struct Writer<W>(csv::Writer<W>)
where
    W: io::Write;

impl<W> Writer<W>
where
    W: io::Write,
{
    /// Creates a new report writer.
    pub fn new(inner: W) -> Self {
        Self(
            csv::WriterBuilder::new()
                .delimiter(DELIMITER)
                .quote_style(csv::QuoteStyle::Never)
                .from_writer(inner),
        )
    }

    /// Writes the header row.
    pub fn write_header(&mut self) -> Result<()> {
        self.0.write_record(HEADER).map_err(Error::Csv)
    }

    /// Writes one row for an [`Entry`].
    pub fn write_entry(&mut self, entry: &Entry) -> Result<()> {
        self.0
            .write_record([
                entry.label().dataset().to_string(),
                entry.label().aligner().to_string(),
                entry.in_ref().to_string(),
                format!("{:.2}", entry.in_ref_percent()),
                entry.missing().to_string(),
                format!("{:.2}", entry.missing_percent()),
                entry.out_ref().to_string(),
            ])
            .map_err(Error::Csv)
    }

    /// Writes the header row followed by a row for each [`Entry`].
    pub fn write_report<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a Entry>,
    ) -> Result<()> {
        self.write_header()?;

        for entry in entries {
            self.write_entry(entry)?;
        }

        Ok(())
    }

    /// Flushes and consumes the writer, returning the inner writer.
    pub fn into_inner(self) -> Result<W> {
        self.0
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))
    }
}

/// Formats a report as text.
///
/// # Examples
///
/// ```
/// use splicecmp::overlap;
/// use splicecmp::overlap::Label;
/// use splicecmp::report;
/// use splicecmp::JunctionSet;
///
/// let reference = ["j1", "j2", "j3"].into_iter().collect::<JunctionSet<_>>();
/// let candidate = ["j1", "j2", "j4"].into_iter().collect::<JunctionSet<_>>();
/// let entries = overlap::compare(&reference, [(Label::new("reads", "star"), &candidate)])?;
///
/// assert_eq!(
///     report::format(&entries)?,
///     "Dataset\tAligner\tInRef\tInRef%\tMissing\tMissing%\tOutRef\n\
///      reads\tstar\t2\t66.67\t1\t33.33\t1\n"
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn format<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_report(entries)?;

    let bytes = writer.into_inner()?;
    String::from_utf8(bytes)
        .map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Writes a report to a file, creating or truncating it.
pub fn write_path<'a>(
    path: impl AsRef<Path>,
    entries: impl IntoIterator<Item = &'a Entry>,
) -> Result<()> {
    let file = File::create(path).map_err(Error::Io)?;

    let mut writer = Writer::new(file);
    writer.write_report(entries)?;
    writer.into_inner()?;

    Ok(())
}
