//! Discovery and grouping of the junction datasets produced by a pipeline.
//!
//! A pipeline writes one junction file per dataset into a directory. Each file
//! is named `<aligner>-<reads>-<tool>.bed` (optionally gzipped), where the
//! tool part names the junction analysis tool that produced the file. The
//! comparison uses the datasets produced by the `all` tool.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use nonempty::NonEmpty;
use regex::Regex;
use tracing::info;
use tracing::warn;

use crate::overlap;
use crate::overlap::Entry;
use crate::overlap::Label;
use crate::set;
use crate::JunctionSet;
use crate::Loader;

/// The extensions of recognized junction files.
const EXTENSIONS: &[&str] = &[".bed", ".bed.gz"];

/// The tool whose datasets are compared.
pub const ALL_TOOL: &str = "all";

/// The label given to the reference set in diagrams.
pub const REFERENCE_LABEL: &str = "Reference";

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to [`Datasets`].
#[derive(Debug)]
pub enum Error {
    /// The input directory could not be read.
    ReadDirectory(PathBuf, io::Error),

    /// A dataset could not be loaded.
    Load(set::Error),

    /// A dataset required for the comparison was not found.
    MissingDataset(Name),

    /// More than one file names the same dataset.
    DuplicateDataset(Name, PathBuf, PathBuf),

    /// An error comparing the datasets.
    Overlap(overlap::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReadDirectory(path, err) => {
                write!(f, "unable to read directory {}: {err}", path.display())
            }
            Error::Load(err) => write!(f, "load error: {err}"),
            Error::MissingDataset(name) => write!(f, "missing dataset: {name}"),
            Error::DuplicateDataset(name, first, second) => write!(
                f,
                "duplicate dataset: {name} is named by both {} and {}",
                first.display(),
                second.display()
            ),
            Error::Overlap(err) => write!(f, "overlap error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Dataset names
////////////////////////////////////////////////////////////////////////////////////////

/// Matches the `<aligner>-<reads>-<tool>` stem of a dataset file.
static REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^-]+)-([^-]+)-([^-]+)$").unwrap());

/// The name of a dataset.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name {
    /// The aligner.
    aligner: String,

    /// The read sample.
    reads: String,

    /// The junction analysis tool.
    tool: String,
}

impl Name {
    /// Creates a new [`Name`].
    pub fn new(
        aligner: impl Into<String>,
        reads: impl Into<String>,
        tool: impl Into<String>,
    ) -> Self {
        Self {
            aligner: aligner.into(),
            reads: reads.into(),
            tool: tool.into(),
        }
    }

    /// Attempts to parse a name from a file stem.
    ///
    /// [`None`] is returned if the stem is not made of exactly three non-empty
    /// parts separated by `-`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splicecmp::dataset::Name;
    ///
    /// let name = Name::try_new("star-reads1-all").unwrap();
    /// assert_eq!(name.aligner(), "star");
    /// assert_eq!(name.reads(), "reads1");
    /// assert_eq!(name.tool(), "all");
    ///
    /// assert!(Name::try_new("star-reads1").is_none());
    /// ```
    pub fn try_new(stem: impl AsRef<str>) -> Option<Self> {
        let groups = REGEX.captures(stem.as_ref())?;

        Some(Self::new(
            groups.get(1)?.as_str(),
            groups.get(2)?.as_str(),
            groups.get(3)?.as_str(),
        ))
    }

    /// Attempts to parse a name from the file name of a junction file.
    ///
    /// [`None`] is returned if the file does not have a recognized extension
    /// or the stem is not a valid name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        EXTENSIONS
            .iter()
            .rev()
            .find_map(|ext| file_name.strip_suffix(ext))
            .and_then(Self::try_new)
    }

    /// Gets the aligner.
    pub fn aligner(&self) -> &str {
        &self.aligner
    }

    /// Gets the read sample.
    pub fn reads(&self) -> &str {
        &self.reads
    }

    /// Gets the junction analysis tool.
    pub fn tool(&self) -> &str {
        &self.tool
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.aligner, self.reads, self.tool)
    }
}

/// Whether a file name ends in a recognized junction file extension.
fn is_junction_file(file_name: &str) -> bool {
    EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// Lists the junction files within a directory by dataset name.
///
/// Files without a recognized extension are ignored. Junction files whose
/// names cannot be parsed are skipped with a warning. Two files naming the
/// same dataset (such as `star-reads1-all.bed` and `star-reads1-all.bed.gz`)
/// are an error.
pub fn discover(directory: &Path) -> Result<BTreeMap<Name, PathBuf>> {
    let err = |e| Error::ReadDirectory(directory.to_path_buf(), e);

    let mut paths = fs::read_dir(directory)
        .map_err(err)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(err)?;
    paths.sort();

    let mut files = BTreeMap::<Name, PathBuf>::new();

    for path in paths {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        if !path.is_file() || !is_junction_file(file_name) {
            continue;
        }

        match Name::from_file_name(file_name) {
            Some(name) => {
                if let Some(previous) = files.get(&name) {
                    return Err(Error::DuplicateDataset(name, previous.clone(), path));
                }

                files.insert(name, path);
            }
            None => warn!(
                "skipping {}: expected a name of the form <aligner>-<reads>-<tool>",
                path.display()
            ),
        }
    }

    Ok(files)
}

////////////////////////////////////////////////////////////////////////////////////////
// Datasets
////////////////////////////////////////////////////////////////////////////////////////

/// The loaded junction sets of every dataset, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct Datasets {
    /// The junction sets.
    sets: BTreeMap<Name, JunctionSet>,
}

impl Datasets {
    /// Discovers and loads every dataset within a directory.
    pub fn load(directory: &Path, loader: &Loader) -> Result<Self> {
        let mut sets = BTreeMap::new();

        for (name, path) in discover(directory)? {
            let set = loader.load_path(&path).map_err(Error::Load)?;
            info!("loaded: {}; # junctions: {}", path.display(), set.len());
            sets.insert(name, set);
        }

        Ok(Self { sets })
    }

    /// Gets the number of datasets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether there are no datasets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Gets the junction set for a dataset.
    pub fn get(&self, name: &Name) -> Option<&JunctionSet> {
        self.sets.get(name)
    }

    /// Gets the aligners, in sorted order.
    pub fn aligners(&self) -> BTreeSet<&str> {
        self.sets.keys().map(|name| name.aligner()).collect()
    }

    /// Gets the read samples, in sorted order.
    pub fn reads(&self) -> BTreeSet<&str> {
        self.sets.keys().map(|name| name.reads()).collect()
    }

    /// Gets the junction analysis tools, in sorted order.
    pub fn tools(&self) -> BTreeSet<&str> {
        self.sets.keys().map(|name| name.tool()).collect()
    }

    /// Gets the `all` junction set for an aligner and read sample.
    pub fn all(&self, aligner: &str, reads: &str) -> Result<&JunctionSet> {
        let name = Name::new(aligner, reads, ALL_TOOL);
        self.sets.get(&name).ok_or(Error::MissingDataset(name))
    }

    /// Compares the `all` junction set of every aligner and read sample
    /// against the reference.
    ///
    /// Entries are ordered by aligner, then by read sample.
    pub fn compare(&self, reference: &JunctionSet) -> Result<Vec<Entry>> {
        let mut candidates = Vec::new();

        for aligner in self.aligners() {
            for reads in self.reads() {
                candidates.push((Label::new(reads, aligner), self.all(aligner, reads)?));
            }
        }

        overlap::compare(reference, candidates).map_err(Error::Overlap)
    }

    /// Gets the labelled sets to draw in the Venn diagram for a read sample.
    ///
    /// The reference comes first, followed by each aligner's `all` junction
    /// set in sorted aligner order.
    pub fn venn_sets<'a>(
        &'a self,
        reference: &'a JunctionSet,
        reads: &str,
    ) -> Result<NonEmpty<(String, &'a JunctionSet)>> {
        let mut sets = NonEmpty::new((REFERENCE_LABEL.to_string(), reference));

        for aligner in self.aligners() {
            sets.push((aligner.to_string(), self.all(aligner, reads)?));
        }

        Ok(sets)
    }
}

impl FromIterator<(Name, JunctionSet)> for Datasets {
    fn from_iter<I: IntoIterator<Item = (Name, JunctionSet)>>(iter: I) -> Self {
        Self {
            sets: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;
    use crate::key::Key;
    use crate::record::tests::line;

    fn set(keys: &[&str]) -> JunctionSet {
        keys.iter().map(|key| Key::from(*key)).collect()
    }

    fn datasets() -> Datasets {
        [
            (Name::new("star", "reads1", "all"), set(&["j1", "j2", "j4"])),
            (Name::new("star", "reads2", "all"), set(&["j1"])),
            (Name::new("hisat", "reads1", "all"), set(&["j1", "j2", "j3"])),
            (Name::new("hisat", "reads2", "all"), set(&["j3", "j5"])),
            (Name::new("hisat", "reads1", "portcullis"), set(&["j1"])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_names() {
        assert_eq!(
            Name::from_file_name("star-reads1-all.bed"),
            Some(Name::new("star", "reads1", "all"))
        );
        assert_eq!(
            Name::from_file_name("star-reads1-all.bed.gz"),
            Some(Name::new("star", "reads1", "all"))
        );
        assert_eq!(Name::from_file_name("star-reads1-all.tab"), None);
        assert_eq!(Name::from_file_name("star-reads1.bed"), None);
        assert_eq!(Name::from_file_name("star-reads-1-all.bed"), None);
        assert_eq!(Name::from_file_name("star--all.bed"), None);
        assert_eq!(
            Name::new("star", "reads1", "all").to_string(),
            "star-reads1-all"
        );
    }

    #[test]
    fn test_groupings() {
        let datasets = datasets();

        assert_eq!(datasets.len(), 5);
        assert_eq!(
            datasets.aligners().into_iter().collect::<Vec<_>>(),
            vec!["hisat", "star"]
        );
        assert_eq!(
            datasets.reads().into_iter().collect::<Vec<_>>(),
            vec!["reads1", "reads2"]
        );
        assert_eq!(
            datasets.tools().into_iter().collect::<Vec<_>>(),
            vec!["all", "portcullis"]
        );
    }

    #[test]
    fn test_compare() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let reference = set(&["j1", "j2", "j3"]);
        let entries = datasets().compare(&reference)?;

        let rows = entries
            .iter()
            .map(|entry| {
                (
                    entry.label().aligner(),
                    entry.label().dataset(),
                    entry.in_ref(),
                    entry.missing(),
                    entry.out_ref(),
                )
            })
            .collect::<Vec<_>>();

        assert_eq!(
            rows,
            vec![
                ("hisat", "reads1", 3, 0, 0),
                ("hisat", "reads2", 1, 2, 1),
                ("star", "reads1", 2, 1, 1),
                ("star", "reads2", 1, 2, 0),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_compare_missing_dataset() {
        let mut datasets = datasets();
        datasets.sets.remove(&Name::new("star", "reads2", "all"));

        let err = datasets.compare(&set(&["j1"])).unwrap_err();
        assert_eq!(err.to_string(), "missing dataset: star-reads2-all");
    }

    #[test]
    fn test_compare_empty_reference() {
        let err = datasets().compare(&set(&[])).unwrap_err();
        assert!(matches!(err, Error::Overlap(overlap::Error::EmptyReference)));
    }

    #[test]
    fn test_venn_sets() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let datasets = datasets();
        let reference = set(&["j1", "j2", "j3"]);

        let sets = datasets.venn_sets(&reference, "reads1")?;
        let labels = sets.iter().map(|(label, _)| label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Reference", "hisat", "star"]);
        assert_eq!(sets[2].1.len(), 3);

        Ok(())
    }

    #[test]
    fn test_load_directory() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("datasets")?;
        let contents = |lines: &[String]| format!("track name=junctions\n{}\n", lines.join("\n"));

        fs::write(
            dir.path().join("star-reads1-all.bed"),
            contents(&[
                line("chr1", 100, 200, "+", "5,5"),
                line("chr1", 300, 400, "+", "5,5"),
            ]),
        )?;
        fs::write(
            dir.path().join("hisat-reads1-all.bed"),
            contents(&[line("chr1", 100, 200, "-", "5,5")]),
        )?;
        fs::write(dir.path().join("notes.txt"), "not a junction file")?;
        fs::write(dir.path().join("invalid.bed"), "skipped")?;

        let datasets = Datasets::load(dir.path(), &Loader::default())?;
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets.all("star", "reads1")?.len(), 2);
        assert_eq!(datasets.all("hisat", "reads1")?.len(), 1);

        let err = Datasets::load(&dir.path().join("missing"), &Loader::default()).unwrap_err();
        assert!(matches!(err, Error::ReadDirectory(_, _)));

        Ok(())
    }

    #[test]
    fn test_discover_duplicate_dataset() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("datasets")?;
        let bed = dir.path().join("star-reads1-all.bed");
        let gz = dir.path().join("star-reads1-all.bed.gz");

        fs::write(&bed, "track name=junctions\n")?;
        fs::write(&gz, "")?;

        let err = discover(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "duplicate dataset: star-reads1-all is named by both {} and {}",
                bed.display(),
                gz.display()
            )
        );

        Ok(())
    }
}
