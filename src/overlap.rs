//! Overlap accounting between a reference junction set and candidate sets.
//!
//! Two facilities are provided here:
//!
//! - [`compare()`], which measures how many of the reference junctions each
//!   candidate recovers, misses, and adds.
//! - [`combination_sizes()`], which computes the size of the intersection of
//!   every combination of two or more sets. These are the joint areas that an
//!   n-way Venn diagram needs.
//!
//! Both are generic over the key type of the [`JunctionSet`]s, so they work
//! on any hashable, comparable junction identity.

use std::collections::BTreeMap;
use std::hash::Hash;

use itertools::Itertools as _;
use nonempty::NonEmpty;

use crate::JunctionSet;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to overlap accounting.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The reference set is empty, so percentages are undefined.
    EmptyReference,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyReference => write!(f, "the reference set contains no junctions"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Labels and entries
////////////////////////////////////////////////////////////////////////////////////////

/// Identifies a candidate set by its dataset (read sample) and aligner.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Label {
    /// The aligner.
    aligner: String,

    /// The dataset.
    dataset: String,
}

impl Label {
    /// Creates a new [`Label`].
    pub fn new(dataset: impl Into<String>, aligner: impl Into<String>) -> Self {
        Self {
            aligner: aligner.into(),
            dataset: dataset.into(),
        }
    }

    /// Gets the dataset.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Gets the aligner.
    pub fn aligner(&self) -> &str {
        &self.aligner
    }
}

/// The overlap of one candidate set with the reference set.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The candidate label.
    label: Label,

    /// The number of reference junctions present in the candidate.
    in_ref: usize,

    /// The number of reference junctions absent from the candidate.
    missing: usize,

    /// The number of candidate junctions absent from the reference.
    out_ref: usize,

    /// The size of the reference set.
    reference_size: usize,
}

impl Entry {
    /// Gets the candidate label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Gets the number of reference junctions present in the candidate.
    pub fn in_ref(&self) -> usize {
        self.in_ref
    }

    /// Gets the number of reference junctions absent from the candidate.
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Gets the number of candidate junctions absent from the reference.
    pub fn out_ref(&self) -> usize {
        self.out_ref
    }

    /// Gets the size of the reference set the entry was computed against.
    pub fn reference_size(&self) -> usize {
        self.reference_size
    }

    /// Gets the percentage of the reference present in the candidate.
    pub fn in_ref_percent(&self) -> f64 {
        percent(self.in_ref, self.reference_size)
    }

    /// Gets the percentage of the reference absent from the candidate.
    pub fn missing_percent(&self) -> f64 {
        percent(self.missing, self.reference_size)
    }
}

/// Computes `count` as a percentage of a non-empty `total`.
fn percent(count: usize, total: usize) -> f64 {
    (count as f64 / total as f64) * 100.0
}

////////////////////////////////////////////////////////////////////////////////////////
// Comparison
////////////////////////////////////////////////////////////////////////////////////////

/// Compares each candidate set against the reference set.
///
/// Entries are returned in the order the candidates were provided.
///
/// # Examples
///
/// ```
/// use splicecmp::overlap;
/// use splicecmp::overlap::Label;
/// use splicecmp::JunctionSet;
///
/// let reference = ["j1", "j2", "j3"].into_iter().collect::<JunctionSet<_>>();
/// let candidate = ["j1", "j2", "j4"].into_iter().collect::<JunctionSet<_>>();
///
/// let entries = overlap::compare(&reference, [(Label::new("reads", "star"), &candidate)])?;
///
/// assert_eq!(entries[0].in_ref(), 2);
/// assert_eq!(entries[0].missing(), 1);
/// assert_eq!(entries[0].out_ref(), 1);
/// assert_eq!(format!("{:.2}", entries[0].in_ref_percent()), "66.67");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compare<'a, K, I>(reference: &JunctionSet<K>, candidates: I) -> Result<Vec<Entry>>
where
    K: Eq + Hash + 'a,
    I: IntoIterator<Item = (Label, &'a JunctionSet<K>)>,
{
    if reference.is_empty() {
        return Err(Error::EmptyReference);
    }

    let reference_size = reference.len();

    Ok(candidates
        .into_iter()
        .map(|(label, candidate)| {
            let in_ref = reference.keys().intersection(candidate.keys()).count();

            Entry {
                label,
                in_ref,
                missing: reference_size - in_ref,
                out_ref: candidate.keys().difference(reference.keys()).count(),
                reference_size,
            }
        })
        .collect())
}

////////////////////////////////////////////////////////////////////////////////////////
// Combinations
////////////////////////////////////////////////////////////////////////////////////////

/// A selection of two or more sets, identified by their ascending, 1-based
/// positions.
///
/// The [`Display`](std::fmt::Display) form concatenates the positions (`"13"`
/// for the first and third sets), as Venn diagram tools name their joint
/// areas. That text is only unambiguous for fewer than ten sets: with
/// thirteen, `{1, 2, 13}` and `{12, 13}` both print `"1213"`. Compare
/// combinations, never their text.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Combination(Vec<usize>);

impl Combination {
    /// Gets the 1-based positions of the sets in the combination.
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    /// Gets the number of sets in the combination.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the combination selects no sets.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for position in &self.0 {
            write!(f, "{position}")?;
        }

        Ok(())
    }
}

/// The intersection size of every combination of sets.
pub type CombinationSizes = BTreeMap<Combination, usize>;

/// Computes the intersection size of every combination of two or more sets.
///
/// The first set is conventionally the reference set and the remaining sets
/// are the candidates, though this function treats them all alike. For `n`
/// sets, `C(n, 2) + C(n, 3) + ... + C(n, n)` sizes are returned.
///
/// # Examples
///
/// ```
/// use nonempty::nonempty;
/// use splicecmp::overlap;
/// use splicecmp::JunctionSet;
///
/// let reference = ["j1", "j2", "j3"].into_iter().collect::<JunctionSet<_>>();
/// let a = ["j1", "j2"].into_iter().collect::<JunctionSet<_>>();
/// let b = ["j2", "j3"].into_iter().collect::<JunctionSet<_>>();
///
/// let sizes = overlap::combination_sizes(&nonempty![&reference, &a, &b]);
///
/// let sizes = sizes
///     .iter()
///     .map(|(combination, size)| (combination.to_string(), *size))
///     .collect::<Vec<_>>();
/// assert_eq!(
///     sizes,
///     vec![
///         (String::from("12"), 2),
///         (String::from("123"), 1),
///         (String::from("13"), 2),
///         (String::from("23"), 1),
///     ]
/// );
/// ```
pub fn combination_sizes<K>(sets: &NonEmpty<&JunctionSet<K>>) -> CombinationSizes
where
    K: Eq + Hash,
{
    let n = sets.len();
    let mut sizes = CombinationSizes::new();

    for k in 2..=n {
        for indices in (0..n).combinations(k) {
            let members = indices
                .iter()
                .filter_map(|i| sets.get(*i))
                .collect::<Vec<_>>();
            let combination = Combination(indices.iter().map(|i| i + 1).collect());

            sizes.insert(combination, intersection_size(&members));
        }
    }

    sizes
}

/// Counts the keys shared by all of the provided sets.
fn intersection_size<K>(sets: &[&&JunctionSet<K>]) -> usize
where
    K: Eq + Hash,
{
    let Some(smallest) = sets.iter().min_by_key(|set| set.len()) else {
        return 0;
    };

    smallest
        .iter()
        .filter(|key| sets.iter().all(|set| set.contains(*key)))
        .count()
}

#[cfg(test)]
mod tests {
    use nonempty::nonempty;

    use super::*;

    fn set(keys: &[&'static str]) -> JunctionSet<&'static str> {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_compare_end_to_end() -> Result<()> {
        let reference = set(&["J1", "J2", "J3"]);
        let candidate = set(&["J1", "J2", "J4"]);

        let entries = compare(&reference, [(Label::new("reads", "star"), &candidate)])?;
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.label().dataset(), "reads");
        assert_eq!(entry.label().aligner(), "star");
        assert_eq!(entry.in_ref(), 2);
        assert_eq!(format!("{:.2}", entry.in_ref_percent()), "66.67");
        assert_eq!(entry.missing(), 1);
        assert_eq!(format!("{:.2}", entry.missing_percent()), "33.33");
        assert_eq!(entry.out_ref(), 1);

        Ok(())
    }

    #[test]
    fn test_compare_invariants() -> Result<()> {
        let reference = set(&["a", "b", "c", "d"]);
        let candidates = [
            set(&[]),
            set(&["a", "b", "c", "d"]),
            set(&["x", "y"]),
            set(&["a", "d", "z"]),
        ];

        let entries = compare(
            &reference,
            candidates
                .iter()
                .enumerate()
                .map(|(i, candidate)| (Label::new(i.to_string(), "aligner"), candidate)),
        )?;

        assert_eq!(entries.len(), candidates.len());
        for entry in &entries {
            assert_eq!(entry.in_ref() + entry.missing(), reference.len());
            assert!((0.0..=100.0).contains(&entry.in_ref_percent()));
            assert!((0.0..=100.0).contains(&entry.missing_percent()));
            assert!((entry.in_ref_percent() + entry.missing_percent() - 100.0).abs() < 1e-9);
        }

        assert_eq!(entries[0].in_ref(), 0);
        assert_eq!(entries[1].missing(), 0);
        assert_eq!(entries[2].out_ref(), 2);
        assert_eq!(entries[3].in_ref(), 2);
        assert_eq!(entries[3].out_ref(), 1);

        Ok(())
    }

    #[test]
    fn test_compare_empty_reference() {
        let reference = set(&[]);
        let candidate = set(&["a"]);

        let err = compare(&reference, [(Label::new("reads", "star"), &candidate)]).unwrap_err();
        assert_eq!(err, Error::EmptyReference);
        assert_eq!(err.to_string(), "the reference set contains no junctions");
    }

    #[test]
    fn test_combination_sizes_three_sets() {
        let reference = set(&["a", "b", "c", "d"]);
        let first = set(&["a", "b", "e"]);
        let second = set(&["b", "c", "e"]);

        let sizes = combination_sizes(&nonempty![&reference, &first, &second]);
        assert_eq!(sizes.len(), 4);

        let lookup = |positions: &[usize]| sizes[&Combination(positions.to_vec())];
        assert_eq!(lookup(&[1, 2]), 2);
        assert_eq!(lookup(&[1, 3]), 2);
        assert_eq!(lookup(&[2, 3]), 2);
        assert_eq!(lookup(&[1, 2, 3]), 1);
    }

    #[test]
    fn test_combination_sizes_completeness() {
        let sets = (0..6)
            .map(|i| set(&["shared", ["a", "b", "c", "d", "e", "f"][i]]))
            .collect::<Vec<_>>();
        let sets = NonEmpty::from_vec(sets.iter().collect::<Vec<_>>()).unwrap();

        let sizes = combination_sizes(&sets);

        // C(6,2) + C(6,3) + C(6,4) + C(6,5) + C(6,6)
        assert_eq!(sizes.len(), 15 + 20 + 15 + 6 + 1);
        assert!(sizes.values().all(|size| *size == 1));
        assert!(sizes.keys().all(|combination| combination.len() >= 2));
        assert!(sizes
            .keys()
            .all(|combination| combination.positions().windows(2).all(|w| w[0] < w[1])));
    }

    #[test]
    fn test_combination_sizes_single_set() {
        let reference = set(&["a"]);
        assert!(combination_sizes(&nonempty![&reference]).is_empty());
    }

    #[test]
    fn test_combination_display() {
        assert_eq!(Combination(vec![1, 3]).to_string(), "13");
        assert_eq!(Combination(vec![1, 2, 4, 5]).to_string(), "1245");
    }

    #[test]
    fn test_combination_text_collides_past_nine_sets() {
        let sets = (0..13).map(|_| set(&["a"])).collect::<Vec<_>>();
        let sets = NonEmpty::from_vec(sets.iter().collect::<Vec<_>>()).unwrap();

        let sizes = combination_sizes(&sets);
        let first = Combination(vec![1, 2, 13]);
        let second = Combination(vec![12, 13]);

        assert_eq!(first.to_string(), second.to_string());
        assert_ne!(first, second);
        assert_eq!(sizes.get(&first), Some(&1));
        assert_eq!(sizes.get(&second), Some(&1));

        // 2^13 - 13 - 1
        assert_eq!(sizes.len(), 8178);
    }
}
