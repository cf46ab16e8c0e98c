//! Export of junction set overlaps to an external Venn diagram renderer.
//!
//! Drawing a diagram is not done by this crate. Instead, a [`Diagram`]
//! collects exactly the numbers a Venn diagram needs (the area of each set,
//! the joint area of every combination of sets, and the labels in area order)
//! and hands them to a [`Renderer`]. Renderers only support diagrams up to a
//! certain number of sets, which is checked when the [`Diagram`] is built.

pub mod script;

use std::hash::Hash;
use std::io;
use std::path::Path;

use nonempty::NonEmpty;

use crate::overlap;
use crate::overlap::CombinationSizes;
use crate::JunctionSet;

pub use script::VennDiagramScript;

/// The minimum number of sets in a diagram.
pub const MIN_SETS: usize = 2;

/// An error related to exporting a Venn diagram.
#[derive(Debug)]
pub enum Error {
    /// Fewer sets than any diagram can show.
    TooFewSets(usize),

    /// More sets than the renderer supports: the number of sets and the
    /// maximum supported.
    TooManySets(usize, usize),

    /// An I/O error.
    Io(io::Error),

    /// The renderer reported a failure.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TooFewSets(n) => write!(
                f,
                "a venn diagram needs at least {MIN_SETS} sets, found {n} sets"
            ),
            Error::TooManySets(n, max) => write!(
                f,
                "the renderer supports at most {max} sets, found {n} sets"
            ),
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Render(err) => write!(f, "render error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The numbers behind a Venn diagram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagram {
    /// The label of each set.
    labels: NonEmpty<String>,

    /// The size of each set, in the same order as the labels.
    areas: NonEmpty<usize>,

    /// The joint area of every combination of sets.
    combinations: CombinationSizes,
}

impl Diagram {
    /// Attempts to create a new [`Diagram`] from labelled sets.
    ///
    /// The sets are numbered from one in the order provided. The number of
    /// sets is checked against `max_sets` before any intersections are
    /// computed.
    ///
    /// # Examples
    ///
    /// ```
    /// use nonempty::nonempty;
    /// use splicecmp::venn::Diagram;
    /// use splicecmp::JunctionSet;
    ///
    /// let reference = ["j1", "j2", "j3"].into_iter().collect::<JunctionSet<_>>();
    /// let star = ["j1", "j2", "j4"].into_iter().collect::<JunctionSet<_>>();
    ///
    /// let diagram = Diagram::try_new(
    ///     nonempty![("Reference", &reference), ("star", &star)],
    ///     5,
    /// )?;
    ///
    /// assert_eq!(diagram.areas().iter().copied().collect::<Vec<_>>(), vec![3, 3]);
    /// assert_eq!(diagram.combinations().len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new<K, S>(sets: NonEmpty<(S, &JunctionSet<K>)>, max_sets: usize) -> Result<Self>
    where
        K: Eq + Hash,
        S: Into<String>,
    {
        let n = sets.len();

        if n < MIN_SETS {
            return Err(Error::TooFewSets(n));
        }

        if n > max_sets {
            return Err(Error::TooManySets(n, max_sets));
        }

        let NonEmpty {
            head: (label, set),
            tail,
        } = sets;

        let mut labels = NonEmpty::new(label.into());
        let mut members = NonEmpty::new(set);

        for (label, set) in tail {
            labels.push(label.into());
            members.push(set);
        }

        let combinations = overlap::combination_sizes(&members);
        let areas = members.map(|set| set.len());

        Ok(Self {
            labels,
            areas,
            combinations,
        })
    }

    /// Gets the number of sets in the diagram.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Always returns `false`, as a diagram has at least two sets.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Gets the labels of the sets.
    pub fn labels(&self) -> &NonEmpty<String> {
        &self.labels
    }

    /// Gets the area of each set.
    pub fn areas(&self) -> &NonEmpty<usize> {
        &self.areas
    }

    /// Gets the joint area of every combination of sets.
    pub fn combinations(&self) -> &CombinationSizes {
        &self.combinations
    }
}

/// An external facility that draws Venn diagrams.
pub trait Renderer {
    /// The maximum number of sets the renderer can draw.
    fn max_sets(&self) -> usize;

    /// Renders a diagram to the destination.
    fn render(&self, diagram: &Diagram, destination: &Path) -> Result<()>;
}

/// Builds a [`Diagram`] for the labelled sets and hands it to a [`Renderer`].
pub fn export<R, K, S>(
    renderer: &R,
    sets: NonEmpty<(S, &JunctionSet<K>)>,
    destination: &Path,
) -> Result<Diagram>
where
    R: Renderer + ?Sized,
    K: Eq + Hash,
    S: Into<String>,
{
    let diagram = Diagram::try_new(sets, renderer.max_sets())?;
    renderer.render(&diagram, destination)?;
    Ok(diagram)
}
