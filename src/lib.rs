//! `splicecmp` is a crate for measuring how well the splice junctions reported
//! by alignment pipelines recover a reference set of junctions.
//!
//! The crate provides three main points of entry:
//!
//! - Reading junction files and normalizing each junction into a comparable
//!   [`Key`](crate::key::Key).
//! - Accounting for the overlap between a reference [`JunctionSet`] and any
//!   number of candidate sets.
//! - Handing the overlaps to a report or to an external Venn diagram
//!   renderer.
//!
//! ## Reading junction files
//!
//! Junction files are BED-like files with one junction per line. The
//! [`Reader`] facility parses each line into a
//! [`Record`](crate::record::Record), and a [`Loader`] turns the records of a
//! file into a deduplicated [`JunctionSet`]. How a record becomes a key is
//! controlled by a [`Normalization`](crate::key::Normalization): whether the
//! strand takes part in the comparison, and whether the reported block
//! boundaries are shifted inward by the overhangs to recover the intron.
//!
//! Malformed records are never skipped: loading fails with the offending line
//! number instead.
//!
//! ```
//! use splicecmp::key::Normalization;
//! use splicecmp::Loader;
//! use splicecmp::Reader;
//!
//! let data = b"track name=junctions\n\
//!              chr1\t95\t210\tj1\t10\t+\t100\t200\t255,0,0\t2\t5,10\t0,105\n\
//!              chr1\t95\t210\tj2\t10\t-\t100\t200\t255,0,0\t2\t5,10\t0,105";
//!
//! let loader = Loader::new(Normalization::new(true, true), true);
//! let set = loader.load(Reader::new(&data[..]), "example")?;
//!
//! assert_eq!(set.len(), 2);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Overlap accounting
//!
//! [`overlap::compare()`] measures, for each candidate set, how many of the
//! reference junctions are recovered and missed (both also as a percentage of
//! the reference) and how many junctions fall outside the reference.
//! [`overlap::combination_sizes()`] computes the intersection size of every
//! combination of two or more sets, which is what an n-way Venn diagram
//! needs. Both work with any hashable key type.
//!
//! ```
//! use nonempty::nonempty;
//! use splicecmp::overlap;
//! use splicecmp::overlap::Label;
//! use splicecmp::JunctionSet;
//!
//! let reference = ["j1", "j2", "j3"].into_iter().collect::<JunctionSet<_>>();
//! let star = ["j1", "j2", "j4"].into_iter().collect::<JunctionSet<_>>();
//!
//! let entries = overlap::compare(&reference, [(Label::new("reads1", "star"), &star)])?;
//! assert_eq!(entries[0].in_ref(), 2);
//! assert_eq!(entries[0].missing(), 1);
//! assert_eq!(entries[0].out_ref(), 1);
//!
//! let sizes = overlap::combination_sizes(&nonempty![&reference, &star]);
//! assert_eq!(sizes.len(), 1);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reports and diagrams
//!
//! The [`report`] module writes the overlap entries as a tab-delimited table.
//! The [`venn`] module gathers the numbers behind a Venn diagram into a
//! [`venn::Diagram`] and passes it to a [`venn::Renderer`]. Drawing is left
//! entirely to the renderer; the crate ships [`venn::VennDiagramScript`],
//! which emits a script for the `VennDiagram` R package.
//!
//! ## Pipeline datasets
//!
//! The [`dataset`] module discovers the junction files that a pipeline
//! writes into a directory (named `<aligner>-<reads>-<tool>.bed`), loads them,
//! and groups them by aligner and read sample for comparison.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod dataset;
pub mod key;
pub mod overlap;
pub mod reader;
pub mod record;
pub mod report;
pub mod set;
pub mod strand;
pub mod venn;

pub use set::JunctionSet;
pub use set::Loader;
pub use strand::Strand;

pub use self::reader::Reader;
