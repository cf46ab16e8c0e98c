//! A binary to compare the junctions found by alignment pipelines against a
//! reference set of junctions.
//!
//! ```shell
//! cargo run --release --bin=compare-junctions --features=binaries -- \
//!     pipeline/junctions -r reference.bed -o results/comparison
//! ```
//!
//! It achieves this by carrying out the following:
//!
//! * Loading the reference junctions and every `<aligner>-<reads>-<tool>.bed`
//!   file within the input directory.
//! * Writing a table of how many reference junctions each aligner recovers for
//!   each read sample to `<output>-align_reads.tab`.
//! * Emitting one Venn diagram per read sample, comparing the reference with
//!   every aligner, as `<output>-<reads>.venn.tiff` (via an R script written
//!   alongside it).

use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use splicecmp::dataset::Datasets;
use splicecmp::key::Normalization;
use splicecmp::report;
use splicecmp::venn;
use splicecmp::venn::Renderer as _;
use splicecmp::venn::VennDiagramScript;
use splicecmp::Loader;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Output paths
////////////////////////////////////////////////////////////////////////////////////////

/// The suffix of the report file.
const REPORT_SUFFIX: &str = "align_reads.tab";

/// The suffix of each Venn diagram image.
const VENN_SUFFIX: &str = "venn.tiff";

/// Gets the path of the report for an output prefix.
fn report_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{REPORT_SUFFIX}"))
}

/// Gets the path of the Venn diagram for a read sample.
fn venn_path(prefix: &str, reads: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{reads}.{VENN_SUFFIX}"))
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Creates the junction comparison table and Venn diagrams for a pipeline.
#[derive(Parser)]
struct Args {
    /// The directory containing the junction files from the pipeline.
    input: PathBuf,

    /// The reference junction file to compare against.
    #[arg(short, long)]
    reference: PathBuf,

    /// The output prefix.
    #[arg(short, long)]
    output: String,

    /// Whether to consider the strand when comparing pipeline junctions.
    #[arg(short = 's', long, default_value_t = false)]
    use_strand: bool,

    /// Whether to shift the pipeline junction boundaries inward by their
    /// overhangs (for aligners that report flanking exon blocks).
    #[arg(short, long, default_value_t = false)]
    adjust_overhang: bool,

    /// Whether the junction files lack a header line.
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// Whether to run `Rscript` to draw the Venn diagrams. Otherwise, only the
    /// scripts are written.
    #[arg(long, default_value_t = false)]
    render: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Joins the provided names for logging.
fn join<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}

fn compare(args: &Args) -> Result<()> {
    if !args.input.is_dir() {
        bail!("input directory does not exist: {}", args.input.display());
    }

    if !args.reference.is_file() {
        bail!("reference file does not exist: {}", args.reference.display());
    }

    let skip_first_line = !args.no_header;

    // NOTE: the reference holds intron coordinates, so its overhangs are never
    // applied. The strand must take part on both sides or on neither.
    let reference = Loader::new(Normalization::new(args.use_strand, false), skip_first_line)
        .load_path(&args.reference)
        .context("loading the reference junctions")?;
    info!("loaded reference; # junctions: {}", reference.len());

    let loader = Loader::new(
        Normalization::new(args.use_strand, args.adjust_overhang),
        skip_first_line,
    );
    let datasets = Datasets::load(&args.input, &loader).context("loading the datasets")?;

    if datasets.is_empty() {
        bail!("no junction files found in {}", args.input.display());
    }

    info!("found these aligners: {}", join(datasets.aligners()));
    info!("found these reads: {}", join(datasets.reads()));
    info!("found these junction analysis tools: {}", join(datasets.tools()));

    let renderer = VennDiagramScript::default().execute(args.render);
    let n_sets = datasets.aligners().len() + 1;
    if n_sets > renderer.max_sets() {
        bail!(
            "found {} aligners, but Venn diagrams support at most {} aligners",
            n_sets - 1,
            renderer.max_sets() - 1
        );
    }

    let entries = datasets
        .compare(&reference)
        .context("comparing the datasets against the reference")?;

    let path = report_path(&args.output);
    report::write_path(&path, &entries)
        .with_context(|| format!("writing the report to {}", path.display()))?;
    info!("wrote {}", path.display());

    for reads in datasets.reads() {
        let sets = datasets
            .venn_sets(&reference, reads)
            .with_context(|| format!("gathering the sets for {reads}"))?;

        let destination = venn_path(&args.output, reads);
        venn::export(
            &renderer.clone().subtitle(format!("{reads} dataset")),
            sets,
            &destination,
        )
        .with_context(|| format!("exporting the venn diagram for {reads}"))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    compare(&args)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use splicecmp::dataset;
    use splicecmp::overlap;
    use tempdir::TempDir;

    use super::*;

    const HEADER: &str = "track name=junctions";

    fn line(start: u64, end: u64, strand: &str) -> String {
        format!(
            "chr1\t{}\t{}\tjunc\t10\t{strand}\t{start}\t{end}\t255,0,0\t2\t5,5\t0,{}",
            start - 5,
            end + 5,
            end - start
        )
    }

    fn write(path: &Path, lines: &[String]) -> std::io::Result<()> {
        let mut contents = String::from(HEADER);

        for line in lines {
            contents.push('\n');
            contents.push_str(line);
        }

        fs::write(path, contents + "\n")
    }

    /// Lays out a reference file and an input directory with one `all`
    /// dataset per aligner for the `r1` read sample.
    fn layout(
        dir: &Path,
        reference: &[String],
        aligners: &[&str],
        dataset: &[String],
    ) -> std::io::Result<()> {
        write(&dir.join("reference.bed"), reference)?;

        let input = dir.join("in");
        fs::create_dir(&input)?;

        for aligner in aligners {
            write(&input.join(format!("{aligner}-r1-all.bed")), dataset)?;
        }

        Ok(())
    }

    fn args(dir: &Path, extra: &[&str]) -> Args {
        let input = dir.join("in");
        let reference = dir.join("reference.bed");
        let output = dir.join("out").join("run");

        let mut argv = vec![
            String::from("compare-junctions"),
            input.display().to_string(),
            String::from("-r"),
            reference.display().to_string(),
            String::from("-o"),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|arg| arg.to_string()));

        Args::parse_from(argv)
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            report_path("out/run"),
            PathBuf::from("out/run-align_reads.tab")
        );
        assert_eq!(
            venn_path("out/run", "reads1"),
            PathBuf::from("out/run-reads1.venn.tiff")
        );
    }

    #[test]
    fn test_compare() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("compare")?;
        layout(
            dir.path(),
            &[line(100, 200, "+"), line(300, 400, "+")],
            &["star"],
            &[line(100, 200, "+"), line(500, 600, "+")],
        )?;
        fs::create_dir(dir.path().join("out"))?;

        compare(&args(dir.path(), &[]))?;

        let report = fs::read_to_string(dir.path().join("out").join("run-align_reads.tab"))?;
        assert_eq!(
            report,
            "Dataset\tAligner\tInRef\tInRef%\tMissing\tMissing%\tOutRef\n\
             r1\tstar\t1\t50.00\t1\t50.00\t1\n"
        );
        assert!(dir.path().join("out").join("run-r1.venn.R").is_file());

        Ok(())
    }

    #[test]
    fn test_compare_with_strand() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("compare")?;
        let junctions = [line(100, 200, "+"), line(100, 200, "-")];
        layout(dir.path(), &junctions, &["star"], &junctions)?;
        fs::create_dir(dir.path().join("out"))?;

        compare(&args(dir.path(), &["--use-strand"]))?;

        let report = fs::read_to_string(dir.path().join("out").join("run-align_reads.tab"))?;
        assert_eq!(report.lines().nth(1), Some("r1\tstar\t2\t100.00\t0\t0.00\t0"));

        Ok(())
    }

    #[test]
    fn test_empty_reference() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("compare")?;
        layout(dir.path(), &[], &["star"], &[line(100, 200, "+")])?;
        fs::create_dir(dir.path().join("out"))?;

        let err = compare(&args(dir.path(), &[])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<dataset::Error>(),
            Some(dataset::Error::Overlap(overlap::Error::EmptyReference))
        ));

        Ok(())
    }

    #[test]
    fn test_missing_inputs() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("compare")?;

        let err = compare(&args(dir.path(), &[])).unwrap_err();
        assert!(err.to_string().starts_with("input directory does not exist: "));

        fs::create_dir(dir.path().join("in"))?;
        let err = compare(&args(dir.path(), &[])).unwrap_err();
        assert!(err.to_string().starts_with("reference file does not exist: "));

        Ok(())
    }

    #[test]
    fn test_too_many_aligners() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("compare")?;
        layout(
            dir.path(),
            &[line(100, 200, "+")],
            &["bowtie", "bwa", "gsnap", "hisat", "star"],
            &[line(100, 200, "+")],
        )?;
        fs::create_dir(dir.path().join("out"))?;

        let err = compare(&args(dir.path(), &[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "found 5 aligners, but Venn diagrams support at most 4 aligners"
        );
        assert!(!dir.path().join("out").join("run-align_reads.tab").exists());

        Ok(())
    }
}
