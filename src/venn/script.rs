//! A renderer backed by the `VennDiagram` R package.
//!
//! The renderer writes an R script next to the requested image that, when run
//! through `Rscript`, draws the diagram. Running the script is optional, so
//! the script may also be handed off to be run elsewhere.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use tracing::debug;
use tracing::info;

use crate::venn::Diagram;
use crate::venn::Error;
use crate::venn::Renderer;
use crate::venn::Result;

/// The largest diagram `VennDiagram` can draw.
pub const MAX_SETS: usize = 5;

/// The extension of the emitted script.
const SCRIPT_EXTENSION: &str = "R";

/// The fill color of each set.
const FILL_COLORS: [&str; MAX_SETS] = ["lightblue", "purple", "green", "orange", "red"];

/// The label color of each set.
const CATEGORY_COLORS: [&str; MAX_SETS] =
    ["darkblue", "purple", "darkgreen", "darkorange", "darkred"];

/// The default title of the diagram.
pub const DEFAULT_TITLE: &str = "Comparison on junctions found by alignment tools";

/// A renderer that emits (and optionally runs) a `VennDiagram` R script.
#[derive(Clone, Debug)]
pub struct VennDiagramScript {
    /// The title of the diagram.
    title: String,

    /// The subtitle of the diagram.
    subtitle: Option<String>,

    /// Whether to run the script with `Rscript` after writing it.
    execute: bool,
}

impl Default for VennDiagramScript {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
            execute: false,
        }
    }
}

impl VennDiagramScript {
    /// Sets the title of the diagram.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the subtitle of the diagram.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets whether the script is run with `Rscript` once written.
    pub fn execute(mut self, execute: bool) -> Self {
        self.execute = execute;
        self
    }

    /// Gets the path of the script written for an image.
    pub fn script_path(image: &Path) -> PathBuf {
        image.with_extension(SCRIPT_EXTENSION)
    }

    /// Generates the R script that draws a diagram into `image`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use nonempty::nonempty;
    /// use splicecmp::venn::Diagram;
    /// use splicecmp::venn::VennDiagramScript;
    /// use splicecmp::JunctionSet;
    ///
    /// let reference = ["j1", "j2", "j3"].into_iter().collect::<JunctionSet<_>>();
    /// let star = ["j1", "j2", "j4"].into_iter().collect::<JunctionSet<_>>();
    /// let diagram = Diagram::try_new(nonempty![("Reference", &reference), ("star", &star)], 5)?;
    ///
    /// let script = VennDiagramScript::default().script(&diagram, Path::new("out.tiff"));
    /// assert!(script.contains("draw.pairwise.venn("));
    /// assert!(script.contains("cross.area = 2"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn script(&self, diagram: &Diagram, image: &Path) -> String {
        let n = diagram.len();

        let mut lines = vec![
            String::from("library(grid)"),
            String::from("library(VennDiagram)"),
            String::new(),
            format!(
                "tiff({}, width = 960, height = 960)",
                quote(&image.display().to_string())
            ),
            String::from("grid.newpage()"),
            format!("invisible({}(", function(n)),
        ];

        lines.extend(
            diagram
                .areas()
                .iter()
                .enumerate()
                .map(|(i, area)| format!("    area{} = {area},", i + 1)),
        );

        lines.extend(diagram.combinations().iter().map(|(combination, size)| {
            if n == 2 {
                format!("    cross.area = {size},")
            } else {
                format!("    n{combination} = {size},")
            }
        }));

        lines.push(format!(
            "    category = {},",
            vector(diagram.labels().iter().map(|label| quote(label)))
        ));
        lines.push(format!(
            "    fill = {},",
            vector(FILL_COLORS.iter().take(n).map(|color| quote(color)))
        ));
        lines.push(format!(
            "    cat.col = {},",
            vector(CATEGORY_COLORS.iter().take(n).map(|color| quote(color)))
        ));
        lines.push(String::from("    margin = 0.2,"));
        lines.push(String::from("    cex = 1"));
        lines.push(String::from("))"));
        lines.push(format!(
            "grid.text({}, y = unit(0.97, \"npc\"), gp = gpar(cex = 2))",
            quote(&self.title)
        ));

        if let Some(subtitle) = &self.subtitle {
            lines.push(format!(
                "grid.text({}, y = unit(0.03, \"npc\"), gp = gpar(cex = 1.5))",
                quote(subtitle)
            ));
        }

        lines.push(String::from("invisible(dev.off())"));

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}

impl Renderer for VennDiagramScript {
    fn max_sets(&self) -> usize {
        MAX_SETS
    }

    fn render(&self, diagram: &Diagram, destination: &Path) -> Result<()> {
        if diagram.len() > MAX_SETS {
            return Err(Error::TooManySets(diagram.len(), MAX_SETS));
        }

        let script_path = Self::script_path(destination);
        fs::write(&script_path, self.script(diagram, destination)).map_err(Error::Io)?;
        info!("venn: wrote {}", script_path.display());

        if self.execute {
            run_rscript(&script_path)?;
            info!("venn: rendered {}", destination.display());
        }

        Ok(())
    }
}

/// Gets the `VennDiagram` drawing function for a number of sets.
fn function(n: usize) -> &'static str {
    match n {
        2 => "draw.pairwise.venn",
        3 => "draw.triple.venn",
        4 => "draw.quad.venn",
        _ => "draw.quintuple.venn",
    }
}

/// Quotes a string as an R string literal.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Formats values as an R vector.
fn vector(values: impl Iterator<Item = String>) -> String {
    format!("c({})", values.collect::<Vec<_>>().join(", "))
}

/// Runs an R script with `Rscript`.
fn run_rscript(script: &Path) -> Result<()> {
    debug!("venn: running `Rscript {}`", script.display());

    let output = Command::new("Rscript")
        .arg(script)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(Error::Io)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Render(format!(
            "`Rscript {}` exited with {}: {}",
            script.display(),
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}
