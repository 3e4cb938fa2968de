//! Tree image export
//!
//! The fitted tree is written as Graphviz DOT and piped through the `dot`
//! executable, which must be on `PATH`.

use std::fmt::{self, Write as _};
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::util::safe_create_file;
use crate::error::{PipelineError, Result};
use crate::model::{TreeLayout, TreeStructure};

/// Graphviz executable used for rasterizing
pub const DOT_EXECUTABLE: &str = "dot";

/// Fill colors for class 0 and class 1 leaves
const CLASS_COLORS: [&str; 2] = ["#e58139", "#399de5"];
const SPLIT_COLOR: &str = "#f2f2f2";

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            other => Err(PipelineError::Render(format!(
                "unsupported image extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Graphviz `-T` argument
    #[must_use]
    pub const fn dot_flag(self) -> &'static str {
        match self {
            Self::Png => "-Tpng",
            Self::Svg => "-Tsvg",
        }
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn class_name(class: usize, class_names: &[String]) -> String {
    class_names
        .get(class)
        .cloned()
        .unwrap_or_else(|| format!("class {class}"))
}

/// Write a tree layout as a DOT digraph
///
/// Split nodes show the feature test; leaves show the predicted class name.
/// The first edge out of a split is the branch where the test holds.
pub fn tree_to_dot(
    layout: &TreeLayout,
    feature_names: &[String],
    class_names: &[String],
) -> Result<String> {
    let mut dot = String::from("digraph Tree {\n");
    dot.push_str("node [shape=box, style=\"filled, rounded\", fontname=\"helvetica\"];\n");
    dot.push_str("edge [fontname=\"helvetica\"];\n");

    let mut next_id = 0usize;
    write_node(&mut dot, layout, feature_names, class_names, &mut next_id)
        .map_err(|e| PipelineError::Render(format!("failed to format DOT source: {e}")))?;

    dot.push_str("}\n");
    Ok(dot)
}

fn write_node(
    dot: &mut String,
    node: &TreeLayout,
    feature_names: &[String],
    class_names: &[String],
    next_id: &mut usize,
) -> std::result::Result<usize, fmt::Error> {
    let id = *next_id;
    *next_id += 1;

    match node {
        TreeLayout::Leaf { class } => {
            let color = CLASS_COLORS.get(*class).copied().unwrap_or(SPLIT_COLOR);
            writeln!(
                dot,
                "{id} [label=\"class = {}\", fillcolor=\"{color}\"];",
                escape(&class_name(*class, class_names))
            )?;
        }
        TreeLayout::Split {
            feature,
            threshold,
            impurity_decrease,
            children,
        } => {
            let name = feature_names
                .get(*feature)
                .cloned()
                .unwrap_or_else(|| format!("x[{feature}]"));
            writeln!(
                dot,
                "{id} [label=\"{} < {threshold:.3}\\ngain = {impurity_decrease:.4}\", fillcolor=\"{SPLIT_COLOR}\"];",
                escape(&name)
            )?;

            for (i, child) in children.iter().enumerate() {
                let child_id = write_node(dot, child, feature_names, class_names, next_id)?;
                if id == 0 && i < 2 {
                    let label = if i == 0 { "True" } else { "False" };
                    writeln!(
                        dot,
                        "{id} -> {child_id} [labeldistance=2.5, labelangle={}, headlabel=\"{label}\"];",
                        if i == 0 { 45 } else { -45 }
                    )?;
                } else {
                    writeln!(dot, "{id} -> {child_id};")?;
                }
            }
        }
    }

    Ok(id)
}

/// Persist the DOT source of a tree layout
pub fn write_dot(
    layout: &TreeLayout,
    feature_names: &[String],
    class_names: &[String],
    path: &Path,
) -> Result<()> {
    let mut file = safe_create_file(path, "writing the tree DOT source")?;
    let dot = tree_to_dot(layout, feature_names, class_names)?;
    file.write_all(dot.as_bytes())
        .map_err(|e| PipelineError::from(e).with_path(path))?;
    Ok(())
}

/// Render DOT source to an image file by invoking Graphviz
pub fn write_image(dot: &str, path: &Path, format: ImageFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| PipelineError::from(e).with_path(parent))?;
    }

    let mut child = Command::new(DOT_EXECUTABLE)
        .arg(format.dot_flag())
        .arg("-o")
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PipelineError::Render(format!("failed to launch {DOT_EXECUTABLE}: {e}")))?;

    {
        let stdin = child
            .stdin
            .as_mut()
            .ok_or_else(|| PipelineError::Render("graphviz stdin unavailable".to_string()))?;
        stdin
            .write_all(dot.as_bytes())
            .map_err(|e| PipelineError::Render(format!("failed to write DOT source: {e}")))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| PipelineError::Render(format!("{DOT_EXECUTABLE} did not finish: {e}")))?;

    if !output.status.success() {
        return Err(PipelineError::Render(format!(
            "{DOT_EXECUTABLE} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// Render a fitted tree to `path`; the extension selects PNG or SVG
pub fn render_tree<T: TreeStructure>(
    model: &T,
    feature_names: &[String],
    class_names: &[String],
    path: &Path,
) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    let dot = tree_to_dot(&model.layout(), feature_names, class_names)?;
    write_image(&dot, path, format)?;
    log::info!("Decision tree figure saved to {}", path.display());
    Ok(())
}
