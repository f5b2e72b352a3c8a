//! Per-diagram rendering options.
//!
//! [`DiagramOptions`] carries everything a diagram declares about its own
//! output: title, filename, direction, attribute maps and output formats.
//! User configuration ([`AppConfig`]) is applied on top with
//! [`DiagramOptions::with_config`].

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use scaleviz_core::{
    attributes::AttrMap,
    layout::{CurveStyle, Direction},
};

use crate::config::AppConfig;

/// File format produced for a rendered diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Jpg,
    Pdf,
    /// The Graphviz source itself; does not need the Graphviz binary.
    Dot,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(format!(
                "unsupported output format `{s}`: expected one of png, svg, jpg, pdf, dot"
            )),
        }
    }
}

/// Derives a filename from a diagram title.
///
/// Whitespace runs become a single `_` and the result is lowercased.
///
/// ```
/// use scaleviz::default_filename;
///
/// assert_eq!(default_filename("Kubernetes VPA  Architecture"), "kubernetes_vpa_architecture");
/// ```
pub fn default_filename(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Rendering options of one diagram.
///
/// # Examples
///
/// ```
/// use scaleviz::{DiagramOptions, OutputFormat, attributes::AttrMap, layout::Direction};
///
/// let options = DiagramOptions::new("HPA vs VPA")
///     .with_direction(Direction::LeftToRight)
///     .with_graph_attr(AttrMap::new().with("fontsize", "14"))
///     .with_filename("hpa_vs_vpa_simple");
///
/// assert_eq!(
///     options.output_path(OutputFormat::Png),
///     std::path::Path::new("./hpa_vs_vpa_simple.png")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    title: String,
    filename: Option<String>,
    output_dir: PathBuf,
    direction: Direction,
    curve_style: CurveStyle,
    show: bool,
    formats: Vec<OutputFormat>,
    graph_attr: AttrMap,
    node_attr: AttrMap,
    edge_attr: AttrMap,
    icons_dir: Option<PathBuf>,
}

impl DiagramOptions {
    /// Options for a diagram with the given title, writing a PNG to the
    /// current directory.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: None,
            output_dir: PathBuf::from("."),
            direction: Direction::default(),
            curve_style: CurveStyle::default(),
            show: false,
            formats: vec![OutputFormat::Png],
            graph_attr: AttrMap::new(),
            node_attr: AttrMap::new(),
            edge_attr: AttrMap::new(),
            icons_dir: None,
        }
    }

    /// Sets the output filename, without extension.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_curve_style(mut self, curve_style: CurveStyle) -> Self {
        self.curve_style = curve_style;
        self
    }

    /// Opens the first rendered file in the platform viewer when set.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Replaces the output formats. Duplicates are dropped; an empty list is ignored.
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = OutputFormat>) -> Self {
        let mut unique = Vec::new();
        for format in formats {
            if !unique.contains(&format) {
                unique.push(format);
            }
        }
        if !unique.is_empty() {
            self.formats = unique;
        }
        self
    }

    /// Adds graph attributes on top of the ones already set.
    pub fn with_graph_attr(mut self, attrs: AttrMap) -> Self {
        self.graph_attr.extend(&attrs);
        self
    }

    /// Adds default node attributes on top of the ones already set.
    pub fn with_node_attr(mut self, attrs: AttrMap) -> Self {
        self.node_attr.extend(&attrs);
        self
    }

    /// Adds default edge attributes on top of the ones already set.
    pub fn with_edge_attr(mut self, attrs: AttrMap) -> Self {
        self.edge_attr.extend(&attrs);
        self
    }

    /// Directory holding custom icons; created before rendering if missing.
    ///
    /// A relative path is resolved against the output directory.
    pub fn with_icons_dir(mut self, icons_dir: impl Into<PathBuf>) -> Self {
        self.icons_dir = Some(icons_dir.into());
        self
    }

    /// Applies user configuration on top of these options.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        let render = config.render();
        self = self.with_formats(render.formats().iter().copied());
        if let Some(curve_style) = render.curve_style() {
            self.curve_style = curve_style;
        }
        if let Some(show) = render.show() {
            self.show = show;
        }

        let style = config.style();
        self.with_graph_attr(style.graph().clone())
            .with_node_attr(style.node().clone())
            .with_edge_attr(style.edge().clone())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Output filename without extension, derived from the title when unset.
    pub fn filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| default_filename(&self.title))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn curve_style(&self) -> CurveStyle {
        self.curve_style
    }

    pub fn show(&self) -> bool {
        self.show
    }

    pub fn formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    pub fn graph_attr(&self) -> &AttrMap {
        &self.graph_attr
    }

    pub fn node_attr(&self) -> &AttrMap {
        &self.node_attr
    }

    pub fn edge_attr(&self) -> &AttrMap {
        &self.edge_attr
    }

    /// Path of the rendered file for `format`.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.filename(), format.extension()))
    }

    /// Resolved icons directory, if one is configured.
    pub fn icons_path(&self) -> Option<PathBuf> {
        self.icons_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                self.output_dir.join(dir)
            }
        })
    }
}
