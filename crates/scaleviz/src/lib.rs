//! Scaleviz - declare Kubernetes autoscaling diagrams and render them with Graphviz.
//!
//! A diagram is declared inside a [`DiagramContext`]: clusters nest like the
//! closures that declare them, entities are labeled nodes with a
//! [`Category`](category::Category), and connections are styled edges
//! between entities. Closing the context validates the declared structure,
//! emits DOT and writes one file per output format.

pub mod config;
pub mod export;
pub mod structure;

mod error;
mod options;

pub use scaleviz_core::{attributes, category, color, diagram, edge, identifier, layout};

pub use error::ScalevizError;
pub use options::{DiagramOptions, OutputFormat, default_filename};

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info, trace, warn};

use diagram::{Diagram, Scope};
use export::dot::DotBuilder;
use structure::Hierarchy;

/// Files written by a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    files: Vec<PathBuf>,
}

impl RenderOutput {
    /// Written files, in the order of the configured formats.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The file of the first configured format.
    pub fn primary(&self) -> Option<&Path> {
        self.files.first().map(PathBuf::as_path)
    }
}

/// Validates and renders declared diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use scaleviz::{DiagramOptions, DiagramRenderer, category::Category, diagram::Diagram};
///
/// let mut diagram = Diagram::new("Single Pod");
/// diagram.scope().entity("Pod", Category::Pod);
///
/// let renderer = DiagramRenderer::new(DiagramOptions::new("Single Pod"));
/// let dot = renderer.to_dot(&diagram).expect("valid diagram");
/// assert!(dot.contains("Pod"));
///
/// let output = renderer.render(&diagram).expect("Graphviz is installed");
/// println!("{}", output.primary().unwrap().display());
/// ```
#[derive(Debug, Clone)]
pub struct DiagramRenderer {
    options: DiagramOptions,
}

impl DiagramRenderer {
    pub fn new(options: DiagramOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiagramOptions {
        &self.options
    }

    /// Validates `diagram` and returns its DOT source.
    ///
    /// # Errors
    ///
    /// Returns `ScalevizError` for structural errors (dangling connections,
    /// broken grouping tree) and invalid edge colors.
    pub fn to_dot(&self, diagram: &Diagram) -> Result<String, ScalevizError> {
        info!(title = diagram.title(); "Validating diagram structure");
        let hierarchy = Hierarchy::build(diagram)?;
        debug!(
            members = hierarchy.members_count(),
            depth = hierarchy.max_depth();
            "Structure built successfully"
        );

        let source = DotBuilder::new(&self.options).build_source(&hierarchy);
        trace!(source = source.as_str(); "Generated DOT");
        Ok(source)
    }

    /// Validates `diagram` and writes one file per configured format.
    ///
    /// The output directory and, when configured, the icons directory are
    /// created if missing. Existing directories are left untouched. Nothing
    /// is created when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `ScalevizError` for:
    /// - Structural and style errors (see [`DiagramRenderer::to_dot`])
    /// - File system errors creating directories or writing output
    /// - Graphviz being unavailable or failing
    pub fn render(&self, diagram: &Diagram) -> Result<RenderOutput, ScalevizError> {
        let source = self.to_dot(diagram)?;

        fs::create_dir_all(self.options.output_dir())?;
        if let Some(icons) = self.options.icons_path() {
            fs::create_dir_all(&icons)?;
            debug!(path = icons.display().to_string(); "Icons directory ready");
        }

        let mut files = Vec::with_capacity(self.options.formats().len());
        for format in self.options.formats() {
            let path = self.options.output_path(*format);
            export::exporter_for(*format).export(&source, &path)?;
            info!(path = path.display().to_string(); "Diagram exported successfully");
            files.push(path);
        }

        if self.options.show() {
            if let Some(primary) = files.first() {
                export::open_in_viewer(primary)?;
            }
        }

        Ok(RenderOutput { files })
    }
}

/// Scoped construction of one diagram.
///
/// The context owns the diagram being declared. It is finalized (validated
/// and rendered) exactly once: by [`DiagramContext::render`] after the
/// declaration closure returns, by [`DiagramContext::close`], or when the
/// context is dropped without being closed. Errors during a drop can only be
/// logged.
///
/// # Examples
///
/// ```rust,no_run
/// use scaleviz::{
///     DiagramContext, DiagramOptions, attributes::AttrMap, category::Category, edge::Edge,
///     layout::Direction,
/// };
///
/// let options = DiagramOptions::new("HPA vs VPA")
///     .with_direction(Direction::LeftToRight)
///     .with_graph_attr(AttrMap::new().with("fontsize", "14"))
///     .with_filename("hpa_vs_vpa_simple");
///
/// let output = DiagramContext::new(options)
///     .render(|d| {
///         let hpa = d.entity("HPA", Category::Helm);
///         let pod = d.cluster("High Traffic", |c| c.entity("Pod\n1 CPU\n512Mi", Category::Pod));
///         d.connect(hpa, pod, Edge::new().label("Adds More Pods →").color("blue").bold());
///         Ok(())
///     })
///     .expect("Failed to render");
///
/// assert!(output.primary().unwrap().ends_with("hpa_vs_vpa_simple.png"));
/// ```
#[derive(Debug)]
pub struct DiagramContext {
    diagram: Diagram,
    renderer: DiagramRenderer,
    closed: bool,
}

impl DiagramContext {
    pub fn new(options: DiagramOptions) -> Self {
        info!(title = options.title(); "Opening diagram");
        Self {
            diagram: Diagram::new(options.title()),
            renderer: DiagramRenderer::new(options),
            closed: false,
        }
    }

    pub fn options(&self) -> &DiagramOptions {
        self.renderer.options()
    }

    /// The diagram declared so far.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// The root declaration scope.
    pub fn root(&mut self) -> Scope<'_> {
        self.diagram.scope()
    }

    /// Runs `build` in the root scope, then renders.
    ///
    /// Rendering happens even when `build` fails, with whatever was declared
    /// up to the failure; the declaration error is returned in that case.
    pub fn render<F>(mut self, build: F) -> Result<RenderOutput, ScalevizError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), ScalevizError>,
    {
        let declared = build(&mut self.diagram.scope());
        let rendered = self.finish();

        match (declared, rendered) {
            (Ok(()), rendered) => rendered,
            (Err(err), Ok(_)) => Err(err),
            (Err(err), Err(render_err)) => {
                warn!(err:% = render_err; "Rendering after a failed declaration also failed");
                Err(err)
            }
        }
    }

    /// Finalizes the diagram and returns the written files.
    pub fn close(mut self) -> Result<RenderOutput, ScalevizError> {
        self.finish()
    }

    fn finish(&mut self) -> Result<RenderOutput, ScalevizError> {
        self.closed = true;
        self.renderer.render(&self.diagram)
    }
}

impl Drop for DiagramContext {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        debug!(title = self.diagram.title(); "Diagram dropped without close, rendering");
        if let Err(err) = self.finish() {
            error!(err:% = err; "Failed to render diagram on drop");
        }
    }
}
