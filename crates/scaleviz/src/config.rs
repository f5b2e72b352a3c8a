//! Configuration types for scaleviz rendering.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from
//! TOML. Every field is optional; an empty document is the default
//! configuration.
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Output formats, curve style and viewer settings.
//! - [`StyleConfig`] - Graphviz attributes layered over each diagram's own.
//!
//! # Example
//!
//! ```
//! # use scaleviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.render().formats().is_empty());
//! assert!(config.style().graph().is_empty());
//! ```

use serde::Deserialize;

use scaleviz_core::{attributes::AttrMap, layout::CurveStyle};

use crate::options::OutputFormat;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Output settings. Unset fields keep the diagram's own choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Output formats replacing the diagram's formats when non-empty.
    #[serde(default)]
    formats: Vec<OutputFormat>,

    #[serde(default)]
    curve_style: Option<CurveStyle>,

    /// Whether to open the rendered file in the platform viewer.
    #[serde(default)]
    show: Option<bool>,
}

impl RenderConfig {
    pub fn new(
        formats: Vec<OutputFormat>,
        curve_style: Option<CurveStyle>,
        show: Option<bool>,
    ) -> Self {
        Self {
            formats,
            curve_style,
            show,
        }
    }

    pub fn formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    pub fn curve_style(&self) -> Option<CurveStyle> {
        self.curve_style
    }

    pub fn show(&self) -> Option<bool> {
        self.show
    }
}

/// Graphviz attributes applied over every diagram's own attributes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    graph: AttrMap,

    #[serde(default)]
    node: AttrMap,

    #[serde(default)]
    edge: AttrMap,
}

impl StyleConfig {
    pub fn new(graph: AttrMap, node: AttrMap, edge: AttrMap) -> Self {
        Self { graph, node, edge }
    }

    pub fn graph(&self) -> &AttrMap {
        &self.graph
    }

    pub fn node(&self) -> &AttrMap {
        &self.node
    }

    pub fn edge(&self) -> &AttrMap {
        &self.edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagramOptions;

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.render().formats().is_empty());
        assert_eq!(config.render().curve_style(), None);
        assert_eq!(config.render().show(), None);
        assert!(config.style().edge().is_empty());
    }

    #[test]
    fn test_full_document() {
        let config: AppConfig = toml::from_str(
            r##"
            [render]
            formats = ["svg", "png"]
            curve_style = "curved"
            show = false

            [style.graph]
            bgcolor = "transparent"

            [style.node]
            fontname = "Helvetica"

            [style.edge]
            penwidth = "2"
            "##,
        )
        .unwrap();

        assert_eq!(
            config.render().formats(),
            &[OutputFormat::Svg, OutputFormat::Png]
        );
        assert_eq!(config.render().curve_style(), Some(CurveStyle::Curved));
        assert_eq!(config.render().show(), Some(false));
        assert_eq!(config.style().graph().get("bgcolor"), Some("transparent"));
        assert_eq!(config.style().node().get("fontname"), Some("Helvetica"));
        assert_eq!(config.style().edge().get("penwidth"), Some("2"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = toml::from_str::<AppConfig>("[render]\nformats = [\"bmp\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_overrides_diagram_options() {
        let config = AppConfig::new(
            RenderConfig::new(vec![OutputFormat::Dot], Some(CurveStyle::Spline), None),
            StyleConfig::new(
                AttrMap::new().with("bgcolor", "black"),
                AttrMap::new(),
                AttrMap::new(),
            ),
        );

        let options = DiagramOptions::new("t")
            .with_graph_attr(AttrMap::new().with("bgcolor", "white").with("pad", "0.5"))
            .with_config(&config);

        assert_eq!(options.formats(), &[OutputFormat::Dot]);
        assert_eq!(options.curve_style(), CurveStyle::Spline);
        assert!(!options.show());
        assert_eq!(options.graph_attr().get("bgcolor"), Some("black"));
        assert_eq!(options.graph_attr().get("pad"), Some("0.5"));
    }
}
