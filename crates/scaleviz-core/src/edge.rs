//! Connection styles.
//!
//! An [`Edge`] describes how a connection is drawn: its label, color, line
//! style, weight and arrowheads. Colors are kept as text and validated when
//! the diagram is rendered.

/// Line pattern of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

/// Which ends of an edge carry an arrowhead (Graphviz `dir`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrowDirection {
    /// Arrowhead at the target.
    #[default]
    Forward,
    /// Arrowhead at the source.
    Back,
    /// Arrowheads at both ends.
    Both,
    /// A plain line.
    None,
}

impl ArrowDirection {
    /// Returns the Graphviz `dir` value.
    pub fn as_dir(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

/// Style of a connection.
///
/// # Examples
///
/// ```
/// use scaleviz_core::edge::{Edge, LineStyle};
///
/// let drift = Edge::new()
///     .label("Resource Drift\nDetected")
///     .color("red")
///     .line(LineStyle::Dashed);
///
/// assert_eq!(drift.style_value().as_deref(), Some("dashed"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edge {
    label: Option<String>,
    color: Option<String>,
    line: LineStyle,
    bold: bool,
    direction: ArrowDirection,
}

impl Edge {
    /// A solid, unlabeled forward edge in the default color.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn dashed(self) -> Self {
        self.line(LineStyle::Dashed)
    }

    pub fn dotted(self) -> Self {
        self.line(LineStyle::Dotted)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn direction(mut self, direction: ArrowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color_text(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn line_style(&self) -> LineStyle {
        self.line
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn arrow_direction(&self) -> ArrowDirection {
        self.direction
    }

    /// Returns the Graphviz `style` value, or `None` for a plain solid line.
    pub fn style_value(&self) -> Option<String> {
        match (self.line, self.bold) {
            (LineStyle::Solid, false) => None,
            (LineStyle::Solid, true) => Some("bold".to_string()),
            (line, false) => Some(line.as_str().to_string()),
            (line, true) => Some(format!("{},bold", line.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_edge() {
        let edge = Edge::new();
        assert_eq!(edge.label_text(), None);
        assert_eq!(edge.color_text(), None);
        assert_eq!(edge.style_value(), None);
        assert_eq!(edge.arrow_direction().as_dir(), "forward");
    }

    #[test]
    fn test_style_values() {
        assert_eq!(Edge::new().bold().style_value().as_deref(), Some("bold"));
        assert_eq!(Edge::new().dotted().style_value().as_deref(), Some("dotted"));
        assert_eq!(
            Edge::new().dashed().bold().style_value().as_deref(),
            Some("dashed,bold")
        );
    }

    #[test]
    fn test_builder_keeps_fields() {
        let edge = Edge::new()
            .label("Evict Pod")
            .color("red")
            .direction(ArrowDirection::Both);

        assert_eq!(edge.label_text(), Some("Evict Pod"));
        assert_eq!(edge.color_text(), Some("red"));
        assert_eq!(edge.line_style(), LineStyle::Solid);
        assert!(!edge.is_bold());
        assert_eq!(edge.arrow_direction().as_dir(), "both");
    }
}
