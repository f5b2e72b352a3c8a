//! Entity categories.
//!
//! A category decides how an entity is drawn. Built-in categories map to a
//! Graphviz shape and palette; [`Category::Custom`] draws an image instead.

use std::{fmt, path::PathBuf};

/// Visual category of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// A Kubernetes pod.
    Pod,
    /// A Kubernetes deployment.
    Deployment,
    /// The Kubernetes API server.
    ApiServer,
    /// A Helm-managed controller or custom resource.
    Helm,
    /// A metrics collector or analyzer.
    Prometheus,
    /// An image node. Relative paths resolve against the icons directory.
    Custom { icon: PathBuf },
}

/// Shape and palette used to draw a built-in category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub shape: &'static str,
    pub style: &'static str,
    pub fill_color: &'static str,
    pub font_color: &'static str,
}

const KUBERNETES_BLUE: &str = "#326CE5";

impl Category {
    /// Creates a custom image category.
    pub fn custom(icon: impl Into<PathBuf>) -> Self {
        Self::Custom { icon: icon.into() }
    }

    /// Returns the appearance of a built-in category, or `None` for image nodes.
    pub fn appearance(&self) -> Option<Appearance> {
        let appearance = match self {
            Self::Pod => Appearance {
                shape: "box",
                style: "rounded,filled",
                fill_color: KUBERNETES_BLUE,
                font_color: "white",
            },
            Self::Deployment => Appearance {
                shape: "box3d",
                style: "filled",
                fill_color: KUBERNETES_BLUE,
                font_color: "white",
            },
            Self::ApiServer => Appearance {
                shape: "component",
                style: "filled",
                fill_color: KUBERNETES_BLUE,
                font_color: "white",
            },
            Self::Helm => Appearance {
                shape: "hexagon",
                style: "filled",
                fill_color: "#0F1689",
                font_color: "white",
            },
            Self::Prometheus => Appearance {
                shape: "cylinder",
                style: "filled",
                fill_color: "#E6522C",
                font_color: "white",
            },
            Self::Custom { .. } => return None,
        };
        Some(appearance)
    }

    /// Returns the image path of a custom category.
    pub fn icon(&self) -> Option<&PathBuf> {
        match self {
            Self::Custom { icon } => Some(icon),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pod => f.write_str("pod"),
            Self::Deployment => f.write_str("deployment"),
            Self::ApiServer => f.write_str("api-server"),
            Self::Helm => f.write_str("helm"),
            Self::Prometheus => f.write_str("prometheus"),
            Self::Custom { icon } => write!(f, "custom({})", icon.display()),
        }
    }
}
