//! Layout settings passed through to Graphviz.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Rank direction of the diagram (Graphviz `rankdir`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Direction {
    /// Top to bottom.
    #[serde(rename = "TB")]
    TopToBottom,
    /// Bottom to top.
    #[serde(rename = "BT")]
    BottomToTop,
    /// Left to right.
    #[default]
    #[serde(rename = "LR")]
    LeftToRight,
    /// Right to left.
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    /// Returns the Graphviz `rankdir` value.
    pub fn as_rankdir(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopToBottom),
            "BT" => Ok(Self::BottomToTop),
            "LR" => Ok(Self::LeftToRight),
            "RL" => Ok(Self::RightToLeft),
            _ => Err(format!("invalid direction `{s}`: expected one of TB, BT, LR, RL")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_rankdir())
    }
}

/// Edge routing style (Graphviz `splines`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveStyle {
    #[default]
    Ortho,
    Curved,
    Spline,
    Polyline,
}

impl CurveStyle {
    /// Returns the Graphviz `splines` value.
    pub fn as_splines(self) -> &'static str {
        match self {
            Self::Ortho => "ortho",
            Self::Curved => "curved",
            Self::Spline => "spline",
            Self::Polyline => "polyline",
        }
    }

    /// Whether edge text must go in `xlabel`.
    ///
    /// Graphviz drops plain `label`s on orthogonal edges.
    pub fn needs_external_labels(self) -> bool {
        matches!(self, Self::Ortho)
    }
}

impl FromStr for CurveStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ortho" => Ok(Self::Ortho),
            "curved" => Ok(Self::Curved),
            "spline" => Ok(Self::Spline),
            "polyline" => Ok(Self::Polyline),
            _ => Err(format!(
                "invalid curve style `{s}`: expected one of ortho, curved, spline, polyline"
            )),
        }
    }
}
