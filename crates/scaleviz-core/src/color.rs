//! Color handling for scaleviz diagrams.
//!
//! [`Color`] validates a color string with the `color` crate while keeping
//! the text the caller wrote. Graphviz receives the original text, so named
//! colors resolve against its own palette.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A validated color as written by the caller.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Color {
    source: String,
}

impl Color {
    /// Create a new `Color` from a string.
    ///
    /// Accepts CSS color strings such as `"#ff0000"`, `"rgb(255, 0, 0)"` or
    /// `"red"`. Surrounding whitespace is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaleviz_core::color::Color;
    ///
    /// let purple = Color::new("purple").unwrap();
    /// assert_eq!(purple.as_str(), "purple");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let source = color_str.trim();
        DynamicColor::from_str(source)
            .map(|_| Self {
                source: source.to_string(),
            })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the color text as given, suitable for a Graphviz attribute.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
