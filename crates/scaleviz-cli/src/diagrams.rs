//! The diagrams the generators produce.
//!
//! Each diagram is a [`Generator`]: it supplies its rendering options and
//! declares its entities, clusters and connections into a scope.

mod hpa_vs_vpa;
mod vpa_architecture;

pub use hpa_vs_vpa::HpaVsVpa;
pub use vpa_architecture::VpaArchitecture;

use scaleviz::{DiagramOptions, ScalevizError, diagram::Scope};

/// A diagram that can be declared and rendered by [`crate::run`].
pub trait Generator {
    /// Short description used in the completion message, e.g. `HPA vs VPA`.
    fn purpose(&self) -> &'static str;

    /// Rendering options before command-line and configuration overrides.
    fn options(&self) -> DiagramOptions;

    /// Declares the diagram contents into the root scope.
    ///
    /// # Errors
    ///
    /// Returns `ScalevizError` if a declaration is rejected.
    fn declare(&self, scope: &mut Scope<'_>) -> Result<(), ScalevizError>;
}
