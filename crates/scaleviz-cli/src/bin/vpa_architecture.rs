//! Generates the Kubernetes VPA architecture diagram.

use scaleviz_cli::diagrams::VpaArchitecture;

fn main() {
    scaleviz_cli::main(&VpaArchitecture);
}
