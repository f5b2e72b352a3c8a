//! Generates the HPA vs VPA comparison diagram.

use scaleviz_cli::diagrams::HpaVsVpa;

fn main() {
    scaleviz_cli::main(&HpaVsVpa);
}
