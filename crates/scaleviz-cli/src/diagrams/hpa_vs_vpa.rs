//! Horizontal versus vertical pod autoscaling, side by side.

use scaleviz::{
    DiagramOptions, ScalevizError, attributes::AttrMap, category::Category, diagram::Scope,
    edge::Edge, layout::Direction,
};

use super::Generator;

const HPA_POD: &str = "Pod\n1 CPU\n512Mi";

/// Two groupings contrasting HPA, which adds pods, with VPA, which grows one.
#[derive(Debug, Default, Clone, Copy)]
pub struct HpaVsVpa;

impl Generator for HpaVsVpa {
    fn purpose(&self) -> &'static str {
        "HPA vs VPA"
    }

    fn options(&self) -> DiagramOptions {
        DiagramOptions::new("HPA vs VPA")
            .with_direction(Direction::LeftToRight)
            .with_filename("hpa_vs_vpa_simple")
            .with_graph_attr(
                AttrMap::new()
                    .with("fontsize", "14")
                    .with("bgcolor", "white")
                    .with("pad", "0.5"),
            )
    }

    fn declare(&self, scope: &mut Scope<'_>) -> Result<(), ScalevizError> {
        scope.cluster(
            "HPA\n(Horizontal Pod Autoscaler)\nScales NUMBER of Pods",
            |hpa_group| {
                let hpa = hpa_group.entity("HPA", Category::Helm);
                hpa_group.cluster("Low Traffic", |low| low.entity(HPA_POD, Category::Pod));
                let high = hpa_group.cluster("High Traffic", |high| {
                    [
                        high.entity(HPA_POD, Category::Pod),
                        high.entity(HPA_POD, Category::Pod),
                        high.entity(HPA_POD, Category::Pod),
                    ]
                });
                hpa_group.connect(
                    hpa,
                    high[0],
                    Edge::new().label("Adds More Pods →").color("blue").bold(),
                );
            },
        );

        scope.cluster(
            "VPA\n(Vertical Pod Autoscaler)\nScales RESOURCES per Pod",
            |vpa_group| {
                let vpa = vpa_group.entity("VPA", Category::Helm);
                vpa_group.cluster("Before", |before| {
                    before.entity("Pod\n100m CPU\n50Mi", Category::Pod)
                });
                let after = vpa_group.cluster("After", |after| {
                    after.entity("Pod\n500m CPU\n250Mi", Category::Pod)
                });
                vpa_group.connect(
                    vpa,
                    after,
                    Edge::new()
                        .label("Increases Resources →")
                        .color("green")
                        .bold(),
                );
            },
        );

        Ok(())
    }
}
