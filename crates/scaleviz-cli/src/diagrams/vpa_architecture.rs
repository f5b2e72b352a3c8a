//! The Vertical Pod Autoscaler components and their loop through the API server.

use scaleviz::{
    DiagramOptions, ScalevizError, attributes::AttrMap, category::Category, diagram::Scope,
    edge::Edge, layout::Direction,
};

use super::Generator;

/// Directory for custom icons, created next to the output if missing.
pub const ICONS_DIR: &str = "custom_icons";

/// Recommender, admission controller and updater around the API server.
#[derive(Debug, Default, Clone, Copy)]
pub struct VpaArchitecture;

impl Generator for VpaArchitecture {
    fn purpose(&self) -> &'static str {
        "VPA architecture"
    }

    fn options(&self) -> DiagramOptions {
        DiagramOptions::new("Kubernetes VPA Architecture")
            .with_direction(Direction::TopToBottom)
            .with_filename("vpa_architecture")
            .with_icons_dir(ICONS_DIR)
            .with_graph_attr(
                AttrMap::new()
                    .with("fontsize", "16")
                    .with("bgcolor", "white")
                    .with("pad", "0.5")
                    .with("ranksep", "1.0")
                    .with("nodesep", "0.8"),
            )
    }

    fn declare(&self, scope: &mut Scope<'_>) -> Result<(), ScalevizError> {
        let api = scope.cluster("Kubernetes Control Plane", |plane| {
            plane.entity("API Server", Category::ApiServer)
        });

        let (recommender, admission, updater) =
            scope.cluster("VPA Components (kube-system)", |components| {
                let recommender = components.cluster("VPA Recommender", |c| {
                    c.entity(
                        "Recommender\n(Analyzes Usage &\nProvides Recommendations)",
                        Category::Prometheus,
                    )
                });
                let admission = components.cluster("VPA Admission Controller", |c| {
                    c.entity(
                        "Admission Controller\n(Intercepts Pod Creation &\nInjects Resources)",
                        Category::Helm,
                    )
                });
                let updater = components.cluster("VPA Updater", |c| {
                    c.entity("Updater\n(Evicts Pods When\nResources Drift)", Category::Helm)
                });
                (recommender, admission, updater)
            });

        let (vpa_resource, pods) = scope.cluster("Your Namespace", |namespace| {
            let vpa_resource =
                namespace.entity("VPA Resource\n(nginx-vpa)\nMode: Auto", Category::Helm);
            let pods = namespace.cluster("Deployment: nginx-vpa-demo", |deployment| {
                [
                    deployment.entity("Pod 1\nCPU: 49m\nMem: 250Mi", Category::Pod),
                    deployment.entity("Pod 2\nCPU: 49m\nMem: 250Mi", Category::Pod),
                ]
            });
            (vpa_resource, pods)
        });

        // Metrics flow
        for pod in pods {
            scope.connect(
                pod,
                api,
                Edge::new().label("Usage Metrics").dashed().color("blue"),
            );
        }

        // Recommendation
        scope.connect(
            api,
            recommender,
            Edge::new().label("Watch Metrics").color("green"),
        );
        scope.connect(
            recommender,
            vpa_resource,
            Edge::new()
                .label("Target: 25m CPU\n250Mi Memory")
                .color("orange"),
        );
        scope.connect(vpa_resource, api, Edge::new().label("VPA Status").dotted());

        // Admission
        scope.connect(
            api,
            admission,
            Edge::new().label("New Pod Request").color("purple"),
        );
        scope.connect(
            admission,
            api,
            Edge::new()
                .label("Inject Resources\n(25m CPU, 250Mi Mem)")
                .color("purple"),
        );

        // Eviction and recreation
        scope.connect(
            vpa_resource,
            updater,
            Edge::new()
                .label("Resource Drift\nDetected")
                .color("red")
                .dashed(),
        );
        scope.connect(updater, api, Edge::new().label("Evict Pod").color("red"));
        scope.connect(api, pods[0], Edge::new().label("Delete Pod").color("red"));
        scope.connect(
            api,
            pods[1],
            Edge::new()
                .label("Recreate with\nNew Resources")
                .color("purple")
                .bold(),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use scaleviz::{
        diagram::{Diagram, Parent},
        edge::LineStyle,
        structure::Hierarchy,
    };

    use super::*;

    fn declared() -> Diagram {
        let mut diagram = Diagram::new(VpaArchitecture.options().title());
        VpaArchitecture.declare(&mut diagram.scope()).unwrap();
        diagram
    }

    #[test]
    fn test_structure() {
        let diagram = declared();

        assert_eq!(diagram.entities().count(), 7);
        assert_eq!(diagram.clusters().len(), 7);
        assert_eq!(diagram.connections().len(), 11);
        assert_eq!(diagram.root_children().len(), 3);

        let components = &diagram.clusters()[1];
        assert_eq!(components.label(), "VPA Components (kube-system)");
        assert_eq!(components.children().len(), 3);
        assert!(
            diagram
                .clusters()
                .iter()
                .filter(|c| c.parent() == Parent::Cluster(components.id()))
                .all(|c| c.children().len() == 1)
        );

        Hierarchy::build(&diagram).expect("valid structure");
    }

    #[test]
    fn test_connections_are_declared_after_endpoints() {
        let diagram = declared();

        for connection in diagram.connections() {
            let source = diagram.resolve(connection.source()).expect("source");
            let target = diagram.resolve(connection.target()).expect("target");
            assert!(source.order() < connection.order());
            assert!(target.order() < connection.order());
        }
    }

    #[test]
    fn test_edge_styles() {
        let diagram = declared();
        let edges: Vec<_> = diagram.connections().iter().map(|c| c.edge()).collect();

        assert_eq!(edges[0].line_style(), LineStyle::Dashed);
        assert_eq!(edges[0].color_text(), Some("blue"));
        assert_eq!(edges[4].line_style(), LineStyle::Dotted);
        assert_eq!(edges[4].color_text(), None);
        assert_eq!(edges[7].style_value().as_deref(), Some("dashed"));
        assert!(edges[10].is_bold());
        assert_eq!(edges[10].label_text(), Some("Recreate with\nNew Resources"));
    }

    #[test]
    fn test_options() {
        let options = VpaArchitecture.options();

        assert_eq!(options.filename(), "vpa_architecture");
        assert_eq!(options.direction(), Direction::TopToBottom);
        assert_eq!(options.graph_attr().get("ranksep"), Some("1.0"));
        assert_eq!(
            options.icons_path(),
            Some(std::path::Path::new(".").join(ICONS_DIR))
        );
    }
}
