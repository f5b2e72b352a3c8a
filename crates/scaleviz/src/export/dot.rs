//! Translation of a validated diagram into a Graphviz graph.
//!
//! Clusters become `subgraph cluster_N` blocks nested like the declaration
//! scopes, entities become nodes keyed by their identifier, and connections
//! become edges in declaration order. Default attributes follow the look of
//! the classic Python `diagrams` package; anything in [`DiagramOptions`]
//! overrides them.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node, NodeId, Stmt,
    Subgraph, Vertex,
};
use graphviz_rust::printer::PrinterContext;
use log::trace;

use scaleviz_core::{
    attributes::AttrMap,
    diagram::{Cluster, Diagram, Entity, Member},
};

use crate::{options::DiagramOptions, structure::Hierarchy, structure::ResolvedConnection};

const FONT_NAME: &str = "Sans-Serif";
const FONT_COLOR: &str = "#2D3436";

/// Cluster backgrounds, cycled by nesting depth.
const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

const ICON_NODE_HEIGHT: f32 = 1.9;
const ICON_LINE_PADDING: f32 = 0.4;

/// Builds the Graphviz graph of one diagram.
pub struct DotBuilder<'o> {
    options: &'o DiagramOptions,
}

impl<'o> DotBuilder<'o> {
    pub fn new(options: &'o DiagramOptions) -> Self {
        Self { options }
    }

    /// Builds the graph for a validated diagram.
    pub fn build(&self, hierarchy: &Hierarchy<'_>) -> Graph {
        let diagram = hierarchy.diagram();
        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(attributes(
                &self.graph_attributes(diagram),
            ))),
            Stmt::GAttribute(GraphAttributes::Node(attributes(&self.node_defaults()))),
            Stmt::GAttribute(GraphAttributes::Edge(attributes(&self.edge_defaults()))),
        ];

        stmts.extend(
            diagram
                .root_children()
                .iter()
                .filter_map(|member| self.member_stmt(diagram, *member)),
        );
        stmts.extend(
            hierarchy
                .connections()
                .iter()
                .map(|connection| Stmt::Edge(self.connection_edge(connection))),
        );

        Graph::DiGraph {
            id: quoted(diagram.title()),
            strict: false,
            stmts,
        }
    }

    /// Builds the graph and prints it as DOT source.
    pub fn build_source(&self, hierarchy: &Hierarchy<'_>) -> String {
        let graph = self.build(hierarchy);
        graphviz_rust::print(graph, &mut PrinterContext::default())
    }

    fn graph_attributes(&self, diagram: &Diagram) -> AttrMap {
        let mut attrs = AttrMap::new()
            .with("pad", "2.0")
            .with("splines", self.options.curve_style().as_splines())
            .with("nodesep", "0.60")
            .with("ranksep", "0.75")
            .with("fontname", FONT_NAME)
            .with("fontsize", "15")
            .with("fontcolor", FONT_COLOR)
            .with("label", diagram.title())
            .with("rankdir", self.options.direction().as_rankdir());
        if let Some(icons) = self.options.icons_path() {
            attrs.insert("imagepath", icons.display().to_string());
        }
        attrs.merged(self.options.graph_attr())
    }

    fn node_defaults(&self) -> AttrMap {
        AttrMap::new()
            .with("fontname", FONT_NAME)
            .with("fontsize", "13")
            .with("fontcolor", FONT_COLOR)
            .with("margin", "0.2,0.1")
            .merged(self.options.node_attr())
    }

    fn edge_defaults(&self) -> AttrMap {
        AttrMap::new()
            .with("color", "#7B8894")
            .with("fontcolor", FONT_COLOR)
            .with("fontname", FONT_NAME)
            .with("fontsize", "13")
            .merged(self.options.edge_attr())
    }

    fn member_stmt(&self, diagram: &Diagram, member: Member) -> Option<Stmt> {
        match member {
            Member::Entity(id) => diagram
                .entity(id)
                .map(|entity| Stmt::Node(self.entity_node(entity))),
            Member::Cluster(id) => diagram
                .cluster(id)
                .map(|cluster| Stmt::Subgraph(self.cluster_subgraph(diagram, cluster))),
        }
    }

    fn cluster_subgraph(&self, diagram: &Diagram, cluster: &Cluster) -> Subgraph {
        let background = CLUSTER_BACKGROUNDS[cluster.depth() % CLUSTER_BACKGROUNDS.len()];
        let attrs = AttrMap::new()
            .with("label", cluster.label())
            .with("labeljust", "l")
            .with("style", "rounded")
            .with("pencolor", "#AEB6BE")
            .with("fontname", FONT_NAME)
            .with("fontsize", "12")
            .with("bgcolor", background);
        trace!(
            cluster = cluster.name().to_string(),
            depth = cluster.depth();
            "Emitting cluster"
        );

        let mut stmts: Vec<Stmt> = attributes(&attrs)
            .into_iter()
            .map(Stmt::Attribute)
            .collect();
        stmts.extend(
            cluster
                .children()
                .iter()
                .filter_map(|member| self.member_stmt(diagram, *member)),
        );

        Subgraph {
            id: DotId::Plain(cluster.name().to_string()),
            stmts,
        }
    }

    fn entity_node(&self, entity: &Entity) -> Node {
        let category = entity.category();
        let mut attrs = AttrMap::new().with("label", entity.label());

        if let Some(appearance) = category.appearance() {
            attrs.insert("shape", appearance.shape);
            attrs.insert("style", appearance.style);
            attrs.insert("fillcolor", appearance.fill_color);
            attrs.insert("fontcolor", appearance.font_color);
        } else if let Some(icon) = category.icon() {
            let image = match self.options.icons_path() {
                Some(dir) if icon.is_relative() => dir.join(icon),
                _ => icon.clone(),
            };
            let lines = entity.label().matches('\n').count() as f32;
            attrs.insert("shape", "none");
            attrs.insert("image", image.display().to_string());
            attrs.insert("imagescale", "true");
            attrs.insert("fixedsize", "true");
            attrs.insert("width", "1.4");
            attrs.insert(
                "height",
                format!("{:.1}", ICON_NODE_HEIGHT + ICON_LINE_PADDING * lines),
            );
            attrs.insert("labelloc", "b");
        }

        Node {
            id: node_id(entity),
            attributes: attributes(&attrs),
        }
    }

    fn connection_edge(&self, connection: &ResolvedConnection<'_>) -> DotEdge {
        let edge = connection.edge();
        let mut attrs = AttrMap::new();

        if let Some(label) = edge.label_text() {
            let key = if self.options.curve_style().needs_external_labels() {
                "xlabel"
            } else {
                "label"
            };
            attrs.insert(key, label);
        }
        if let Some(color) = connection.color() {
            attrs.insert("color", color.as_str());
        }
        if let Some(style) = edge.style_value() {
            attrs.insert("style", style);
        }
        attrs.insert("dir", edge.arrow_direction().as_dir());

        DotEdge {
            ty: EdgeTy::Pair(
                Vertex::N(node_id(connection.source())),
                Vertex::N(node_id(connection.target())),
            ),
            attributes: attributes(&attrs),
        }
    }
}

fn node_id(entity: &Entity) -> NodeId {
    NodeId(quoted(&entity.id().as_string()), None)
}

fn attributes(attrs: &AttrMap) -> Vec<Attribute> {
    attrs
        .iter()
        .map(|(name, value)| Attribute(DotId::Plain(name.to_string()), quoted(value)))
        .collect()
}

fn quoted(text: &str) -> DotId {
    DotId::Escaped(format!("\"{}\"", escape(text)))
}

/// Escapes text for a double-quoted DOT string.
///
/// Line breaks become Graphviz's centered `\n` escape.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            ch => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use scaleviz_core::{
        category::Category,
        edge::{ArrowDirection, Edge},
        layout::{CurveStyle, Direction},
    };

    use super::*;

    fn render(diagram: &Diagram, options: &DiagramOptions) -> String {
        let hierarchy = Hierarchy::build(diagram).unwrap();
        DotBuilder::new(options).build_source(&hierarchy)
    }

    fn two_clusters() -> Diagram {
        let mut diagram = Diagram::new("HPA vs VPA");
        let mut root = diagram.scope();
        let (hpa, pod) = root.cluster("HPA\nScales NUMBER of Pods", |c| {
            let hpa = c.entity("HPA", Category::Helm);
            let pod = c.cluster("High Traffic", |inner| {
                inner.entity("Pod\n1 CPU", Category::Pod)
            });
            (hpa, pod)
        });
        root.connect(
            hpa,
            pod,
            Edge::new().label("Adds More Pods →").color("blue").bold(),
        );
        diagram
    }

    #[test]
    fn test_graph_header_and_defaults() {
        let options = DiagramOptions::new("HPA vs VPA")
            .with_direction(Direction::LeftToRight)
            .with_graph_attr(AttrMap::new().with("pad", "0.5").with("bgcolor", "white"));
        let source = render(&two_clusters(), &options);

        assert!(source.contains("digraph \"HPA vs VPA\""));
        assert!(source.contains("rankdir=\"LR\""));
        assert!(source.contains("pad=\"0.5\""));
        assert!(!source.contains("pad=\"2.0\""));
        assert!(source.contains("bgcolor=\"white\""));
        assert!(source.contains("splines=\"ortho\""));
    }

    #[test]
    fn test_clusters_are_nested_subgraphs() {
        let source = render(&two_clusters(), &DiagramOptions::new("t"));

        let outer = source.find("subgraph cluster_0").expect("outer cluster");
        let inner = source.find("subgraph cluster_1").expect("inner cluster");
        assert!(outer < inner);
        assert!(source.contains("label=\"HPA\\nScales NUMBER of Pods\""));
        assert!(source.contains("bgcolor=\"#E5F5FD\""));
        assert!(source.contains("bgcolor=\"#EBF3E7\""));
    }

    #[test]
    fn test_entities_use_category_appearance() {
        let source = render(&two_clusters(), &DiagramOptions::new("t"));

        assert!(source.contains("\"entity_0\""));
        assert!(source.contains("shape=\"hexagon\""));
        assert!(source.contains("shape=\"box\""));
        assert!(source.contains("label=\"Pod\\n1 CPU\""));
    }

    #[test]
    fn test_edge_attributes() {
        let source = render(&two_clusters(), &DiagramOptions::new("t"));

        assert!(source.contains("\"entity_0\" -> \"entity_1\""));
        assert!(source.contains("xlabel=\"Adds More Pods →\""));
        assert!(source.contains("color=\"blue\""));
        assert!(source.contains("style=\"bold\""));
        assert!(source.contains("dir=\"forward\""));
    }

    #[test]
    fn test_curved_edges_use_plain_labels() {
        let options = DiagramOptions::new("t").with_curve_style(CurveStyle::Curved);
        let source = render(&two_clusters(), &options);

        assert!(source.contains("splines=\"curved\""));
        assert!(source.contains("label=\"Adds More Pods →\""));
        assert!(!source.contains("xlabel="));
    }

    #[test]
    fn test_custom_icon_resolves_against_icons_dir() {
        let mut diagram = Diagram::new("icons");
        let mut root = diagram.scope();
        let a = root.entity("VPA\nResource", Category::custom("vpa.png"));
        let b = root.entity("Plain", Category::Pod);
        root.connect(a, b, Edge::new().direction(ArrowDirection::None));

        let options = DiagramOptions::new("icons")
            .with_output_dir("out")
            .with_icons_dir("custom_icons");
        let source = render(&diagram, &options);

        let expected = std::path::Path::new("out").join("custom_icons").join("vpa.png");
        assert!(source.contains(&format!("image=\"{}\"", expected.display())));
        assert!(source.contains("shape=\"none\""));
        assert!(source.contains("height=\"2.3\""));
        assert!(source.contains("dir=\"none\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a\nb"), "a\\nb");
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
        assert_eq!(escape("crlf\r\n"), "crlf\\n");
    }

    proptest! {
        #[test]
        fn escaped_text_stays_inside_quotes(text in ".*") {
            let escaped = escape(&text);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));

            // Every quote is preceded by an odd run of backslashes.
            let bytes = escaped.as_bytes();
            for (idx, byte) in bytes.iter().enumerate() {
                if *byte == b'"' {
                    let run = bytes[..idx]
                        .iter()
                        .rev()
                        .take_while(|b| **b == b'\\')
                        .count();
                    prop_assert_eq!(run % 2, 1);
                }
            }
        }
    }
}
