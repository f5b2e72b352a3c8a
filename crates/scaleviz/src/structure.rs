//! Structural validation of a declared diagram.
//!
//! [`Hierarchy`] rebuilds the containment tree of a [`Diagram`] as a
//! `petgraph` graph, with the diagram root as the single root, and checks it
//! before anything is handed to Graphviz:
//!
//! - every cluster and entity has exactly one parent, and that parent agrees
//!   with the container the item was declared in;
//! - the containment graph has no cycles and every item is reachable from
//!   the root;
//! - every connection references two entities of the same diagram that were
//!   declared before the connection;
//! - every edge color is a valid color.
//!
//! The validated connections, with their colors parsed, are kept for export.

use std::collections::HashMap;

use log::debug;
use petgraph::{
    Direction::Incoming,
    algo::is_cyclic_directed,
    graph::DiGraph,
    visit::Dfs,
};

use scaleviz_core::{
    color::Color,
    diagram::{Diagram, Entity, EntityRef, Member, Parent},
    edge::Edge,
};

use crate::ScalevizError;

/// A node of the containment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Container {
    Root,
    Member(Member),
}

impl From<Parent> for Container {
    fn from(parent: Parent) -> Self {
        match parent {
            Parent::Root => Self::Root,
            Parent::Cluster(id) => Self::Member(Member::Cluster(id)),
        }
    }
}

/// A connection whose endpoints and color have been checked.
#[derive(Debug)]
pub struct ResolvedConnection<'a> {
    source: &'a Entity,
    target: &'a Entity,
    edge: &'a Edge,
    color: Option<Color>,
}

impl<'a> ResolvedConnection<'a> {
    pub fn source(&self) -> &'a Entity {
        self.source
    }

    pub fn target(&self) -> &'a Entity {
        self.target
    }

    pub fn edge(&self) -> &'a Edge {
        self.edge
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

/// A diagram whose containment tree and connections passed validation.
#[derive(Debug)]
pub struct Hierarchy<'a> {
    diagram: &'a Diagram,
    tree: DiGraph<Container, ()>,
    connections: Vec<ResolvedConnection<'a>>,
}

impl<'a> Hierarchy<'a> {
    /// Validates `diagram` and builds its hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`ScalevizError::Graph`] for a broken containment tree or a
    /// dangling connection endpoint, and [`ScalevizError::Style`] for an
    /// invalid edge color.
    pub fn build(diagram: &'a Diagram) -> Result<Self, ScalevizError> {
        let tree = Self::containment_tree(diagram)?;
        let connections = diagram
            .connections()
            .iter()
            .map(|connection| -> Result<ResolvedConnection<'a>, ScalevizError> {
                let source = Self::endpoint(diagram, connection.source(), connection.order())?;
                let target = Self::endpoint(diagram, connection.target(), connection.order())?;
                let color = connection
                    .edge()
                    .color_text()
                    .map(|text| {
                        Color::new(text).map_err(|err| {
                            ScalevizError::Style(format!(
                                "connection from `{}` to `{}`: {err}",
                                source.id(),
                                target.id()
                            ))
                        })
                    })
                    .transpose()?;
                Ok(ResolvedConnection {
                    source,
                    target,
                    edge: connection.edge(),
                    color,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            entities = diagram.entities().count(),
            clusters = diagram.clusters().len(),
            connections = connections.len();
            "Diagram structure validated"
        );

        Ok(Self {
            diagram,
            tree,
            connections,
        })
    }

    pub fn diagram(&self) -> &'a Diagram {
        self.diagram
    }

    /// Validated connections in declaration order.
    pub fn connections(&self) -> &[ResolvedConnection<'a>] {
        &self.connections
    }

    /// Number of clusters and entities below the root.
    pub fn members_count(&self) -> usize {
        self.tree.node_count() - 1
    }

    /// Deepest cluster nesting, 0 when the diagram has no clusters.
    pub fn max_depth(&self) -> usize {
        self.diagram
            .clusters()
            .iter()
            .map(|cluster| cluster.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    fn containment_tree(diagram: &Diagram) -> Result<DiGraph<Container, ()>, ScalevizError> {
        let mut tree = DiGraph::new();
        let mut indices = HashMap::new();

        let root = tree.add_node(Container::Root);
        indices.insert(Container::Root, root);
        for cluster in diagram.clusters() {
            let node = Container::Member(Member::Cluster(cluster.id()));
            indices.insert(node, tree.add_node(node));
        }
        for entity in diagram.entities() {
            let node = Container::Member(Member::Entity(entity.id()));
            indices.insert(node, tree.add_node(node));
        }

        let containers = std::iter::once(Parent::Root)
            .chain(diagram.clusters().iter().map(|c| Parent::Cluster(c.id())));
        for parent in containers {
            let children = diagram.children(parent).ok_or_else(|| {
                ScalevizError::Graph(format!("unknown container {parent:?}"))
            })?;
            let parent_index = indices[&Container::from(parent)];
            for child in children {
                let child_index = indices
                    .get(&Container::Member(*child))
                    .copied()
                    .ok_or_else(|| {
                        ScalevizError::Graph(format!("{child:?} is listed but never declared"))
                    })?;
                tree.add_edge(parent_index, child_index, ());
            }
        }

        for node_index in tree.node_indices().filter(|index| *index != root) {
            let parents: Vec<_> = tree.neighbors_directed(node_index, Incoming).collect();
            let Container::Member(member) = tree[node_index] else {
                continue;
            };
            match parents.as_slice() {
                [parent] => {
                    let declared = Self::declared_parent(diagram, member);
                    if declared.map(Container::from) != Some(tree[*parent]) {
                        return Err(ScalevizError::Graph(format!(
                            "{member:?} is listed outside the grouping it was declared in"
                        )));
                    }
                }
                [] => {
                    return Err(ScalevizError::Graph(format!(
                        "{member:?} does not belong to any grouping"
                    )));
                }
                _ => {
                    return Err(ScalevizError::Graph(format!(
                        "{member:?} belongs to {} groupings",
                        parents.len()
                    )));
                }
            }
        }

        if is_cyclic_directed(&tree) {
            return Err(ScalevizError::Graph(
                "groupings do not form a tree".to_string(),
            ));
        }

        let mut reachable = 0;
        let mut dfs = Dfs::new(&tree, root);
        while dfs.next(&tree).is_some() {
            reachable += 1;
        }
        if reachable != tree.node_count() {
            return Err(ScalevizError::Graph(format!(
                "{} item(s) are not reachable from the diagram root",
                tree.node_count() - reachable
            )));
        }

        Ok(tree)
    }

    fn declared_parent(diagram: &Diagram, member: Member) -> Option<Parent> {
        match member {
            Member::Entity(id) => diagram.entity(id).map(Entity::parent),
            Member::Cluster(id) => diagram.cluster(id).map(|cluster| cluster.parent()),
        }
    }

    fn endpoint(
        diagram: &'a Diagram,
        entity: EntityRef,
        connection_order: usize,
    ) -> Result<&'a Entity, ScalevizError> {
        let resolved = diagram.resolve(entity).ok_or_else(|| {
            ScalevizError::Graph(format!(
                "connection references entity `{}` which is not declared in diagram `{}`",
                entity.id(),
                diagram.title()
            ))
        })?;
        if resolved.order() > connection_order {
            return Err(ScalevizError::Graph(format!(
                "connection references entity `{}` before it is declared",
                entity.id()
            )));
        }
        Ok(resolved)
    }
}
