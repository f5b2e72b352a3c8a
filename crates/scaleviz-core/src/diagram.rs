//! The declared diagram model.
//!
//! A [`Diagram`] records entities, clusters and connections in declaration
//! order. Content is added through a [`Scope`], which mirrors the nesting of
//! clusters: entities and clusters declared in a scope become children of
//! that scope's cluster, or of the diagram itself for the root scope.
//!
//! ```
//! use scaleviz_core::{category::Category, diagram::Diagram, edge::Edge};
//!
//! let mut diagram = Diagram::new("HPA vs VPA");
//! let mut root = diagram.scope();
//! let (hpa, pod) = root.cluster("HPA", |hpa_scope| {
//!     let hpa = hpa_scope.entity("HPA", Category::Helm);
//!     let pod = hpa_scope.cluster("High Traffic", |c| c.entity("Pod", Category::Pod));
//!     (hpa, pod)
//! });
//! root.connect(hpa, pod, Edge::new().label("Adds More Pods").bold());
//!
//! assert_eq!(diagram.entities().count(), 2);
//! assert_eq!(diagram.clusters().len(), 2);
//! assert_eq!(diagram.connections().len(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::{category::Category, edge::Edge, identifier::Id};

static NEXT_DIAGRAM_TOKEN: AtomicU64 = AtomicU64::new(0);

const ENTITY_PREFIX: &str = "entity";
const CLUSTER_PREFIX: &str = "cluster";

/// An entity identifier that is already taken in the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate entity identifier `{0}`")]
pub struct DuplicateIdError(pub Id);

/// Index of a cluster within its diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The container an entity or cluster was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Cluster(ClusterId),
}

/// A child of the diagram root or of a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Entity(Id),
    Cluster(ClusterId),
}

/// Handle to a declared entity, used as a connection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    id: Id,
    diagram: u64,
}

impl EntityRef {
    pub fn id(self) -> Id {
        self.id
    }

    /// Returns `true` if this handle was issued by `diagram`.
    pub fn belongs_to(self, diagram: &Diagram) -> bool {
        self.diagram == diagram.token
    }
}

/// A labeled node.
#[derive(Debug, Clone)]
pub struct Entity {
    id: Id,
    label: String,
    category: Category,
    parent: Parent,
    order: usize,
}

impl Entity {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn parent(&self) -> Parent {
        self.parent
    }

    /// Position of this declaration among all declarations of the diagram.
    pub fn order(&self) -> usize {
        self.order
    }
}

/// A labeled group of entities and nested clusters.
#[derive(Debug, Clone)]
pub struct Cluster {
    id: ClusterId,
    name: Id,
    label: String,
    parent: Parent,
    depth: usize,
    children: Vec<Member>,
}

impl Cluster {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Graphviz subgraph name; always starts with `cluster`.
    pub fn name(&self) -> Id {
        self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Parent {
        self.parent
    }

    /// Nesting depth, 0 for clusters declared at the diagram root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[Member] {
        &self.children
    }
}

/// A directed, styled edge between two entities.
#[derive(Debug, Clone)]
pub struct Connection {
    source: EntityRef,
    target: EntityRef,
    edge: Edge,
    order: usize,
}

impl Connection {
    pub fn source(&self) -> EntityRef {
        self.source
    }

    pub fn target(&self) -> EntityRef {
        self.target
    }

    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    /// Position of this declaration among all declarations of the diagram.
    pub fn order(&self) -> usize {
        self.order
    }
}

/// Everything declared for one diagram.
#[derive(Debug)]
pub struct Diagram {
    token: u64,
    title: String,
    entities: IndexMap<Id, Entity>,
    clusters: Vec<Cluster>,
    root_children: Vec<Member>,
    connections: Vec<Connection>,
    next_order: usize,
    next_anonymous: usize,
}

impl Diagram {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            token: NEXT_DIAGRAM_TOKEN.fetch_add(1, Ordering::Relaxed),
            title: title.into(),
            entities: IndexMap::new(),
            clusters: Vec::new(),
            root_children: Vec::new(),
            connections: Vec::new(),
            next_order: 0,
            next_anonymous: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the root declaration scope.
    pub fn scope(&mut self) -> Scope<'_> {
        Scope {
            diagram: self,
            parent: Parent::Root,
        }
    }

    /// Entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity(&self, id: Id) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Resolves a handle, returning `None` for handles issued by another diagram.
    pub fn resolve(&self, entity: EntityRef) -> Option<&Entity> {
        if entity.belongs_to(self) {
            self.entity(entity.id)
        } else {
            None
        }
    }

    /// Clusters in declaration order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.0)
    }

    /// Children declared directly in the root scope.
    pub fn root_children(&self) -> &[Member] {
        &self.root_children
    }

    /// Children of the given container, or `None` for an unknown cluster.
    pub fn children(&self, parent: Parent) -> Option<&[Member]> {
        match parent {
            Parent::Root => Some(&self.root_children),
            Parent::Cluster(id) => self.cluster(id).map(Cluster::children),
        }
    }

    /// Connections in declaration order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    fn next_order(&mut self) -> usize {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    fn allocate_entity_id(&mut self) -> Id {
        loop {
            let id = Id::numbered(ENTITY_PREFIX, self.next_anonymous);
            self.next_anonymous += 1;
            if !self.entities.contains_key(&id) {
                return id;
            }
        }
    }

    fn children_mut(&mut self, parent: Parent) -> &mut Vec<Member> {
        match parent {
            Parent::Root => &mut self.root_children,
            Parent::Cluster(id) => &mut self.clusters[id.0].children,
        }
    }

    fn depth_below(&self, parent: Parent) -> usize {
        match parent {
            Parent::Root => 0,
            Parent::Cluster(id) => self.clusters[id.0].depth + 1,
        }
    }

    fn push_entity(
        &mut self,
        id: Id,
        label: String,
        category: Category,
        parent: Parent,
    ) -> EntityRef {
        trace!(id = id.to_string(), category = category.to_string(); "Declared entity");
        let order = self.next_order();
        self.entities.insert(
            id,
            Entity {
                id,
                label,
                category,
                parent,
                order,
            },
        );
        self.children_mut(parent).push(Member::Entity(id));
        EntityRef {
            id,
            diagram: self.token,
        }
    }
}

/// Declaration scope for the diagram root or one cluster.
pub struct Scope<'d> {
    diagram: &'d mut Diagram,
    parent: Parent,
}

impl Scope<'_> {
    /// The container this scope declares into.
    pub fn parent(&self) -> Parent {
        self.parent
    }

    /// Declares an entity with an identifier allocated by the diagram.
    pub fn entity(&mut self, label: impl Into<String>, category: Category) -> EntityRef {
        let id = self.diagram.allocate_entity_id();
        self.diagram.push_entity(id, label.into(), category, self.parent)
    }

    /// Declares an entity with an explicit identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateIdError`] if an entity with the same identifier
    /// already exists in the diagram.
    pub fn entity_with_id(
        &mut self,
        id: &str,
        label: impl Into<String>,
        category: Category,
    ) -> Result<EntityRef, DuplicateIdError> {
        let id = Id::new(id);
        if self.diagram.entities.contains_key(&id) {
            return Err(DuplicateIdError(id));
        }
        Ok(self.diagram.push_entity(id, label.into(), category, self.parent))
    }

    /// Declares a cluster and runs `build` in its scope.
    ///
    /// Returns whatever `build` returns, typically the handles declared inside.
    pub fn cluster<R>(
        &mut self,
        label: impl Into<String>,
        build: impl FnOnce(&mut Scope<'_>) -> R,
    ) -> R {
        let index = self.diagram.clusters.len();
        let id = ClusterId(index);
        let label = label.into();
        trace!(cluster = index, label = label.as_str(); "Declared cluster");

        let depth = self.diagram.depth_below(self.parent);
        self.diagram.next_order();
        self.diagram.clusters.push(Cluster {
            id,
            name: Id::numbered(CLUSTER_PREFIX, index),
            label,
            parent: self.parent,
            depth,
            children: Vec::new(),
        });
        self.diagram
            .children_mut(self.parent)
            .push(Member::Cluster(id));

        let mut inner = Scope {
            diagram: &mut *self.diagram,
            parent: Parent::Cluster(id),
        };
        build(&mut inner)
    }

    /// Declares a directed connection from `source` to `target`.
    pub fn connect(&mut self, source: EntityRef, target: EntityRef, edge: Edge) {
        trace!(
            source = source.id.to_string(),
            target = target.id.to_string();
            "Declared connection"
        );
        let order = self.diagram.next_order();
        self.diagram.connections.push(Connection {
            source,
            target,
            edge,
            order,
        });
    }

    /// Declares one connection from `source` to each of `targets`, all with the same style.
    pub fn connect_all(&mut self, source: EntityRef, targets: &[EntityRef], edge: Edge) {
        for target in targets {
            self.connect(source, *target, edge.clone());
        }
    }
}
