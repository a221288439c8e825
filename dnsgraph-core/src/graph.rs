//! Typed DNS graph.
//!
//! Folds normalized [`Edge`]s into an undirected simple graph keyed by node
//! name. Node types only move along [`UPGRADES`]; an edge between a pair that
//! is already connected overwrites the older attributes.

use crate::parse::{Edge, is_ip};
use crate::record::RecordType;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use std::collections::HashMap;
use tracing::debug;

/// Allowed node retypings as `(current, incoming)` pairs.
///
/// A node typed `current` that shows up as the target of an `incoming`
/// record becomes `incoming`. Anything not listed leaves the type alone.
pub const UPGRADES: [(RecordType, RecordType); 1] = [(RecordType::A, RecordType::Cname)];

/// Returns the upgraded type if `incoming` may replace `current`
pub fn upgrade(current: &RecordType, incoming: &RecordType) -> Option<RecordType> {
    UPGRADES
        .iter()
        .find(|(from, to)| from == current && to == incoming)
        .map(|(_, to)| to.clone())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub node_type: RecordType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub record_type: RecordType,
    pub priority: Option<String>,
    pub annotation: Option<String>,
}

/// Borrowed view of one edge with its endpoint names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRef<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub link: &'a Link,
}

#[derive(Debug, Default)]
pub struct DnsGraph {
    graph: UnGraph<Node, Link>,
    index: HashMap<String, NodeIndex>,
}

impl DnsGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from edges in order
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add(edge);
        }
        debug!(
            "Built graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Fold one edge into the graph
    pub fn add(&mut self, edge: &Edge) -> EdgeIndex {
        let source = self.upsert_source(&edge.source);

        let target = match self.index.get(&edge.target).copied() {
            Some(idx) => {
                if !is_ip(&edge.target) {
                    let node = &mut self.graph[idx];
                    if let Some(upgraded) = upgrade(&node.node_type, &edge.record_type) {
                        debug!(
                            "Retyping {} from {} to {}",
                            node.name, node.node_type, upgraded
                        );
                        node.node_type = upgraded;
                    }
                }
                idx
            }
            None => {
                let node_type = if is_ip(&edge.target) {
                    RecordType::A
                } else {
                    edge.record_type.clone()
                };
                self.insert(&edge.target, node_type)
            }
        };

        self.graph.update_edge(
            source,
            target,
            Link {
                record_type: edge.record_type.clone(),
                priority: edge.priority.clone(),
                annotation: edge.annotation.clone(),
            },
        )
    }

    fn upsert_source(&mut self, name: &str) -> NodeIndex {
        match self.index.get(name).copied() {
            Some(idx) => {
                self.graph[idx].node_type = RecordType::Domain;
                idx
            }
            None => self.insert(name, RecordType::Domain),
        }
    }

    fn insert(&mut self, name: &str, node_type: RecordType) -> NodeIndex {
        let idx = self.graph.add_node(Node {
            name: name.to_string(),
            node_type,
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node_type(&self, name: &str) -> Option<&RecordType> {
        self.index.get(name).map(|&idx| &self.graph[idx].node_type)
    }

    /// Attributes of the edge between `a` and `b`, in either direction
    pub fn edge(&self, a: &str, b: &str) -> Option<&Link> {
        let (&ia, &ib) = (self.index.get(a)?, self.index.get(b)?);
        self.graph.find_edge(ia, ib).map(|e| &self.graph[e])
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = LinkRef<'_>> {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some(LinkRef {
                from: &self.graph[a].name,
                to: &self.graph[b].name,
                link: &self.graph[e],
            })
        })
    }
}
