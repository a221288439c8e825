// Visual attributes for nodes and edges, keyed by semantic type

use crate::graph::{DnsGraph, LinkRef, Node};
use crate::record::RecordType;
use serde::Serialize;
use std::collections::BTreeMap;

pub const FALLBACK_COLOR: &str = "#999";
pub const FALLBACK_GROUP: &str = "unknown";
/// Level after every known type so unknown nodes sit at the bottom
pub const FALLBACK_LEVEL: u8 = 7;

pub const NODE_SIZE: u32 = 25;
pub const NODE_BORDER_WIDTH: f32 = 1.5;
pub const LABEL_STROKE_WIDTH: u32 = 2;
pub const DOMAIN_MASS: u32 = 3;
pub const EDGE_WIDTH: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStyle {
    pub color: &'static str,
    pub level: u8,
}

/// Palette for the known types, in legend order
pub const PALETTE: [(&str, TypeStyle); 6] = [
    ("domain", TypeStyle { color: "#ADD8E6", level: 1 }),
    ("ns", TypeStyle { color: "#90EE90", level: 2 }),
    ("mx", TypeStyle { color: "#FFD580", level: 3 }),
    ("a", TypeStyle { color: "#FF9999", level: 4 }),
    ("txt", TypeStyle { color: "#D8BFD8", level: 5 }),
    ("cname", TypeStyle { color: "#FFFACD", level: 6 }),
];

pub fn type_style(record_type: &RecordType) -> Option<TypeStyle> {
    PALETTE
        .iter()
        .find(|(name, _)| *name == record_type.as_str())
        .map(|(_, style)| *style)
}

/// Color, group and level for a type, falling back for unknown ones
pub fn resolve(record_type: &RecordType) -> (&'static str, String, u8) {
    match type_style(record_type) {
        Some(style) => (style.color, record_type.as_str().to_string(), style.level),
        None => (FALLBACK_COLOR, FALLBACK_GROUP.to_string(), FALLBACK_LEVEL),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    #[serde(rename = "strokeWidth")]
    pub stroke_width: u32,
}

/// Node attributes as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    pub id: String,
    pub label: String,
    pub group: String,
    pub color: String,
    #[serde(skip)]
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<u32>,
    pub size: u32,
    #[serde(rename = "borderWidth")]
    pub border_width: f32,
    pub font: Font,
}

/// Edge attributes as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub from: String,
    pub to: String,
    pub color: String,
    pub width: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

pub fn style_node(node: &Node) -> NodeStyle {
    let (color, group, level) = resolve(&node.node_type);
    NodeStyle {
        id: node.name.clone(),
        label: node.name.clone(),
        group,
        color: color.to_string(),
        level,
        mass: (node.node_type == RecordType::Domain).then_some(DOMAIN_MASS),
        size: NODE_SIZE,
        border_width: NODE_BORDER_WIDTH,
        font: Font {
            stroke_width: LABEL_STROKE_WIDTH,
        },
    }
}

pub fn style_edge(edge: &LinkRef<'_>) -> EdgeStyle {
    let color = type_style(&edge.link.record_type)
        .map(|s| s.color)
        .unwrap_or(FALLBACK_COLOR);

    EdgeStyle {
        from: edge.from.to_string(),
        to: edge.to.to_string(),
        color: color.to_string(),
        width: EDGE_WIDTH,
        title: edge_title(
            edge.link.priority.as_deref(),
            edge.link.annotation.as_deref(),
        ),
    }
}

/// Tooltip for an edge: non-empty priority and annotation joined by `<br>`
pub fn edge_title(priority: Option<&str>, annotation: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [priority, annotation]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("<br>"))
    }
}

/// Styled view of a whole graph
#[derive(Debug, Clone, PartialEq)]
pub struct StyledGraph {
    pub nodes: Vec<NodeStyle>,
    pub edges: Vec<EdgeStyle>,
    /// Node id -> hierarchical level
    pub levels: BTreeMap<String, u8>,
}

pub fn style_graph(graph: &DnsGraph) -> StyledGraph {
    let nodes: Vec<NodeStyle> = graph.nodes().map(style_node).collect();
    let edges = graph.edges().map(|e| style_edge(&e)).collect();
    let levels = nodes.iter().map(|n| (n.id.clone(), n.level)).collect();
    StyledGraph {
        nodes,
        edges,
        levels,
    }
}

/// Palette as a `type -> color` map for the browser controls
pub fn palette_colors() -> BTreeMap<&'static str, &'static str> {
    PALETTE.iter().map(|(name, s)| (*name, s.color)).collect()
}
