//! Rendering of a styled graph into an HTML document.
//!
//! Layout and physics run in the browser through a vis-network compatible
//! library; this module only serializes the styled nodes and edges together
//! with the network options. The [`Renderer`] trait is the seam for other
//! backends.

use crate::error::Result;
use crate::style::{PALETTE, StyledGraph};
use serde::Serialize;
use tracing::warn;

/// Element the network is drawn into. The exporter anchors on it.
pub const NETWORK_ANCHOR: &str = "<div id=\"mynetwork\"";

/// Pinned upstream vis-network, only used when a CDN link is requested
pub const DEFAULT_VIS_CDN: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// Canvas viewer shipped with the crate, implementing the `vis.DataSet` and
/// `vis.Network` calls the generated pages make
pub const BUNDLED_VIEWER: &str = include_str!("../assets/network-viewer.js");

/// Where the network library comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScriptSource {
    /// The bundled viewer, embedded in the page
    #[default]
    Bundled,
    /// Library source embedded in the page, e.g. a local vis-network build
    Inline(String),
    /// Referenced by URL; viewing the page needs network access
    Cdn(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsOptions {
    pub node_distance: u32,
    pub central_gravity: f32,
    pub spring_length: u32,
    pub spring_constant: f32,
    pub min_velocity: f32,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self {
            node_distance: 200,
            central_gravity: 0.1,
            spring_length: 200,
            spring_constant: 0.04,
            min_velocity: 0.75,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub script: ScriptSource,
    pub physics: PhysicsOptions,
}

impl RenderOptions {
    pub fn with_script(mut self, script: ScriptSource) -> Self {
        self.script = script;
        self
    }

    /// vis-network options object
    pub fn network_options(&self) -> serde_json::Value {
        let groups: serde_json::Map<String, serde_json::Value> = PALETTE
            .iter()
            .map(|(name, style)| {
                (
                    name.to_string(),
                    serde_json::json!({ "color": style.color }),
                )
            })
            .collect();

        serde_json::json!({
            "nodes": { "borderWidth": crate::style::NODE_BORDER_WIDTH },
            "groups": groups,
            "physics": {
                "enabled": true,
                "solver": "repulsion",
                "repulsion": {
                    "nodeDistance": self.physics.node_distance,
                    "centralGravity": self.physics.central_gravity,
                    "springLength": self.physics.spring_length,
                    "springConstant": self.physics.spring_constant
                },
                "hierarchicalRepulsion": { "nodeDistance": 0 },
                "minVelocity": self.physics.min_velocity
            }
        })
    }
}

/// Everything a renderer needs for one graph
pub struct Scene<'a> {
    pub title: &'a str,
    pub graph: &'a StyledGraph,
    pub options: &'a RenderOptions,
}

pub trait Renderer {
    fn render(&self, scene: &Scene<'_>) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct VisNetworkRenderer;

impl Renderer for VisNetworkRenderer {
    fn render(&self, scene: &Scene<'_>) -> Result<String> {
        let nodes = script_json(&serde_json::to_string(&scene.graph.nodes)?);
        let edges = script_json(&serde_json::to_string(&scene.graph.edges)?);
        let options = script_json(&serde_json::to_string(&scene.options.network_options())?);

        let library = match &scene.options.script {
            ScriptSource::Bundled => inline_script(BUNDLED_VIEWER),
            ScriptSource::Inline(source) => inline_script(source),
            ScriptSource::Cdn(url) => {
                warn!("Linking vis-network from {}; the page needs network access to render", url);
                format!("<script type=\"text/javascript\" src=\"{}\"></script>", escape_html(url))
            }
        };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<meta name=\"generator\" content=\"dnsgraph {}\">\n",
            env!("CARGO_PKG_VERSION")
        ));
        html.push_str(&format!("<title>{}</title>\n", escape_html(scene.title)));
        html.push_str(&library);
        html.push('\n');
        html.push_str(
            "<style type=\"text/css\">\n\
             body { margin: 0; font-family: sans-serif; }\n\
             body.dark-mode { background: #000; color: #eee; }\n\
             #mynetwork { width: 100%; height: 750px; border: 1px solid lightgray; }\n\
             </style>\n",
        );
        html.push_str("</head>\n<body>\n");
        html.push_str(NETWORK_ANCHOR);
        html.push_str("></div>\n");
        html.push_str("<script type=\"text/javascript\">\n");
        html.push_str(&format!("  var nodes = new vis.DataSet({});\n", nodes));
        html.push_str(&format!("  var edges = new vis.DataSet({});\n", edges));
        html.push_str(&format!("  var options = {};\n", options));
        html.push_str("  var container = document.getElementById('mynetwork');\n");
        html.push_str(
            "  var network = new vis.Network(container, { nodes: nodes, edges: edges }, options);\n",
        );
        html.push_str("</script>\n</body>\n</html>\n");

        Ok(html)
    }
}

fn inline_script(source: &str) -> String {
    format!(
        "<script type=\"text/javascript\">{}</script>",
        source.replace("</script", "<\\/script")
    )
}

/// Make serialized JSON safe to embed inside a `<script>` element
pub fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
