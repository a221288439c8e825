// Legend and control-panel injection, and writing the final artifact

use crate::error::{GraphError, Result};
use crate::render::{NETWORK_ANCHOR, script_json};
use crate::style::{PALETTE, palette_colors};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A browser-side control offered in the panel above the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    /// JavaScript function invoked on click
    pub handler: &'static str,
}

/// Buttons of the control panel, in display order. The free-text search box
/// sits in front of them.
pub const CONTROLS: [Control; 11] = [
    Control { label: "Search", handler: "searchNode" },
    Control { label: "Layout", handler: "toggleLayout" },
    Control { label: "Dark", handler: "toggleDarkMode" },
    Control { label: "Legend", handler: "toggleLegend" },
    Control { label: "- Repulsion", handler: "decreaseRepulsion" },
    Control { label: "+ Repulsion", handler: "increaseRepulsion" },
    Control { label: "- Size", handler: "decreaseNodeSize" },
    Control { label: "+ Size", handler: "increaseNodeSize" },
    Control { label: "- Text", handler: "decreaseFontSize" },
    Control { label: "+ Text", handler: "increaseFontSize" },
    Control { label: "Clear", handler: "clearSearch" },
];

const CONTROL_SCRIPT: &str = r##"
  var hierarchicalEnabled = false;
  var repulsionDistance = 200;
  var nodeSize = 25;
  var fontSize = null;
  var isDarkMode = false;
  var myLevels = __LEVELS__;
  var myColors = __COLORS__;
  var searchResults = [];
  var searchIndex = 0;

  function applyAllUpdates() {
    var updates = [];
    network.body.data.nodes.forEach(function(node) {
      var ntype = node.group || 'unknown';
      var update = {
        id: node.id,
        size: nodeSize,
        color: myColors[ntype] || "#999",
        font: {
          size: fontSize || undefined,
          strokeWidth: 2,
          strokeColor: isDarkMode ? "#000" : "#fff",
          color: isDarkMode ? "#eee" : "#000"
        }
      };
      if (myLevels[node.id]) {
        update.level = hierarchicalEnabled ? myLevels[node.id] : null;
      }
      updates.push(update);
    });
    network.body.data.nodes.update(updates);
  }

  function increaseNodeSize() { nodeSize += 5; applyAllUpdates(); }
  function decreaseNodeSize() { nodeSize = Math.max(5, nodeSize - 5); applyAllUpdates(); }

  function increaseFontSize() {
    if (fontSize === null) fontSize = 14;
    fontSize += 2;
    applyAllUpdates();
  }

  function decreaseFontSize() {
    if (fontSize === null) fontSize = 14;
    fontSize = Math.max(6, fontSize - 2);
    applyAllUpdates();
  }

  function themeButtons(background, color, border) {
    document.querySelectorAll('button').forEach(function(btn) {
      btn.style.background = background; btn.style.color = color; btn.style.borderColor = border;
    });
  }

  function toggleDarkMode() {
    isDarkMode = !isDarkMode;
    var legend = document.getElementById('legend');
    var canvas = document.getElementById('mynetwork');
    if (isDarkMode) {
      document.body.classList.add("dark-mode");
      legend.style.background = "#000"; legend.style.color = "#eee"; canvas.style.background = "#000";
      themeButtons("#333", "#eee", "#666");
    } else {
      document.body.classList.remove("dark-mode");
      legend.style.background = "#fff"; legend.style.color = "#333"; canvas.style.background = "#fff";
      themeButtons("#eee", "#000", "#ccc");
    }
    applyAllUpdates();
  }

  function physicsOptions() {
    if (hierarchicalEnabled) {
      return { enabled: true, solver: "hierarchicalRepulsion",
        hierarchicalRepulsion: { nodeDistance: repulsionDistance }, repulsion: { nodeDistance: 0 } };
    }
    return { enabled: true, solver: "repulsion",
      repulsion: { nodeDistance: repulsionDistance, centralGravity: 0.1, springLength: 200, springConstant: 0.04 },
      hierarchicalRepulsion: { nodeDistance: 0 } };
  }

  function toggleLayout() {
    hierarchicalEnabled = !hierarchicalEnabled;
    var hierarchical = hierarchicalEnabled
      ? { enabled: true, levelSeparation: repulsionDistance, nodeSpacing: 400, treeSpacing: 300, direction: "UD", sortMethod: "hubsize" }
      : { enabled: false };
    network.setOptions({ layout: { hierarchical: hierarchical }, physics: physicsOptions() });
    applyAllUpdates();
  }

  function increaseRepulsion() { repulsionDistance += 50; updateRepulsion(); }
  function decreaseRepulsion() { repulsionDistance = Math.max(50, repulsionDistance - 50); updateRepulsion(); }
  function updateRepulsion() {
    var opts = { physics: physicsOptions() };
    if (hierarchicalEnabled) {
      opts.layout = { hierarchical: { levelSeparation: repulsionDistance } };
    }
    network.setOptions(opts);
  }

  function toggleLegend() {
    var legend = document.getElementById('legend');
    legend.style.display = (legend.style.display === "none") ? "block" : "none";
  }

  function updateSearch() {
    var query = document.getElementById('searchBox').value.trim().toLowerCase();
    searchResults = []; searchIndex = 0;
    if (query !== "") {
      network.body.data.nodes.forEach(function(node) {
        if (String(node.id).toLowerCase().includes(query)) { searchResults.push(node.id); }
      });
    }
    renderSearchResults(query);
  }

  function searchNode() {
    if (searchResults.length === 0) { alert("No match found."); return; }
    var nodeId = searchResults[searchIndex];
    network.selectNodes([nodeId]);
    network.focus(nodeId, { scale: 1.5 });
    searchIndex = (searchIndex + 1) % searchResults.length;
  }

  function clearSearch() {
    document.getElementById('searchBox').value = "";
    searchResults = []; searchIndex = 0;
    network.unselectAll();
    document.getElementById('searchResults').innerHTML = "";
  }

  function renderSearchResults(query) {
    var container = document.getElementById('searchResults');
    container.innerHTML = "";
    if (query === "") { return; }
    if (searchResults.length === 0) {
      container.innerHTML = "<div style='padding:4px; color:#888;'>No matches</div>";
      return;
    }
    searchResults.forEach(function(nodeId) {
      var item = document.createElement('div');
      item.textContent = nodeId;
      item.style = "padding:4px 8px; cursor:pointer; background:#fff; color:#000;";
      item.onmouseover = function() { item.style.background = '#eee'; };
      item.onmouseout = function() { item.style.background = '#fff'; };
      item.onclick = function() { network.selectNodes([nodeId]); network.focus(nodeId, { scale: 1.5 }); };
      container.appendChild(item);
    });
  }

  document.addEventListener('click', function(event) {
    if (!event.target.closest('#searchBox') && !event.target.closest('#searchResults')) {
      document.getElementById('searchResults').innerHTML = "";
    }
  });
"##;

/// Fixed-position legend listing every known type with its color
pub fn legend_html() -> String {
    let mut html = String::from(
        "<div id=\"legend\" style=\"position:absolute; top:20px; left:20px; background:#fff; \
         border:1px solid #ccc; padding:10px; z-index:999; color:#333;\">",
    );
    for (name, style) in PALETTE.iter() {
        html.push_str(&format!(
            "<div style=\"margin:4px;\">\
             <span style=\"display:inline-block; width:12px; height:12px; border-radius:50%; \
             background:{}; margin-right:6px;\"></span>\
             <span>{}</span></div>",
            style.color,
            name.to_uppercase()
        ));
    }
    html.push_str("</div>");
    html
}

/// Search box, control buttons and the script driving them
pub fn controls_html(levels: &BTreeMap<String, u8>) -> Result<String> {
    let levels_json = script_json(&serde_json::to_string(levels)?);
    let colors_json = script_json(&serde_json::to_string(&palette_colors())?);

    let mut html = String::new();
    html.push_str("<div style=\"position: relative; margin-bottom:5px; width: 100%;\">\n");
    html.push_str("  <div style=\"display: flex; flex-wrap: wrap; gap: 5px; align-items: center;\">\n");
    html.push_str(
        "    <input id=\"searchBox\" type=\"text\" placeholder=\"Search...\" oninput=\"updateSearch()\" \
         style=\"padding:5px; font-size:14px; width: 180px;\">\n",
    );
    for control in CONTROLS.iter() {
        html.push_str(&format!(
            "    <button onclick=\"{}()\">{}</button>\n",
            control.handler, control.label
        ));
    }
    html.push_str("  </div>\n");
    html.push_str(
        "  <div id=\"searchResults\" style=\"position: absolute; top: 40px; left: 0; right: 0; \
         background: #fff; border: 1px solid #ccc; max-height: 200px; overflow-y: auto; \
         font-family: sans-serif; z-index: 9999;\"></div>\n",
    );
    html.push_str("</div>\n<script>");
    html.push_str(
        &CONTROL_SCRIPT
            .replace("__LEVELS__", &levels_json)
            .replace("__COLORS__", &colors_json),
    );
    html.push_str("</script>\n");
    Ok(html)
}

/// Place the controls and legend in front of the network element
pub fn inject(document: &str, levels: &BTreeMap<String, u8>) -> Result<String> {
    if !document.contains(NETWORK_ANCHOR) {
        return Err(GraphError::MissingAnchor("mynetwork"));
    }

    let replacement = format!(
        "{}<div style=\"position: relative;\">{}\n<div id=\"mynetwork\" style=\"position: relative; background: #fff;\"",
        controls_html(levels)?,
        legend_html()
    );

    Ok(document.replacen(NETWORK_ANCHOR, &replacement, 1))
}

pub fn save_document(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
