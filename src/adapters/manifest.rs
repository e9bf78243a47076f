//! Host adapter driven by a JSON collection manifest.
//!
//! A manifest is a tree of collection nodes (modules, classes, functions).
//! A node without a `children` key is a test item; a node with a
//! `children` list, even an empty one, is a collector. Markers on
//! collectors are inherited by every item below them, the same way a test
//! framework applies a class-level marker to each of its methods. Node ids
//! must be unique within a manifest.

use crate::core::plugin::{TicketPlugin, MARKER_NAME};
use crate::core::report::ReportExtra;
use crate::core::{CollectedItem, CollectionHost, PluginHost, TicketMarker};
use crate::utils::error::{Result, TicketError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const NODE_ID_SEPARATOR: &str = "::";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionManifest {
    #[serde(default)]
    pub nodes: Vec<ManifestNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestNode {
    pub name: String,
    #[serde(default)]
    pub markers: Vec<ManifestMarker>,
    /// `None` marks a test item.
    #[serde(default)]
    pub children: Option<Vec<ManifestNode>>,
}

/// Any marker the host collected. Only `ticket` markers are interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestMarker {
    pub name: String,
    #[serde(default)]
    pub kwargs: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManifestItem {
    node_id: String,
    markers: Vec<TicketMarker>,
}

impl CollectedItem for ManifestItem {
    fn node_id(&self) -> &str {
        &self.node_id
    }

    fn ticket_markers(&self) -> Vec<TicketMarker> {
        self.markers.clone()
    }
}

impl CollectionManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Flattens the tree into test items in collection order.
    pub fn collect_items(&self) -> Result<Vec<ManifestItem>> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        for node in &self.nodes {
            collect_node(node, None, &[], &mut seen, &mut items)?;
        }
        Ok(items)
    }
}

fn collect_node(
    node: &ManifestNode,
    parent_id: Option<&str>,
    inherited: &[TicketMarker],
    seen: &mut HashSet<String>,
    items: &mut Vec<ManifestItem>,
) -> Result<()> {
    if node.name.trim().is_empty() {
        return Err(TicketError::ManifestError {
            message: format!(
                "node without a name under '{}'",
                parent_id.unwrap_or("<root>")
            ),
        });
    }

    let node_id = match parent_id {
        Some(parent) => format!("{}{}{}", parent, NODE_ID_SEPARATOR, node.name),
        None => node.name.clone(),
    };

    if !seen.insert(node_id.clone()) {
        return Err(TicketError::ManifestError {
            message: format!("duplicate node id '{}'", node_id),
        });
    }

    // Closest markers first, then the enclosing ones.
    let mut markers = ticket_markers(&node_id, &node.markers)?;
    markers.extend(inherited.iter().cloned());

    let Some(children) = &node.children else {
        items.push(ManifestItem { node_id, markers });
        return Ok(());
    };

    for child in children {
        collect_node(child, Some(&node_id), &markers, seen, items)?;
    }
    Ok(())
}

fn ticket_markers(node_id: &str, markers: &[ManifestMarker]) -> Result<Vec<TicketMarker>> {
    markers
        .iter()
        .filter(|marker| marker.name == MARKER_NAME)
        .map(|marker| {
            if marker.kwargs.is_null() {
                return Ok(TicketMarker::new());
            }
            serde_json::from_value(marker.kwargs.clone()).map_err(|e| TicketError::ManifestError {
                message: format!("invalid ticket marker on '{}': {}", node_id, e),
            })
        })
        .collect()
}

/// Selected item as written to the output.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedEntry {
    pub id: String,
    pub tickets: Vec<String>,
    #[serde(skip_serializing_if = "ReportExtra::is_empty")]
    pub extra: ReportExtra,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionReport {
    pub selected: Vec<SelectedEntry>,
    pub deselected: Vec<String>,
}

impl CollectionReport {
    /// One selected node id per line, with its tickets when it has any.
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        for entry in &self.selected {
            output.push_str(&entry.id);
            if !entry.tickets.is_empty() {
                output.push_str(&format!(" [{}]", entry.tickets.join(", ")));
            }
            output.push('\n');
        }
        output
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)? + "\n")
    }
}

/// One test run against a manifest, acting as the plugin's host.
#[derive(Debug, Default)]
pub struct ManifestSession {
    reporting: bool,
    marker_lines: Vec<String>,
    deselected: Vec<ManifestItem>,
}

impl ManifestSession {
    pub fn new(reporting: bool) -> Self {
        Self {
            reporting,
            ..Self::default()
        }
    }

    pub fn marker_lines(&self) -> &[String] {
        &self.marker_lines
    }

    pub fn deselected(&self) -> &[ManifestItem] {
        &self.deselected
    }

    /// Runs the collection hook over `items`, then the reporting hook over
    /// every selected item.
    pub fn run(
        &mut self,
        plugin: &mut TicketPlugin,
        mut items: Vec<ManifestItem>,
    ) -> Result<CollectionReport> {
        plugin.collection_modify_items(&mut items, self)?;

        let selected = items
            .iter()
            .map(|item| {
                let mut extra = ReportExtra::new();
                plugin.item_collected(&*self, item, &mut extra);
                SelectedEntry {
                    id: item.node_id.clone(),
                    tickets: plugin
                        .tickets_for(&item.node_id)
                        .map(|tickets| tickets.iter().map(|t| t.as_str().to_string()).collect())
                        .unwrap_or_default(),
                    extra,
                }
            })
            .collect();

        Ok(CollectionReport {
            selected,
            deselected: self
                .deselected
                .iter()
                .map(|item| item.node_id.clone())
                .collect(),
        })
    }
}

impl PluginHost for ManifestSession {
    fn register_marker(&mut self, line: &str) {
        self.marker_lines.push(line.to_string());
    }

    fn reporting_enabled(&self) -> bool {
        self.reporting
    }
}

impl CollectionHost<ManifestItem> for ManifestSession {
    fn notify_deselected(&mut self, items: Vec<ManifestItem>) {
        if !items.is_empty() {
            tracing::debug!("{} items deselected by ticket filter", items.len());
        }
        self.deselected.extend(items);
    }
}
