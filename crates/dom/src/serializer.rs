//! DOM Serializer - Convert a subtree to a structured snapshot
//!
//! Used to render what a query was looking at when an assertion fails:
//! - Element nodes keep their tag, sorted attributes and children
//! - Text nodes are trimmed, capped, and dropped when blank
//! - Comments, doctypes and processing instructions are skipped

use crate::arena::DomArena;
use crate::document::Element;
use crate::error::{DomError, Result};
use crate::selector::cap_text_length;
use crate::types::{NodeId, NodeType};
use scraper::Node;
use serde::{Deserialize, Serialize};

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    pub max_text_length: usize,
    pub include_text: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            max_text_length: 200,
            include_text: true,
        }
    }
}

/// Owned, serializable view of one node and its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attributes: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Number of nodes in the snapshot, itself included
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(NodeSnapshot::size).sum::<usize>()
    }
}

/// DOM Tree Serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Pretty JSON rendering of an element's subtree
    pub fn to_json(&self, element: &Element) -> Result<String> {
        let snapshot = element
            .document()
            .with_arena(|arena| self.snapshot(arena, element.node_id()))?;
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Snapshot the subtree rooted at `node_id`
    pub fn snapshot(&self, arena: &DomArena, node_id: NodeId) -> Result<NodeSnapshot> {
        self.snapshot_node(arena, node_id)?.ok_or_else(|| {
            DomError::SerializationError(format!("{node_id:?} has no serializable content"))
        })
    }

    fn snapshot_node(&self, arena: &DomArena, node_id: NodeId) -> Result<Option<NodeSnapshot>> {
        let node = arena.get(node_id)?;

        let snapshot = match node.value() {
            Node::Element(el) => {
                let mut attributes: Vec<(String, String)> = el
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                attributes.sort();
                NodeSnapshot {
                    node_type: NodeType::Element,
                    tag: Some(el.name().to_string()),
                    attributes,
                    text: None,
                    children: self.snapshot_children(arena, node_id)?,
                }
            }
            Node::Text(t) => {
                let text = t.trim();
                if !self.config.include_text || text.is_empty() {
                    return Ok(None);
                }
                NodeSnapshot {
                    node_type: NodeType::Text,
                    tag: None,
                    attributes: Vec::new(),
                    text: Some(cap_text_length(text, self.config.max_text_length)),
                    children: Vec::new(),
                }
            }
            Node::Document | Node::Fragment => NodeSnapshot {
                node_type: NodeType::of(node.value()),
                tag: None,
                attributes: Vec::new(),
                text: None,
                children: self.snapshot_children(arena, node_id)?,
            },
            _ => return Ok(None),
        };

        Ok(Some(snapshot))
    }

    fn snapshot_children(&self, arena: &DomArena, node_id: NodeId) -> Result<Vec<NodeSnapshot>> {
        let child_ids: Vec<NodeId> = arena.get(node_id)?.children().map(|c| c.id()).collect();
        let mut children = Vec::with_capacity(child_ids.len());
        for child_id in child_ids {
            if let Some(child) = self.snapshot_node(arena, child_id)? {
                children.push(child);
            }
        }
        Ok(children)
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}
