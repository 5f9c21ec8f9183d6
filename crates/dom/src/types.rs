//! Core type definitions for the host document
//!
//! Key design principles:
//! 1. Nodes are addressed by arena index (`NodeId`), never by pointer
//! 2. Node kinds follow the DOM specification's numeric codes
//! 3. Containers (documents, fragments) can anchor a query but never match one

use scraper::Node;
use serde::{Deserialize, Serialize};

/// Node identifier (index into the document arena)
pub type NodeId = ego_tree::NodeId;

/// Node type matching DOM specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
}

impl NodeType {
    /// Classify a parsed tree node
    pub fn of(node: &Node) -> Self {
        match node {
            Node::Document => NodeType::Document,
            Node::Fragment => NodeType::DocumentFragment,
            Node::Doctype(_) => NodeType::DocumentType,
            Node::Comment(_) => NodeType::Comment,
            Node::Text(_) => NodeType::Text,
            Node::Element(_) => NodeType::Element,
            Node::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
        }
    }

    /// Containers have no element identity of their own: they can be the
    /// anchor of a query but are never one of its results.
    pub fn is_container(self) -> bool {
        matches!(self, NodeType::Document | NodeType::DocumentFragment)
    }

    /// The DOM `nodeName` for non-element nodes
    pub fn node_name(self) -> &'static str {
        match self {
            NodeType::Element => "#element",
            NodeType::Text => "#text",
            NodeType::ProcessingInstruction => "#processing-instruction",
            NodeType::Comment => "#comment",
            NodeType::Document => "#document",
            NodeType::DocumentType => "#doctype",
            NodeType::DocumentFragment => "#document-fragment",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.node_name())
    }
}
