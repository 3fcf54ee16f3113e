//! Graph projection for spatial layout.
//!
//! The output mirrors what a force-layout renderer expects:
//! `{ "nodes": [{id, label, color}], "edges": [{source, target}] }`.
use serde::Serialize;

use crate::{valid_links, Note, DEFAULT_COLOR};

/// A node of the rendered graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub color: String,
}

/// A directed edge between two existing notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphProjection {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphProjection {
    /// Builds one node per note and one edge per non-dangling link.
    ///
    /// Repeated links to the same target produce repeated edges.
    pub fn build(notes: &[Note]) -> Self {
        let nodes = notes
            .iter()
            .map(|note| GraphNode {
                id: note.id.clone(),
                label: note.title.clone(),
                color: if note.color.is_empty() {
                    DEFAULT_COLOR.to_string()
                } else {
                    note.color.clone()
                },
            })
            .collect();

        let edges = valid_links(notes)
            .into_iter()
            .flat_map(|links| {
                links.targets.into_iter().map(move |target| GraphEdge {
                    source: links.source.to_string(),
                    target: target.to_string(),
                })
            })
            .collect();

        GraphProjection { nodes, edges }
    }
}
