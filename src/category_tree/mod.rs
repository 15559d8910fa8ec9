mod build;
mod highlight;
mod layout;

pub use layout::CategoryLayout;

use std::collections::HashMap;

use crate::graph::{CategoryGraph, ClusterId, EdgeId, NodeId};
use crate::wikidb::Category;

pub const CATEGORY_EDGE_WEIGHT: f64 = 0.9;

#[derive(Clone, Debug, Default)]
pub struct CategoryTree {
    graph: CategoryGraph,
    index_to_node: HashMap<u32, NodeId>,
    source_cluster: Option<ClusterId>,
    highlight_mode: bool,
    highlighted_nodes: Vec<NodeId>,
    highlighted_edges: Vec<EdgeId>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &CategoryGraph {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_for_category(&self, category_id: u32) -> Option<NodeId> {
        self.index_to_node.get(&category_id).copied()
    }

    pub fn source_cluster(&self) -> Option<ClusterId> {
        self.source_cluster
    }

    pub fn highlight_mode(&self) -> bool {
        self.highlight_mode
    }

    pub fn highlighted_nodes(&self) -> &[NodeId] {
        &self.highlighted_nodes
    }

    pub fn highlighted_edges(&self) -> &[EdgeId] {
        &self.highlighted_edges
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.index_to_node.clear();
        self.source_cluster = None;
        self.clear_highlighting();
    }

    fn ensure_node(&mut self, category: Category) -> NodeId {
        if let Some(&node) = self.index_to_node.get(&category.index) {
            return node;
        }
        let index = category.index;
        let label = category.title.clone();
        let node = self.graph.create_node(index, label, category);
        self.index_to_node.insert(index, node);
        node
    }

    fn link(&mut self, grandparent: NodeId, parent: NodeId) -> bool {
        if grandparent == parent || self.graph.has_edge(grandparent, parent) {
            return false;
        }
        self.graph.create_edge(grandparent, parent, CATEGORY_EDGE_WEIGHT);
        true
    }
}
