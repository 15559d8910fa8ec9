mod engine;
mod layout;
mod placement;
mod window;

pub use engine::ClusteringEngine;
pub use layout::{ClusterLayout, RingAssignment, place_on_circle};
pub use placement::{GlobalLayout, OverviewExtent, clusters_on_screen, place_clusters};
pub use window::SimilarityWindow;

use serde::Serialize;

use crate::graph::{ClusterId, EdgeId, Graph, NodeId};
use crate::util::cluster_radius;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn around(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            min_x: center_x - radius,
            min_y: center_y - radius,
            max_x: center_x + radius,
            max_y: center_y + radius,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// A connected group of articles and the edges between them.
///
/// Node and edge lists are handles into the engine's article graph; every
/// edge listed here has both endpoints listed here too.
#[derive(Clone, Debug)]
pub struct Cluster {
    id: ClusterId,
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
    position_x: f64,
    position_y: f64,
    radius: f64,
    bounding_box: Option<BoundingBox>,
}

impl Cluster {
    pub fn new(id: ClusterId) -> Self {
        Self {
            id,
            nodes: Vec::new(),
            edges: Vec::new(),
            position_x: 0.0,
            position_y: 0.0,
            radius: 0.0,
            bounding_box: None,
        }
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }

    /// Appends all nodes and edges of `other`; the older (smaller) id of the
    /// two survives. Re-tagging nodes is the caller's job since the graph
    /// owns the membership field.
    pub fn absorb(&mut self, other: Cluster) {
        self.id = self.id.min(other.id);
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.position_x, self.position_y)
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position_x = x;
        self.position_y = y;
        self.refresh_bounding_box();
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
        self.refresh_bounding_box();
    }

    pub fn effective_radius(&self, node_size: f64) -> f64 {
        if self.radius > 0.0 {
            self.radius
        } else {
            cluster_radius(self.nodes.len(), node_size)
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    pub fn within(&self, x: f64, y: f64) -> bool {
        self.bounding_box.is_some_and(|bounds| bounds.contains(x, y))
    }

    pub fn node_weight_sum<P>(&self, graph: &Graph<P>) -> usize {
        self.nodes.iter().map(|&node| graph.degree(node)).sum()
    }

    pub fn edge_weight_range<P>(&self, graph: &Graph<P>) -> Option<(f64, f64)> {
        self.edges.iter().fold(None, |range, &edge| {
            let weight = graph.edge(edge).weight;
            Some(match range {
                Some((min, max)) => (f64::min(min, weight), f64::max(max, weight)),
                None => (weight, weight),
            })
        })
    }

    fn refresh_bounding_box(&mut self) {
        self.bounding_box = (self.radius > 0.0)
            .then(|| BoundingBox::around(self.position_x, self.position_y, self.radius));
    }
}
