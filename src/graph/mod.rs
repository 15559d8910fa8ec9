mod edge;
mod node;

pub use edge::{Edge, EdgeId};
pub use node::{ClusterId, Node, NodeId};

use crate::wikidb::{Article, Category};

pub type ArticleGraph = Graph<Article>;
pub type CategoryGraph = Graph<Category>;

#[derive(Clone, Debug)]
pub struct Graph<P> {
    nodes: Vec<Node<P>>,
    edges: Vec<Edge>,
}

impl<P> Default for Graph<P> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<P> Graph<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(&mut self, index: u32, label: impl Into<String>, payload: P) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(index, label.into(), payload));
        id
    }

    pub fn create_synthetic_node(
        &mut self,
        index: u32,
        x: f64,
        y: f64,
        label: impl Into<String>,
        payload: P,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::synthetic(index, x, y, label.into(), payload));
        id
    }

    pub fn create_edge(&mut self, source: NodeId, target: NodeId, weight: f64) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(source, target, weight));
        self.nodes[source.0].outgoing.push(id);
        self.nodes[target.0].incoming.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<P>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (EdgeId(index), edge))
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id.0].degree()
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.nodes[source.0]
            .outgoing
            .iter()
            .any(|&edge| self.edges[edge.0].target == target)
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .outgoing
            .iter()
            .map(|&edge| self.edges[edge.0].target)
    }

    pub fn incident_weights(&self, id: NodeId) -> impl Iterator<Item = f64> + '_ {
        let node = &self.nodes[id.0];
        node.outgoing
            .iter()
            .chain(node.incoming.iter())
            .map(|&edge| self.edges[edge.0].weight)
    }

    pub fn max_edge_weight(&self, id: NodeId) -> Option<f64> {
        self.incident_weights(id).reduce(f64::max)
    }

    pub fn min_edge_weight(&self, id: NodeId) -> Option<f64> {
        self.incident_weights(id).reduce(f64::min)
    }

    pub fn avg_edge_weight(&self, id: NodeId) -> Option<f64> {
        let (sum, count) = self
            .incident_weights(id)
            .fold((0.0, 0usize), |(sum, count), weight| (sum + weight, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    pub fn clear_visited(&mut self) {
        for node in &mut self.nodes {
            node.visited = false;
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::SYNTHETIC_COLOR;

    fn triangle() -> (Graph<()>, [NodeId; 3]) {
        let mut graph = Graph::new();
        let a = graph.create_node(1, "a", ());
        let b = graph.create_node(2, "b", ());
        let c = graph.create_node(3, "c", ());
        graph.create_edge(a, b, 0.9);
        graph.create_edge(b, c, 0.8);
        graph.create_edge(c, a, 0.85);
        (graph, [a, b, c])
    }

    #[test]
    fn test_create_edge_updates_adjacency() {
        let (graph, [a, b, c]) = triangle();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node(a).outgoing.len(), 1);
        assert_eq!(graph.node(a).incoming.len(), 1);
        assert_eq!(graph.degree(b), 2);
        assert!(graph.has_edge(a, b));
        assert!(!graph.has_edge(b, a));
        assert_eq!(graph.successors(c).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_parallel_edges_are_not_deduplicated() {
        let (mut graph, [a, b, _]) = triangle();
        graph.create_edge(a, b, 0.9);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.degree(a), 3);
        assert_eq!(graph.successors(a).filter(|&node| node == b).count(), 2);
    }

    #[test]
    fn test_incident_weight_statistics() {
        let (graph, [a, b, _]) = triangle();
        assert_eq!(graph.max_edge_weight(a), Some(0.9));
        assert_eq!(graph.min_edge_weight(a), Some(0.85));
        let avg = graph.avg_edge_weight(b).unwrap();
        assert!((avg - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_zero_degree_statistics_are_none() {
        let mut graph: Graph<()> = Graph::new();
        let lonely = graph.create_node(7, "lonely", ());
        assert_eq!(graph.degree(lonely), 0);
        assert_eq!(graph.max_edge_weight(lonely), None);
        assert_eq!(graph.avg_edge_weight(lonely), None);
    }

    #[test]
    fn test_synthetic_node_color_and_position() {
        let mut graph: Graph<()> = Graph::new();
        let node = graph.create_synthetic_node(9, 4.0, 5.0, "synthetic", ());
        assert_eq!(graph.node(node).color, SYNTHETIC_COLOR);
        assert_eq!(graph.node(node).position(), (4.0, 5.0));
        let plain = graph.create_node(9, "plain", ());
        assert_eq!(graph.node(plain).position(), (0.0, 0.0));
    }
}
