use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};

use super::Cluster;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterLayout {
    #[default]
    Radial,
    Ring,
}

impl ClusterLayout {
    pub fn label(self) -> &'static str {
        match self {
            Self::Radial => "radial",
            Self::Ring => "ring",
        }
    }
}

pub fn place_on_circle<P>(
    graph: &mut Graph<P>,
    nodes: &[NodeId],
    center_x: f64,
    center_y: f64,
    radius: f64,
) {
    if nodes.is_empty() {
        return;
    }

    let step = TAU / nodes.len() as f64;
    for (index, &node) in nodes.iter().enumerate() {
        let angle = step * index as f64;
        graph
            .node_mut(node)
            .set_position(center_x + angle.cos() * radius, center_y + angle.sin() * radius);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RingAssignment {
    pub inner: Vec<NodeId>,
    pub outer: Vec<Vec<NodeId>>,
}

impl RingAssignment {
    pub fn all_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner
            .iter()
            .chain(self.outer.iter().flatten())
            .copied()
    }

    pub fn ring_count(&self) -> usize {
        1 + self.outer.len()
    }
}

impl Cluster {
    pub fn apply_layout<P>(
        &self,
        layout: ClusterLayout,
        graph: &mut Graph<P>,
        node_size: f64,
        ring_count: usize,
    ) {
        match layout {
            ClusterLayout::Radial => self.make_radial_layout(graph, node_size),
            ClusterLayout::Ring => {
                self.make_ring_layout(graph, node_size, ring_count);
            }
        }
    }

    pub fn make_radial_layout<P>(&self, graph: &mut Graph<P>, node_size: f64) {
        let radius = self.effective_radius(node_size);
        let (center_x, center_y) = self.position();
        place_on_circle(graph, self.nodes(), center_x, center_y, radius);
    }

    /// Nodes fill an inner ring, in cluster order, until it holds half of the
    /// cluster's total degree. The rest are banded by average incident edge
    /// weight into `ring_count` outer rings, weakest band innermost.
    pub fn make_ring_layout<P>(
        &self,
        graph: &mut Graph<P>,
        node_size: f64,
        ring_count: usize,
    ) -> RingAssignment {
        let assignment = self.assign_rings(graph, ring_count);
        if self.nodes().is_empty() {
            return assignment;
        }

        let radius = self.effective_radius(node_size);
        let radius_step = radius / assignment.ring_count() as f64;
        let (center_x, center_y) = self.position();

        place_on_circle(graph, &assignment.inner, center_x, center_y, radius_step);
        for (band, ring) in assignment.outer.iter().enumerate() {
            let ring_radius = radius_step * (band + 2) as f64;
            place_on_circle(graph, ring, center_x, center_y, ring_radius);
        }

        assignment
    }

    pub fn assign_rings<P>(&self, graph: &Graph<P>, ring_count: usize) -> RingAssignment {
        let ring_count = ring_count.max(1);
        let mut assignment = RingAssignment {
            inner: Vec::new(),
            outer: vec![Vec::new(); ring_count],
        };

        let half_weight = self.node_weight_sum(graph) as f64 * 0.5;
        let weight_range = self.edge_weight_range(graph);
        let mut inner_weight = 0usize;

        for &node in self.nodes() {
            let degree = graph.degree(node);
            if assignment.inner.is_empty() || (inner_weight as f64) < half_weight {
                assignment.inner.push(node);
                inner_weight += degree;
                continue;
            }

            let band = match (graph.avg_edge_weight(node), weight_range) {
                (Some(avg), Some((min, max))) if max > min => {
                    let t = ((avg - min) / (max - min)).clamp(0.0, 1.0);
                    ((t * ring_count as f64).floor() as usize).min(ring_count - 1)
                }
                _ => 0,
            };
            assignment.outer[band].push(node);
        }

        assignment
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::graph::ClusterId;

    const EPSILON: f64 = 1e-9;

    fn star(leaves: usize) -> (Graph<()>, Cluster) {
        let mut graph = Graph::new();
        let mut cluster = Cluster::new(ClusterId(0));
        let hub = graph.create_node(0, "hub", ());
        cluster.add_node(hub);
        for index in 0..leaves {
            let leaf = graph.create_node(index as u32 + 1, format!("leaf-{index}"), ());
            cluster.add_node(leaf);
            let weight = 0.8 + 0.2 * index as f64 / leaves.max(1) as f64;
            cluster.add_edge(graph.create_edge(hub, leaf, weight));
        }
        (graph, cluster)
    }

    fn distance(graph: &Graph<()>, node: NodeId, center: (f64, f64)) -> f64 {
        let (x, y) = graph.node(node).position();
        ((x - center.0).powi(2) + (y - center.1).powi(2)).sqrt()
    }

    #[test]
    fn test_radial_layout_keeps_every_node_on_the_circle() {
        for size in [1, 2, 7, 30] {
            let (mut graph, mut cluster) = star(size - 1);
            cluster.set_radius(250.0);
            cluster.set_position(1000.0, -40.0);
            cluster.make_radial_layout(&mut graph, 100.0);

            for &node in cluster.nodes() {
                let d = distance(&graph, node, (1000.0, -40.0));
                assert!((d - 250.0).abs() < EPSILON, "size={size} d={d}");
            }
        }
    }

    #[test]
    fn test_radial_layout_uses_heuristic_radius_when_unassigned() {
        let (mut graph, cluster) = star(3);
        cluster.make_radial_layout(&mut graph, 100.0);
        let first = cluster.nodes()[0];
        assert!((distance(&graph, first, (0.0, 0.0)) - 600.0).abs() < EPSILON);
        assert!((graph.node(first).x - 600.0).abs() < EPSILON);
    }

    #[test]
    fn test_empty_cluster_layouts_are_no_ops() {
        let mut graph: Graph<()> = Graph::new();
        let cluster = Cluster::new(ClusterId(1));
        cluster.make_radial_layout(&mut graph, 100.0);
        let assignment = cluster.make_ring_layout(&mut graph, 100.0, 5);
        assert_eq!(assignment.all_nodes().count(), 0);
    }

    #[test]
    fn test_ring_layout_partitions_all_nodes_once() {
        let (mut graph, mut cluster) = star(12);
        cluster.set_radius(600.0);
        let assignment = cluster.make_ring_layout(&mut graph, 100.0, 5);

        let assigned = assignment.all_nodes().collect::<Vec<_>>();
        let unique = assigned.iter().copied().collect::<HashSet<_>>();
        assert_eq!(assigned.len(), cluster.node_count());
        assert_eq!(unique, cluster.nodes().iter().copied().collect::<HashSet<_>>());
        assert_eq!(assignment.outer.len(), 5);
    }

    #[test]
    fn test_ring_layout_hub_inserted_first_fills_inner_ring() {
        let (mut graph, mut cluster) = star(12);
        cluster.set_radius(600.0);
        let assignment = cluster.make_ring_layout(&mut graph, 100.0, 5);

        // The hub alone holds half of the total degree.
        assert_eq!(assignment.inner, vec![cluster.nodes()[0]]);
        let hub_distance = distance(&graph, cluster.nodes()[0], (0.0, 0.0));
        assert!((hub_distance - 100.0).abs() < EPSILON);

        for (band, ring) in assignment.outer.iter().enumerate() {
            for &node in ring {
                let expected = 100.0 * (band + 2) as f64;
                assert!((distance(&graph, node, (0.0, 0.0)) - expected).abs() < EPSILON);
            }
        }
        // Strongest leaf lands in the outermost band.
        let strongest = *cluster.nodes().last().unwrap();
        assert!(assignment.outer[4].contains(&strongest));
    }

    #[test]
    fn test_ring_layout_fills_inner_ring_in_cluster_order() {
        let mut graph: Graph<()> = Graph::new();
        let mut cluster = Cluster::new(ClusterId(3));
        let leaves = (0..4)
            .map(|index| graph.create_node(index + 1, format!("leaf-{index}"), ()))
            .collect::<Vec<_>>();
        let hub = graph.create_node(0, "hub", ());
        for &leaf in &leaves {
            cluster.add_node(leaf);
        }
        cluster.add_node(hub);
        for &leaf in &leaves {
            cluster.add_edge(graph.create_edge(hub, leaf, 0.9));
        }

        // Leaves come first and reach half of the total degree of 8 before
        // the hub is considered.
        let assignment = cluster.assign_rings(&graph, 5);
        assert_eq!(assignment.inner, leaves);
        assert_eq!(assignment.outer[0], vec![hub]);
    }

    #[test]
    fn test_ring_layout_without_edges() {
        let mut graph: Graph<()> = Graph::new();
        let mut cluster = Cluster::new(ClusterId(2));
        for index in 0..3 {
            cluster.add_node(graph.create_node(index, "isolated", ()));
        }
        let assignment = cluster.assign_rings(&graph, 5);
        assert_eq!(assignment.inner.len(), 1);
        assert_eq!(assignment.outer[0].len(), 2);
    }
}
