use serde::Serialize;

use crate::category_tree::CategoryTree;
use crate::cluster::OverviewExtent;
use crate::graph::{ClusterId, Edge, Graph};
use crate::session::{SearchHit, Session};
use crate::util::Color;
use crate::wikidb::SimilarityStore;

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub overview: OverviewSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_tree: Option<CategoryTreeSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct OverviewSnapshot {
    pub cluster_layout: &'static str,
    pub global_layout: &'static str,
    pub min_similarity: f64,
    pub max_similarity: f64,
    pub blacklist: Vec<String>,
    pub extent: Option<OverviewExtent>,
    pub clusters: Vec<ClusterSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct ClusterSnapshot {
    pub index: usize,
    pub id: ClusterId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct NodeSnapshot {
    pub index: u32,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub highlighted: bool,
}

#[derive(Debug, Serialize)]
pub struct EdgeSnapshot {
    pub source: u32,
    pub target: u32,
    pub weight: f64,
    pub color: Color,
}

impl EdgeSnapshot {
    fn new<P>(graph: &Graph<P>, edge: &Edge) -> Self {
        Self {
            source: graph.node(edge.source).index,
            target: graph.node(edge.target).index,
            weight: edge.weight,
            color: edge.color,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryTreeSnapshot {
    pub cluster: Option<ClusterId>,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl OverviewSnapshot {
    pub fn capture<S: SimilarityStore>(session: &Session<S>) -> Self {
        let graph = session.graph();
        let clusters = session
            .clusters()
            .iter()
            .enumerate()
            .map(|(index, cluster)| {
                let (x, y) = cluster.position();
                let nodes = cluster
                    .nodes()
                    .iter()
                    .map(|&node| graph.node(node))
                    .filter(|node| !session.blacklist_contains(&node.label))
                    .map(|node| NodeSnapshot {
                        index: node.index,
                        title: node.label.clone(),
                        x: node.x,
                        y: node.y,
                        color: node.color,
                        highlighted: false,
                    })
                    .collect();
                let edges = cluster
                    .edges()
                    .iter()
                    .map(|&edge| graph.edge(edge))
                    .filter(|edge| {
                        !session.blacklist_contains(&graph.node(edge.source).label)
                            && !session.blacklist_contains(&graph.node(edge.target).label)
                    })
                    .map(|edge| EdgeSnapshot::new(graph, edge))
                    .collect();

                ClusterSnapshot {
                    index,
                    id: cluster.id(),
                    x,
                    y,
                    radius: cluster.radius(),
                    nodes,
                    edges,
                }
            })
            .collect();

        Self {
            cluster_layout: session.cluster_layout().label(),
            global_layout: session.global_layout().label(),
            min_similarity: session.min_similarity(),
            max_similarity: session.max_similarity(),
            blacklist: session.blacklist().to_vec(),
            extent: session.overview(),
            clusters,
        }
    }
}

impl CategoryTreeSnapshot {
    pub fn capture(tree: &CategoryTree) -> Self {
        let graph = tree.graph();
        let nodes = graph
            .nodes()
            .map(|(id, node)| NodeSnapshot {
                index: node.index,
                title: node.label.clone(),
                x: node.x,
                y: node.y,
                color: node.color,
                highlighted: tree.is_highlighted(id),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(_, edge)| EdgeSnapshot::new(graph, edge))
            .collect();

        Self {
            cluster: tree.source_cluster(),
            nodes,
            edges,
        }
    }
}
