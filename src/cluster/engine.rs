use std::collections::HashMap;

use tracing::{debug, info, trace, warn};

use crate::config::ClusteringConfig;
use crate::error::Result;
use crate::graph::{ArticleGraph, ClusterId, EdgeId, NodeId};
use crate::util::similarity_color;
use crate::wikidb::{Article, SimPair, SimilarityStore};

use super::{
    Cluster, ClusterLayout, GlobalLayout, OverviewExtent, SimilarityWindow, place_clusters,
};

struct Frame {
    node: NodeId,
    comparisons: Vec<SimPair>,
    cursor: usize,
}

impl Frame {
    fn new(node: NodeId, comparisons: Vec<SimPair>) -> Self {
        Self {
            node,
            comparisons,
            cursor: 0,
        }
    }
}

/// Grows clusters of similar articles out of a [`SimilarityStore`].
///
/// The engine owns the article graph and the id→node map used to avoid
/// creating an article twice. Each article belongs to at most one cluster;
/// when a traversal reaches an article of an earlier cluster, that cluster
/// is merged into the one being grown.
pub struct ClusteringEngine<S> {
    store: S,
    config: ClusteringConfig,
    graph: ArticleGraph,
    index_to_node: HashMap<u32, NodeId>,
    clusters: Vec<Cluster>,
    next_cluster_id: u32,
    article_index: u64,
}

impl<S: SimilarityStore> ClusteringEngine<S> {
    pub fn new(store: S, config: ClusteringConfig) -> Self {
        let article_index = u64::from(config.first_article_index);
        Self {
            store,
            config,
            graph: ArticleGraph::new(),
            index_to_node: HashMap::new(),
            clusters: Vec::new(),
            next_cluster_id: 0,
            article_index,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    pub fn graph(&self) -> &ArticleGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ArticleGraph {
        &mut self.graph
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn cluster(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn cluster_by_id(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id() == id)
    }

    pub fn cluster_index_of(&self, id: ClusterId) -> Option<usize> {
        self.clusters.iter().position(|cluster| cluster.id() == id)
    }

    pub fn node_for_article(&self, article_id: u32) -> Option<NodeId> {
        self.index_to_node.get(&article_id).copied()
    }

    pub fn cluster_of_article(&self, article_id: u32) -> Option<&Cluster> {
        let node = self.node_for_article(article_id)?;
        let id = self.graph.node(node).cluster?;
        self.cluster_by_id(id)
    }

    pub fn article_index(&self) -> u64 {
        self.article_index
    }

    pub fn is_exhausted(&self) -> bool {
        self.article_index > u64::from(self.store.size_articles())
    }

    /// Builds the cluster reachable from `seed` through comparisons at or
    /// above the acceptance threshold.
    ///
    /// Returns `Ok(None)` if `seed` already belongs to a cluster. Comparison
    /// lists are sorted by descending similarity, so the first pair below the
    /// threshold ends the scan of that article.
    pub fn grow_cluster(&mut self, seed: u32) -> Result<Option<ClusterId>> {
        if self.index_to_node.contains_key(&seed) {
            return Ok(None);
        }

        let article = self.store.article(seed)?;
        let id = ClusterId(self.next_cluster_id);
        self.next_cluster_id += 1;

        let mut current = Cluster::new(id);
        let seed_node = self.create_article_node(seed, article, id);
        current.add_node(seed_node);
        self.graph.node_mut(seed_node).visited = true;

        self.visit(seed_node, &mut current);

        debug!(
            cluster = current.id().0,
            seed,
            nodes = current.node_count(),
            edges = current.edge_count(),
            "found cluster"
        );
        let id = current.id();
        self.clusters.push(current);
        Ok(Some(id))
    }

    fn visit(&mut self, start: NodeId, current: &mut Cluster) {
        let threshold = self.config.acceptance_threshold;
        let comparisons = self.graph.node(start).payload.comparisons.clone();
        let mut stack = vec![Frame::new(start, comparisons)];

        while let Some(frame) = stack.last_mut() {
            let Some(pair) = frame.comparisons.get(frame.cursor).copied() else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            let source = frame.node;

            let similarity = pair.similarity();
            if similarity < threshold {
                stack.pop();
                continue;
            }

            let neighbor_id = pair.id();
            if self.graph.node(source).index == neighbor_id {
                trace!(article = neighbor_id, "skipping self comparison");
                continue;
            }

            let neighbor = match self.index_to_node.get(&neighbor_id).copied() {
                Some(existing) => {
                    if let Some(owner) = self.graph.node(existing).cluster
                        && owner != current.id()
                    {
                        self.merge_into(current, owner);
                    }
                    existing
                }
                None => match self.store.article(neighbor_id) {
                    Ok(article) => {
                        let node = self.create_article_node(neighbor_id, article, current.id());
                        current.add_node(node);
                        node
                    }
                    Err(err) => {
                        warn!(article = neighbor_id, %err, "skipping comparison");
                        continue;
                    }
                },
            };

            let edge = self.link(source, neighbor, similarity);
            current.add_edge(edge);

            let node = self.graph.node_mut(neighbor);
            if !node.visited {
                node.visited = true;
                let comparisons = node.payload.comparisons.clone();
                stack.push(Frame::new(neighbor, comparisons));
            }
        }
    }

    fn merge_into(&mut self, current: &mut Cluster, owner: ClusterId) {
        let Some(position) = self.cluster_index_of(owner) else {
            warn!(cluster = owner.0, "merge target is not a known cluster");
            return;
        };

        let absorbed = self.clusters.remove(position);
        debug!(
            into = current.id().0,
            from = absorbed.id().0,
            nodes = absorbed.node_count(),
            "merging clusters"
        );
        current.absorb(absorbed);

        let id = current.id();
        for &node in current.nodes() {
            self.graph.node_mut(node).cluster = Some(id);
        }
    }

    fn create_article_node(&mut self, index: u32, article: Article, cluster: ClusterId) -> NodeId {
        let label = article.title.clone();
        let node = self.graph.create_node(index, label, article);
        self.graph.node_mut(node).cluster = Some(cluster);
        self.index_to_node.insert(index, node);
        node
    }

    fn link(&mut self, source: NodeId, target: NodeId, similarity: f64) -> EdgeId {
        let edge = self.graph.create_edge(source, target, similarity);
        self.graph.edge_mut(edge).color = similarity_color(similarity);
        edge
    }

    pub fn next_cluster(&mut self) -> Option<ClusterId> {
        while !self.is_exhausted() {
            let Ok(seed) = u32::try_from(self.article_index) else {
                break;
            };
            self.article_index += 1;

            if self.index_to_node.contains_key(&seed) {
                continue;
            }

            match self.grow_cluster(seed) {
                Ok(Some(id)) => return Some(id),
                Ok(None) => {}
                Err(err) => warn!(seed, %err, "skipping seed article"),
            }
        }

        None
    }

    /// Grows up to `count` clusters. Merges may leave fewer clusters in the
    /// list than ids returned.
    pub fn next_clusters(&mut self, count: usize) -> Vec<ClusterId> {
        let mut grown = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(id) = self.next_cluster() else {
                info!(clusters = self.clusters.len(), "all articles clustered");
                break;
            };
            grown.push(id);
        }
        grown
    }

    pub fn cluster_all(&mut self) -> usize {
        while self.next_cluster().is_some() {}
        info!(
            clusters = self.clusters.len(),
            articles = self.index_to_node.len(),
            edges = self.graph.edge_count(),
            "clustering pass complete"
        );
        self.clusters.len()
    }

    /// Adds an edge for every comparison inside `window` whose articles
    /// share a cluster. Existing `(source, target)` edges are kept as the
    /// only one unless parallel edges are configured. Returns the number of
    /// edges added.
    pub fn add_edges_for_sim(&mut self, window: &SimilarityWindow) -> usize {
        let mut added = 0usize;

        for cluster_index in 0..self.clusters.len() {
            let cluster_id = self.clusters[cluster_index].id();
            let members = self.clusters[cluster_index].nodes().to_vec();

            for source in members {
                let comparisons = self.graph.node(source).payload.comparisons.clone();
                for pair in comparisons {
                    let similarity = pair.similarity();
                    if !window.contains(similarity) {
                        continue;
                    }

                    let Some(target) = self.node_for_article(pair.id()) else {
                        continue;
                    };
                    if target == source || self.graph.node(target).cluster != Some(cluster_id) {
                        continue;
                    }
                    if !self.config.accumulate_parallel_edges && self.graph.has_edge(source, target)
                    {
                        continue;
                    }

                    let edge = self.link(source, target, similarity);
                    self.clusters[cluster_index].add_edge(edge);
                    added += 1;
                }
            }
        }

        info!(
            min = window.min(),
            max = window.max(),
            added,
            "added similarity edges"
        );
        added
    }

    pub fn layout_clusters(&mut self, layout: ClusterLayout, node_size: f64, ring_count: usize) {
        for cluster in &self.clusters {
            cluster.apply_layout(layout, &mut self.graph, node_size, ring_count);
        }
    }

    pub fn place_clusters(
        &mut self,
        layout: GlobalLayout,
        node_size: f64,
        clusters_per_row: usize,
    ) -> Option<OverviewExtent> {
        place_clusters(&mut self.clusters, layout, node_size, clusters_per_row)
    }

    pub fn cluster_index_at(&self, x: f64, y: f64) -> Option<usize> {
        self.clusters.iter().position(|cluster| cluster.within(x, y))
    }
}
