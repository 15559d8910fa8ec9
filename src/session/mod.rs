mod search;
mod view;

pub use search::{SearchHit, search_titles};
pub use view::Blacklist;

use tracing::{debug, info};

use crate::category_tree::{CategoryLayout, CategoryTree};
use crate::cluster::{
    Cluster, ClusterLayout, ClusteringEngine, GlobalLayout, OverviewExtent, SimilarityWindow,
    clusters_on_screen,
};
use crate::config::VtaConfig;
use crate::error::{Error, Result};
use crate::graph::{ArticleGraph, ClusterId, EdgeId, NodeId};
use crate::wikidb::SimilarityStore;

pub struct Session<S> {
    engine: ClusteringEngine<S>,
    config: VtaConfig,
    window: SimilarityWindow,
    blacklist: Blacklist,
    cluster_layout: ClusterLayout,
    global_layout: GlobalLayout,
    overview: Option<OverviewExtent>,
    selected: Option<ClusterId>,
    category_tree: CategoryTree,
    category_layout: Option<CategoryLayout>,
}

impl<S: SimilarityStore> Session<S> {
    pub fn new(store: S, config: VtaConfig) -> Result<Self> {
        config.validate()?;
        let window = SimilarityWindow::new(config.min_similarity, config.max_similarity)?;
        Ok(Self {
            engine: ClusteringEngine::new(store, config.clustering.clone()),
            config,
            window,
            blacklist: Blacklist::new(),
            cluster_layout: ClusterLayout::default(),
            global_layout: GlobalLayout::default(),
            overview: None,
            selected: None,
            category_tree: CategoryTree::new(),
            category_layout: None,
        })
    }

    pub fn config(&self) -> &VtaConfig {
        &self.config
    }

    pub fn engine(&self) -> &ClusteringEngine<S> {
        &self.engine
    }

    pub fn graph(&self) -> &ArticleGraph {
        self.engine.graph()
    }

    pub fn cluster_count(&self) -> usize {
        self.engine.cluster_count()
    }

    pub fn cluster(&self, index: usize) -> Result<&Cluster> {
        self.engine
            .cluster(index)
            .ok_or_else(|| Error::cluster_not_found(index))
    }

    pub fn clusters(&self) -> &[Cluster] {
        self.engine.clusters()
    }

    pub fn min_similarity(&self) -> f64 {
        self.window.min()
    }

    pub fn max_similarity(&self) -> f64 {
        self.window.max()
    }

    pub fn set_min_similarity(&mut self, min: f64) -> Result<()> {
        self.window.set_min(min)
    }

    pub fn set_max_similarity(&mut self, max: f64) -> Result<()> {
        self.window.set_max(max)
    }

    pub fn add_to_blacklist(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        let added = self.blacklist.add(entry.clone());
        if !added {
            debug!(%entry, "blacklist entry ignored");
        }
        added
    }

    pub fn blacklist_contains(&self, title: &str) -> bool {
        self.blacklist.contains(title)
    }

    pub fn blacklist(&self) -> &[String] {
        self.blacklist.entries()
    }

    pub fn cluster_layout(&self) -> ClusterLayout {
        self.cluster_layout
    }

    pub fn global_layout(&self) -> GlobalLayout {
        self.global_layout
    }

    pub fn overview(&self) -> Option<OverviewExtent> {
        self.overview
    }

    pub fn request_clusters(&mut self, count: usize) -> Vec<ClusterId> {
        let grown = self.engine.next_clusters(count);
        self.relayout();
        info!(
            requested = count,
            grown = grown.len(),
            total = self.engine.cluster_count(),
            exhausted = self.engine.is_exhausted(),
            "clusters requested"
        );
        grown
    }

    pub fn request_all_clusters(&mut self) -> usize {
        let count = self.engine.cluster_all();
        self.relayout();
        count
    }

    pub fn set_cluster_layout(&mut self, layout: ClusterLayout) {
        self.cluster_layout = layout;
        self.relayout();
    }

    pub fn set_global_layout(&mut self, layout: GlobalLayout) {
        self.global_layout = layout;
        self.relayout();
    }

    pub fn refresh_edges(&mut self) -> usize {
        let added = self.engine.add_edges_for_sim(&self.window);
        if added > 0 {
            self.relayout();
        }
        added
    }

    fn relayout(&mut self) {
        let layout = &self.config.layout;
        self.overview =
            self.engine
                .place_clusters(self.global_layout, layout.node_size, layout.clusters_per_row);
        self.engine
            .layout_clusters(self.cluster_layout, layout.node_size, layout.ring_count);
    }

    pub fn clusters_on_screen(&self, width: f64, height: f64, scale: f64) -> usize {
        self.overview
            .map_or(0, |extent| clusters_on_screen(width, height, extent.cell_size, scale))
    }

    pub fn selected_cluster(&self) -> Option<&Cluster> {
        self.engine.cluster_by_id(self.selected?)
    }

    pub fn select_cluster(&mut self, index: usize) -> Result<&CategoryTree> {
        let cluster = self
            .engine
            .cluster(index)
            .ok_or_else(|| Error::cluster_not_found(index))?;

        self.category_tree.build(
            self.engine.store(),
            self.engine.graph(),
            cluster,
            self.config.category_tree.grandparent_linking,
        );
        self.selected = Some(cluster.id());
        self.category_layout = Some(self.category_tree.make_layout(&self.config.category_tree));
        Ok(&self.category_tree)
    }

    pub fn select_cluster_at(&mut self, x: f64, y: f64) -> Option<usize> {
        let index = self.engine.cluster_index_at(x, y)?;
        self.select_cluster(index).ok()?;
        Some(index)
    }

    /// Leaves the detail view. The category tree survives while an article
    /// highlight is active.
    pub fn close_detail_view(&mut self) {
        self.selected = None;
        if !self.category_tree.highlight_mode() {
            self.category_tree.clear();
            self.category_layout = None;
        }
    }

    pub fn category_tree(&self) -> &CategoryTree {
        &self.category_tree
    }

    pub fn category_layout(&self) -> Option<&CategoryLayout> {
        self.category_layout.as_ref()
    }

    pub fn highlight_article(&mut self, article_id: u32) -> Result<usize> {
        let node = self
            .engine
            .node_for_article(article_id)
            .ok_or_else(|| Error::article_not_found(article_id))?;
        let article = &self.engine.graph().node(node).payload;
        Ok(self.category_tree.highlight_article(article))
    }

    pub fn reset_highlight(&mut self) {
        self.category_tree.clear_highlighting();
    }

    pub fn visible_nodes(&self) -> Vec<NodeId> {
        self.graph()
            .nodes()
            .filter(|(_, node)| !self.blacklist.contains(&node.label))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn visible_edges(&self) -> Vec<EdgeId> {
        let graph = self.graph();
        graph
            .edges()
            .filter(|(_, edge)| {
                !self.blacklist.contains(&graph.node(edge.source).label)
                    && !self.blacklist.contains(&graph.node(edge.target).label)
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        search_titles(self.graph(), query, limit)
    }
}
