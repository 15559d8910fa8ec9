use tracing::{debug, warn};

use crate::cluster::Cluster;
use crate::config::GrandparentLinking;
use crate::graph::ArticleGraph;
use crate::wikidb::{Category, SimilarityStore};

use super::CategoryTree;

impl CategoryTree {
    pub fn build<S: SimilarityStore>(
        &mut self,
        store: &S,
        articles: &ArticleGraph,
        cluster: &Cluster,
        linking: GrandparentLinking,
    ) {
        self.clear();
        self.source_cluster = Some(cluster.id());

        match linking {
            GrandparentLinking::KnownOnly => self.build_known_only(store, articles, cluster),
            GrandparentLinking::TwoPass => self.build_two_pass(store, articles, cluster),
        }

        debug!(
            cluster = cluster.id().0,
            articles = cluster.node_count(),
            categories = self.node_count(),
            edges = self.edge_count(),
            ?linking,
            "built category tree"
        );
    }

    /// A grandparent is linked only if it already is a node when its child
    /// is processed, so results depend on article order.
    fn build_known_only<S: SimilarityStore>(
        &mut self,
        store: &S,
        articles: &ArticleGraph,
        cluster: &Cluster,
    ) {
        for &article_node in cluster.nodes() {
            let article = &articles.node(article_node).payload;
            for &parent_id in article.parents() {
                let Some(parent) = fetch_category(store, parent_id) else {
                    continue;
                };
                let grandparents = parent.parents.clone();
                let parent_node = self.ensure_node(parent);

                for grandparent_id in grandparents {
                    if let Some(grandparent_node) = self.node_for_category(grandparent_id) {
                        self.link(grandparent_node, parent_node);
                    }
                }
            }
        }
    }

    fn build_two_pass<S: SimilarityStore>(
        &mut self,
        store: &S,
        articles: &ArticleGraph,
        cluster: &Cluster,
    ) {
        for &article_node in cluster.nodes() {
            let article = &articles.node(article_node).payload;
            for &parent_id in article.parents() {
                if self.node_for_category(parent_id).is_some() {
                    continue;
                }
                if let Some(parent) = fetch_category(store, parent_id) {
                    self.ensure_node(parent);
                }
            }
        }

        let parents = self
            .graph
            .nodes()
            .map(|(node, category)| (node, category.payload.parents.clone()))
            .collect::<Vec<_>>();
        for (parent_node, grandparents) in parents {
            for grandparent_id in grandparents {
                if let Some(grandparent_node) = self.node_for_category(grandparent_id) {
                    self.link(grandparent_node, parent_node);
                }
            }
        }
    }
}

fn fetch_category<S: SimilarityStore>(store: &S, id: u32) -> Option<Category> {
    match store.category(id) {
        Ok(category) => Some(category),
        Err(err) => {
            warn!(category = id, %err, "skipping parent category");
            None
        }
    }
}
