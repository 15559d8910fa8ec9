use crate::graph::NodeId;
use crate::wikidb::Article;

use super::CategoryTree;

impl CategoryTree {
    pub fn highlight_article(&mut self, article: &Article) -> usize {
        self.highlight_mode = true;
        self.highlighted_nodes.clear();
        self.highlighted_edges.clear();

        let mut found = 0;
        for &parent_id in article.parents() {
            let Some(node) = self.node_for_category(parent_id) else {
                continue;
            };
            found += 1;
            if !self.highlighted_nodes.contains(&node) {
                self.highlighted_nodes.push(node);
            }

            for &edge in &self.graph.node(node).outgoing {
                if !self.highlighted_edges.contains(&edge) {
                    self.highlighted_edges.push(edge);
                }
                let target = self.graph.edge(edge).target;
                if !self.highlighted_nodes.contains(&target) {
                    self.highlighted_nodes.push(target);
                }
            }
        }
        found
    }

    pub fn clear_highlighting(&mut self) {
        self.highlight_mode = false;
        self.highlighted_nodes.clear();
        self.highlighted_edges.clear();
    }

    pub fn is_highlighted(&self, node: NodeId) -> bool {
        self.highlighted_nodes.contains(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikidb::Category;

    #[test]
    fn test_highlight_parents_and_children() {
        let mut tree = CategoryTree::new();
        let root = tree.ensure_node(Category::new(1, "Root"));
        let child = tree.ensure_node(Category::new(2, "Child"));
        let other = tree.ensure_node(Category::new(3, "Other"));
        tree.link(root, child);

        let article = Article::new(7, "Topic").with_parents([1, 99]);
        assert_eq!(tree.highlight_article(&article), 1);
        assert!(tree.highlight_mode());
        assert!(tree.is_highlighted(root));
        assert!(tree.is_highlighted(child));
        assert!(!tree.is_highlighted(other));
        assert_eq!(tree.highlighted_edges().len(), 1);

        tree.clear_highlighting();
        assert!(!tree.highlight_mode());
        assert!(tree.highlighted_nodes().is_empty());
    }

    #[test]
    fn test_rebuild_drops_highlighting() {
        let mut tree = CategoryTree::new();
        tree.ensure_node(Category::new(1, "Root"));
        tree.highlight_article(&Article::new(7, "Topic").with_parents([1]));
        tree.clear();
        assert!(!tree.highlight_mode());
        assert!(tree.is_empty());
    }
}
