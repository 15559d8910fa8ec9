use serde::Serialize;
use tracing::debug;

use crate::config::CategoryTreeConfig;
use crate::graph::NodeId;

use super::CategoryTree;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryLayout {
    pub first_line: Vec<NodeId>,
    pub second_line: Vec<NodeId>,
    pub unplaced: Vec<NodeId>,
}

impl CategoryTree {
    pub fn make_layout(&mut self, config: &CategoryTreeConfig) -> CategoryLayout {
        self.graph.clear_visited();

        let mut first_line = self
            .graph
            .nodes()
            .filter(|(_, node)| node.incoming.is_empty())
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        let mut second_line = self.place_vertical_line(&mut first_line, config.first_line_x, config);
        self.place_vertical_line(&mut second_line, config.second_line_x, config);

        let mut unplaced = self
            .graph
            .nodes()
            .filter(|(_, node)| !node.visited)
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        self.place_vertical_line(&mut unplaced, config.unplaced_x, config);

        debug!(
            first = first_line.len(),
            second = second_line.len(),
            unplaced = unplaced.len(),
            "category tree laid out"
        );

        CategoryLayout {
            first_line,
            second_line,
            unplaced,
        }
    }

    fn place_vertical_line(
        &mut self,
        line: &mut Vec<NodeId>,
        x: f64,
        config: &CategoryTreeConfig,
    ) -> Vec<NodeId> {
        if line.is_empty() {
            return Vec::new();
        }

        line.sort_by_key(|&node| std::cmp::Reverse(self.graph.degree(node)));
        let step = config.column_height / line.len() as f64;
        let mut y = config.top_y;

        for &node in line.iter() {
            let placed = self.graph.node_mut(node);
            placed.set_position(x, y);
            placed.visited = true;
            y += step;
        }

        let mut children = Vec::new();
        for &node in line.iter() {
            for child in self.graph.successors(node) {
                if !self.graph.node(child).visited && !children.contains(&child) {
                    children.push(child);
                }
            }
        }
        children
    }
}
