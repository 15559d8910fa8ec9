use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::util::cluster_radius;

use super::Cluster;

const CELL_PITCH: f64 = 2.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalLayout {
    #[default]
    Grid,
    Radial,
}

impl GlobalLayout {
    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Radial => "radial",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OverviewExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub radius: f64,
    pub cell_size: f64,
}

impl OverviewExtent {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Sorts `clusters` by descending size and gives each a cell. Every cluster
/// gets the radius of the largest one; bigger content is not clipped.
pub fn place_clusters(
    clusters: &mut [Cluster],
    layout: GlobalLayout,
    node_size: f64,
    clusters_per_row: usize,
) -> Option<OverviewExtent> {
    clusters.sort_by(|a, b| b.node_count().cmp(&a.node_count()));
    let largest = clusters.first()?.node_count();

    let radius = cluster_radius(largest, node_size);
    let cell_size = radius * CELL_PITCH;

    match layout {
        GlobalLayout::Grid => place_grid(clusters, radius, cell_size, clusters_per_row.max(1)),
        GlobalLayout::Radial => place_rings(clusters, radius, cell_size),
    }

    let mut extent = OverviewExtent {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
        radius,
        cell_size,
    };
    for cluster in clusters.iter() {
        let (x, y) = cluster.position();
        extent.min_x = extent.min_x.min(x - radius);
        extent.min_y = extent.min_y.min(y - radius);
        extent.max_x = extent.max_x.max(x + radius);
        extent.max_y = extent.max_y.max(y + radius);
    }

    Some(extent)
}

fn place_grid(clusters: &mut [Cluster], radius: f64, cell_size: f64, per_row: usize) {
    // The first cell spans [0, 2r] on both axes.
    let mut position_x = radius;
    let mut position_y = radius;

    for (index, cluster) in clusters.iter_mut().enumerate() {
        cluster.set_radius(radius);
        cluster.set_position(position_x, position_y);

        position_x += cell_size;
        if index % per_row == per_row - 1 {
            position_x = radius;
            position_y += cell_size;
        }
    }
}

fn place_rings(clusters: &mut [Cluster], radius: f64, cell_size: f64) {
    let mut remaining = clusters.iter_mut();

    if let Some(center) = remaining.next() {
        center.set_radius(radius);
        center.set_position(0.0, 0.0);
    }

    let mut ring = 1usize;
    loop {
        // Cells on ring k are at least one pitch apart along the arc.
        let ring_radius = cell_size * ring as f64;
        let slots = (TAU * ring as f64).floor() as usize;
        let step = TAU / slots as f64;

        for slot in 0..slots {
            let Some(cluster) = remaining.next() else {
                return;
            };
            let angle = step * slot as f64;
            cluster.set_radius(radius);
            cluster.set_position(angle.cos() * ring_radius, angle.sin() * ring_radius);
        }
        ring += 1;
    }
}

pub fn clusters_on_screen(width: f64, height: f64, cell_size: f64, scale: f64) -> usize {
    let scaled = cell_size * scale;
    if scaled <= 0.0 || width <= 0.0 || height <= 0.0 {
        return 0;
    }
    let per_row = (width / scaled).ceil() as usize;
    let per_column = (height / scaled).ceil() as usize;
    per_row * per_column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ClusterId, NodeId};

    fn clusters(sizes: &[usize]) -> Vec<Cluster> {
        let mut next_node = 0;
        sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| {
                let mut cluster = Cluster::new(ClusterId(index as u32));
                for _ in 0..size {
                    cluster.add_node(NodeId(next_node));
                    next_node += 1;
                }
                cluster
            })
            .collect()
    }

    #[test]
    fn test_grid_sorts_and_uses_largest_radius() {
        let mut placed = clusters(&[1, 4, 2]);
        let extent = place_clusters(&mut placed, GlobalLayout::Grid, 100.0, 20).unwrap();

        let sizes = placed.iter().map(Cluster::node_count).collect::<Vec<_>>();
        assert_eq!(sizes, vec![4, 2, 1]);
        assert_eq!(extent.radius, 600.0);
        assert_eq!(extent.cell_size, 1500.0);
        assert!(placed.iter().all(|cluster| cluster.radius() == 600.0));

        assert_eq!(placed[0].position(), (600.0, 600.0));
        assert_eq!(placed[1].position(), (2100.0, 600.0));
        assert_eq!(placed[2].position(), (3600.0, 600.0));
        assert_eq!(extent.max_x, 4200.0);
        assert_eq!(extent.max_y, 1200.0);
        assert_eq!((extent.min_x, extent.min_y), (0.0, 0.0));
    }

    #[test]
    fn test_grid_wraps_rows_without_overlap() {
        let mut placed = clusters(&[3, 3, 2, 2, 1, 1, 1]);
        let extent = place_clusters(&mut placed, GlobalLayout::Grid, 100.0, 3).unwrap();
        let radius = extent.radius;

        for row in placed.chunks(3) {
            for pair in row.windows(2) {
                let gap = pair[1].position().0 - pair[0].position().0;
                assert!(gap >= 2.0 * radius, "gap {gap} < {}", 2.0 * radius);
                assert_eq!(pair[0].position().1, pair[1].position().1);
            }
        }
        assert_eq!(placed[3].position(), (radius, radius + extent.cell_size));
        assert!((placed[6].position().1 - (radius + 2.0 * extent.cell_size)).abs() < 1e-6);
        assert!(placed[4].within(placed[4].position().0, placed[4].position().1));
    }

    #[test]
    fn test_radial_cells_do_not_overlap() {
        let mut placed = clusters(&[5; 40]);
        let extent = place_clusters(&mut placed, GlobalLayout::Radial, 100.0, 20).unwrap();
        assert_eq!(placed[0].position(), (0.0, 0.0));

        for (i, a) in placed.iter().enumerate() {
            for b in placed.iter().skip(i + 1) {
                let (ax, ay) = a.position();
                let (bx, by) = b.position();
                let distance = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
                assert!(distance >= 2.0 * extent.radius - 1e-6);
            }
        }
        assert!(extent.min_x < 0.0 && extent.max_x > 0.0);
    }

    #[test]
    fn test_no_clusters_no_extent() {
        let mut placed = Vec::new();
        assert!(place_clusters(&mut placed, GlobalLayout::Grid, 100.0, 20).is_none());
    }

    #[test]
    fn test_clusters_on_screen() {
        assert_eq!(clusters_on_screen(1920.0, 1080.0, 500.0, 1.0), 4 * 3);
        assert_eq!(clusters_on_screen(1920.0, 1080.0, 500.0, 0.5), 8 * 5);
        assert_eq!(clusters_on_screen(1920.0, 1080.0, 0.0, 1.0), 0);
    }
}
