use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrandparentLinking {
    /// Link a grandparent only if it is already a node when its child is
    /// processed. Later-discovered grandparents are dropped.
    #[default]
    KnownOnly,
    /// Create every parent node of the cluster first, then link.
    TwoPass,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub acceptance_threshold: f64,
    pub first_article_index: u32,
    pub accumulate_parallel_edges: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.8,
            first_article_index: 1,
            accumulate_parallel_edges: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_size: f64,
    pub ring_count: usize,
    pub clusters_per_row: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_size: 100.0,
            ring_count: 5,
            clusters_per_row: 20,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTreeConfig {
    pub grandparent_linking: GrandparentLinking,
    pub first_line_x: f64,
    pub second_line_x: f64,
    pub unplaced_x: f64,
    pub top_y: f64,
    pub column_height: f64,
}

impl Default for CategoryTreeConfig {
    fn default() -> Self {
        Self {
            grandparent_linking: GrandparentLinking::KnownOnly,
            first_line_x: 100.0,
            second_line_x: 960.0,
            unplaced_x: 1700.0,
            top_y: 100.0,
            column_height: 4320.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VtaConfig {
    pub clustering: ClusteringConfig,
    pub layout: LayoutConfig,
    pub category_tree: CategoryTreeConfig,
    pub min_similarity: f64,
    pub max_similarity: f64,
}

impl Default for VtaConfig {
    fn default() -> Self {
        Self {
            clustering: ClusteringConfig::default(),
            layout: LayoutConfig::default(),
            category_tree: CategoryTreeConfig::default(),
            min_similarity: 0.82,
            max_similarity: 1.0,
        }
    }
}

impl VtaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for threshold in [
            self.clustering.acceptance_threshold,
            self.min_similarity,
            self.max_similarity,
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(Error::InvalidThreshold(threshold));
            }
        }
        if self.min_similarity > self.max_similarity {
            return Err(Error::Config(format!(
                "min_similarity {} exceeds max_similarity {}",
                self.min_similarity, self.max_similarity
            )));
        }
        if self.layout.clusters_per_row == 0 {
            return Err(Error::Config("clusters_per_row must be positive".to_owned()));
        }
        if self.layout.ring_count == 0 {
            return Err(Error::Config("ring_count must be positive".to_owned()));
        }
        if self.layout.node_size.is_nan() || self.layout.node_size <= 0.0 {
            return Err(Error::Config("node_size must be positive".to_owned()));
        }
        Ok(())
    }
}
