use serde::{Deserialize, Serialize};

use super::sim_pair::SimPair;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub index: u32,
    pub title: String,
    #[serde(default)]
    pub parents: Vec<u32>,
    /// Similar articles, expected sorted by descending similarity.
    #[serde(default)]
    pub comparisons: Vec<SimPair>,
}

impl Article {
    pub fn new(index: u32, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            parents: Vec::new(),
            comparisons: Vec::new(),
        }
    }

    pub fn with_parents(mut self, parents: impl IntoIterator<Item = u32>) -> Self {
        self.parents = parents.into_iter().collect();
        self
    }

    pub fn with_comparisons(mut self, comparisons: impl IntoIterator<Item = SimPair>) -> Self {
        self.comparisons = comparisons.into_iter().collect();
        self
    }

    pub fn comparisons(&self) -> &[SimPair] {
        &self.comparisons
    }

    pub fn parents(&self) -> &[u32] {
        &self.parents
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub index: u32,
    pub title: String,
    #[serde(default)]
    pub parents: Vec<u32>,
}

impl Category {
    pub fn new(index: u32, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            parents: Vec::new(),
        }
    }

    pub fn with_parents(mut self, parents: impl IntoIterator<Item = u32>) -> Self {
        self.parents = parents.into_iter().collect();
        self
    }

    pub fn parents(&self) -> &[u32] {
        &self.parents
    }
}
