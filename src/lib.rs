pub mod category_tree;
pub mod cluster;
pub mod config;
pub mod error;
pub mod graph;
pub mod session;
pub mod snapshot;
pub mod util;
pub mod wikidb;

pub use category_tree::CategoryTree;
pub use cluster::{Cluster, ClusterLayout, ClusteringEngine, GlobalLayout};
pub use config::VtaConfig;
pub use error::{Error, Result};
pub use session::Session;
