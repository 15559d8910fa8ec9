use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Article,
    Category,
    Cluster,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Category => "category",
            Self::Cluster => "cluster",
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{} {id} not found", kind.label())]
    NotFound { kind: RecordKind, id: u64 },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Similarity threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn article_not_found(id: u32) -> Self {
        Self::NotFound {
            kind: RecordKind::Article,
            id: u64::from(id),
        }
    }

    pub fn category_not_found(id: u32) -> Self {
        Self::NotFound {
            kind: RecordKind::Category,
            id: u64::from(id),
        }
    }

    pub fn cluster_not_found(index: usize) -> Self {
        Self::NotFound {
            kind: RecordKind::Cluster,
            id: index as u64,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
