use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vta::snapshot::{CategoryTreeSnapshot, OverviewSnapshot, Snapshot};
use vta::{ClusterLayout, GlobalLayout, Session, VtaConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Radial,
    Ring,
}

impl From<LayoutArg> for ClusterLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Radial => Self::Radial,
            LayoutArg::Ring => Self::Ring,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GlobalArg {
    Grid,
    Radial,
}

impl From<GlobalArg> for GlobalLayout {
    fn from(value: GlobalArg) -> Self {
        match value {
            GlobalArg::Grid => Self::Grid,
            GlobalArg::Radial => Self::Radial,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON corpus of articles and categories.
    #[arg(long)]
    corpus: PathBuf,

    /// JSON config; defaults apply for missing keys.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of clusters to grow; all of them when omitted.
    #[arg(long)]
    clusters: Option<usize>,

    #[arg(long, value_enum, default_value = "radial")]
    layout: LayoutArg,

    #[arg(long, value_enum, default_value = "grid")]
    global: GlobalArg,

    #[arg(long)]
    min_sim: Option<f64>,

    #[arg(long)]
    max_sim: Option<f64>,

    /// Hide titles containing this text; repeatable.
    #[arg(long)]
    blacklist: Vec<String>,

    /// Build the category tree of the cluster at this overview index.
    #[arg(long)]
    category_tree: Option<usize>,

    /// Highlight this article's categories in the category tree.
    #[arg(long, requires = "category_tree")]
    highlight: Option<u32>,

    /// Fuzzy title search over clustered articles.
    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value_t = 20)]
    search_limit: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => VtaConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VtaConfig::default(),
    };
    let store = vta::wikidb::load_corpus(&args.corpus)
        .with_context(|| format!("failed to load corpus {}", args.corpus.display()))?;

    let mut session = Session::new(store, config).context("invalid configuration")?;
    if let Some(min) = args.min_sim {
        session.set_min_similarity(min).context("invalid --min-sim")?;
    }
    if let Some(max) = args.max_sim {
        session.set_max_similarity(max).context("invalid --max-sim")?;
    }
    for entry in &args.blacklist {
        session.add_to_blacklist(entry.as_str());
    }

    session.set_cluster_layout(args.layout.into());
    session.set_global_layout(args.global.into());
    match args.clusters {
        Some(count) => {
            session.request_clusters(count);
        }
        None => {
            session.request_all_clusters();
        }
    }
    session.refresh_edges();

    let category_tree = match args.category_tree {
        Some(index) => {
            session
                .select_cluster(index)
                .with_context(|| format!("failed to build category tree for cluster {index}"))?;
            if let Some(article) = args.highlight {
                session
                    .highlight_article(article)
                    .with_context(|| format!("failed to highlight article {article}"))?;
            }
            Some(CategoryTreeSnapshot::capture(session.category_tree()))
        }
        None => None,
    };

    let search = args
        .search
        .as_deref()
        .map(|query| session.search(query, args.search_limit))
        .unwrap_or_default();

    info!(
        clusters = session.cluster_count(),
        nodes = session.graph().node_count(),
        edges = session.graph().edge_count(),
        "writing snapshot"
    );

    let snapshot = Snapshot {
        overview: OverviewSnapshot::capture(&session),
        category_tree,
        search,
    };
    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &snapshot).context("failed to write snapshot")?;
    println!();

    Ok(())
}
