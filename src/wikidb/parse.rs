use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::record::{Article, Category};
use super::sim_pair::SimPair;
use super::store::InMemoryStore;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawArticle {
    index: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    parents: Vec<u32>,
    #[serde(default)]
    comparisons: Vec<SimPair>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawCategory {
    index: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    parents: Vec<u32>,
}

pub fn load_corpus(path: impl AsRef<Path>) -> Result<InMemoryStore> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let store = parse_corpus(&raw)?;
    debug!(
        path = %path.display(),
        articles = store.article_count(),
        categories = store.category_count(),
        "loaded corpus"
    );
    Ok(store)
}

pub fn parse_corpus(raw: &str) -> Result<InMemoryStore> {
    let parsed: Value = serde_json::from_str(raw)?;
    let object = parsed
        .as_object()
        .ok_or_else(|| Error::Config("corpus must be a JSON object".to_owned()))?;

    let articles = object
        .get("articles")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Config("corpus has no \"articles\" array".to_owned()))?;

    let mut store = InMemoryStore::new();

    for value in articles {
        let entry = RawArticle::deserialize(value)?;
        let index = entry.index;
        let article = Article {
            index,
            title: entry.title,
            parents: entry.parents,
            comparisons: entry.comparisons,
        };
        if store.insert_article(article).is_some() {
            warn!(index, "duplicate article in corpus, keeping the last entry");
        }
    }

    if let Some(categories) = object.get("categories").and_then(Value::as_array) {
        for value in categories {
            let entry = RawCategory::deserialize(value)?;
            let index = entry.index;
            let category = Category {
                index,
                title: entry.title,
                parents: entry.parents,
            };
            if store.insert_category(category).is_some() {
                warn!(index, "duplicate category in corpus, keeping the last entry");
            }
        }
    }

    if store.article_count() == 0 {
        return Err(Error::DegenerateInput("corpus contains no articles".to_owned()));
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::super::store::SimilarityStore;
    use super::*;

    #[test]
    fn test_parse_packed_comparisons() {
        let raw = format!(
            r#"{{
                "articles": [
                    {{"index": 1, "title": "A", "parents": [10], "comparisons": [{}, {}]}},
                    {{"index": 2, "title": "B"}}
                ],
                "categories": [{{"index": 10, "title": "Letters", "parents": []}}]
            }}"#,
            (2u32 << 10) | 950,
            (3u32 << 10) | 700
        );

        let store = parse_corpus(&raw).unwrap();
        let article = store.article(1).unwrap();
        assert_eq!(article.parents, vec![10]);
        assert_eq!(article.comparisons.len(), 2);
        assert_eq!(article.comparisons[0].id(), 2);
        assert_eq!(article.comparisons[0].sim(), 950);
        assert_eq!(article.comparisons[1].id(), 3);
        assert!(store.article(2).unwrap().comparisons.is_empty());
        assert_eq!(store.category(10).unwrap().title, "Letters");
    }

    #[test]
    fn test_categories_are_optional() {
        let store = parse_corpus(r#"{"articles": [{"index": 1, "title": "A"}]}"#).unwrap();
        assert_eq!(store.category_count(), 0);
    }

    #[test]
    fn test_rejects_malformed_corpus() {
        assert!(matches!(parse_corpus("[]"), Err(Error::Config(_))));
        assert!(matches!(parse_corpus("{}"), Err(Error::Config(_))));
        assert!(matches!(
            parse_corpus(r#"{"articles": []}"#),
            Err(Error::DegenerateInput(_))
        ));
        assert!(matches!(
            parse_corpus(r#"{"articles": [{"title": "no index"}]}"#),
            Err(Error::Json(_))
        ));
    }
}
