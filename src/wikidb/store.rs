use std::collections::HashMap;

use crate::error::{Error, Result};

use super::record::{Article, Category};

/// Read side of the article/category database.
///
/// Lookups are synchronous and assumed cheap (in-process or memory mapped).
/// Unknown ids are reported as [`Error::NotFound`].
pub trait SimilarityStore {
    fn article(&self, id: u32) -> Result<Article>;
    fn category(&self, id: u32) -> Result<Category>;
    /// Number of articles; valid article ids run up to and including this.
    fn size_articles(&self) -> u32;
}

impl<S: SimilarityStore + ?Sized> SimilarityStore for &S {
    fn article(&self, id: u32) -> Result<Article> {
        (**self).article(id)
    }

    fn category(&self, id: u32) -> Result<Category> {
        (**self).category(id)
    }

    fn size_articles(&self) -> u32 {
        (**self).size_articles()
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    articles: HashMap<u32, Article>,
    categories: HashMap<u32, Category>,
    max_article_id: u32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_article(&mut self, article: Article) -> Option<Article> {
        self.max_article_id = self.max_article_id.max(article.index);
        self.articles.insert(article.index, article)
    }

    pub fn insert_category(&mut self, category: Category) -> Option<Category> {
        self.categories.insert(category.index, category)
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

impl SimilarityStore for InMemoryStore {
    fn article(&self, id: u32) -> Result<Article> {
        self.articles
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::article_not_found(id))
    }

    fn category(&self, id: u32) -> Result<Category> {
        self.categories
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::category_not_found(id))
    }

    fn size_articles(&self) -> u32 {
        self.max_article_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_not_found() {
        let mut store = InMemoryStore::new();
        store.insert_article(Article::new(1, "Rust"));
        store.insert_category(Category::new(10, "Programming languages"));

        assert_eq!(store.article(1).unwrap().title, "Rust");
        assert_eq!(store.category(10).unwrap().title, "Programming languages");
        assert!(store.article(2).unwrap_err().is_not_found());
        assert!(store.category(11).unwrap_err().is_not_found());
    }

    #[test]
    fn test_size_is_highest_id() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.size_articles(), 0);
        store.insert_article(Article::new(1, "a"));
        store.insert_article(Article::new(5, "b"));
        assert_eq!(store.size_articles(), 5);
        assert_eq!(store.article_count(), 2);

        store.insert_article(Article::new(3, "c"));
        store.insert_article(Article::new(5, "b2"));
        assert_eq!(store.size_articles(), 5);
        assert_eq!(store.article_count(), 3);
    }
}
