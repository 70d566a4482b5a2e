//! The in-memory catalog store.
//!
//! Holds the authoritative ordered sequence of books behind one `RwLock`:
//! readers run concurrently with each other, every mutation takes the write
//! lock, and no lock is held across an await point. Ids grow by append
//! position (last id + 1), so iteration order is insertion order.

use std::sync::RwLock;

use serde_json::json;
use thiserror::Error;

use folio_http::error::AppError;

use super::models::{Book, BookFilter, BookRequest, FieldError};

/// Typed outcomes of catalog operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no book matched the requested key")]
    NotFound,

    #[error("book fields failed validation")]
    Validation(Vec<FieldError>),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => AppError::not_found("book not found"),
            CatalogError::Validation(errors) => {
                let details = errors
                    .iter()
                    .map(|e| json!({"field": e.field, "error": e.error}))
                    .collect();
                AppError::validation(details, "book fields failed validation")
            }
        }
    }
}

/// Locale-independent case folding for string comparisons.
fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// In-memory book catalog.
pub struct CatalogStore {
    books: RwLock<Vec<Book>>,
}

impl CatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            books: RwLock::new(Vec::new()),
        }
    }

    /// Seed the demo catalog. Only applies to an empty store so a restart
    /// with seeding enabled never duplicates records.
    pub fn seed_demo_data(&self) {
        let mut books = self.books.write().expect("catalog lock poisoned");
        if !books.is_empty() {
            return;
        }
        let demo = [
            ("Computer Science Pro", "codingwithroby", "science", "A very nice book!", 5, 2030),
            ("Be Fast with FastAPI", "codingwithroby", "science", "A great book!", 5, 2030),
            ("Master Endpoints", "codingwithroby", "history", "A awesome book!", 5, 2029),
            ("HP1", "Author 1", "math", "Book Description", 2, 2028),
            ("HP2", "Author 2", "math", "Book Description", 3, 2027),
            ("HP3", "Author 3", "math", "Book Description", 1, 2026),
        ];
        for (i, (title, author, category, description, rating, published_date)) in
            demo.into_iter().enumerate()
        {
            books.push(Book {
                id: i as u64 + 1,
                title: title.to_string(),
                author: author.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                rating,
                published_date,
            });
        }
    }

    /// Return the full ordered sequence.
    pub fn list_all(&self) -> Vec<Book> {
        self.books.read().expect("catalog lock poisoned").clone()
    }

    /// Number of books currently stored.
    pub fn len(&self) -> usize {
        self.books.read().expect("catalog lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact-id lookup.
    pub fn get_by_id(&self, id: u64) -> Result<Book, CatalogError> {
        self.books
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    /// Case-insensitive exact title match; first hit wins.
    pub fn get_by_title(&self, title: &str) -> Result<Book, CatalogError> {
        let needle = fold(title);
        self.books
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .find(|book| fold(&book.title) == needle)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    /// All books whose category case-fold-equals the argument.
    pub fn filter_by_category(&self, category: &str) -> Vec<Book> {
        let needle = fold(category);
        self.books
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .filter(|book| fold(&book.category) == needle)
            .cloned()
            .collect()
    }

    /// All books whose author case-fold-equals the argument.
    pub fn filter_by_author(&self, author: &str) -> Vec<Book> {
        let needle = fold(author);
        self.books
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .filter(|book| fold(&book.author) == needle)
            .cloned()
            .collect()
    }

    /// All books with exactly this rating.
    pub fn filter_by_rating(&self, rating: u8) -> Vec<Book> {
        self.books
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .filter(|book| book.rating == rating)
            .cloned()
            .collect()
    }

    /// All books published in exactly this year.
    pub fn filter_by_published_date(&self, year: u16) -> Vec<Book> {
        self.books
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .filter(|book| book.published_date == year)
            .cloned()
            .collect()
    }

    /// Conjunction of all provided filters. String filters case-fold,
    /// numeric filters are exact equality.
    pub fn search(&self, filter: &BookFilter) -> Vec<Book> {
        let category = filter.category.as_deref().map(fold);
        let author = filter.author.as_deref().map(fold);
        self.books
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .filter(|book| {
                category
                    .as_ref()
                    .map_or(true, |needle| fold(&book.category) == *needle)
                    && author
                        .as_ref()
                        .map_or(true, |needle| fold(&book.author) == *needle)
                    && filter.rating.map_or(true, |rating| book.rating == rating)
                    && filter
                        .published_date
                        .map_or(true, |year| book.published_date == year)
            })
            .cloned()
            .collect()
    }

    /// Validate, assign the next id (last id + 1, or 1 when empty), append,
    /// and return the stored book. Nothing is stored on validation failure.
    pub fn create(&self, request: BookRequest) -> Result<Book, CatalogError> {
        request.validate().map_err(CatalogError::Validation)?;

        let mut books = self.books.write().expect("catalog lock poisoned");
        let id = books.last().map_or(1, |book| book.id + 1);
        let book = request.into_book(id);
        books.push(book.clone());
        Ok(book)
    }

    /// Replace every non-identity field of the book with this id. A missing
    /// id leaves the store untouched.
    pub fn update(&self, id: u64, request: BookRequest) -> Result<(), CatalogError> {
        request.validate().map_err(CatalogError::Validation)?;

        let mut books = self.books.write().expect("catalog lock poisoned");
        let slot = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound)?;
        *slot = request.into_book(id);
        Ok(())
    }

    /// Remove the book with this id, preserving the order of the rest.
    pub fn delete(&self, id: u64) -> Result<(), CatalogError> {
        let mut books = self.books.write().expect("catalog lock poisoned");
        let position = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound)?;
        books.remove(position);
        Ok(())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> BookRequest {
        BookRequest {
            title: title.to_string(),
            author: "Author One".to_string(),
            category: "science".to_string(),
            description: "A very nice book!".to_string(),
            rating: 5,
            published_date: 2020,
        }
    }

    #[test]
    fn create_into_empty_store_assigns_id_one() {
        let store = CatalogStore::new();
        let book = store
            .create(BookRequest {
                title: "XYZ".to_string(),
                author: "Y".to_string(),
                category: "science".to_string(),
                description: "Z".to_string(),
                rating: 3,
                published_date: 2020,
            })
            .unwrap();
        assert_eq!(book.id, 1);
    }

    #[test]
    fn create_then_get_by_id_round_trips() {
        let store = CatalogStore::new();
        let created = store.create(request("Title One")).unwrap();
        let fetched = store.get_by_id(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Title One");
        assert_eq!(fetched.rating, 5);
    }

    #[test]
    fn ids_are_strictly_increasing_across_deletes() {
        let store = CatalogStore::new();
        let a = store.create(request("Title One")).unwrap();
        let b = store.create(request("Title Two")).unwrap();
        let c = store.create(request("Title Three")).unwrap();
        assert!(a.id < b.id && b.id < c.id);

        store.delete(b.id).unwrap();
        let d = store.create(request("Title Four")).unwrap();
        assert!(d.id > c.id);

        let ids: Vec<_> = store.list_all().iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn create_rejects_invalid_fields_and_stores_nothing() {
        let store = CatalogStore::new();
        let mut bad = request("Title One");
        bad.rating = 9;
        match store.create(bad) {
            Err(CatalogError::Validation(errors)) => {
                assert_eq!(errors[0].field, "rating");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn get_by_title_is_case_insensitive() {
        let store = CatalogStore::new();
        store.create(request("Title One")).unwrap();

        let upper = store.get_by_title("TITLE ONE").unwrap();
        let lower = store.get_by_title("title one").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(store.get_by_title("Title Two"), Err(CatalogError::NotFound));
    }

    #[test]
    fn category_and_author_filters_case_fold() {
        let store = CatalogStore::new();
        store.seed_demo_data();

        assert_eq!(store.filter_by_category("MATH").len(), 3);
        assert_eq!(store.filter_by_category("poetry").len(), 0);
        assert_eq!(store.filter_by_author("CODINGWITHROBY").len(), 3);
    }

    #[test]
    fn rating_filter_is_exact_match() {
        let store = CatalogStore::new();
        store.create(request("Title One")).unwrap();

        let hits = store.filter_by_rating(5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        assert!(store.filter_by_rating(3).is_empty());
    }

    #[test]
    fn published_date_filter_is_exact_match() {
        let store = CatalogStore::new();
        store.seed_demo_data();

        assert_eq!(store.filter_by_published_date(2030).len(), 2);
        assert!(store.filter_by_published_date(2001).is_empty());
    }

    #[test]
    fn search_applies_filters_conjunctively() {
        let store = CatalogStore::new();
        store.seed_demo_data();

        let filter = BookFilter {
            category: Some("SCIENCE".to_string()),
            author: Some("codingwithroby".to_string()),
            rating: Some(5),
            published_date: Some(2030),
        };
        assert_eq!(store.search(&filter).len(), 2);

        let filter = BookFilter {
            published_date: Some(2029),
            ..filter
        };
        assert!(store.search(&filter).is_empty());
    }

    #[test]
    fn update_replaces_every_field_but_keeps_identity() {
        let store = CatalogStore::new();
        let created = store.create(request("Title One")).unwrap();

        let mut replacement = request("Title One Revised");
        replacement.rating = 2;
        replacement.category = "history".to_string();
        store.update(created.id, replacement).unwrap();

        let updated = store.get_by_id(created.id).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Title One Revised");
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.category, "history");
    }

    #[test]
    fn update_of_missing_id_leaves_store_unchanged() {
        let store = CatalogStore::new();
        store.create(request("Title One")).unwrap();
        let before = store.list_all();

        assert_eq!(
            store.update(42, request("Title Two")),
            Err(CatalogError::NotFound)
        );
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn delete_removes_exactly_one_and_preserves_order() {
        let store = CatalogStore::new();
        store.create(request("Title One")).unwrap();
        store.create(request("Title Two")).unwrap();
        store.create(request("Title Three")).unwrap();

        store.delete(2).unwrap();

        let ids: Vec<_> = store.list_all().iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_of_missing_id_leaves_store_unchanged() {
        let store = CatalogStore::new();
        store.create(request("Title One")).unwrap();
        let before = store.list_all();

        assert_eq!(store.delete(42), Err(CatalogError::NotFound));
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn seeding_a_populated_store_is_a_noop() {
        let store = CatalogStore::new();
        store.seed_demo_data();
        assert_eq!(store.len(), 6);
        store.seed_demo_data();
        assert_eq!(store.len(), 6);
    }
}
