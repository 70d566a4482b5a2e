use serde::{Deserialize, Serialize};

/// Title must be at least this many characters.
pub const TITLE_MIN_CHARS: usize = 3;
/// Description length bounds, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 100;
/// Inclusive rating bounds.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;
/// Inclusive publication year bounds.
pub const PUBLISHED_DATE_MIN: u16 = 2000;
pub const PUBLISHED_DATE_MAX: u16 = 2030;

/// A catalog record. The `id` is assigned by the store and never taken
/// from client input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: u64,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Category shelf the book belongs to
    pub category: String,
    /// A brief description of the book
    pub description: String,
    /// Rating of the book, 1 to 5
    pub rating: u8,
    /// Year the book was published
    pub published_date: u16,
}

/// Request schema shared by create and update. Carries every `Book` field
/// except the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub category: String,
    pub description: String,
    pub rating: u8,
    pub published_date: u16,
}

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: String,
}

impl FieldError {
    fn new(field: &'static str, error: impl Into<String>) -> Self {
        Self {
            field,
            error: error.into(),
        }
    }
}

impl BookRequest {
    /// Check every field constraint, collecting all violations so the
    /// caller can report them in one response.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.title.chars().count() < TITLE_MIN_CHARS {
            errors.push(FieldError::new(
                "title",
                format!("must be at least {} characters", TITLE_MIN_CHARS),
            ));
        }
        if self.author.is_empty() {
            errors.push(FieldError::new("author", "must not be empty"));
        }
        if self.category.is_empty() {
            errors.push(FieldError::new("category", "must not be empty"));
        }
        let description_chars = self.description.chars().count();
        if description_chars == 0 || description_chars > DESCRIPTION_MAX_CHARS {
            errors.push(FieldError::new(
                "description",
                format!("must be 1 to {} characters", DESCRIPTION_MAX_CHARS),
            ));
        }
        if !(RATING_MIN..=RATING_MAX).contains(&self.rating) {
            errors.push(FieldError::new(
                "rating",
                format!("must be between {} and {}", RATING_MIN, RATING_MAX),
            ));
        }
        if !(PUBLISHED_DATE_MIN..=PUBLISHED_DATE_MAX).contains(&self.published_date) {
            errors.push(FieldError::new(
                "published_date",
                format!(
                    "must be between {} and {}",
                    PUBLISHED_DATE_MIN, PUBLISHED_DATE_MAX
                ),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Materialize a stored record under the given identity.
    pub fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            description: self.description,
            rating: self.rating,
            published_date: self.published_date,
        }
    }
}

/// Optional query-string filters for the list endpoint. All provided
/// filters must match (conjunction).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    pub category: Option<String>,
    pub author: Option<String>,
    pub rating: Option<u8>,
    pub published_date: Option<u16>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.author.is_none()
            && self.rating.is_none()
            && self.published_date.is_none()
    }
}
