//! Domain models for the library catalog
//!
//! Transient mirrors of server-held records: every id and timestamp is
//! assigned by the database, so rows only exist here between a response
//! arriving and the caller consuming it.

use serde::{Deserialize, Serialize};

// =============================================================================
// Books
// =============================================================================

/// A book row as stored in the `books` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier
    pub id: i64,

    /// Title (required, the only mandatory column)
    pub title: String,

    /// Publication year
    #[serde(default)]
    pub year: Option<i32>,

    /// Owning author, null when unknown
    #[serde(default)]
    pub author_id: Option<i64>,

    /// Genre, nulled by the server when the genre is deleted
    #[serde(default)]
    pub genre_id: Option<i64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub isbn: Option<String>,
}

/// Payload for creating a book. Optional fields serialize as explicit
/// nulls so a cleared form field clears the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub year: Option<i32>,
    pub author_id: Option<i64>,
    pub genre_id: Option<i64>,
    pub description: Option<String>,
    pub isbn: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            author_id: None,
            genre_id: None,
            description: None,
            isbn: None,
        }
    }
}

/// Partial update for a book. Only fields that are `Some` reach the
/// wire, so untouched columns keep their values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Option<i32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Option<i64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<Option<i64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Option<String>>,
}

/// A related record exposed through an embedded relation, carrying just
/// the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

/// A book row with its embedded author and genre names, as returned by
/// the default list select `*,author:authors(name),genre:genres(name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(flatten)]
    pub book: Book,

    #[serde(default)]
    pub author: Option<NameRef>,

    #[serde(default)]
    pub genre: Option<NameRef>,
}

// =============================================================================
// Authors
// =============================================================================

/// An author row as stored in the `authors` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Payload for creating or fully replacing an author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub bio: Option<String>,
}

// =============================================================================
// Genres
// =============================================================================

/// A genre row. Names are unique server-side; a duplicate insert
/// surfaces as the server's constraint-violation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Payload for creating or renaming a genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

// =============================================================================
// View rows and procedure types
// =============================================================================

/// A row of the `book_details` view: books joined with author and
/// genre names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub genre_name: Option<String>,
}

/// Argument record for the `get_top_genres` procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGenresArgs {
    pub limit_count: i64,
}

/// One genre ranked by book count, returned by `get_top_genres`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGenre {
    pub name: String,
    pub book_count: i64,
}

/// Argument record for the `search_books` procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchBooksArgs {
    pub search_term: String,
}

/// One bucket of the book-count-by-genre aggregate. `genre_id` is null
/// for books without a genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreCount {
    #[serde(default)]
    pub genre_id: Option<i64>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_deserializes_from_full_row() {
        let row = json!({
            "id": 1,
            "title": "A Wizard of Earthsea",
            "year": 1968,
            "author_id": 3,
            "genre_id": 2,
            "description": null,
            "isbn": "978-0-547-72202-6"
        });

        let book: Book = serde_json::from_value(row).unwrap();
        assert_eq!(book.id, 1);
        assert_eq!(book.year, Some(1968));
        assert_eq!(book.description, None);
    }

    #[test]
    fn test_book_record_with_embedded_relations() {
        let row = json!({
            "id": 1,
            "title": "A Wizard of Earthsea",
            "year": 1968,
            "author_id": 3,
            "genre_id": 2,
            "author": {"name": "Ursula K. Le Guin"},
            "genre": {"name": "Fantasy"}
        });

        let record: BookRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.book.title, "A Wizard of Earthsea");
        assert_eq!(record.author.unwrap().name, "Ursula K. Le Guin");
        assert_eq!(record.genre.unwrap().name, "Fantasy");
    }

    #[test]
    fn test_book_record_embeds_may_be_absent() {
        let row = json!({"id": 2, "title": "Untitled"});
        let record: BookRecord = serde_json::from_value(row).unwrap();
        assert!(record.author.is_none());
        assert!(record.genre.is_none());
    }

    #[test]
    fn test_new_book_serializes_explicit_nulls() {
        let body = serde_json::to_value(NewBook::new("Draft")).unwrap();
        assert_eq!(body["title"], "Draft");
        assert!(body["year"].is_null());
        assert!(body["isbn"].is_null());
    }

    #[test]
    fn test_book_patch_skips_untouched_fields() {
        let patch = BookPatch {
            year: Some(Some(1966)),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();

        assert_eq!(body, json!({"year": 1966}));
    }

    #[test]
    fn test_book_patch_can_clear_a_column() {
        let patch = BookPatch {
            genre_id: Some(None),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();

        assert_eq!(body, json!({"genre_id": null}));
    }

    #[test]
    fn test_procedure_args_field_names() {
        let body = serde_json::to_value(TopGenresArgs { limit_count: 5 }).unwrap();
        assert_eq!(body, json!({"limit_count": 5}));

        let body = serde_json::to_value(SearchBooksArgs {
            search_term: "dragon".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"search_term": "dragon"}));
    }
}
