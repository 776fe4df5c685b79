//! High-level catalog operations
//!
//! [`CatalogClient`] composes the request translator into the typed
//! surface the admin UI consumes: paged book listings with embedded
//! relations, author/genre CRUD, the join view, procedure calls, and
//! the grouped book-count aggregate. Each operation is one translator
//! call; the database owns all constraint enforcement and aggregation.

use bridge_traits::http::HttpClient;
use core_rest::{Key, Query, QueryResult, RestClient};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CatalogError, Result};
use crate::filter::{AuthorFilter, BookFilter, BookSort, NameSort};
use crate::models::{
    Author, Book, BookDetails, BookPatch, BookRecord, Genre, GenreCount, NewAuthor, NewBook,
    NewGenre, SearchBooksArgs, TopGenre, TopGenresArgs,
};
use crate::pagination::{Page, PageRequest};

/// Select list used for book listings: every base column plus the
/// embedded author and genre names.
const BOOK_LIST_SELECT: &str = "*,author:authors(name),genre:genres(name)";

/// Typed client for the library catalog backend.
///
/// Wraps a [`RestClient`]; construct one per backend and clone freely.
/// Calls may run concurrently with no ordering guarantee between their
/// completions.
#[derive(Clone)]
pub struct CatalogClient {
    rest: RestClient,
}

impl CatalogClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Convenience constructor wiring an injected transport directly.
    pub fn from_transport(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self::new(RestClient::new(http, base_url))
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// List books with filtering, sorting, pagination, embedded
    /// author/genre names, and an exact total count.
    ///
    /// When the server omits the count header the total falls back to
    /// the page's own row count.
    #[instrument(skip(self))]
    pub async fn list_books(&self, filter: &BookFilter, page: PageRequest) -> Result<Page<BookRecord>> {
        let select = filter.select.as_deref().unwrap_or(BOOK_LIST_SELECT);
        let (sort_column, sort_direction) = filter.sort.term();

        let mut query = Query::table("books")
            .select(select)
            .order(sort_column, sort_direction)
            .limit(page.limit())
            .offset(page.offset())
            .with_exact_count();

        if let Some(title) = &filter.title {
            query = query.ilike("title", title.as_str());
        }
        if let Some(year) = filter.year {
            query = query.eq("year", year);
        }
        if let Some(year) = filter.year_gte {
            query = query.gte("year", year);
        }
        if let Some(year) = filter.year_lte {
            query = query.lte("year", year);
        }

        let result = self.rest.select(&query).await?;
        let total = result.total.unwrap_or(result.rows.len() as u64);
        let items = decode_rows("book", result)?;

        Ok(Page::new(items, total, page))
    }

    /// Fetch a single book by id.
    #[instrument(skip(self))]
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        let result = self.rest.select(&Query::table("books").eq("id", id)).await?;
        expect_one("book", &id.to_string(), result)
    }

    /// Create a book and return it with its server-assigned id.
    #[instrument(skip(self, book))]
    pub async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let result = self.rest.insert("books", book).await?;
        expect_representation("book", result)
    }

    /// Insert several books in one request. The wire shape is the same
    /// as a single insert with an array body.
    #[instrument(skip(self, books), fields(count = books.len()))]
    pub async fn create_books(&self, books: &[NewBook]) -> Result<Vec<Book>> {
        let result = self.rest.insert("books", &books).await?;
        decode_rows("book", result)
    }

    /// Apply a partial update and return the updated row.
    #[instrument(skip(self, patch))]
    pub async fn update_book(&self, id: i64, patch: &BookPatch) -> Result<Book> {
        let result = self.rest.update("books", &Key::id(id), patch).await?;
        expect_one("book", &id.to_string(), result)
    }

    /// Delete a book. Deletion acknowledgment carries no body.
    #[instrument(skip(self))]
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        self.rest.delete("books", &Key::id(id)).await?;
        Ok(())
    }

    // =========================================================================
    // Authors
    // =========================================================================

    /// List authors, optionally filtered by a name pattern.
    #[instrument(skip(self))]
    pub async fn list_authors(&self, filter: &AuthorFilter) -> Result<Vec<Author>> {
        let (sort_column, sort_direction) = filter.sort.term();
        let mut query = Query::table("authors").order(sort_column, sort_direction);

        if let Some(name) = &filter.name {
            query = query.ilike("name", name.as_str());
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }
        if filter.offset > 0 {
            query = query.offset(filter.offset);
        }

        let result = self.rest.select(&query).await?;
        decode_rows("author", result)
    }

    #[instrument(skip(self))]
    pub async fn get_author(&self, id: i64) -> Result<Author> {
        let result = self
            .rest
            .select(&Query::table("authors").eq("id", id))
            .await?;
        expect_one("author", &id.to_string(), result)
    }

    #[instrument(skip(self, author))]
    pub async fn create_author(&self, author: &NewAuthor) -> Result<Author> {
        let result = self.rest.insert("authors", author).await?;
        expect_representation("author", result)
    }

    #[instrument(skip(self, author))]
    pub async fn update_author(&self, id: i64, author: &NewAuthor) -> Result<Author> {
        let result = self.rest.update("authors", &Key::id(id), author).await?;
        expect_one("author", &id.to_string(), result)
    }

    /// Delete an author. The schema cascades the deletion to the
    /// author's books; that happens entirely server-side.
    #[instrument(skip(self))]
    pub async fn delete_author(&self, id: i64) -> Result<()> {
        self.rest.delete("authors", &Key::id(id)).await?;
        Ok(())
    }

    // =========================================================================
    // Genres
    // =========================================================================

    /// List genres in name order.
    #[instrument(skip(self))]
    pub async fn list_genres(&self, sort: NameSort) -> Result<Vec<Genre>> {
        let (sort_column, sort_direction) = sort.term();
        let query = Query::table("genres").order(sort_column, sort_direction);
        let result = self.rest.select(&query).await?;
        decode_rows("genre", result)
    }

    #[instrument(skip(self))]
    pub async fn get_genre(&self, id: i64) -> Result<Genre> {
        let result = self
            .rest
            .select(&Query::table("genres").eq("id", id))
            .await?;
        expect_one("genre", &id.to_string(), result)
    }

    /// Create a genre. Genre names are unique; a duplicate surfaces as
    /// the server's constraint-violation message.
    #[instrument(skip(self, genre))]
    pub async fn create_genre(&self, genre: &NewGenre) -> Result<Genre> {
        let result = self.rest.insert("genres", genre).await?;
        expect_representation("genre", result)
    }

    #[instrument(skip(self, genre))]
    pub async fn update_genre(&self, id: i64, genre: &NewGenre) -> Result<Genre> {
        let result = self.rest.update("genres", &Key::id(id), genre).await?;
        expect_one("genre", &id.to_string(), result)
    }

    /// Delete a genre. Books in the genre get their `genre_id` nulled
    /// server-side.
    #[instrument(skip(self))]
    pub async fn delete_genre(&self, id: i64) -> Result<()> {
        self.rest.delete("genres", &Key::id(id)).await?;
        Ok(())
    }

    // =========================================================================
    // Views, procedures, aggregates
    // =========================================================================

    /// Page through the `book_details` join view.
    #[instrument(skip(self))]
    pub async fn list_book_details(&self, sort: BookSort, page: PageRequest) -> Result<Vec<BookDetails>> {
        let (sort_column, sort_direction) = sort.term();
        let query = Query::view("book_details")
            .order(sort_column, sort_direction)
            .limit(page.limit())
            .offset(page.offset());

        let result = self.rest.select(&query).await?;
        decode_rows("book_details", result)
    }

    /// Genres ranked by book count, via the `get_top_genres` procedure.
    #[instrument(skip(self))]
    pub async fn top_genres(&self, limit_count: i64) -> Result<Vec<TopGenre>> {
        let result = self
            .rest
            .call("get_top_genres", &TopGenresArgs { limit_count })
            .await?;
        decode_rows("top genre", result)
    }

    /// Full-text search over books, via the `search_books` procedure.
    #[instrument(skip(self))]
    pub async fn search_books(&self, term: &str) -> Result<Vec<Book>> {
        let result = self
            .rest
            .call(
                "search_books",
                &SearchBooksArgs {
                    search_term: term.to_string(),
                },
            )
            .await?;
        decode_rows("book", result)
    }

    /// Book count grouped by genre. Grouping is implied by the
    /// aggregate select list; see DESIGN.md for the contract decision.
    #[instrument(skip(self))]
    pub async fn book_count_by_genre(&self) -> Result<Vec<GenreCount>> {
        let query = Query::table("books").select("genre_id,count");
        let result = self.rest.select(&query).await?;
        decode_rows("genre count", result)
    }

    /// Fetch the author and genre option lists concurrently, both in
    /// name order. Two independent calls, explicitly joined; there is
    /// no completion-order guarantee to rely on.
    #[instrument(skip(self))]
    pub async fn author_and_genre_options(&self) -> Result<(Vec<Author>, Vec<Genre>)> {
        let author_filter = AuthorFilter::default();
        let authors = self.list_authors(&author_filter);
        let genres = self.list_genres(NameSort::NameAsc);
        futures::try_join!(authors, genres)
    }
}

/// Decode rows into typed models, attributing failures to `entity`.
fn decode_rows<T: DeserializeOwned>(entity: &str, result: QueryResult) -> Result<Vec<T>> {
    result
        .rows
        .into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row)).map_err(|e| CatalogError::decode(entity, e))
        })
        .collect()
}

/// Exactly one row keyed by a known id, else not-found.
fn expect_one<T: DeserializeOwned>(entity: &str, id: &str, result: QueryResult) -> Result<T> {
    decode_rows(entity, result)?
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::not_found(entity, id))
}

/// Exactly one row from a mutation that asked for its representation.
fn expect_representation<T: DeserializeOwned>(entity: &str, result: QueryResult) -> Result<T> {
    decode_rows(entity, result)?
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::missing_representation(entity))
}
