//! # Library Catalog Client
//!
//! Typed client surface for a PostgREST-backed library catalog: books,
//! authors, genres, the `book_details` join view, stored-procedure
//! calls, and the book-count aggregate.
//!
//! ## Overview
//!
//! [`CatalogClient`] wraps the request translator from `core-rest` and
//! exposes the operations the admin UI needs. The transport is injected
//! (`Arc<dyn HttpClient>`), so the whole surface runs against mocks in
//! tests and against `bridge-reqwest` in production.
//!
//! ## Example
//!
//! ```ignore
//! use core_catalog::{BookFilter, CatalogClient, PageRequest};
//!
//! let catalog = CatalogClient::from_transport(http, "http://localhost:3000");
//! let page = catalog
//!     .list_books(&BookFilter::default(), PageRequest::new(0, 10))
//!     .await?;
//! println!("{} of {} books", page.items.len(), page.total);
//! ```

pub mod api;
pub mod error;
pub mod filter;
pub mod models;
pub mod pagination;

pub use api::CatalogClient;
pub use error::{CatalogError, Result};
pub use filter::{AuthorFilter, BookFilter, BookSort, NameSort};
pub use models::{
    Author, Book, BookDetails, BookPatch, BookRecord, Genre, GenreCount, NameRef, NewAuthor,
    NewBook, NewGenre, SearchBooksArgs, TopGenre, TopGenresArgs,
};
pub use pagination::{Page, PageRequest};
