//! Catalog client demonstration
//!
//! Wires the configuration, transport, and catalog client together and
//! runs the main admin flows against a live backend.
//!
//! Run with:
//! ```bash
//! # Against the default backend (http://localhost:3000)
//! cargo run --example catalog_demo
//!
//! # Against another backend
//! CATALOG_API_URL=http://catalog.internal:3000 cargo run --example catalog_demo
//! ```

use std::sync::Arc;

use bridge_reqwest::ReqwestHttpClient;
use core_catalog::{BookFilter, BookPatch, CatalogClient, NewBook, PageRequest};
use core_runtime::config::ClientConfig;
use core_runtime::logging::{init_logging, LoggingConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default()).expect("Failed to initialize logging");

    let config = ClientConfig::from_env()?;
    info!(base_url = %config.base_url, "Connecting to catalog backend");

    let transport = Arc::new(ReqwestHttpClient::with_timeout(config.timeout));
    let catalog = CatalogClient::from_transport(transport, config.base_url.clone());

    // Paged listing with embedded author/genre names and an exact count.
    let filter = BookFilter {
        title: Some("the".to_string()),
        ..Default::default()
    };
    let page = catalog.list_books(&filter, PageRequest::new(0, 10)).await?;
    info!(
        shown = page.items.len(),
        total = page.total,
        pages = page.total_pages,
        "Listed books"
    );
    for record in &page.items {
        let author = record
            .author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("unknown author");
        println!("{} by {}", record.book.title, author);
    }

    // Create, patch, and delete a book, reading back server-assigned
    // fields through the returned representation.
    let created = catalog
        .create_book(&NewBook {
            year: Some(2024),
            ..NewBook::new("Demo Book")
        })
        .await?;
    info!(id = created.id, "Created book");

    let patched = catalog
        .update_book(
            created.id,
            &BookPatch {
                year: Some(Some(2025)),
                ..Default::default()
            },
        )
        .await?;
    info!(id = patched.id, year = ?patched.year, "Updated book");

    catalog.delete_book(created.id).await?;
    info!(id = created.id, "Deleted book");

    // Two independent lookups joined explicitly.
    let (authors, genres) = catalog.author_and_genre_options().await?;
    info!(
        authors = authors.len(),
        genres = genres.len(),
        "Loaded form options"
    );

    // View, procedures, and the grouped aggregate.
    let details = catalog
        .list_book_details(Default::default(), PageRequest::new(0, 5))
        .await?;
    println!("book_details rows: {}", details.len());

    let top = catalog.top_genres(5).await?;
    for genre in top {
        println!("{}: {} books", genre.name, genre.book_count);
    }

    let hits = catalog.search_books("dragon").await?;
    println!("search hits: {}", hits.len());

    let counts = catalog.book_count_by_genre().await?;
    println!("genre buckets: {}", counts.len());

    Ok(())
}
