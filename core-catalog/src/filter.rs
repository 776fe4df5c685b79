//! Filter and sort options for catalog listings

use core_rest::SortDirection;

/// Filter options for listing books.
///
/// Year bounds and the year-equality filter all target the `year`
/// column; the query model keeps one filter per column (last write
/// wins), so setting `year` together with a bound is a caller error the
/// model resolves in favor of the bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Case-insensitive title substring
    pub title: Option<String>,
    /// Exact publication year
    pub year: Option<i32>,
    /// Published in or after this year
    pub year_gte: Option<i32>,
    /// Published in or before this year
    pub year_lte: Option<i32>,
    /// Select-list override; defaults to the embedded author/genre list
    pub select: Option<String>,
    /// Sort order
    pub sort: BookSort,
}

/// Sorting options for book listings and the `book_details` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSort {
    #[default]
    TitleAsc,
    TitleDesc,
    YearAsc,
    YearDesc,
}

impl BookSort {
    pub fn term(&self) -> (&'static str, SortDirection) {
        match self {
            BookSort::TitleAsc => ("title", SortDirection::Ascending),
            BookSort::TitleDesc => ("title", SortDirection::Descending),
            BookSort::YearAsc => ("year", SortDirection::Ascending),
            BookSort::YearDesc => ("year", SortDirection::Descending),
        }
    }
}

/// Filter options for listing authors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorFilter {
    /// Case-insensitive name substring
    pub name: Option<String>,
    /// Optional row cap; absent means server default
    pub limit: Option<u32>,
    /// Rows to skip, zero by default
    pub offset: u32,
    pub sort: NameSort,
}

/// Name ordering shared by author and genre listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSort {
    #[default]
    NameAsc,
    NameDesc,
}

impl NameSort {
    pub fn term(&self) -> (&'static str, SortDirection) {
        match self {
            NameSort::NameAsc => ("name", SortDirection::Ascending),
            NameSort::NameDesc => ("name", SortDirection::Descending),
        }
    }
}
