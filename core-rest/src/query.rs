//! Query descriptions
//!
//! A [`Query`] captures caller intent (which resource, which rows, in
//! what order, how many) without committing to a wire format.
//! Rendering into query parameters happens in [`crate::request`].

use serde_json::Value;

/// The target of a request: a table, a view, or a stored procedure.
///
/// Exactly one kind, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Table(String),
    View(String),
    Procedure(String),
}

impl Resource {
    pub fn table(name: impl Into<String>) -> Self {
        Resource::Table(name.into())
    }

    pub fn view(name: impl Into<String>) -> Self {
        Resource::View(name.into())
    }

    pub fn procedure(name: impl Into<String>) -> Self {
        Resource::Procedure(name.into())
    }

    /// URL path for this resource. Procedures live under the `/rpc`
    /// namespace; tables and views are top-level.
    pub fn path(&self) -> String {
        match self {
            Resource::Table(name) | Resource::View(name) => format!("/{}", name),
            Resource::Procedure(name) => format!("/rpc/{}", name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Table(name) | Resource::View(name) | Resource::Procedure(name) => name,
        }
    }
}

/// Comparison operators supported by the filter syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality (`eq.`)
    Eq,
    /// Case-insensitive pattern match (`ilike.*value*`)
    Ilike,
    /// Greater or equal (`gte.`)
    Gte,
    /// Less or equal (`lte.`)
    Lte,
}

impl FilterOp {
    pub fn token(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ilike => "ilike",
            FilterOp::Gte => "gte",
            FilterOp::Lte => "lte",
        }
    }
}

/// One column comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Render the query-parameter value for this filter,
    /// e.g. `eq.2024` or `ilike.*dragon*`.
    pub fn rendered(&self) -> String {
        let text = value_text(&self.value);
        match self.op {
            FilterOp::Ilike => format!("ilike.*{}*", text),
            op => format!("{}.{}", op.token(), text),
        }
    }
}

/// Plain-text rendering of a filter value. Strings pass through without
/// quotes; everything else uses its JSON representation.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sort direction for one order term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn token(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// One `(column, direction)` pair of the sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTerm {
    pub column: String,
    pub direction: SortDirection,
}

/// A structured read query against a table or view.
///
/// Built incrementally, consumed by [`RestClient::select`](crate::RestClient::select).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub resource: Resource,
    pub select: Option<String>,
    pub filters: Vec<Filter>,
    pub order: Vec<SortTerm>,
    pub limit: Option<u32>,
    pub offset: u32,
    pub exact_count: bool,
}

impl Query {
    fn new(resource: Resource) -> Self {
        Self {
            resource,
            select: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: 0,
            exact_count: false,
        }
    }

    /// Query a table.
    pub fn table(name: impl Into<String>) -> Self {
        Self::new(Resource::table(name))
    }

    /// Query a view. Views are read-only; the wire shape is identical
    /// to a table read.
    pub fn view(name: impl Into<String>) -> Self {
        Self::new(Resource::view(name))
    }

    /// Set the select list. The string is passed through verbatim as a
    /// single query parameter; embedded-relation syntax such as
    /// `"*,author:authors(name)"` is opaque to the translator.
    pub fn select(mut self, spec: impl Into<String>) -> Self {
        self.select = Some(spec.into());
        self
    }

    /// Add a filter. At most one filter per column: adding a second
    /// filter on the same column replaces the first (last write wins).
    /// This mirrors the one-parameter-per-column wire format and is a
    /// documented limitation of the query model.
    pub fn filter(mut self, column: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        let filter = Filter::new(column, op, value);
        if let Some(existing) = self
            .filters
            .iter_mut()
            .find(|f| f.column == filter.column)
        {
            *existing = filter;
        } else {
            self.filters.push(filter);
        }
        self
    }

    /// Equality filter.
    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    /// Case-insensitive substring match.
    pub fn ilike(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Ilike, value)
    }

    /// Greater-or-equal filter.
    pub fn gte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Gte, value)
    }

    /// Less-or-equal filter.
    pub fn lte(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Lte, value)
    }

    /// Append a sort term. Terms keep their call order in the rendered
    /// parameter.
    pub fn order(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order.push(SortTerm {
            column: column.into(),
            direction,
        });
        self
    }

    /// Cap the number of returned rows. Absent means server default.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` rows. Zero is the default and is omitted
    /// from the wire request.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Ask the server for an exact total row count alongside the page.
    /// Rendered as a `Prefer` header, never a query parameter.
    pub fn with_exact_count(mut self) -> Self {
        self.exact_count = true;
        self
    }

    /// Comma-joined `column.direction` rendering of the sort terms,
    /// `None` when no ordering was requested.
    pub fn order_param(&self) -> Option<String> {
        if self.order.is_empty() {
            return None;
        }
        let joined = self
            .order
            .iter()
            .map(|term| format!("{}.{}", term.column, term.direction.token()))
            .collect::<Vec<_>>()
            .join(",");
        Some(joined)
    }
}
