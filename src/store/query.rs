//! Query description for the remote table API.
//!
//! A `Query` is a list of filters plus optional ordering, limit and column
//! projection. It knows how to encode itself as PostgREST query parameters,
//! and stays plain data so in-memory stores can evaluate it too.

/// A single row filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Exact equality: `column = value`.
    Eq { column: String, value: String },
    /// Case-insensitive LIKE with `%` wildcards: `column ILIKE pattern`.
    ILike { column: String, pattern: String },
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<String>) -> Self {
        Filter::Eq {
            column: column.to_string(),
            value: value.into(),
        }
    }

    pub fn ilike(column: &str, pattern: impl Into<String>) -> Self {
        Filter::ILike {
            column: column.to_string(),
            pattern: pattern.into(),
        }
    }

    /// Encode as a `(column, "op.value")` query parameter.
    pub fn to_param(&self) -> (String, String) {
        match self {
            Filter::Eq { column, value } => (column.clone(), format!("eq.{}", value)),
            Filter::ILike { column, pattern } => (column.clone(), format!("ilike.{}", pattern)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering by a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Order {
    fn to_param(&self) -> String {
        let dir = match self.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        format!("{}.{}", self.column, dir)
    }
}

/// A select query against one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    columns: Option<String>,
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned columns (comma separated). Defaults to `*`.
    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn ilike(mut self, column: &str, pattern: impl Into<String>) -> Self {
        self.filters.push(Filter::ilike(column, pattern));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the column projection only when none was chosen yet.
    pub fn with_default_columns(mut self, columns: &str) -> Self {
        if self.columns.is_none() {
            self.columns = Some(columns.to_string());
        }
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn get_order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Encode the whole query as PostgREST query parameters.
    ///
    /// `select` always comes first, followed by the filters in insertion
    /// order, then `order` and `limit` when present.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        params.push((
            "select".to_string(),
            self.columns.clone().unwrap_or_else(|| "*".to_string()),
        ));
        params.extend(self.filters.iter().map(Filter::to_param));
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.to_param()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}
