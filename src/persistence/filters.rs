//! Typed list filters, allow-listed sort columns and pagination.
//!
//! Every column name that reaches an `ORDER BY` clause comes from one of
//! the sort enums here, never from request input.

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses `asc`/`desc` (case-insensitive); anything else is `Desc`.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// `LIMIT`/`OFFSET` pair, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum rows to return.
    pub limit: i64,
    /// Rows to skip.
    pub offset: i64,
}

impl Page {
    /// Builds a page from raw query parameters.
    ///
    /// A missing, non-numeric, zero or negative `limit` falls back to
    /// `default_limit`; anything larger than `max_limit` is cut to it. A
    /// missing, non-numeric or negative `offset` becomes 0.
    #[must_use]
    pub fn from_params(
        limit: Option<&str>,
        offset: Option<&str>,
        default_limit: i64,
        max_limit: i64,
    ) -> Self {
        let limit = limit
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(default_limit)
            .min(max_limit);
        let offset = offset
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(0)
            .max(0);
        Self { limit, offset }
    }
}

/// Allow-listed sort columns for events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventSort {
    /// Event date.
    #[default]
    Date,
    /// Row creation time.
    CreatedAt,
    /// Title, alphabetical.
    Title,
}

impl EventSort {
    /// Maps a `sort` parameter to a column; unknown values use the default.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("createdAt") => Self::CreatedAt,
            Some("title") => Self::Title,
            _ => Self::Date,
        }
    }

    /// Column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::CreatedAt => "created_at",
            Self::Title => "title",
        }
    }
}

/// Allow-listed sort columns for reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewSort {
    /// Row creation time.
    #[default]
    CreatedAt,
    /// Star rating.
    Rating,
}

impl ReviewSort {
    /// Maps a `sort` parameter to a column; unknown values use the default.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("rating") => Self::Rating,
            _ => Self::CreatedAt,
        }
    }

    /// Column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Rating => "rating",
        }
    }
}

/// Allow-listed sort columns for lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListSort {
    /// Row creation time.
    #[default]
    CreatedAt,
    /// List name, alphabetical.
    Name,
}

impl ListSort {
    /// Maps a `sort` parameter to a column; unknown values use the default.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name") => Self::Name,
            _ => Self::CreatedAt,
        }
    }

    /// Column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => "name",
        }
    }
}

/// Filters for `GET /api/events`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct EventFilter {
    pub search: Option<String>,
    pub sport: Option<String>,
    pub sort: EventSort,
    pub order: SortOrder,
    pub page: Page,
}

/// Filters for `GET /api/reviews`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ReviewFilter {
    pub user_id: Option<i64>,
    pub event_id: Option<i64>,
    pub sort: ReviewSort,
    pub order: SortOrder,
    pub page: Page,
}

/// Filters for `GET /api/lists`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ListFilter {
    pub user_id: Option<i64>,
    pub is_public: Option<bool>,
    pub search: Option<String>,
    pub sort: ListSort,
    pub order: SortOrder,
    pub page: Page,
}

/// Filters for `GET /api/scorecards`. Always newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ScorecardFilter {
    pub event_id: Option<i64>,
    pub sport: Option<String>,
    pub page: Page,
}

/// Filters for `GET /api/player-stats`. Always ordered by position with
/// nulls last, then newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct PlayerStatFilter {
    pub scorecard_id: Option<i64>,
    pub team_name: Option<String>,
    pub search: Option<String>,
    pub page: Page,
}

/// Turns a free-text search term into a `LIKE` pattern, escaping the
/// wildcards with `\`. Use together with `ESCAPE '\'`.
#[must_use]
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
