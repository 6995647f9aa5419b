//! Query descriptors binding each statistic to its precomputed view.
//!
//! Every descriptor is a compile-time constant built from string literals.
//! The SQL text is assembled from these literals only; nothing derived from a
//! request ever reaches it.

/// Maximum number of rows served by the recent commits endpoint.
pub const RECENT_COMMITS_LIMIT: usize = 1000;

/// Shape of a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// First row only, serialized as a JSON object.
    SingleRow,
    /// All rows, serialized as a JSON array.
    RowArray,
}

/// Immutable description of one view query.
///
/// Only this module builds descriptors; the constants below are the full set.
///
/// ```compile_fail
/// use dotpulse::models::view_query::{ResponseMode, ViewQuery};
///
/// let query = ViewQuery {
///     label: "users",
///     columns: "*",
///     view: "pg_user",
///     order_by: None,
///     limit: None,
///     mode: ResponseMode::RowArray,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewQuery {
    pub(crate) label: &'static str,
    pub(crate) columns: &'static str,
    pub(crate) view: &'static str,
    /// `ORDER BY` clause body, without the keywords.
    pub(crate) order_by: Option<&'static str>,
    pub(crate) limit: Option<usize>,
    pub(crate) mode: ResponseMode,
}

impl ViewQuery {
    const fn new(label: &'static str, view: &'static str, mode: ResponseMode) -> Self {
        Self {
            label,
            columns: "*",
            view,
            order_by: None,
            limit: None,
            mode,
        }
    }

    const fn ordered_by(self, clause: &'static str) -> Self {
        Self {
            order_by: Some(clause),
            ..self
        }
    }

    const fn limited_to(self, rows: usize) -> Self {
        Self {
            limit: Some(rows),
            ..self
        }
    }

    /// Name used in log events and error bodies.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn columns(&self) -> &'static str {
        self.columns
    }

    pub fn view(&self) -> &'static str {
        self.view
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// Trailing clause appended after the view name, empty when unordered.
    pub fn predicate(&self) -> String {
        let mut clauses = Vec::with_capacity(2);
        if let Some(order_by) = self.order_by {
            clauses.push(format!("ORDER BY {order_by}"));
        }
        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {limit}"));
        }
        clauses.join(" ")
    }

    /// Full statement text, `SELECT <columns> FROM <view> <predicate>`.
    pub fn sql(&self) -> String {
        let predicate = self.predicate();
        if predicate.is_empty() {
            format!("SELECT {} FROM {}", self.columns, self.view)
        } else {
            format!("SELECT {} FROM {} {predicate}", self.columns, self.view)
        }
    }
}

/// Overall commit, repository, contributor, PR and issue counts.
pub const STATISTICS: ViewQuery =
    ViewQuery::new("statistics", "overview_view", ResponseMode::SingleRow);

/// Contributors ranked by contributions over the last month.
pub const TOP_CONTRIBUTORS: ViewQuery = ViewQuery::new(
    "topContributors",
    "top_contributors_view",
    ResponseMode::RowArray,
)
.ordered_by("contributions DESC");

/// Commit totals per month.
pub const COMMITS: ViewQuery =
    ViewQuery::new("commits", "commits_view", ResponseMode::RowArray).ordered_by("commit_month");

/// Active developers per month over the last year.
pub const ACTIVE_CONTRIBUTORS: ViewQuery = ViewQuery::new(
    "activeContributors",
    "active_contributors_view",
    ResponseMode::RowArray,
)
.ordered_by("month");

/// Most recent commits across all tracked repositories.
pub const RECENT_COMMITS: ViewQuery = ViewQuery::new(
    "recentCommits",
    "recent_commits_view",
    ResponseMode::RowArray,
)
.ordered_by("commit_date DESC")
.limited_to(RECENT_COMMITS_LIMIT);

/// Repository count per month.
pub const REPOSITORIES: ViewQuery =
    ViewQuery::new("repositories", "repositories_view", ResponseMode::RowArray)
        .ordered_by("month");

/// Active developers and active repositories per month.
pub const ACTIVITY: ViewQuery =
    ViewQuery::new("activity", "activity_view", ResponseMode::RowArray).ordered_by("month");

/// All descriptors served by the API.
pub const ALL: [ViewQuery; 7] = [
    STATISTICS,
    TOP_CONTRIBUTORS,
    COMMITS,
    ACTIVE_CONTRIBUTORS,
    RECENT_COMMITS,
    REPOSITORIES,
    ACTIVITY,
];
