//! Portfolio filtering by customer segment and free-text search.

use bid_ledger_core::CategorySelector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::project::Project;

/// Category and text predicates applied to the project collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectQuery {
    pub category: CategorySelector,
    /// Literal substring searched in project and customer names; empty matches all.
    pub term: String,
}

impl ProjectQuery {
    #[must_use]
    pub fn new(category: CategorySelector, term: impl Into<String>) -> Self {
        Self {
            category,
            term: term.into(),
        }
    }

    /// Query that keeps every project.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns true if the project passes both predicates.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.category.matches(project.category)
            && (project.project_name.contains(self.term.as_str())
                || project.customer_name.contains(self.term.as_str()))
    }

    /// Applies the query, preserving input order.
    pub fn apply<'a, I>(&self, projects: I) -> Vec<&'a Project>
    where
        I: IntoIterator<Item = &'a Project>,
    {
        let kept: Vec<&Project> = projects.into_iter().filter(|p| self.matches(p)).collect();
        debug!(
            category = %self.category,
            term = %self.term,
            matched = kept.len(),
            "Filtered projects"
        );
        kept
    }
}

/// Keeps the projects matching `category` whose project or customer name
/// contains `term`.
pub fn filter_projects<'a, I>(projects: I, category: CategorySelector, term: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    ProjectQuery::new(category, term).apply(projects)
}
