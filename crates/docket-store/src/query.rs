use std::cmp::Ordering;

use crate::document::Document;
use crate::store::Store;

/// Predicate limiting the documents admitted by a query.
pub type QueryFilter<T> = Box<dyn Fn(&Document<T>) -> bool>;

/// Strict "less-than" comparator ordering a query's results.
pub type QuerySort<T> = Box<dyn Fn(&Document<T>, &Document<T>) -> bool>;

/// A filter/sort/limit specification evaluated against a store's current
/// contents.
///
/// Queries are stateless: build one per call with the fluent methods and
/// hand it to [`Store::select`].
pub struct Query<T> {
    /// Predicates combined with logical AND; an empty list admits every
    /// document.
    pub filters: Vec<QueryFilter<T>>,
    /// Optional comparator applied after filtering (stable sort).
    pub sort_by: Option<QuerySort<T>>,
    /// Maximum number of documents returned; zero means no truncation.
    pub limit: usize,
}

impl<T> Query<T> {
    /// An empty query: no filters, no sort, no limit.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort_by: None,
            limit: 0,
        }
    }

    /// Add a filter predicate. All predicates must hold for a document to
    /// be admitted.
    pub fn filter(mut self, f: impl Fn(&Document<T>) -> bool + 'static) -> Self {
        self.filters.push(Box::new(f));
        self
    }

    /// Set the sort comparator, interpreted as strict "less-than".
    pub fn sort_by(mut self, less: impl Fn(&Document<T>, &Document<T>) -> bool + 'static) -> Self {
        self.sort_by = Some(Box::new(less));
        self
    }

    /// Truncate results to at most `limit` documents. Zero disables
    /// truncation.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The materialized result of a query.
#[derive(Clone, Debug)]
pub struct QueryResult<T> {
    /// Matching documents, in sort order when a comparator was given.
    pub documents: Vec<Document<T>>,
    /// Candidate count after filtering, before the limit was applied.
    pub total: usize,
}

impl<T: Clone> Store<T> {
    /// Evaluate a query against a point-in-time snapshot of the store.
    ///
    /// Runs in three fixed phases: filter (AND over all predicates), sort
    /// (stable, comparator as strict less-than), paginate. `total` always
    /// reflects the post-filter, pre-limit candidate count. The store is
    /// never mutated.
    pub fn select(&self, query: &Query<T>) -> QueryResult<T> {
        let mut candidates: Vec<Document<T>> = self
            .documents()
            .into_iter()
            .filter(|doc| query.filters.iter().all(|f| f(doc)))
            .collect();

        let total = candidates.len();

        if let Some(less) = &query.sort_by {
            candidates.sort_by(|a, b| {
                if less(a, b) {
                    Ordering::Less
                } else if less(b, a) {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            });
        }

        if query.limit > 0 && candidates.len() > query.limit {
            candidates.truncate(query.limit);
        }

        QueryResult {
            documents: candidates,
            total,
        }
    }
}
