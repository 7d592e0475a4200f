//! Query descriptors: what to ask the catalog, independent of how.
//!
//! A descriptor is built once from a debounced search term and never changes.
//! The transport that executes it is responsible for percent-encoding the term.

/// Sort order requested for the popular listing.
pub const POPULAR_SORT_ORDER: &str = "popularity.desc";

/// Which catalog endpoint a descriptor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Free-text title search.
    Search,
    /// Catalog listing sorted by descending popularity.
    Popular,
}

/// An immutable description of one catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    mode: QueryMode,
    term: String,
}

impl QueryDescriptor {
    #[must_use]
    pub const fn mode(&self) -> QueryMode {
        self.mode
    }

    /// The search term, verbatim. Empty for [`QueryMode::Popular`].
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub const fn is_search(&self) -> bool {
        matches!(self.mode, QueryMode::Search)
    }
}

/// Maps a search term to the descriptor of the query it implies.
///
/// An empty term asks for the popular listing; anything else is searched for
/// exactly as typed.
///
/// # Examples
///
/// ```
/// use moviescout::catalog::{build, QueryMode};
///
/// assert_eq!(build("").mode(), QueryMode::Popular);
///
/// let search = build(" Dune ");
/// assert_eq!(search.mode(), QueryMode::Search);
/// assert_eq!(search.term(), " Dune ");
/// ```
#[must_use]
pub fn build(term: &str) -> QueryDescriptor {
    if term.is_empty() {
        QueryDescriptor {
            mode: QueryMode::Popular,
            term: String::new(),
        }
    } else {
        QueryDescriptor {
            mode: QueryMode::Search,
            term: term.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_builds_popular() {
        let descriptor = build("");
        assert_eq!(descriptor.mode(), QueryMode::Popular);
        assert!(!descriptor.is_search());
        assert_eq!(descriptor.term(), "");
    }

    #[test]
    fn non_empty_term_builds_search() {
        let descriptor = build("dune");
        assert_eq!(descriptor.mode(), QueryMode::Search);
        assert_eq!(descriptor.term(), "dune");
    }

    #[test]
    fn whitespace_is_a_search_and_is_not_trimmed() {
        let descriptor = build("   ");
        assert!(descriptor.is_search());
        assert_eq!(descriptor.term(), "   ");
    }

    #[test]
    fn same_term_builds_equal_descriptors() {
        assert_eq!(build("Alien & Aliens"), build("Alien & Aliens"));
    }
}
