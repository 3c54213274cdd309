//! Server-side list filters.

use super::MerchantStatus;

/// Filters understood by `GET /merchants/`.
///
/// `status` matches exactly; `search` is a case-insensitive substring match
/// over name, email and registration number, evaluated by the backend.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MerchantQuery {
    /// Exact status to match.
    pub status: Option<MerchantStatus>,
    /// Search term.
    pub search: Option<String>,
}

impl MerchantQuery {
    /// Creates an empty query that matches every merchant.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to merchants with the given status.
    #[inline]
    #[must_use]
    pub const fn with_status(mut self, status: MerchantStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to merchants matching the search term.
    #[inline]
    #[must_use]
    pub fn with_search<T: Into<String>>(mut self, term: T) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Returns the query-string pairs to send. Blank search terms are
    /// dropped.
    #[inline]
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            pairs.push(("search", term.to_owned()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_pairs() {
        assert!(MerchantQuery::new().pairs().is_empty());
    }

    #[test]
    fn status_and_search_pairs() {
        let query = MerchantQuery::new()
            .with_status(MerchantStatus::Suspended)
            .with_search("  acme ");
        assert_eq!(
            query.pairs(),
            vec![("status", "Suspended".to_owned()), ("search", "acme".to_owned())]
        );
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = MerchantQuery::new().with_search("   ");
        assert!(query.pairs().is_empty());
    }
}
