//! Search request construction.

use bookscout_common::{Error, MaxResults, Result};
use reqwest::Url;

/// A validated free-text search against the volumes endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    max_results: MaxResults,
}

impl SearchRequest {
    /// Build a request, trimming surrounding whitespace from `query`.
    ///
    /// A query that is empty after trimming is rejected: the catalog has
    /// nothing to search for.
    pub fn new(query: &str, max_results: MaxResults) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_query("query is empty"));
        }

        Ok(Self {
            query: query.to_string(),
            max_results,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn max_results(&self) -> MaxResults {
        self.max_results
    }

    /// `{endpoint}?q={query}&maxResults={n}`, keeping any query pairs the
    /// endpoint already carries.
    pub fn url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &self.query)
            .append_pair("maxResults", &self.max_results.to_string());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://www.googleapis.com/books/v1/volumes").unwrap()
    }

    #[test]
    fn builds_volumes_url() {
        let request = SearchRequest::new("android", MaxResults::DEFAULT).unwrap();
        assert_eq!(
            request.url(&endpoint()).as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=android&maxResults=10"
        );
    }

    #[test]
    fn encodes_query_text() {
        let request = SearchRequest::new("  rust & c++ ", MaxResults::new(40).unwrap()).unwrap();
        assert_eq!(request.query(), "rust & c++");
        assert_eq!(
            request.url(&endpoint()).as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=rust+%26+c%2B%2B&maxResults=40"
        );
    }

    #[test]
    fn keeps_existing_endpoint_params() {
        let endpoint = Url::parse("http://localhost:8080/volumes?langRestrict=en").unwrap();
        let request = SearchRequest::new("dune", MaxResults::new(5).unwrap()).unwrap();
        assert_eq!(
            request.url(&endpoint).as_str(),
            "http://localhost:8080/volumes?langRestrict=en&q=dune&maxResults=5"
        );
    }

    #[test]
    fn rejects_blank_query() {
        assert_eq!(
            SearchRequest::new("   ", MaxResults::DEFAULT),
            Err(Error::invalid_query("query is empty"))
        );
    }
}
