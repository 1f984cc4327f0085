//! Search request bodies shared by the `*/search` endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SearchFilter {
    pub name: String,
    pub operator: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortBy {
    pub name: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchRequest {
    pub search: Vec<SearchFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter
    pub fn eq(mut self, name: &str, value: &str) -> Self {
        self.search.push(SearchFilter {
            name: name.to_string(),
            operator: "eq",
            value: value.to_string(),
        });
        self
    }

    /// Newest first by `name`
    pub fn newest_first(mut self, name: &str) -> Self {
        self.sort.push(SortBy {
            name: name.to_string(),
            ascending: false,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
