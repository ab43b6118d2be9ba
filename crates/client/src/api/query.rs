//! Query-string construction
//!
//! List/filter endpoints take structs of optional fields; absent or
//! empty values must be omitted from the query string entirely rather
//! than sent as empty parameters. `QueryPairs` collects only the
//! populated pairs and hands them to reqwest for encoding.

/// Ordered collection of query parameters, skipping absent values
#[derive(Debug, Clone, Default)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter unconditionally.
    pub fn push(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Append a parameter only when the value is present and non-empty.
    pub fn push_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            if !value.is_empty() {
                self.push(key, value);
            }
        }
        self
    }

    /// Append a displayable parameter (numbers, dates) when present.
    pub fn push_opt_display<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value.to_string());
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Borrow the collected pairs for `reqwest`'s query serializer.
    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
