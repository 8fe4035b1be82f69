use crate::types::SearchIntent;

#[derive(Debug, Default)]
pub struct SearchQueryBuilder {
    terms: Vec<String>,
}

impl SearchQueryBuilder {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn pr_type(&mut self) -> &mut Self {
        self.terms.push("type:pr".to_string());
        self
    }

    pub fn open(&mut self) -> &mut Self {
        self.terms.push("state:open".to_string());
        self
    }

    pub fn involving(&mut self, intent: SearchIntent, login: &str) -> &mut Self {
        self.terms.push(format!("{}:{}", intent.qualifier(), login));
        self
    }

    /// Appends free-text search terms verbatim. The text is opaque here;
    /// the backend reports malformed syntax.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.terms.push(text.to_string());
        }
        self
    }

    pub fn build(&self) -> String {
        self.terms.join(" ")
    }
}

/// Builds the search query for one intent: the fixed open-PR predicate for
/// `login`, followed by `extra_filters`.
pub fn build_search_query(intent: SearchIntent, login: &str, extra_filters: &str) -> String {
    SearchQueryBuilder::new()
        .pr_type()
        .open()
        .involving(intent, login)
        .raw(extra_filters)
        .build()
}
