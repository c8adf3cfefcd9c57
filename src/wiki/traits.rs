//! Common traits for Wiki.js records

/// Records that carry a numeric id and a display name (groups, pages, API keys)
pub trait WikiResource {
    /// Numeric id assigned by Wiki.js
    fn id(&self) -> i64;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Check if the record matches by id or by name
    fn matches(&self, input: &str) -> bool {
        input.parse::<i64>().map(|id| id == self.id()).unwrap_or(false) || self.name() == input
    }
}
