use serde::{Deserialize, Serialize};

/// A search hit pointing at a project detail page on the registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectLink {
    /// Always absolute, resolved against the registry origin.
    pub url: String,
    /// Trimmed anchor text. Empty when the anchor had no visible text.
    pub title: String,
}

impl ProjectLink {
    pub fn new(url: String, title: String) -> ProjectLink {
        ProjectLink { url, title }
    }
}
