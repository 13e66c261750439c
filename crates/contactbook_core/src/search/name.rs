//! Case-insensitive substring search over contact names.

use crate::model::contact::Contact;

/// Normalized name query.
///
/// The query text is lowercased once so repeated matching does not
/// re-normalize it per contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    /// Empty query text matches every contact.
    pub fn is_match_all(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.is_match_all() || name.to_lowercase().contains(self.needle.as_str())
    }
}

/// Lazily yields `(position, contact)` for every name match.
pub fn search_by_name<'a>(
    contacts: &'a [Contact],
    query: &str,
) -> impl Iterator<Item = (usize, &'a Contact)> + 'a {
    let query = NameQuery::new(query);
    contacts
        .iter()
        .enumerate()
        .filter(move |(_, contact)| query.matches(contact.name.as_str()))
}
