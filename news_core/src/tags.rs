use crate::error::{Error, Result};

pub const DEFAULT_TAGS: [&str; 5] = ["karawang", "jakarta", "bogor", "bandung", "surabaya"];

/// Allow-list of city tags.
/// With `allow_all` set, every tag is accepted but `tags` is still what gets advertised and sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagConfig {
    pub tags: Vec<String>,
    pub allow_all: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            allow_all: false,
        }
    }
}

pub fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Split a comma separated `tags` parameter, dropping empty items.
pub fn split_list(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

impl TagConfig {
    pub fn new(tags: Vec<String>, allow_all: bool) -> Self {
        let tags = tags.iter().map(|t| normalize(t)).filter(|t| !t.is_empty()).collect();
        Self { tags, allow_all }
    }

    pub fn is_allowed(&self, tag: &str) -> bool {
        self.allow_all || self.tags.iter().any(|t| *t == normalize(tag))
    }

    /// Normalize every tag and reject the request if any is not allowed.
    pub fn validate<I, S>(&self, tags: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = tags.into_iter().map(|t| normalize(t.as_ref())).collect::<Vec<_>>();
        let invalid = tags
            .iter()
            .filter(|t| t.is_empty() || !self.is_allowed(t))
            .cloned()
            .collect::<Vec<_>>();
        if !invalid.is_empty() {
            return Err(Error::InvalidTags {
                invalid,
                available: self.tags.clone(),
            });
        }
        Ok(tags)
    }

    pub fn validate_one(&self, tag: &str) -> Result<String> {
        let tag = normalize(tag);
        if tag.is_empty() || !self.is_allowed(&tag) {
            return Err(Error::InvalidTags {
                invalid: vec![tag],
                available: self.tags.clone(),
            });
        }
        Ok(tag)
    }

    /// The first `n` configured tags.
    pub fn sample(&self, n: usize) -> Vec<String> {
        self.tags.iter().take(n).cloned().collect()
    }
}
