//! Interest tags of a user.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

const DELIMITER: char = ',';

/// Set of interest tags.
///
/// Stored and exposed as one comma-delimited string. Tokens are neither
/// trimmed nor filtered, so `""` decodes to a set holding the empty tag.
/// First-occurrence order is kept so a record reads back as written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Interests(Vec<String>);

impl Interests {
    /// Decode the storage form.
    pub fn parse(raw: &str) -> Self {
        let mut seen = HashSet::new();
        Self(
            raw.split(DELIMITER)
                .filter(|tag| seen.insert(*tag))
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Encode into the storage form.
    pub fn encode(&self) -> String {
        self.0.join(&DELIMITER.to_string())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Interests {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Interests> for String {
    fn from(interests: Interests) -> Self {
        interests.encode()
    }
}

impl fmt::Display for Interests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
