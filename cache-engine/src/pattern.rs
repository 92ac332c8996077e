use regex::Regex;
use shared::{Error, Result};

const WILDCARD: char = '*';

/// Compiled invalidation pattern: literal segments joined by `*`, where `*`
/// matches any (possibly empty) substring. The whole key must match.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    matcher: Regex,
}

impl KeyPattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::InvalidPattern("pattern must not be empty".into()));
        }

        let body = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let matcher = Regex::new(&format!("^{}$", body))
            .map_err(|e| Error::InvalidPattern(format!("{}: {}", pattern, e)))?;

        Ok(Self {
            source: pattern.to_string(),
            matcher,
        })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
