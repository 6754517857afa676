//! Database path validation.
//!
//! # Design Decisions
//! - Segments are restricted to `[A-Za-z0-9_-]`, which excludes every
//!   character Firebase forbids in keys (`.`, `#`, `$`, `[`, `]`)
//! - Leading and trailing slashes are dropped; empty inner segments are not
//! - Hand-written scan instead of a regex, single pass over the bytes

use std::fmt;

use thiserror::Error;

/// Firebase's limit on key path length, in bytes.
pub const MAX_PATH_BYTES: usize = 768;

/// Firebase's limit on tree depth.
pub const MAX_PATH_DEPTH: usize = 32;

/// A validated, normalized database path such as `History/Id123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DbPath(String);

impl DbPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DbPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DbPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("missing path")]
    Missing,
    #[error("path exceeds {} bytes", MAX_PATH_BYTES)]
    TooLong,
    #[error("path exceeds {} segments", MAX_PATH_DEPTH)]
    TooDeep,
    #[error("empty segment in path")]
    EmptySegment,
    #[error("invalid character {0:?} in path")]
    InvalidChar(char),
}

/// Validate a raw `path` query value.
pub fn validate_path(raw: &str) -> Result<DbPath, PathError> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(PathError::Missing);
    }
    if trimmed.len() > MAX_PATH_BYTES {
        return Err(PathError::TooLong);
    }

    let mut depth = 0;
    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err(PathError::EmptySegment);
        }
        if let Some(bad) = segment
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(PathError::InvalidChar(bad));
        }
        depth += 1;
    }
    if depth > MAX_PATH_DEPTH {
        return Err(PathError::TooDeep);
    }

    Ok(DbPath(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_nested_path() {
        let path = validate_path("History/Id123").unwrap();
        assert_eq!(path.as_str(), "History/Id123");
    }

    #[test]
    fn test_strips_outer_slashes_and_whitespace() {
        let path = validate_path("  /History/user_1-a/ ").unwrap();
        assert_eq!(path.to_string(), "History/user_1-a");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_path(""), Err(PathError::Missing));
        assert_eq!(validate_path(" / "), Err(PathError::Missing));
    }

    #[test]
    fn test_rejects_empty_segment() {
        assert_eq!(validate_path("a//b"), Err(PathError::EmptySegment));
    }

    #[test]
    fn test_rejects_forbidden_characters() {
        assert_eq!(validate_path("a/b.c"), Err(PathError::InvalidChar('.')));
        assert_eq!(validate_path("a/$b"), Err(PathError::InvalidChar('$')));
        assert_eq!(validate_path("../etc"), Err(PathError::InvalidChar('.')));
        assert_eq!(validate_path("a b"), Err(PathError::InvalidChar(' ')));
        assert_eq!(validate_path("a?x=1"), Err(PathError::InvalidChar('?')));
    }

    #[test]
    fn test_limits() {
        let long = "a".repeat(MAX_PATH_BYTES + 1);
        assert_eq!(validate_path(&long), Err(PathError::TooLong));

        let deep = vec!["a"; MAX_PATH_DEPTH + 1].join("/");
        assert_eq!(validate_path(&deep), Err(PathError::TooDeep));

        let max_deep = vec!["a"; MAX_PATH_DEPTH].join("/");
        assert!(validate_path(&max_deep).is_ok());
    }
}
