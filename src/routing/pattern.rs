//! Path pattern parsing and matching.
//!
//! # Syntax
//! - `/literal` matches one segment verbatim
//! - `/:name` captures exactly one segment
//! - `/:name*` captures zero or more trailing segments, joined by `/`
//! - `/:name+` captures one or more trailing segments
//!
//! # Design Decisions
//! - Parsed once at registration, immutable afterwards (shared without locks)
//! - No regex: a single linear walk with two cursors
//! - No backtracking: a greedy parameter before the final segment captures
//!   exactly one segment

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while parsing a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `:` token with nothing (or only a modifier) after it.
    #[error("pattern `{pattern}`: parameter at segment {position} has no name")]
    EmptyParameterName { pattern: String, position: usize },

    /// Parameter names may not contain `:`, `*` or `+` past the modifier.
    #[error("pattern `{pattern}`: invalid parameter name `{name}`")]
    InvalidParameterName { pattern: String, name: String },
}

/// Parameters captured by a successful match, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured value for `name`, if the pattern declared it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One slot of a parsed pattern.
///
/// A segment is static exactly when it has no parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    value: String,
    param_name: Option<String>,
    is_greedy: bool,
    is_plus: bool,
}

impl PathSegment {
    fn literal(token: &str) -> Self {
        Self {
            value: token.to_string(),
            param_name: None,
            is_greedy: false,
            is_plus: false,
        }
    }

    fn parameter(pattern: &str, position: usize, token: &str) -> Result<Self, PatternError> {
        let raw = &token[1..];
        let (name, is_greedy, is_plus) = if let Some(name) = raw.strip_suffix('*') {
            (name, true, false)
        } else if let Some(name) = raw.strip_suffix('+') {
            (name, true, true)
        } else {
            (raw, false, false)
        };

        if name.is_empty() {
            return Err(PatternError::EmptyParameterName {
                pattern: pattern.to_string(),
                position,
            });
        }
        if name.contains(|c: char| matches!(c, ':' | '*' | '+')) {
            return Err(PatternError::InvalidParameterName {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }

        Ok(Self {
            value: token.to_string(),
            param_name: Some(name.to_string()),
            is_greedy,
            is_plus,
        })
    }

    /// Literal text, or the raw `:name[*|+]` token for parameters.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_static(&self) -> bool {
        self.param_name.is_none()
    }

    pub fn param_name(&self) -> Option<&str> {
        self.param_name.as_deref()
    }

    pub fn is_greedy(&self) -> bool {
        self.is_greedy
    }

    /// Greedy parameter that rejects an empty capture.
    pub fn is_plus(&self) -> bool {
        self.is_plus
    }
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pattern: String,
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Parse a pattern string. A missing leading `/` is implied, and the
    /// empty pattern is the root pattern.
    ///
    /// A trailing or doubled `/` yields an empty static segment, so such a
    /// pattern never matches.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let normalized = if pattern.starts_with('/') {
            pattern.to_string()
        } else {
            format!("/{pattern}")
        };

        let mut segments = Vec::new();
        if normalized == "/" {
            return Ok(Self {
                pattern: normalized,
                segments,
            });
        }

        // Only the token before the leading `/` is skipped. Any other empty
        // token becomes a static "" segment, which no path can satisfy.
        for (position, token) in normalized.split('/').enumerate().skip(1) {
            let segment = if token.starts_with(':') {
                PathSegment::parameter(&normalized, position, token)?
            } else {
                PathSegment::literal(token)
            };
            segments.push(segment);
        }

        Ok(Self {
            pattern: normalized,
            segments,
        })
    }

    /// The normalized pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True for the root pattern, which matches only `""` and `/`.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Match `path` against the pattern, returning the captured parameters.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let last = self.segments.len().saturating_sub(1);
        let mut params = Params::new();
        let mut cursor = 0;

        for (index, segment) in self.segments.iter().enumerate() {
            match segment.param_name() {
                None => {
                    if parts.get(cursor).copied() != Some(segment.value()) {
                        return None;
                    }
                    cursor += 1;
                }
                Some(name) if segment.is_greedy && index == last => {
                    let rest = parts.get(cursor..).unwrap_or_default();
                    if segment.is_plus && rest.is_empty() {
                        return None;
                    }
                    params.insert(name, rest.join("/"));
                    return Some(params);
                }
                Some(name) if segment.is_greedy => {
                    // Mid-pattern greedy: one segment, or "" once the path is exhausted.
                    params.insert(name, parts.get(cursor).copied().unwrap_or_default());
                    cursor += 1;
                }
                Some(name) => {
                    let value = parts.get(cursor)?;
                    params.insert(name, *value);
                    cursor += 1;
                }
            }
        }

        (cursor >= parts.len()).then_some(params)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.match_path(path).is_some()
    }
}

impl FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
