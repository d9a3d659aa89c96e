//! Pattern segment grammar for route templates.
//!
//! All functions here are pure: same input, same output, no side effects.

use std::fmt;

/// One segment of a route pattern.
///
/// # Examples
///
/// ```
/// use xlink::route::pattern::{classify_segment, PatternSegment};
///
/// assert!(matches!(classify_segment("posts"), PatternSegment::Static(_)));
/// assert!(matches!(
///     classify_segment(":id"),
///     PatternSegment::Param { optional: false, .. }
/// ));
/// assert!(matches!(
///     classify_segment(":id?"),
///     PatternSegment::Param { optional: true, .. }
/// ));
/// assert!(matches!(classify_segment("*rest"), PatternSegment::Wildcard { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Literal text that must match exactly.
    Static(String),
    /// Named parameter matching any single non-empty segment: `:id`,
    /// or `:id?` when the segment may be absent.
    Param { name: String, optional: bool },
    /// Trailing wildcard consuming the rest of the path: `*rest`.
    Wildcard { name: String },
}

impl fmt::Display for PatternSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSegment::Static(text) => f.write_str(text),
            PatternSegment::Param { name, optional: false } => write!(f, ":{name}"),
            PatternSegment::Param { name, optional: true } => write!(f, ":{name}?"),
            PatternSegment::Wildcard { name } => write!(f, "*{name}"),
        }
    }
}

/// Classifies one pattern segment.
///
/// Rules, in order: `*name` is a wildcard, `:name?` an optional parameter,
/// `:name` a required parameter, anything else static text.
pub fn classify_segment(segment: &str) -> PatternSegment {
    if let Some(name) = segment.strip_prefix('*') {
        return PatternSegment::Wildcard {
            name: name.to_string(),
        };
    }

    match segment.strip_prefix(':') {
        Some(param) => match param.strip_suffix('?') {
            Some(name) => PatternSegment::Param {
                name: name.to_string(),
                optional: true,
            },
            None => PatternSegment::Param {
                name: param.to_string(),
                optional: false,
            },
        },
        None => PatternSegment::Static(segment.to_string()),
    }
}

/// Matches pattern segments against path segments recursively.
///
/// Optional parameters backtrack: the matcher first tries consuming a path
/// segment, then tries skipping the parameter. A wildcard must be the final
/// pattern segment and consumes at least one remaining path segment.
pub fn segments_match(pattern: &[PatternSegment], path: &[&str], case_insensitive: bool) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((segment, rest)) => match segment {
            PatternSegment::Wildcard { .. } => rest.is_empty() && !path.is_empty(),
            PatternSegment::Param { optional: false, .. } => match path.split_first() {
                Some((_, path_rest)) => segments_match(rest, path_rest, case_insensitive),
                None => false,
            },
            PatternSegment::Param { optional: true, .. } => {
                (!path.is_empty() && segments_match(rest, &path[1..], case_insensitive))
                    || segments_match(rest, path, case_insensitive)
            }
            PatternSegment::Static(expected) => match path.split_first() {
                Some((actual, path_rest)) => {
                    static_matches(expected, actual, case_insensitive)
                        && segments_match(rest, path_rest, case_insensitive)
                }
                None => false,
            },
        },
    }
}

fn static_matches(expected: &str, actual: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        expected.eq_ignore_ascii_case(actual)
    } else {
        expected == actual
    }
}

/// Strips a format suffix from the final segment of a path.
///
/// Returns the path without the suffix when the final segment splits into
/// a non-empty stem and a non-empty extension at its last dot, `None`
/// otherwise. Only one suffix is stripped: `"/a/b.tar.gz"` becomes
/// `"/a/b.tar"`.
///
/// # Examples
///
/// ```
/// use xlink::route::pattern::strip_format_suffix;
///
/// assert_eq!(strip_format_suffix("/posts/7.json").as_deref(), Some("/posts/7"));
/// assert_eq!(strip_format_suffix("/posts.xml").as_deref(), Some("/posts"));
/// assert_eq!(strip_format_suffix("/posts/7"), None);
/// assert_eq!(strip_format_suffix("/posts/.hidden"), None);
/// ```
pub fn strip_format_suffix(path: &str) -> Option<String> {
    let last_slash = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let last_segment = &path[last_slash..];

    let dot = last_segment.rfind('.')?;
    if dot == 0 || dot == last_segment.len() - 1 {
        return None;
    }

    Some(path[..last_slash + dot].to_string())
}
