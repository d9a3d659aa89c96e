//! Route validation.
//!
//! [`UrlBuilder`](crate::UrlBuilder) never exposes a URL whose path the
//! injected [`RouteValidator`] does not recognize. Production hosts bridge
//! this trait to their routing system; [`RouteSet`] is a small
//! self-contained pattern table for tests and standalone use, and
//! [`route_fn`] wraps a bare closure.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod pattern;

pub use pattern::{classify_segment, segments_match, strip_format_suffix, PatternSegment};

/// The routing authority a builder consults before exposing a URL.
///
/// One query, no retry, no caching: every
/// [`uri()`](crate::UrlBuilder::uri) call asks again. Implementations must
/// be usable behind `Arc<dyn RouteValidator>` across request threads.
pub trait RouteValidator: Send + Sync {
    /// Whether the given path matches a registered route.
    fn matches(&self, path: &str) -> bool;
}

/// Accept-all validator, the default when no routing authority is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyRoute;

impl RouteValidator for AnyRoute {
    fn matches(&self, _path: &str) -> bool {
        true
    }
}

/// Wraps a closure as a [`RouteValidator`].
///
/// # Examples
///
/// ```
/// use xlink::route::{route_fn, RouteValidator};
///
/// let validator = route_fn(|path: &str| path.starts_with("/posts"));
/// assert!(validator.matches("/posts/7"));
/// assert!(!validator.matches("/users/7"));
/// ```
pub fn route_fn<F>(f: F) -> RouteFn<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    RouteFn(f)
}

/// A [`RouteValidator`] backed by a closure. See [`route_fn`].
#[derive(Clone, Copy)]
pub struct RouteFn<F>(F);

impl<F> RouteValidator for RouteFn<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, path: &str) -> bool {
        (self.0)(path)
    }
}

impl<F> fmt::Debug for RouteFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteFn").finish()
    }
}

// ============================================================================
// Path Normalization
// ============================================================================

/// Normalizes a path to canonical form: leading slash, no duplicate
/// slashes, no trailing slash except for the root itself.
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// # Examples
///
/// ```
/// use xlink::route::normalize_path;
///
/// assert_eq!(normalize_path("/posts/7"), "/posts/7");
/// assert_eq!(normalize_path("posts/7/"), "/posts/7");
/// assert_eq!(normalize_path("/posts//7"), "/posts/7");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }

    let joined = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{joined}"))
    }
}

fn is_canonical(path: &str) -> bool {
    if !path.starts_with('/') || path.contains("//") {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

// ============================================================================
// RouteSet
// ============================================================================

/// One parsed route template: static segments, `:name` parameters,
/// `:name?` optional parameters, and a trailing `*rest` wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<PatternSegment>,
}

impl RoutePattern {
    /// Parses a pattern string, normalizing its path form first.
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_path(raw);

        RoutePattern {
            segments: normalized
                .split('/')
                .filter(|s| !s.is_empty())
                .map(classify_segment)
                .collect(),
        }
    }

    fn matches(&self, path_segments: &[&str], case_insensitive: bool) -> bool {
        segments_match(&self.segments, path_segments, case_insensitive)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }

        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }

        Ok(())
    }
}

impl From<&str> for RoutePattern {
    fn from(raw: &str) -> Self {
        RoutePattern::parse(raw)
    }
}

impl From<String> for RoutePattern {
    fn from(raw: String) -> Self {
        RoutePattern::parse(&raw)
    }
}

/// An in-memory route table usable as a [`RouteValidator`].
///
/// Patterns are tried in insertion order. A candidate path is normalized
/// before matching; when nothing matches and the path's final segment
/// carries a format suffix (`/posts/7.json`), the suffix is stripped once
/// and the patterns are retried, so format-suffixed URLs resolve against
/// suffix-free templates.
///
/// Serializes as a plain list of pattern strings, so a route table can sit
/// in a host's TOML config (`routes = ["/posts", "/posts/:id"]`).
///
/// # Examples
///
/// ```
/// use xlink::{RouteSet, RouteValidator};
///
/// let routes = RouteSet::new()
///     .with_route("/posts")
///     .with_route("/posts/:id")
///     .with_route("/docs/*rest");
///
/// assert!(routes.matches("/posts/7"));
/// assert!(routes.matches("/posts/7.json"));
/// assert!(routes.matches("/docs/guide/part/2"));
/// assert!(!routes.matches("/users/1"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RouteSet {
    patterns: Vec<RoutePattern>,
    case_insensitive: bool,
}

impl RouteSet {
    /// Creates an empty, case-sensitive route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one route pattern.
    pub fn with_route(mut self, pattern: impl Into<RoutePattern>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Adds several route patterns at once.
    pub fn with_routes<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RoutePattern>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Switches case-insensitive matching on or off.
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// The registered patterns, in insertion order.
    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn matches_normalized(&self, path: &str) -> bool {
        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        self.patterns
            .iter()
            .any(|pattern| pattern.matches(&path_segments, self.case_insensitive))
    }
}

impl RouteValidator for RouteSet {
    fn matches(&self, path: &str) -> bool {
        let normalized = normalize_path(path);

        if self.matches_normalized(&normalized) {
            return true;
        }

        match strip_format_suffix(&normalized) {
            Some(stripped) => self.matches_normalized(&stripped),
            None => false,
        }
    }
}

impl From<Vec<String>> for RouteSet {
    fn from(patterns: Vec<String>) -> Self {
        RouteSet::new().with_routes(patterns)
    }
}

impl From<RouteSet> for Vec<String> {
    fn from(set: RouteSet) -> Self {
        set.patterns.iter().map(|pattern| pattern.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_canonical() {
        assert!(matches!(normalize_path("/posts/7"), Cow::Borrowed("/posts/7")));
        assert!(matches!(normalize_path("/"), Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_path_messy() {
        assert_eq!(normalize_path("/posts/"), "/posts");
        assert_eq!(normalize_path("posts/7"), "/posts/7");
        assert_eq!(normalize_path("/posts//7/"), "/posts/7");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn test_route_fn_delegates() {
        let validator = route_fn(|path: &str| path == "/ok");
        assert!(validator.matches("/ok"));
        assert!(!validator.matches("/nope"));
    }

    #[test]
    fn test_any_route_accepts_everything() {
        assert!(AnyRoute.matches("/whatever"));
        assert!(AnyRoute.matches(""));
    }

    #[test]
    fn test_route_set_insertion_order_and_grammar() {
        let routes = RouteSet::new()
            .with_route("/")
            .with_route("/posts")
            .with_route("/posts/:id")
            .with_route("/posts/:id/comments/:comment_id?")
            .with_route("/docs/*rest");

        assert!(routes.matches("/"));
        assert!(routes.matches("/posts"));
        assert!(routes.matches("/posts/7"));
        assert!(routes.matches("/posts/7/comments"));
        assert!(routes.matches("/posts/7/comments/3"));
        assert!(routes.matches("/docs/a/b/c"));
        assert!(!routes.matches("/docs"));
        assert!(!routes.matches("/users"));
    }

    #[test]
    fn test_route_set_normalizes_candidates() {
        let routes = RouteSet::new().with_route("/posts/:id");
        assert!(routes.matches("posts/7"));
        assert!(routes.matches("/posts/7/"));
        assert!(routes.matches("/posts//7"));
    }

    #[test]
    fn test_route_set_format_suffix() {
        let routes = RouteSet::new().with_route("/posts").with_route("/posts/:id");

        // Param segments accept the suffixed value directly; static final
        // segments need the strip-and-retry pass.
        assert!(routes.matches("/posts/7.json"));
        assert!(routes.matches("/posts.json"));
        assert!(!routes.matches("/users.json"));
    }

    #[test]
    fn test_route_set_case_insensitive() {
        let routes = RouteSet::new().with_route("/Posts/:id");
        assert!(!routes.matches("/posts/7"));

        let routes = routes.case_insensitive(true);
        assert!(routes.matches("/posts/7"));
        assert!(routes.matches("/POSTS/7"));
    }

    #[test]
    fn test_route_set_list_round_trip() {
        let routes = RouteSet::new().with_routes(["/posts", "/posts/:id", "/docs/*rest"]);
        let listed: Vec<String> = routes.clone().into();
        assert_eq!(listed, vec!["/posts", "/posts/:id", "/docs/*rest"]);

        let rebuilt = RouteSet::from(listed);
        assert_eq!(rebuilt.len(), 3);
        assert!(rebuilt.matches("/posts/9"));
    }

    #[test]
    fn test_route_pattern_display_normalizes() {
        assert_eq!(RoutePattern::parse("posts/:id/").to_string(), "/posts/:id");
        assert_eq!(RoutePattern::parse("/").to_string(), "/");
    }
}
