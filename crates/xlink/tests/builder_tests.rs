//! Integration tests for xlink
//!
//! Tests cover:
//! - End-to-end URL building against a route table
//! - Segment precedence through `join` and `join_all`
//! - Format suffix handling (overwrite, clear, repeat materialization)
//! - Clone independence and shared validators
//! - Deferred validation and the unresolved-route error
//! - `RouteSet` loading from TOML config

use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use xlink::{route_fn, LinkError, Resource, RouteSet, RouteValidator, Segment, UrlBuilder};

struct Post {
    id: u64,
    title: String,
}

impl Segment for Post {
    fn as_resource(&self) -> Option<Resource<'_>> {
        Some(Resource::new("posts", self.id.to_string()).with_label(self.title.as_str()))
    }

    fn fallback(&self) -> Cow<'_, str> {
        Cow::Owned(self.id.to_string())
    }
}

/// Exposes both the full-entity view and a bare route param, so `join`
/// must pick the stronger rule.
struct Draft {
    id: u64,
}

impl Segment for Draft {
    fn as_resource(&self) -> Option<Resource<'_>> {
        Some(Resource::new("drafts", self.id.to_string()))
    }

    fn route_param(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.id.to_string()))
    }

    fn fallback(&self) -> Cow<'_, str> {
        Cow::Owned(self.id.to_string())
    }
}

fn post_routes() -> RouteSet {
    RouteSet::new()
        .with_route("/posts")
        .with_route("/posts/:id")
        .with_route("/posts/:id/comments")
        .with_route("/posts/:id/comments/:n")
}

#[test]
fn test_end_to_end_entity_url() {
    let post = Post {
        id: 7,
        title: "Hello".to_string(),
    };

    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(post_routes())
        .join(&post);

    assert_eq!(builder.uri().unwrap().path(), "/posts/7");
    assert_eq!(
        builder.clone().format("json").uri().unwrap().path(),
        "/posts/7.json"
    );

    let model = builder.model().unwrap();
    assert_eq!(model.route_key(), "posts");
    assert_eq!(model.route_param(), "7");
    assert_eq!(model.label(), "Hello");
}

#[test]
fn test_literal_join_extends_entity_path() {
    let post = Post {
        id: 7,
        title: "Hello".to_string(),
    };

    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(post_routes())
        .join(&post)
        .join("comments");

    assert_eq!(builder.uri().unwrap().path(), "/posts/7/comments");

    // A later plain-string join does not unbind the model.
    assert_eq!(builder.model().unwrap().route_param(), "7");
}

#[test]
fn test_join_all_preserves_segment_order() {
    let post = Post {
        id: 7,
        title: "Hello".to_string(),
    };

    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(post_routes())
        .join_all(&(post, "comments", 3));

    assert_eq!(builder.uri().unwrap().path(), "/posts/7/comments/3");
}

#[test]
fn test_entity_rule_beats_route_param() {
    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .join(&Draft { id: 4 });

    // Full entity contributes two fragments, not the single param.
    assert_eq!(builder.path(), "/drafts/4");
    assert!(builder.model().is_some());
}

#[test]
fn test_repeated_uri_does_not_stack_suffixes() {
    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(post_routes())
        .join("posts")
        .format("json");

    assert_eq!(builder.uri().unwrap().path(), "/posts.json");
    assert_eq!(builder.uri().unwrap().path(), "/posts.json");
}

#[test]
fn test_format_overwrite_and_clear() {
    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(post_routes())
        .join("posts");

    assert_eq!(
        builder.clone().format("xml").format("json").uri().unwrap().path(),
        "/posts.json"
    );
    assert_eq!(
        builder.clone().format("json").clear_format().uri().unwrap().path(),
        "/posts"
    );
}

#[test]
fn test_clones_extend_independently() {
    let base = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .join("posts");

    let seven = base.clone().join("7");
    let eight = base.clone().join("8").format("json");

    assert_eq!(base.path(), "/posts");
    assert_eq!(seven.path(), "/posts/7");
    assert_eq!(eight.path(), "/posts/8");
    assert_eq!(base.format_suffix(), None);
}

#[test]
fn test_validator_consulted_once_per_uri() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(route_fn(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }))
        .join("posts");

    builder.uri().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Clones share the validator; every materialization revalidates.
    let clone = builder.clone();
    clone.uri().unwrap();
    builder.uri().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_join_never_validates() {
    let nothing = RouteSet::new();
    let builder = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(nothing)
        .join("nope")
        .join("deeper");

    // Chaining stays infallible; only materialization checks routes.
    assert_eq!(builder.path(), "/nope/deeper");
    assert!(builder.uri().is_err());
}

#[test]
fn test_unresolved_route_error() {
    let result = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(post_routes())
        .join("nope")
        .uri();

    match result {
        Err(LinkError::UnresolvedRoute { path }) => assert_eq!(path, "/nope"),
        other => panic!("expected UnresolvedRoute, got {other:?}"),
    }

    let err = UrlBuilder::parse("https://example.test/")
        .unwrap()
        .with_validator(post_routes())
        .join("nope")
        .uri()
        .unwrap_err();
    assert_eq!(err.to_string(), "no route matches [/nope]");
}

#[rstest]
#[case("/posts", true)]
#[case("/posts/7", true)]
#[case("/posts/7.json", true)]
#[case("/posts.json", true)]
#[case("/posts/7/comments", true)]
#[case("/users", false)]
#[case("/users.json", false)]
fn test_route_set_matching(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(post_routes().matches(path), expected);
}

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    routes: RouteSet,
}

#[test]
fn test_route_set_from_toml() {
    let config: Config = toml::from_str(
        r#"
        routes = ["/posts", "/posts/:id", "/docs/*rest"]
        "#,
    )
    .unwrap();

    assert!(config.routes.matches("/posts/7"));
    assert!(config.routes.matches("/docs/guide/intro"));
    assert!(!config.routes.matches("/users"));

    let rendered = toml::to_string(&config).unwrap();
    let reloaded: Config = toml::from_str(&rendered).unwrap();
    assert!(reloaded.routes.matches("/posts/7"));
}
