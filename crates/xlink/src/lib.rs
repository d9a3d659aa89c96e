//! # xlink
//!
//! A chainable URL-building library with route validation, supporting:
//! - Immutable builder API (`join`, `format`, `uri`) over absolute URLs
//! - Capability-probed segments: entities, route keys, route params, literals
//! - Pluggable route validation, consulted once per materialized URL
//! - A route table with dynamic parameters (`/posts/:id`), optional
//!   parameters (`/posts/:id?`), and catch-alls (`/docs/*slug`)
//!
//! ## Building URLs
//!
//! Every chain method consumes the builder and returns a new one, so a
//! builder can be cloned at any point and each copy extended independently.
//! Nothing is validated while chaining; only [`UrlBuilder::uri`] consults
//! the route table, and an unrecognized path surfaces as
//! [`LinkError::UnresolvedRoute`] instead of a broken link.
//!
//! ## Segments
//!
//! `join` accepts anything implementing [`Segment`]. Resolution probes the
//! segment's capabilities in a fixed order: a full entity (one providing a
//! [`Resource`] view) contributes its route key followed by its route param
//! and becomes the builder's bound model; a type exposing only a collection
//! name or only an identifier contributes that single fragment; everything
//! else falls back to its string form. Strings and integers come with
//! fallback-only implementations out of the box.
//!
//! ## Example
//!
//! ```
//! use xlink::{RouteSet, UrlBuilder};
//!
//! let routes = RouteSet::new()
//!     .with_route("/posts")
//!     .with_route("/posts/:id");
//!
//! let builder = UrlBuilder::parse("https://example.test/")
//!     .unwrap()
//!     .with_validator(routes)
//!     .join("posts")
//!     .join(&7);
//!
//! assert_eq!(builder.uri().unwrap().path(), "/posts/7");
//! assert_eq!(
//!     builder.format("json").uri().unwrap().path(),
//!     "/posts/7.json",
//! );
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod builder;
pub mod error;
pub mod route;
pub mod segment;

// Re-export the public surface at the crate root
pub use builder::UrlBuilder;
pub use error::{LinkError, Result};
pub use route::{route_fn, AnyRoute, RouteFn, RoutePattern, RouteSet, RouteValidator};
pub use segment::{ModelRef, Resolved, Resource, Segment, SegmentList};
