// xlink-maud - Maud adapter for xlink
// Renders validated links as anchor elements and exposes request-scoped helpers

pub mod anchor;
pub mod context;

// Re-export the rendering surface
pub use anchor::{Attrs, LinkContent, LinkTarget};
pub use context::LinkContext;

// Re-export Maud for link content
pub use maud::{html, Markup, PreEscaped};

// Re-export the core crate and its commonly used types
pub use xlink;
pub use xlink::{LinkError, ModelRef, Resource, Result, Segment, UrlBuilder};
