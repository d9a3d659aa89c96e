//! Error types for URL construction and route validation.

use thiserror::Error;

/// Errors produced while building or materializing a URL.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The input string is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    Parse(#[from] url::ParseError),

    /// The URL is opaque (e.g. `mailto:`, `data:`) and can never carry
    /// path segments, so a builder over it would be useless.
    #[error("URL cannot carry path segments: {url}")]
    OpaqueBase { url: String },

    /// A URL component setter rejected its value.
    #[error("invalid URL {field}")]
    Component { field: &'static str },

    /// The materialized path did not match any registered route.
    #[error("no route matches [{path}]")]
    UnresolvedRoute { path: String },
}

impl LinkError {
    /// The failing path of an `UnresolvedRoute`, if that is what this is.
    pub fn unresolved_path(&self) -> Option<&str> {
        match self {
            LinkError::UnresolvedRoute { path } => Some(path),
            _ => None,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LinkError>;
