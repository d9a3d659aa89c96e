//! The chainable URL builder.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::error::{LinkError, Result};
use crate::route::{AnyRoute, RouteValidator};
use crate::segment::{self, ModelRef, Resolved, Segment, SegmentList};

/// A cloneable, chainable URL builder with deferred route validation.
///
/// Every chain method consumes the builder and returns a new one; cloning
/// yields a fully independent copy. The accumulated URL is only exposed
/// through [`uri()`](UrlBuilder::uri), which appends the format suffix (if
/// any) and asks the injected [`RouteValidator`] whether the resulting
/// path exists — an unrecognized path is an error, never a silent link to
/// nowhere.
///
/// # Examples
///
/// ```
/// use xlink::{route_fn, UrlBuilder};
///
/// let url = UrlBuilder::parse("https://example.test/")
///     .unwrap()
///     .with_validator(route_fn(|path: &str| path.starts_with("/posts")))
///     .join("posts")
///     .join(&7)
///     .uri()
///     .unwrap();
///
/// assert_eq!(url.path(), "/posts/7");
/// ```
#[derive(Clone)]
pub struct UrlBuilder {
    base: Url,
    format: Option<String>,
    model: Option<ModelRef>,
    validator: Arc<dyn RouteValidator>,
}

impl UrlBuilder {
    /// Parses a raw absolute URL string into a builder.
    ///
    /// The default validator accepts every path; inject a real one with
    /// [`with_validator`](UrlBuilder::with_validator).
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_url(Url::parse(raw)?)
    }

    /// Builds from an already-parsed URL.
    ///
    /// Fails with [`LinkError::OpaqueBase`] when the URL cannot carry path
    /// segments (`mailto:`, `data:`, …), since such a base can never grow
    /// a route path.
    pub fn from_url(url: Url) -> Result<Self> {
        if url.cannot_be_a_base() {
            return Err(LinkError::OpaqueBase {
                url: url.to_string(),
            });
        }

        Ok(UrlBuilder {
            base: url,
            format: None,
            model: None,
            validator: Arc::new(AnyRoute),
        })
    }

    /// Injects the routing authority consulted by [`uri()`](UrlBuilder::uri).
    pub fn with_validator(mut self, validator: impl RouteValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Injects an already-shared routing authority.
    pub fn with_shared_validator(mut self, validator: Arc<dyn RouteValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Resolves one segment and appends its fragment(s) to the path.
    ///
    /// A full entity contributes its route key then its route param and
    /// becomes the builder's bound model; weaker segments contribute one
    /// fragment each (see [`segment::resolve`]). Fragments are
    /// percent-encoded as path segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use xlink::UrlBuilder;
    ///
    /// let builder = UrlBuilder::parse("https://example.test/")
    ///     .unwrap()
    ///     .join("posts")
    ///     .join(&7);
    ///
    /// assert_eq!(builder.path(), "/posts/7");
    /// ```
    pub fn join<S: Segment + ?Sized>(mut self, segment: &S) -> Self {
        match segment::resolve(segment) {
            Resolved::Entity(model) => {
                self.push_fragment(model.route_key());
                self.push_fragment(model.route_param());
                debug!("bound model {}/{}", model.route_key(), model.route_param());
                self.model = Some(model);
            }
            Resolved::Fragment(fragment) => self.push_fragment(&fragment),
        }

        self
    }

    /// Resolves a tuple of segments left to right. Equivalent to chained
    /// [`join`](UrlBuilder::join) calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use xlink::UrlBuilder;
    ///
    /// let builder = UrlBuilder::parse("https://example.test/")
    ///     .unwrap()
    ///     .join_all(&("posts", 7, "comments"));
    ///
    /// assert_eq!(builder.path(), "/posts/7/comments");
    /// ```
    pub fn join_all<L: SegmentList + ?Sized>(mut self, list: &L) -> Self {
        for segment in list.segments() {
            self = self.join(segment);
        }

        self
    }

    /// Remembers a format suffix (file extension, no leading dot) to
    /// append to the path when the URL is materialized. Overwrites any
    /// previously set suffix.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Drops the format suffix.
    pub fn clear_format(mut self) -> Self {
        self.format = None;
        self
    }

    /// Replaces the scheme.
    pub fn scheme(mut self, scheme: &str) -> Result<Self> {
        self.base
            .set_scheme(scheme)
            .map_err(|_| LinkError::Component { field: "scheme" })?;
        Ok(self)
    }

    /// Replaces the host.
    pub fn host(mut self, host: &str) -> Result<Self> {
        self.base.set_host(Some(host))?;
        Ok(self)
    }

    /// Sets or clears the port.
    pub fn port(mut self, port: Option<u16>) -> Result<Self> {
        self.base
            .set_port(port)
            .map_err(|_| LinkError::Component { field: "port" })?;
        Ok(self)
    }

    /// Sets or clears the query string (without the leading `?`).
    pub fn query(mut self, query: Option<&str>) -> Self {
        self.base.set_query(query);
        self
    }

    /// The entity most recently resolved by a join, if any.
    ///
    /// Never cleared: a later plain-string join leaves the earlier entity
    /// in place for the builder's whole lifetime.
    pub fn model(&self) -> Option<&ModelRef> {
        self.model.as_ref()
    }

    /// The accumulated path, unvalidated and without the format suffix.
    pub fn path(&self) -> &str {
        self.base.path()
    }

    /// The pending format suffix, if any.
    pub fn format_suffix(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// The accumulated URL state, unvalidated and without the format
    /// suffix.
    pub fn as_url(&self) -> &Url {
        &self.base
    }

    /// Materializes the final URL.
    ///
    /// Clones the accumulated URL, appends `.{format}` to the path if a
    /// suffix is set, then consults the validator with the resulting path
    /// exactly once. Returns an independent snapshot on success; fails
    /// with [`LinkError::UnresolvedRoute`] when the path matches no
    /// registered route. Repeated calls re-validate — results are never
    /// cached.
    pub fn uri(&self) -> Result<Url> {
        let mut url = self.base.clone();

        if let Some(format) = &self.format {
            let suffixed = format!("{}.{}", url.path(), format);
            url.set_path(&suffixed);
        }

        if !self.validator.matches(url.path()) {
            debug!("no route matches [{}]", url.path());
            return Err(LinkError::UnresolvedRoute {
                path: url.path().to_string(),
            });
        }

        debug!("resolved {url}");
        Ok(url)
    }

    fn push_fragment(&mut self, fragment: &str) {
        // Constructors reject opaque bases, so the segment writer is
        // always available.
        if let Ok(mut segments) = self.base.path_segments_mut() {
            segments.pop_if_empty().push(fragment);
        }
    }
}

impl fmt::Debug for UrlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlBuilder")
            .field("base", &self.base.as_str())
            .field("format", &self.format)
            .field("model", &self.model)
            .finish()
    }
}
