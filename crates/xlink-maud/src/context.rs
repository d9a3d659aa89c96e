// File: src/context.rs
// Purpose: Request-scoped URL helpers backed by a memoized base builder

use std::sync::Arc;

use once_cell::unsync::OnceCell;
use xlink::{AnyRoute, Result, RouteValidator, UrlBuilder};

/// Request-scoped link helpers.
///
/// Holds the current request URL and parses it into a base [`UrlBuilder`]
/// once, on first use. Every [`url()`](LinkContext::url) call clones that
/// base, so chains started from the same context never leak into one
/// another. Build one context per request.
#[derive(Clone)]
pub struct LinkContext {
    raw: String,
    validator: Arc<dyn RouteValidator>,
    base: OnceCell<UrlBuilder>,
}

impl std::fmt::Debug for LinkContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkContext")
            .field("raw", &self.raw)
            .field("parsed", &self.base.get().is_some())
            .finish()
    }
}

impl LinkContext {
    /// Create a context from the current request URL.
    ///
    /// The default validator accepts every path; inject the application's
    /// route table with [`with_validator`](LinkContext::with_validator).
    pub fn new(request_url: impl Into<String>) -> Self {
        Self {
            raw: request_url.into(),
            validator: Arc::new(AnyRoute),
            base: OnceCell::new(),
        }
    }

    /// Replace the routing authority carried by every builder handed out.
    pub fn with_validator(self, validator: impl RouteValidator + 'static) -> Self {
        self.with_shared_validator(Arc::new(validator))
    }

    /// Replace the routing authority with an already-shared one.
    pub fn with_shared_validator(mut self, validator: Arc<dyn RouteValidator>) -> Self {
        self.validator = validator;
        // Drop any base parsed under the previous validator.
        self.base.take();
        self
    }

    /// A fresh builder seeded from the request URL.
    pub fn url(&self) -> Result<UrlBuilder> {
        Ok(self.base()?.clone())
    }

    /// The current request path.
    pub fn path(&self) -> Result<&str> {
        Ok(self.base()?.path())
    }

    /// The current request host, if the request URL carries one.
    pub fn host(&self) -> Result<Option<&str>> {
        Ok(self.base()?.as_url().host_str())
    }

    fn base(&self) -> Result<&UrlBuilder> {
        self.base.get_or_try_init(|| {
            UrlBuilder::parse(&self.raw)
                .map(|base| base.with_shared_validator(Arc::clone(&self.validator)))
        })
    }
}
