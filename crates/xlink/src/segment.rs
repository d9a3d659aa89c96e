//! Segment-to-fragment resolution.
//!
//! A [`Segment`] is anything that can contribute path fragments to a URL:
//! domain entities, collection names, identifiers, or plain strings. Each
//! segment is probed for its capabilities in a fixed precedence order and
//! resolved into one or two fragments (see [`resolve`]).

use std::borrow::Cow;
use std::sync::Arc;

/// A value that can contribute path fragments to a URL.
///
/// The three optional capabilities are probed in declaration order; the
/// first one a type provides decides how it is resolved:
///
/// 1. [`as_resource`](Segment::as_resource) — a full persisted entity,
///    resolved to its route key followed by its route param
///    (`["posts", "7"]`).
/// 2. [`route_key`](Segment::route_key) — a type-level collection name
///    with no instance identity, resolved to that single fragment.
/// 3. [`route_param`](Segment::route_param) — an identity-like string
///    without full entity backing, resolved to that single fragment.
/// 4. [`fallback`](Segment::fallback) — the plain string form, required,
///    used when nothing stronger is available.
///
/// Literals (`&str`, `String`, integers) implement only the fallback, so
/// they pass through unchanged and the DSL stays permissive.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use xlink::{Resource, Segment};
///
/// struct Post {
///     id: u64,
///     title: String,
/// }
///
/// impl Segment for Post {
///     fn as_resource(&self) -> Option<Resource<'_>> {
///         Some(Resource::new("posts", self.id.to_string()).with_label(&*self.title))
///     }
///
///     fn fallback(&self) -> Cow<'_, str> {
///         Cow::Owned(self.id.to_string())
///     }
/// }
/// ```
pub trait Segment {
    /// The full persisted-entity view, if this value has one.
    fn as_resource(&self) -> Option<Resource<'_>> {
        None
    }

    /// The type-level route key (collection name), if this value carries
    /// one without being a concrete entity.
    fn route_key(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// The identity-like route parameter, if this value carries one
    /// without being a full entity.
    fn route_param(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// The plain string form. Never fails; the last resort of the probe.
    fn fallback(&self) -> Cow<'_, str>;
}

/// Borrowed entity view produced by [`Segment::as_resource`].
///
/// `label` feeds link content rendering and defaults to the route param
/// when the entity has no display name.
#[derive(Debug, Clone)]
pub struct Resource<'a> {
    pub route_key: Cow<'a, str>,
    pub route_param: Cow<'a, str>,
    pub label: Cow<'a, str>,
}

impl<'a> Resource<'a> {
    /// Creates a resource view from a route key and a route param.
    pub fn new(
        route_key: impl Into<Cow<'a, str>>,
        route_param: impl Into<Cow<'a, str>>,
    ) -> Self {
        let route_param = route_param.into();

        Resource {
            route_key: route_key.into(),
            label: route_param.clone(),
            route_param,
        }
    }

    /// Overrides the display label.
    pub fn with_label(mut self, label: impl Into<Cow<'a, str>>) -> Self {
        self.label = label.into();
        self
    }
}

/// Owned snapshot of the entity most recently resolved by the full-entity
/// rule. Cheap to clone; observational, it does not own the entity itself.
#[derive(Debug, Clone)]
pub struct ModelRef {
    route_key: Arc<str>,
    route_param: Arc<str>,
    label: Arc<str>,
}

impl ModelRef {
    /// The collection name used in paths ("posts").
    pub fn route_key(&self) -> &str {
        &self.route_key
    }

    /// The identity fragment used in paths ("7").
    pub fn route_param(&self) -> &str {
        &self.route_param
    }

    /// The display label for link content.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<Resource<'_>> for ModelRef {
    fn from(resource: Resource<'_>) -> Self {
        ModelRef {
            route_key: Arc::from(resource.route_key.as_ref()),
            route_param: Arc::from(resource.route_param.as_ref()),
            label: Arc::from(resource.label.as_ref()),
        }
    }
}

/// Outcome of probing one segment.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// The full-entity rule matched: the segment contributes its route key
    /// followed by its route param, and binds the builder's model.
    Entity(ModelRef),
    /// A weaker rule matched: the segment contributes one fragment.
    Fragment(String),
}

/// Resolves one segment by the precedence-ordered capability probe.
///
/// First match wins: full entity, then route key, then route param, then
/// the plain string fallback. A value satisfying several capabilities
/// resolves by the strongest one.
///
/// # Examples
///
/// ```
/// use xlink::segment::{resolve, Resolved};
///
/// match resolve("comments") {
///     Resolved::Fragment(fragment) => assert_eq!(fragment, "comments"),
///     Resolved::Entity(_) => unreachable!("literals have no entity view"),
/// }
/// ```
pub fn resolve<S: Segment + ?Sized>(segment: &S) -> Resolved {
    if let Some(resource) = segment.as_resource() {
        return Resolved::Entity(ModelRef::from(resource));
    }

    if let Some(route_key) = segment.route_key() {
        return Resolved::Fragment(route_key.into_owned());
    }

    if let Some(route_param) = segment.route_param() {
        return Resolved::Fragment(route_param.into_owned());
    }

    Resolved::Fragment(segment.fallback().into_owned())
}

// ============================================================================
// Literal Implementations
// ============================================================================

impl Segment for str {
    fn fallback(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Segment for String {
    fn fallback(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Segment for Cow<'_, str> {
    fn fallback(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl<T: Segment + ?Sized> Segment for &T {
    fn as_resource(&self) -> Option<Resource<'_>> {
        (**self).as_resource()
    }

    fn route_key(&self) -> Option<Cow<'_, str>> {
        (**self).route_key()
    }

    fn route_param(&self) -> Option<Cow<'_, str>> {
        (**self).route_param()
    }

    fn fallback(&self) -> Cow<'_, str> {
        (**self).fallback()
    }
}

macro_rules! impl_segment_for_integers {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Segment for $ty {
                fn fallback(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}

impl_segment_for_integers!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// ============================================================================
// Variadic Joins
// ============================================================================

/// A fixed-size list of segments, resolved left to right by
/// [`UrlBuilder::join_all`](crate::UrlBuilder::join_all).
///
/// Implemented for tuples of one to eight segments.
pub trait SegmentList {
    /// The segments in input order.
    fn segments(&self) -> Vec<&dyn Segment>;
}

macro_rules! impl_segment_list {
    ($(($($name:ident),+)),+ $(,)?) => {
        $(
            impl<$($name: Segment),+> SegmentList for ($($name,)+) {
                fn segments(&self) -> Vec<&dyn Segment> {
                    #[allow(non_snake_case)]
                    let ($($name,)+) = self;
                    vec![$($name as &dyn Segment),+]
                }
            }
        )+
    };
}

impl_segment_list!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
);
