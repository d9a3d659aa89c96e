// File: src/anchor.rs
// Purpose: Anchor rendering for builder and segment-list targets

use std::fmt::Write;

use maud::{html, Escaper, Markup, PreEscaped};
use tracing::debug;
use xlink::{ModelRef, Result, Segment, UrlBuilder};

use crate::context::LinkContext;

const DEFAULT_CONFIRM: &str = "Are you sure?";

/// What a link points at.
pub enum LinkTarget<'a> {
    /// Nothing to link; [`LinkContext::link_to`] renders empty markup.
    None,
    /// An already-chained builder, used as-is with its own validator.
    Builder(UrlBuilder),
    /// Raw segments, joined onto the request base in order.
    Segments(Vec<&'a dyn Segment>),
}

impl Default for LinkTarget<'_> {
    fn default() -> Self {
        LinkTarget::None
    }
}

impl From<UrlBuilder> for LinkTarget<'_> {
    fn from(builder: UrlBuilder) -> Self {
        LinkTarget::Builder(builder)
    }
}

/// What goes inside the anchor.
pub enum LinkContent<'a> {
    /// No content; the href text becomes the link body.
    None,
    /// Pre-rendered markup, used verbatim.
    Markup(Markup),
    /// Content produced from the bound model. Degrades to the href text
    /// when the target never bound one.
    WithModel(Box<dyn Fn(&ModelRef) -> Markup + 'a>),
}

impl<'a> LinkContent<'a> {
    /// Plain-text content, escaped on render.
    pub fn text(value: impl AsRef<str>) -> Self {
        LinkContent::Markup(html! { (value.as_ref()) })
    }

    /// Pre-rendered markup content.
    pub fn markup(markup: Markup) -> Self {
        LinkContent::Markup(markup)
    }

    /// Content rendered from the link's bound model.
    pub fn with_model(render: impl Fn(&ModelRef) -> Markup + 'a) -> Self {
        LinkContent::WithModel(Box::new(render))
    }
}

impl Default for LinkContent<'_> {
    fn default() -> Self {
        LinkContent::None
    }
}

/// Ordered attribute bag for rendered anchors.
///
/// Writing a name that is already present replaces its value in place, so
/// later writers win while the original position is kept.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name.into(), value.into());
        self
    }

    /// Fold another bag into this one, later values winning.
    pub fn merge(mut self, other: Attrs) -> Self {
        for (name, value) in other.pairs {
            self.set(name, value);
        }
        self
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn set(&mut self, name: String, value: String) {
        if let Some(pair) = self.pairs.iter_mut().find(|pair| pair.0 == name) {
            pair.1 = value;
        } else {
            self.pairs.push((name, value));
        }
    }
}

impl LinkContext {
    /// Render an anchor for the target.
    ///
    /// An absent target renders nothing. Otherwise the target is resolved
    /// to a validated URL, the href is the bare path when the link's host
    /// equals the request host and the full URL otherwise, and the body
    /// comes from the content (falling back to the href text).
    pub fn link_to(
        &self,
        target: LinkTarget<'_>,
        content: LinkContent<'_>,
        attrs: Attrs,
    ) -> Result<Markup> {
        if matches!(target, LinkTarget::None) {
            return Ok(PreEscaped(String::new()));
        }

        let builder = self.target_builder(target)?;
        self.render_link(builder, content, attrs)
    }

    /// Alias for [`link_to`](LinkContext::link_to).
    pub fn show(
        &self,
        target: LinkTarget<'_>,
        content: LinkContent<'_>,
        attrs: Attrs,
    ) -> Result<Markup> {
        self.link_to(target, content, attrs)
    }

    /// Render an anchor to the target's edit page.
    ///
    /// Appends a final `edit` segment; an absent target edits whatever the
    /// current request points at.
    pub fn edit(
        &self,
        target: LinkTarget<'_>,
        content: LinkContent<'_>,
        attrs: Attrs,
    ) -> Result<Markup> {
        let builder = self.target_builder(target)?.join("edit");
        self.render_link(builder, content, attrs)
    }

    /// Render an anchor to the target's creation page.
    ///
    /// Appends a final `new` segment; an absent target creates under
    /// whatever the current request points at.
    pub fn create(
        &self,
        target: LinkTarget<'_>,
        content: LinkContent<'_>,
        attrs: Attrs,
    ) -> Result<Markup> {
        let builder = self.target_builder(target)?.join("new");
        self.render_link(builder, content, attrs)
    }

    /// Render a destructive-action anchor.
    ///
    /// The segments stay untouched; the anchor gains
    /// `data-turbo-method="delete"` and a `data-turbo-confirm` prompt.
    /// Caller attributes are merged on top, so passing your own
    /// `data-turbo-confirm` replaces the default prompt.
    pub fn destroy(
        &self,
        target: LinkTarget<'_>,
        content: LinkContent<'_>,
        attrs: Attrs,
    ) -> Result<Markup> {
        let attrs = Attrs::new()
            .with("data-turbo-method", "delete")
            .with("data-turbo-confirm", DEFAULT_CONFIRM)
            .merge(attrs);

        self.link_to(target, content, attrs)
    }

    fn target_builder(&self, target: LinkTarget<'_>) -> Result<UrlBuilder> {
        match target {
            LinkTarget::None => self.url(),
            LinkTarget::Builder(builder) => Ok(builder),
            LinkTarget::Segments(segments) => {
                let mut builder = self.url()?;
                for segment in segments {
                    builder = builder.join(segment);
                }
                Ok(builder)
            }
        }
    }

    fn render_link(
        &self,
        builder: UrlBuilder,
        content: LinkContent<'_>,
        attrs: Attrs,
    ) -> Result<Markup> {
        let uri = builder.uri()?;

        let href = if self.host()? == uri.host_str() {
            uri.path().to_string()
        } else {
            uri.to_string()
        };

        let body = match content {
            LinkContent::WithModel(render) => match builder.model() {
                Some(model) => render(model),
                None => {
                    debug!("model content for modelless link {href}");
                    text(&href)
                }
            },
            LinkContent::Markup(markup) => markup,
            LinkContent::None => text(&href),
        };

        Ok(render_anchor(&href, &attrs, &body))
    }
}

fn text(value: &str) -> Markup {
    html! { (value) }
}

/// Assemble the anchor by hand: attribute names are dynamic, which the
/// `html!` macro cannot express. Names come from caller code, not user
/// input; values and the href are escaped.
fn render_anchor(href: &str, attrs: &Attrs, body: &Markup) -> Markup {
    let mut out = String::new();

    out.push_str("<a href=\"");
    escape_into(&mut out, href);
    out.push('"');

    for (name, value) in attrs.iter() {
        // The computed href always wins over a caller-supplied one.
        if name == "href" {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(&mut out, value);
        out.push('"');
    }

    out.push('>');
    out.push_str(&body.0);
    out.push_str("</a>");

    PreEscaped(out)
}

fn escape_into(out: &mut String, value: &str) {
    // Writing into a String cannot fail.
    let _ = Escaper::new(out).write_str(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_keep_insertion_order() {
        let attrs = Attrs::new().with("class", "btn").with("rel", "nofollow");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("class", "btn"), ("rel", "nofollow")]);
    }

    #[test]
    fn test_attrs_overwrite_in_place() {
        let attrs = Attrs::new()
            .with("data-turbo-confirm", DEFAULT_CONFIRM)
            .with("class", "btn")
            .merge(Attrs::new().with("data-turbo-confirm", "Delete this post?"));

        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("data-turbo-confirm", "Delete this post?"),
                ("class", "btn"),
            ]
        );
    }

    #[test]
    fn test_render_anchor_escapes_href_and_values() {
        let markup = render_anchor(
            "/posts?a=1&b=2",
            &Attrs::new().with("title", "a<b>"),
            &html! { "Read" },
        );
        assert_eq!(
            markup.into_string(),
            "<a href=\"/posts?a=1&amp;b=2\" title=\"a&lt;b&gt;\">Read</a>"
        );
    }

    #[test]
    fn test_render_anchor_ignores_caller_href() {
        let markup = render_anchor(
            "/posts",
            &Attrs::new().with("href", "/elsewhere"),
            &html! { "x" },
        );
        assert_eq!(markup.into_string(), "<a href=\"/posts\">x</a>");
    }
}
