//! HTML Sanitizer
//!
//! Fetched pages are cleaned before they are written to the document or shown.
//! Scripts, styles, event-handler attributes and `javascript:` links are
//! removed by ammonia's defaults. Extra tags and attributes can be allowed
//! through configuration, but scripting tags, embedded documents and `on*`
//! attributes never are.

use std::collections::BTreeSet;

/// Tags that run code or load another document; never allowed.
const FORBIDDEN_TAGS: &[&str] = &["script", "style", "iframe", "frame", "object", "embed"];

/// `rel` is managed by ammonia itself; `srcdoc` carries a whole document.
const FORBIDDEN_ATTRIBUTES: &[&str] = &["rel", "srcdoc"];

pub trait Sanitizer: Send + Sync {
    /// Remove executable/active content, returning safe-to-store markup
    fn sanitize(&self, html: &str) -> String;
}

/// ammonia-backed sanitizer
#[derive(Debug, Clone, Default)]
pub struct HtmlSanitizer {
    extra_tags: BTreeSet<String>,
    extra_attributes: BTreeSet<String>,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizer that also keeps `tags` and `attributes`
    pub fn with_allowances<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let mut extra_tags = BTreeSet::new();
        for tag in tags {
            let tag = tag.as_ref().trim().to_ascii_lowercase();
            if tag.is_empty() {
                continue;
            }
            if FORBIDDEN_TAGS.contains(&tag.as_str()) {
                tracing::warn!("Refusing to allow <{}> through the sanitizer", tag);
                continue;
            }
            extra_tags.insert(tag);
        }

        let mut extra_attributes = BTreeSet::new();
        for attribute in attributes {
            let attribute = attribute.as_ref().trim().to_ascii_lowercase();
            if attribute.is_empty() {
                continue;
            }
            if attribute.starts_with("on") || FORBIDDEN_ATTRIBUTES.contains(&attribute.as_str()) {
                tracing::warn!("Refusing to allow attribute {:?} through the sanitizer", attribute);
                continue;
            }
            extra_attributes.insert(attribute);
        }

        Self {
            extra_tags,
            extra_attributes,
        }
    }

    pub fn extra_tags(&self) -> impl Iterator<Item = &str> {
        self.extra_tags.iter().map(String::as_str)
    }

    pub fn extra_attributes(&self) -> impl Iterator<Item = &str> {
        self.extra_attributes.iter().map(String::as_str)
    }
}

impl Sanitizer for HtmlSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let mut builder = ammonia::Builder::default();
        builder
            .add_tags(self.extra_tags.iter().map(String::as_str))
            .add_generic_attributes(self.extra_attributes.iter().map(String::as_str));
        builder.clean(html).to_string()
    }
}
