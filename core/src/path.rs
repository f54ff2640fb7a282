//! Endpoint path builder.
//!
//! # Design
//! A path is assembled from an ordered list of segments, each either a
//! literal (trusted, appended verbatim) or a value (rendered through
//! `Display` and percent-encoded). The rendered string is computed once at
//! construction, so an `EndpointPath` is an immutable value that can be built
//! once and reused or joined with other paths.
//!
//! Absent values (`None`) contribute nothing to the rendered path rather than
//! failing; `"/users/" + None` renders the same as `"/users/"`.

use std::fmt;
use std::ops::Add;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in value positions: everything but the RFC 3986
/// unreserved set (`A-Z a-z 0-9 - . _ ~`).
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One piece of an endpoint path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Appended as-is. The caller is trusted to supply valid path syntax.
    Literal(String),
    /// Percent-encoded before being appended; `None` is skipped.
    Value(Option<String>),
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    pub fn value<V: fmt::Display>(value: V) -> Self {
        Segment::Value(Some(value.to_string()))
    }

    pub fn optional<V: fmt::Display>(value: Option<V>) -> Self {
        Segment::Value(value.map(|v| v.to_string()))
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Segment::Literal(text) => out.push_str(text),
            Segment::Value(Some(text)) => {
                out.extend(utf8_percent_encode(text, VALUE_ENCODE_SET));
            }
            Segment::Value(None) => {}
        }
    }
}

/// A URL path (and optional query) fragment whose interpolated values are
/// guaranteed to be percent-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EndpointPath {
    rendered: String,
}

impl EndpointPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// A path made of a single literal fragment.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            rendered: text.into(),
        }
    }

    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        segments.into_iter().fold(Self::new(), Self::segment)
    }

    pub fn segment(mut self, segment: Segment) -> Self {
        segment.render_into(&mut self.rendered);
        self
    }

    /// Append literal text.
    pub fn lit(self, text: impl Into<String>) -> Self {
        self.segment(Segment::literal(text))
    }

    /// Append the encoded textual form of `value`.
    pub fn value<V: fmt::Display>(self, value: V) -> Self {
        self.segment(Segment::value(value))
    }

    /// Append the encoded textual form of `value`, or nothing when absent.
    pub fn opt<V: fmt::Display>(self, value: Option<V>) -> Self {
        self.segment(Segment::optional(value))
    }

    /// Concatenate `other` onto this path.
    pub fn join(mut self, other: &EndpointPath) -> Self {
        self.rendered.push_str(&other.rendered);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    pub fn into_string(self) -> String {
        self.rendered
    }
}

impl fmt::Display for EndpointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl AsRef<str> for EndpointPath {
    fn as_ref(&self) -> &str {
        &self.rendered
    }
}

impl From<&str> for EndpointPath {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for EndpointPath {
    fn from(text: String) -> Self {
        Self::literal(text)
    }
}

impl Add for EndpointPath {
    type Output = EndpointPath;

    fn add(self, rhs: EndpointPath) -> EndpointPath {
        self.join(&rhs)
    }
}

impl FromIterator<Segment> for EndpointPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}
