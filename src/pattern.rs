//! URI template matching and rendering.
//!
//! Templates use `{param}` placeholders, e.g. `greeting://{name}` or
//! `/pets/{petId}`. Matching extracts the parameter values; rendering
//! substitutes them back in.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl UriTemplate {
    /// Parse a template string.
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            match rest[open..].find('}') {
                Some(close) => {
                    let name = &rest[open + 1..open + close];
                    segments.push(Segment::Param(name.to_string()));
                    rest = &rest[open + close + 1..];
                }
                None => {
                    // Unterminated placeholder, treat the remainder as literal.
                    segments.push(Segment::Literal(rest[open..].to_string()));
                    rest = "";
                }
            }
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Self {
            raw: template.to_string(),
            segments,
        }
    }

    /// The original template string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the template contains any parameters.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Parameter names in template order.
    pub fn params(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Match a concrete URI against the template.
    ///
    /// Parameter values stop at the next literal character (or the end of the
    /// URI) and are percent-decoded. Returns `None` if the URI does not fit.
    pub fn matches(&self, uri: &str) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();
        let mut rest = uri;
        let mut iter = self.segments.iter().peekable();

        while let Some(segment) = iter.next() {
            match segment {
                Segment::Literal(lit) => {
                    rest = rest.strip_prefix(lit.as_str())?;
                }
                Segment::Param(name) => {
                    let value = match iter.peek() {
                        Some(Segment::Literal(next)) => {
                            let end = rest.find(next.as_str())?;
                            let (value, remainder) = rest.split_at(end);
                            rest = remainder;
                            value
                        }
                        _ => {
                            let value = rest;
                            rest = "";
                            value
                        }
                    };
                    if value.is_empty() {
                        return None;
                    }
                    let decoded = percent_decode_str(value).decode_utf8_lossy();
                    params.insert(name.clone(), decoded.into_owned());
                }
            }
        }

        rest.is_empty().then_some(params)
    }

    /// Render the template with concrete parameter values.
    ///
    /// Missing parameters render as an empty string.
    pub fn render(&self, params: &HashMap<String, String>) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => lit.as_str(),
                Segment::Param(name) => params.get(name).map(String::as_str).unwrap_or(""),
            })
            .collect()
    }
}
