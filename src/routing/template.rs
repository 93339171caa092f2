//! Path templates.
//!
//! # Responsibilities
//! - Parse a pattern like `/animes/genre/:genre` into literal and
//!   placeholder segments
//! - Translate a pattern into axum's `{name}` route syntax
//! - Render segments with concrete parameter values
//!
//! # Design Decisions
//! - Substitution works per segment, never by substring search, so
//!   `:id` cannot clobber part of `:identifier`
//! - A placeholder with no value renders as its literal `:name` token

use std::collections::HashMap;

/// Marks a placeholder segment in a pattern.
pub const PARAM_SENTINEL: char = ':';

/// One slash-delimited piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
}

/// A pattern split into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> PathTemplate<'a> {
    pub fn parse(pattern: &'a str) -> Self {
        let trimmed = pattern.strip_prefix('/').unwrap_or(pattern);
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed
                .split('/')
                .map(|raw| match raw.strip_prefix(PARAM_SENTINEL) {
                    Some(name) if !name.is_empty() => Segment::Param(name),
                    _ => Segment::Literal(raw),
                })
                .collect()
        };
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Names of all placeholders, in pattern order.
    pub fn params(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    /// Route path for axum, e.g. `/anime/{id}`.
    pub fn axum_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => {
                    path.push('{');
                    path.push_str(name);
                    path.push('}');
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// Each segment's output text. Values are returned raw; the
    /// caller is responsible for encoding them into a URL.
    pub fn render<'v>(&'v self, values: &'v HashMap<String, String>) -> Vec<RenderedSegment<'v>> {
        self.segments
            .iter()
            .map(|segment| match *segment {
                Segment::Literal(text) => RenderedSegment::Literal(text),
                Segment::Param(name) => match values.get(name) {
                    Some(value) => RenderedSegment::Value(value.as_str()),
                    None => RenderedSegment::Unbound(name),
                },
            })
            .collect()
    }
}

/// Output of [`PathTemplate::render`] for a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderedSegment<'v> {
    Literal(&'v str),
    Value(&'v str),
    /// Placeholder with no supplied value.
    Unbound(&'v str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let template = PathTemplate::parse("/animes/az-list/:letter");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("animes"),
                Segment::Literal("az-list"),
                Segment::Param("letter"),
            ]
        );
        assert_eq!(template.params().collect::<Vec<_>>(), vec!["letter"]);
    }

    #[test]
    fn test_lone_sentinel_is_literal() {
        let template = PathTemplate::parse("/odd/:");
        assert_eq!(template.segments()[1], Segment::Literal(":"));
        assert_eq!(template.params().count(), 0);
    }

    #[test]
    fn test_axum_path() {
        assert_eq!(PathTemplate::parse("/anime/:id").axum_path(), "/anime/{id}");
        assert_eq!(PathTemplate::parse("/home").axum_path(), "/home");
        assert_eq!(PathTemplate::parse("").axum_path(), "/");
    }

    #[test]
    fn test_render_is_per_segment() {
        let template = PathTemplate::parse("/:id/:identifier");
        let values = HashMap::from([("id".to_string(), "7".to_string())]);

        assert_eq!(
            template.render(&values),
            vec![RenderedSegment::Value("7"), RenderedSegment::Unbound("identifier")]
        );
    }
}
