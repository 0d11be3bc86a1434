//! `{field}` interpolation templates for method bodies.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::Result;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A pre-split text template such as `"{name} is a {age}-year-old {breed}"`.
///
/// Anything that is not a `{identifier}` placeholder is kept literally,
/// including stray braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(&source) {
            let whole = caps.get(0).expect("group 0 always matches");
            if whole.start() > last {
                segments.push(Segment::Literal(source[last..whole.start()].to_string()));
            }
            segments.push(Segment::Field(caps[1].to_string()));
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_string()));
        }
        Self { source, segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Field names referenced, in order of appearance (duplicates kept).
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes each placeholder with `lookup(name)`; the first failed
    /// lookup aborts the render.
    pub fn render<F>(&self, mut lookup: F) -> Result<String>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => out.push_str(&lookup(name)?),
            }
        }
        Ok(out)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn lookup(name: &str) -> Result<String> {
        match name {
            "name" => Ok("Buddy".to_string()),
            "age" => Ok("3".to_string()),
            "breed" => Ok("Golden Retriever".to_string()),
            other => Err(Error::MissingField {
                type_name: "Dog".to_string(),
                field: other.to_string(),
            }),
        }
    }

    #[test]
    fn interpolates_in_order() {
        let t = Template::new("{name} is a {age}-year-old {breed}");
        assert_eq!(t.render(lookup).unwrap(), "Buddy is a 3-year-old Golden Retriever");
        assert_eq!(t.fields().collect::<Vec<_>>(), ["name", "age", "breed"]);
    }

    #[test]
    fn keeps_non_placeholder_braces() {
        let t = Template::new("{name} says: {} {1x} {Woof!");
        assert_eq!(t.render(lookup).unwrap(), "Buddy says: {} {1x} {Woof!");
    }

    #[test]
    fn plain_text_has_no_fields() {
        let t = Template::new("Woof!");
        assert_eq!(t.fields().count(), 0);
        assert_eq!(t.render(lookup).unwrap(), "Woof!");
    }

    #[test]
    fn unknown_placeholder_fails() {
        let t = Template::new("{name} is {color}");
        let err = t.render(lookup).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field, .. } if field == "color"));
    }

    #[test]
    fn serializes_as_source_text() {
        let t = Template::new("{name} makes a sound");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"{name} makes a sound\"");
    }
}
