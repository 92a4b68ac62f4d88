//! Dotted field paths addressing the location of a validation failure.

use std::fmt;

/// One step in a field path.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Addressable pointer into a resource document, e.g.
/// `spec.controlPlaneRef.konnectID` or `spec.tags[3]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Start a path at a top-level field.
    pub fn root(field: &str) -> Self {
        Self {
            segments: vec![Segment::Field(field.to_string())],
        }
    }

    /// Path rooted at `spec`, where every validated field lives.
    pub fn spec() -> Self {
        Self::root("spec")
    }

    /// Append a named child field.
    pub fn child(mut self, field: &str) -> Self {
        self.segments.push(Segment::Field(field.to_string()));
        self
    }

    /// Append a list index.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
