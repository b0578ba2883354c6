use std::fmt;

use super::error::DocumentError;

/// Hierarchical document address made of alternating collection and document ids,
/// e.g. `menu/<owner>/<category>/menus`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Address a top-level document.
    pub fn root(collection: &str, id: &str) -> Result<Self, DocumentError> {
        Self::from_segments(vec![collection.to_string(), id.to_string()])
    }

    /// Address a document in a sub-collection of this one.
    pub fn child(&self, collection: &str, id: &str) -> Result<Self, DocumentError> {
        let mut segments = self.segments.clone();
        segments.push(collection.to_string());
        segments.push(id.to_string());
        Self::from_segments(segments)
    }

    /// Parse a `/`-joined path.
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        Self::from_segments(raw.split('/').map(str::to_string).collect())
    }

    fn from_segments(segments: Vec<String>) -> Result<Self, DocumentError> {
        if segments.is_empty() || segments.len() % 2 != 0 {
            return Err(DocumentError::InvalidPath(format!(
                "expected an even number of segments, got {}",
                segments.len()
            )));
        }
        for segment in &segments {
            Self::check_segment(segment)?;
        }
        Ok(Self { segments })
    }

    /// Check that `segment` can be used as one collection or document id.
    pub fn check_segment(segment: &str) -> Result<(), DocumentError> {
        if segment.trim().is_empty() {
            return Err(DocumentError::InvalidPath("empty segment".into()));
        }
        if segment.contains('/') {
            return Err(DocumentError::InvalidPath(format!(
                "segment '{segment}' contains '/'"
            )));
        }
        if segment == "." || segment == ".." {
            return Err(DocumentError::InvalidPath(format!(
                "segment '{segment}' is reserved"
            )));
        }
        if segment.chars().any(|c| c.is_control()) {
            return Err(DocumentError::InvalidPath(
                "segment contains control characters".into(),
            ));
        }
        Ok(())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Debug for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentPath({self})")
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
