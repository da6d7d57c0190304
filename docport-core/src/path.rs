//! Slash-delimited addresses for collections and documents.
//!
//! A store path alternates collection names and document keys:
//! `users` is a collection, `users/u1` a document inside it, `users/u1/posts` a
//! subcollection owned by that document, and so on without a depth limit.
//!
//! [`CollectionPath`] always has an odd number of segments and [`DocumentPath`] an even
//! number, so the two can never be confused once constructed.

use std::fmt;

use crate::error::{DocumentStoreError, DocumentStoreResult};

const SEPARATOR: char = '/';

fn validate_segment(segment: &str, kind: &str) -> DocumentStoreResult<()> {
    if segment.is_empty() {
        return Err(DocumentStoreError::InvalidPath(format!("empty {kind}")));
    }
    if segment.contains(SEPARATOR) {
        return Err(DocumentStoreError::InvalidPath(format!(
            "{kind} `{segment}` must not contain `{SEPARATOR}`"
        )));
    }

    Ok(())
}

fn split_checked(path: &str) -> DocumentStoreResult<Vec<&str>> {
    let segments = path.split(SEPARATOR).collect::<Vec<_>>();

    if segments.iter().any(|s| s.is_empty()) {
        return Err(DocumentStoreError::InvalidPath(format!(
            "`{path}` contains an empty segment"
        )));
    }

    Ok(segments)
}

/// Address of a collection, either at the store root or nested under a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Parses a slash-delimited collection path such as `users` or `users/u1/posts`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] when a segment is empty or the path
    /// has an even number of segments (which would address a document).
    pub fn parse(path: &str) -> DocumentStoreResult<Self> {
        let segments = split_checked(path)?;

        if segments.len() % 2 == 0 {
            return Err(DocumentStoreError::InvalidPath(format!(
                "`{path}` addresses a document, not a collection"
            )));
        }

        Ok(Self(path.to_string()))
    }

    /// Creates a top-level collection path from a single name.
    pub fn root(name: &str) -> DocumentStoreResult<Self> {
        validate_segment(name, "collection name")?;

        Ok(Self(name.to_string()))
    }

    /// Returns the path of the document with `key` inside this collection.
    pub fn doc(&self, key: &str) -> DocumentStoreResult<DocumentPath> {
        validate_segment(key, "document key")?;

        Ok(DocumentPath(format!("{}{SEPARATOR}{key}", self.0)))
    }

    /// The collection's own name (last segment).
    pub fn id(&self) -> &str {
        self.0
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or(&self.0)
    }

    /// The document owning this collection, or `None` for a root collection.
    pub fn parent(&self) -> Option<DocumentPath> {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(parent, _)| DocumentPath(parent.to_string()))
    }

    /// Number of collection levels between the store root and this collection, starting at 1.
    pub fn depth(&self) -> usize {
        self.0.matches(SEPARATOR).count() / 2 + 1
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Parses a slash-delimited document path such as `users/u1`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] when a segment is empty or the path
    /// has an odd number of segments.
    pub fn parse(path: &str) -> DocumentStoreResult<Self> {
        let segments = split_checked(path)?;

        if segments.len() % 2 != 0 {
            return Err(DocumentStoreError::InvalidPath(format!(
                "`{path}` addresses a collection, not a document"
            )));
        }

        Ok(Self(path.to_string()))
    }

    /// Returns the path of the subcollection `name` owned by this document.
    pub fn collection(&self, name: &str) -> DocumentStoreResult<CollectionPath> {
        validate_segment(name, "collection name")?;

        Ok(CollectionPath(format!("{}{SEPARATOR}{name}", self.0)))
    }

    /// The document key (last segment).
    pub fn id(&self) -> &str {
        self.0
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or(&self.0)
    }

    /// The collection containing this document.
    pub fn parent(&self) -> CollectionPath {
        match self.0.rsplit_once(SEPARATOR) {
            Some((parent, _)) => CollectionPath(parent.to_string()),
            None => CollectionPath(self.0.clone()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
