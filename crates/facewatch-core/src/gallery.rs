use crate::encoding::Encoding;
use serde::{Deserialize, Serialize};

/// One enrolled face: a name bound to an encoding.
///
/// Multiple entries may share a name (multiple images per person).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub name: String,
    pub encoding: Encoding,
    pub enrolled_at: String,
}

impl GalleryEntry {
    /// Build an entry stamped with the current time.
    pub fn new(name: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            name: name.into(),
            encoding,
            enrolled_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// The ordered collection of enrolled faces.
///
/// Order is insertion order and is semantically relevant only as the
/// nearest-neighbor tie-break: on an exact distance tie the
/// first-inserted entry wins.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, preserving insertion order.
    pub fn push(&mut self, entry: GalleryEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<GalleryEntry> {
        self.entries.pop()
    }
}
