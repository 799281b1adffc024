/*!
 * Thread-safe handle around a whole document.
 *
 * `Document` has no internal synchronization. Callers that share one across
 * threads go through this wrapper so every mutation holds the write lock
 * for the full operation.
 */

use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::Document;

/// Shared, lock-protected document
#[derive(Debug, Clone, Default)]
pub struct SharedDocument {
    inner: Arc<RwLock<Document>>,
}

impl SharedDocument {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(RwLock::new(document)),
        }
    }

    /// Run a read-only closure under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a mutating closure under the write lock
    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Clone the current document out of the lock
    pub fn snapshot(&self) -> Document {
        self.inner.read().clone()
    }
}

impl From<Document> for SharedDocument {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}
