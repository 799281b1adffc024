/*!
 * Format adapters and the extension-based dispatcher.
 *
 * An adapter turns a byte stream into a `Document` and back. The
 * `FormatRegistry` maps file extensions to adapters so new formats are
 * added by registration rather than by editing a central match.
 */

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::config::FormatOptions;
use crate::errors::{Result, SubtitleError};
use crate::model::Document;

pub mod srt;

pub use srt::SrtFormat;

/// A parse/serialize pair for one subtitle container format
pub trait SubtitleFormat: Send + Sync {
    /// Human-readable format name
    fn name(&self) -> &'static str;

    /// Extensions handled, with the leading dot (e.g. ".srt")
    fn extensions(&self) -> &'static [&'static str];

    /// Build a document from a byte stream
    fn parse(&self, reader: &mut dyn Read, options: &FormatOptions) -> Result<Document>;

    /// Write a document to a byte stream
    fn serialize(&self, document: &Document, writer: &mut dyn Write) -> Result<()>;
}

/// Extension to adapter registry
#[derive(Clone, Default)]
pub struct FormatRegistry {
    adapters: HashMap<String, Arc<dyn SubtitleFormat>>,
}

impl FormatRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in adapters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SrtFormat));
        registry
    }

    /// Register an adapter for each of its extensions, replacing any
    /// adapter previously registered for the same extension
    pub fn register(&mut self, adapter: Arc<dyn SubtitleFormat>) {
        for extension in adapter.extensions() {
            debug!("Registering {} adapter for {}", adapter.name(), extension);
            self.adapters
                .insert(normalize_extension(extension), Arc::clone(&adapter));
        }
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Adapter for a path's extension
    pub fn adapter_for(&self, path: &Path) -> Result<Arc<dyn SubtitleFormat>> {
        let extension = path
            .extension()
            .map(|ext| normalize_extension(&ext.to_string_lossy()))
            .unwrap_or_default();

        self.adapters
            .get(&extension)
            .cloned()
            .ok_or_else(|| SubtitleError::UnsupportedFormat(path.display().to_string()))
    }

    /// Open and parse a subtitle file with explicit format options
    pub fn open<P: AsRef<Path>>(&self, path: P, options: &FormatOptions) -> Result<Document> {
        let path = path.as_ref();
        let adapter = self.adapter_for(path)?;

        let file = File::open(path).map_err(|e| SubtitleError::io(path, e))?;
        let mut reader = BufReader::new(file);
        let document = adapter.parse(&mut reader, options)?;

        debug!("Parsed {} items from {}", document.items.len(), path.display());
        Ok(document)
    }

    /// Open and parse a subtitle file with default options
    pub fn open_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        self.open(path, &FormatOptions::default())
    }

    /// Serialize a document to a file picked by extension.
    ///
    /// Empty documents are rejected before the file is created.
    pub fn write<P: AsRef<Path>>(&self, document: &Document, path: P) -> Result<()> {
        let path = path.as_ref();
        let adapter = self.adapter_for(path)?;
        if document.is_empty() {
            return Err(SubtitleError::EmptyDocument);
        }

        let file = File::create(path).map_err(|e| SubtitleError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        adapter.serialize(document, &mut writer)?;
        writer.flush().map_err(|e| SubtitleError::io(path, e))?;

        debug!("Wrote {} items to {}", document.items.len(), path.display());
        Ok(())
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

// Lowercase with a single leading dot
fn normalize_extension(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.').to_lowercase())
}
