/*!
 * Common test utilities for the subforge test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::TimeDelta;
use tempfile::TempDir;

use subforge::{Document, Item};

/// Routes library logs to the test output; set RUST_LOG to see them
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample SRT file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}

/// Milliseconds as a time offset
pub fn ms(value: i64) -> TimeDelta {
    TimeDelta::milliseconds(value)
}

/// Builds a document from (start ms, end ms, text) triples
pub fn document(items: &[(i64, i64, &str)]) -> Document {
    let mut doc = Document::new();
    for (start, end, text) in items {
        doc.push_item(Item::with_text(ms(*start), ms(*end), *text));
    }
    doc
}

/// Flattens a document into (start ms, end ms, rendered text) triples
pub fn spans(doc: &Document) -> Vec<(i64, i64, String)> {
    doc.items
        .iter()
        .map(|item| {
            (
                item.start_at.num_milliseconds(),
                item.end_at.num_milliseconds(),
                item.to_string(),
            )
        })
        .collect()
}
