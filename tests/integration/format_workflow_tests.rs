/*!
 * Integration tests for opening, transforming and writing subtitle files
 */

use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::Result;

use subforge::{
    Document, FormatOptions, FormatRegistry, Item, SubtitleError, SubtitleFormat,
};

use crate::common::{self, ms, spans};

/// Test that we can load, modify, and save subtitles in a full workflow
#[test]
fn test_subtitle_workflow_withFullProcess_shouldSucceed() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_subtitle(temp_dir.path(), "source.srt")?;
    let registry = FormatRegistry::with_defaults();

    let mut doc = registry.open_file(&source)?;
    assert_eq!(doc.items.len(), 3);
    assert_eq!(doc.items[0].to_string(), "This is a test subtitle.");

    doc.add(ms(500));
    doc.fragment(ms(3_000));
    let output = temp_dir.path().join("shifted.srt");
    registry.write(&doc, &output)?;

    let mut reloaded = registry.open_file(&output)?;
    assert_eq!(reloaded, doc);

    reloaded.unfragment();
    assert_eq!(
        spans(&reloaded),
        vec![
            (1_500, 4_500, "This is a test subtitle.".to_string()),
            (5_500, 9_500, "It contains multiple entries.".to_string()),
            (10_500, 14_500, "For testing purposes.".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn test_open_withUnsupportedExtension_shouldNotTouchFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let registry = FormatRegistry::with_defaults();

    // The file does not exist: an I/O error here would mean the adapter lookup ran second
    let missing = temp_dir.path().join("movie.sub");
    assert!(matches!(
        registry.open_file(&missing),
        Err(SubtitleError::UnsupportedFormat(_))
    ));
    Ok(())
}

#[test]
fn test_open_withMissingFile_shouldWrapIoErrorWithPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let registry = FormatRegistry::with_defaults();
    let missing = temp_dir.path().join("missing.srt");

    match registry.open_file(&missing) {
        Err(SubtitleError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected I/O error, got {:?}", other.map(|d| d.items.len())),
    }
    Ok(())
}

#[test]
fn test_write_withEmptyDocument_shouldFailWithoutCreatingFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let registry = FormatRegistry::with_defaults();
    let output = temp_dir.path().join("empty.srt");

    assert!(matches!(
        registry.write(&Document::new(), &output),
        Err(SubtitleError::EmptyDocument)
    ));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_open_withMalformedSrt_shouldAbandonParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "broken.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nok\n\n2\nnot a timing line\n",
    )?;
    let registry = FormatRegistry::with_defaults();

    assert!(matches!(
        registry.open_file(&path),
        Err(SubtitleError::Parse { line: 6, .. })
    ));
    Ok(())
}

/// One cue per line, each lasting one second
struct PlainLinesFormat;

impl SubtitleFormat for PlainLinesFormat {
    fn name(&self) -> &'static str {
        "Plain lines"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".lines", ".txt"]
    }

    fn parse(&self, reader: &mut dyn Read, _options: &FormatOptions) -> subforge::Result<Document> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let mut doc = Document::new();
        for (index, line) in content.lines().enumerate() {
            let start = ms(index as i64 * 1_000);
            doc.push_item(Item::with_text(start, start + ms(1_000), line));
        }
        Ok(doc)
    }

    fn serialize(&self, document: &Document, writer: &mut dyn Write) -> subforge::Result<()> {
        for item in &document.items {
            writeln!(writer, "{}", item)?;
        }
        Ok(())
    }
}

#[test]
fn test_register_withCustomAdapter_shouldDispatchByExtension() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let mut registry = FormatRegistry::with_defaults();
    registry.register(Arc::new(PlainLinesFormat));
    assert_eq!(registry.extensions(), vec![".lines", ".srt", ".txt"]);

    let path = common::create_test_file(temp_dir.path(), "notes.TXT", "first\nsecond\n")?;
    let mut doc = registry.open_file(&path)?;
    assert_eq!(doc.items.len(), 2);

    // Convert to SRT through the same registry
    let srt = temp_dir.path().join("notes.srt");
    doc.force_duration(ms(3_000));
    registry.write(&doc, &srt)?;
    let content = std::fs::read_to_string(&srt)?;
    assert!(content.starts_with("1\n00:00:00,000 --> 00:00:01,000\nfirst\n\n"));
    assert!(content.ends_with("3\n00:00:02,999 --> 00:00:03,000\n...\n\n"));
    Ok(())
}
