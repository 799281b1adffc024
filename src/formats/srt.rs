use std::fmt::Write as _;
use std::io::{Read, Write};

use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FormatOptions;
use crate::errors::{Result, SubtitleError};
use crate::formats::SubtitleFormat;
use crate::model::{Document, Item, Line};
use crate::timecode::{format_duration, parse_duration};

// @module: SubRip (.srt) adapter

// @const: SRT timing line regex
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+)\s*-->\s*(\S+)").expect("valid SRT timing regex")
});

const MILLISECOND_SEPARATOR: &str = ",";
const MILLISECOND_DIGITS: usize = 3;
const BOM: char = '\u{feff}';

// @struct: SubRip parser and writer
#[derive(Debug, Default, Clone, Copy)]
pub struct SrtFormat;

impl SrtFormat {
    /// Parse SRT text into a document.
    ///
    /// Blocks are separated by blank lines; the numeric index line is
    /// optional. Any syntax error aborts the whole parse.
    pub fn parse_str(content: &str) -> Result<Document> {
        let content = content.strip_prefix(BOM).unwrap_or(content);
        let mut document = Document::new();
        let mut current: Option<Item> = None;
        let mut pending_index: Option<usize> = None;

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;

            if line.trim().is_empty() {
                if let Some(item) = current.take() {
                    document.push_item(item);
                }
                if let Some(index_line) = pending_index {
                    return Err(missing_timing(index_line));
                }
                continue;
            }

            if let Some(item) = current.as_mut() {
                item.lines.push(Line::from_text(line));
                continue;
            }

            if let Some(captures) = TIMING_REGEX.captures(line) {
                let start_at = parse_duration(&captures[1], MILLISECOND_SEPARATOR, MILLISECOND_DIGITS)?;
                let end_at = parse_duration(&captures[2], MILLISECOND_SEPARATOR, MILLISECOND_DIGITS)?;
                current = Some(Item::new(start_at, end_at));
                pending_index = None;
            } else if pending_index.is_none() && line.trim().parse::<u64>().is_ok() {
                pending_index = Some(line_number);
            } else {
                return Err(SubtitleError::Parse {
                    line: line_number,
                    message: format!("expected a timing line, found '{}'", line.trim()),
                });
            }
        }

        if let Some(item) = current.take() {
            document.push_item(item);
        }
        if let Some(index_line) = pending_index {
            return Err(missing_timing(index_line));
        }

        Ok(document)
    }

    /// Render a document as SRT text, numbering cues from 1
    pub fn render(document: &Document) -> Result<String> {
        if document.is_empty() {
            return Err(SubtitleError::EmptyDocument);
        }

        let mut output = String::new();
        for (index, item) in document.items.iter().enumerate() {
            // Writing to a String cannot fail
            let _ = writeln!(output, "{}", index + 1);
            let _ = writeln!(
                output,
                "{} --> {}",
                format_offset(item.start_at),
                format_offset(item.end_at)
            );
            for line in &item.lines {
                let _ = writeln!(output, "{}", line);
            }
            output.push('\n');
        }
        Ok(output)
    }
}

impl SubtitleFormat for SrtFormat {
    fn name(&self) -> &'static str {
        "SubRip"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".srt"]
    }

    fn parse(&self, reader: &mut dyn Read, _options: &FormatOptions) -> Result<Document> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse_str(&content)
    }

    fn serialize(&self, document: &Document, writer: &mut dyn Write) -> Result<()> {
        writer.write_all(Self::render(document)?.as_bytes())?;
        Ok(())
    }
}

// SRT has no notation for negative offsets
fn format_offset(offset: TimeDelta) -> String {
    format_duration(offset.max(TimeDelta::zero()), MILLISECOND_SEPARATOR, MILLISECOND_DIGITS)
}

fn missing_timing(index_line: usize) -> SubtitleError {
    SubtitleError::Parse {
        line: index_line,
        message: "cue index without a timing line".to_string(),
    }
}
