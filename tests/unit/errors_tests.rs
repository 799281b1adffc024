/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use subforge::SubtitleError;

#[test]
fn test_formatError_shouldDisplayTokenAndContext() {
    let error = SubtitleError::format("1234", "milliseconds");
    let display = format!("{}", error);
    assert!(display.contains("1234"));
    assert!(display.contains("milliseconds"));
}

#[test]
fn test_ioError_shouldDisplayPath() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let error = SubtitleError::io(PathBuf::from("/tmp/missing.srt"), io_error);
    let display = format!("{}", error);
    assert!(display.contains("/tmp/missing.srt"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_streamError_fromIoError_shouldWrap() {
    let io_error = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
    let error: SubtitleError = io_error.into();
    assert!(matches!(error, SubtitleError::Stream(_)));
    assert!(error.to_string().contains("truncated"));
}

#[test]
fn test_otherErrors_shouldDisplayCorrectly() {
    assert!(SubtitleError::UnsupportedFormat("a.xyz".to_string()).to_string().contains("a.xyz"));
    assert_eq!(SubtitleError::EmptyDocument.to_string(), "No subtitles to write");
    assert!(SubtitleError::StyleCycle("s1".to_string()).to_string().contains("s1"));
    let parse = SubtitleError::Parse { line: 7, message: "bad".to_string() };
    assert_eq!(parse.to_string(), "Parse error at line 7: bad");
}
