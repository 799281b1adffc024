/*!
 * Tests for the duration text codec
 */

use subforge::{format_duration, parse_duration, SubtitleError};

use crate::common::ms;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let parsed = parse_duration(ts, ",", 3).unwrap();
    assert_eq!(parsed, ms(5_025_678));

    let formatted = format_duration(parsed, ",", 3);
    assert_eq!(formatted, ts);
}

/// WebVTT-style short timestamps have no hours segment
#[test]
fn test_parseDuration_withMinutesAndSeconds_shouldParse() {
    assert_eq!(parse_duration("12:34.567", ".", 3).unwrap(), ms(754_567));
}

/// SSA-style centisecond timestamps
#[test]
fn test_parseDuration_withCentiseconds_shouldScaleToMilliseconds() {
    assert_eq!(parse_duration("0:01:02.50", ".", 3).unwrap(), ms(62_500));
    assert_eq!(format_duration(ms(62_500), ".", 2), "00:01:02.50");
}

#[test]
fn test_parseDuration_withGarbage_shouldCarryOffendingToken() {
    match parse_duration("00:00:xx,000", ",", 3) {
        Err(SubtitleError::Format { token, .. }) => assert_eq!(token, "xx"),
        other => panic!("expected format error, got {:?}", other),
    }
    assert!(parse_duration("", ",", 3).is_err());
    assert!(parse_duration("12", ",", 3).is_err());
}

#[test]
fn test_formatDuration_withDotSeparator_shouldUseIt() {
    assert_eq!(format_duration(ms(3_723_004), ".", 3), "01:02:03.004");
}
