/*!
 * Duration text codec.
 *
 * Converts human-readable timecodes such as `01:02:03,456`, `01:02:03.45`
 * or `02:03,4` to and from signed `TimeDelta` offsets. The millisecond
 * separator and the number of fractional digits are chosen by the caller,
 * so the same codec serves every format adapter.
 */

use chrono::TimeDelta;

use crate::errors::{Result, SubtitleError};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

// Fractions longer than this are rejected whatever the requested digit count
const MAX_FRACTION_DIGITS: usize = 3;

/// Parse a `H:MM:SS<sep>fff` or `MM:SS<sep>fff` timecode.
///
/// The fractional part is right-padded or right-truncated to
/// `millisecond_digits` digits and read as a fraction of a second, so `"5"`
/// means 500ms and, with two digits, `"567"` means 560ms.
pub fn parse_duration(
    input: &str,
    millisecond_separator: &str,
    millisecond_digits: usize,
) -> Result<TimeDelta> {
    let (clock, milliseconds) = match split_fraction(input, millisecond_separator) {
        Some((clock, fraction)) => (clock, parse_fraction(fraction.trim(), millisecond_digits)?),
        None => (input, 0),
    };

    let parts: Vec<&str> = clock.trim().split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [minutes, seconds] => (None, *minutes, *seconds),
        [hours, minutes, seconds] => (Some(*hours), *minutes, *seconds),
        _ => {
            return Err(SubtitleError::format(
                input,
                "timecode (expected hours, minutes and seconds)",
            ));
        }
    };

    let seconds = parse_segment(seconds, "seconds")?;
    let minutes = parse_segment(minutes, "minutes")?;
    let hours = match hours {
        Some(hours) => parse_segment(hours, "hours")?,
        None => 0,
    };

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|total| total.checked_add(minutes.checked_mul(MS_PER_MINUTE)?))
        .and_then(|total| total.checked_add(seconds.checked_mul(MS_PER_SECOND)?))
        .and_then(|total| total.checked_add(milliseconds))
        .and_then(TimeDelta::try_milliseconds)
        .ok_or_else(|| SubtitleError::format(input, "timecode (out of range)"))
}

/// Render a duration as `HH:MM:SS<sep>` followed by exactly
/// `millisecond_digits` fractional digits.
///
/// Hours are zero-padded to two digits and grow as needed. Digits beyond the
/// millisecond are zeros; fewer than three digits truncate. Negative
/// durations are not supported and callers must guard against them.
///
/// Output with more than three fractional digits does not parse back:
/// `parse_duration` rejects fractions longer than three digits, so only
/// `millisecond_digits == 3` round-trips exactly.
pub fn format_duration(
    duration: TimeDelta,
    millisecond_separator: &str,
    millisecond_digits: usize,
) -> String {
    let total = duration.num_milliseconds();
    let hours = total / MS_PER_HOUR;
    let minutes = (total % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (total % MS_PER_MINUTE) / MS_PER_SECOND;
    let milliseconds = total % MS_PER_SECOND;

    format!(
        "{:02}:{:02}:{:02}{}{}",
        hours,
        minutes,
        seconds,
        millisecond_separator,
        format_fraction(milliseconds, millisecond_digits)
    )
}

fn split_fraction<'a>(input: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    if separator.is_empty() {
        return None;
    }
    input.rsplit_once(separator)
}

fn parse_fraction(fraction: &str, digits: usize) -> Result<i64> {
    if fraction.len() > MAX_FRACTION_DIGITS {
        return Err(SubtitleError::format(
            fraction,
            "milliseconds (more than 3 digits)",
        ));
    }
    if !is_unsigned_integer(fraction) {
        return Err(SubtitleError::format(fraction, "milliseconds"));
    }

    let kept = &fraction[..fraction.len().min(digits)];
    if kept.is_empty() {
        return Ok(0);
    }
    let value: i64 = kept
        .parse()
        .map_err(|_| SubtitleError::format(fraction, "milliseconds"))?;
    Ok(value * 10_i64.pow((MAX_FRACTION_DIGITS - kept.len()) as u32))
}

fn format_fraction(milliseconds: i64, digits: usize) -> String {
    match digits {
        0 => String::new(),
        1..=MAX_FRACTION_DIGITS => {
            let scaled = milliseconds / 10_i64.pow((MAX_FRACTION_DIGITS - digits) as u32);
            format!("{:0width$}", scaled, width = digits)
        }
        _ => format!(
            "{:03}{}",
            milliseconds,
            "0".repeat(digits - MAX_FRACTION_DIGITS)
        ),
    }
}

fn parse_segment(segment: &str, context: &str) -> Result<i64> {
    let segment = segment.trim();
    if !is_unsigned_integer(segment) {
        return Err(SubtitleError::format(segment, context));
    }
    segment
        .parse()
        .map_err(|_| SubtitleError::format(segment, context))
}

fn is_unsigned_integer(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
