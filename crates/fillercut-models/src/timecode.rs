//! Timecode parsing and formatting.
//!
//! The classifier reports detection boundaries as `HH:MM:SS.mmm` strings;
//! all range math downstream happens in seconds. These two functions are the
//! only conversion point.

use thiserror::Error;

/// Result type for timecode operations.
pub type TimecodeResult<T> = Result<T, TimecodeError>;

/// Errors from timecode conversion.
#[derive(Debug, Error)]
pub enum TimecodeError {
    #[error("Malformed timecode: {0}")]
    Malformed(String),
}

/// Parse a `HH:MM:SS.mmm` (or `HH:MM:SS`) timecode into seconds.
///
/// The string must split into exactly three `:`-separated numeric
/// components. Classifier output is untrusted, so anything else is rejected
/// rather than guessed at.
pub fn parse_timecode(s: &str) -> TimecodeResult<f64> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(TimecodeError::Malformed(s.to_string()));
    }

    let hours: f64 = parts[0]
        .parse()
        .map_err(|_| TimecodeError::Malformed(s.to_string()))?;
    let minutes: f64 = parts[1]
        .parse()
        .map_err(|_| TimecodeError::Malformed(s.to_string()))?;
    let seconds: f64 = parts[2]
        .parse()
        .map_err(|_| TimecodeError::Malformed(s.to_string()))?;

    let total = hours * 3600.0 + minutes * 60.0 + seconds;
    if !total.is_finite() {
        return Err(TimecodeError::Malformed(s.to_string()));
    }

    Ok(total)
}

/// Format seconds as a zero-padded `HH:MM:SS.mmm` timecode.
///
/// Decomposes from whole milliseconds so that rounding carries into the
/// seconds field instead of producing a four-digit millisecond component;
/// `parse_timecode(format_timecode(x))` is within 1ms of `x` for any finite
/// non-negative input.
pub fn format_timecode(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timecode() {
        assert!((parse_timecode("00:00:00").unwrap()).abs() < 0.001);
        assert!((parse_timecode("00:01:00").unwrap() - 60.0).abs() < 0.001);
        assert!((parse_timecode("01:00:00").unwrap() - 3600.0).abs() < 0.001);
        assert!((parse_timecode("00:00:30.500").unwrap() - 30.5).abs() < 0.001);
        assert!((parse_timecode("01:02:03.250").unwrap() - 3723.25).abs() < 0.001);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_timecode("").is_err());
        assert!(parse_timecode("00:00").is_err());
        assert!(parse_timecode("00:00:00:00").is_err());
        assert!(parse_timecode("aa:bb:cc").is_err());
        assert!(parse_timecode("00:xx:00.000").is_err());
        assert!(parse_timecode("12.5").is_err());
    }

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0), "00:00:00.000");
        assert_eq!(format_timecode(5.12), "00:00:05.120");
        assert_eq!(format_timecode(65.5), "00:01:05.500");
        assert_eq!(format_timecode(3723.25), "01:02:03.250");
    }

    #[test]
    fn test_format_rounds_milliseconds_without_overflow() {
        // 0.9996s rounds up to a full second, not to "00:00:00.1000"
        assert_eq!(format_timecode(0.9996), "00:00:01.000");
        assert_eq!(format_timecode(59.9999), "00:01:00.000");
    }

    #[test]
    fn test_round_trip_within_one_millisecond() {
        for x in [0.0, 0.001, 0.4567, 12.345, 61.5, 3599.999, 3600.0, 7325.678] {
            let parsed = parse_timecode(&format_timecode(x)).unwrap();
            assert!(
                (parsed - x).abs() <= 0.001,
                "round trip of {} produced {}",
                x,
                parsed
            );
        }
    }
}
