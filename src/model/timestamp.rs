//! RFC 3339 output for generation timestamps.
//!
//! A zero offset is written as `Z`. Sub-second digits only appear when the
//! source timestamp had them, without trailing zeros.

use chrono::{DateTime, FixedOffset, SecondsFormat, Timelike};
use serde::Serializer;

/// Format a timestamp the way it is written in API responses.
pub fn format(ts: &DateTime<FixedOffset>) -> String {
    if ts.nanosecond() == 0 {
        return ts.to_rfc3339_opts(SecondsFormat::Secs, true);
    }

    let text = ts.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let Some(dot) = text.find('.') else {
        return text;
    };
    let digits_end = text[dot + 1..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| dot + 1 + i);
    let fraction = text[dot + 1..digits_end].trim_end_matches('0');

    if fraction.is_empty() {
        format!("{}{}", &text[..dot], &text[digits_end..])
    } else {
        format!("{}.{}{}", &text[..dot], fraction, &text[digits_end..])
    }
}

/// Serde `serialize_with` adapter for [`format`].
pub fn serialize<S: Serializer>(ts: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format(ts))
}
