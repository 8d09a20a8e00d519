//! Tolerant decoding of model-generated itinerary JSON.
//!
//! Generation calls are billed and bounded by a max-output-token budget, so
//! a verbose itinerary can be cut off partway through the document. Decoding
//! tries three strategies in strict order, first success wins: a direct
//! parse, a bracket-closing repair for truncated tails, and a last-resort
//! rebuild that keeps only fully-closed day objects.

use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Result, TripError},
    schemas::{itinerary_schema, validation::validate_payload},
    types::Itinerary,
};

/// Number of characters of the raw response embedded in decode errors.
const PREVIEW_CHARS: usize = 200;

/// Repair strategy that produced a decoded itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairTier {
    /// The response parsed as-is.
    Direct,
    /// Open strings, brackets, and braces were closed.
    CloseBrackets,
    /// The document was rebuilt around fully-closed day objects.
    RebuildDays,
}

/// Decode raw model output into an [`Itinerary`].
///
/// The input must already be stripped of any markdown code-fence wrapper.
/// Fails with [`TripError::Decode`] carrying a short preview of the
/// response once every repair tier is exhausted.
pub fn decode_itinerary(raw: &str) -> Result<Itinerary> {
    decode_with_tier(raw).map(|(itinerary, _)| itinerary)
}

/// Decode raw model output, also reporting which repair tier succeeded.
pub fn decode_with_tier(raw: &str) -> Result<(Itinerary, RepairTier)> {
    let text = raw.trim();

    match parse_itinerary(text) {
        Ok(itinerary) => return Ok((itinerary, RepairTier::Direct)),
        Err(err) => {
            debug!(target: "tripcraft::decoder", error = %err, "direct parse failed")
        }
    }

    let repaired = close_truncated_json(text);
    match parse_itinerary(&repaired) {
        Ok(itinerary) => return Ok((itinerary, RepairTier::CloseBrackets)),
        Err(err) => {
            debug!(target: "tripcraft::decoder", error = %err, "bracket-closing repair failed")
        }
    }

    match rebuild_from_complete_days(text).and_then(|rebuilt| parse_itinerary(&rebuilt)) {
        Ok(itinerary) => Ok((itinerary, RepairTier::RebuildDays)),
        Err(err) => {
            debug!(target: "tripcraft::decoder", error = %err, "day rebuild failed");
            Err(TripError::Decode {
                preview: preview(text),
            })
        }
    }
}

/// Parse one candidate text all the way down to a checked [`Itinerary`]:
/// JSON parse, schema validation, typed deserialization, invariants.
fn parse_itinerary(text: &str) -> Result<Itinerary> {
    let value: Value = serde_json::from_str(text)?;
    validate_payload(itinerary_schema(), &value)?;

    let itinerary: Itinerary = serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() {
            "<root>".to_string()
        } else {
            path
        };
        TripError::Validation(format!(
            "failed to deserialize itinerary at {}: {}",
            location, err
        ))
    })?;

    itinerary.check_invariants()?;
    Ok(itinerary)
}

/// Close any open strings, brackets, and braces left by mid-stream
/// truncation.
///
/// One forward pass tracks a LIFO stack of open `{`/`[`, whether the scan
/// is inside a string literal, and an escape flag reset each iteration so
/// `\"` never toggles the string state. Structural characters inside
/// strings are ignored.
pub(crate) fn close_truncated_json(text: &str) -> String {
    let mut result = text.trim_end().to_string();
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    for ch in result.chars() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' | '[' => stack.push(ch),
            '}' | ']' => {
                stack.pop();
            }
            _ => {}
        }
    }

    // Truncation that lands mid-string is assumed to have cut string
    // content, not an escape sequence.
    if in_string {
        result.push('"');
    }

    // A dangling comma or colon would turn the appended closers into a
    // parse error.
    let kept = result
        .trim_end_matches(|c: char| c == ',' || c == ':' || c.is_whitespace())
        .len();
    result.truncate(kept);

    for open in stack.iter().rev() {
        result.push(if *open == '{' { '}' } else { ']' });
    }

    result
}

/// Rebuild a minimal document around every fully-closed day object.
///
/// Tips that followed a truncated days array cannot be recovered reliably,
/// so the rebuilt document always carries empty tip arrays. A day object
/// that never closes before the end of the text is discarded entirely.
fn rebuild_from_complete_days(text: &str) -> Result<String> {
    let array_start = find_days_array_start(text).ok_or_else(|| {
        TripError::Validation("could not find days array in response".to_string())
    })?;

    let after_days = &text[array_start..];
    let bytes = after_days.as_bytes();
    let mut complete_days: Vec<&str> = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b',') {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'{' {
            break;
        }

        match scan_balanced_object(&bytes[i..]) {
            Some(len) => {
                complete_days.push(&after_days[i..i + len]);
                i += len;
            }
            // Incomplete object, stop here.
            None => break,
        }
    }

    if complete_days.is_empty() {
        return Err(TripError::Validation(
            "could not extract any complete days from response".to_string(),
        ));
    }

    let mut rebuilt = String::with_capacity(text.len());
    rebuilt.push_str(&text[..array_start]);
    rebuilt.push_str(&complete_days.join(","));
    rebuilt.push_str("],\"packingTips\":[],\"generalTips\":[]}");
    Ok(rebuilt)
}

/// Byte offset just past the opening `[` of the days array, tolerating
/// whitespace around the colon.
fn find_days_array_start(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut search = 0usize;

    while let Some(found) = text[search..].find("\"days\"") {
        let mut i = search + found + "\"days\"".len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b':' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'[' {
                return Some(i + 1);
            }
        }
        search += found + 1;
    }

    None
}

/// Length in bytes of the balanced `{...}` object at the start of `bytes`,
/// or `None` if it never closes. Uses the same in-string and escape
/// handling as [`close_truncated_json`].
fn scan_balanced_object(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (j, &b) in bytes.iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        match b {
            b'\\' if in_string => escape = true,
            b'"' => in_string = !in_string,
            _ if in_string => {}
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
