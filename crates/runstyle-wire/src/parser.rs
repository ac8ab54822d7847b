//! Line-oriented span grammar.
//!
//! One span definition per line, blank lines ignored:
//!
//! ```text
//! <offset> <length> <fg-color> [<bg-color>] [flag ...]
//! ```
//!
//! - `offset`, `length`: non-negative integers. The first line's offset anchors
//!   the described region; every later line must start exactly where the
//!   previous one ended.
//! - `fg-color`: `-` for the default, or `#rrggbb` (case-insensitive).
//! - `bg-color`: optional, same grammar; present only when the fourth field is
//!   `-` or starts with `#`.
//! - `flag ...`: zero or more of `bold`, `italic`, `hidden`, in any order;
//!   duplicates are idempotent.
//!
//! Malformed input rejects the whole write. Two staleness conditions do not:
//! a line whose offset is at or past the buffer end stops parsing and keeps
//! what was accumulated, and a region running past the buffer end is clamped
//! by trimming trailing runs. Producers style against a snapshot of the text
//! and may lose a race with a fast editor; they re-style after the next edit
//! notification, so a short write beats a failed one.

use runstyle_core::{Color, StyleAttrs, StyleRun};

use crate::error::WireError;

/// A parsed span write: an ordered run list anchored at a region start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanUpdate {
    /// Character offset where the described region begins.
    pub start: usize,
    /// Contiguous runs covering the region, in document order.
    pub runs: Vec<StyleRun>,
    /// Characters trimmed off the region end to fit the buffer.
    ///
    /// Non-zero when the producer described a region from a stale, longer
    /// snapshot of the text. Trimming succeeds silently; this counter is the
    /// observable trace of it.
    pub truncated: usize,
}

impl SpanUpdate {
    /// Total character count covered by the runs.
    pub fn region_len(&self) -> usize {
        self.runs.iter().map(|run| run.len).sum()
    }

    /// Check if the update describes no styling at all.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Parse a span payload against a buffer of `buf_len` characters.
///
/// On success the returned update is guaranteed to fit within the buffer:
/// `start + region_len() <= buf_len`. On error nothing is usable and the
/// caller must apply nothing.
pub fn parse_spans(payload: &str, buf_len: usize) -> Result<SpanUpdate, WireError> {
    let mut start = 0;
    let mut expected: Option<usize> = None;
    let mut runs: Vec<StyleRun> = Vec::new();

    for (line_index, raw) in payload.lines().enumerate() {
        let line = line_index + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 3 {
            return Err(WireError::MissingFields { line });
        }

        let offset = parse_count(fields[0], "offset", line)?;
        let len = parse_count(fields[1], "length", line)?;

        // A stale producer may describe spans past the end of the text we
        // actually have; keep what was accumulated and ignore the rest.
        if offset >= buf_len {
            break;
        }
        if let Some(end) = expected {
            if offset != end {
                return Err(WireError::NotContiguous {
                    line,
                    expected: end,
                    found: offset,
                });
            }
        } else {
            start = offset;
        }
        expected = Some(offset + len);

        let mut attrs = StyleAttrs::default();
        attrs.fg = parse_color(fields[2], line)?;

        let mut rest = &fields[3..];
        if let Some(&token) = rest.first() {
            if token == "-" || token.starts_with('#') {
                attrs.bg = parse_color(token, line)?;
                rest = &rest[1..];
            }
        }
        for &token in rest {
            match token {
                "bold" => attrs.bold = true,
                "italic" => attrs.italic = true,
                "hidden" => attrs.hidden = true,
                _ => {
                    return Err(WireError::UnknownFlag {
                        line,
                        token: token.to_string(),
                    });
                }
            }
        }

        if len > 0 {
            runs.push(StyleRun::new(len, attrs));
        }
    }

    // Clamp the region to the buffer end, walking backward over the trailing
    // runs and dropping any reduced to nothing.
    let mut truncated = 0;
    let mut region_len: usize = runs.iter().map(|run| run.len).sum();
    while start + region_len > buf_len {
        let overshoot = start + region_len - buf_len;
        let last = runs
            .last_mut()
            .expect("a region extending past the buffer has at least one run");
        let trim = overshoot.min(last.len);
        last.len -= trim;
        truncated += trim;
        region_len -= trim;
        if last.len == 0 {
            runs.pop();
        }
    }

    Ok(SpanUpdate {
        start,
        runs,
        truncated,
    })
}

fn parse_count(token: &str, field: &'static str, line: usize) -> Result<usize, WireError> {
    let value: i64 = token.parse().map_err(|_| WireError::InvalidInteger {
        line,
        field,
        token: token.to_string(),
    })?;
    if value < 0 {
        return Err(WireError::Negative { line, field });
    }
    Ok(value as usize)
}

fn parse_color(token: &str, line: usize) -> Result<Option<Color>, WireError> {
    if token == "-" {
        return Ok(None);
    }
    let malformed = || WireError::InvalidColor {
        line,
        token: token.to_string(),
    };

    let hex = token.strip_prefix('#').ok_or_else(malformed)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(malformed());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| malformed())
    };
    Ok(Some(Color::Rgb(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fg(r: u8, g: u8, b: u8) -> StyleAttrs {
        StyleAttrs::default().with_fg(Color::Rgb(r, g, b))
    }

    #[test]
    fn test_parse_contiguous_spans() {
        let update = parse_spans("0 5 #ff0000\n5 5 #00ff00", 10).unwrap();

        assert_eq!(update.start, 0);
        assert_eq!(
            update.runs,
            vec![
                StyleRun::new(5, fg(255, 0, 0)),
                StyleRun::new(5, fg(0, 255, 0)),
            ]
        );
        assert_eq!(update.truncated, 0);
    }

    #[test]
    fn test_parse_nonzero_region_start() {
        let update = parse_spans("7 3 #0000ff", 20).unwrap();
        assert_eq!(update.start, 7);
        assert_eq!(update.region_len(), 3);
    }

    #[test]
    fn test_gap_between_spans_is_rejected() {
        let err = parse_spans("0 3 #ff0000\n5 5 #00ff00", 10).unwrap_err();
        assert_eq!(
            err,
            WireError::NotContiguous {
                line: 2,
                expected: 3,
                found: 5
            }
        );
    }

    #[test]
    fn test_overlap_between_spans_is_rejected() {
        let err = parse_spans("0 5 #ff0000\n3 5 #00ff00", 20).unwrap_err();
        assert!(matches!(err, WireError::NotContiguous { line: 2, .. }));
    }

    #[test]
    fn test_region_past_buffer_end_is_clamped() {
        let update = parse_spans("0 20 #ff0000", 10).unwrap();

        assert_eq!(update.runs, vec![StyleRun::new(10, fg(255, 0, 0))]);
        assert_eq!(update.truncated, 10);
    }

    #[test]
    fn test_clamp_trims_the_trailing_run() {
        // The last accepted line starts in bounds but runs past the end.
        let update = parse_spans("0 4 #ff0000\n4 4 #00ff00\n8 4 #0000ff", 6).unwrap();

        assert_eq!(
            update.runs,
            vec![
                StyleRun::new(4, fg(255, 0, 0)),
                StyleRun::new(2, fg(0, 255, 0)),
            ]
        );
        assert_eq!(update.truncated, 2);
    }

    #[test]
    fn test_stale_offset_stops_parsing() {
        // The third line starts past the buffer end: keep the first two.
        let update = parse_spans("0 4 #ff0000\n4 4 #00ff00\n8 4 #0000ff", 8).unwrap();

        assert_eq!(update.runs.len(), 2);
        assert_eq!(update.region_len(), 8);
        assert_eq!(update.truncated, 0);
    }

    #[test]
    fn test_stale_first_line_yields_empty_update() {
        let update = parse_spans("12 4 #ff0000", 10).unwrap();

        assert!(update.is_empty());
        assert_eq!(update.start, 0);
        assert_eq!(update.truncated, 0);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let update = parse_spans("\n0 2 #ff0000\n\n   \n2 2 #00ff00\n", 10).unwrap();
        assert_eq!(update.runs.len(), 2);
    }

    #[test]
    fn test_default_colors_and_flags() {
        let update = parse_spans("0 4 - - bold italic hidden", 10).unwrap();
        let attrs = update.runs[0].attrs;

        assert_eq!(attrs.fg, None);
        assert_eq!(attrs.bg, None);
        assert!(attrs.bold && attrs.italic && attrs.hidden);
    }

    #[test]
    fn test_background_color_is_optional() {
        let update = parse_spans("0 4 #ff0000 bold", 10).unwrap();
        let attrs = update.runs[0].attrs;

        assert_eq!(attrs.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(attrs.bg, None);
        assert!(attrs.bold);

        let update = parse_spans("0 4 #ff0000 #000080 bold", 10).unwrap();
        let attrs = update.runs[0].attrs;
        assert_eq!(attrs.bg, Some(Color::Rgb(0, 0, 128)));
        assert!(attrs.bold);
    }

    #[test]
    fn test_flag_duplicates_and_order_are_tolerated() {
        let update = parse_spans("0 4 - hidden bold bold hidden", 10).unwrap();
        let attrs = update.runs[0].attrs;

        assert!(attrs.bold && attrs.hidden);
        assert!(!attrs.italic);
    }

    #[test]
    fn test_hex_colors_are_case_insensitive() {
        let a = parse_spans("0 4 #AABBCC", 10).unwrap();
        let b = parse_spans("0 4 #aabbcc", 10).unwrap();
        assert_eq!(a.runs, b.runs);
    }

    #[test]
    fn test_zero_length_line_advances_contiguity() {
        let update = parse_spans("0 0 #ff0000\n0 4 #00ff00", 10).unwrap();

        // The empty span contributes no run but anchors the next offset.
        assert_eq!(update.runs, vec![StyleRun::new(4, fg(0, 255, 0))]);
    }

    #[test]
    fn test_too_few_fields_is_rejected() {
        assert_eq!(
            parse_spans("0 4", 10).unwrap_err(),
            WireError::MissingFields { line: 1 }
        );
    }

    #[test]
    fn test_unparsable_integer_is_rejected() {
        assert!(matches!(
            parse_spans("zero 4 -", 10).unwrap_err(),
            WireError::InvalidInteger { line: 1, field: "offset", .. }
        ));
        assert!(matches!(
            parse_spans("0 many -", 10).unwrap_err(),
            WireError::InvalidInteger { line: 1, field: "length", .. }
        ));
    }

    #[test]
    fn test_negative_offset_or_length_is_rejected() {
        assert_eq!(
            parse_spans("-1 4 -", 10).unwrap_err(),
            WireError::Negative { line: 1, field: "offset" }
        );
        assert_eq!(
            parse_spans("0 -4 -", 10).unwrap_err(),
            WireError::Negative { line: 1, field: "length" }
        );
    }

    #[test]
    fn test_malformed_color_is_rejected() {
        for bad in ["#12345", "#1234567", "#gg0000", "red", "#"] {
            let payload = format!("0 4 {bad}");
            assert!(
                matches!(
                    parse_spans(&payload, 10).unwrap_err(),
                    WireError::InvalidColor { line: 1, .. }
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert_eq!(
            parse_spans("0 4 - underline", 10).unwrap_err(),
            WireError::UnknownFlag {
                line: 1,
                token: "underline".to_string()
            }
        );
    }

    #[test]
    fn test_error_line_numbers_count_blank_lines() {
        let err = parse_spans("0 2 #ff0000\n\n2 2 nope", 10).unwrap_err();
        assert!(matches!(err, WireError::InvalidColor { line: 3, .. }));
    }
}
