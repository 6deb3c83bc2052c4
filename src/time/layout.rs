//! Reference-timestamp layouts.
//!
//! A layout is written as the reference time `Mon Jan 2 15:04:05 MST 2006`
//! would be displayed, e.g. `2006-01-02 15:04:05`. This module translates
//! such layouts into chrono format strings:
//!
//! | Reference | Meaning | chrono |
//! |---|---|---|
//! | `2006` / `06` | year | `%Y` / `%y` |
//! | `01` / `1` / `Jan` / `January` | month | `%m` / `%-m` / `%b` / `%B` |
//! | `02` / `2` / `_2` / `002` | day | `%d` / `%-d` / `%e` / `%j` |
//! | `Mon` / `Monday` | weekday | `%a` / `%A` |
//! | `15` / `03` / `3` | hour | `%H` / `%I` / `%-I` |
//! | `04` / `4` | minute | `%M` / `%-M` |
//! | `05` / `5` | second | `%S` / `%-S` |
//! | `.000` / `.000000` / `.000000000` | fraction | `%.3f` / `%.6f` / `%.9f` |
//! | `PM` / `pm` | half of day | `%p` / `%P` |
//! | `MST` | zone abbreviation | `%Z` |
//! | `-0700` / `-07:00` / `-07` | offset | `%z` / `%:z` / `%:::z` |
//!
//! Anything else is literal text.

use std::fmt;

/// What a reference token contributes to a parsed timestamp.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Part {
    Date,
    Time,
    Offset,
    None,
}

/// Reference tokens, longest first where prefixes overlap.
const TOKENS: &[(&str, &str, Part)] = &[
    ("January", "%B", Part::Date),
    ("Jan", "%b", Part::Date),
    ("Monday", "%A", Part::None),
    ("Mon", "%a", Part::None),
    ("MST", "%Z", Part::None),
    ("2006", "%Y", Part::Date),
    ("-07:00:00", "%::z", Part::Offset),
    ("-07:00", "%:z", Part::Offset),
    ("-0700", "%z", Part::Offset),
    ("-07", "%:::z", Part::Offset),
    ("Z07:00:00", "%::z", Part::Offset),
    ("Z07:00", "%:z", Part::Offset),
    ("Z0700", "%z", Part::Offset),
    ("Z07", "%:::z", Part::Offset),
    ("002", "%j", Part::Date),
    ("01", "%m", Part::Date),
    ("02", "%d", Part::Date),
    ("03", "%I", Part::Time),
    ("04", "%M", Part::Time),
    ("05", "%S", Part::Time),
    ("06", "%y", Part::Date),
    ("15", "%H", Part::Time),
    ("_2", "%e", Part::Date),
    ("PM", "%p", Part::None),
    ("pm", "%P", Part::None),
    ("1", "%-m", Part::Date),
    ("2", "%-d", Part::Date),
    ("3", "%-I", Part::Time),
    ("4", "%-M", Part::Time),
    ("5", "%-S", Part::Time),
];

/// A translated reference-timestamp layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    source: String,
    format: String,
    has_date: bool,
    has_time: bool,
    has_offset: bool,
}

impl Layout {
    /// Translate a reference-timestamp layout.
    pub fn new(source: &str) -> Self {
        let mut format = String::with_capacity(source.len() * 2);
        let (mut has_date, mut has_time, mut has_offset) = (false, false, false);
        let mut rest = source;

        while !rest.is_empty() {
            if let Some((len, spec)) = fraction(rest) {
                format.push_str(spec);
                has_time = true;
                rest = &rest[len..];
                continue;
            }

            if let Some((token, spec, part)) = TOKENS.iter().find(|(t, ..)| rest.starts_with(*t)) {
                format.push_str(spec);
                match part {
                    Part::Date => has_date = true,
                    Part::Time => has_time = true,
                    Part::Offset => has_offset = true,
                    Part::None => {}
                }
                rest = &rest[token.len()..];
                continue;
            }

            let Some(c) = rest.chars().next() else { break };
            if c == '%' {
                format.push_str("%%");
            } else {
                format.push(c);
            }
            rest = &rest[c.len_utf8()..];
        }

        Self {
            source: source.to_string(),
            format,
            has_date,
            has_time,
            has_offset,
        }
    }

    /// Layout as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Equivalent chrono format string.
    pub fn format_str(&self) -> &str {
        &self.format
    }

    /// Whether the layout carries a calendar date.
    pub fn has_date(&self) -> bool {
        self.has_date
    }

    /// Whether the layout carries a time of day.
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    /// Whether the layout carries a numeric UTC offset.
    pub fn has_offset(&self) -> bool {
        self.has_offset
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Match a fractional-second token (`.000`, `,999`, ...) at the start of `s`.
///
/// The run of `0`s or `9`s must not be followed by another digit.
fn fraction(s: &str) -> Option<(usize, &'static str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || !matches!(bytes[0], b'.' | b',') || !matches!(bytes[1], b'0' | b'9') {
        return None;
    }
    let digit = bytes[1];
    let run = bytes[1..].iter().take_while(|&&b| b == digit).count();
    if bytes.get(1 + run).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let spec = match (digit, run) {
        (b'0', 3) => "%.3f",
        (b'0', 6) => "%.6f",
        (b'0', 9) => "%.9f",
        _ => "%.f",
    };
    Some((1 + run, spec))
}
