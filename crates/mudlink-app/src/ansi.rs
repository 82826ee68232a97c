//! Minimal ANSI SGR colour parsing for server text.
//!
//! Only the basic foreground colours 31-36 and reset (0) are honoured. Other
//! SGR sequences are stripped; anything that is not a complete `ESC [ ... m`
//! sequence is left as text.

/// Foreground colour selected by an SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    /// SGR 31.
    Red,
    /// SGR 32.
    Green,
    /// SGR 33.
    Yellow,
    /// SGR 34.
    Blue,
    /// SGR 35.
    Magenta,
    /// SGR 36.
    Cyan,
}

/// A run of text drawn in one colour. `None` uses the line's default style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Colour override.
    pub color: Option<AnsiColor>,
    /// Text without escape sequences.
    pub text: &'a str,
}

const ESC_CSI: &str = "\x1b[";

/// Split `text` into coloured segments. Empty segments are omitted.
pub fn parse(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut color = None;
    let mut rest = text;

    while let Some(start) = rest.find(ESC_CSI) {
        let params_start = start + ESC_CSI.len();
        let Some((params, after)) = sgr_params(&rest[params_start..]) else {
            // Not an SGR sequence: keep the escape byte as text and move on.
            let keep = params_start.min(rest.len());
            push(&mut segments, color, &rest[..keep]);
            rest = &rest[keep..];
            continue;
        };

        push(&mut segments, color, &rest[..start]);
        match params {
            "0" => color = None,
            "31" => color = Some(AnsiColor::Red),
            "32" => color = Some(AnsiColor::Green),
            "33" => color = Some(AnsiColor::Yellow),
            "34" => color = Some(AnsiColor::Blue),
            "35" => color = Some(AnsiColor::Magenta),
            "36" => color = Some(AnsiColor::Cyan),
            _ => {},
        }
        rest = after;
    }

    push(&mut segments, color, rest);
    segments
}

/// Text with every SGR sequence removed.
pub fn strip(text: &str) -> String {
    parse(text).into_iter().map(|s| s.text).collect()
}

/// Split `[0-9;]+m` off the front of `s`.
fn sgr_params(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !(c.is_ascii_digit() || c == ';'))?;
    if end == 0 || !s[end..].starts_with('m') {
        return None;
    }
    Some((&s[..end], &s[end + 1..]))
}

fn push<'a>(segments: &mut Vec<Segment<'a>>, color: Option<AnsiColor>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment { color, text });
    }
}
