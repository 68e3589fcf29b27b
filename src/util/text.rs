use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis marker appended to cut text.
pub const ELLIPSIS: &str = "...";

/// Number of characters kept in a card preview before the ellipsis.
pub const PREVIEW_CHARS: usize = 150;

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Build the card preview for an essay body.
///
/// Runs of line breaks become a single space, the result is trimmed, and
/// text longer than [`PREVIEW_CHARS`] characters is cut at exactly that many
/// characters followed by [`ELLIPSIS`].
///
/// ```
/// use quire::util::preview;
///
/// assert_eq!(preview("First line\n\n\nsecond line\n"), "First line second line");
/// let long = "x".repeat(200);
/// assert_eq!(preview(&long), format!("{}...", "x".repeat(150)));
/// ```
pub fn preview(content: &str) -> String {
    let collapsed = collapse_newlines(content);
    let text = collapsed.trim();

    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Replace every run of `\n` / `\r` with one space.
fn collapse_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut in_break = false;
    for c in s.chars() {
        if c == '\n' || c == '\r' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(c);
            in_break = false;
        }
    }
    Cow::Owned(out)
}

/// Format an integer with `,` thousands separators (`12345` → `12,345`).
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate to at most `max_width` terminal columns, ending in `...` when
/// anything was cut.
///
/// Widths of three columns or fewer leave no room for the ellipsis, so the
/// text is simply clipped. Returns a borrow when the text already fits.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let ellipsis_width = display_width(ELLIPSIS);
    let (budget, suffix) = if max_width <= ellipsis_width {
        (max_width, "")
    } else {
        (max_width - ellipsis_width, ELLIPSIS)
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }
    Cow::Owned(format!("{}{}", &s[..end], suffix))
}

fn is_stripped_control(c: char) -> bool {
    c == '\u{7f}' || (c < ' ' && c != '\t' && c != '\n' && c != '\r')
}

/// Remove terminal control characters and escape sequences so essay text
/// renders as literal characters.
///
/// Drops C0 controls other than tab, newline and carriage return, DEL, CSI
/// sequences (`ESC [` … final byte), OSC sequences (`ESC ]` … BEL or
/// `ESC \`), and stray ESC bytes. Markup-like text such as `<b>` is not
/// touched: the terminal never interprets it.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c == '\u{1b}' || is_stripped_control(c)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for n in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&n) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(n) = chars.next() {
                        if n == '\u{07}' {
                            break;
                        }
                        if n == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
        } else if !is_stripped_control(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
