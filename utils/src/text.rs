//! Small pure text helpers for diagnostic output.

use std::borrow::Cow;

const ESC: char = '\x1b';

/// Truncate a string to fit within `max_total` characters, appending `suffix` if truncated.
///
/// The suffix counts toward the budget: the returned string is at most `max_total` characters.
/// Counts `char`s, not bytes, so multi-byte scalars are never split.
#[must_use]
pub fn truncate_to_fit(raw: &str, max_total: usize, suffix: &str) -> String {
    if raw.chars().count() <= max_total {
        return raw.to_string();
    }
    let take = max_total.saturating_sub(suffix.chars().count());
    let head: String = raw.chars().take(take).collect();
    format!("{head}{suffix}")
}

/// Remove terminal control characters, keeping `\n` and `\t`.
///
/// CSI sequences (`ESC [ ... final`) are dropped whole so their parameters
/// don't leak into the output as text.
#[must_use]
pub fn strip_control_chars(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_stripped) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESC {
            if chars.peek() == Some(&'[') {
                chars.next();
                for param in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&param) {
                        break;
                    }
                }
            }
        } else if !is_stripped(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_stripped(c: char) -> bool {
    c.is_control() && !matches!(c, '\n' | '\t')
}
