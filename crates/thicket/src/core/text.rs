//! Hotkey markers in labels.
//!
//! A label marks its hotkey with a leading `&`, as in `"&Open"`. A trailing
//! `&` marks nothing and is left alone.

/// The character marked as the hotkey in `text`, if any.
pub fn hotkey(text: &str) -> Option<char> {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            return chars.next();
        }
    }
    None
}

/// Strip the first hotkey marker from `text`. Returns the label without the
/// marker and the character index the hotkey now sits at.
pub fn hotkey_pos(text: &str) -> (String, Option<usize>) {
    let mut out = String::with_capacity(text.len());
    let mut pos = None;
    let mut chars = text.chars().peekable();
    let mut i = 0;
    while let Some(c) = chars.next() {
        if c == '&' && pos.is_none() && chars.peek().is_some() {
            pos = Some(i);
            continue;
        }
        out.push(c);
        i += 1;
    }
    (out, pos)
}
