// ============================================================
// Layer 4 — Field Sanitizer
// ============================================================
// Strips the characters that would break a tab-delimited,
// newline-terminated row out of a record's text fields.
//
// Removed characters:
//   '\t'  → column separator
//   '\n'  → row terminator
//   '\r'  → half of a Windows line ending
//
// This is a lossy filter, not an escaping scheme: the removed
// characters are simply gone ("a\tb" becomes "ab").
//
// Numeric values are never scanned; their Display output cannot
// contain these characters. Multi-hypothesis candidates are each
// cleaned on their own. Extra features are not cleaned; the writer
// rejects text extras that hold one of these characters.
//
// Reference: Rust Book §8 (Strings in Rust)
//            std::borrow::Cow documentation

use std::borrow::Cow;

use crate::domain::record::{Field, FieldValue, Hypothesis, Record};

fn is_delimiter_hazard(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// True when `text` holds a character the canonical layout cannot carry.
pub fn contains_delimiter(text: &str) -> bool {
    text.contains(is_delimiter_hazard)
}

/// Remove tab, newline and carriage-return characters.
/// Borrows when `text` is already clean.
pub fn sanitize_text(text: &str) -> Cow<'_, str> {
    if contains_delimiter(text) {
        Cow::Owned(text.chars().filter(|&c| !is_delimiter_hazard(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn sanitize_string(s: &mut String) {
    if let Cow::Owned(clean) = sanitize_text(s) {
        *s = clean;
    }
}

fn sanitize_value(v: &mut FieldValue) {
    if let FieldValue::Text(s) = v {
        sanitize_string(s);
    }
}

/// Clean the named fields of `record` in place. Missing optional
/// fields are skipped; the writer validates presence separately.
pub fn sanitize(record: &mut Record, fields: &[Field]) {
    for field in fields {
        match field {
            Field::Uid => sanitize_string(&mut record.uid),
            Field::Ruid => {
                if let Some(ruid) = record.ruid.as_mut() {
                    sanitize_string(ruid);
                }
            }
            Field::Label => {
                if let Some(label) = record.label.as_mut() {
                    sanitize_value(label);
                }
            }
            Field::Premise => sanitize_string(&mut record.premise),
            Field::Hypothesis => match record.hypothesis.as_mut() {
                Some(Hypothesis::Single(h)) => sanitize_string(h),
                Some(Hypothesis::Multi(hs)) => hs.iter_mut().for_each(sanitize_string),
                None => {}
            },
        }
    }
}
