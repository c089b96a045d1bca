//! Name ordering for the catalog.
//!
//! Compares at primary strength only, so case and diacritics never decide
//! the order: "Zurich", "zürich" and "ZÜRICH" are equal. Equal names keep
//! their feed order.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::station::Station;

/// Character classes in ascending order, as in the French locale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Digit,
    Letter,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Space
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Punctuation
    }
}

/// Punctuation and symbols in ascending primary order, following the CLDR
/// root table that the French locale inherits. Anything not listed sorts
/// after these, by code point.
const PUNCTUATION_ORDER: &[char] = &[
    '_', '-', '‐', '‑', '‒', '–', '—', ',', ';', ':', '!', '¡', '?', '¿', '.', '…', '·', '\'',
    '‘', '’', '‚', '‹', '›', '"', '“', '”', '„', '«', '»', '(', ')', '[', ']', '{', '}', '§',
    '¶', '@', '*', '/', '\\', '&', '#', '%', '‰', '†', '‡', '•', '`', '´', '^', '¨', '°', '©',
    '®', '+', '±', '÷', '×', '<', '=', '>', '¬', '|', '¦', '~', '¤', '¢', '$', '£', '¥', '€',
];

fn weight(class: CharClass, c: char) -> u32 {
    match class {
        CharClass::Punctuation => match PUNCTUATION_ORDER.iter().position(|p| *p == c) {
            Some(index) => index as u32,
            None => PUNCTUATION_ORDER.len() as u32 + c as u32,
        },
        _ => c as u32,
    }
}

/// Letters that have no canonical decomposition but sort as their base form.
fn fold(c: char, out: &mut Vec<char>) {
    match c {
        'ß' => out.extend(['s', 's']),
        'æ' => out.extend(['a', 'e']),
        'œ' => out.extend(['o', 'e']),
        'ø' => out.push('o'),
        'đ' => out.push('d'),
        'ł' => out.push('l'),
        _ => out.push(c),
    }
}

/// Sort key for `name`. Two names with equal keys collate as equal.
pub fn collation_key(name: &str) -> Vec<(u8, u32)> {
    let mut folded = Vec::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in c.to_lowercase() {
            fold(lower, &mut folded);
        }
    }

    folded
        .into_iter()
        .map(|c| {
            let class = classify(c);
            (class as u8, weight(class, c))
        })
        .collect()
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Stable ascending sort by name.
pub fn sort_stations(mut stations: Vec<Station>) -> Vec<Station> {
    stations.sort_by_cached_key(|s| collation_key(&s.name));
    stations
}
