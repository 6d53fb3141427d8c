//! Accent folding for stored brand names

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Strip diacritics from Latin letters: "nestlé" -> "nestle".
///
/// Only Latin letters are decomposed, and only standalone combining
/// diacritics are dropped. Other scripts (kana, Cyrillic, Hangul) pass
/// through unchanged.
pub fn deburr(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        if is_combining_diacritic(c) {
            continue;
        }
        if let Some(folded) = fold_letter(c) {
            result.push_str(folded);
        } else if is_latin_letter(c) {
            decompose_canonical(c, |part| {
                if !is_combining_mark(part) {
                    result.push(part);
                }
            });
        } else {
            result.push(c);
        }
    }
    result
}

/// Latin-1 Supplement, Latin Extended-A/B and Latin Extended Additional.
fn is_latin_letter(c: char) -> bool {
    matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

fn is_combining_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}' | '\u{FE20}'..='\u{FE2F}'
    )
}

fn fold_letter(c: char) -> Option<&'static str> {
    let folded = match c {
        'Æ' => "Ae",
        'æ' => "ae",
        'Œ' => "Oe",
        'œ' => "oe",
        'Ø' => "O",
        'ø' => "o",
        'ß' => "ss",
        'Ð' | 'Đ' => "D",
        'ð' | 'đ' => "d",
        'Þ' => "Th",
        'þ' => "th",
        'Ł' => "L",
        'ł' => "l",
        'ı' => "i",
        _ => return None,
    };
    Some(folded)
}

/// Lower-case and deburr, for position lookups.
pub(crate) fn fold(input: &str) -> String {
    deburr(&input.to_lowercase())
}
