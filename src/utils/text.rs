use regex::Regex;
use std::sync::LazyLock;

/// Possessive `'S` left upper-case by title casing (`St'S` -> `St's`)
static POSSESSIVE_S: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)'S\b").expect("possessive pattern is valid"));

/// Literal corrections applied after title casing, in order
pub const LITERAL_FIXUPS: &[(&str, &str)] = &[("Ma'Mor", "Ma'mor")];

/// Title case where a letter is upper-cased unless it follows another letter.
///
/// Digits and punctuation start a new word, so `KALLANG/WHAMPOA` becomes
/// `Kallang/Whampoa` and `ST. GEORGE'S RD` becomes `St. George'S Rd`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

pub fn apply_fixups(s: &str) -> String {
    let mut fixed = POSSESSIVE_S.replace_all(s, "$1's").into_owned();
    for (from, to) in LITERAL_FIXUPS {
        if fixed.contains(from) {
            fixed = fixed.replace(from, to);
        }
    }
    fixed
}

/// Title case followed by the literal fixups
pub fn normalize_label(s: &str) -> String {
    apply_fixups(&title_case(s.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("ANG MO KIO"), "Ang Mo Kio");
        assert_eq!(title_case("new generation"), "New Generation");
        assert_eq!(title_case("KALLANG/WHAMPOA"), "Kallang/Whampoa");
        assert_eq!(title_case("MULTI-GENERATION"), "Multi-Generation");
    }

    #[test]
    fn test_title_case_after_digits() {
        assert_eq!(title_case("3 ROOM"), "3 Room");
        assert_eq!(title_case("2ND"), "2Nd");
    }

    #[test]
    fn test_possessive_fixup() {
        assert_eq!(normalize_label("ST'S"), "St's");
        assert_eq!(normalize_label("ST. GEORGE'S RD"), "St. George's Rd");
        assert_eq!(normalize_label("ST. GEORGE'S LANE"), "St. George's Lane");
    }

    #[test]
    fn test_fixup_leaves_abbreviations() {
        assert_eq!(normalize_label("C'WEALTH DR"), "C'Wealth Dr");
        assert_eq!(normalize_label("JLN MA'MOR"), "Jln Ma'mor");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_label("  BEDOK  "), "Bedok");
    }
}
