// Turkish-aware lowercasing
//
// Turkish distinguishes dotted and dotless i in both cases: `I ↔ ı` and
// `İ ↔ i`. The default Unicode mapping gets both pairs wrong, so they are
// special-cased before falling back to the standard library.

/// Lowercase a single character using Turkish rules.
pub fn lower_char(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Lowercase a whole word using Turkish rules.
pub fn to_lower(word: &str) -> String {
    word.chars().map(lower_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_and_dotless_i() {
        assert_eq!(lower_char('I'), 'ı');
        assert_eq!(lower_char('İ'), 'i');
        assert_eq!(lower_char('i'), 'i');
    }

    #[test]
    fn other_letters_use_unicode_mapping() {
        assert_eq!(lower_char('Ş'), 'ş');
        assert_eq!(lower_char('Ç'), 'ç');
        assert_eq!(lower_char('Ü'), 'ü');
        assert_eq!(lower_char('Ğ'), 'ğ');
    }

    #[test]
    fn lowercase_words() {
        assert_eq!(to_lower("KIRMIZI"), "kırmızı");
        assert_eq!(to_lower("İSTANBUL"), "istanbul");
        assert_eq!(to_lower("Kitabım"), "kitabım");
    }
}
