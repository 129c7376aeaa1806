// Turkish alphabet and letter classification

use crate::MorphError;

// ---------------------------------------------------------------------------
// Letter classes
// ---------------------------------------------------------------------------

/// Phonological class of a Turkish letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterClass {
    Vowel { frontal: bool, rounded: bool },
    Consonant { voiceless: bool, stop: bool },
}

/// A letter of the (extended) Turkish alphabet.
///
/// The alphabet holds the 29 standard letters, the circumflexed vowels
/// `â î û` found in loan words, and the foreign consonants `q w x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter {
    ch: char,
    class: LetterClass,
}

const fn vowel(ch: char, frontal: bool, rounded: bool) -> Letter {
    Letter {
        ch,
        class: LetterClass::Vowel { frontal, rounded },
    }
}

const fn consonant(ch: char, voiceless: bool, stop: bool) -> Letter {
    Letter {
        ch,
        class: LetterClass::Consonant { voiceless, stop },
    }
}

/// All lowercase letters, vowels first.
pub const ALPHABET: &[Letter] = &[
    vowel('a', false, false),
    vowel('e', true, false),
    vowel('ı', false, false),
    vowel('i', true, false),
    vowel('o', false, true),
    vowel('ö', true, true),
    vowel('u', false, true),
    vowel('ü', true, true),
    vowel('â', false, false),
    vowel('î', true, false),
    vowel('û', false, true),
    consonant('b', false, true),
    consonant('c', false, false),
    consonant('ç', true, true),
    consonant('d', false, true),
    consonant('f', true, false),
    consonant('g', false, true),
    consonant('ğ', false, false),
    consonant('h', true, false),
    consonant('j', false, false),
    consonant('k', true, true),
    consonant('l', false, false),
    consonant('m', false, false),
    consonant('n', false, false),
    consonant('p', true, true),
    consonant('r', false, false),
    consonant('s', true, false),
    consonant('ş', true, false),
    consonant('t', true, true),
    consonant('v', false, false),
    consonant('y', false, false),
    consonant('z', false, false),
    consonant('q', true, true),
    consonant('w', false, false),
    consonant('x', true, false),
];

impl Letter {
    /// The lowercase character value.
    pub const fn char_value(self) -> char {
        self.ch
    }

    pub const fn class(self) -> LetterClass {
        self.class
    }

    pub const fn is_vowel(self) -> bool {
        matches!(self.class, LetterClass::Vowel { .. })
    }

    pub const fn is_consonant(self) -> bool {
        !self.is_vowel()
    }

    /// Front vowel (`e i ö ü î`). Always false for consonants.
    pub const fn is_frontal(self) -> bool {
        matches!(self.class, LetterClass::Vowel { frontal: true, .. })
    }

    /// Rounded vowel (`o ö u ü û`). Always false for consonants.
    pub const fn is_rounded(self) -> bool {
        matches!(self.class, LetterClass::Vowel { rounded: true, .. })
    }

    /// Voiceless consonant (`ç f h k p s ş t`, plus `q x`). Vowels are voiced.
    pub const fn is_voiceless(self) -> bool {
        matches!(self.class, LetterClass::Consonant { voiceless: true, .. })
    }

    pub const fn is_stop(self) -> bool {
        matches!(self.class, LetterClass::Consonant { stop: true, .. })
    }

    /// Voiceless stop consonant: `ç k p t` (and `q`).
    pub const fn is_voiceless_stop(self) -> bool {
        matches!(
            self.class,
            LetterClass::Consonant {
                voiceless: true,
                stop: true
            }
        )
    }
}

/// Look up a lowercase character in the Turkish alphabet.
pub fn letter(c: char) -> Option<Letter> {
    ALPHABET.iter().copied().find(|l| l.ch == c)
}

/// Look up a character, failing with [`MorphError::UnknownLetter`].
pub fn require_letter(c: char) -> Result<Letter, MorphError> {
    letter(c).ok_or(MorphError::UnknownLetter(c))
}

/// Check whether a character is a Turkish vowel (lowercase only).
pub fn is_vowel(c: char) -> bool {
    letter(c).is_some_and(Letter::is_vowel)
}

/// Check whether a sequence contains at least one vowel.
pub fn has_vowel(seq: &str) -> bool {
    seq.chars().any(is_vowel)
}

// ---------------------------------------------------------------------------
// Voicing
// ---------------------------------------------------------------------------

/// Map a voiceless stop to its voiced counterpart: `p→b, ç→c, t→d, k→ğ`.
///
/// Returns `None` for every other letter.
pub fn voice(c: char) -> Option<char> {
    match c {
        'p' => Some('b'),
        'ç' => Some('c'),
        't' => Some('d'),
        'k' => Some('ğ'),
        _ => None,
    }
}

/// Voice the last letter of a sequence.
///
/// A sequence ending in `nk` voices to `g` (`denk → deng`), not `ğ`.
pub fn voice_last_letter(seq: &str) -> Result<String, MorphError> {
    let Some(last) = seq.chars().last() else {
        return Err(MorphError::EmptySequence);
    };
    require_letter(last)?;
    let voiced = if seq.ends_with("nk") {
        'g'
    } else {
        voice(last).ok_or(MorphError::NotVoiceable(last))?
    };
    let mut out = String::with_capacity(seq.len() + 1);
    out.push_str(&seq[..seq.len() - last.len_utf8()]);
    out.push(voiced);
    Ok(out)
}
