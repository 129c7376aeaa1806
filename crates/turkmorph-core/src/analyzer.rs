// Phonetic analyzer: attribute sets of character sequences

use crate::MorphError;
use crate::letter::{Letter, require_letter};
use crate::lexeme::{LexemeAttribute, LexemeAttributes};
use crate::phonetic::PhoneticAttribute::*;
use crate::phonetic::{LAST_LETTER_ATTRIBUTES, LAST_VOWEL_ATTRIBUTES, PhoneticAttributes};

const FIRST_LETTER_ATTRIBUTES: PhoneticAttributes =
    PhoneticAttributes::of(&[FirstLetterVowel, FirstLetterConsonant]);

/// Compute the phonetic attributes of a sequence.
///
/// The attributes describe the first letter, the last letter and the last
/// vowel. A sequence without vowels gets `HasNoVowel` instead of the
/// last-vowel attributes. With `InverseHarmony` in `lexeme_attrs` the
/// resulting frontness is forced to `LastVowelFrontal`.
///
/// Every character must belong to the Turkish alphabet.
pub fn attributes(
    seq: &str,
    lexeme_attrs: LexemeAttributes,
) -> Result<PhoneticAttributes, MorphError> {
    let mut first: Option<Letter> = None;
    let mut last: Option<Letter> = None;
    let mut last_vowel: Option<Letter> = None;

    for c in seq.chars() {
        let letter = require_letter(c)?;
        if first.is_none() {
            first = Some(letter);
        }
        if letter.is_vowel() {
            last_vowel = Some(letter);
        }
        last = Some(letter);
    }

    let mut attrs = PhoneticAttributes::empty();

    if let Some(first) = first {
        attrs.insert(if first.is_vowel() {
            FirstLetterVowel
        } else {
            FirstLetterConsonant
        });
    }

    if let Some(last) = last {
        attrs = attrs.union(last_letter_attributes(last));
    }

    match last_vowel {
        Some(vowel) => {
            attrs.insert(if vowel.is_frontal() {
                LastVowelFrontal
            } else {
                LastVowelBack
            });
            attrs.insert(if vowel.is_rounded() {
                LastVowelRounded
            } else {
                LastVowelUnrounded
            });
        }
        None => attrs.insert(HasNoVowel),
    }

    if lexeme_attrs.contains(LexemeAttribute::InverseHarmony) {
        attrs = attrs.with_inverse_harmony();
    }

    Ok(attrs)
}

fn last_letter_attributes(last: Letter) -> PhoneticAttributes {
    if last.is_vowel() {
        return PhoneticAttributes::of(&[LastLetterVowel, LastLetterVoiced]);
    }
    let mut attrs = PhoneticAttributes::from(LastLetterConsonant);
    if last.is_voiceless() {
        attrs.insert(LastLetterVoiceless);
        if last.is_stop() {
            attrs.insert(LastLetterVoicelessStop);
        }
    } else {
        attrs.insert(LastLetterVoiced);
    }
    attrs
}

/// Compute the attributes of `previous + applied` knowing only the
/// attributes of the previous sequence.
///
/// Last-letter attributes come from `applied`. Last-vowel attributes come
/// from `applied` when it has a vowel, otherwise they are inherited, as are
/// the first-letter attributes. An empty `applied` changes nothing.
pub fn attributes_after(
    previous: PhoneticAttributes,
    applied: &str,
) -> Result<PhoneticAttributes, MorphError> {
    if applied.is_empty() {
        return Ok(previous);
    }
    let own = attributes(applied, LexemeAttributes::empty())?;

    let vowel_part = if own.contains(HasNoVowel) {
        previous.intersection(LAST_VOWEL_ATTRIBUTES)
    } else {
        own.intersection(LAST_VOWEL_ATTRIBUTES)
    };

    Ok(previous
        .intersection(FIRST_LETTER_ATTRIBUTES)
        .union(own.intersection(LAST_LETTER_ATTRIBUTES))
        .union(vowel_part))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(seq: &str) -> PhoneticAttributes {
        attributes(seq, LexemeAttributes::empty()).unwrap()
    }

    #[test]
    fn consonant_final_back_vowel() {
        let a = attrs("kitap");
        assert_eq!(
            a,
            PhoneticAttributes::of(&[
                FirstLetterConsonant,
                LastLetterConsonant,
                LastLetterVoiceless,
                LastLetterVoicelessStop,
                LastVowelBack,
                LastVowelUnrounded,
            ])
        );
    }

    #[test]
    fn vowel_final_front_rounded() {
        let a = attrs("ütü");
        assert!(a.contains(FirstLetterVowel));
        assert!(a.contains(LastLetterVowel));
        assert!(a.contains(LastLetterVoiced));
        assert!(a.contains(LastVowelFrontal));
        assert!(a.contains(LastVowelRounded));
        assert!(!a.contains(LastLetterConsonant));
    }

    #[test]
    fn voiced_consonant_is_not_voiceless() {
        let a = attrs("kalem");
        assert!(a.contains(LastLetterVoiced));
        assert!(!a.contains(LastLetterVoiceless));
        assert!(a.contains(LastVowelFrontal));
    }

    #[test]
    fn voiceless_fricative_is_not_a_stop() {
        let a = attrs("ateş");
        assert!(a.contains(LastLetterVoiceless));
        assert!(!a.contains(LastLetterVoicelessStop));
    }

    #[test]
    fn no_vowel() {
        let a = attrs("tv");
        assert!(a.contains(HasNoVowel));
        assert!(!a.contains(LastVowelFrontal));
        assert!(!a.contains(LastVowelBack));
        assert!(a.contains(LastLetterConsonant));
    }

    #[test]
    fn empty_sequence_has_no_vowel_only() {
        assert_eq!(attrs(""), PhoneticAttributes::from(HasNoVowel));
    }

    #[test]
    fn inverse_harmony_forces_frontal() {
        let plain = attrs("saat");
        assert!(plain.contains(LastVowelBack));
        let inverse = attributes("saat", LexemeAttributes::of(&[LexemeAttribute::InverseHarmony])).unwrap();
        assert!(inverse.contains(LastVowelFrontal));
        assert!(!inverse.contains(LastVowelBack));
        assert!(inverse.contains(LastVowelUnrounded));
    }

    #[test]
    fn unknown_letter_fails() {
        assert_eq!(
            attributes("kitap1", LexemeAttributes::empty()),
            Err(MorphError::UnknownLetter('1'))
        );
        assert_eq!(
            attributes("Kitap", LexemeAttributes::empty()),
            Err(MorphError::UnknownLetter('K'))
        );
    }

    #[test]
    fn attributes_after_vowel_suffix() {
        let after = attributes_after(attrs("kitab"), "ı").unwrap();
        assert_eq!(after, attrs("kitabı"));
    }

    #[test]
    fn attributes_after_vowelless_suffix_inherits_vowel() {
        let after = attributes_after(attrs("kitabı"), "m").unwrap();
        assert_eq!(after, attrs("kitabım"));
        assert!(after.contains(LastVowelBack));
        assert!(after.contains(LastLetterVoiced));
    }

    #[test]
    fn attributes_after_empty_is_identity() {
        let before = attrs("ev");
        assert_eq!(attributes_after(before, "").unwrap(), before);
    }

    #[test]
    fn attributes_after_keeps_inverse_harmony_until_a_vowel() {
        let saat = attrs("saat").with_inverse_harmony();
        let after = attributes_after(saat, "ler").unwrap();
        assert!(after.contains(LastVowelFrontal));
        let vowelless = attributes_after(saat, "m").unwrap();
        assert!(vowelless.contains(LastVowelFrontal));
    }
}
