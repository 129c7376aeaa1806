// Phonetic attributes and expectations

attribute_set! {
    /// A property of a string's terminal phonology that gates allomorph
    /// selection.
    pub enum PhoneticAttribute;
    /// Set of [`PhoneticAttribute`]s packed into a `u16`.
    ///
    /// Equality and hashing are single integer operations; the set is used
    /// directly as part of the suffix-form graph node key.
    pub struct PhoneticAttributes(u16);
    {
        LastLetterVowel => "LastLetterVowel",
        LastLetterConsonant => "LastLetterConsonant",
        LastLetterVoiced => "LastLetterVoiced",
        LastLetterVoiceless => "LastLetterVoiceless",
        LastLetterVoicelessStop => "LastLetterVoicelessStop",
        LastVowelFrontal => "LastVowelFrontal",
        LastVowelBack => "LastVowelBack",
        LastVowelRounded => "LastVowelRounded",
        LastVowelUnrounded => "LastVowelUnrounded",
        FirstLetterVowel => "FirstLetterVowel",
        FirstLetterConsonant => "FirstLetterConsonant",
        HasNoVowel => "HasNoVowel",
    }
}

attribute_set! {
    /// A constraint on the first letter of the next applied suffix form.
    pub enum PhoneticExpectation;
    /// Set of [`PhoneticExpectation`]s packed into a `u8`.
    pub struct PhoneticExpectations(u8);
    {
        VowelStart => "VowelStart",
        ConsonantStart => "ConsonantStart",
    }
}

use PhoneticAttribute::*;

/// The attributes describing the last letter of a sequence.
pub const LAST_LETTER_ATTRIBUTES: PhoneticAttributes = PhoneticAttributes::of(&[
    LastLetterVowel,
    LastLetterConsonant,
    LastLetterVoiced,
    LastLetterVoiceless,
    LastLetterVoicelessStop,
]);

/// The attributes describing the last vowel of a sequence.
pub const LAST_VOWEL_ATTRIBUTES: PhoneticAttributes = PhoneticAttributes::of(&[
    LastVowelFrontal,
    LastVowelBack,
    LastVowelRounded,
    LastVowelUnrounded,
    HasNoVowel,
]);

impl PhoneticAttributes {
    /// Replace `LastVowelBack` with `LastVowelFrontal`.
    ///
    /// Applying this twice is the same as applying it once.
    pub const fn with_inverse_harmony(self) -> Self {
        self.without(LastVowelBack).with(LastVowelFrontal)
    }

    /// Treat the last letter as a consonant (ayn-final words).
    pub const fn with_consonant_ending(self) -> Self {
        self.without(LastLetterVowel).with(LastLetterConsonant)
    }
}

impl PhoneticExpectations {
    /// Check whether a non-empty surface string satisfies every expectation.
    ///
    /// `first_is_vowel` describes the first letter of the string. An empty
    /// string satisfies no expectation and must be handled by the caller.
    pub const fn satisfied_by(self, first_is_vowel: bool) -> bool {
        if self.contains(PhoneticExpectation::VowelStart) && !first_is_vowel {
            return false;
        }
        if self.contains(PhoneticExpectation::ConsonantStart) && first_is_vowel {
            return false;
        }
        true
    }

    /// Check expectations still pending when the word ends.
    ///
    /// The word boundary counts as a consonant: `ConsonantStart` holds,
    /// `VowelStart` does not.
    pub const fn satisfied_at_word_end(self) -> bool {
        !self.contains(PhoneticExpectation::VowelStart)
    }
}
