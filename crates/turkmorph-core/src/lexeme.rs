// Lexemes: dictionary entries with part of speech and attributes

use std::fmt;

/// Primary part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimaryPos {
    Noun,
    Adjective,
    Adverb,
    Conjunction,
    Interjection,
    Verb,
    Pronoun,
    Numeral,
    Determiner,
    PostPositive,
    Question,
    Duplicator,
    Punctuation,
    Unknown,
}

impl PrimaryPos {
    pub const ALL: &'static [PrimaryPos] = &[
        PrimaryPos::Noun,
        PrimaryPos::Adjective,
        PrimaryPos::Adverb,
        PrimaryPos::Conjunction,
        PrimaryPos::Interjection,
        PrimaryPos::Verb,
        PrimaryPos::Pronoun,
        PrimaryPos::Numeral,
        PrimaryPos::Determiner,
        PrimaryPos::PostPositive,
        PrimaryPos::Question,
        PrimaryPos::Duplicator,
        PrimaryPos::Punctuation,
        PrimaryPos::Unknown,
    ];

    /// Short textual form used in rendered parses and lexicon files.
    pub const fn short_form(self) -> &'static str {
        match self {
            PrimaryPos::Noun => "Noun",
            PrimaryPos::Adjective => "Adj",
            PrimaryPos::Adverb => "Adv",
            PrimaryPos::Conjunction => "Conj",
            PrimaryPos::Interjection => "Interj",
            PrimaryPos::Verb => "Verb",
            PrimaryPos::Pronoun => "Pron",
            PrimaryPos::Numeral => "Num",
            PrimaryPos::Determiner => "Det",
            PrimaryPos::PostPositive => "Postp",
            PrimaryPos::Question => "Ques",
            PrimaryPos::Duplicator => "Dup",
            PrimaryPos::Punctuation => "Punc",
            PrimaryPos::Unknown => "Unk",
        }
    }

    pub fn from_short_form(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.short_form() == s)
    }
}

impl fmt::Display for PrimaryPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_form())
    }
}

/// Secondary part of speech, refining the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecondaryPos {
    Proper,
    Abbreviation,
    Time,
    Personal,
    Demonstrative,
    Question,
    Quantitative,
    Reflexive,
    Cardinal,
    Ordinal,
    Distribution,
    Range,
    Real,
    Duplicator,
}

impl SecondaryPos {
    pub const ALL: &'static [SecondaryPos] = &[
        SecondaryPos::Proper,
        SecondaryPos::Abbreviation,
        SecondaryPos::Time,
        SecondaryPos::Personal,
        SecondaryPos::Demonstrative,
        SecondaryPos::Question,
        SecondaryPos::Quantitative,
        SecondaryPos::Reflexive,
        SecondaryPos::Cardinal,
        SecondaryPos::Ordinal,
        SecondaryPos::Distribution,
        SecondaryPos::Range,
        SecondaryPos::Real,
        SecondaryPos::Duplicator,
    ];

    pub const fn short_form(self) -> &'static str {
        match self {
            SecondaryPos::Proper => "Prop",
            SecondaryPos::Abbreviation => "Abbr",
            SecondaryPos::Time => "Time",
            SecondaryPos::Personal => "Pers",
            SecondaryPos::Demonstrative => "Demons",
            SecondaryPos::Question => "Ques",
            SecondaryPos::Quantitative => "Quant",
            SecondaryPos::Reflexive => "Reflex",
            SecondaryPos::Cardinal => "Card",
            SecondaryPos::Ordinal => "Ord",
            SecondaryPos::Distribution => "Dist",
            SecondaryPos::Range => "Range",
            SecondaryPos::Real => "Real",
            SecondaryPos::Duplicator => "Dup",
        }
    }

    pub fn from_short_form(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.short_form() == s)
    }
}

impl fmt::Display for SecondaryPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_form())
    }
}

attribute_set! {
    /// Morpho-phonological and grammatical modifiers of a lexeme.
    pub enum LexemeAttribute;
    /// Set of [`LexemeAttribute`]s packed into a `u32`.
    pub struct LexemeAttributes(u32);
    {
        Voicing => "Voicing",
        NoVoicing => "NoVoicing",
        VoicingOpt => "VoicingOpt",
        Doubling => "Doubling",
        LastVowelDrop => "LastVowelDrop",
        ProgressiveVowelDrop => "ProgressiveVowelDrop",
        InverseHarmony => "InverseHarmony",
        Special => "Special",
        EndsWithAyn => "EndsWithAyn",
        CompoundP3sg => "CompoundP3sg",
        CompoundP3sgRoot => "CompoundP3sgRoot",
        AoristI => "Aorist_I",
        AoristA => "Aorist_A",
        CausativeT => "Causative_t",
        CausativeIr => "Causative_Ir",
        CausativeIt => "Causative_It",
        CausativeAr => "Causative_Ar",
        CausativeDIr => "Causative_dIr",
        PassiveIn => "Passive_In",
        PassiveInIl => "Passive_InIl",
        PassiveIl => "Passive_Il",
        Reflexive => "Reflexive",
        Reciprocal => "Reciprocal",
        NoQuestion => "NoQuestion",
    }
}

/// An immutable dictionary entry.
///
/// `lemma` is the citation form (`demek`); `lemma_root` is the stem the
/// suffixes attach to (`de`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lexeme {
    lemma: String,
    lemma_root: String,
    primary_pos: PrimaryPos,
    secondary_pos: Option<SecondaryPos>,
    attributes: LexemeAttributes,
}

impl Lexeme {
    pub fn new(
        lemma: impl Into<String>,
        lemma_root: impl Into<String>,
        primary_pos: PrimaryPos,
        secondary_pos: Option<SecondaryPos>,
        attributes: LexemeAttributes,
    ) -> Self {
        Self {
            lemma: lemma.into(),
            lemma_root: lemma_root.into(),
            primary_pos,
            secondary_pos,
            attributes,
        }
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn lemma_root(&self) -> &str {
        &self.lemma_root
    }

    pub fn primary_pos(&self) -> PrimaryPos {
        self.primary_pos
    }

    pub fn secondary_pos(&self) -> Option<SecondaryPos> {
        self.secondary_pos
    }

    pub fn attributes(&self) -> LexemeAttributes {
        self.attributes
    }

    /// Copy of this lexeme with a different attribute set.
    pub fn with_attributes(&self, attributes: LexemeAttributes) -> Self {
        Self {
            attributes,
            ..self.clone()
        }
    }

    /// `lemma+Pos[+SecondaryPos]`, the head of a rendered parse.
    pub fn render_head(&self) -> String {
        match self.secondary_pos {
            Some(sec) => format!("{}+{}+{}", self.lemma, self.primary_pos, sec),
            None => format!("{}+{}", self.lemma, self.primary_pos),
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_head())?;
        if !self.attributes.is_empty() {
            let names: Vec<&str> = self.attributes.iter().map(LexemeAttribute::name).collect();
            write!(f, " [A:{}]", names.join(","))?;
        }
        Ok(())
    }
}
