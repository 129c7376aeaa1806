// Root generation: lexeme -> concrete surface roots
//
// A lexeme whose attributes change its stem under suffixation yields an
// original root and a modified one, each carrying the expectation that
// keeps it apart from the other (`kitap` before consonants, `kitab` before
// vowels).

use std::sync::Arc;

use hashbrown::HashMap;
use tracing::info;
use turkmorph_core::MorphError;
use turkmorph_core::analyzer::attributes;
use turkmorph_core::letter::{has_vowel, voice_last_letter};
use turkmorph_core::lexeme::{Lexeme, LexemeAttribute, LexemeAttributes, PrimaryPos};
use turkmorph_core::phonetic::PhoneticAttribute::*;
use turkmorph_core::phonetic::PhoneticExpectation::*;
use turkmorph_core::phonetic::PhoneticExpectations;
use turkmorph_core::root::Root;

use LexemeAttribute as LA;

/// Attributes that make a lexeme present more than one root.
const MODIFIERS_TO_WATCH: LexemeAttributes = LexemeAttributes::of(&[
    LA::Doubling,
    LA::LastVowelDrop,
    LA::ProgressiveVowelDrop,
    LA::InverseHarmony,
    LA::Voicing,
    LA::VoicingOpt,
    LA::Special,
    LA::EndsWithAyn,
]);

/// Irregular stems, keyed by lemma and POS. `None` matches any POS.
const ROOT_CHANGES: &[(&str, Option<PrimaryPos>, &str)] = &[
    ("ben", Some(PrimaryPos::Pronoun), "ban"),
    ("sen", Some(PrimaryPos::Pronoun), "san"),
    ("demek", Some(PrimaryPos::Verb), "di"),
    ("yemek", Some(PrimaryPos::Verb), "yi"),
    ("hepsi", Some(PrimaryPos::Pronoun), "hep"),
    ("ora", Some(PrimaryPos::Pronoun), "or"),
    ("bura", Some(PrimaryPos::Pronoun), "bur"),
    ("şura", Some(PrimaryPos::Pronoun), "şur"),
    ("nere", Some(PrimaryPos::Pronoun), "ner"),
    ("içeri", None, "içer"),
    ("dışarı", None, "dışar"),
    ("birbiri", Some(PrimaryPos::Pronoun), "birbir"),
];

/// Look up the changed stem of a `Special` lexeme, exact POS first.
pub fn root_change(lemma: &str, pos: PrimaryPos) -> Option<&'static str> {
    let find = |want: Option<PrimaryPos>| {
        ROOT_CHANGES
            .iter()
            .find(|(l, p, _)| *l == lemma && *p == want)
            .map(|(_, _, changed)| *changed)
    };
    find(Some(pos)).or_else(|| find(None))
}

/// Generate the roots of a lexeme. The result holds no duplicates.
pub fn generate(lexeme: &Arc<Lexeme>) -> Result<Vec<Root>, MorphError> {
    if lexeme.attributes().intersects(MODIFIERS_TO_WATCH) {
        return generate_modified(lexeme);
    }
    let attrs = attributes(lexeme.lemma_root(), lexeme.attributes())?;
    Ok(vec![Root::new(
        lexeme.lemma_root(),
        Arc::clone(lexeme),
        attrs,
        PhoneticExpectations::empty(),
    )])
}

fn generate_modified(lexeme: &Arc<Lexeme>) -> Result<Vec<Root>, MorphError> {
    let lexeme_attrs = lexeme.attributes();
    if lexeme_attrs.contains(LA::Special) {
        return special_roots(lexeme);
    }
    if lexeme_attrs.contains(LA::EndsWithAyn) {
        return ayn_roots(lexeme);
    }

    let lemma_root = lexeme.lemma_root();
    let mut modified = lemma_root.to_string();

    let mut original_attrs = attributes(lemma_root, LexemeAttributes::empty())?;
    let mut modified_attrs = original_attrs;
    let mut original_expectations = PhoneticExpectations::empty();
    let mut modified_expectations = PhoneticExpectations::empty();

    if lexeme_attrs.intersects(LexemeAttributes::of(&[LA::Voicing, LA::VoicingOpt])) {
        modified = voice_last_letter(&modified)?;
        modified_attrs.remove(LastLetterVoicelessStop);
        if !lexeme_attrs.contains(LA::VoicingOpt) {
            original_expectations.insert(ConsonantStart);
        }
        modified_expectations.insert(VowelStart);
    }

    if lexeme_attrs.contains(LA::Doubling) {
        if let Some(last) = modified.chars().last() {
            modified.push(last);
        }
        original_expectations.insert(ConsonantStart);
        modified_expectations.insert(VowelStart);
    }

    if lexeme_attrs.contains(LA::LastVowelDrop) {
        let mut chars: Vec<char> = modified.chars().collect();
        if chars.len() >= 2 {
            chars.remove(chars.len() - 2);
            modified = chars.into_iter().collect();
        }
        if lexeme.primary_pos() != PrimaryPos::Verb {
            original_expectations.insert(ConsonantStart);
        }
        modified_expectations.insert(VowelStart);
    }

    if lexeme_attrs.contains(LA::InverseHarmony) {
        original_attrs = original_attrs.with_inverse_harmony();
        modified_attrs = modified_attrs.with_inverse_harmony();
    }

    if lexeme_attrs.contains(LA::ProgressiveVowelDrop) {
        modified.pop();
        if has_vowel(&modified) {
            modified_attrs = attributes(&modified, LexemeAttributes::empty())?;
        }
        modified_expectations.insert(VowelStart);
    }

    let original = Root::new(
        lemma_root,
        Arc::clone(lexeme),
        original_attrs,
        original_expectations,
    );
    let modified = Root::new(modified, Arc::clone(lexeme), modified_attrs, modified_expectations);

    if original == modified {
        Ok(vec![original])
    } else {
        Ok(vec![original, modified])
    }
}

fn special_roots(lexeme: &Arc<Lexeme>) -> Result<Vec<Root>, MorphError> {
    let changed = root_change(lexeme.lemma(), lexeme.primary_pos()).ok_or_else(|| {
        MorphError::UnhandledSpecialRoot {
            lemma: lexeme.lemma().to_string(),
            pos: lexeme.primary_pos(),
        }
    })?;

    let stripped = Arc::new(lexeme.with_attributes(lexeme.attributes().without(LA::Special)));
    let stripped_attrs = stripped.attributes();

    let unchanged = Root::new(
        lexeme.lemma_root(),
        Arc::clone(&stripped),
        attributes(lexeme.lemma_root(), stripped_attrs)?,
        PhoneticExpectations::empty(),
    );
    let changed = Root::new(
        changed,
        Arc::clone(&stripped),
        attributes(changed, stripped_attrs)?,
        PhoneticExpectations::empty(),
    );

    let mut roots = vec![unchanged];
    push_unique(&mut roots, changed);
    Ok(roots)
}

// The ayn variant treats the final vowel as a consonant and must be
// followed by a vowel: `cami` + Acc -> `camii`.
fn ayn_roots(lexeme: &Arc<Lexeme>) -> Result<Vec<Root>, MorphError> {
    let without_ayn = Arc::new(lexeme.with_attributes(lexeme.attributes().without(LA::EndsWithAyn)));
    let plain = generate_modified(&without_ayn)?;

    let mut roots = Vec::with_capacity(plain.len() * 2);
    for root in &plain {
        push_unique(&mut roots, root.with_lexeme(Arc::clone(lexeme)));
    }
    for root in &plain {
        let ayn = Root::new(
            root.sequence(),
            Arc::clone(lexeme),
            root.phonetic_attributes().with_consonant_ending(),
            PhoneticExpectations::from(VowelStart),
        );
        push_unique(&mut roots, ayn);
    }
    Ok(roots)
}

fn push_unique(roots: &mut Vec<Root>, root: Root) {
    if !roots.contains(&root) {
        roots.push(root);
    }
}

/// Roots of a whole lexicon, indexed by surface sequence.
#[derive(Debug, Default, Clone)]
pub struct RootSet {
    by_sequence: HashMap<String, Vec<Root>>,
    len: usize,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root; returns false if an equal root is already present.
    pub fn insert(&mut self, root: Root) -> bool {
        let bucket = self.by_sequence.entry(root.sequence().to_string()).or_default();
        if bucket.contains(&root) {
            return false;
        }
        bucket.push(root);
        self.len += 1;
        true
    }

    /// Roots whose sequence is exactly `seq`.
    pub fn get(&self, seq: &str) -> &[Root] {
        self.by_sequence.get(seq).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct root sequences.
    pub fn sequence_count(&self) -> usize {
        self.by_sequence.len()
    }

    /// Length in chars of the longest root sequence.
    pub fn max_sequence_len(&self) -> usize {
        self.by_sequence
            .keys()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Root> {
        self.by_sequence.values().flatten()
    }
}

/// Generate the roots of every lexeme.
pub fn generate_all<'a>(
    lexemes: impl IntoIterator<Item = &'a Lexeme>,
) -> Result<RootSet, MorphError> {
    let mut set = RootSet::new();
    let mut lexeme_count = 0usize;
    for lexeme in lexemes {
        lexeme_count += 1;
        for root in generate(&Arc::new(lexeme.clone()))? {
            set.insert(root);
        }
    }
    info!(
        lexemes = lexeme_count,
        roots = set.len(),
        sequences = set.sequence_count(),
        "generated root set"
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use turkmorph_core::lexeme::SecondaryPos;
    use turkmorph_core::phonetic::PhoneticAttributes;

    fn lexeme(lemma: &str, root: &str, pos: PrimaryPos, attrs: &[LexemeAttribute]) -> Arc<Lexeme> {
        Arc::new(Lexeme::new(lemma, root, pos, None, LexemeAttributes::of(attrs)))
    }

    fn noun(lemma: &str, attrs: &[LexemeAttribute]) -> Arc<Lexeme> {
        lexeme(lemma, lemma, PrimaryPos::Noun, attrs)
    }

    fn plain(seq: &str) -> PhoneticAttributes {
        attributes(seq, LexemeAttributes::empty()).unwrap()
    }

    fn sequences(roots: &[Root]) -> Vec<&str> {
        roots.iter().map(Root::sequence).collect()
    }

    #[test]
    fn unmodified_lexeme_has_one_root() {
        let roots = generate(&noun("kitap", &[])).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].sequence(), "kitap");
        assert_eq!(roots[0].phonetic_attributes(), plain("kitap"));
        assert!(roots[0].phonetic_expectations().is_empty());
    }

    #[test]
    fn voicing() {
        let roots = generate(&noun("kitap", &[LA::Voicing])).unwrap();
        assert_eq!(sequences(&roots), ["kitap", "kitab"]);

        let original = &roots[0];
        assert_eq!(original.phonetic_attributes(), plain("kitap"));
        assert_eq!(original.phonetic_expectations(), PhoneticExpectations::from(ConsonantStart));

        let modified = &roots[1];
        assert_eq!(
            modified.phonetic_attributes(),
            plain("kitap").without(LastLetterVoicelessStop)
        );
        assert_eq!(modified.phonetic_expectations(), PhoneticExpectations::from(VowelStart));
    }

    #[test]
    fn optional_voicing_leaves_original_open() {
        let roots = generate(&noun("kalp", &[LA::VoicingOpt])).unwrap();
        assert_eq!(sequences(&roots), ["kalp", "kalb"]);
        assert!(roots[0].phonetic_expectations().is_empty());
    }

    #[test]
    fn voicing_after_nk() {
        let roots = generate(&noun("renk", &[LA::Voicing])).unwrap();
        assert_eq!(sequences(&roots), ["renk", "reng"]);
    }

    #[test]
    fn doubling() {
        let roots = generate(&noun("hak", &[LA::Doubling])).unwrap();
        assert_eq!(sequences(&roots), ["hak", "hakk"]);
        assert_eq!(roots[0].phonetic_expectations(), PhoneticExpectations::from(ConsonantStart));
        assert_eq!(roots[1].phonetic_expectations(), PhoneticExpectations::from(VowelStart));
    }

    #[test]
    fn last_vowel_drop() {
        let roots = generate(&noun("ağız", &[LA::LastVowelDrop])).unwrap();
        assert_eq!(sequences(&roots), ["ağız", "ağz"]);
        assert_eq!(roots[0].phonetic_expectations(), PhoneticExpectations::from(ConsonantStart));

        let verb = lexeme("kıvırmak", "kıvır", PrimaryPos::Verb, &[LA::LastVowelDrop]);
        let roots = generate(&verb).unwrap();
        assert_eq!(sequences(&roots), ["kıvır", "kıvr"]);
        assert!(roots[0].phonetic_expectations().is_empty());
        assert_eq!(roots[1].phonetic_expectations(), PhoneticExpectations::from(VowelStart));
    }

    #[test]
    fn inverse_harmony_alone_yields_one_root() {
        let roots = generate(&noun("hal", &[LA::InverseHarmony])).unwrap();
        assert_eq!(roots.len(), 1);
        assert!(roots[0].phonetic_attributes().contains(LastVowelFrontal));
        assert!(!roots[0].phonetic_attributes().contains(LastVowelBack));
    }

    #[test]
    fn progressive_vowel_drop() {
        let verb = lexeme("başlamak", "başla", PrimaryPos::Verb, &[LA::ProgressiveVowelDrop]);
        let roots = generate(&verb).unwrap();
        assert_eq!(sequences(&roots), ["başla", "başl"]);
        assert_eq!(roots[1].phonetic_attributes(), plain("başl"));
        assert_eq!(roots[1].phonetic_expectations(), PhoneticExpectations::from(VowelStart));
    }

    #[test]
    fn special_roots_strip_the_attribute() {
        let verb = lexeme("demek", "de", PrimaryPos::Verb, &[LA::Special]);
        let roots = generate(&verb).unwrap();
        assert_eq!(sequences(&roots), ["de", "di"]);
        for root in &roots {
            assert!(!root.lexeme().attributes().contains(LA::Special));
            assert_eq!(root.lexeme().lemma(), "demek");
            assert!(root.phonetic_expectations().is_empty());
        }
    }

    #[test]
    fn special_root_for_any_pos() {
        let adv = lexeme("içeri", "içeri", PrimaryPos::Adverb, &[LA::Special]);
        let roots = generate(&adv).unwrap();
        assert_eq!(sequences(&roots), ["içeri", "içer"]);
        assert_eq!(root_change("içeri", PrimaryPos::Noun), Some("içer"));
        assert_eq!(root_change("ben", PrimaryPos::Pronoun), Some("ban"));
        assert_eq!(root_change("ben", PrimaryPos::Noun), None);
    }

    #[test]
    fn unhandled_special_root() {
        let err = generate(&noun("masa", &[LA::Special])).unwrap_err();
        assert_eq!(
            err,
            MorphError::UnhandledSpecialRoot {
                lemma: "masa".to_string(),
                pos: PrimaryPos::Noun,
            }
        );
    }

    #[test]
    fn ends_with_ayn_vowel_final() {
        let lex = noun("cami", &[LA::EndsWithAyn]);
        let roots = generate(&lex).unwrap();
        assert_eq!(roots.len(), 2);

        let plain_root = &roots[0];
        assert!(plain_root.phonetic_attributes().contains(LastLetterVowel));
        assert!(plain_root.phonetic_expectations().is_empty());

        let ayn = &roots[1];
        assert_eq!(ayn.sequence(), "cami");
        assert!(ayn.phonetic_attributes().contains(LastLetterConsonant));
        assert!(!ayn.phonetic_attributes().contains(LastLetterVowel));
        assert_eq!(ayn.phonetic_expectations(), PhoneticExpectations::from(VowelStart));

        for root in &roots {
            assert!(Arc::ptr_eq(root.lexeme_arc(), &lex));
        }
    }

    #[test]
    fn ends_with_ayn_combines_with_other_modifiers() {
        let roots = generate(&noun("saat", &[LA::EndsWithAyn, LA::InverseHarmony])).unwrap();
        assert_eq!(roots.len(), 2);
        for root in &roots {
            assert!(root.phonetic_attributes().contains(LastVowelFrontal));
            assert!(root.lexeme().attributes().contains(LA::EndsWithAyn));
        }
        assert_eq!(roots[1].phonetic_expectations(), PhoneticExpectations::from(VowelStart));
    }

    #[test]
    fn voicing_a_vowel_fails() {
        assert_eq!(
            generate(&noun("masa", &[LA::Voicing])).unwrap_err(),
            MorphError::NotVoiceable('a')
        );
    }

    #[test]
    fn root_set_indexes_by_sequence() {
        let lexemes = [
            Lexeme::new("kitap", "kitap", PrimaryPos::Noun, None, LexemeAttributes::of(&[LA::Voicing])),
            Lexeme::new("ben", "ben", PrimaryPos::Pronoun, Some(SecondaryPos::Personal), LexemeAttributes::of(&[LA::Special])),
            Lexeme::new("kitap", "kitap", PrimaryPos::Noun, None, LexemeAttributes::of(&[LA::Voicing])),
        ];
        let set = generate_all(&lexemes).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.get("kitab").len(), 1);
        assert_eq!(set.get("ban")[0].lexeme().lemma(), "ben");
        assert!(set.get("kita").is_empty());
        assert_eq!(set.max_sequence_len(), 5);
        assert_eq!(set.iter().count(), 4);
    }
}
