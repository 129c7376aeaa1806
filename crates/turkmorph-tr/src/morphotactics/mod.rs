// Turkish morphotactics: a compact suffix graph for nouns, adjectives,
// verbs, pronouns and the closed word classes.
//
// State naming follows the word being built: NOUN_WITH_AGREEMENT is a noun
// that has taken its number agreement, and so on.

use turkmorph_core::lexeme::{PrimaryPos, SecondaryPos};
use turkmorph_core::phonetic::PhoneticAttribute::LastLetterVowel;
use turkmorph_core::phonetic::PhoneticAttributes;
use turkmorph_graph::GraphError;
use turkmorph_graph::form::SuffixForm;
use turkmorph_graph::graph::{StateId, StateType, SuffixGraph, SuffixGraphBuilder, SuffixId, SuffixKind};

use PrimaryPos as P;
use StateType::{Derivational, Terminal, Transfer};
use SuffixKind::{FreeTransition, Inflectional};

/// Declare one suffix with a single form.
fn suffix(b: &mut SuffixGraphBuilder, name: &str, kind: SuffixKind, template: &str) -> Result<SuffixId, GraphError> {
    b.add_suffix(name, kind, vec![SuffixForm::new(template)])
}

fn connect_all(
    b: &mut SuffixGraphBuilder,
    from: StateId,
    suffixes: &[SuffixId],
    to: StateId,
) -> Result<(), GraphError> {
    for &s in suffixes {
        b.connect(from, s, to)?;
    }
    Ok(())
}

/// Allomorphs of a vowel-initial suffix that takes a buffer consonant after
/// a vowel: `yI` after `araba`, `I` after `ev`.
fn buffered(after_vowel: &str, after_consonant: &str) -> Vec<SuffixForm> {
    vec![
        SuffixForm::new(after_vowel).requires(PhoneticAttributes::from(LastLetterVowel)),
        SuffixForm::new(after_consonant),
    ]
}

/// Case suffixes shared by nouns and pronouns.
struct Cases {
    nom: SuffixId,
    acc: SuffixId,
    dat: SuffixId,
    loc: SuffixId,
    abl: SuffixId,
    genitive: SuffixId,
    ins: SuffixId,
}

impl Cases {
    fn declare(b: &mut SuffixGraphBuilder) -> Result<Self, GraphError> {
        Ok(Self {
            nom: suffix(b, "Nom", Inflectional, "")?,
            acc: b.add_suffix("Acc", Inflectional, buffered("yI", "I"))?,
            dat: b.add_suffix("Dat", Inflectional, buffered("yA", "A"))?,
            loc: suffix(b, "Loc", Inflectional, "DA")?,
            abl: suffix(b, "Abl", Inflectional, "DAn")?,
            genitive: suffix(b, "Gen", Inflectional, "+nIn")?,
            ins: suffix(b, "Ins", Inflectional, "+ylA")?,
        })
    }

    fn all(&self) -> [SuffixId; 7] {
        [self.nom, self.acc, self.dat, self.loc, self.abl, self.genitive, self.ins]
    }
}

/// Build the Turkish morphotactic graph.
pub fn basic_graph() -> Result<SuffixGraph, GraphError> {
    let mut b = SuffixGraph::builder();

    // -- Nouns --
    let noun_root = b.add_state("NOUN_ROOT", Transfer, P::Noun)?;
    let noun_agr = b.add_state("NOUN_WITH_AGREEMENT", Transfer, P::Noun)?;
    let noun_pnon = b.add_state("NOUN_WITHOUT_POSSESSION", Transfer, P::Noun)?;
    let noun_poss = b.add_state("NOUN_WITH_POSSESSION", Transfer, P::Noun)?;
    let noun_p3 = b.add_state("NOUN_WITH_P3", Transfer, P::Noun)?;
    let noun_case = b.add_state("NOUN_WITH_CASE", Terminal, P::Noun)?;
    let noun_deriv = b.add_state("NOUN_NOM_DERIV", Derivational, P::Noun)?;

    // -- Adjectives and adverbs --
    let adj_root = b.add_state("ADJ_ROOT", Transfer, P::Adjective)?;
    let adj_terminal = b.add_state("ADJ_TERMINAL", Terminal, P::Adjective)?;
    let adj_deriv = b.add_state("ADJ_DERIV", Derivational, P::Adjective)?;
    let adv_root = b.add_state("ADV_ROOT", Terminal, P::Adverb)?;

    // -- Verbs --
    let verb_root = b.add_state("VERB_ROOT", Transfer, P::Verb)?;
    let verb_polarity = b.add_state("VERB_WITH_POLARITY", Transfer, P::Verb)?;
    let verb_deriv = b.add_state("VERB_POLARITY_DERIV", Derivational, P::Verb)?;
    let verb_past = b.add_state("VERB_WITH_PAST", Transfer, P::Verb)?;
    let verb_prog = b.add_state("VERB_WITH_PROG", Transfer, P::Verb)?;
    let verb_fut_c = b.add_state("VERB_WITH_FUT_CONS", Transfer, P::Verb)?;
    let verb_fut_v = b.add_state("VERB_WITH_FUT_VOWEL", Transfer, P::Verb)?;
    let verb_terminal = b.add_state("VERB_TERMINAL", Terminal, P::Verb)?;

    // -- Pronouns --
    let pron_root = b.add_state("PRON_ROOT", Transfer, P::Pronoun)?;
    let pron_pers = b.add_state("PRON_PERS_ROOT", Transfer, P::Pronoun)?;
    let pron_agr = b.add_state("PRON_WITH_AGREEMENT", Transfer, P::Pronoun)?;
    let pron_poss = b.add_state("PRON_WITH_POSSESSION", Transfer, P::Pronoun)?;
    let pron_case = b.add_state("PRON_WITH_CASE", Terminal, P::Pronoun)?;

    // -- Numerals --
    let num_root = b.add_state("NUM_ROOT", Transfer, P::Numeral)?;

    let cases = Cases::declare(&mut b)?;
    let free = suffix(&mut b, "Free", FreeTransition, "")?;

    // Noun agreement, possession and case.
    let a3sg = suffix(&mut b, "A3sg", Inflectional, "")?;
    let a3pl = suffix(&mut b, "A3pl", Inflectional, "lAr")?;
    connect_all(&mut b, noun_root, &[a3sg, a3pl], noun_agr)?;

    let pnon = suffix(&mut b, "Pnon", Inflectional, "")?;
    b.connect(noun_agr, pnon, noun_pnon)?;
    let possessives = [
        suffix(&mut b, "P1sg", Inflectional, "+Im")?,
        suffix(&mut b, "P2sg", Inflectional, "+In")?,
        suffix(&mut b, "P1pl", Inflectional, "+ImIz")?,
        suffix(&mut b, "P2pl", Inflectional, "+InIz")?,
    ];
    connect_all(&mut b, noun_agr, &possessives, noun_poss)?;
    let p3 = [
        suffix(&mut b, "P3sg", Inflectional, "+sI")?,
        suffix(&mut b, "P3pl", Inflectional, "lArI")?,
    ];
    connect_all(&mut b, noun_agr, &p3, noun_p3)?;

    connect_all(&mut b, noun_pnon, &cases.all(), noun_case)?;
    connect_all(&mut b, noun_poss, &cases.all(), noun_case)?;

    // After a third-person possessive the cases take a pronominal `n`.
    let p3_cases = [
        cases.nom,
        suffix(&mut b, "Acc", Inflectional, "+nI")?,
        suffix(&mut b, "Dat", Inflectional, "+nA")?,
        suffix(&mut b, "Loc", Inflectional, "nDA")?,
        suffix(&mut b, "Abl", Inflectional, "nDAn")?,
        suffix(&mut b, "Gen", Inflectional, "nIn")?,
        cases.ins,
    ];
    connect_all(&mut b, noun_p3, &p3_cases, noun_case)?;

    // Nominal derivations hang off a bare nominative.
    let nom_deriv = suffix(&mut b, "Nom", Inflectional, "")?;
    b.connect(noun_pnon, nom_deriv, noun_deriv)?;
    let with = suffix(&mut b, "With", SuffixKind::Derivational, "lI")?;
    let without = suffix(&mut b, "Without", SuffixKind::Derivational, "sIz")?;
    let agt = suffix(&mut b, "Agt", SuffixKind::Derivational, "CI")?;
    connect_all(&mut b, noun_deriv, &[with, without], adj_root)?;
    b.connect(noun_deriv, agt, noun_root)?;

    // Adjectives.
    b.connect(adj_root, free, adj_terminal)?;
    b.connect(adj_root, free, adj_deriv)?;
    let ly = suffix(&mut b, "Ly", SuffixKind::Derivational, "CA")?;
    let become_verb = suffix(&mut b, "Become", SuffixKind::Derivational, "lAş")?;
    b.connect(adj_deriv, ly, adv_root)?;
    b.connect(adj_deriv, become_verb, verb_root)?;

    // Verbs.
    let pos = suffix(&mut b, "Pos", Inflectional, "")?;
    let neg = suffix(&mut b, "Neg", Inflectional, "mA")?;
    connect_all(&mut b, verb_root, &[pos, neg], verb_polarity)?;

    b.connect(verb_polarity, free, verb_deriv)?;
    let inf = suffix(&mut b, "Inf", SuffixKind::Derivational, "mAk")?;
    b.connect(verb_deriv, inf, noun_root)?;

    let past = suffix(&mut b, "Past", Inflectional, "DI")?;
    b.connect(verb_polarity, past, verb_past)?;
    let past_agreements = [
        suffix(&mut b, "A1sg", Inflectional, "m")?,
        suffix(&mut b, "A2sg", Inflectional, "n")?,
        a3sg,
        suffix(&mut b, "A1pl", Inflectional, "k")?,
        suffix(&mut b, "A2pl", Inflectional, "nIz")?,
        a3pl,
    ];
    connect_all(&mut b, verb_past, &past_agreements, verb_terminal)?;

    let a1sg = suffix(&mut b, "A1sg", Inflectional, "+Im")?;
    let a2sg = suffix(&mut b, "A2sg", Inflectional, "sIn")?;
    let a1pl = suffix(&mut b, "A1pl", Inflectional, "+Iz")?;
    let a2pl = suffix(&mut b, "A2pl", Inflectional, "sInIz")?;

    let prog = suffix(&mut b, "Prog", Inflectional, "+Iyor")?;
    b.connect(verb_polarity, prog, verb_prog)?;
    connect_all(&mut b, verb_prog, &[a1sg, a2sg, a3sg, a1pl, a2pl, a3pl], verb_terminal)?;

    // `k` turns into `ğ` before a vowel-initial agreement.
    let fut = suffix(&mut b, "Fut", Inflectional, "+yAcAk")?;
    let fut_soft = suffix(&mut b, "Fut", Inflectional, "+yAcAğ")?;
    b.connect(verb_polarity, fut, verb_fut_c)?;
    b.connect(verb_polarity, fut_soft, verb_fut_v)?;
    connect_all(&mut b, verb_fut_c, &[a2sg, a3sg, a2pl, a3pl], verb_terminal)?;
    connect_all(&mut b, verb_fut_v, &[a1sg, a1pl], verb_terminal)?;

    // Pronouns. Personal pronouns carry their person in the lemma.
    connect_all(&mut b, pron_root, &[a3sg, a3pl], pron_agr)?;
    b.connect(pron_agr, pnon, pron_poss)?;
    b.connect(pron_pers, free, pron_poss)?;
    connect_all(&mut b, pron_poss, &cases.all(), pron_case)?;

    // Numerals inflect like nouns.
    b.connect(num_root, free, noun_root)?;

    b.set_default_state(P::Noun, noun_root)?;
    b.set_default_state(P::Adjective, adj_root)?;
    b.set_default_state(P::Adverb, adv_root)?;
    b.set_default_state(P::Verb, verb_root)?;
    b.set_default_state(P::Pronoun, pron_root)?;
    b.set_default_state_for(P::Pronoun, SecondaryPos::Personal, pron_pers)?;
    b.set_default_state(P::Numeral, num_root)?;

    // Closed classes end where they start.
    for pos in [
        P::Conjunction,
        P::Interjection,
        P::Determiner,
        P::PostPositive,
        P::Question,
        P::Duplicator,
        P::Punctuation,
    ] {
        let name = format!("{}_ROOT", pos.short_form().to_uppercase());
        let state = b.add_state(&name, Terminal, pos)?;
        b.set_default_state(pos, state)?;
    }

    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_builds() {
        let graph = basic_graph().unwrap();
        assert!(graph.state_count() > 20);
        for name in ["NOUN_ROOT", "NOUN_WITH_CASE", "VERB_TERMINAL", "ADJ_DERIV", "CONJ_ROOT", "PUNC_ROOT"] {
            assert!(graph.state_by_name(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn every_transition_resolves() {
        let graph = basic_graph().unwrap();
        for (_, state) in graph.states() {
            for t in state.outgoing() {
                assert!(graph.state(t.target).is_some());
                assert!(graph.suffix(t.suffix).is_some());
            }
        }
    }

    #[test]
    fn terminal_states() {
        let graph = basic_graph().unwrap();
        let terminal = |name: &str| {
            let id = graph.state_by_name(name).unwrap();
            graph.state(id).unwrap().is_terminal()
        };
        assert!(terminal("NOUN_WITH_CASE"));
        assert!(terminal("ADV_ROOT"));
        assert!(!terminal("NOUN_ROOT"));
        assert!(!terminal("NOUN_NOM_DERIV"));
        assert!(!terminal("VERB_WITH_POLARITY"));
    }

    #[test]
    fn case_allomorphs_are_ordered() {
        let graph = basic_graph().unwrap();
        let acc = graph.suffixes().iter().find(|s| s.name() == "Acc").unwrap();
        let templates: Vec<&str> = acc.forms().iter().map(|f| f.template()).collect();
        assert_eq!(templates, ["yI", "I"]);
        assert!(acc.forms()[0].precondition().require.contains(LastLetterVowel));
        assert!(acc.forms()[1].precondition().require.is_empty());
    }

    #[test]
    fn parses_pick_the_buffered_form_after_a_vowel() {
        use crate::lexicon::{generate_all, parse_lexicon};
        use crate::parser::ContextlessParser;
        use std::sync::Arc;
        use turkmorph_graph::form_graph::SuffixFormGraph;

        let lexemes = parse_lexicon("araba\nev\ncami [A:EndsWithAyn]").unwrap();
        let roots = generate_all(&lexemes).unwrap();
        let graph = SuffixFormGraph::new(Arc::new(basic_graph().unwrap()));
        let parser = ContextlessParser::new(Arc::new(graph), Arc::new(roots));

        let form_of = |word: &str, case: &str| -> Vec<(String, usize)> {
            parser
                .parse(word)
                .unwrap()
                .iter()
                .filter_map(|p| {
                    let s = p.suffixes().iter().find(|s| s.name() == case)?;
                    Some((s.surface().to_string(), s.application().form_index))
                })
                .collect()
        };

        assert_eq!(form_of("arabayı", "Acc"), [("yı".to_string(), 0)]);
        assert_eq!(form_of("evi", "Acc"), [("i".to_string(), 1)]);
        assert_eq!(form_of("arabaya", "Dat"), [("ya".to_string(), 0)]);
        assert_eq!(form_of("eve", "Dat"), [("e".to_string(), 1)]);
        // the ayn root ends in a consonant, so it skips the buffered form
        assert_eq!(form_of("camii", "Acc"), [("i".to_string(), 1)]);
        assert_eq!(form_of("camiyi", "Acc"), [("yi".to_string(), 0)]);
    }

    #[test]
    fn genitive_and_become_are_connected() {
        let graph = basic_graph().unwrap();
        let names = |state: &str| -> Vec<&str> {
            let id = graph.state_by_name(state).unwrap();
            graph
                .state(id)
                .unwrap()
                .outgoing()
                .iter()
                .map(|t| graph.suffix(t.suffix).unwrap().name())
                .collect()
        };
        assert!(names("NOUN_WITHOUT_POSSESSION").contains(&"Gen"));
        assert!(names("ADJ_DERIV").contains(&"Become"));
    }

    #[test]
    fn derivational_states_are_marked() {
        let graph = basic_graph().unwrap();
        let id = graph.state_by_name("ADJ_DERIV").unwrap();
        assert_eq!(graph.state(id).unwrap().state_type(), Derivational);
    }
}
