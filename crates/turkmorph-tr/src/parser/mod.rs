// Contextless parser: breadth-first search over the suffix-form graph
//
// A partial parse is a root plus the suffix applications consumed so far.
// Seeds are the roots whose sequence prefixes the input; every step follows
// one edge whose surface string matches the remaining input. A parse is
// accepted when the input is exhausted on a terminal node.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};
use turkmorph_core::case::to_lower;
use turkmorph_core::letter::require_letter;
use turkmorph_core::lexeme::PrimaryPos;
use turkmorph_core::phonetic::PhoneticExpectations;
use turkmorph_core::root::Root;
use turkmorph_graph::GraphError;
use turkmorph_graph::form::{SuffixFormApplication, satisfies};
use turkmorph_graph::form_graph::{SuffixFormGraph, SuffixFormNode};
use turkmorph_graph::graph::SuffixKind;

use crate::lexicon::RootSet;

/// Parser limits. Both are off by default, so a parse returns every
/// analysis of the word.
///
/// Either limit truncates the result list when it is hit. A full frontier
/// drops the new partial parses and logs a warning once per word; the parses
/// accepted before that are still returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Stop after this many parses. Zero means no limit.
    pub max_results: usize,
    /// Drop partial parses beyond this frontier size. Zero means no limit.
    pub max_frontier: usize,
}

/// Cooperative cancellation for a running parse.
///
/// Clones share the flag. The parser checks it between frontier pops and
/// returns the parses found so far.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One suffix of a parse, with what it rendered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSuffix {
    name: Arc<str>,
    kind: SuffixKind,
    /// Part of speech of the state the suffix leads to.
    pos: PrimaryPos,
    application: SuffixFormApplication,
}

impl AppliedSuffix {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SuffixKind {
        self.kind
    }

    pub fn pos(&self) -> PrimaryPos {
        self.pos
    }

    pub fn surface(&self) -> &str {
        &self.application.surface
    }

    pub fn application(&self) -> &SuffixFormApplication {
        &self.application
    }
}

/// A complete parse: a root and its ordered suffix applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    root: Root,
    suffixes: Vec<AppliedSuffix>,
}

impl ParseResult {
    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn suffixes(&self) -> &[AppliedSuffix] {
        &self.suffixes
    }

    /// The surface word this parse accounts for.
    pub fn surface(&self) -> String {
        let mut out = self.root.sequence().to_string();
        for s in &self.suffixes {
            out.push_str(s.surface());
        }
        out
    }
}

/// `lemma+Pos[+Sec](+Suffix[form])*`; derivations are preceded by the POS
/// they produce and free transitions are not shown.
impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root.lexeme().render_head())?;
        for s in &self.suffixes {
            match s.kind {
                SuffixKind::FreeTransition => continue,
                SuffixKind::Derivational => write!(f, "+{}+{}", s.pos, s.name)?,
                SuffixKind::Inflectional => write!(f, "+{}", s.name)?,
            }
            if !s.surface().is_empty() {
                write!(f, "[{}]", s.surface())?;
            }
        }
        Ok(())
    }
}

struct Partial<'r> {
    /// Byte offset into the lowercased input.
    position: usize,
    node: Arc<SuffixFormNode>,
    root: &'r Root,
    suffixes: Vec<AppliedSuffix>,
    /// Root expectations not yet met by a non-empty surface.
    pending: PhoneticExpectations,
    /// Consecutive empty-surface steps.
    empty_steps: usize,
}

/// Breadth-first parser over a shared suffix-form graph.
#[derive(Debug, Clone)]
pub struct ContextlessParser {
    graph: Arc<SuffixFormGraph>,
    roots: Arc<RootSet>,
    options: ParserOptions,
}

impl ContextlessParser {
    pub fn new(graph: Arc<SuffixFormGraph>, roots: Arc<RootSet>) -> Self {
        Self {
            graph,
            roots,
            options: ParserOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
    }

    pub fn graph(&self) -> &Arc<SuffixFormGraph> {
        &self.graph
    }

    pub fn roots(&self) -> &Arc<RootSet> {
        &self.roots
    }

    /// Parse a word. No parse is an empty list, not an error.
    pub fn parse(&self, word: &str) -> Result<Vec<ParseResult>, GraphError> {
        self.parse_with_cancel(word, None)
    }

    /// Parse a word, stopping early once `cancel` is raised.
    ///
    /// The word is lowercased first; a character outside the Turkish
    /// alphabet fails the parse.
    pub fn parse_with_cancel(
        &self,
        word: &str,
        cancel: Option<&CancelFlag>,
    ) -> Result<Vec<ParseResult>, GraphError> {
        let mut results = Vec::new();
        self.parse_each(word, cancel, |parse| results.push(parse))?;
        Ok(results)
    }

    /// Parse a word, handing each analysis to `on_parse` as soon as it is
    /// accepted. Returns the number of analyses.
    ///
    /// Analyses arrive in breadth-first order, so a parse cancelled from
    /// inside `on_parse` has produced a prefix of the full list.
    pub fn parse_each(
        &self,
        word: &str,
        cancel: Option<&CancelFlag>,
        mut on_parse: impl FnMut(ParseResult),
    ) -> Result<usize, GraphError> {
        let input = to_lower(word);
        for c in input.chars() {
            require_letter(c)?;
        }

        let mut frontier = self.seed(&input)?;
        let mut found = 0usize;
        let max_empty_steps = self.graph.suffix_graph().state_count();
        let mut overflowed = false;

        while let Some(partial) = frontier.pop_front() {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                debug!(word = %input, found, "parse cancelled");
                break;
            }

            let rest = &input[partial.position..];
            if rest.is_empty() && partial.node.is_terminal() && partial.pending.satisfied_at_word_end() {
                on_parse(ParseResult {
                    root: partial.root.clone(),
                    suffixes: partial.suffixes.clone(),
                });
                found += 1;
                if self.options.max_results != 0 && found >= self.options.max_results {
                    debug!(word = %input, limit = self.options.max_results, "result limit reached");
                    break;
                }
            }

            for edge in self.graph.edges(&partial.node)? {
                let surface: &str = &edge.application.surface;
                if !rest.starts_with(surface) || !satisfies(partial.pending, surface) {
                    continue;
                }

                let empty_steps = if surface.is_empty() {
                    partial.empty_steps + 1
                } else {
                    0
                };
                if empty_steps > max_empty_steps {
                    trace!(word = %input, state = %partial.node.state(), "dropped empty cycle");
                    continue;
                }

                if self.options.max_frontier != 0 && frontier.len() >= self.options.max_frontier {
                    if !overflowed {
                        warn!(word = %input, limit = self.options.max_frontier, "parse frontier full");
                        overflowed = true;
                    }
                    continue;
                }

                let suffix_graph = self.graph.suffix_graph();
                let suffix = suffix_graph
                    .suffix(edge.application.suffix)
                    .ok_or(GraphError::UnknownSuffix(edge.application.suffix))?;
                let target_pos = suffix_graph
                    .state(edge.target.state)
                    .ok_or(GraphError::UnknownState(edge.target.state))?
                    .pos();
                let node = self
                    .graph
                    .get_or_create_node(edge.target.state, edge.target.attributes)?;

                let mut suffixes = Vec::with_capacity(partial.suffixes.len() + 1);
                suffixes.extend_from_slice(&partial.suffixes);
                suffixes.push(AppliedSuffix {
                    name: Arc::clone(suffix.name_arc()),
                    kind: suffix.kind(),
                    pos: target_pos,
                    application: edge.application.clone(),
                });

                frontier.push_back(Partial {
                    position: partial.position + surface.len(),
                    node,
                    root: partial.root,
                    suffixes,
                    pending: if surface.is_empty() {
                        partial.pending
                    } else {
                        PhoneticExpectations::empty()
                    },
                    empty_steps,
                });
            }
            trace!(word = %input, frontier = frontier.len(), "frontier");
        }

        debug!(word = %input, parses = found, "parsed");
        Ok(found)
    }

    /// Enqueue every root whose sequence prefixes `input`, shortest first.
    fn seed<'r>(&'r self, input: &str) -> Result<VecDeque<Partial<'r>>, GraphError> {
        let mut frontier = VecDeque::new();
        for (i, c) in input.char_indices() {
            let prefix = &input[..i + c.len_utf8()];
            for root in self.roots.get(prefix) {
                let state = match self.graph.default_state_for_root(root) {
                    Ok(state) => state,
                    Err(GraphError::NoDefaultState { lemma, pos }) => {
                        warn!(%lemma, %pos, "root has no default state, skipped");
                        continue;
                    }
                    Err(e) => return Err(e),
                };
                let node = self.graph.get_or_create_node(state, root.phonetic_attributes())?;
                frontier.push_back(Partial {
                    position: prefix.len(),
                    node,
                    root,
                    suffixes: Vec::new(),
                    pending: root.phonetic_expectations(),
                    empty_steps: 0,
                });
            }
        }
        Ok(frontier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{generate_all, parse_lexicon};
    use crate::morphotactics::basic_graph;
    use turkmorph_core::MorphError;

    fn parser(lexicon: &str) -> ContextlessParser {
        let lexemes = parse_lexicon(lexicon).unwrap();
        let roots = generate_all(&lexemes).unwrap();
        let graph = SuffixFormGraph::new(Arc::new(basic_graph().unwrap()));
        ContextlessParser::new(Arc::new(graph), Arc::new(roots))
    }

    fn rendered(p: &ContextlessParser, word: &str) -> Vec<String> {
        p.parse(word).unwrap().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn bare_noun() {
        let p = parser("kitap");
        assert_eq!(rendered(&p, "kitap"), ["kitap+Noun+A3sg+Pnon+Nom"]);
    }

    #[test]
    fn possessive_and_dative() {
        let p = parser("kitap [A:Voicing]");
        assert_eq!(rendered(&p, "kitabıma"), ["kitap+Noun+A3sg+P1sg[ım]+Dat[a]"]);
        assert_eq!(rendered(&p, "kitaplar"), ["kitap+Noun+A3pl[lar]+Pnon+Nom"]);
        assert!(rendered(&p, "kitab").is_empty());
        assert!(rendered(&p, "kitapım").is_empty());
    }

    #[test]
    fn uppercase_input_is_lowercased() {
        let p = parser("kitap");
        assert_eq!(rendered(&p, "KİTAP"), ["kitap+Noun+A3sg+Pnon+Nom"]);
    }

    #[test]
    fn derivation_renders_target_pos() {
        let p = parser("tuz");
        let parses = rendered(&p, "tuzlu");
        assert_eq!(parses, ["tuz+Noun+A3sg+Pnon+Nom+Adj+With[lu]"]);
        let parses = rendered(&p, "tuzsuzca");
        assert_eq!(parses, ["tuz+Noun+A3sg+Pnon+Nom+Adj+Without[suz]+Adv+Ly[ca]"]);
    }

    #[test]
    fn verb_tenses() {
        let p = parser("gelmek");
        assert_eq!(rendered(&p, "geldim"), ["gelmek+Verb+Pos+Past[di]+A1sg[m]"]);
        assert_eq!(rendered(&p, "gelmedi"), ["gelmek+Verb+Neg[me]+Past[di]+A3sg"]);
        assert_eq!(rendered(&p, "geliyorum"), ["gelmek+Verb+Pos+Prog[iyor]+A1sg[um]"]);
        assert_eq!(rendered(&p, "geleceğim"), ["gelmek+Verb+Pos+Fut[eceğ]+A1sg[im]"]);
        assert_eq!(
            rendered(&p, "gelmek"),
            ["gelmek+Verb+Pos+Noun+Inf[mek]+A3sg+Pnon+Nom"]
        );
    }

    #[test]
    fn unknown_word_is_empty() {
        let p = parser("kitap");
        assert!(p.parse("foo").unwrap().is_empty());
        assert!(p.parse("").unwrap().is_empty());
    }

    #[test]
    fn unknown_letter_is_an_error() {
        let p = parser("kitap");
        assert_eq!(
            p.parse("kitap1").unwrap_err(),
            GraphError::Morph(MorphError::UnknownLetter('1'))
        );
    }

    #[test]
    fn root_without_default_state_is_skipped() {
        let p = parser("zzz [P:Unk]\nkitap");
        assert!(p.parse("zzz").unwrap().is_empty());
        assert_eq!(p.parse("kitap").unwrap().len(), 1);
    }

    #[test]
    fn result_limit() {
        let p = parser("kitap").with_options(ParserOptions {
            max_results: 1,
            ..ParserOptions::default()
        });
        // kitapları: A3pl+Pnon+Acc, A3sg+P3pl+Nom, A3pl+P3sg+Nom
        assert_eq!(p.parse("kitapları").unwrap().len(), 1);
        let unlimited = parser("kitap");
        assert_eq!(unlimited.options(), ParserOptions { max_results: 0, max_frontier: 0 });
        assert_eq!(unlimited.parse("kitapları").unwrap().len(), 3);
    }

    #[test]
    fn default_options_return_every_homograph() {
        let flags = [
            "NoVoicing", "Aorist_I", "Aorist_A", "Causative_t", "Causative_Ir", "Causative_It",
            "Causative_Ar", "Causative_dIr", "Passive_In", "Passive_InIl", "Passive_Il",
            "Reflexive", "Reciprocal", "NoQuestion",
        ];
        let lexicon: Vec<String> = flags
            .iter()
            .enumerate()
            .flat_map(|(i, a)| flags[i + 1..].iter().map(move |b| format!("ev [A:{a}, {b}]")))
            .take(70)
            .collect();
        let p = parser(&lexicon.join("\n"));
        assert_eq!(p.roots().get("ev").len(), 70);

        let parses = p.parse("ev").unwrap();
        assert_eq!(parses.len(), 70);
        assert!(parses.iter().all(|r| r.to_string() == "ev+Noun+A3sg+Pnon+Nom"));
    }

    #[test]
    fn frontier_limit_truncates() {
        let full = parser("kitap").parse("kitapları").unwrap();
        let p = parser("kitap").with_options(ParserOptions {
            max_frontier: 1,
            ..ParserOptions::default()
        });
        let truncated = p.parse("kitapları").unwrap();
        assert!(truncated.len() < full.len());
        assert!(truncated.iter().all(|r| full.contains(r)));
    }

    #[test]
    fn cancelled_parse_returns_nothing_more() {
        let p = parser("kitap");
        let cancel = CancelFlag::new();
        cancel.cancel();
        assert!(p.parse_with_cancel("kitap", Some(&cancel)).unwrap().is_empty());
        assert!(cancel.clone().is_cancelled());
    }

    #[test]
    fn cancel_after_first_parse_keeps_it() {
        let p = parser("kitap");
        let full = p.parse("kitapları").unwrap();
        assert_eq!(full.len(), 3);

        let cancel = CancelFlag::new();
        let mut seen = Vec::new();
        let found = p
            .parse_each("kitapları", Some(&cancel), |parse| {
                seen.push(parse);
                cancel.cancel();
            })
            .unwrap();
        assert_eq!(found, 1);
        assert_eq!(seen, full[..1]);
    }

    #[test]
    fn cancel_from_another_thread() {
        let p = parser("kitap [A:Voicing]\nev");
        let words = ["kitaplarımızdan", "evlerimizden", "kitapları", "evleri"];
        let full: Vec<Vec<ParseResult>> = words.iter().map(|w| p.parse(w).unwrap()).collect();

        let cancel = CancelFlag::new();
        let partial: Vec<Vec<ParseResult>> = std::thread::scope(|s| {
            let worker = s.spawn(|| {
                words
                    .iter()
                    .map(|w| p.parse_with_cancel(w, Some(&cancel)).unwrap())
                    .collect::<Vec<_>>()
            });
            cancel.cancel();
            worker.join().unwrap()
        });

        // Whenever the flag lands, each word keeps a prefix of its parses.
        for (got, all) in partial.iter().zip(&full) {
            assert!(got.len() <= all.len());
            assert_eq!(got[..], all[..got.len()]);
        }
        // Once raised, later parses stop at the first pop.
        assert!(p.parse_with_cancel("evleri", Some(&cancel)).unwrap().is_empty());
    }

    #[test]
    fn parse_surface_matches_input() {
        let p = parser("kitap [A:Voicing]\nev");
        for word in ["kitabıma", "evlerimizden", "kitapçı"] {
            for parse in p.parse(word).unwrap() {
                assert_eq!(parse.surface(), word);
            }
        }
    }
}
