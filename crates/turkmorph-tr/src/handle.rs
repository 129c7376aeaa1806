// TurkmorphHandle: top-level integration point for Turkish parsing.
//
// Owns the root set and the shared suffix-form graph. The suffix-form graph
// grows as words are parsed; the handle is `Sync`, so one handle can serve
// many threads, and `parse_many` fans a batch out over rayon.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use turkmorph_core::MorphError;
use turkmorph_core::lexeme::Lexeme;
use turkmorph_core::root::Root;
use turkmorph_graph::GraphError;
use turkmorph_graph::form_graph::SuffixFormGraph;
use turkmorph_graph::graph::SuffixGraph;

use crate::lexicon::{LexiconError, RootSet, generate_all, load_lexicon, parse_lexicon};
use crate::morphotactics::basic_graph;
use crate::parser::{CancelFlag, ContextlessParser, ParseResult, ParserOptions};

/// Error type for handle construction and parsing.
#[derive(Debug, thiserror::Error)]
pub enum TurkmorphError {
    #[error("failed to load lexicon: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("root generation failed: {0}")]
    Morph(#[from] MorphError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Owns every component needed to parse Turkish words.
#[derive(Debug)]
pub struct TurkmorphHandle {
    parser: ContextlessParser,
    lexeme_count: usize,
}

impl TurkmorphHandle {
    /// Build a handle over the built-in Turkish morphotactics.
    pub fn from_lexemes(lexemes: &[Lexeme]) -> Result<Self, TurkmorphError> {
        Self::with_graph(lexemes, basic_graph()?)
    }

    /// Build a handle over a caller-supplied morphotactic graph.
    pub fn with_graph(lexemes: &[Lexeme], graph: SuffixGraph) -> Result<Self, TurkmorphError> {
        let roots = generate_all(lexemes)?;
        let form_graph = SuffixFormGraph::new(Arc::new(graph));
        info!(
            lexemes = lexemes.len(),
            roots = roots.len(),
            states = form_graph.suffix_graph().state_count(),
            "created turkmorph handle"
        );
        Ok(Self {
            parser: ContextlessParser::new(Arc::new(form_graph), Arc::new(roots)),
            lexeme_count: lexemes.len(),
        })
    }

    /// Build a handle from lexicon text.
    pub fn from_lexicon_text(text: &str) -> Result<Self, TurkmorphError> {
        Self::from_lexemes(&parse_lexicon(text)?)
    }

    /// Build a handle from a lexicon file.
    pub fn from_lexicon_file(path: impl AsRef<Path>) -> Result<Self, TurkmorphError> {
        Self::from_lexemes(&load_lexicon(path)?)
    }

    /// Parse one word. Unknown words give an empty list.
    pub fn parse(&self, word: &str) -> Result<Vec<ParseResult>, TurkmorphError> {
        Ok(self.parser.parse(word)?)
    }

    /// Parse one word, returning what was found when `cancel` is raised.
    pub fn parse_with_cancel(
        &self,
        word: &str,
        cancel: &CancelFlag,
    ) -> Result<Vec<ParseResult>, TurkmorphError> {
        Ok(self.parser.parse_with_cancel(word, Some(cancel))?)
    }

    /// Parse a batch of words in parallel. Results keep the input order.
    #[cfg(feature = "parallel")]
    pub fn parse_many<S>(&self, words: &[S]) -> Vec<Result<Vec<ParseResult>, TurkmorphError>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        words.par_iter().map(|w| self.parse(w.as_ref())).collect()
    }

    /// Generated roots with exactly this sequence.
    pub fn roots(&self, sequence: &str) -> &[Root] {
        self.parser.roots().get(sequence)
    }

    pub fn root_set(&self) -> &RootSet {
        self.parser.roots()
    }

    pub fn form_graph(&self) -> &Arc<SuffixFormGraph> {
        self.parser.graph()
    }

    pub fn lexeme_count(&self) -> usize {
        self.lexeme_count
    }

    /// Number of suffix-form nodes created so far.
    pub fn node_count(&self) -> usize {
        self.parser.graph().node_count()
    }

    pub fn options(&self) -> ParserOptions {
        self.parser.options()
    }

    pub fn set_max_results(&mut self, value: usize) {
        let mut options = self.parser.options();
        options.max_results = value;
        self.parser.set_options(options);
    }

    pub fn set_max_frontier(&mut self, value: usize) {
        let mut options = self.parser.options();
        options.max_frontier = value;
        self.parser.set_options(options);
    }
}
