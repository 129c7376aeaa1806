//! Morphotactic graph and lazily expanded suffix-form graph.
//!
//! The morphotactic graph declares which suffixes may follow which; it is
//! built once through [`graph::SuffixGraphBuilder`] and frozen. The
//! suffix-form graph refines it with the phonetic attributes of the word
//! built so far, so that each node knows exactly which allomorph every
//! outgoing suffix takes.
//!
//! # Architecture
//!
//! - [`graph`] -- States, suffixes, transitions and the builder
//! - [`form`] -- Allomorph templates, preconditions and form selection
//! - [`form_graph`] -- Concurrent, lazily expanded `(state, attributes)` graph

pub mod form;
pub mod form_graph;
pub mod graph;

use graph::{StateId, SuffixId};
use turkmorph_core::MorphError;
use turkmorph_core::lexeme::PrimaryPos;
use turkmorph_core::phonetic::PhoneticAttributes;

/// Error type for graph construction and expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("no default state for root {lemma} ({pos})")]
    NoDefaultState { lemma: String, pos: PrimaryPos },
    #[error("suffix-form node already exists: state {state}, attributes {attributes:?}")]
    DuplicateNode {
        state: StateId,
        attributes: PhoneticAttributes,
    },
    #[error("unknown state {0}")]
    UnknownState(StateId),
    #[error("unknown suffix {0}")]
    UnknownSuffix(SuffixId),
    #[error("duplicate state name: {0}")]
    DuplicateState(String),
    #[error("invalid template {template:?} in suffix {suffix}: {reason}")]
    InvalidTemplate {
        suffix: String,
        template: String,
        reason: MorphError,
    },
    #[error("too many states or suffixes")]
    TooLarge,
    #[error(transparent)]
    Morph(#[from] MorphError),
}
