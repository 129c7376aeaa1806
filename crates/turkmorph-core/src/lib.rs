//! Shared types for Turkish morphological analysis.
//!
//! - [`letter`] -- Turkish alphabet, letter classes, voicing
//! - [`analyzer`] -- phonetic attributes of character sequences
//! - [`case`] -- Turkish-aware lowercasing
//! - [`phonetic`] -- phonetic attribute and expectation bitsets
//! - [`lexeme`] -- parts of speech, lexeme attributes, lexemes
//! - [`root`] -- concrete surface roots

#[macro_use]
mod set;

pub mod analyzer;
pub mod case;
pub mod letter;
pub mod lexeme;
pub mod phonetic;
pub mod root;

use lexeme::PrimaryPos;

/// Error type for letter, phonetic and root-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MorphError {
    #[error("unknown letter {0:?}: not in the Turkish alphabet")]
    UnknownLetter(char),
    #[error("letter {0:?} cannot be voiced")]
    NotVoiceable(char),
    #[error("empty character sequence")]
    EmptySequence,
    #[error("unhandled special root: {lemma} ({pos})")]
    UnhandledSpecialRoot { lemma: String, pos: PrimaryPos },
}
