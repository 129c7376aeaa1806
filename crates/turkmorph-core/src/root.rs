// Concrete surface roots produced from lexemes

use std::fmt;
use std::sync::Arc;

use crate::lexeme::Lexeme;
use crate::phonetic::{PhoneticAttributes, PhoneticExpectations};

/// A surface root: the string a suffix chain attaches to.
///
/// One lexeme may present several roots (`kitap` and `kitab`). Roots are
/// value-equal on all four fields. The lexeme is shared behind an `Arc` since
/// every root of a lexeme refers to it and roots are cloned into every parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Root {
    sequence: String,
    lexeme: Arc<Lexeme>,
    phonetic_attributes: PhoneticAttributes,
    phonetic_expectations: PhoneticExpectations,
}

impl Root {
    pub fn new(
        sequence: impl Into<String>,
        lexeme: Arc<Lexeme>,
        phonetic_attributes: PhoneticAttributes,
        phonetic_expectations: PhoneticExpectations,
    ) -> Self {
        Self {
            sequence: sequence.into(),
            lexeme,
            phonetic_attributes,
            phonetic_expectations,
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn lexeme(&self) -> &Lexeme {
        &self.lexeme
    }

    /// Shared handle to the lexeme.
    pub fn lexeme_arc(&self) -> &Arc<Lexeme> {
        &self.lexeme
    }

    pub fn phonetic_attributes(&self) -> PhoneticAttributes {
        self.phonetic_attributes
    }

    pub fn phonetic_expectations(&self) -> PhoneticExpectations {
        self.phonetic_expectations
    }

    /// Copy of this root attached to a different lexeme.
    pub fn with_lexeme(&self, lexeme: Arc<Lexeme>) -> Self {
        Self {
            lexeme,
            ..self.clone()
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {:?}",
            self.sequence,
            self.lexeme.render_head(),
            self.phonetic_attributes
        )?;
        if !self.phonetic_expectations.is_empty() {
            write!(f, " expects {:?}", self.phonetic_expectations)?;
        }
        Ok(())
    }
}
