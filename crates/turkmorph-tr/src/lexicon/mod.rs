// Lexicon loading: text entries to lexemes
//
// Format, one entry per line:
//
//   kitap [A:Voicing]
//   ben [P:Pron, Pers] [A:Special]
//   gitmek [A:Voicing, Aorist_A]
//   # comment
//
// The `P:` block names the primary POS by its short form and optionally a
// secondary POS. Without it, a lemma ending in `mek`/`mak` is a verb and
// anything else a noun. The infinitive ending is stripped from verb lemmas.

pub mod root_generator;

use std::path::Path;

use hashbrown::HashSet;
use tracing::info;
use turkmorph_core::case::to_lower;
use turkmorph_core::lexeme::{
    Lexeme, LexemeAttribute, LexemeAttributes, PrimaryPos, SecondaryPos,
};

pub use root_generator::{RootSet, generate, generate_all};

/// Error type for lexicon parsing. Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("line {line}: unknown part of speech {value:?}")]
    UnknownPos { line: usize, value: String },
    #[error("line {line}: unknown secondary part of speech {value:?}")]
    UnknownSecondaryPos { line: usize, value: String },
    #[error("line {line}: unknown lexeme attribute {value:?}")]
    UnknownAttribute { line: usize, value: String },
    #[error("line {line}: malformed entry: {reason}")]
    Malformed { line: usize, reason: &'static str },
    #[error("line {line}: empty lemma root for {lemma:?}")]
    EmptyLemmaRoot { line: usize, lemma: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse one lexicon line. Blank and comment lines yield `None`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Lexeme>, LexiconError> {
    let content = match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    };
    let content = content.trim();
    if content.is_empty() {
        return Ok(None);
    }

    let (lemma, mut rest) = match content.find('[') {
        Some(i) => (content[..i].trim(), &content[i..]),
        None => (content, ""),
    };
    if lemma.is_empty() {
        return Err(LexiconError::Malformed {
            line: line_no,
            reason: "missing lemma",
        });
    }

    let mut pos = None;
    let mut secondary = None;
    let mut attributes = LexemeAttributes::empty();

    while !rest.is_empty() {
        let Some(body_end) = rest.find(']') else {
            return Err(LexiconError::Malformed {
                line: line_no,
                reason: "unclosed '['",
            });
        };
        let block = &rest[1..body_end];
        if let Some(value) = block.strip_prefix("P:") {
            let mut parts = value.split(',').map(str::trim);
            let primary = parts.next().unwrap_or_default();
            pos = Some(PrimaryPos::from_short_form(primary).ok_or_else(|| {
                LexiconError::UnknownPos {
                    line: line_no,
                    value: primary.to_string(),
                }
            })?);
            if let Some(sec) = parts.next() {
                secondary = Some(SecondaryPos::from_short_form(sec).ok_or_else(|| {
                    LexiconError::UnknownSecondaryPos {
                        line: line_no,
                        value: sec.to_string(),
                    }
                })?);
            }
        } else if let Some(value) = block.strip_prefix("A:") {
            for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                let attr = LexemeAttribute::from_name(name).ok_or_else(|| {
                    LexiconError::UnknownAttribute {
                        line: line_no,
                        value: name.to_string(),
                    }
                })?;
                attributes.insert(attr);
            }
        } else {
            return Err(LexiconError::Malformed {
                line: line_no,
                reason: "expected a [P:...] or [A:...] block",
            });
        }
        rest = rest[body_end + 1..].trim_start();
        if !rest.is_empty() && !rest.starts_with('[') {
            return Err(LexiconError::Malformed {
                line: line_no,
                reason: "text after attribute block",
            });
        }
    }

    let is_infinitive = lemma.ends_with("mek") || lemma.ends_with("mak");
    let pos = pos.unwrap_or(if is_infinitive {
        PrimaryPos::Verb
    } else {
        PrimaryPos::Noun
    });

    let lemma_root = if pos == PrimaryPos::Verb && is_infinitive {
        &lemma[..lemma.len() - "mek".len()]
    } else {
        lemma
    };
    if lemma_root.is_empty() {
        return Err(LexiconError::EmptyLemmaRoot {
            line: line_no,
            lemma: lemma.to_string(),
        });
    }

    Ok(Some(Lexeme::new(
        lemma,
        to_lower(lemma_root),
        pos,
        secondary,
        attributes,
    )))
}

/// Parse a whole lexicon. Duplicate entries collapse; order is kept.
pub fn parse_lexicon(text: &str) -> Result<Vec<Lexeme>, LexiconError> {
    let mut seen = HashSet::new();
    let mut lexemes = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(lexeme) = parse_line(line, i + 1)? {
            if seen.insert(lexeme.clone()) {
                lexemes.push(lexeme);
            }
        }
    }
    Ok(lexemes)
}

/// Read and parse a lexicon file.
pub fn load_lexicon(path: impl AsRef<Path>) -> Result<Vec<Lexeme>, LexiconError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let lexemes = parse_lexicon(&text)?;
    info!(path = %path.display(), lexemes = lexemes.len(), "loaded lexicon");
    Ok(lexemes)
}
