// Suffix forms: allomorph templates, preconditions and form selection
//
// Template syntax:
//
//   a-z, ç ğ ı ö ş ü ...  literal letters
//   A                     a | e   (last vowel back | front)
//   I                     ı | i | u | ü   (frontness x rounding)
//   D                     d | t   (t after a voiceless letter)
//   C                     c | ç   (ç after a voiceless letter)
//   +x  (leading only)    optional first letter: a vowel (or A/I) is kept
//                         after a consonant, a consonant after a vowel
//
// Placeholders resolve against the running context, so `lArI` renders as
// `ları` and `ImIz` as `ımız` / `ümüz`.

use std::sync::Arc;

use turkmorph_core::MorphError;
use turkmorph_core::analyzer::attributes_after;
use turkmorph_core::letter::{is_vowel, require_letter};
use turkmorph_core::phonetic::PhoneticAttribute::*;
use turkmorph_core::phonetic::{PhoneticAttributes, PhoneticExpectations};

use crate::graph::SuffixId;

/// Precondition over the phonetic attributes of the context.
///
/// Holds when every `require` attribute is present and no `forbid`
/// attribute is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Condition {
    pub require: PhoneticAttributes,
    pub forbid: PhoneticAttributes,
}

impl Condition {
    pub const ALWAYS: Condition = Condition {
        require: PhoneticAttributes::empty(),
        forbid: PhoneticAttributes::empty(),
    };

    pub const fn matches(self, attrs: PhoneticAttributes) -> bool {
        attrs.contains_all(self.require) && !attrs.intersects(self.forbid)
    }
}

/// Adjustment applied to the attribute set computed after a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Postcondition {
    pub add: PhoneticAttributes,
    pub remove: PhoneticAttributes,
}

impl Postcondition {
    pub const fn apply(self, attrs: PhoneticAttributes) -> PhoneticAttributes {
        attrs.difference(self.remove).union(self.add)
    }
}

/// One allomorph of a suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixForm {
    template: String,
    precondition: Condition,
    postcondition: Postcondition,
}

impl SuffixForm {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            precondition: Condition::ALWAYS,
            postcondition: Postcondition::default(),
        }
    }

    /// Only applicable when all of `attrs` hold in the context.
    pub fn requires(mut self, attrs: PhoneticAttributes) -> Self {
        self.precondition.require = self.precondition.require.union(attrs);
        self
    }

    /// Not applicable when any of `attrs` holds in the context.
    pub fn forbids(mut self, attrs: PhoneticAttributes) -> Self {
        self.precondition.forbid = self.precondition.forbid.union(attrs);
        self
    }

    /// Attributes added after the form is applied.
    pub fn adds(mut self, attrs: PhoneticAttributes) -> Self {
        self.postcondition.add = self.postcondition.add.union(attrs);
        self
    }

    /// Attributes removed after the form is applied.
    pub fn removes(mut self, attrs: PhoneticAttributes) -> Self {
        self.postcondition.remove = self.postcondition.remove.union(attrs);
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn precondition(&self) -> Condition {
        self.precondition
    }

    pub fn postcondition(&self) -> Postcondition {
        self.postcondition
    }

    /// Check that every template character is a placeholder or a letter.
    pub fn validate(&self) -> Result<(), MorphError> {
        let body = self.template.strip_prefix('+').unwrap_or(&self.template);
        for c in body.chars() {
            if !matches!(c, 'A' | 'I' | 'D' | 'C') {
                require_letter(c)?;
            }
        }
        Ok(())
    }

    /// Render the surface string of this form after a context with `attrs`.
    pub fn render(&self, attrs: PhoneticAttributes) -> String {
        let mut ctx = RenderContext::new(attrs);
        let mut out = String::with_capacity(self.template.len());
        let mut chars = self.template.chars().peekable();

        if chars.next_if_eq(&'+').is_some() {
            if let Some(optional) = chars.next() {
                let keep = if is_vowel_placeholder(optional) {
                    !ctx.last_is_vowel
                } else {
                    ctx.last_is_vowel
                };
                if keep {
                    ctx.push(optional, &mut out);
                }
            }
        }
        for c in chars {
            ctx.push(c, &mut out);
        }
        out
    }
}

fn is_vowel_placeholder(c: char) -> bool {
    matches!(c, 'A' | 'I') || is_vowel(c)
}

/// Running phonetic context while a template is rendered.
struct RenderContext {
    last_is_vowel: bool,
    voiceless: bool,
    frontal: bool,
    rounded: bool,
}

impl RenderContext {
    fn new(attrs: PhoneticAttributes) -> Self {
        Self {
            last_is_vowel: attrs.contains(LastLetterVowel),
            voiceless: attrs.contains(LastLetterVoiceless),
            frontal: attrs.contains(LastVowelFrontal),
            rounded: attrs.contains(LastVowelRounded),
        }
    }

    fn resolve(&self, c: char) -> char {
        match c {
            'A' => {
                if self.frontal {
                    'e'
                } else {
                    'a'
                }
            }
            'I' => match (self.frontal, self.rounded) {
                (true, true) => 'ü',
                (true, false) => 'i',
                (false, true) => 'u',
                (false, false) => 'ı',
            },
            'D' => {
                if self.voiceless {
                    't'
                } else {
                    'd'
                }
            }
            'C' => {
                if self.voiceless {
                    'ç'
                } else {
                    'c'
                }
            }
            other => other,
        }
    }

    fn push(&mut self, template_char: char, out: &mut String) {
        let c = self.resolve(template_char);
        out.push(c);
        // Templates are validated when the graph is built.
        if let Ok(letter) = require_letter(c) {
            self.last_is_vowel = letter.is_vowel();
            self.voiceless = letter.is_voiceless();
            if letter.is_vowel() {
                self.frontal = letter.is_frontal();
                self.rounded = letter.is_rounded();
            }
        }
    }
}

/// The outcome of applying one suffix form in a phonetic context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuffixFormApplication {
    pub suffix: SuffixId,
    /// Index of the chosen form in the suffix's declaration order.
    pub form_index: usize,
    /// Rendered surface string; empty for zero morphemes.
    pub surface: Arc<str>,
    /// Attribute set after the surface string is appended.
    pub attributes: PhoneticAttributes,
}

/// Pick the first form whose precondition holds for `attrs`.
pub fn select_form(forms: &[SuffixForm], attrs: PhoneticAttributes) -> Option<(usize, &SuffixForm)> {
    forms
        .iter()
        .enumerate()
        .find(|(_, form)| form.precondition.matches(attrs))
}

/// Select a form of `suffix` for `attrs`, render it and compute the
/// successor attribute set. `None` means the suffix is not applicable.
pub fn apply_suffix(
    suffix: SuffixId,
    forms: &[SuffixForm],
    attrs: PhoneticAttributes,
) -> Result<Option<SuffixFormApplication>, MorphError> {
    let Some((form_index, form)) = select_form(forms, attrs) else {
        return Ok(None);
    };
    let surface = form.render(attrs);
    let after = form.postcondition.apply(attributes_after(attrs, &surface)?);
    Ok(Some(SuffixFormApplication {
        suffix,
        form_index,
        surface: Arc::from(surface),
        attributes: after,
    }))
}

/// Check a surface string against pending phonetic expectations.
///
/// An empty surface leaves the expectations pending, so it always passes.
pub fn satisfies(expectations: PhoneticExpectations, surface: &str) -> bool {
    match surface.chars().next() {
        None => true,
        Some(first) => expectations.satisfied_by(is_vowel(first)),
    }
}
