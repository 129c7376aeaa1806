// Morphotactic graph: states, suffixes and the transitions between them

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use turkmorph_core::lexeme::{PrimaryPos, SecondaryPos};
use turkmorph_core::root::Root;

use crate::GraphError;
use crate::form::SuffixForm;

/// Index of a state in a [`SuffixGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u16);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a suffix in a [`SuffixGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuffixId(pub u16);

impl fmt::Display for SuffixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateType {
    /// Entered after a derivation; the word may continue with a new POS.
    Derivational,
    /// Intermediate state; a parse cannot end here.
    Transfer,
    /// A complete word may end here.
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixKind {
    Inflectional,
    /// Changes the part of speech; rendered with the target state's POS.
    Derivational,
    /// Zero-width move between states; not rendered.
    FreeTransition,
}

/// An outgoing edge of a morphotactic state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub suffix: SuffixId,
    pub target: StateId,
}

#[derive(Debug, Clone)]
pub struct SuffixGraphState {
    name: Arc<str>,
    state_type: StateType,
    pos: PrimaryPos,
    outgoing: Vec<Transition>,
}

impl SuffixGraphState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state_type(&self) -> StateType {
        self.state_type
    }

    /// Part of speech of words in this state.
    pub fn pos(&self) -> PrimaryPos {
        self.pos
    }

    pub fn outgoing(&self) -> &[Transition] {
        &self.outgoing
    }

    pub fn is_terminal(&self) -> bool {
        self.state_type == StateType::Terminal
    }
}

#[derive(Debug, Clone)]
pub struct Suffix {
    name: Arc<str>,
    kind: SuffixKind,
    forms: Vec<SuffixForm>,
}

impl Suffix {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the name, cloned into parse results.
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub fn kind(&self) -> SuffixKind {
        self.kind
    }

    /// Allomorphs in selection order.
    pub fn forms(&self) -> &[SuffixForm] {
        &self.forms
    }
}

/// Frozen morphotactic graph. Build one with [`SuffixGraphBuilder`].
#[derive(Debug, Clone)]
pub struct SuffixGraph {
    states: Vec<SuffixGraphState>,
    suffixes: Vec<Suffix>,
    state_names: HashMap<Arc<str>, StateId>,
    defaults: HashMap<(PrimaryPos, Option<SecondaryPos>), StateId>,
}

impl SuffixGraph {
    pub fn builder() -> SuffixGraphBuilder {
        SuffixGraphBuilder::default()
    }

    pub fn states(&self) -> impl ExactSizeIterator<Item = (StateId, &SuffixGraphState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i as u16), state))
    }

    pub fn state(&self, id: StateId) -> Option<&SuffixGraphState> {
        self.states.get(usize::from(id.0))
    }

    pub fn suffix(&self, id: SuffixId) -> Option<&Suffix> {
        self.suffixes.get(usize::from(id.0))
    }

    pub fn suffixes(&self) -> &[Suffix] {
        &self.suffixes
    }

    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.state_names.get(name).copied()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Entry state for a root, chosen by its lexeme's part of speech.
    ///
    /// A default registered for the exact `(primary, secondary)` pair wins
    /// over the one registered for the primary POS alone.
    pub fn default_state_for_root(&self, root: &Root) -> Option<StateId> {
        let lexeme = root.lexeme();
        let pos = lexeme.primary_pos();
        lexeme
            .secondary_pos()
            .and_then(|sec| self.defaults.get(&(pos, Some(sec))))
            .or_else(|| self.defaults.get(&(pos, None)))
            .copied()
    }
}

#[derive(Debug, Default)]
pub struct SuffixGraphBuilder {
    states: Vec<SuffixGraphState>,
    suffixes: Vec<Suffix>,
    state_names: HashMap<Arc<str>, StateId>,
    defaults: HashMap<(PrimaryPos, Option<SecondaryPos>), StateId>,
}

impl SuffixGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Names are unique within a graph.
    pub fn add_state(
        &mut self,
        name: &str,
        state_type: StateType,
        pos: PrimaryPos,
    ) -> Result<StateId, GraphError> {
        if self.state_names.contains_key(name) {
            return Err(GraphError::DuplicateState(name.to_string()));
        }
        let id = StateId(u16::try_from(self.states.len()).map_err(|_| GraphError::TooLarge)?);
        let name: Arc<str> = Arc::from(name);
        self.states.push(SuffixGraphState {
            name: Arc::clone(&name),
            state_type,
            pos,
            outgoing: Vec::new(),
        });
        self.state_names.insert(name, id);
        Ok(id)
    }

    /// Declare a suffix with its allomorphs in selection order.
    pub fn add_suffix(
        &mut self,
        name: &str,
        kind: SuffixKind,
        forms: Vec<SuffixForm>,
    ) -> Result<SuffixId, GraphError> {
        let id = SuffixId(u16::try_from(self.suffixes.len()).map_err(|_| GraphError::TooLarge)?);
        self.suffixes.push(Suffix {
            name: Arc::from(name),
            kind,
            forms,
        });
        Ok(id)
    }

    /// Add the transition `from --suffix--> to`.
    pub fn connect(&mut self, from: StateId, suffix: SuffixId, to: StateId) -> Result<(), GraphError> {
        if self.states.get(usize::from(to.0)).is_none() {
            return Err(GraphError::UnknownState(to));
        }
        if self.suffixes.get(usize::from(suffix.0)).is_none() {
            return Err(GraphError::UnknownSuffix(suffix));
        }
        let state = self
            .states
            .get_mut(usize::from(from.0))
            .ok_or(GraphError::UnknownState(from))?;
        state.outgoing.push(Transition { suffix, target: to });
        Ok(())
    }

    /// Register the entry state for roots of `pos`.
    pub fn set_default_state(&mut self, pos: PrimaryPos, state: StateId) -> Result<(), GraphError> {
        self.set_default(pos, None, state)
    }

    /// Register the entry state for roots of `pos` refined by `secondary`.
    pub fn set_default_state_for(
        &mut self,
        pos: PrimaryPos,
        secondary: SecondaryPos,
        state: StateId,
    ) -> Result<(), GraphError> {
        self.set_default(pos, Some(secondary), state)
    }

    fn set_default(
        &mut self,
        pos: PrimaryPos,
        secondary: Option<SecondaryPos>,
        state: StateId,
    ) -> Result<(), GraphError> {
        if self.states.get(usize::from(state.0)).is_none() {
            return Err(GraphError::UnknownState(state));
        }
        self.defaults.insert((pos, secondary), state);
        Ok(())
    }

    /// Validate every form template and freeze the graph.
    pub fn build(self) -> Result<SuffixGraph, GraphError> {
        for suffix in &self.suffixes {
            for form in &suffix.forms {
                form.validate().map_err(|reason| GraphError::InvalidTemplate {
                    suffix: suffix.name.to_string(),
                    template: form.template().to_string(),
                    reason,
                })?;
            }
        }
        Ok(SuffixGraph {
            states: self.states,
            suffixes: self.suffixes,
            state_names: self.state_names,
            defaults: self.defaults,
        })
    }
}
