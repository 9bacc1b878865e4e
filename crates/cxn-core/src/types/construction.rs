//! Construction forms and their compiled matching pattern.
//!
//! A form such as `X+得+Y+死` splits on `+` into components. A component
//! containing an ASCII letter is a slot (variable); anything else is a
//! literal (constant). Compilation concatenates literals verbatim with a
//! bounded lazy placeholder per slot.

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Role;
use crate::constants::{COMPLEX_SLOT_NAMES, COMPONENT_SEPARATOR};
use crate::errors::ConstructionError;

/// Kind of a construction component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Constant,
    Variable,
}

impl ComponentKind {
    /// Classify a raw component string.
    pub fn classify(component: &str) -> Self {
        if component.chars().any(|c| c.is_ascii_alphabetic()) {
            Self::Variable
        } else {
            Self::Constant
        }
    }
}

impl From<ComponentKind> for Role {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Constant => Role::Constant,
            ComponentKind::Variable => Role::Variable,
        }
    }
}

/// One component of a form, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub text: String,
    pub kind: ComponentKind,
}

/// Placeholder emitted for each slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// `[^\W.]{1,W}?`: word characters only. Used by the scoring pipeline.
    #[default]
    WordChar,
    /// `.{1,W}?`: any character. Used by the regex-only matcher.
    AnyChar,
}

impl Placeholder {
    fn render(self, window: usize) -> String {
        match self {
            Self::WordChar => format!("[^\\W.]{{1,{window}}}?"),
            Self::AnyChar => format!(".{{1,{window}}}?"),
        }
    }
}

/// A construction form compiled for matching and lookup.
///
/// Read-only once built; shared across sentences.
#[derive(Debug, Clone)]
pub struct CompiledConstruction {
    form: String,
    window: usize,
    components: Vec<Component>,
    pattern: String,
    regex: Regex,
    /// Token → kind, first occurrence wins.
    map: FxHashMap<String, ComponentKind>,
    /// Distinct constant literals in form order.
    constants: SmallVec<[String; 4]>,
    /// Slot names occurring more than once in the form.
    repeated_slots: SmallVec<[String; 2]>,
}

impl CompiledConstruction {
    /// Compile `form` with word-character slot placeholders bounded by `window`.
    pub fn compile(form: &str, window: usize) -> Result<Self, ConstructionError> {
        Self::compile_with(form, window, Placeholder::WordChar)
    }

    /// Compile `form` with an explicit placeholder style.
    pub fn compile_with(
        form: &str,
        window: usize,
        placeholder: Placeholder,
    ) -> Result<Self, ConstructionError> {
        if form.trim().is_empty() {
            return Err(ConstructionError::EmptyForm);
        }
        if window == 0 {
            return Err(ConstructionError::ZeroWindow);
        }

        let mut components = Vec::new();
        let mut pattern = String::new();
        let mut map: FxHashMap<String, ComponentKind> = FxHashMap::default();
        let mut constants: SmallVec<[String; 4]> = SmallVec::new();
        let mut slot_counts: Vec<(String, usize)> = Vec::new();

        for (index, raw) in form.split(COMPONENT_SEPARATOR).enumerate() {
            if raw.is_empty() {
                return Err(ConstructionError::EmptyComponent {
                    form: form.to_string(),
                    index,
                });
            }
            let kind = ComponentKind::classify(raw);
            match kind {
                ComponentKind::Variable => {
                    pattern.push_str(&placeholder.render(window));
                    match slot_counts.iter_mut().find(|(name, _)| name == raw) {
                        Some((_, count)) => *count += 1,
                        None => slot_counts.push((raw.to_string(), 1)),
                    }
                }
                ComponentKind::Constant => {
                    pattern.push_str(raw);
                    if !constants.iter().any(|c| c == raw) {
                        constants.push(raw.to_string());
                    }
                }
            }
            map.entry(raw.to_string()).or_insert(kind);
            components.push(Component {
                text: raw.to_string(),
                kind,
            });
        }

        let regex = Regex::new(&pattern).map_err(|e| ConstructionError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

        let repeated_slots = slot_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();

        Ok(Self {
            form: form.to_string(),
            window,
            components,
            pattern,
            regex,
            map,
            constants,
            repeated_slots,
        })
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of components in the form, repeats included.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The pattern source string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Kind of `token` if it is a key of the construction map.
    pub fn kind_of(&self, token: &str) -> Option<ComponentKind> {
        self.map.get(token).copied()
    }

    pub fn contains_key(&self, token: &str) -> bool {
        self.map.contains_key(token)
    }

    /// True when `token` is a constant literal of the form.
    pub fn is_constant(&self, token: &str) -> bool {
        self.kind_of(token) == Some(ComponentKind::Constant)
    }

    /// True when `token` is a slot name of the form.
    pub fn is_variable(&self, token: &str) -> bool {
        self.kind_of(token) == Some(ComponentKind::Variable)
    }

    /// Distinct constant literals in form order.
    pub fn constants(&self) -> &[String] {
        &self.constants
    }

    /// True when `text` contains every constant literal as a substring.
    pub fn contains_all_constants(&self, text: &str) -> bool {
        self.constants.iter().all(|c| text.contains(c.as_str()))
    }

    /// True when `text` contains at least one constant literal.
    pub fn contains_any_constant(&self, text: &str) -> bool {
        self.constants.iter().any(|c| text.contains(c.as_str()))
    }

    /// True when `ch` occurs inside some constant literal.
    pub fn is_constant_char(&self, ch: char) -> bool {
        self.constants.iter().any(|c| c.contains(ch))
    }

    /// True when the map holds one of the generic slot names `X`, `Y`, `Z`.
    pub fn is_complex(&self) -> bool {
        COMPLEX_SLOT_NAMES
            .iter()
            .any(|name| self.map.contains_key(*name))
    }

    /// Slot names occurring more than once in the form.
    pub fn repeated_slots(&self) -> &[String] {
        &self.repeated_slots
    }
}
