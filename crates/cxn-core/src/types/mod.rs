//! Shared data model: roles, features, constructions, sentences, and spans.

pub mod construction;
pub mod feature;
pub mod role;
pub mod sentence;
pub mod span;

pub use construction::{CompiledConstruction, Component, ComponentKind, Placeholder};
pub use feature::{Feature, FeatureSet};
pub use role::Role;
pub use sentence::{AnnotatedSentence, Sentence, Token};
pub use span::{CxnToken, Span};
