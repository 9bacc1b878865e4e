//! Output spans: context text or construction chunks.

use serde::{Deserialize, Serialize};

use super::Role;

/// One character of a construction chunk with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CxnToken {
    pub ch: char,
    /// Always `Constant` or `Variable`.
    pub role: Role,
}

/// A piece of an annotated sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Span {
    Context(String),
    Cxn(Vec<CxnToken>),
}

impl Span {
    /// The text this span covers.
    pub fn text(&self) -> String {
        match self {
            Self::Context(text) => text.clone(),
            Self::Cxn(tokens) => tokens.iter().map(|t| t.ch).collect(),
        }
    }

    pub fn is_cxn(&self) -> bool {
        matches!(self, Self::Cxn(_))
    }

    /// Construction tokens, empty for context spans.
    pub fn tokens(&self) -> &[CxnToken] {
        match self {
            Self::Context(_) => &[],
            Self::Cxn(tokens) => tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cxn_text_concatenates_tokens() {
        let span = Span::Cxn(vec![
            CxnToken {
                ch: '红',
                role: Role::Variable,
            },
            CxnToken {
                ch: '的',
                role: Role::Constant,
            },
        ]);
        assert_eq!(span.text(), "红的");
        assert!(span.is_cxn());
        assert_eq!(span.tokens().len(), 2);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let span = Span::Cxn(vec![CxnToken {
            ch: '的',
            role: Role::Constant,
        }]);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"cxn","value":[{"ch":"的","role":"constant"}]}"#
        );
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(back, span);
    }

    #[test]
    fn context_has_no_tokens() {
        let span = Span::Context("很".to_string());
        assert!(span.tokens().is_empty());
        assert_eq!(span.text(), "很");
    }
}
