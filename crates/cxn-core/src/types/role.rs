//! Role of a character relative to the construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{POLICY_CONSTANT, POLICY_OTHERS, POLICY_VARIABLE};

/// Role assigned to a word or character: part of the construction's fixed
/// material, filler of one of its slots, or outside the construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Constant,
    Variable,
    Others,
}

impl Role {
    /// All roles, in policy-table order.
    pub const ALL: [Role; 3] = [Role::Constant, Role::Variable, Role::Others];

    /// The policy key of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constant => POLICY_CONSTANT,
            Self::Variable => POLICY_VARIABLE,
            Self::Others => POLICY_OTHERS,
        }
    }

    /// Parse a policy key. Unknown keys return `None`.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            POLICY_CONSTANT => Some(Self::Constant),
            POLICY_VARIABLE => Some(Self::Variable),
            POLICY_OTHERS => Some(Self::Others),
            _ => None,
        }
    }

    /// True for constant and variable.
    pub fn is_construction(self) -> bool {
        !matches!(self, Self::Others)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
