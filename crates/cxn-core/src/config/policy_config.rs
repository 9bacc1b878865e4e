//! Policy weights: the per-role increments of the running policy score.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_POLICY_CONSTANT, DEFAULT_POLICY_OTHERS, DEFAULT_POLICY_VARIABLE};
use crate::errors::ConfigError;
use crate::types::Role;

/// Validated weight per role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyWeights {
    pub constant: f64,
    pub variable: f64,
    pub others: f64,
}

impl Default for PolicyWeights {
    fn default() -> Self {
        Self {
            constant: DEFAULT_POLICY_CONSTANT,
            variable: DEFAULT_POLICY_VARIABLE,
            others: DEFAULT_POLICY_OTHERS,
        }
    }
}

impl PolicyWeights {
    /// Build from a `role → weight` table.
    ///
    /// An empty table yields the defaults. A non-empty table must name every
    /// role with a finite weight; unknown keys are rejected.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, ConfigError> {
        if map.is_empty() {
            return Ok(Self::default());
        }
        if let Some(unknown) = map.keys().find(|k| Role::parse_str(k).is_none()) {
            return Err(ConfigError::ValidationFailed {
                field: format!("policies.{unknown}"),
                message: "unknown role".to_string(),
            });
        }

        let lookup = |role: Role| -> Result<f64, ConfigError> {
            let weight = map
                .get(role.as_str())
                .copied()
                .ok_or_else(|| ConfigError::MissingPolicyWeight {
                    role: role.as_str().to_string(),
                })?;
            if !weight.is_finite() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("policies.{}", role.as_str()),
                    message: "must be finite".to_string(),
                });
            }
            Ok(weight)
        };

        Ok(Self {
            constant: lookup(Role::Constant)?,
            variable: lookup(Role::Variable)?,
            others: lookup(Role::Others)?,
        })
    }

    /// The increment for one step.
    pub fn weight(&self, role: Role) -> f64 {
        match role {
            Role::Constant => self.constant,
            Role::Variable => self.variable,
            Role::Others => self.others,
        }
    }
}
