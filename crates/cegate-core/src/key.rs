//! Evaluation identity keys

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::manifest::ModelDescriptor;

/// Separator between the fields of an [`EvalKey`].
///
/// Manifest validation rejects any `:` in a key field, so splitting a key on
/// the separator recovers exactly the original three fields.
pub const KEY_SEPARATOR: &str = "::";

/// Identity of one evaluable unit: `model_id::version::evaluation_profile`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvalKey(String);

impl EvalKey {
    /// Derive the key for a descriptor
    pub fn build(descriptor: &ModelDescriptor) -> Self {
        EvalKey(
            [
                descriptor.model_id.as_str(),
                descriptor.version.as_str(),
                descriptor.evaluation_profile.as_str(),
            ]
            .join(KEY_SEPARATOR),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EvalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EvalKey {
    fn from(s: &str) -> Self {
        EvalKey(s.to_string())
    }
}

impl From<String> for EvalKey {
    fn from(s: String) -> Self {
        EvalKey(s)
    }
}
