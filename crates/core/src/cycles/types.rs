use serde::{Deserialize, Serialize};

/// A billing/meter-reading round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Code sent to the report endpoint.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Cycle {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
