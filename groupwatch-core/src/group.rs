//! Group membership records.

use serde::{Deserialize, Serialize};

use crate::constants::UNNAMED_GROUP;

/// A scheduling group. Owned by the application backend; the engine only
/// reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_GROUP)
    }

    /// Member ids excluding `user_id`.
    pub fn members_except(&self, user_id: &str) -> Vec<String> {
        self.members
            .iter()
            .filter(|m| m.as_str() != user_id)
            .cloned()
            .collect()
    }
}
