//! User records.

use serde::{Deserialize, Serialize};

use crate::constants::UNNAMED_MEMBER;

/// A user document: nickname plus registered device-delivery tokens.
/// Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub nick: Option<String>,
    #[serde(default)]
    pub device_tokens: Vec<String>,
}

impl User {
    pub fn display_nick(&self) -> &str {
        self.nick.as_deref().unwrap_or(UNNAMED_MEMBER)
    }
}
