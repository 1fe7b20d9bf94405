//! Caller identity for the `employeeNumber` field
//!
//! Resolution order: the host session file, then the configured or
//! command-line fallback, then the empty string.

use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Resolves the user running an ingestion
#[derive(Debug, Clone, Default)]
pub struct UserIdentity {
    session_file: Option<PathBuf>,
    fallback: Option<String>,
}

impl UserIdentity {
    pub fn new(session_file: Option<PathBuf>, fallback: Option<String>) -> Self {
        Self {
            session_file,
            fallback,
        }
    }

    /// Identity with only a fixed value
    pub fn fixed(user_id: impl Into<String>) -> Self {
        Self::new(None, Some(user_id.into()))
    }

    /// Current user id, empty when nothing is known
    pub async fn resolve(&self) -> String {
        if let Some(user_id) = self.session_user_id().await {
            return user_id;
        }

        self.fallback
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_default()
    }

    async fn session_user_id(&self) -> Option<String> {
        let path = self.session_file.as_ref()?;
        let content = tokio::fs::read_to_string(path).await.ok()?;
        let session: Value = match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                debug!("Ignoring unreadable session file {}: {}", path.display(), e);
                return None;
            }
        };

        ["user_id", "id"]
            .iter()
            .filter_map(|key| session.get(key))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}
