//! Manual text boundary
//!
//! Manual ingestion asks for a raw export blob. The request is an async
//! call resolving to the text or to `None` when the user supplies nothing
//! or cancels; the orchestrator races it against its cancellation token.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::app::models::WeekKey;

/// Source of manually supplied export text
#[async_trait]
pub trait TextPrompt: Send + Sync {
    /// Ask for the export text of `week`; `None` means no data
    async fn request_text(&self, week: &WeekKey) -> Option<String>;
}

/// Prompt answering with fixed text, or with nothing
#[derive(Debug, Clone, Default)]
pub struct PresetText(pub Option<String>);

impl PresetText {
    pub fn none() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TextPrompt for PresetText {
    async fn request_text(&self, _week: &WeekKey) -> Option<String> {
        self.0.clone()
    }
}

/// Prompt answered by the contents of a file
#[derive(Debug, Clone)]
pub struct FileTextPrompt {
    path: PathBuf,
}

impl FileTextPrompt {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextPrompt for FileTextPrompt {
    async fn request_text(&self, week: &WeekKey) -> Option<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!("Read export text for {} from {}", week, self.path.display());
                Some(text)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Cannot read export text from {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// Prompt answered by everything written to standard input
#[derive(Debug, Clone, Default)]
pub struct StdinTextPrompt;

#[async_trait]
impl TextPrompt for StdinTextPrompt {
    async fn request_text(&self, week: &WeekKey) -> Option<String> {
        eprintln!("Paste the calendar export for {} and end with Ctrl-D:", week);

        let mut text = String::new();
        match tokio::io::stdin().read_to_string(&mut text).await {
            Ok(_) if !text.trim().is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read export text from stdin: {}", e);
                None
            }
        }
    }
}
