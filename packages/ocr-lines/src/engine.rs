use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::normalize::{normalize, RawDetection};
use crate::reconstruct::{LineReconstructor, ReconstructorConfig};

/// Reading-order result for one image.
///
/// `text` is `lines` joined with newlines; both are empty when nothing was recognized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub text: String,
    pub lines: Vec<String>,
}

impl Analysis {
    pub fn from_lines(lines: Vec<String>) -> Self {
        let text = lines.join("\n");
        Self { text, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("detector output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("detection source error: {0}")]
    Other(String),
}

/// Anything that can hand over one image's worth of raw detector output.
///
/// Running the detector, or loading its model, stays on the implementor's side.
#[async_trait]
pub trait DetectionSource: Send + Sync {
    async fn detections(&self) -> Result<RawDetection, SourceError>;
}

pub fn analyze(raw: &RawDetection, config: &ReconstructorConfig) -> Analysis {
    let fragments = normalize(raw);
    let lines = LineReconstructor::new(config.clone()).reconstruct(&fragments);
    debug!(fragments = fragments.len(), lines = lines.len(), "reconstructed lines");
    Analysis::from_lines(lines)
}

pub fn analyze_value(value: &Value, config: &ReconstructorConfig) -> Analysis {
    analyze(&RawDetection::from_value(value), config)
}

/// Pulls detections from `source` and reconstructs them. Only the source can fail.
pub async fn analyze_source(
    source: &dyn DetectionSource,
    config: &ReconstructorConfig,
) -> Result<Analysis, SourceError> {
    let raw = source.detections().await?;
    Ok(analyze(&raw, config))
}
