//! Detector output read from a JSON file or stdin.
use async_trait::async_trait;
use ocr_lines::{DetectionSource, RawDetection, SourceError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::debug;

pub struct JsonSource {
  path: Option<PathBuf>,
  batch: bool,
}

impl JsonSource {
  /// `None` or `-` selects stdin.
  pub fn new(path: Option<PathBuf>, batch: bool) -> Self {
    let path = path.filter(|p| p != Path::new("-"));
    Self { path, batch }
  }

  async fn read(&self) -> Result<String, SourceError> {
    match &self.path {
      Some(path) => fs::read_to_string(path).await.map_err(|source| SourceError::Io {
        path: path.clone(),
        source,
      }),
      None => {
        let mut buf = String::new();
        tokio::io::stdin()
          .read_to_string(&mut buf)
          .await
          .map_err(|source| SourceError::Io {
            path: PathBuf::from("<stdin>"),
            source,
          })?;
        Ok(buf)
      }
    }
  }
}

#[async_trait]
impl DetectionSource for JsonSource {
  async fn detections(&self) -> Result<RawDetection, SourceError> {
    let contents = self.read().await?;
    debug!(bytes = contents.len(), batch = self.batch, "read detector output");

    // A blank document is an absent result, not a parse failure.
    if contents.trim().is_empty() {
      return Ok(RawDetection::empty());
    }

    let value: Value = serde_json::from_str(&contents)?;
    Ok(if self.batch {
      RawDetection::from_batch(&value)
    } else {
      RawDetection::from_value(&value)
    })
  }
}
