use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::export::{encode, Artifact, ExportError, ExportFormat, ExportSnapshot};

/// Runs encoders on the blocking pool, bounded by a timeout and a cancellation token.
#[derive(Debug, Clone)]
pub struct ExportPipeline {
    timeout: Duration,
}

impl ExportPipeline {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn export(
        &self,
        format: ExportFormat,
        snapshot: ExportSnapshot,
        cancel: &CancellationToken,
    ) -> Result<Artifact, ExportError> {
        let started = Instant::now();
        let label = snapshot.version_label.clone();
        let artifact = self
            .run_blocking(cancel, move || encode(format, &snapshot))
            .await?;
        tracing::info!(
            "Exported {format} for {label}: {} bytes in {}ms",
            artifact.bytes.len(),
            started.elapsed().as_millis()
        );
        Ok(artifact)
    }

    pub(crate) async fn run_blocking<T, F>(
        &self,
        cancel: &CancellationToken,
        job: F,
    ) -> Result<T, ExportError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ExportError> + Send + 'static,
    {
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        let task = tokio::task::spawn_blocking(job);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("Export cancelled before completion");
                Err(ExportError::Cancelled)
            }
            outcome = tokio::time::timeout(self.timeout, task) => match outcome {
                Err(_) => {
                    tracing::warn!("Export exceeded {}s", self.timeout.as_secs());
                    Err(ExportError::Timeout(self.timeout.as_secs()))
                }
                Ok(Err(join)) => Err(ExportError::Join(join.to_string())),
                Ok(Ok(result)) => result,
            },
        }
    }
}
