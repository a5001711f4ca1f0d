//! Export Pipeline - single entry point for raster exports
//!
//! One export at a time: a request made while another is in flight is
//! rejected with `ExportError::Busy`, never interleaved. In a bulk export
//! each slide fails on its own and the remaining slides still run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::hashing::{fingerprint, sha256_hex};
use crate::raster::{RasterError, RasterOptions, Rasterizer};
use crate::role::SlideRole;
use crate::sink::FileSink;
use crate::stage::{node_id, OffscreenStage};
use crate::artifact::Color;
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Render target not mounted: {0}")]
    RenderTargetMissing(String),

    #[error("Rasterization failed: {0}")]
    RasterizationFailure(#[from] RasterError),

    #[error("Failed to save {filename}: {source}")]
    SaveFailed {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Another export is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Output pixels per logical pixel
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Pause between slides in a bulk export
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

fn default_scale() -> f32 { 2.0 }
fn default_pacing_ms() -> u64 { 500 }
fn default_filename_prefix() -> String { "lead-magnet-slide".to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            pacing_ms: default_pacing_ms(),
            filename_prefix: default_filename_prefix(),
        }
    }
}

impl ExportConfig {
    /// `{prefix}-{n}.png` with a one-based slide number
    pub fn filename(&self, index: usize) -> String {
        format!("{}-{}.png", self.filename_prefix, index + 1)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions { scale: self.scale, background: Color::BLACK }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Success,
    Failure,
}

/// Outcome of exporting one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// One-based slide number
    pub slide: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SlideRole>,
    pub status: ExportStatus,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl ExportResult {
    pub fn is_success(&self) -> bool {
        self.status == ExportStatus::Success
    }
}

/// Summary of a bulk export, with a hash over its canonical form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub session_id: Uuid,
    pub engine_version: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<ExportResult>,
    pub manifest_hash: String,
}

impl ExportReport {
    pub fn new(
        session_id: Uuid,
        started_at: DateTime<Utc>,
        results: Vec<ExportResult>,
    ) -> Result<Self, serde_json::Error> {
        let mut report = Self {
            session_id,
            engine_version: ENGINE_VERSION.to_string(),
            started_at,
            finished_at: Utc::now(),
            results,
            manifest_hash: String::new(), // Computed after
        };
        report.manifest_hash = fingerprint(&report.results)?;
        Ok(report)
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(ExportResult::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExportResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    /// Single export of the slide at this index
    Exporting(usize),
    /// Bulk export, currently at this index
    ExportingAll(usize),
}

/// The export pipeline - rasterizes mounted nodes and saves them
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    sink: Arc<dyn FileSink>,
    config: ExportConfig,
    state: Mutex<ExportState>,
}

/// Returns the pipeline to `Idle` when the export ends, however it ends.
struct InFlight<'a> {
    state: &'a Mutex<ExportState>,
}

impl InFlight<'_> {
    fn set(&self, next: ExportState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set(ExportState::Idle);
    }
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, sink: Arc<dyn FileSink>, config: ExportConfig) -> Self {
        Self {
            rasterizer,
            sink,
            config,
            state: Mutex::new(ExportState::Idle),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn state(&self) -> ExportState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, first: ExportState) -> Result<InFlight<'_>, ExportError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != ExportState::Idle {
            return Err(ExportError::Busy);
        }
        *state = first;
        Ok(InFlight { state: &self.state })
    }

    /// Exports one slide. Only `Busy` is returned as an error; every other
    /// failure is reported in the result.
    pub async fn export_slide(&self, stage: &OffscreenStage, index: usize) -> Result<ExportResult, ExportError> {
        let _guard = self.begin(ExportState::Exporting(index))?;
        Ok(self.export_one(stage, index).await)
    }

    /// Exports every slide in order with the pacing delay between them.
    pub async fn export_all(&self, stage: &OffscreenStage) -> Result<Vec<ExportResult>, ExportError> {
        let guard = self.begin(ExportState::ExportingAll(0))?;
        let mut results = Vec::with_capacity(SlideRole::ALL.len());

        for role in SlideRole::ALL {
            let index = role.index();
            guard.set(ExportState::ExportingAll(index));
            if index > 0 {
                tokio::time::sleep(self.config.pacing()).await;
            }
            results.push(self.export_one(stage, index).await);
        }

        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!(exported = results.len() - failed, failed, "bulk export finished");
        Ok(results)
    }

    async fn export_one(&self, stage: &OffscreenStage, index: usize) -> ExportResult {
        let filename = self.config.filename(index);
        let role = SlideRole::from_index(index);

        match self.rasterize_and_save(stage, index, &filename).await {
            Ok(png) => {
                info!(slide = index + 1, %filename, bytes = png.len(), "exported slide");
                ExportResult {
                    slide: index + 1,
                    role,
                    status: ExportStatus::Success,
                    filename,
                    reason: None,
                    byte_len: Some(png.len()),
                    sha256: Some(sha256_hex(&png)),
                }
            }
            Err(e) => {
                warn!(slide = index + 1, error = %e, "slide export failed");
                ExportResult {
                    slide: index + 1,
                    role,
                    status: ExportStatus::Failure,
                    filename,
                    reason: Some(e.to_string()),
                    byte_len: None,
                    sha256: None,
                }
            }
        }
    }

    async fn rasterize_and_save(
        &self,
        stage: &OffscreenStage,
        index: usize,
        filename: &str,
    ) -> Result<Vec<u8>, ExportError> {
        let id = node_id(index);
        // Snapshot the node so the stage is not read across the await.
        let node = stage
            .locate(&id)
            .cloned()
            .ok_or(ExportError::RenderTargetMissing(id))?;

        let png = self.rasterizer.rasterize(&node, self.config.raster_options()).await?;

        self.sink
            .save_file(&png, filename)
            .map_err(|source| ExportError::SaveFailed { filename: filename.to_string(), source })?;
        Ok(png)
    }
}
