//! Report output model for scenario runs.

use anyhow::{bail, Result};
use glissade_headless::AnimationRecord;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// One animation started during the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationEntry {
    pub key: Option<String>,
    /// First keyframe as CSS declarations
    pub start: String,
    /// Last keyframe as CSS declarations
    pub end: String,
    pub started_ms: u64,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub cancelled: bool,
}

impl From<&AnimationRecord> for AnimationEntry {
    fn from(record: &AnimationRecord) -> Self {
        Self {
            key: record.key.clone(),
            start: record.start().css(),
            end: record.end().css(),
            started_ms: record.started_ms,
            duration_ms: record.options.duration_ms,
            delay_ms: record.options.delay_ms,
            cancelled: record.is_cancelled(),
        }
    }
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub step: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub elapsed_ms: u64,
    pub animations: Vec<AnimationEntry>,
}

impl ScenarioReport {
    pub fn passed(elapsed_ms: u64, animations: Vec<AnimationEntry>) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            step: None,
            code: None,
            message: None,
            elapsed_ms,
            animations,
        }
    }

    pub fn failed(
        step: &str,
        failed_step_index: usize,
        code: String,
        message: String,
        elapsed_ms: u64,
        animations: Vec<AnimationEntry>,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            step: Some(step.to_string()),
            code: Some(code),
            message: Some(message),
            elapsed_ms,
            animations,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = self.to_json()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = self.to_json()?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
