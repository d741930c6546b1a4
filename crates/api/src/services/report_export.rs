//! Report export service.
//!
//! Assembled documents are rendered through the renderer seam and written
//! under the configured export directory. The HTTP layer returns the
//! artifact's metadata, not the bytes.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use domain::models::report::ReportDocument;
use domain::services::{renderer_for, ExportFormat, RenderError};

use crate::config::ReportsConfig;

/// Report export errors.
#[derive(Debug, Error)]
pub enum ReportExportError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Metadata of a written export artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExportArtifact {
    pub file_name: String,
    pub path: String,
    pub format: ExportFormat,
    pub size_bytes: usize,
}

/// Writes rendered report documents to the export directory.
pub struct ReportExportService {
    export_dir: PathBuf,
    organization_name: String,
}

fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>()
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl ReportExportService {
    pub fn new(export_dir: PathBuf, organization_name: String) -> Self {
        Self {
            export_dir,
            organization_name,
        }
    }

    pub fn from_config(config: &ReportsConfig) -> Self {
        Self::new(config.export_dir.clone(), config.organization_name.clone())
    }

    /// Display name printed in export headers.
    pub fn organization_name(&self) -> &str {
        &self.organization_name
    }

    /// Render and write one document; returns the artifact metadata.
    pub fn export(
        &self,
        document: &ReportDocument,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ReportExportError> {
        let artifact = renderer_for(format).render(document)?;

        fs::create_dir_all(&self.export_dir)?;

        let file_name = format!(
            "{}_{}.{}",
            slugify(&document.title),
            Utc::now().format("%Y%m%d_%H%M%S"),
            artifact.extension
        );
        let path = self.export_dir.join(&file_name);
        fs::write(&path, &artifact.bytes)?;

        info!(
            file = %path.display(),
            format = %format,
            size_bytes = artifact.bytes.len(),
            "Report exported"
        );

        Ok(ExportArtifact {
            file_name,
            path: path.display().to_string(),
            format,
            size_bytes: artifact.bytes.len(),
        })
    }
}
