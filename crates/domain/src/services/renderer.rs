//! Document renderers.
//!
//! A `ReportDocument` is rendered to bytes through the `DocumentRenderer`
//! seam. CSV and JSON renderers live here; richer formats (PDF) plug in
//! behind the same trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::report::ReportDocument;

/// Supported in-tree export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Rendered bytes plus the metadata needed to write or serve them.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub extension: &'static str,
}

/// Renders an assembled document into a concrete format.
pub trait DocumentRenderer: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn render(&self, document: &ReportDocument) -> Result<RenderedArtifact, RenderError>;
}

/// CSV renderer with a header block before the column row.
#[derive(Debug, Clone, Default)]
pub struct CsvRenderer;

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl DocumentRenderer for CsvRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, document: &ReportDocument) -> Result<RenderedArtifact, RenderError> {
        let mut out = String::new();

        out.push_str(&format!("{}\n", escape_csv(&document.title)));
        out.push_str(&format!("{}\n", escape_csv(&document.madrasa_name)));
        if !document.date_range.is_empty() {
            out.push_str(&format!("{}\n", escape_csv(&document.date_range)));
        }
        if !document.filter_description.is_empty() {
            out.push_str(&format!("{}\n", escape_csv(&document.filter_description)));
        }
        out.push_str(&format!(
            "Generated: {}\n\n",
            document.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        let header: Vec<String> = document.columns.iter().map(|c| escape_csv(c)).collect();
        out.push_str(&format!("{}\n", header.join(",")));

        for row in &document.rows {
            let cells: Vec<String> = row.iter().map(|c| escape_csv(c)).collect();
            out.push_str(&format!("{}\n", cells.join(",")));
        }

        if let Some(totals) = &document.totals_row {
            let cells: Vec<String> = totals.iter().map(|c| escape_csv(c)).collect();
            out.push_str(&format!("{}\n", cells.join(",")));
        }

        Ok(RenderedArtifact {
            bytes: out.into_bytes(),
            content_type: "text/csv; charset=utf-8",
            extension: "csv",
        })
    }
}

/// JSON renderer emitting the document structure as-is.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, document: &ReportDocument) -> Result<RenderedArtifact, RenderError> {
        let bytes = serde_json::to_vec_pretty(document)?;
        Ok(RenderedArtifact {
            bytes,
            content_type: "application/json",
            extension: "json",
        })
    }
}

/// Pick the in-tree renderer for a format.
pub fn renderer_for(format: ExportFormat) -> Box<dyn DocumentRenderer> {
    match format {
        ExportFormat::Csv => Box::new(CsvRenderer),
        ExportFormat::Json => Box::new(JsonRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_document() -> ReportDocument {
        ReportDocument {
            title: "Income Report".to_string(),
            madrasa_name: "Darul Uloom".to_string(),
            date_range: "01/03/2024 - 31/03/2024".to_string(),
            filter_description: "Type: donation".to_string(),
            generated_at: Utc::now(),
            columns: vec!["Date".to_string(), "Donor".to_string(), "Amount".to_string()],
            rows: vec![vec![
                "01/03/2024".to_string(),
                "Khan, Ahmed".to_string(),
                "1000".to_string(),
            ]],
            totals_row: Some(vec![
                "Total".to_string(),
                String::new(),
                "1000".to_string(),
            ]),
        }
    }

    #[test]
    fn csv_renderer_quotes_fields_with_commas() {
        let artifact = CsvRenderer.render(&sample_document()).unwrap();
        let text = String::from_utf8(artifact.bytes).unwrap();

        assert!(text.starts_with("Income Report\n"));
        assert!(text.contains("\"Khan, Ahmed\""));
        assert!(text.contains("Date,Donor,Amount"));
        assert!(text.ends_with("Total,,1000\n"));
        assert_eq!(artifact.extension, "csv");
    }

    #[test]
    fn csv_renderer_doubles_embedded_quotes() {
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("plain"), "plain");
    }

    #[test]
    fn json_renderer_round_trips_rows() {
        let artifact = JsonRenderer.render(&sample_document()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();

        assert_eq!(value["title"], "Income Report");
        assert_eq!(value["rows"][0][2], "1000");
        assert_eq!(value["totals_row"][0], "Total");
        assert_eq!(artifact.content_type, "application/json");
    }

    #[test]
    fn renderer_for_matches_format() {
        assert_eq!(renderer_for(ExportFormat::Csv).format(), ExportFormat::Csv);
        assert_eq!(
            renderer_for(ExportFormat::Json).format(),
            ExportFormat::Json
        );
    }
}
