//! Evaluation artifacts: a metrics document and an HTML report per evaluation

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{CeError, Result};
use crate::gate::Verdict;
use crate::manifest::ModelDescriptor;
use crate::metrics::MetricsResult;

/// Locations of the artifacts written for one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub metrics_path: String,
    pub report_path: String,
}

/// Capability that persists evaluation artifacts
pub trait ArtifactWriter {
    fn write(
        &self,
        descriptor: &ModelDescriptor,
        metrics: &MetricsResult,
        verdict: &Verdict,
    ) -> Result<ArtifactPaths>;
}

/// Metrics document: the model identity followed by its metrics
#[derive(Debug, Serialize)]
struct MetricsDocument<'a> {
    model_id: &'a str,
    version: &'a str,
    evaluation_profile: &'a str,
    #[serde(flatten)]
    metrics: &'a MetricsResult,
}

impl<'a> MetricsDocument<'a> {
    fn new(descriptor: &'a ModelDescriptor, metrics: &'a MetricsResult) -> Self {
        MetricsDocument {
            model_id: &descriptor.model_id,
            version: &descriptor.version,
            evaluation_profile: &descriptor.evaluation_profile,
            metrics,
        }
    }
}

/// Writes `<stem>_metrics.json` and `<stem>_report.html` into a reports directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    reports_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        ReportWriter {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    fn write_file(&self, descriptor: &ModelDescriptor, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| {
            CeError::artifact_writer(
                descriptor.key(),
                format!("cannot write {}: {}", path.display(), e),
            )
        })
    }
}

impl ArtifactWriter for ReportWriter {
    fn write(
        &self,
        descriptor: &ModelDescriptor,
        metrics: &MetricsResult,
        verdict: &Verdict,
    ) -> Result<ArtifactPaths> {
        fs::create_dir_all(&self.reports_dir).map_err(|e| {
            CeError::artifact_writer(
                descriptor.key(),
                format!("cannot create {}: {}", self.reports_dir.display(), e),
            )
        })?;

        let stem = descriptor.artifact_stem();
        let metrics_path = self.reports_dir.join(format!("{stem}_metrics.json"));
        let report_path = self.reports_dir.join(format!("{stem}_report.html"));

        let metrics_json = serde_json::to_string_pretty(&MetricsDocument::new(descriptor, metrics))?;
        self.write_file(descriptor, &metrics_path, &metrics_json)?;
        self.write_file(
            descriptor,
            &report_path,
            &render_report(descriptor, &metrics_json, verdict),
        )?;

        debug!(
            metrics = %metrics_path.display(),
            report = %report_path.display(),
            "artifacts_written"
        );

        Ok(ArtifactPaths {
            metrics_path: metrics_path.display().to_string(),
            report_path: report_path.display().to_string(),
        })
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_report(descriptor: &ModelDescriptor, metrics_json: &str, verdict: &Verdict) -> String {
    let status = if verdict.passed { "PASS" } else { "FAIL" };
    let reasons_html = if verdict.reasons.is_empty() {
        "<p>No failures</p>".to_string()
    } else {
        let items: String = verdict
            .reasons
            .iter()
            .map(|r| format!("<li>{}</li>", escape_html(r)))
            .collect();
        format!("<ul>{items}</ul>")
    };
    let model_id = escape_html(&descriptor.model_id);
    let version = escape_html(&descriptor.version);
    let profile = escape_html(&descriptor.evaluation_profile);

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>CE Report - {model_id} v{version}</title>
  </head>
  <body>
    <h1>Continuous Evaluation Report</h1>
    <p><strong>Model:</strong> {model_id}</p>
    <p><strong>Version:</strong> {version}</p>
    <p><strong>Profile:</strong> {profile}</p>
    <p><strong>Status:</strong> {status}</p>
    <h2>Metrics</h2>
    <pre>{metrics}</pre>
    <h2>Gatekeeper</h2>
    {reasons_html}
  </body>
</html>
"#,
        metrics = escape_html(metrics_json),
    )
}
