use std::path::{Path, PathBuf};

use crate::pipeline::PipelineError;
use crate::pipeline::stage2_metrics::PartitionScore;
use crate::pipeline::stage3_aggregate::Aggregate;
use crate::report::html::{ReportRow, render_detailed_html};
use crate::report::json::{build_score_file, render_score_json};
use crate::report::svg::render_roc_svg;
use crate::report::StagedFile;

pub const SCORES_JSON: &str = "scores.json";
pub const SCORES_HTML: &str = "scores.html";

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub title: &'a str,
    pub scores: &'a [PartitionScore],
    pub aggregate: &'a Aggregate,
    pub detailed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub scores_json: PathBuf,
    pub scores_html: Option<PathBuf>,
}

pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> Result<ReportPaths, PipelineError> {
    let scores_json = out_dir.join(SCORES_JSON);
    let scores_html = out_dir.join(SCORES_HTML);
    let report_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| PipelineError::Report { path, source }
    };

    let score_file = build_score_file(input.aggregate, input.scores, input.detailed);
    let json = render_score_json(&score_file)
        .map_err(std::io::Error::other)
        .map_err(report_error(&scores_json))?;
    let html = if input.detailed {
        Some(render_html(input).map_err(report_error(&scores_html))?)
    } else {
        None
    };

    // Both files are staged before either is renamed, so a failed run leaves
    // no report behind.
    let staged_json = StagedFile::stage(&scores_json, &json).map_err(report_error(&scores_json))?;
    let staged_html = match &html {
        Some(html) => {
            Some(StagedFile::stage(&scores_html, html).map_err(report_error(&scores_html))?)
        }
        None => None,
    };

    let written_html = match staged_html {
        Some(staged) => {
            staged.commit().map_err(report_error(&scores_html))?;
            tracing::info!(path = %scores_html.display(), "wrote detailed report");
            Some(scores_html)
        }
        None => None,
    };
    if let Err(source) = staged_json.commit() {
        if let Some(path) = &written_html {
            let _ = std::fs::remove_file(path);
        }
        return Err(report_error(&scores_json)(source));
    }
    tracing::info!(path = %scores_json.display(), "wrote score file");

    Ok(ReportPaths {
        scores_json,
        scores_html: written_html,
    })
}

fn render_html(input: &Stage4Input<'_>) -> std::io::Result<String> {
    let rows = input
        .scores
        .iter()
        .filter_map(|s| {
            s.summary.as_ref().map(|summary| ReportRow {
                model_type: &s.model_type,
                summary,
            })
        })
        .collect::<Vec<_>>();
    let curves = input
        .scores
        .iter()
        .filter_map(|s| s.curve.as_ref().map(|curve| (s.model_type.as_str(), curve)))
        .collect::<Vec<_>>();
    Ok(render_detailed_html(input.title, &rows, &render_roc_svg(&curves)?))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
