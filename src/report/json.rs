use std::collections::BTreeMap;

use serde::Serialize;

use crate::pipeline::stage2_metrics::PartitionScore;
use crate::pipeline::stage3_aggregate::Aggregate;

/// Contents of `scores.json`. The compact form carries only `tpr_at_fpr`,
/// which is the key the leaderboard reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreFile {
    pub tpr_at_fpr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, ModelTypeDetails>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelTypeDetails {
    pub n_models: usize,
    pub n_points: usize,
    pub tpr_at_fpr: f64,
    pub metrics: BTreeMap<String, f64>,
}

pub fn build_score_file(aggregate: &Aggregate, scores: &[PartitionScore], detailed: bool) -> ScoreFile {
    let details = detailed.then(|| {
        scores
            .iter()
            .map(|score| {
                let metrics: BTreeMap<String, f64> = score
                    .summary
                    .as_ref()
                    .map(|s| s.named_values().into_iter().collect())
                    .unwrap_or_default();
                (
                    score.model_type.clone(),
                    ModelTypeDetails {
                        n_models: score.n_models,
                        n_points: score.n_points,
                        tpr_at_fpr: score.tpr_at_fpr,
                        metrics,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>()
    });

    ScoreFile {
        tpr_at_fpr: aggregate.tpr_at_fpr,
        details,
    }
}

pub fn render_score_json(file: &ScoreFile) -> Result<String, serde_json::Error> {
    if file.details.is_some() {
        serde_json::to_string_pretty(file)
    } else {
        serde_json::to_string(file)
    }
}
