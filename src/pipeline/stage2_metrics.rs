use crate::input::ChallengeSet;
use crate::model::metrics::{
    FPR_CEILINGS, MetricSummary, scoring_curve, summarize, tpr_at_fpr, tpr_at_fpr_on_curve,
};
use crate::model::profile::TrackProfile;
use crate::model::roc::RocCurve;
use crate::model::MetricError;
use crate::pipeline::PipelineError;

#[derive(Debug, Clone)]
pub struct PartitionScore {
    pub model_type: String,
    pub n_models: usize,
    pub n_points: usize,
    pub tpr_at_fpr: f64,
    /// Curve and derived metrics, kept for the detailed report only.
    pub curve: Option<RocCurve>,
    pub summary: Option<MetricSummary>,
}

#[derive(Debug)]
pub struct Stage2Output {
    pub scores: Vec<PartitionScore>,
}

pub fn run_stage2(sets: &[ChallengeSet], profile: &TrackProfile) -> Result<Stage2Output, PipelineError> {
    let mut scores = Vec::with_capacity(sets.len());
    for set in sets {
        let score = score_challenge_set(set, profile).map_err(|source| PipelineError::Metric {
            model_type: set.model_type.clone(),
            source,
        })?;
        tracing::info!(
            model_type = %score.model_type,
            max_fpr = profile.max_fpr,
            tpr_at_fpr = score.tpr_at_fpr,
            "scored model type"
        );
        scores.push(score);
    }
    Ok(Stage2Output { scores })
}

/// One attack threshold shared by all models of a type: the score is computed
/// over the concatenated challenge points, not averaged per model.
pub fn score_challenge_set(
    set: &ChallengeSet,
    profile: &TrackProfile,
) -> Result<PartitionScore, MetricError> {
    let (headline, curve, summary) = if profile.detailed {
        let curve = scoring_curve(&set.labels, &set.predictions, profile.drop_intermediate)?;
        let tpr = tpr_at_fpr_on_curve(&curve, profile.max_fpr)?;
        let summary = summarize(&curve, &FPR_CEILINGS)?;
        (tpr, Some(curve), Some(summary))
    } else {
        let tpr = tpr_at_fpr(
            &set.labels,
            &set.predictions,
            profile.max_fpr,
            profile.drop_intermediate,
        )?;
        (tpr, None, None)
    };

    Ok(PartitionScore {
        model_type: set.model_type.clone(),
        n_models: set.model_ids.len(),
        n_points: set.len(),
        tpr_at_fpr: headline,
        curve,
        summary,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_metrics.rs"]
mod tests;
