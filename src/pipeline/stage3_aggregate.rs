use crate::model::profile::TrackProfile;
use crate::pipeline::PipelineError;
use crate::pipeline::stage2_metrics::PartitionScore;

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub model_type: String,
    pub tpr_at_fpr: f64,
}

/// The headline score is the best model type: an adversary picks whichever
/// attack performs best.
pub fn run_stage3(
    scores: &[PartitionScore],
    profile: &TrackProfile,
) -> Result<Aggregate, PipelineError> {
    let aggregate = max_score(scores.iter().map(|s| (s.model_type.as_str(), s.tpr_at_fpr)))
        .ok_or_else(|| PipelineError::NoPartitionsFound {
            expected: profile.model_types.join(", "),
        })?;
    tracing::info!(
        model_type = %aggregate.model_type,
        tpr_at_fpr = aggregate.tpr_at_fpr,
        "headline score"
    );
    Ok(aggregate)
}

/// Maximum over `(model_type, score)` pairs; on ties the earliest wins.
pub fn max_score<'a>(scores: impl IntoIterator<Item = (&'a str, f64)>) -> Option<Aggregate> {
    let mut best: Option<Aggregate> = None;
    for (model_type, score) in scores {
        match &best {
            Some(current) if current.tpr_at_fpr >= score => {}
            _ => {
                best = Some(Aggregate {
                    model_type: model_type.to_string(),
                    tpr_at_fpr: score,
                })
            }
        }
    }
    best
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_aggregate.rs"]
mod tests;
