use crate::input::layout::InputLayout;
use crate::input::{ChallengeSet, ModelFiles, load_challenge_set, plan_model_type};
use crate::model::profile::TrackProfile;
use crate::pipeline::PipelineError;

#[derive(Debug)]
pub struct Stage1Output {
    pub sets: Vec<ChallengeSet>,
    pub skipped: Vec<String>,
}

/// Loads every model type of the track that the submission covers. All paths
/// are resolved before the first file is read so a missing file never leaves
/// a half-loaded run behind.
pub fn run_stage1(
    layout: &InputLayout,
    profile: &TrackProfile,
    partition: &str,
) -> Result<Stage1Output, PipelineError> {
    let mut plans: Vec<(&str, Vec<ModelFiles>)> = Vec::new();
    let mut skipped = Vec::new();

    for model_type in &profile.model_types {
        if !layout.has_submission(model_type) {
            tracing::warn!(
                model_type = %model_type,
                "submission has no folder for this model type; skipping"
            );
            skipped.push(model_type.clone());
            continue;
        }
        let plan = plan_model_type(layout, profile, model_type, partition)?;
        tracing::info!(
            model_type = %model_type,
            partition = %partition,
            models = plan.len(),
            "resolved challenge files"
        );
        plans.push((model_type.as_str(), plan));
    }

    let mut sets = Vec::with_capacity(plans.len());
    for (model_type, plan) in plans {
        let set = load_challenge_set(model_type, &plan)?;
        tracing::info!(
            model_type = %model_type,
            points = set.len(),
            "loaded challenge set"
        );
        sets.push(set);
    }

    Ok(Stage1Output { sets, skipped })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;
