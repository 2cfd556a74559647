use crate::model::profile::model_name;
use crate::pipeline::stage2_metrics::PartitionScore;
use crate::pipeline::stage3_aggregate::Aggregate;
use crate::report::format_f64_4;

pub fn render_summary_text(
    scores: &[PartitionScore],
    skipped: &[String],
    aggregate: &Aggregate,
    max_fpr: f64,
) -> String {
    let mut out = String::new();
    for score in scores {
        out.push_str(&format!(
            "{} TPR at FPR < {}: {} ({} models, {} challenge points)\n",
            model_name(&score.model_type),
            max_fpr,
            format_f64_4(score.tpr_at_fpr),
            score.n_models,
            score.n_points
        ));
    }
    for model_type in skipped {
        out.push_str(&format!("{}: no submission, skipped\n", model_name(model_type)));
    }
    if scores.len() > 1 {
        out.push_str(&format!(
            "Best model type: {} ({})\n",
            aggregate.model_type,
            format_f64_4(aggregate.tpr_at_fpr)
        ));
    }
    out
}
