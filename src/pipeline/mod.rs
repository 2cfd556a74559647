use std::path::PathBuf;

use crate::input::InputError;
use crate::model::MetricError;

pub mod stage1_load;
pub mod stage2_metrics;
pub mod stage3_aggregate;
pub mod stage4_report;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{model_type}: {source}")]
    Metric {
        model_type: String,
        source: MetricError,
    },
    #[error(
        "no predictions found for any of [{expected}]; the submission root must contain <model_type>/<partition>/<model_id>/prediction.csv"
    )]
    NoPartitionsFound { expected: String },
    #[error("failed to write {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}
