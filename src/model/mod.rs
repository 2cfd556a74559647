pub mod metrics;
pub mod profile;
pub mod roc;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("no challenge points to score")]
    Empty,
    #[error("labels ({labels}) and predictions ({predictions}) differ in length")]
    LengthMismatch { labels: usize, predictions: usize },
    #[error("label {value} at index {index} is not 0 or 1")]
    InvalidLabel { index: usize, value: u8 },
    #[error("prediction at index {index} is not finite")]
    NonFinite { index: usize },
    #[error(
        "ROC undefined with {positives} members and {negatives} non-members; both classes are required"
    )]
    SingleClass { positives: usize, negatives: usize },
    #[error("FPR ceiling {0} is outside (0, 1]")]
    InvalidFprCeiling(f64),
    #[error("no ROC point has FPR below {0}")]
    NoOperatingPoint(f64),
}
