use crate::model::MetricError;
use crate::model::roc::{RocCurve, roc};

pub const FPR_CEILINGS: [f64; 6] = [0.001, 0.01, 0.05, 0.1, 0.15, 0.2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub max_fpr: f64,
    pub tpr: f64,
}

impl OperatingPoint {
    /// Column key used by the score file, e.g. `TPR_FPR_1000` for a 0.1 ceiling.
    pub fn key(&self) -> String {
        format!("TPR_FPR_{}", (1e4 * self.max_fpr).round() as u64)
    }

    pub fn label(&self) -> String {
        format!("TPR @ {} FPR", self.max_fpr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub operating_points: Vec<OperatingPoint>,
    pub auc: f64,
    pub mia: f64,
    pub balanced_accuracy: f64,
}

impl MetricSummary {
    pub fn named_values(&self) -> Vec<(String, f64)> {
        let mut out = Vec::with_capacity(self.operating_points.len() + 3);
        for point in &self.operating_points {
            out.push((point.key(), point.tpr));
        }
        out.push(("AUC".to_string(), self.auc));
        out.push(("MIA".to_string(), self.mia));
        out.push(("accuracy".to_string(), self.balanced_accuracy));
        out
    }
}

/// ROC curve that scores are read from, with collinear points removed when
/// `drop_intermediate` is set.
pub fn scoring_curve(
    labels: &[u8],
    predictions: &[f64],
    drop_intermediate: bool,
) -> Result<RocCurve, MetricError> {
    let curve = roc(labels, predictions)?;
    Ok(if drop_intermediate {
        curve.drop_intermediate()
    } else {
        curve
    })
}

pub fn tpr_at_fpr(
    labels: &[u8],
    predictions: &[f64],
    max_fpr: f64,
    drop_intermediate: bool,
) -> Result<f64, MetricError> {
    let curve = scoring_curve(labels, predictions, drop_intermediate)?;
    tpr_at_fpr_on_curve(&curve, max_fpr)
}

/// Best TPR over curve points with `FPR < max_fpr`.
///
/// A ceiling of exactly 1 admits every point, including (1, 1).
pub fn tpr_at_fpr_on_curve(curve: &RocCurve, max_fpr: f64) -> Result<f64, MetricError> {
    if !max_fpr.is_finite() || max_fpr <= 0.0 || max_fpr > 1.0 {
        return Err(MetricError::InvalidFprCeiling(max_fpr));
    }
    let whole_curve = max_fpr >= 1.0;
    curve
        .points()
        .filter(|&(fpr, _)| whole_curve || fpr < max_fpr)
        .map(|(_, tpr)| tpr)
        .reduce(f64::max)
        .ok_or(MetricError::NoOperatingPoint(max_fpr))
}

pub fn auc(curve: &RocCurve) -> f64 {
    let mut area = 0.0;
    for i in 1..curve.len() {
        area += (curve.fpr[i] - curve.fpr[i - 1]) * (curve.tpr[i] + curve.tpr[i - 1]) / 2.0;
    }
    area
}

pub fn mia(curve: &RocCurve) -> f64 {
    curve
        .points()
        .map(|(fpr, tpr)| tpr - fpr)
        .fold(f64::NEG_INFINITY, f64::max)
}

pub fn balanced_accuracy(curve: &RocCurve) -> f64 {
    curve
        .points()
        .map(|(fpr, tpr)| 1.0 - (fpr + (1.0 - tpr)) / 2.0)
        .fold(f64::NEG_INFINITY, f64::max)
}

pub fn summarize(curve: &RocCurve, ceilings: &[f64]) -> Result<MetricSummary, MetricError> {
    let mut operating_points = Vec::with_capacity(ceilings.len());
    for &max_fpr in ceilings {
        operating_points.push(OperatingPoint {
            max_fpr,
            tpr: tpr_at_fpr_on_curve(curve, max_fpr)?,
        });
    }
    Ok(MetricSummary {
        operating_points,
        auc: auc(curve),
        mia: mia(curve),
        balanced_accuracy: balanced_accuracy(curve),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/metrics.rs"]
mod tests;
