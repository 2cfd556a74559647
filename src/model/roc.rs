use crate::model::MetricError;

/// Threshold sweep over distinct prediction values, highest first.
///
/// Index 0 is always the origin (threshold `+inf`, nothing classified as a
/// member). The last point classifies every challenge point as a member and
/// therefore sits at (1, 1).
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub thresholds: Vec<f64>,
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub false_positives: Vec<usize>,
    pub true_positives: Vec<usize>,
    pub positives: usize,
    pub negatives: usize,
}

pub fn roc(labels: &[u8], predictions: &[f64]) -> Result<RocCurve, MetricError> {
    if labels.len() != predictions.len() {
        return Err(MetricError::LengthMismatch {
            labels: labels.len(),
            predictions: predictions.len(),
        });
    }
    if labels.is_empty() {
        return Err(MetricError::Empty);
    }
    if let Some(index) = labels.iter().position(|&l| l > 1) {
        return Err(MetricError::InvalidLabel {
            index,
            value: labels[index],
        });
    }
    if let Some(index) = predictions.iter().position(|p| !p.is_finite()) {
        return Err(MetricError::NonFinite { index });
    }

    let positives = labels.iter().filter(|&&l| l == 1).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(MetricError::SingleClass {
            positives,
            negatives,
        });
    }

    let mut order: Vec<usize> = (0..predictions.len()).collect();
    order.sort_by(|&a, &b| predictions[b].total_cmp(&predictions[a]));

    let mut thresholds = vec![f64::INFINITY];
    let mut false_positives = vec![0usize];
    let mut true_positives = vec![0usize];

    let mut fp = 0usize;
    let mut tp = 0usize;
    let mut i = 0usize;
    while i < order.len() {
        // `==` rather than total_cmp so that 0.0 and -0.0 share a threshold.
        let current = predictions[order[i]];
        while i < order.len() && predictions[order[i]] == current {
            if labels[order[i]] == 1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        thresholds.push(current);
        false_positives.push(fp);
        true_positives.push(tp);
    }

    Ok(RocCurve::from_counts(
        thresholds,
        false_positives,
        true_positives,
        positives,
        negatives,
    ))
}

impl RocCurve {
    fn from_counts(
        thresholds: Vec<f64>,
        false_positives: Vec<usize>,
        true_positives: Vec<usize>,
        positives: usize,
        negatives: usize,
    ) -> Self {
        let fpr = false_positives
            .iter()
            .map(|&fp| fp as f64 / negatives as f64)
            .collect();
        let tpr = true_positives
            .iter()
            .map(|&tp| tp as f64 / positives as f64)
            .collect();
        Self {
            thresholds,
            fpr,
            tpr,
            false_positives,
            true_positives,
            positives,
            negatives,
        }
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fpr.iter().copied().zip(self.tpr.iter().copied())
    }

    /// Removes sweep points that lie on a straight segment between their
    /// neighbours. The origin and both ends of the threshold sweep are kept;
    /// published leaderboard scores use the thinned curve.
    pub fn drop_intermediate(&self) -> RocCurve {
        let n = self.len();
        // The origin is not part of the sweep being thinned.
        if n <= 3 {
            return self.clone();
        }

        let mut keep = Vec::with_capacity(n);
        keep.push(0usize);
        for j in 1..n {
            let is_end = j == 1 || j == n - 1;
            if is_end
                || second_difference(&self.false_positives, j) != 0
                || second_difference(&self.true_positives, j) != 0
            {
                keep.push(j);
            }
        }

        RocCurve::from_counts(
            keep.iter().map(|&j| self.thresholds[j]).collect(),
            keep.iter().map(|&j| self.false_positives[j]).collect(),
            keep.iter().map(|&j| self.true_positives[j]).collect(),
            self.positives,
            self.negatives,
        )
    }
}

fn second_difference(values: &[usize], j: usize) -> i64 {
    values[j + 1] as i64 - 2 * values[j] as i64 + values[j - 1] as i64
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/roc.rs"]
mod tests;
