//! Plain metric formulas over already-decoded vectors.
//!
//! Callers guarantee equal, non-zero lengths.

pub const PROBABILITY_EPS: f64 = 1e-15;

pub fn accuracy<T: PartialEq>(truth: &[T], predictions: &[T]) -> f64 {
    let correct = truth
        .iter()
        .zip(predictions.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / truth.len() as f64
}

pub fn mean_squared_error(truth: &[f64], predictions: &[f64]) -> f64 {
    let sum = truth
        .iter()
        .zip(predictions.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum::<f64>();
    sum / truth.len() as f64
}

/// Multi-class cross-entropy. Rows are clipped then renormalized to sum to 1.
pub fn log_loss(truth: &[usize], probabilities: &[Vec<f64>]) -> f64 {
    let mut total = 0.0f64;
    for (&t, row) in truth.iter().zip(probabilities.iter()) {
        let clipped = row
            .iter()
            .map(|&p| clip_probability(p))
            .collect::<Vec<_>>();
        let norm = clipped.iter().sum::<f64>();
        let p = clipped.get(t).copied().unwrap_or(PROBABILITY_EPS) / norm;
        total -= p.ln();
    }
    total / truth.len() as f64
}

/// Cross-entropy of 0/1 targets against positive-class probabilities.
pub fn binary_log_loss(truth: &[f64], predictions: &[f64]) -> f64 {
    let mut total = 0.0f64;
    for (&t, &p) in truth.iter().zip(predictions.iter()) {
        let p = clip_probability(p);
        total -= t * p.ln() + (1.0 - t) * (1.0 - p).ln();
    }
    total / truth.len() as f64
}

/// Area under the ROC curve via the rank-sum statistic, ties get average ranks.
/// Returns 0.5 when only one class is present. NaN scores rank above every number.
pub fn roc_auc(positive: &[bool], scores: &[f64]) -> f64 {
    let n_pos = positive.iter().filter(|&&p| p).count();
    let n_neg = positive.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut order = (0..scores.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0f64; scores.len()];
    let mut i = 0usize;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // ranks are 1-based; a tie block shares the mean of its positions
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }

    let pos_rank_sum = positive
        .iter()
        .zip(ranks.iter())
        .filter(|(p, _)| **p)
        .map(|(_, r)| r)
        .sum::<f64>();
    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    (pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg)
}

fn clip_probability(p: f64) -> f64 {
    if p.is_nan() {
        return PROBABILITY_EPS;
    }
    p.clamp(PROBABILITY_EPS, 1.0 - PROBABILITY_EPS)
}

#[cfg(test)]
#[path = "../../tests/src_inline/results/metrics.rs"]
mod tests;
