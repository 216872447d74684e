use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_accuracy() {
    assert_eq!(accuracy(&[0usize, 1, 1, 0], &[0usize, 1, 0, 0]), 0.75);
    assert_eq!(accuracy(&["a", "b"], &["b", "a"]), 0.0);
}

#[test]
fn test_mean_squared_error() {
    assert!(close(mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0));
    assert!(close(
        mean_squared_error(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
        29.0 / 3.0
    ));
}

#[test]
fn test_log_loss_matches_hand_computation() {
    let truth = [0usize, 1];
    let probs = vec![vec![0.9, 0.1], vec![0.2, 0.8]];
    let expected = -(0.9f64.ln() + 0.8f64.ln()) / 2.0;
    assert!(close(log_loss(&truth, &probs), expected));
}

#[test]
fn test_log_loss_renormalizes_and_clips() {
    // rows summing to 2 are halved
    let loss = log_loss(&[0usize], &[vec![1.0, 1.0]]);
    assert!(close(loss, 2.0f64.ln()));

    let hard_miss = log_loss(&[1usize], &[vec![1.0, 0.0]]);
    assert!(hard_miss.is_finite());
    assert!(hard_miss > 30.0);
}

#[test]
fn test_binary_log_loss() {
    let loss = binary_log_loss(&[1.0, 0.0], &[0.8, 0.2]);
    assert!(close(loss, -(0.8f64.ln())));
}

#[test]
fn test_roc_auc_perfect_and_inverted() {
    let positive = [false, false, true, true];
    assert!(close(roc_auc(&positive, &[0.1, 0.2, 0.8, 0.9]), 1.0));
    assert!(close(roc_auc(&positive, &[0.9, 0.8, 0.2, 0.1]), 0.0));
}

#[test]
fn test_roc_auc_ties_average() {
    let positive = [false, true];
    assert!(close(roc_auc(&positive, &[0.5, 0.5]), 0.5));

    // one positive tied with one of two negatives
    let positive = [false, false, true];
    assert!(close(roc_auc(&positive, &[0.1, 0.5, 0.5]), 0.75));
}

#[test]
fn test_roc_auc_single_class_is_half() {
    assert_eq!(roc_auc(&[false, false], &[0.1, 0.8]), 0.5);
    assert_eq!(roc_auc(&[true], &[0.3]), 0.5);
}

#[test]
fn test_roc_auc_ranks_nan_scores_last() {
    let positive = [true, false, true, false];
    let scores = [f64::NAN, 0.1, 0.9, 0.2];
    assert_eq!(roc_auc(&positive, &scores), 1.0);

    let flipped = [false, true, false, true];
    assert_eq!(roc_auc(&flipped, &scores), 0.0);
}
