use ndarray::{Array1, ArrayView1, ArrayView2};

/// Index of the largest score in a single output vector.
pub fn argmax(scores: ArrayView1<f32>) -> usize {
    scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Arg-max over the last axis for every row of a batch of outputs.
pub fn argmax_rows(outputs: ArrayView2<f32>) -> Array1<usize> {
    let indices: Vec<usize> = outputs
        .rows()
        .into_iter()
        .map(|row| argmax(row))
        .collect();
    Array1::from_vec(indices)
}

/// Exact-match rate between predicted class indices and integer targets.
pub fn accuracy(predicted: &[usize], targets: &[usize]) -> f32 {
    if targets.is_empty() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .zip(targets.iter())
        .filter(|(p, t)| p == t)
        .count();
    correct as f32 / targets.len() as f32
}

/// Multi-class accuracy of raw network outputs against integer targets.
pub fn multiclass_accuracy(outputs: ArrayView2<f32>, targets: &[usize]) -> f32 {
    let predicted = argmax_rows(outputs);
    accuracy(predicted.as_slice().unwrap(), targets)
}
