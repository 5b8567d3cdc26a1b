use ndarray::{arr1, arr2};

use crate::metrics::classification::{accuracy, argmax, argmax_rows, multiclass_accuracy};
use crate::metrics::TrainingHistory;

#[test]
fn test_argmax() {
    assert_eq!(argmax(arr1(&[0.1, 0.7, 0.2]).view()), 1);
    assert_eq!(argmax(arr1(&[5.0]).view()), 0);
    assert_eq!(argmax(arr1(&[-3.0, -1.0, -2.0]).view()), 1);
}

#[test]
fn test_argmax_rows() {
    let outputs = arr2(&[[0.9, 0.1], [0.3, 0.7], [0.5, 0.4]]);
    assert_eq!(argmax_rows(outputs.view()).to_vec(), vec![0, 1, 0]);
}

#[test]
fn test_accuracy() {
    assert_eq!(accuracy(&[0, 1, 2, 1], &[0, 1, 1, 1]), 0.75);
    assert_eq!(accuracy(&[], &[]), 0.0);
}

#[test]
fn test_multiclass_accuracy() {
    let outputs = arr2(&[[0.9, 0.1], [0.3, 0.7], [0.8, 0.2]]);
    let value = multiclass_accuracy(outputs.view(), &[0, 1, 1]);
    assert!((value - 2.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_history_means_are_cumulative() {
    let mut history = TrainingHistory::new();
    assert_eq!(history.mean_train_cost(), None);

    history.train_cost.push(-0.9);
    history.train_cost.push(-0.3);
    history.train_accuracy.push(0.5);
    history.train_accuracy.push(1.0);

    assert_eq!(history.epochs(), 2);
    let mean = history.mean_train_cost().unwrap();
    assert!((mean - (-0.6)).abs() < 1e-6);
}

#[test]
fn test_history_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let path = path.to_str().unwrap();

    let mut history = TrainingHistory::new();
    history.train_accuracy.push(0.75);
    history.train_cost.push(-0.25);
    history.validation_accuracy.push(0.5);
    history.validation_cost.push(-0.5);
    history.save(path).unwrap();

    let loaded = TrainingHistory::load(path).unwrap();
    assert_eq!(loaded.train_accuracy, history.train_accuracy);
    assert_eq!(loaded.train_cost, history.train_cost);
    assert_eq!(loaded.validation_accuracy, history.validation_accuracy);
    assert_eq!(loaded.validation_cost, history.validation_cost);
}
