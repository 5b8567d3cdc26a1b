//! Benchmarks for the forward pass, the gradient step, and a short
//! training run on synthetic data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minerva::activations::Activation;
use minerva::builders::NetBuilder;
use minerva::network::TrainOptions;
use ndarray::Array2;

fn synthetic_batch(samples: usize, features: usize, classes: usize) -> (Array2<f32>, Vec<usize>) {
    let inputs = Array2::from_shape_fn((samples, features), |(i, j)| {
        ((i * features + j) as f32 * 0.7).sin()
    });
    let targets = (0..samples).map(|i| i % classes).collect();
    (inputs, targets)
}

fn bench_forward_batch(c: &mut Criterion) {
    let net = NetBuilder::new(64, 10)
        .hidden_size(32)
        .seed(0)
        .build()
        .unwrap();
    let (inputs, _) = synthetic_batch(128, 64, 10);

    c.bench_function("forward_batch 128x64", |b| {
        b.iter(|| net.forward_batch(black_box(inputs.view())).unwrap())
    });
}

fn bench_update_weights(c: &mut Criterion) {
    let mut net = NetBuilder::new(64, 10)
        .hidden_size(32)
        .seed(0)
        .build()
        .unwrap();
    let (inputs, targets) = synthetic_batch(32, 64, 10);

    c.bench_function("update_weights 32x64", |b| {
        b.iter(|| {
            net.update_weights(black_box(inputs.view()), black_box(&targets))
                .unwrap()
        })
    });
}

fn bench_train_epochs(c: &mut Criterion) {
    let (inputs, targets) = synthetic_batch(256, 16, 4);

    c.bench_function("train 5 epochs 256x16", |b| {
        b.iter(|| {
            let mut net = NetBuilder::new(16, 4)
                .hidden_size(12)
                .activation(Activation::Tanh)
                .seed(0)
                .build()
                .unwrap();
            net.train(
                black_box(inputs.view()),
                black_box(&targets),
                &TrainOptions::new(5, 32).silent(),
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_forward_batch,
    bench_update_weights,
    bench_train_epochs
);
criterion_main!(benches);
