use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::activations::{softmax_batch, Activation};
use crate::error::{MinervaError, Result};
use crate::metrics::classification;
use crate::metrics::TrainingHistory;

/// A two-layer feed-forward classifier trained by mini-batch stochastic
/// gradient descent with hand-derived backpropagation.
///
/// The network owns its parameters (two weight matrices and two bias
/// vectors), its hyperparameters, and the random generator used for weight
/// initialization and per-epoch shuffling. Weights are initialized with
/// random values from a uniform distribution between -0.1 and 0.1; biases
/// are initialized with zeros.
///
/// The hidden layer applies the configured [`Activation`]. The output layer
/// applies a row-wise softmax, except in the single-output configuration
/// where the raw linear value is returned unchanged.
pub struct Net {
    pub w1: Array2<f32>,
    pub b1: Array1<f32>,
    pub w2: Array2<f32>,
    pub b2: Array1<f32>,
    activation: Activation,
    output_size: usize,
    regularization_strength: f32,
    alpha: f32,
    lr_decay: f32,
    label_smoothing: f32,
    debug: bool,
    rng: StdRng,
}

/// Options for [`Net::train`].
///
/// `epochs` and `batch_size` are required; a validation set and the report
/// flag are optional. Reporting is on by default: with it enabled the driver
/// evaluates the full train (and validation) set once per epoch, appends to
/// the returned [`TrainingHistory`], and prints a per-epoch summary.
#[derive(Clone, Copy)]
pub struct TrainOptions<'a> {
    pub epochs: usize,
    pub batch_size: usize,
    pub validation: Option<(ArrayView2<'a, f32>, &'a [usize])>,
    pub report: bool,
}

impl<'a> TrainOptions<'a> {
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainOptions {
            epochs,
            batch_size,
            validation: None,
            report: true,
        }
    }

    /// Evaluate the given held-out set alongside the training set each epoch.
    pub fn with_validation(mut self, inputs: ArrayView2<'a, f32>, targets: &'a [usize]) -> Self {
        self.validation = Some((inputs, targets));
        self
    }

    /// Disable per-epoch evaluation and printing.
    pub fn silent(mut self) -> Self {
        self.report = false;
        self
    }
}

/// Contiguous, non-overlapping index ranges of `batch_size` samples.
/// A trailing remainder smaller than `batch_size` is dropped; those samples
/// do not participate in that epoch's updates.
pub(crate) fn batch_ranges(
    sample_count: usize,
    batch_size: usize,
) -> impl Iterator<Item = std::ops::Range<usize>> {
    (0..sample_count / batch_size).map(move |b| b * batch_size..(b + 1) * batch_size)
}

impl Net {
    /// Create a new network with the given input, output, and hidden sizes
    /// and the given hidden activation. Hyperparameters take their default
    /// values (no regularization, learning rate 0.1, decay 1.1, label
    /// smoothing 1.0) and the random generator is seeded from entropy; use
    /// [`crate::builders::NetBuilder`] for full control.
    pub fn new(
        feature_count: usize,
        output_classes: usize,
        hidden_size: usize,
        activation: Activation,
    ) -> Self {
        Self::with_rng(
            feature_count,
            output_classes,
            hidden_size,
            activation,
            StdRng::from_entropy(),
        )
    }

    pub(crate) fn with_rng(
        feature_count: usize,
        output_classes: usize,
        hidden_size: usize,
        activation: Activation,
        mut rng: StdRng,
    ) -> Self {
        assert!(feature_count > 0, "feature count must be positive");
        assert!(output_classes > 0, "output class count must be positive");
        assert!(hidden_size > 0, "hidden size must be positive");

        let w1 = Array2::random_using((feature_count, hidden_size), Uniform::new(-0.1, 0.1), &mut rng);
        let w2 = Array2::random_using((hidden_size, output_classes), Uniform::new(-0.1, 0.1), &mut rng);

        Net {
            w1,
            b1: Array1::zeros(hidden_size),
            w2,
            b2: Array1::zeros(output_classes),
            activation,
            output_size: output_classes,
            regularization_strength: 0.0,
            alpha: 0.1,
            lr_decay: 1.1,
            label_smoothing: 1.0,
            debug: false,
            rng,
        }
    }

    pub fn with_hidden_weights(mut self, weights: Array2<f32>) -> Self {
        assert_eq!(weights.dim(), self.w1.dim());
        self.w1 = weights;
        self
    }

    pub fn with_hidden_biases(mut self, biases: Array1<f32>) -> Self {
        assert_eq!(biases.dim(), self.b1.dim());
        self.b1 = biases;
        self
    }

    pub fn with_output_weights(mut self, weights: Array2<f32>) -> Self {
        assert_eq!(weights.dim(), self.w2.dim());
        self.w2 = weights;
        self
    }

    pub fn with_output_biases(mut self, biases: Array1<f32>) -> Self {
        assert_eq!(biases.dim(), self.b2.dim());
        self.b2 = biases;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.alpha = learning_rate;
        self
    }

    pub fn with_learning_rate_decay(mut self, decay: f32) -> Self {
        self.lr_decay = decay;
        self
    }

    pub fn with_regularization_strength(mut self, strength: f32) -> Self {
        self.regularization_strength = strength;
        self
    }

    pub fn with_label_smoothing(mut self, value: f32) -> Self {
        self.label_smoothing = value;
        self
    }

    /// Trace all intermediate tensors of every forward pass to stderr.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn feature_count(&self) -> usize {
        self.w1.nrows()
    }

    pub fn hidden_size(&self) -> usize {
        self.b1.len()
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn hidden_activation(&self) -> Activation {
        self.activation
    }

    /// The current learning rate. Divided by the decay factor once per epoch.
    pub fn learning_rate(&self) -> f32 {
        self.alpha
    }

    pub fn regularization_strength(&self) -> f32 {
        self.regularization_strength
    }

    /// Declared for interface compatibility; not used by the gradient math.
    pub fn label_smoothing(&self) -> f32 {
        self.label_smoothing
    }

    /// Perform a forward pass for a single input vector.
    pub fn forward(&self, input: ArrayView1<f32>) -> Result<Array1<f32>> {
        let input = input.insert_axis(Axis(0)); // Treat single instance as a minibatch of size 1
        let output = self.forward_batch(input.view())?;
        let width = output.shape()[1];
        Ok(output.into_shape((width,)).unwrap()) // Remove the batch dimension
    }

    /// Perform a forward pass for a batch of input vectors, returning only
    /// the output predictions.
    pub fn forward_batch(&self, inputs: ArrayView2<f32>) -> Result<Array2<f32>> {
        let (_, prediction) = self.forward_train(inputs)?;
        Ok(prediction)
    }

    /// Perform a forward pass in training mode, returning both the hidden
    /// activations and the output predictions. The hidden activations are
    /// needed by the backward pass.
    ///
    /// The output is a softmax distribution per row, or the raw linear value
    /// when the network is configured with a single output.
    pub fn forward_train(&self, inputs: ArrayView2<f32>) -> Result<(Array2<f32>, Array2<f32>)> {
        if inputs.ncols() != self.w1.nrows() {
            return Err(MinervaError::shape_mismatch(
                format!("{} input features", self.w1.nrows()),
                format!("{} input features", inputs.ncols()),
            ));
        }

        if self.debug {
            eprintln!("forward: inputs =\n{:?}", inputs);
            eprintln!("forward: w1 =\n{:?}\nb1 = {:?}", self.w1, self.b1);
        }

        let b1_row = self.b1.view().insert_axis(Axis(0));
        let mut hidden = inputs.dot(&self.w1) + &b1_row;
        if self.debug {
            eprintln!("forward: hidden pre-activation =\n{:?}", hidden);
        }
        self.activation.apply_batch(&mut hidden);
        if self.debug {
            eprintln!("forward: hidden {} =\n{:?}", self.activation, hidden);
            eprintln!("forward: w2 =\n{:?}\nb2 = {:?}", self.w2, self.b2);
        }

        let b2_row = self.b2.view().insert_axis(Axis(0));
        let mut prediction = hidden.dot(&self.w2) + &b2_row;
        if self.debug {
            eprintln!("forward: output pre-activation =\n{:?}", prediction);
        }
        // A single output stays linear; anything wider is normalized per row.
        if self.output_size != 1 {
            softmax_batch(&mut prediction);
        }
        if self.debug {
            eprintln!("forward: prediction =\n{:?}", prediction);
        }

        Ok((hidden, prediction))
    }

    /// Predict the class index (arg-max over the output distribution) for
    /// each sample in the batch.
    pub fn predict(&self, inputs: ArrayView2<f32>) -> Result<Array1<usize>> {
        let outputs = self.forward_batch(inputs)?;
        Ok(classification::argmax_rows(outputs.view()))
    }

    /// Predict the class index for a single sample.
    pub fn predict_one(&self, input: ArrayView1<f32>) -> Result<usize> {
        let output = self.forward(input)?;
        Ok(classification::argmax(output.view()))
    }

    /// Natural log of the probability assigned to the true class, per sample.
    ///
    /// This is the negative of the per-sample cross-entropy loss before
    /// negation; callers average and negate as needed for reporting. No
    /// normalization or summation is performed here.
    pub fn cost(&self, predictions: ArrayView2<f32>, targets: &[usize]) -> Result<Array1<f32>> {
        if predictions.nrows() != targets.len() {
            return Err(MinervaError::shape_mismatch(
                format!("{} prediction rows", targets.len()),
                format!("{} prediction rows", predictions.nrows()),
            ));
        }
        let classes = predictions.ncols();
        if let Some(&bad) = targets.iter().find(|&&t| t >= classes) {
            return Err(MinervaError::invalid_parameter(
                "targets".to_string(),
                format!("class index {} out of range for {} classes", bad, classes),
            ));
        }
        Ok(Array1::from_shape_fn(targets.len(), |i| {
            predictions[[i, targets[i]]].ln()
        }))
    }

    /// Apply one mini-batch gradient step to all four parameter tensors.
    ///
    /// The output-layer gradient is the closed-form softmax + cross-entropy
    /// gradient with respect to the pre-softmax logits, `dY = Y - T`; it is
    /// propagated through the hidden activation's derivative and averaged
    /// over the batch. Weight gradients carry an L2 term scaled by the
    /// regularization strength. All gradients are computed before any
    /// parameter is mutated, so the four updates land at the same logical
    /// time step.
    pub fn update_weights(&mut self, batch_inputs: ArrayView2<f32>, batch_targets: &[usize]) -> Result<()> {
        if batch_inputs.nrows() != batch_targets.len() {
            return Err(MinervaError::shape_mismatch(
                format!("{} samples", batch_inputs.nrows()),
                format!("{} targets", batch_targets.len()),
            ));
        }
        if batch_inputs.nrows() == 0 {
            return Err(MinervaError::invalid_parameter(
                "batch",
                "must contain at least one sample",
            ));
        }
        if let Some(&bad) = batch_targets.iter().find(|&&t| t >= self.output_size) {
            return Err(MinervaError::invalid_parameter(
                "targets".to_string(),
                format!(
                    "class index {} out of range for {} classes",
                    bad, self.output_size
                ),
            ));
        }

        let (hidden, output) = self.forward_train(batch_inputs)?;
        let batch_len = batch_inputs.nrows() as f32;

        // dY = Y - T, with T the one-hot target matrix.
        let mut output_grad = output;
        for (i, &target) in batch_targets.iter().enumerate() {
            output_grad[[i, target]] -= 1.0;
        }

        let grad_b2 = output_grad.mean_axis(Axis(0)).unwrap();
        let grad_w2 =
            hidden.t().dot(&output_grad) / batch_len + &self.w2 * self.regularization_strength;

        // Backpropagate through the hidden activation before touching w2.
        let hidden_deriv = self.activation.derivative_from_output_batch(hidden.view());
        let hidden_grad = output_grad.dot(&self.w2.t()) * &hidden_deriv;

        let grad_b1 = hidden_grad.mean_axis(Axis(0)).unwrap();
        let grad_w1 = batch_inputs.t().dot(&hidden_grad) / batch_len
            + &self.w1 * self.regularization_strength;

        let alpha = self.alpha;
        self.b2.zip_mut_with(&grad_b2, |b, &g| *b -= alpha * g);
        self.w2.zip_mut_with(&grad_w2, |w, &g| *w -= alpha * g);
        self.b1.zip_mut_with(&grad_b1, |b, &g| *b -= alpha * g);
        self.w1.zip_mut_with(&grad_w1, |w, &g| *w -= alpha * g);

        Ok(())
    }

    /// Accuracy and mean per-sample log-probability over a whole set.
    pub fn evaluate(&self, inputs: ArrayView2<f32>, targets: &[usize]) -> Result<(f32, f32)> {
        let predictions = self.forward_batch(inputs)?;
        let accuracy = classification::multiclass_accuracy(predictions.view(), targets);
        let costs = self.cost(predictions.view(), targets)?;
        Ok((accuracy, costs.mean().unwrap_or(0.0)))
    }

    /// Train the network for `options.epochs` epochs.
    ///
    /// Each epoch draws a fresh uniformly random permutation of the samples,
    /// walks it in contiguous batches of `options.batch_size` (a trailing
    /// remainder is dropped), applies one [`Net::update_weights`] step per
    /// batch, and then divides the learning rate by the decay factor.
    ///
    /// With reporting enabled the entire train set (and validation set, if
    /// given) is evaluated after every epoch and appended to the returned
    /// [`TrainingHistory`]; the printed mean costs are cumulative over all
    /// epochs so far, not per-epoch.
    pub fn train(
        &mut self,
        inputs: ArrayView2<f32>,
        targets: &[usize],
        options: &TrainOptions,
    ) -> Result<TrainingHistory> {
        if options.epochs == 0 {
            return Err(MinervaError::invalid_parameter(
                "epochs",
                "must be at least 1",
            ));
        }
        if options.batch_size == 0 {
            return Err(MinervaError::invalid_parameter(
                "batch_size",
                "must be at least 1",
            ));
        }
        if inputs.nrows() != targets.len() {
            return Err(MinervaError::shape_mismatch(
                format!("{} samples", inputs.nrows()),
                format!("{} targets", targets.len()),
            ));
        }
        if let Some((val_inputs, val_targets)) = options.validation {
            if val_inputs.nrows() != val_targets.len() {
                return Err(MinervaError::shape_mismatch(
                    format!("{} validation samples", val_inputs.nrows()),
                    format!("{} validation targets", val_targets.len()),
                ));
            }
        }

        let sample_count = inputs.nrows();
        let mut indices: Vec<usize> = (0..sample_count).collect();
        let mut history = TrainingHistory::new();

        for epoch in 1..=options.epochs {
            if options.report {
                println!("Epoch: {}", epoch);
            }

            indices.shuffle(&mut self.rng);
            let shuffled_inputs = inputs.select(Axis(0), &indices);
            let shuffled_targets: Vec<usize> = indices.iter().map(|&i| targets[i]).collect();

            for range in batch_ranges(sample_count, options.batch_size) {
                let batch_inputs = shuffled_inputs.slice(s![range.clone(), ..]);
                self.update_weights(batch_inputs, &shuffled_targets[range])?;
            }

            self.alpha /= self.lr_decay;

            if options.report {
                let (train_accuracy, train_cost) = self.evaluate(inputs, targets)?;
                history.train_accuracy.push(train_accuracy);
                history.train_cost.push(train_cost);

                if let Some((val_inputs, val_targets)) = options.validation {
                    let (val_accuracy, val_cost) = self.evaluate(val_inputs, val_targets)?;
                    history.validation_accuracy.push(val_accuracy);
                    history.validation_cost.push(val_cost);
                    println!(
                        "\tTrain accuracy: {:.6}\n\tValidation accuracy: {:.6}\n\tMean train cost: {:.6}\n\tMean validation cost: {:.6}",
                        train_accuracy,
                        val_accuracy,
                        history.mean_train_cost().unwrap_or(0.0),
                        history.mean_validation_cost().unwrap_or(0.0),
                    );
                } else {
                    println!(
                        "\tTrain accuracy: {:.6}\n\tMean train cost: {:.6}",
                        train_accuracy,
                        history.mean_train_cost().unwrap_or(0.0),
                    );
                }
            }
        }

        Ok(history)
    }
}
