use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::MinervaError;

/// An enumeration of the activation functions supported by the hidden layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Activation {
    #[default]
    Relu,
    Tanh,
}

impl Activation {
    /// Apply the activation function to an input array in-place.
    pub fn apply(&self, input: &mut Array1<f32>) {
        match self {
            Activation::Relu => {
                input.mapv_inplace(|v| v.max(0.0));
            }
            Activation::Tanh => {
                input.mapv_inplace(|v| v.tanh());
            }
        }
    }

    /// Apply the activation function to a batch of input arrays in-place.
    pub fn apply_batch(&self, inputs: &mut Array2<f32>) {
        match self {
            Activation::Relu => {
                inputs.mapv_inplace(|v| v.max(0.0));
            }
            Activation::Tanh => {
                inputs.mapv_inplace(|v| v.tanh());
            }
        }
    }

    /// Compute the derivative of the activation function, evaluated from its
    /// *output* values. Both supported kinds admit this form: relu is 1 where
    /// the output is positive (equivalently, where the pre-activation was
    /// positive) and 0 elsewhere; tanh' is `1 - tanh^2`.
    pub fn derivative_from_output(&self, outputs: ArrayView1<f32>) -> Array1<f32> {
        match self {
            Activation::Relu => outputs.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Tanh => outputs.mapv(|v| 1.0 - v * v),
        }
    }

    /// Batch form of [`Activation::derivative_from_output`].
    pub fn derivative_from_output_batch(&self, outputs: ArrayView2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => outputs.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Tanh => outputs.mapv(|v| 1.0 - v * v),
        }
    }
}

impl FromStr for Activation {
    type Err = MinervaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relu" => Ok(Activation::Relu),
            "tanh" => Ok(Activation::Tanh),
            other => Err(MinervaError::UnsupportedActivation(other.to_string())),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Relu => write!(f, "relu"),
            Activation::Tanh => write!(f, "tanh"),
        }
    }
}

/// Row-wise softmax over a batch of logits, in-place.
///
/// Uses the standard max-subtraction stabilization: `softmax(z)` equals
/// `softmax(z - max(z))`, and the shifted form cannot overflow in `exp`.
/// Each row is normalized independently, so every row of the result is a
/// probability distribution.
pub fn softmax_batch(logits: &mut Array2<f32>) {
    for mut row in logits.rows_mut() {
        let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
}

/// Softmax over a single logit vector, in-place. See [`softmax_batch`].
pub fn softmax(logits: &mut Array1<f32>) {
    let max = logits.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    logits.mapv_inplace(|v| (v - max).exp());
    let sum = logits.sum();
    logits.mapv_inplace(|v| v / sum);
}
