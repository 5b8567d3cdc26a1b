//! # Activation Functions Module
//!
//! Elementwise nonlinearities for the hidden layer, plus the row-wise softmax
//! used by the output layer.
//!
//! ## Available Activations
//!
//! - **ReLU** (Rectified Linear Unit): `max(0, x)`
//! - **Tanh**: Hyperbolic tangent - Outputs between -1 and 1
//!
//! The activation is selected once at network construction as an [`Activation`]
//! variant; each variant carries both its forward transform and its derivative,
//! so no string comparison happens on the hot path. Parsing an unknown kind
//! from text fails with `UnsupportedActivation` before any training begins.
//!
//! Softmax is not a hidden-layer activation here: it normalizes the output
//! logits into a probability distribution and lives in this module as the
//! free functions [`softmax`] and [`softmax_batch`].

pub mod functions;

pub use functions::{softmax, softmax_batch, Activation};
