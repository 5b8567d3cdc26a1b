//! # Minerva - Two-Layer Feed-Forward Classifier
//!
//! Minerva implements a two-layer feed-forward classifier from first
//! principles: parameter storage, forward inference with a configurable
//! hidden activation and a softmax (or identity) output, closed-form
//! gradient computation for the cross-entropy loss, parameter updates with
//! L2 regularization and learning-rate decay, and the epoch/batch training
//! loop that drives convergence and reports accuracy. There is no autodiff
//! framework underneath; the backward pass is derived by hand.
//!
//! The crate is pure compute: data arrives as in-memory `ndarray` matrices
//! with integer class labels, and training exposes per-epoch accuracy and
//! cost curves for an external collaborator to plot. File, image, and
//! rendering concerns live outside.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minerva::activations::Activation;
//! use minerva::builders::NetBuilder;
//! use minerva::network::TrainOptions;
//! use ndarray::array;
//!
//! let mut net = NetBuilder::new(2, 2)
//!     .hidden_size(8)
//!     .activation(Activation::Tanh)
//!     .learning_rate(0.05)
//!     .learning_rate_decay(1.0)
//!     .build()
//!     .unwrap();
//!
//! let inputs = array![[0.0, 1.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
//! let targets = [1, 1, 0, 0];
//!
//! let history = net
//!     .train(inputs.view(), &targets, &TrainOptions::new(100, 2))
//!     .unwrap();
//! let classes = net.predict(inputs.view()).unwrap();
//! # let _ = (history, classes);
//! ```
//!
//! ## Module Organization
//!
//! - [`activations`] - Hidden-layer activation functions and softmax
//! - [`builders`] - Builder for validated network construction
//! - [`error`] - Error types and result handling
//! - [`metrics`] - Accuracy helpers and per-epoch training curves
//! - [`network`] - The core network and training driver

pub mod activations;
pub mod builders;
pub mod error;
pub mod metrics;
pub mod network;

#[cfg(test)]
mod tests;
