use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::activations::Activation;
use crate::error::{MinervaError, Result};
use crate::network::Net;

/// Builder for constructing a [`Net`] with a fluent API.
///
/// All hyperparameters are validated at [`NetBuilder::build`], before any
/// weights are drawn, so a bad configuration fails before training begins
/// rather than in the middle of an epoch. Defaults match the plain
/// [`Net::new`] constructor: hidden size 20, relu, no regularization,
/// learning rate 0.1, decay 1.1, label smoothing 1.0.
pub struct NetBuilder {
    feature_count: usize,
    output_classes: usize,
    hidden_size: usize,
    activation: Activation,
    regularization_strength: f32,
    learning_rate: f32,
    learning_rate_decay: f32,
    label_smoothing: f32,
    seed: Option<u64>,
    debug: bool,
}

impl NetBuilder {
    pub fn new(feature_count: usize, output_classes: usize) -> Self {
        NetBuilder {
            feature_count,
            output_classes,
            hidden_size: 20,
            activation: Activation::Relu,
            regularization_strength: 0.0,
            learning_rate: 0.1,
            learning_rate_decay: 1.1,
            label_smoothing: 1.0,
            seed: None,
            debug: false,
        }
    }

    pub fn hidden_size(mut self, size: usize) -> Self {
        self.hidden_size = size;
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn regularization_strength(mut self, strength: f32) -> Self {
        self.regularization_strength = strength;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn learning_rate_decay(mut self, decay: f32) -> Self {
        self.learning_rate_decay = decay;
        self
    }

    pub fn label_smoothing(mut self, value: f32) -> Self {
        self.label_smoothing = value;
        self
    }

    /// Seed the network's random generator for reproducible weight
    /// initialization and epoch shuffling. Without a seed the generator is
    /// seeded from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate the configuration and build the network.
    pub fn build(self) -> Result<Net> {
        if self.feature_count == 0 {
            return Err(MinervaError::invalid_parameter(
                "feature_count",
                "must be at least 1",
            ));
        }
        if self.output_classes == 0 {
            return Err(MinervaError::invalid_parameter(
                "output_classes",
                "must be at least 1",
            ));
        }
        if self.hidden_size == 0 {
            return Err(MinervaError::invalid_parameter(
                "hidden_size",
                "must be at least 1",
            ));
        }
        if !(self.learning_rate > 0.0) {
            return Err(MinervaError::invalid_parameter(
                "learning_rate",
                "must be positive",
            ));
        }
        if !(self.learning_rate_decay > 0.0) {
            return Err(MinervaError::invalid_parameter(
                "learning_rate_decay",
                "must be positive",
            ));
        }
        if !(self.regularization_strength >= 0.0) {
            return Err(MinervaError::invalid_parameter(
                "regularization_strength",
                "must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.label_smoothing) {
            return Err(MinervaError::invalid_parameter(
                "label_smoothing",
                "must lie in [0, 1]",
            ));
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Net::with_rng(
            self.feature_count,
            self.output_classes,
            self.hidden_size,
            self.activation,
            rng,
        )
        .with_regularization_strength(self.regularization_strength)
        .with_learning_rate(self.learning_rate)
        .with_learning_rate_decay(self.learning_rate_decay)
        .with_label_smoothing(self.label_smoothing)
        .with_debug(self.debug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let net = NetBuilder::new(900, 3).build().unwrap();

        assert_eq!(net.feature_count(), 900);
        assert_eq!(net.output_size(), 3);
        assert_eq!(net.hidden_size(), 20);
        assert_eq!(net.hidden_activation(), Activation::Relu);
        assert_eq!(net.learning_rate(), 0.1);
        assert_eq!(net.label_smoothing(), 1.0);
    }

    #[test]
    fn test_builder_configuration() {
        let net = NetBuilder::new(4, 2)
            .hidden_size(3)
            .activation(Activation::Tanh)
            .learning_rate(0.02)
            .learning_rate_decay(1.0)
            .regularization_strength(0.01)
            .label_smoothing(0.0)
            .build()
            .unwrap();

        assert_eq!(net.w1.dim(), (4, 3));
        assert_eq!(net.w2.dim(), (3, 2));
        assert_eq!(net.hidden_activation(), Activation::Tanh);
        assert_eq!(net.learning_rate(), 0.02);
        assert_eq!(net.regularization_strength(), 0.01);
    }

    #[test]
    fn test_builder_errors() {
        assert!(NetBuilder::new(0, 2).build().is_err());
        assert!(NetBuilder::new(4, 0).build().is_err());
        assert!(NetBuilder::new(4, 2).hidden_size(0).build().is_err());
        assert!(NetBuilder::new(4, 2).learning_rate(0.0).build().is_err());
        assert!(NetBuilder::new(4, 2).learning_rate(-0.1).build().is_err());
        assert!(NetBuilder::new(4, 2).learning_rate_decay(0.0).build().is_err());
        assert!(NetBuilder::new(4, 2).regularization_strength(-1.0).build().is_err());
        assert!(NetBuilder::new(4, 2).label_smoothing(1.5).build().is_err());
    }

    #[test]
    fn test_seeded_builds_are_identical() {
        let a = NetBuilder::new(5, 3).seed(7).build().unwrap();
        let b = NetBuilder::new(5, 3).seed(7).build().unwrap();

        assert_eq!(a.w1, b.w1);
        assert_eq!(a.w2, b.w2);
        assert_eq!(a.b1, b.b1);
        assert_eq!(a.b2, b.b2);
    }
}
