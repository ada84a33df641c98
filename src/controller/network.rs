//! Dense feed-forward network controller.

use super::{Controller, Inputs, INPUT_SIZE};
use crate::error::ControllerFault;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Node activation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Tanh,
    Sigmoid,
    Relu,
    Identity,
}

impl Activation {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Tanh => value.tanh(),
            Self::Sigmoid => 1.0 / (1.0 + (-value).exp()),
            Self::Relu => value.max(0.0),
            Self::Identity => value,
        }
    }
}

/// One fully connected layer. `weights[o][i]` connects input `i` to output `o`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    pub activation: Activation,
}

impl Layer {
    pub fn random<R: Rng>(
        inputs: usize,
        outputs: usize,
        activation: Activation,
        weight_range: f64,
        rng: &mut R,
    ) -> Self {
        let mut sample = || {
            if weight_range > 0.0 {
                rng.gen_range(-weight_range..weight_range)
            } else {
                0.0
            }
        };
        let weights: Vec<Vec<f64>> = (0..outputs)
            .map(|_| (0..inputs).map(|_| sample()).collect::<Vec<f64>>())
            .collect();
        let biases: Vec<f64> = (0..outputs).map(|_| sample()).collect();
        Self {
            weights,
            biases,
            activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    pub fn output_size(&self) -> usize {
        self.weights.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + bias)
            })
            .collect()
    }
}

/// A stack of dense layers evaluated front to back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNetwork {
    pub layers: Vec<Layer>,
}

impl FeedForwardNetwork {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Random network taking the four sensor inputs, with the given hidden
    /// layer widths and a single output.
    pub fn random<R: Rng>(
        hidden: &[usize],
        hidden_activation: Activation,
        output_activation: Activation,
        weight_range: f64,
        rng: &mut R,
    ) -> Self {
        let mut layers = Vec::with_capacity(hidden.len() + 1);
        let mut width = INPUT_SIZE;
        for &size in hidden {
            layers.push(Layer::random(width, size, hidden_activation, weight_range, rng));
            width = size;
        }
        layers.push(Layer::random(width, 1, output_activation, weight_range, rng));
        Self { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn activate(&self, inputs: &[f64]) -> Result<Vec<f64>, ControllerFault> {
        if self.input_size() != inputs.len() {
            return Err(ControllerFault::InputMismatch {
                expected: self.input_size(),
                actual: inputs.len(),
            });
        }
        let mut values = inputs.to_vec();
        for layer in &self.layers {
            values = layer.forward(&values);
        }
        Ok(values)
    }
}

impl Controller for FeedForwardNetwork {
    fn evaluate(&mut self, inputs: &Inputs) -> Result<Vec<f64>, ControllerFault> {
        self.activate(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_single_layer_math() {
        let network = FeedForwardNetwork::new(vec![Layer {
            weights: vec![vec![1.0, 0.5, 0.0, -1.0]],
            biases: vec![0.25],
            activation: Activation::Identity,
        }]);
        let out = network.activate(&[2.0, 2.0, 9.0, 1.0]).unwrap();
        assert_eq!(out, vec![2.0 + 1.0 - 1.0 + 0.25]);
    }

    #[test]
    fn test_random_network_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let network =
            FeedForwardNetwork::random(&[6, 3], Activation::Tanh, Activation::Sigmoid, 2.0, &mut rng);
        assert_eq!(network.layers.len(), 3);
        assert_eq!(network.input_size(), INPUT_SIZE);
        let out = network.activate(&[350.0, 20.0, 180.0, 0.0]).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0] > 0.0 && out[0] < 1.0);
    }

    #[test]
    fn test_input_mismatch_faults() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let network =
            FeedForwardNetwork::random(&[], Activation::Tanh, Activation::Tanh, 1.0, &mut rng);
        assert_eq!(
            network.activate(&[1.0, 2.0]),
            Err(ControllerFault::InputMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_serde_keeps_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let network =
            FeedForwardNetwork::random(&[4], Activation::Relu, Activation::Tanh, 1.5, &mut rng);
        let json = serde_json::to_string(&network).unwrap();
        let restored: FeedForwardNetwork = serde_json::from_str(&json).unwrap();
        let before = network.activate(&[1.0, 2.0, 3.0, 0.0]).unwrap();
        let after = restored.activate(&[1.0, 2.0, 3.0, 0.0]).unwrap();
        assert!((before[0] - after[0]).abs() < 1e-9);
    }

    #[test]
    fn test_activations() {
        assert!((Activation::Sigmoid.apply(0.0) - 0.5).abs() < f64::EPSILON);
        assert_eq!(Activation::Relu.apply(-3.0), 0.0);
        assert_eq!(Activation::Identity.apply(-3.0), -3.0);
        assert!(Activation::Tanh.apply(100.0) <= 1.0);
    }
}
