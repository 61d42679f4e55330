//! Decision policies, which turn sensor inputs into driving commands.

use rand::Rng;

/// The number of outputs of every decision policy:
/// forward, left, right and reverse, in that order.
pub const OUTPUT_COUNT: usize = 4;

/// The outputs of a decision policy.
pub type Decision = [f64; OUTPUT_COUNT];

/// Maps a vector of sensor inputs to a [Decision].
///
/// Implementations must be deterministic; the simulation never changes a policy's parameters.
pub trait DecisionPolicy {
    fn infer(&self, inputs: &[f64]) -> Decision;
}

impl<F: Fn(&[f64]) -> Decision> DecisionPolicy for F {
    fn infer(&self, inputs: &[f64]) -> Decision {
        self(inputs)
    }
}

/// A fully connected feed-forward network with binary step activations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedForwardNetwork {
    levels: Vec<Level>,
}

/// One layer of connections in a [FeedForwardNetwork].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    /// `weights[i][j]` connects input `i` to output `j`.
    weights: Vec<Vec<f64>>,
    /// The activation threshold of each output.
    biases: Vec<f64>,
}

impl Level {
    /// Creates a level with every weight and bias set to zero.
    pub fn zeroed(inputs: usize, outputs: usize) -> Self {
        Self {
            weights: vec![vec![0.0; outputs]; inputs],
            biases: vec![0.0; outputs],
        }
    }

    /// Creates a level with weights and biases drawn uniformly from [-1, 1].
    pub fn random(inputs: usize, outputs: usize, rng: &mut impl Rng) -> Self {
        let mut sample = || rng.gen_range(-1.0..=1.0_f64);
        let weights = (0..inputs)
            .map(|_| (0..outputs).map(|_| sample()).collect::<Vec<_>>())
            .collect();
        let biases = (0..outputs).map(|_| sample()).collect();
        Self { weights, biases }
    }

    /// Creates a level from explicit parameters.
    ///
    /// # Panics
    /// Panics if any row of `weights` has a different length to `biases`.
    pub fn from_parameters(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Self {
        assert!(
            weights.iter().all(|row| row.len() == biases.len()),
            "Each weight row must have one entry per output"
        );
        Self { weights, biases }
    }

    /// The number of inputs.
    pub fn inputs(&self) -> usize {
        self.weights.len()
    }

    /// The number of outputs.
    pub fn outputs(&self) -> usize {
        self.biases.len()
    }

    /// Computes the outputs of the level. An output fires (is 1) when
    /// the weighted sum of its inputs exceeds its bias, otherwise it is 0.
    /// Missing inputs are treated as zero and extra inputs are ignored.
    pub fn feed_forward(&self, inputs: &[f64]) -> Vec<f64> {
        self.biases
            .iter()
            .enumerate()
            .map(|(j, bias)| {
                let sum: f64 = self
                    .weights
                    .iter()
                    .zip(inputs)
                    .map(|(row, input)| input * row[j])
                    .sum();
                if sum > *bias {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

impl FeedForwardNetwork {
    /// Creates a network with random parameters.
    /// `layers` gives the number of neurons in each layer, starting with the inputs.
    ///
    /// # Panics
    /// Panics unless there are at least two layers and the last has [OUTPUT_COUNT] neurons.
    pub fn random(layers: &[usize], rng: &mut impl Rng) -> Self {
        Self::check_layers(layers);
        let levels = layers
            .windows(2)
            .map(|pair| Level::random(pair[0], pair[1], &mut *rng))
            .collect();
        Self { levels }
    }

    /// Creates a network with all weights and biases set to zero.
    ///
    /// # Panics
    /// Panics under the same conditions as [FeedForwardNetwork::random].
    pub fn zeroed(layers: &[usize]) -> Self {
        Self::check_layers(layers);
        let levels = layers
            .windows(2)
            .map(|pair| Level::zeroed(pair[0], pair[1]))
            .collect();
        Self { levels }
    }

    /// Creates a network from existing levels.
    ///
    /// # Panics
    /// Panics if there are no levels, or the last level does not have [OUTPUT_COUNT] outputs.
    pub fn from_levels(levels: Vec<Level>) -> Self {
        assert!(
            levels.last().map(Level::outputs) == Some(OUTPUT_COUNT),
            "Network must end with {} outputs",
            OUTPUT_COUNT
        );
        Self { levels }
    }

    /// The levels of the network, from inputs to outputs.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn check_layers(layers: &[usize]) {
        if layers.len() < 2 {
            panic!("Network must contain at least two layers");
        }
        if layers.last() != Some(&OUTPUT_COUNT) {
            panic!("Network must end with {} outputs", OUTPUT_COUNT);
        }
    }
}

impl DecisionPolicy for FeedForwardNetwork {
    fn infer(&self, inputs: &[f64]) -> Decision {
        let values = self
            .levels
            .iter()
            .fold(inputs.to_vec(), |values, level| level.feed_forward(&values));
        let mut decision = [0.0; OUTPUT_COUNT];
        for (out, value) in decision.iter_mut().zip(values) {
            *out = value;
        }
        decision
    }
}
