//! Where each generation's controllers come from.

use super::config::SimConfig;
use crate::controller::{Activation, Controller, FeedForwardNetwork};
use rand::Rng;

/// Supplies a fresh set of controllers for every generation and hears back
/// how they did. Evolutionary algorithms plug in here.
pub trait ControllerSource {
    type Controller: Controller;

    fn next_generation<R: Rng>(&mut self, generation: u32, rng: &mut R) -> Vec<Self::Controller>;

    /// Fitness of each controller from the last episode, index-aligned with
    /// `controllers`.
    fn record(&mut self, generation: u32, controllers: &[Self::Controller], fitness: &[f64]);
}

/// Random-search baseline: every generation is freshly sampled networks,
/// plus the best network seen so far.
#[derive(Debug, Clone)]
pub struct RandomNetworks {
    population_size: usize,
    hidden_layers: Vec<usize>,
    hidden_activation: Activation,
    output_activation: Activation,
    weight_range: f64,
    champion: Option<(FeedForwardNetwork, f64)>,
}

impl RandomNetworks {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            population_size: config.population_size,
            hidden_layers: config.hidden_layers.clone(),
            hidden_activation: config.hidden_activation,
            output_activation: config.output_activation,
            weight_range: config.weight_range,
            champion: None,
        }
    }

    /// Best network recorded so far with its fitness.
    pub fn champion(&self) -> Option<(&FeedForwardNetwork, f64)> {
        self.champion.as_ref().map(|(network, fitness)| (network, *fitness))
    }
}

impl ControllerSource for RandomNetworks {
    type Controller = FeedForwardNetwork;

    fn next_generation<R: Rng>(&mut self, _generation: u32, rng: &mut R) -> Vec<FeedForwardNetwork> {
        let mut networks = Vec::with_capacity(self.population_size);
        if let Some((champion, _)) = &self.champion {
            networks.push(champion.clone());
        }
        while networks.len() < self.population_size {
            networks.push(FeedForwardNetwork::random(
                &self.hidden_layers,
                self.hidden_activation,
                self.output_activation,
                self.weight_range,
                rng,
            ));
        }
        networks
    }

    fn record(&mut self, _generation: u32, controllers: &[FeedForwardNetwork], fitness: &[f64]) {
        let best = controllers
            .iter()
            .zip(fitness)
            .max_by(|a, b| a.1.total_cmp(b.1));
        if let Some((network, &score)) = best {
            let improved = self
                .champion
                .as_ref()
                .map_or(true, |(_, current)| score > *current);
            if improved {
                self.champion = Some((network.clone(), score));
            }
        }
    }
}
