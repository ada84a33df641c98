//! Training report generation.

use crate::episode::{EpisodeEnd, EpisodeSummary};
use serde::{Deserialize, Serialize};

/// Outcome of one generation's episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub population: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub worst_fitness: f64,
    pub best_score: u32,
    pub frames: u64,
    pub end: EpisodeEnd,
}

impl GenerationStats {
    pub fn from_episode(generation: u32, fitness: &[f64], summary: &EpisodeSummary) -> Self {
        let population = fitness.len();
        let best_fitness = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst_fitness = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_fitness = fitness.iter().sum::<f64>() / population.max(1) as f64;
        Self {
            generation,
            population,
            best_fitness: if population == 0 { 0.0 } else { best_fitness },
            mean_fitness,
            worst_fitness: if population == 0 { 0.0 } else { worst_fitness },
            best_score: summary.best_score,
            frames: summary.frames,
            end: summary.end,
        }
    }
}

/// Aggregated results from a training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub seed: Option<u64>,
    pub generations: Vec<GenerationStats>,
    /// Training was stopped from outside before all generations ran.
    pub interrupted: bool,
    /// A bird reached the configured target score.
    pub reached_target: bool,
}

impl TrainingReport {
    pub fn best_fitness(&self) -> f64 {
        self.generations
            .iter()
            .map(|g| g.best_fitness)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn best_score(&self) -> u32 {
        self.generations
            .iter()
            .map(|g| g.best_score)
            .max()
            .unwrap_or(0)
    }

    pub fn total_frames(&self) -> u64 {
        self.generations.iter().map(|g| g.frames).sum()
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str("                      TRAINING REPORT                          \n");
        out.push_str("═══════════════════════════════════════════════════════════════\n\n");

        if let Some(seed) = self.seed {
            out.push_str(&format!("Seed:              {}\n", seed));
        }
        out.push_str(&format!("Generations run:   {}\n", self.generations.len()));
        out.push_str(&format!("Total frames:      {}\n", self.total_frames()));
        if self.generations.is_empty() {
            out.push_str("\nNo generations completed.\n");
            return out;
        }
        out.push_str(&format!("Best fitness:      {:.2}\n", self.best_fitness()));
        out.push_str(&format!("Best score:        {}\n", self.best_score()));
        if self.reached_target {
            out.push_str("Target score reached.\n");
        }
        if self.interrupted {
            out.push_str("Training interrupted.\n");
        }

        out.push_str("\n───────────────────────────────────────────────────────────────\n");
        out.push_str(" Gen   Birds    Best      Mean     Worst   Score   Frames  End\n");
        out.push_str("───────────────────────────────────────────────────────────────\n");
        for g in &self.generations {
            out.push_str(&format!(
                "{:>4}  {:>6}  {:>7.2}  {:>8.2}  {:>8.2}  {:>6}  {:>7}  {:?}\n",
                g.generation, g.population, g.best_fitness, g.mean_fitness, g.worst_fitness,
                g.best_score, g.frames, g.end
            ));
        }

        out
    }

    /// Export as JSON for external analysis.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
