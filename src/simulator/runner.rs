//! Generation loop: one episode per generation.

use super::config::SimConfig;
use super::report::{GenerationStats, TrainingReport};
use super::source::ControllerSource;
use crate::episode::{run_episode, EpisodeEnd, FrameReport, FrameSnapshot};
use crate::error::SimError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::ControlFlow;
use tracing::{debug, info};

/// Receives frames while training runs, e.g. to draw them.
pub trait FrameObserver {
    /// Whether snapshots should be built at all. Headless runs skip them.
    fn wants_frames(&self) -> bool {
        true
    }

    fn on_frame(
        &mut self,
        generation: u32,
        snapshot: &FrameSnapshot,
        report: &FrameReport,
    ) -> ControlFlow<()>;

    fn on_generation(&mut self, _stats: &GenerationStats) {}
}

/// Observer that ignores every frame.
pub struct Headless;

impl FrameObserver for Headless {
    fn wants_frames(&self) -> bool {
        false
    }

    fn on_frame(&mut self, _: u32, _: &FrameSnapshot, _: &FrameReport) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Seeded RNG for a run, or one from entropy when no seed is set.
pub fn training_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Run training without observing frames.
pub fn run_training<S: ControllerSource>(
    config: &SimConfig,
    source: &mut S,
) -> Result<TrainingReport, SimError> {
    run_training_with(config, source, &mut Headless)
}

/// Run up to `config.generations` episodes, handing each one a fresh set of
/// controllers from `source`. Fails before the first generation if `config`
/// is invalid.
pub fn run_training_with<S, O>(
    config: &SimConfig,
    source: &mut S,
    observer: &mut O,
) -> Result<TrainingReport, SimError>
where
    S: ControllerSource,
    O: FrameObserver,
{
    config.validate()?;
    let mut rng = training_rng(config.seed);
    let mut report = TrainingReport {
        seed: config.seed,
        ..Default::default()
    };

    for generation in 0..config.generations {
        let mut controllers = source.next_generation(generation, &mut rng);
        let mut fitness = vec![0.0; controllers.len()];

        let population = controllers.iter_mut().zip(fitness.iter_mut()).collect();
        let summary = run_episode(
            population,
            &config.world,
            config.max_frames_per_episode,
            &mut rng,
            |episode, frame| {
                if frame.scored || !frame.removals.is_empty() {
                    debug!(
                        generation,
                        frame = frame.frame,
                        alive = frame.alive,
                        removed = frame.removals.len(),
                        "frame events"
                    );
                }
                if observer.wants_frames() {
                    observer.on_frame(generation, &episode.snapshot(), frame)
                } else {
                    ControlFlow::Continue(())
                }
            },
        )?;

        let stats = GenerationStats::from_episode(generation, &fitness, &summary);
        info!(
            generation,
            population = stats.population,
            best_fitness = stats.best_fitness,
            mean_fitness = stats.mean_fitness,
            best_score = stats.best_score,
            frames = stats.frames,
            "generation complete"
        );
        source.record(generation, &controllers, &fitness);
        observer.on_generation(&stats);
        report.generations.push(stats);

        if summary.end == EpisodeEnd::Quit {
            report.interrupted = true;
            break;
        }
        if config
            .target_score
            .is_some_and(|target| summary.best_score >= target)
        {
            info!(generation, score = summary.best_score, "target score reached");
            report.reached_target = true;
            break;
        }
    }

    Ok(report)
}
