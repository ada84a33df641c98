//! Episode scenario tests
//!
//! Drives whole episodes through the public API with scripted controllers and
//! checks deaths, fitness bookkeeping and sensor selection frame by frame.

use flappy_neat::controller::{from_fn, FixedPolicy, Inputs};
use flappy_neat::episode::{run_episode, DeathCause, Episode, EpisodeEnd, Removal};
use flappy_neat::world::{Pipe, PipeLookahead, WorldConfig};
use flappy_neat::ControllerFault;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::ControlFlow;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// Deaths
// ============================================================================

#[test]
fn test_falling_bird_hits_ground_on_frame_23() {
    // 1.5 + 6 + 13.5 over the first three frames, then clamped to 16:
    // y = 691 after frame 23, the first frame with y + 48 >= 730.
    let config = WorldConfig::default();
    let mut rng = rng(1);
    let mut fitness = 0.0;
    let mut episode = Episode::new(vec![(FixedPolicy::Never, &mut fitness)], config, &mut rng);

    for frame in 1..23 {
        let report = episode.step(&mut rng);
        assert!(report.removals.is_empty(), "died early on frame {}", frame);
    }
    let report = episode.step(&mut rng);
    assert_eq!(report.frame, 23);
    assert_eq!(
        report.removals,
        vec![Removal {
            agent: 0,
            cause: DeathCause::Ground
        }]
    );
    assert!(!episode.is_running());
    assert_eq!(episode.summary().end, EpisodeEnd::Extinct);
    drop(episode);

    // 23 frames of survival reward, one death penalty.
    assert!(close(fitness, 2.3 - 1.0));
}

#[test]
fn test_flapping_bird_hits_ceiling_on_frame_32() {
    // Every flap restarts the arc: -10.5 + 1.5 - 2 = -11 per frame.
    let config = WorldConfig::default();
    let mut fitness = 0.0;
    let summary = run_episode(
        vec![(FixedPolicy::Always, &mut fitness)],
        &config,
        None,
        &mut rng(2),
        |_, report| {
            for removal in &report.removals {
                assert_eq!(removal.cause, DeathCause::Ceiling);
            }
            ControlFlow::Continue(())
        },
    )
    .unwrap();
    assert_eq!(summary.frames, 32);
    assert_eq!(summary.end, EpisodeEnd::Extinct);
    assert!(close(fitness, 3.2 - 1.0));
}

#[test]
fn test_bird_inside_pipe_body_collides() {
    // Gap spans 100..300; the bird starts at 350, inside the bottom pipe.
    let config = WorldConfig::default();
    let mut rng = rng(3);
    let mut fitness = 0.0;
    let mut episode = Episode::new(
        vec![(FixedPolicy::Never, &mut fitness)],
        config.clone(),
        &mut rng,
    )
    .with_pipes(vec![Pipe::with_height(150.0, 100.0, &config)]);

    let report = episode.step(&mut rng);
    assert_eq!(report.removals[0].cause, DeathCause::PipeCollision);
    assert_eq!(report.alive, 0);
    drop(episode);
    assert!(close(fitness, 0.1 - 1.0));
}

#[test]
fn test_fault_sets_fitness_without_penalty() {
    let config = WorldConfig::default();
    let mut fitness = 0.0;
    let faulty = from_fn(|_: &Inputs| Ok(vec![f64::NAN]));
    let summary = run_episode(
        vec![(faulty, &mut fitness)],
        &config,
        None,
        &mut rng(4),
        |_, report| {
            assert_eq!(report.removals[0].cause, DeathCause::ControllerFault);
            ControlFlow::Continue(())
        },
    )
    .unwrap();
    assert_eq!(summary.frames, 1);
    assert!(close(fitness, config.fault_fitness));
}

#[test]
fn test_empty_output_is_a_fault() {
    let config = WorldConfig::default();
    let mut rng = rng(5);
    let mut fitness = 0.0;
    let silent = from_fn(|_: &Inputs| Ok(Vec::new()));
    let mut episode = Episode::new(vec![(silent, &mut fitness)], config.clone(), &mut rng);

    let report = episode.step(&mut rng);
    assert_eq!(report.removals[0].cause, DeathCause::ControllerFault);
    assert_eq!(episode.alive(), 0);
    drop(episode);
    assert!(close(fitness, config.fault_fitness));
}

// ============================================================================
// Shared pass bonus
// ============================================================================

#[test]
fn test_pass_bonus_goes_to_every_living_bird() {
    let config = WorldConfig::default();
    let mut rng = rng(6);
    let mut first = 0.0;
    let mut second = 0.0;
    let mut episode = Episode::new(
        vec![(FixedPolicy::Never, &mut first), (FixedPolicy::Never, &mut second)],
        config.clone(),
        &mut rng,
    )
    .with_pipes(vec![
        // Right edge at 99, just behind the birds at x = 100.
        Pipe::with_height(-5.0, 300.0, &config),
        Pipe::with_height(300.0, 300.0, &config),
    ]);

    let report = episode.step(&mut rng);
    assert!(report.scored);
    assert!(report.removals.is_empty());
    assert!(episode.pipes()[0].passed);
    // Exactly one replacement pipe appended.
    assert_eq!(episode.pipes().len(), 3);

    // Only the first bird to reach the pipe is credited with the score.
    assert_eq!(episode.agents()[0].bird.score, 1);
    assert_eq!(episode.agents()[1].bird.score, 0);
    assert_eq!(episode.best_score(), 1);
    drop(episode);

    assert!(close(first, 1.1));
    assert!(close(second, 1.1));
}

#[test]
fn test_removed_bird_gets_no_bonus() {
    let config = WorldConfig::default();
    let mut rng = rng(7);
    let mut faulty_fitness = 0.0;
    let mut steady_fitness = 0.0;
    let faulty: Box<dyn flappy_neat::Controller> =
        Box::new(from_fn(|_: &Inputs| Err(ControllerFault::Other("dead".to_string()))));
    let steady: Box<dyn flappy_neat::Controller> = Box::new(FixedPolicy::Never);
    let mut episode = Episode::new(
        vec![(faulty, &mut faulty_fitness), (steady, &mut steady_fitness)],
        config.clone(),
        &mut rng,
    )
    .with_pipes(vec![
        Pipe::with_height(-5.0, 300.0, &config),
        Pipe::with_height(300.0, 300.0, &config),
    ]);

    let report = episode.step(&mut rng);
    assert!(report.scored);
    assert_eq!(report.alive, 1);
    drop(episode);

    assert!(close(faulty_fitness, config.fault_fitness));
    assert!(close(steady_fitness, 1.1));
}

// ============================================================================
// Sensor lookahead
// ============================================================================

fn first_inputs(lookahead: PipeLookahead) -> Inputs {
    let config = WorldConfig {
        lookahead,
        ..Default::default()
    };
    let mut rng = rng(8);
    let mut fitness = 0.0;
    let mut seen = Vec::new();
    let recorder = from_fn(|inputs: &Inputs| {
        seen.push(*inputs);
        Ok(vec![0.0])
    });
    let mut episode = Episode::new(vec![(recorder, &mut fitness)], config.clone(), &mut rng)
        .with_pipes(vec![
            // Still overlapping the bird column.
            Pipe::with_height(50.0, 300.0, &config),
            Pipe::with_height(400.0, 200.0, &config),
        ]);
    episode.step(&mut rng);
    drop(episode);
    seen[0]
}

#[test]
fn test_positional_lookahead_senses_pipe_over_bird() {
    assert_eq!(first_inputs(PipeLookahead::Positional), [350.0, 50.0, 150.0, 0.0]);
}

#[test]
fn test_legacy_lookahead_senses_second_pipe() {
    assert_eq!(first_inputs(PipeLookahead::Legacy), [350.0, 150.0, 50.0, 0.0]);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_episode() {
    let config = WorldConfig::default();
    let run = |seed| {
        let mut fitness = [0.0; 3];
        let [a, b, c] = &mut fitness;
        let summary = run_episode(
            vec![
                (FixedPolicy::HoldGap, a),
                (FixedPolicy::HoldGap, b),
                (FixedPolicy::Never, c),
            ],
            &config,
            Some(500),
            &mut rng(seed),
            |_, _| ControlFlow::Continue(()),
        )
        .unwrap();
        (summary, fitness)
    };
    assert_eq!(run(11), run(11));
}
