//! Spawning, retiring and scoring the stream of pipes.

use super::bird::Bird;
use super::config::WorldConfig;
use super::pipe::Pipe;
use rand::Rng;

/// Drop pipes that have scrolled fully past the left edge. Order is preserved.
pub fn delete_pipe(pipes: &mut Vec<Pipe>) {
    pipes.retain(|pipe| pipe.right_edge() >= 0.0);
}

/// New pipe at the spawn column just past the right edge.
pub fn add_pipe<R: Rng>(config: &WorldConfig, rng: &mut R) -> Pipe {
    Pipe::new(config.pipe_spawn_x, config, rng)
}

/// Mark every pipe the bird has cleared, crediting the bird once per pipe.
///
/// If any pipe was newly passed, exactly one new pipe is appended. Returns
/// whether a pass happened during this call.
pub fn pass_check<R: Rng>(
    pipes: &mut Vec<Pipe>,
    bird: &mut Bird,
    config: &WorldConfig,
    rng: &mut R,
) -> bool {
    let mut passed_any = false;
    for pipe in pipes.iter_mut() {
        if !pipe.passed && pipe.right_edge() < bird.x {
            pipe.passed = true;
            bird.score += 1;
            passed_any = true;
        }
    }
    if passed_any {
        pipes.push(add_pipe(config, rng));
    }
    passed_any
}
