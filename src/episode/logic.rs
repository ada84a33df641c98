//! Per-frame orchestration of a population of birds.

use super::snapshot::{BirdView, FrameSnapshot, PipeView};
use super::types::{
    Agent, AgentStatus, DeathCause, EpisodeEnd, EpisodeState, EpisodeSummary, FrameReport,
    Removal,
};
use crate::controller::{wants_jump, Controller, Inputs};
use crate::error::SimError;
use crate::world::{
    add_pipe, delete_pipe, pass_check, Bird, Ground, Pipe, PipeLookahead, Silhouettes,
    WorldConfig,
};
use rand::Rng;
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// A running episode: every agent shares one pipe stream and one ground strip.
pub struct Episode<'a, C> {
    agents: Vec<Agent<'a, C>>,
    pipes: Vec<Pipe>,
    ground: Ground,
    config: WorldConfig,
    silhouettes: Silhouettes,
    frame: u64,
    frame_limit: Option<u64>,
    state: EpisodeState,
    best_score: u32,
}

impl<'a, C: Controller> Episode<'a, C> {
    /// Spawn one bird per controller and a single pipe. Each fitness
    /// accumulator is reset to zero.
    ///
    /// `config` is assumed valid; [`run_episode`] checks it first.
    pub fn new<R: Rng>(
        population: Vec<(C, &'a mut f64)>,
        config: WorldConfig,
        rng: &mut R,
    ) -> Self {
        let agents = population
            .into_iter()
            .enumerate()
            .map(|(id, (controller, fitness))| {
                *fitness = 0.0;
                Agent {
                    id,
                    controller,
                    fitness,
                    bird: Bird::spawn(&config),
                    status: AgentStatus::Alive,
                }
            })
            .collect();

        Self {
            agents,
            pipes: vec![add_pipe(&config, rng)],
            ground: Ground::new(&config),
            silhouettes: Silhouettes::from_config(&config),
            config,
            frame: 0,
            frame_limit: None,
            state: EpisodeState::Running,
            best_score: 0,
        }
    }

    /// Stop after `limit` frames even if birds are still alive.
    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Replace the initial pipe stream.
    pub fn with_pipes(mut self, pipes: Vec<Pipe>) -> Self {
        self.pipes = pipes;
        self
    }

    pub fn agents(&self) -> &[Agent<'a, C>] {
        &self.agents
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EpisodeState::Running
    }

    pub fn alive(&self) -> usize {
        self.agents.len()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Terminate from outside. No further frames are simulated.
    pub fn quit(&mut self) {
        if self.is_running() {
            self.state = EpisodeState::Terminated(EpisodeEnd::Quit);
        }
    }

    /// Simulate one frame for every living agent, then scroll the pipes.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> FrameReport {
        let mut report = FrameReport {
            frame: self.frame,
            alive: self.agents.len(),
            ..Default::default()
        };
        if !self.is_running() {
            return report;
        }

        delete_pipe(&mut self.pipes);
        if self.agents.is_empty() {
            self.state = EpisodeState::Terminated(EpisodeEnd::Extinct);
            return report;
        }
        if self.pipes.is_empty() {
            self.pipes.push(add_pipe(&self.config, rng));
        }

        self.frame += 1;
        report.frame = self.frame;

        for index in 0..self.agents.len() {
            if !self.agents[index].is_alive() {
                continue;
            }

            let pipe_index =
                lookahead_index(&self.pipes, &self.agents[index].bird, self.config.lookahead);
            let inputs = sensor_inputs(&self.agents[index].bird, &self.pipes[pipe_index]);

            let agent = &mut self.agents[index];
            let decision = agent
                .controller
                .evaluate(&inputs)
                .and_then(|outputs| wants_jump(&outputs, self.config.jump_threshold));
            match decision {
                Ok(true) => agent.bird.jump(&self.config),
                Ok(false) => {}
                Err(fault) => {
                    warn!(agent = agent.id, frame = self.frame, %fault, "controller fault");
                    *agent.fitness = self.config.fault_fitness;
                    agent.status = AgentStatus::Removed(DeathCause::ControllerFault);
                    report.removals.push(Removal {
                        agent: agent.id,
                        cause: DeathCause::ControllerFault,
                    });
                    continue;
                }
            }

            *agent.fitness += self.config.survival_reward;
            agent.bird.advance(&self.config);
            agent.bird.animate();
            self.ground.advance(&self.config);

            if pass_check(&mut self.pipes, &mut agent.bird, &self.config, rng) {
                report.scored = true;
                self.best_score = self.best_score.max(agent.bird.score);
                debug!(agent = agent.id, score = agent.bird.score, "pipe passed");
                // Every living bird shares the reward, not just the scorer.
                for other in self.agents.iter_mut().filter(|a| a.is_alive()) {
                    *other.fitness += self.config.pass_bonus;
                }
            }

            let agent = &mut self.agents[index];
            let cause = if self
                .pipes
                .iter()
                .any(|pipe| pipe.collide(&agent.bird, &self.silhouettes))
            {
                Some(DeathCause::PipeCollision)
            } else if agent.bird.hit_ground(&self.config) {
                Some(DeathCause::Ground)
            } else if agent.bird.hit_ceiling() {
                Some(DeathCause::Ceiling)
            } else {
                None
            };

            if let Some(cause) = cause {
                *agent.fitness -= self.config.death_penalty;
                agent.status = AgentStatus::Removed(cause);
                report.removals.push(Removal {
                    agent: agent.id,
                    cause,
                });
                debug!(agent = agent.id, frame = self.frame, ?cause, "agent removed");
            }
        }

        self.agents.retain(|agent| agent.is_alive());
        for pipe in &mut self.pipes {
            pipe.advance(&self.config);
        }

        report.alive = self.agents.len();
        if self.agents.is_empty() {
            self.state = EpisodeState::Terminated(EpisodeEnd::Extinct);
        } else if self.frame_limit.is_some_and(|limit| self.frame >= limit) {
            self.state = EpisodeState::Terminated(EpisodeEnd::FrameLimit);
        }
        report
    }

    /// Owned copy of everything a renderer draws.
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut snapshot = FrameSnapshot::empty(&self.config, self.ground.clone());
        snapshot.frame = self.frame;
        snapshot.alive = self.agents.len();
        snapshot.pipes = self.pipes.iter().map(PipeView::from).collect();
        snapshot.birds = self
            .agents
            .iter()
            .map(|agent| BirdView {
                agent: agent.id,
                x: agent.bird.x,
                y: agent.bird.y,
                tilt: agent.bird.tilt,
                wing_frame: agent.bird.wing_frame(&self.config),
                score: agent.bird.score,
                fitness: *agent.fitness,
            })
            .collect();
        snapshot.score = self
            .agents
            .iter()
            .map(|agent| agent.bird.score)
            .max()
            .unwrap_or(0);
        snapshot
    }

    pub fn summary(&self) -> EpisodeSummary {
        let end = match self.state {
            EpisodeState::Terminated(end) => end,
            EpisodeState::Running => EpisodeEnd::Quit,
        };
        EpisodeSummary {
            frames: self.frame,
            end,
            best_score: self.best_score,
        }
    }
}

/// Index of the pipe whose gap the controller should steer for.
pub fn lookahead_index(pipes: &[Pipe], bird: &Bird, mode: PipeLookahead) -> usize {
    if pipes.len() < 2 {
        return 0;
    }
    match mode {
        PipeLookahead::Legacy => 1,
        PipeLookahead::Positional => {
            if pipes[0].right_edge() < bird.x {
                1
            } else {
                0
            }
        }
    }
}

/// Sensor vector for one bird against one pipe.
pub fn sensor_inputs(bird: &Bird, pipe: &Pipe) -> Inputs {
    [
        bird.y,
        (bird.y - pipe.height).abs(),
        (bird.y - pipe.bottom).abs(),
        if pipe.passed { 1.0 } else { 0.0 },
    ]
}

/// Run one episode to completion.
///
/// The config is validated before any bird spawns. `observer` sees the
/// episode after every frame and can stop it early by returning
/// `ControlFlow::Break`.
pub fn run_episode<'a, C, R, F>(
    population: Vec<(C, &'a mut f64)>,
    config: &WorldConfig,
    frame_limit: Option<u64>,
    rng: &mut R,
    mut observer: F,
) -> Result<EpisodeSummary, SimError>
where
    C: Controller,
    R: Rng,
    F: FnMut(&Episode<'a, C>, &FrameReport) -> ControlFlow<()>,
{
    config.validate()?;
    let mut episode = Episode::new(population, config.clone(), rng).with_frame_limit(frame_limit);
    while episode.is_running() {
        let report = episode.step(rng);
        if observer(&episode, &report).is_break() {
            episode.quit();
        }
    }
    Ok(episode.summary())
}
