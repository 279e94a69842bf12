//! Game state and run state machine
//!
//! All mutable simulation state lives in [`GameState`]; nothing is global.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::motion::PlayerBody;
use super::obstacles::{ObstacleField, SpawnConfig};
use super::particles::ParticleSystem;
use super::score::{ScoreRecord, grade_for};
use super::starfield::Starfield;
use crate::clamp_to_extent;
use crate::error::{GameError, Result};
use crate::settings::Tuning;

/// Phase of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Before the first run (menu)
    Idle,
    /// Simulation ticking
    Running,
    /// Crashed; only particles and stars keep moving
    Over,
}

/// Playfield size in simulation units (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(GameError::InvalidViewport { width, height })
        }
    }
}

/// Things that happened during a tick or command, for the UI to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (start or restart)
    RunStarted,
    /// The rocket hit a meteorite at this position
    Collision { at: Vec2 },
    /// The run ended and the score was finalized
    RunOver {
        distance: u64,
        best: u64,
        new_best: bool,
    },
    /// The best score could not be persisted; it is kept in memory only
    BestSaveFailed { best: u64 },
}

/// PCG stream ids so each subsystem draws from an independent sequence
const OBSTACLE_STREAM: u64 = 1;
const PARTICLE_STREAM: u64 = 2;
const STAR_STREAM: u64 = 3;

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Geometry received mid-run, applied at the next run start
    pending_viewport: Option<Viewport>,
    pub phase: RunState,
    pub player: PlayerBody,
    pub obstacles: ObstacleField,
    pub particles: ParticleSystem,
    pub stars: Starfield,
    pub score: ScoreRecord,
    /// Ticks simulated in the current run
    pub run_ticks: u64,
    /// Driver timestamp (ms) the current run started at
    pub run_start_ms: f64,
    /// Engine flame animation phase
    pub flame_phase: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session. `tuning` is assumed validated.
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, best_distance: u64) -> Self {
        let obstacles = ObstacleField::new(SpawnConfig::from(&tuning), Pcg32::new(seed, OBSTACLE_STREAM));
        let particles = ParticleSystem::new(
            tuning.particle_alpha_decrement,
            Pcg32::new(seed, PARTICLE_STREAM),
        );
        let stars = Starfield::new(tuning.star_count, &viewport, Pcg32::new(seed, STAR_STREAM));

        Self {
            seed,
            player: PlayerBody::new(&tuning, viewport.height),
            tuning,
            viewport,
            pending_viewport: None,
            phase: RunState::Idle,
            obstacles,
            particles,
            stars,
            score: ScoreRecord::new(best_distance),
            run_ticks: 0,
            run_start_ms: 0.0,
            flame_phase: 0.0,
            events: Vec::new(),
        }
    }

    /// Enter `Running` from any phase with a fresh run
    pub fn start_run(&mut self, now_ms: f64) {
        if let Some(viewport) = self.pending_viewport.take() {
            self.apply_viewport(viewport);
        }

        self.player = PlayerBody::new(&self.tuning, self.viewport.height);
        self.obstacles.clear();
        self.particles.clear();
        self.score.reset_run();
        self.run_ticks = 0;
        self.run_start_ms = now_ms;
        self.flame_phase = 0.0;

        log::info!(
            "Run started ({:?} -> Running) at {:.0} ms, viewport {}x{}",
            self.phase,
            now_ms,
            self.viewport.width,
            self.viewport.height
        );
        self.phase = RunState::Running;
        self.events.push(GameEvent::RunStarted);
    }

    /// `Running -> Over`: freeze, explode at the rocket, finalize the score
    pub fn end_run(&mut self) {
        if self.phase != RunState::Running {
            return;
        }
        let at = self.player.pos;
        self.phase = RunState::Over;
        self.particles.spawn_burst(at, self.tuning.burst_size);
        self.events.push(GameEvent::Collision { at });

        let new_best = self.score.finalize();
        let distance = self.score.display_distance();
        let best = self.score.best_distance;
        log::info!(
            "Run over after {} ticks: {} m (best {} m{})",
            self.run_ticks,
            distance,
            best,
            if new_best { ", new best" } else { "" }
        );
        self.events.push(GameEvent::RunOver {
            distance,
            best,
            new_best,
        });
    }

    /// Change geometry now, or at the next run start if a run is in progress
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.phase == RunState::Running {
            log::debug!(
                "Deferring viewport {}x{} until the next run",
                viewport.width,
                viewport.height
            );
            self.pending_viewport = Some(viewport);
        } else {
            self.apply_viewport(viewport);
        }
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stars.fit(&viewport);
        match self.phase {
            RunState::Idle => self.player = PlayerBody::new(&self.tuning, viewport.height),
            // The wreck stays on screen until the next run
            _ => {
                self.player.pos.y =
                    clamp_to_extent(self.player.pos.y, self.player.radius, viewport.height);
                self.obstacles.fit(&viewport);
            }
        }
    }

    /// Geometry waiting for the next run, if any
    pub fn pending_viewport(&self) -> Option<Viewport> {
        self.pending_viewport
    }

    /// Whether the driver should keep scheduling ticks
    pub fn is_animating(&self) -> bool {
        self.phase == RunState::Running || !self.particles.is_empty()
    }

    /// Grade earned by the best distance so far
    pub fn grade(&self) -> &str {
        grade_for(self.score.best_distance, &self.tuning.grades)
    }

    /// Sharing only makes sense after a run that went somewhere
    pub fn can_share(&self) -> bool {
        self.phase == RunState::Over && self.score.current_distance > 0.0
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
