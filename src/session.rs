//! Session facade: the surface the frame driver and UI talk to
//!
//! Owns the simulation state and the best-score store. The UI only issues
//! intents (`start`, `restart`, `set_viewport`) and reads [`Snapshot`]s.

use serde::Serialize;

use crate::error::Result;
use crate::persistence::ScoreStore;
use crate::settings::Tuning;
use crate::sim::{
    GameEvent, GameState, Obstacle, Particle, PlayerBody, RunState, Star, TickInput, Viewport,
    share_text, tick,
};

/// Read-only view of one frame for the renderer
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub run_state: RunState,
    pub viewport: Viewport,
    pub player: &'a PlayerBody,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub stars: &'a [Star],
    /// Meters, unfloored
    pub distance: f64,
    /// Meters, as displayed ("Distance: N m")
    pub display_distance: u64,
    pub best_distance: u64,
    pub grade: &'a str,
    pub flame_phase: f32,
    /// The engine flame is drawn only while flying
    pub flame_visible: bool,
    pub can_share: bool,
    /// False if the last best-score write failed
    pub best_saved: bool,
    /// True if the stored best could not be read at startup
    pub load_failed: bool,
}

pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    best_saved: bool,
    load_failed: bool,
}

impl<S: ScoreStore> Session<S> {
    /// Validate the tuning, read the stored best once, and wait in `Idle`.
    ///
    /// An unreadable best score is not fatal: the session starts from 0 and
    /// reports `load_failed`.
    pub fn new(mut store: S, tuning: Tuning, viewport: Viewport, seed: u64) -> Result<Self> {
        tuning.validate()?;
        let (best, load_failed) = match store.load_best() {
            Ok(best) => (best, false),
            Err(e) => {
                log::warn!("Could not load best score, starting from 0: {e}");
                (0, true)
            }
        };
        log::info!(
            "Session ready: seed {seed}, {} preset, best {best} m",
            tuning.form_factor.as_str()
        );
        Ok(Self {
            state: GameState::new(seed, tuning, viewport, best),
            store,
            best_saved: true,
            load_failed,
        })
    }

    /// Begin the first run
    pub fn start(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.state.phase != RunState::Idle {
            log::debug!("start() while {:?}, treating as restart", self.state.phase);
        }
        self.state.start_run(now_ms);
        self.state.drain_events()
    }

    /// Begin another run after game over
    pub fn restart(&mut self, now_ms: f64) -> Vec<GameEvent> {
        self.state.start_run(now_ms);
        self.state.drain_events()
    }

    /// Report new geometry. Invalid sizes are rejected and the old one kept.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<()> {
        match Viewport::new(width, height) {
            Ok(viewport) => {
                self.state.set_viewport(viewport);
                Ok(())
            }
            Err(e) => {
                log::warn!("Ignoring viewport change: {e}");
                Err(e)
            }
        }
    }

    /// Advance one frame and persist the best score if the run ended
    pub fn tick(&mut self, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
        tick(&mut self.state, input, now_ms);
        let mut events = self.state.drain_events();

        let finished = events.iter().find_map(|e| match e {
            GameEvent::RunOver { best, .. } => Some(*best),
            _ => None,
        });
        if let Some(best) = finished {
            match self.store.save_best(best) {
                Ok(()) => self.best_saved = true,
                Err(e) => {
                    log::warn!("Best score {best} m not saved: {e}");
                    self.best_saved = false;
                    events.push(GameEvent::BestSaveFailed { best });
                }
            }
        }
        events
    }

    /// Whether the driver should schedule another tick
    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn run_state(&self) -> RunState {
        self.state.phase
    }

    pub fn distance(&self) -> f64 {
        self.state.score.current_distance
    }

    pub fn best_distance(&self) -> u64 {
        self.state.score.best_distance
    }

    pub fn grade(&self) -> &str {
        self.state.grade()
    }

    pub fn share_text(&self) -> String {
        share_text(self.state.score.current_distance)
    }

    pub fn can_share(&self) -> bool {
        self.state.can_share()
    }

    pub fn best_saved(&self) -> bool {
        self.best_saved
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        Snapshot {
            run_state: state.phase,
            viewport: state.viewport,
            player: &state.player,
            obstacles: state.obstacles.as_slice(),
            particles: state.particles.as_slice(),
            stars: state.stars.as_slice(),
            distance: state.score.current_distance,
            display_distance: state.score.display_distance(),
            best_distance: state.score.best_distance,
            grade: state.grade(),
            flame_phase: state.flame_phase,
            flame_visible: state.phase == RunState::Running,
            can_share: state.can_share(),
            best_saved: self.best_saved,
            load_failed: self.load_failed,
        }
    }
}
