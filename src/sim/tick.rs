//! Per-frame simulation tick
//!
//! Order within a running tick: obstacle spawn/advance, player integrate,
//! distance update, collision test (possibly ending the run), particle fade.

use super::collision::first_collision;
use super::state::{GameState, RunState};
use crate::consts::FLAME_PULSE_STEP;

/// Input sampled once per tick (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Thrust held (key or touch down)
    pub thrust: bool,
}

impl TickInput {
    pub fn thrust(thrust: bool) -> Self {
        Self { thrust }
    }
}

/// Advance the game by one frame. `now_ms` must not decrease between calls.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    let viewport = state.viewport;
    state.stars.advance(&viewport);

    match state.phase {
        RunState::Idle => {}
        RunState::Over => state.particles.advance(),
        RunState::Running => {
            if state.obstacles.is_spawn_tick(state.run_ticks) {
                state.obstacles.spawn(&viewport);
            }
            state.obstacles.advance(&viewport);

            state
                .player
                .integrate(input.thrust, viewport.height, state.tuning.damping);

            let elapsed_secs = (now_ms - state.run_start_ms) / 1000.0;
            state.score.update(
                elapsed_secs,
                state.tuning.base_speed,
                state.tuning.distance_speed_factor,
            );

            state.run_ticks += 1;
            state.flame_phase += FLAME_PULSE_STEP;

            if first_collision(&state.player, &state.obstacles).is_some() {
                state.end_run();
            }

            state.particles.advance();
        }
    }
}
