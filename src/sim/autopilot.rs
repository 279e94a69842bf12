//! Demo controller that flies the rocket on its own
//!
//! Used by the headless binary and attract mode. It reads the state like a
//! player would and only ever produces a [`TickInput`].

use glam::Vec2;

use super::collision::{Disc, is_colliding};
use super::state::GameState;
use super::tick::TickInput;

/// Only obstacles closer than this (horizontally) are considered threats
const LOOKAHEAD: f32 = 320.0;
/// Extra clearance kept between rocket and meteorite
const MARGIN: f32 = 12.0;
/// Ticks of velocity used to predict where the rocket will be
const PREDICT_TICKS: f32 = 4.0;

/// Pick thrust for the next tick
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let height = state.viewport.height;
    let lo = player.radius;
    let hi = (height - player.radius).max(lo);

    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.radius >= player.pos.x - player.radius)
        .filter(|o| o.pos.x - o.radius - player.pos.x <= LOOKAHEAD)
        .filter(|o| {
            // The rocket, padded, as it would stand when the meteorite reaches it
            let swept = Disc::new(Vec2::new(o.pos.x, player.pos.y), player.radius + MARGIN * 2.0);
            is_colliding(&swept, *o)
        })
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let target_y = match threat {
        Some(o) => {
            let clearance = o.radius + player.radius + MARGIN;
            let above = o.pos.y - clearance;
            let below = o.pos.y + clearance;
            let above_ok = above >= lo;
            let below_ok = below <= hi;
            match (above_ok, below_ok) {
                (true, true) => {
                    if (player.pos.y - above).abs() <= (player.pos.y - below).abs() {
                        above
                    } else {
                        below
                    }
                }
                (true, false) => above,
                (false, true) => below,
                (false, false) => height / 2.0,
            }
        }
        None => height / 2.0,
    };

    let predicted = player.pos.y + player.velocity_y * PREDICT_TICKS;
    TickInput::thrust(predicted > target_y)
}
