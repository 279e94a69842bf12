//! Gameplay tuning and device presets
//!
//! Every constant the simulation reads lives in [`Tuning`] so a run can be
//! retuned from JSON without recompiling.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};
use crate::sim::score::GradeTier;

/// Device class presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FormFactor {
    /// Phones and small touch screens
    Compact,
    #[default]
    Large,
}

impl FormFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormFactor::Compact => "Compact",
            FormFactor::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" | "mobile" => Some(FormFactor::Compact),
            "large" | "desktop" => Some(FormFactor::Large),
            _ => None,
        }
    }

    /// Pick a preset from the viewport width
    pub fn from_viewport_width(width: f32) -> Self {
        if width < COMPACT_WIDTH_THRESHOLD {
            FormFactor::Compact
        } else {
            FormFactor::Large
        }
    }

    /// Player radius for this preset
    pub fn player_radius(&self) -> f32 {
        match self {
            FormFactor::Compact => 18.0,
            FormFactor::Large => 25.0,
        }
    }

    /// Fixed horizontal player position
    pub fn player_x(&self) -> f32 {
        match self {
            FormFactor::Compact => 75.0,
            FormFactor::Large => 150.0,
        }
    }

    /// Obstacle radius range as (base, extra): radius in [base, base + extra)
    pub fn obstacle_radius_range(&self) -> (f32, f32) {
        match self {
            FormFactor::Compact => (15.0, 10.0),
            FormFactor::Large => (25.0, 15.0),
        }
    }

    /// Maximum simultaneously active obstacles
    pub fn max_obstacles(&self) -> usize {
        match self {
            FormFactor::Compact => 12,
            FormFactor::Large => 24,
        }
    }
}

/// All gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub form_factor: FormFactor,

    // === Player ===
    pub player_x: f32,
    pub player_radius: f32,
    pub accel_up: f32,
    pub accel_down: f32,
    pub max_speed: f32,
    /// Velocity multiplier applied after clamping (1.0 = no drag)
    pub damping: f32,

    // === Obstacles ===
    pub obstacle_radius_base: f32,
    pub obstacle_radius_extra: f32,
    pub obstacle_min_drift: f32,
    pub obstacle_max_drift: f32,
    pub spawn_interval_ticks: u32,
    pub max_obstacles: usize,

    // === Speed & score ===
    pub base_speed: f32,
    pub obstacle_speed_factor: f32,
    pub distance_speed_factor: f32,
    /// Ascending best-distance thresholds for the grade shown after a run
    pub grades: Vec<GradeTier>,

    // === Effects ===
    pub burst_size: usize,
    pub particle_alpha_decrement: f32,
    pub star_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_form_factor(FormFactor::default())
    }
}

impl Tuning {
    /// Preset values for a device class
    pub fn for_form_factor(form_factor: FormFactor) -> Self {
        let (obstacle_radius_base, obstacle_radius_extra) = form_factor.obstacle_radius_range();
        Self {
            form_factor,

            player_x: form_factor.player_x(),
            player_radius: form_factor.player_radius(),
            accel_up: PLAYER_ACCEL_UP,
            accel_down: PLAYER_ACCEL_DOWN,
            max_speed: PLAYER_MAX_SPEED,
            damping: PLAYER_DAMPING,

            obstacle_radius_base,
            obstacle_radius_extra,
            obstacle_min_drift: OBSTACLE_MIN_DRIFT,
            obstacle_max_drift: OBSTACLE_MAX_DRIFT,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            max_obstacles: form_factor.max_obstacles(),

            base_speed: BASE_SPEED,
            obstacle_speed_factor: OBSTACLE_SPEED_FACTOR,
            distance_speed_factor: DISTANCE_SPEED_FACTOR,
            grades: GradeTier::defaults(),

            burst_size: BURST_SIZE,
            particle_alpha_decrement: PARTICLE_ALPHA_DECREMENT,
            star_count: STAR_COUNT,
        }
    }

    /// Same preset with player drag disabled
    pub fn undamped(form_factor: FormFactor) -> Self {
        Self {
            damping: 1.0,
            ..Self::for_form_factor(form_factor)
        }
    }

    /// Horizontal obstacle speed (pixels/tick)
    pub fn obstacle_speed(&self) -> f32 {
        self.base_speed * self.obstacle_speed_factor
    }

    /// Check every value is inside the range the simulation can handle
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("player_radius", self.player_radius),
            ("max_speed", self.max_speed),
            ("obstacle_radius_base", self.obstacle_radius_base),
            ("base_speed", self.base_speed),
            ("obstacle_speed_factor", self.obstacle_speed_factor),
            ("particle_alpha_decrement", self.particle_alpha_decrement),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("player_x", self.player_x),
            ("obstacle_radius_extra", self.obstacle_radius_extra),
            ("obstacle_min_drift", self.obstacle_min_drift),
            ("distance_speed_factor", self.distance_speed_factor),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !(self.obstacle_max_drift.is_finite() && self.obstacle_max_drift >= self.obstacle_min_drift)
        {
            return Err(GameError::InvalidTuning(format!(
                "obstacle_max_drift ({}) must be >= obstacle_min_drift ({})",
                self.obstacle_max_drift, self.obstacle_min_drift
            )));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(GameError::InvalidTuning(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if !(self.accel_up.is_finite() && self.accel_down.is_finite()) {
            return Err(GameError::InvalidTuning("accelerations must be finite".into()));
        }
        if self.spawn_interval_ticks == 0 {
            return Err(GameError::InvalidTuning(
                "spawn_interval_ticks must be at least 1".into(),
            ));
        }
        if !self.grades.windows(2).all(|w| w[0].threshold < w[1].threshold) {
            return Err(GameError::InvalidTuning(
                "grade thresholds must be strictly ascending".into(),
            ));
        }
        Ok(())
    }

    /// Parse tuning from JSON.
    ///
    /// Missing fields take the values of the named `form_factor` preset
    /// (Large when none is named).
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let form_factor = match overrides.get("form_factor") {
            Some(value) => FormFactor::deserialize(value)?,
            None => FormFactor::default(),
        };

        let mut merged = serde_json::to_value(Self::for_form_factor(form_factor))?;
        let tuning: Tuning = match (merged.as_object_mut(), overrides.as_object()) {
            (Some(preset), Some(fields)) => {
                for (key, value) in fields {
                    preset.insert(key.clone(), value.clone());
                }
                serde_json::from_value(merged)?
            }
            // Not an object: let serde report the shape error
            _ => serde_json::from_value(overrides)?,
        };
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded {} tuning from {}",
            tuning.form_factor.as_str(),
            path.display()
        );
        Ok(tuning)
    }
}
