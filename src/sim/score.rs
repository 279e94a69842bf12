//! Distance scoring, best score and grade tiers

use serde::{Deserialize, Serialize};

/// Grade shown when no tier threshold is met
pub const BASE_GRADE: &str = "Cadet";

/// Distance covered after `elapsed_seconds` of a run, in meters
#[inline]
pub fn distance(elapsed_seconds: f64, base_speed: f32, speed_factor: f32) -> f64 {
    elapsed_seconds * f64::from(base_speed) * f64::from(speed_factor)
}

/// Text offered to the share action
pub fn share_text(distance: f64) -> String {
    format!("{} m", distance.max(0.0).floor() as u64)
}

/// A named grade unlocked once the best distance reaches `threshold`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeTier {
    pub threshold: u64,
    pub name: String,
}

impl GradeTier {
    pub fn new(threshold: u64, name: impl Into<String>) -> Self {
        Self {
            threshold,
            name: name.into(),
        }
    }

    /// Default ladder, ascending
    pub fn defaults() -> Vec<GradeTier> {
        vec![
            GradeTier::new(500, "Pilot"),
            GradeTier::new(1500, "Captain"),
            GradeTier::new(3000, "Commander"),
            GradeTier::new(6000, "Legend"),
        ]
    }
}

/// Highest tier whose threshold `best` meets, or [`BASE_GRADE`]
pub fn grade_for(best: u64, tiers: &[GradeTier]) -> &str {
    tiers
        .iter()
        .filter(|t| best >= t.threshold)
        .max_by_key(|t| t.threshold)
        .map(|t| t.name.as_str())
        .unwrap_or(BASE_GRADE)
}

/// Current run distance plus the persisted best
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Meters covered in the current (or last) run
    pub current_distance: f64,
    /// Best floored distance over all runs
    pub best_distance: u64,
}

impl ScoreRecord {
    pub fn new(best_distance: u64) -> Self {
        Self {
            current_distance: 0.0,
            best_distance,
        }
    }

    /// Start a new run
    pub fn reset_run(&mut self) {
        self.current_distance = 0.0;
    }

    /// Recompute the run distance from wall-clock elapsed time.
    ///
    /// Never moves backward, even if the driver hands us a stale timestamp.
    pub fn update(&mut self, elapsed_seconds: f64, base_speed: f32, speed_factor: f32) {
        let d = distance(elapsed_seconds.max(0.0), base_speed, speed_factor);
        if d > self.current_distance {
            self.current_distance = d;
        }
    }

    /// Floored run distance, as displayed
    pub fn display_distance(&self) -> u64 {
        self.current_distance.floor() as u64
    }

    /// Fold the run into the best score. Returns true on a new best.
    pub fn finalize(&mut self) -> bool {
        let run = self.display_distance();
        if run > self.best_distance {
            self.best_distance = run;
            true
        } else {
            false
        }
    }
}
