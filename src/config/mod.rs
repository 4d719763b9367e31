//! Config domain: tuning data, RON loading, and validation.

mod data;
mod loader;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{
    BodyTuning, CloudTuning, DashTuning, GrappleTuning, MotorTuning, MovementTuning,
    SimulationTuning, SlowMotionTuning,
};
pub use loader::{ConfigLoadError, load_tuning, parse_tuning};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

pub const DEFAULT_TUNING_PATH: &str = "assets/config/tuning.ron";

/// Loads [`MovementTuning`] before any other plugin reads it.
pub struct ConfigPlugin {
    pub path: PathBuf,
}

impl Default for ConfigPlugin {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TUNING_PATH),
        }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let tuning = match load_tuning(&self.path) {
            Ok(tuning) => {
                info!("Loaded tuning from {}", self.path.display());
                tuning
            }
            Err(e) => {
                warn!("{}; using default tuning", e);
                MovementTuning::default()
            }
        };

        let tuning = checked_tuning(tuning);

        app.insert_resource(Time::<Fixed>::from_hz(tuning.simulation.tick_rate))
            .insert_resource(tuning);
    }
}

/// Returns `tuning` if it validates, otherwise logs every problem and falls
/// back to the defaults.
pub(crate) fn checked_tuning(tuning: MovementTuning) -> MovementTuning {
    let errors = validate_tuning(&tuning);
    if errors.is_empty() {
        return tuning;
    }

    for error in &errors {
        warn!("Invalid tuning: {}", error);
    }
    warn!("{} tuning problem(s); using default tuning", errors.len());
    MovementTuning::default()
}
